//! Pre-built Test Fixtures
//!
//! Ready-to-use storage rows and domain values for the dashboard test suite.
//! Fixtures are deterministic so assertions can name exact values.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::sync::Arc;

use core_kernel::mock::MemoryStore;

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Canonical bill date (Sep 10, 2025)
    pub fn bill_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 10).unwrap()
    }

    /// A purchase date earlier in the same month
    pub fn earlier_purchase() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }
}

/// Fixture for storage-shaped rows, one constructor per table
pub struct RowFixtures;

impl RowFixtures {
    /// A bills row as the backend returns it
    pub fn bill_row(id: &str) -> Value {
        json!({
            "id": id,
            "bill_number": "B1757490000000",
            "customer_id": "c-1",
            "bill_date": "2025-09-10",
            "subtotal": 500,
            "tax_amount": Value::Null,
            "total_amount": 500,
            "created_at": "2025-09-10T08:00:00+00:00"
        })
    }

    /// A bill_items row owned by `bill_id`
    pub fn bill_item_row(bill_id: &str) -> Value {
        json!({
            "id": "i-1",
            "bill_id": bill_id,
            "product_id": "p-1",
            "product_name": "Widget",
            "quantity": 5,
            "rate": 100,
            "amount": 500
        })
    }

    /// A customers row with every aggregate populated
    pub fn customer_row(id: &str) -> Value {
        json!({
            "id": id,
            "name": "Acme Traders",
            "total_revenue": 39450.00,
            "total_cost": 0,
            "total_profit": 39450.00,
            "profit_margin": 100.0,
            "bill_count": 2,
            "segment": "High Value",
            "last_purchase_date": "2025-09-10"
        })
    }

    /// A products row at healthy stock
    pub fn product_row(id: &str) -> Value {
        json!({
            "id": id,
            "name": "Widget",
            "cost_price": 60,
            "selling_price": 100,
            "stock": 40,
            "reorder_threshold": 10,
            "lead_time": 7,
            "category": "Hardware",
            "status": "In Stock"
        })
    }

    /// An expenses row
    pub fn expense_row(id: &str) -> Value {
        json!({
            "id": id,
            "expense_date": "2025-09-01",
            "amount": 40.50,
            "category": "Transport",
            "description": "Fuel"
        })
    }
}

/// Canonical seed data, one row per table, shared across tests
pub static SEED_ROWS: Lazy<Vec<(&'static str, Vec<Value>)>> = Lazy::new(|| {
    vec![
        ("bills", vec![RowFixtures::bill_row("b-1")]),
        ("bill_items", vec![RowFixtures::bill_item_row("b-1")]),
        ("customers", vec![RowFixtures::customer_row("c-1")]),
        ("products", vec![RowFixtures::product_row("p-1")]),
        ("expenses", vec![RowFixtures::expense_row("e-1")]),
    ]
});

/// Creates a MemoryStore seeded with the canonical row per table
pub async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    for (table, rows) in SEED_ROWS.iter() {
        store.seed(*table, rows.clone()).await;
    }
    store
}
