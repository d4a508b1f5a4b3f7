//! Record transformer for customers
//!
//! Pure mapping between the storage row (snake_case, nullable string date)
//! and the presentation shape. Total over any row matching the storage shape:
//! missing numerics default to zero, a null `last_purchase_date` stays None,
//! extra fields are ignored.

use serde_json::{json, Value};

use core_kernel::{rows, StoreError, StorePort};

use crate::customer::Customer;

/// Table holding customer rows
pub const CUSTOMERS_TABLE: &str = "customers";

/// Shapes a storage customers row into a presentation Customer
pub fn customer_from_row(row: &Value) -> Customer {
    Customer {
        id: rows::str_field(row, "id"),
        name: rows::str_field(row, "name"),
        total_revenue: rows::decimal_field(row, "total_revenue"),
        total_cost: rows::decimal_field(row, "total_cost"),
        total_profit: rows::decimal_field(row, "total_profit"),
        profit_margin: rows::decimal_field(row, "profit_margin"),
        bill_count: rows::int_field(row, "bill_count"),
        segment: rows::str_field(row, "segment"),
        last_purchase_date: rows::opt_date_field(row, "last_purchase_date"),
    }
}

/// Shapes a Customer into the snake_case field set the table accepts
pub fn customer_to_row(customer: &Customer) -> Value {
    json!({
        "name": customer.name,
        "total_revenue": customer.total_revenue,
        "total_cost": customer.total_cost,
        "total_profit": customer.total_profit,
        "profit_margin": customer.profit_margin,
        "bill_count": customer.bill_count,
        "segment": customer.segment,
        "last_purchase_date": customer.last_purchase_date
            .map(|d| d.format("%Y-%m-%d").to_string()),
    })
}

/// Reads every customer from storage (wholesale refresh path)
pub async fn load_customers(store: &dyn StorePort) -> Result<Vec<Customer>, StoreError> {
    let rows = store.select_all(CUSTOMERS_TABLE, None).await?;
    Ok(rows.iter().map(customer_from_row).collect())
}
