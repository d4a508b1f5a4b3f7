//! Record transformer for products

use serde_json::{json, Value};

use core_kernel::{rows, StoreError, StorePort};

use crate::product::Product;

/// Table holding product rows
pub const PRODUCTS_TABLE: &str = "products";

/// Shapes a storage products row into a presentation Product
///
/// Total over any row matching the storage shape: numerics default to zero,
/// strings to empty, extra fields are ignored.
pub fn product_from_row(row: &Value) -> Product {
    Product {
        id: rows::str_field(row, "id"),
        name: rows::str_field(row, "name"),
        cost_price: rows::decimal_field(row, "cost_price"),
        selling_price: rows::decimal_field(row, "selling_price"),
        stock: rows::int_field(row, "stock"),
        reorder_threshold: rows::int_field(row, "reorder_threshold"),
        lead_time: rows::int_field(row, "lead_time"),
        category: rows::str_field(row, "category"),
        status: rows::str_field(row, "status"),
    }
}

/// Shapes a Product into the snake_case field set the table accepts
pub fn product_to_row(product: &Product) -> Value {
    json!({
        "name": product.name,
        "cost_price": product.cost_price,
        "selling_price": product.selling_price,
        "stock": product.stock,
        "reorder_threshold": product.reorder_threshold,
        "lead_time": product.lead_time,
        "category": product.category,
        "status": product.status,
    })
}

/// Reads every product from storage (wholesale refresh path)
pub async fn load_products(store: &dyn StorePort) -> Result<Vec<Product>, StoreError> {
    let rows = store.select_all(PRODUCTS_TABLE, None).await?;
    Ok(rows.iter().map(product_from_row).collect())
}
