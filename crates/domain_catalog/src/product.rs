//! Product reference entity

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as the presentation layer sees it
///
/// `status` is an enum-like string ("In Stock", "Low Stock", "Out of Stock")
/// passed through unvalidated, same as customer segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Storage identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Purchase cost per unit
    pub cost_price: Decimal,
    /// Selling price per unit
    pub selling_price: Decimal,
    /// Units on hand
    pub stock: i64,
    /// Stock level that should trigger a reorder
    pub reorder_threshold: i64,
    /// Supplier lead time in days
    pub lead_time: i64,
    /// Category label
    pub category: String,
    /// Stock status label, passed through as stored
    pub status: String,
}
