//! Expense reference entity

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A recorded business expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Storage identifier
    pub id: String,
    /// Date the expense was incurred
    pub date: NaiveDate,
    /// Amount spent
    pub amount: Decimal,
    /// Category label
    pub category: String,
    /// Free-form description; empty when the row has none
    pub description: String,
}
