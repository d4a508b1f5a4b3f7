//! Customer reference entity

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A customer as the presentation layer sees it
///
/// Profitability figures are maintained by the backend; this layer only
/// shapes them. `segment` is an enum-like string ("High Value", "Medium
/// Value", "Low Value") passed through unvalidated; an unexpected value is
/// the caller's problem, not a transform error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Storage identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Lifetime revenue from this customer
    pub total_revenue: Decimal,
    /// Lifetime cost attributed to this customer
    pub total_cost: Decimal,
    /// Lifetime profit
    pub total_profit: Decimal,
    /// Profit margin percentage
    pub profit_margin: Decimal,
    /// Number of bills on record
    pub bill_count: i64,
    /// Value segment label, passed through as stored
    pub segment: String,
    /// Date of the most recent purchase, if any
    pub last_purchase_date: Option<NaiveDate>,
}
