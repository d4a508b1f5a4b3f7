//! Bill and line-item types
//!
//! These are the presentation shapes: camelCase on the wire, typed dates,
//! decimal amounts. A bill exclusively owns its line items; the customer is
//! held by plain id only (deleting a customer elsewhere neither blocks on nor
//! cascades into bill data).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction kind for a bill
///
/// Caller-supplied and not persisted on the bill row, so it never passes
/// through the storage transformer; loads default it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Customer owes the merchant
    #[default]
    Debit,
    /// Merchant owes the customer
    Credit,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Debit => write!(f, "Debit"),
            TransactionType::Credit => write!(f, "Credit"),
        }
    }
}

/// One product/quantity/price entry belonging to exactly one bill
///
/// `product_name` is a denormalized copy taken when the bill is composed, so
/// the line survives later product deletion or renaming. `total` is
/// caller-computed (quantity x price) and not re-validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    /// Product reference; empty when the product is gone
    pub product_id: String,
    /// Name snapshot at composition time
    pub product_name: String,
    /// Non-negative quantity
    pub quantity: Decimal,
    /// Non-negative unit price
    pub price: Decimal,
    /// Line total, caller-computed
    pub total: Decimal,
}

/// A bill: the header fields plus the owned sequence of line items
///
/// `total == subtotal + tax` is expected but caller-computed; this layer does
/// not enforce it. `customer_id` empty means no customer is linked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Storage identifier
    pub id: String,
    /// Human-readable bill number, generated at creation
    pub bill_number: String,
    /// Weak customer reference; empty string when unlinked
    pub customer_id: String,
    /// Customer name snapshot (not persisted on the bill row)
    pub customer_name: String,
    /// Bill date
    pub date: NaiveDate,
    /// Owned line items, in caller order
    pub items: Vec<BillItem>,
    /// Sum of line totals, caller-computed
    pub subtotal: Decimal,
    /// Optional tax amount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<Decimal>,
    /// Grand total, caller-computed
    pub total: Decimal,
    /// Debit or Credit
    pub transaction_type: TransactionType,
    /// Free-form remarks (not persisted on the bill row)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Input for composing a new bill
///
/// Everything except the generated id and bill number. `items` may be empty:
/// the UI discourages it but the operation does not require non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBill {
    /// Weak customer reference; empty string means no customer linked
    pub customer_id: String,
    /// Customer name snapshot
    pub customer_name: String,
    /// Bill date
    pub date: NaiveDate,
    /// Line items, caller-computed totals
    pub items: Vec<BillItem>,
    /// Sum of line totals
    pub subtotal: Decimal,
    /// Optional tax amount
    pub tax: Option<Decimal>,
    /// Grand total
    pub total: Decimal,
    /// Debit or Credit
    pub transaction_type: TransactionType,
    /// Free-form remarks
    pub remarks: Option<String>,
}

/// Generates a bill number unique per call under normal operation
///
/// Derived from the current time in milliseconds. Two concurrent calls may
/// race onto the same number; that is an accepted limitation, with the
/// storage layer's unique index as the backstop.
pub fn next_bill_number() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("B{}", duration.as_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_next_bill_number_is_nonempty_and_prefixed() {
        let number = next_bill_number();
        assert!(number.starts_with('B'));
        assert!(number.len() > 1);
        assert!(number[1..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_transaction_type_default_is_debit() {
        assert_eq!(TransactionType::default(), TransactionType::Debit);
    }

    #[test]
    fn test_bill_serializes_camel_case() {
        let bill = Bill {
            id: "b1".to_string(),
            bill_number: "B1700000000000".to_string(),
            customer_id: "1".to_string(),
            customer_name: "NANGANALLUR Grains".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
            items: vec![BillItem {
                product_id: "p1".to_string(),
                product_name: "Rice".to_string(),
                quantity: dec!(10),
                price: dec!(50),
                total: dec!(500),
            }],
            subtotal: dec!(500),
            tax: None,
            total: dec!(500),
            transaction_type: TransactionType::Debit,
            remarks: None,
        };

        let json = serde_json::to_value(&bill).unwrap();
        assert_eq!(json["billNumber"], "B1700000000000");
        assert_eq!(json["customerId"], "1");
        assert_eq!(json["items"][0]["productName"], "Rice");
        assert_eq!(json["transactionType"], "Debit");
        // Absent optionals are omitted, not null
        assert!(json.get("tax").is_none());
        assert!(json.get("remarks").is_none());
    }
}
