//! Record transformers for bills and line items
//!
//! Pure, stateless mappings between the storage shape (flat snake_case rows,
//! nullable string dates) and the presentation shape. The storage->presentation
//! direction is total over any row matching the storage shape: missing
//! optional fields default, extra fields are ignored, nothing errors.
//!
//! The bill row carries neither `customer_name`, `transaction_type`, nor
//! `remarks`; those are caller-supplied fields that do not round-trip
//! through storage. Loads leave them at their defaults; Create returns the
//! caller-composed bill instead of re-fetching for exactly this reason.

use serde_json::{json, Value};

use core_kernel::rows;

use crate::bill::{Bill, BillItem, NewBill, TransactionType};

/// Shapes a storage bill row into a presentation Bill with no items attached
///
/// Item attachment is the caller's job (`BillLifecycle::load_all` groups item
/// rows under their headers).
pub fn bill_from_row(row: &Value) -> Bill {
    Bill {
        id: rows::str_field(row, "id"),
        bill_number: rows::str_field(row, "bill_number"),
        customer_id: rows::str_field(row, "customer_id"),
        customer_name: String::new(),
        date: rows::date_field(row, "bill_date"),
        items: Vec::new(),
        subtotal: rows::decimal_field(row, "subtotal"),
        tax: rows::opt_decimal_field(row, "tax_amount"),
        total: rows::decimal_field(row, "total_amount"),
        transaction_type: TransactionType::default(),
        remarks: None,
    }
}

/// Shapes a storage bill_items row into a presentation BillItem
pub fn bill_item_from_row(row: &Value) -> BillItem {
    BillItem {
        product_id: rows::str_field(row, "product_id"),
        product_name: rows::str_field(row, "product_name"),
        quantity: rows::decimal_field(row, "quantity"),
        price: rows::decimal_field(row, "rate"),
        total: rows::decimal_field(row, "amount"),
    }
}

/// Returns the owning bill id of a bill_items row
pub fn item_row_bill_id(row: &Value) -> String {
    rows::str_field(row, "bill_id")
}

/// Shapes a new bill's header fields into a bills row
///
/// The id is minted by the lifecycle and included so item rows can reference
/// it without re-reading the insert response. An empty customer id is stored
/// as null (the column is a nullable foreign key).
pub fn bill_header_to_row(id: &str, bill_number: &str, bill: &NewBill) -> Value {
    let customer_id = if bill.customer_id.is_empty() {
        Value::Null
    } else {
        Value::String(bill.customer_id.clone())
    };
    json!({
        "id": id,
        "bill_number": bill_number,
        "customer_id": customer_id,
        "bill_date": bill.date.format("%Y-%m-%d").to_string(),
        "subtotal": bill.subtotal,
        "tax_amount": bill.tax,
        "total_amount": bill.total,
    })
}

/// Shapes a line item into a bill_items row referencing its header
pub fn bill_item_to_row(bill_id: &str, item: &BillItem) -> Value {
    let product_id = if item.product_id.is_empty() {
        Value::Null
    } else {
        Value::String(item.product_id.clone())
    };
    json!({
        "bill_id": bill_id,
        "product_id": product_id,
        "product_name": item.product_name,
        "quantity": item.quantity,
        "rate": item.price,
        "amount": item.total,
    })
}
