//! Custom Test Assertions
//!
//! Assertion helpers for domain types that give more meaningful failure
//! messages than bare `assert_eq!`.

use rust_decimal::Decimal;

use domain_billing::{Bill, BillItem};

/// Asserts that totals agree with the item list
///
/// # Panics
///
/// Panics if the subtotal is not the sum of item totals, or the grand total
/// is not subtotal plus tax.
pub fn assert_bill_consistent(
    items: &[BillItem],
    subtotal: Decimal,
    tax: Option<Decimal>,
    total: Decimal,
) {
    let item_sum: Decimal = items.iter().map(|i| i.total).sum();
    assert_eq!(
        subtotal, item_sum,
        "subtotal {subtotal} does not match item sum {item_sum}"
    );
    let expected_total = subtotal + tax.unwrap_or(Decimal::ZERO);
    assert_eq!(
        total, expected_total,
        "total {total} does not match subtotal {subtotal} + tax {tax:?}"
    );
}

/// Asserts that two bills agree on every field the store round-trips
///
/// Caller-only fields (customer name, transaction type, remarks) are skipped:
/// loads leave them at their defaults.
pub fn assert_bill_round_trips(stored: &Bill, original: &Bill) {
    assert_eq!(stored.id, original.id, "id changed across the store");
    assert_eq!(
        stored.bill_number, original.bill_number,
        "bill number changed across the store"
    );
    assert_eq!(
        stored.customer_id, original.customer_id,
        "customer id changed across the store"
    );
    assert_eq!(stored.date, original.date, "date changed across the store");
    assert_eq!(
        stored.subtotal, original.subtotal,
        "subtotal changed across the store"
    );
    assert_eq!(stored.tax, original.tax, "tax changed across the store");
    assert_eq!(stored.total, original.total, "total changed across the store");
    assert_eq!(
        stored.items.len(),
        original.items.len(),
        "item count changed across the store"
    );
}

/// Asserts that a bill's item list matches the expected items exactly
pub fn assert_items_eq(actual: &[BillItem], expected: &[BillItem]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "item count mismatch: {} vs {}",
        actual.len(),
        expected.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(a, e, "item {i} differs");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::TestBillBuilder;
    use rust_decimal_macros::dec;

    #[test]
    fn test_consistent_bill_passes() {
        let bill = TestBillBuilder::new().with_tax(dec!(50)).build();
        assert_bill_consistent(&bill.items, bill.subtotal, bill.tax, bill.total);
    }

    #[test]
    #[should_panic(expected = "does not match item sum")]
    fn test_wrong_subtotal_panics() {
        let bill = TestBillBuilder::new().build();
        assert_bill_consistent(&bill.items, dec!(1), bill.tax, bill.total);
    }
}
