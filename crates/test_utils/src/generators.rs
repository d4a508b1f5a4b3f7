//! Property-Based Test Generators
//!
//! Proptest strategies for generating random test data that stays within the
//! shapes the transformers and lifecycle accept.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_billing::{BillItem, NewBill, TransactionType};

/// Strategy for two-decimal money amounts from 0.01 to 100000.00
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|minor| Decimal::new(minor, 2))
}

/// Strategy for whole-unit quantities from 1 to 999
pub fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1000i64).prop_map(Decimal::from)
}

/// Strategy for dates within the dashboard's plausible range
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650i64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(offset as u64))
            .unwrap()
    })
}

/// Strategy for the segment labels the backend computes
pub fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("High Value".to_string()),
        Just("Medium Value".to_string()),
        Just("Low Value".to_string()),
        Just("At Risk".to_string()),
    ]
}

/// Strategy for transaction types
pub fn transaction_type_strategy() -> impl Strategy<Value = TransactionType> {
    prop_oneof![Just(TransactionType::Debit), Just(TransactionType::Credit)]
}

/// Strategy for a line item whose total is quantity times price
pub fn bill_item_strategy() -> impl Strategy<Value = BillItem> {
    (
        "[a-z0-9]{8}",
        "[A-Za-z ]{3,24}",
        quantity_strategy(),
        amount_strategy(),
    )
        .prop_map(|(product_id, product_name, quantity, price)| BillItem {
            total: quantity * price,
            product_id,
            product_name,
            quantity,
            price,
        })
}

/// Strategy for a NewBill with 0 to 5 internally consistent items
pub fn new_bill_strategy() -> impl Strategy<Value = NewBill> {
    (
        "[a-z0-9]{8}",
        "[A-Za-z ]{3,24}",
        date_strategy(),
        prop::collection::vec(bill_item_strategy(), 0..5),
        prop::option::of(amount_strategy()),
        transaction_type_strategy(),
    )
        .prop_map(
            |(customer_id, customer_name, date, items, tax, transaction_type)| {
                let subtotal: Decimal = items.iter().map(|i| i.total).sum();
                let total = subtotal + tax.unwrap_or(Decimal::ZERO);
                NewBill {
                    customer_id,
                    customer_name,
                    date,
                    items,
                    subtotal,
                    tax,
                    total,
                    transaction_type,
                    remarks: None,
                }
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertions::assert_bill_consistent;
    use domain_billing::next_bill_number;

    proptest! {
        #[test]
        fn test_generated_bills_are_internally_consistent(bill in new_bill_strategy()) {
            let subtotal: Decimal = bill.items.iter().map(|i| i.total).sum();
            prop_assert_eq!(bill.subtotal, subtotal);
            prop_assert_eq!(bill.total, subtotal + bill.tax.unwrap_or(Decimal::ZERO));
        }

        #[test]
        fn test_generated_items_multiply_out(item in bill_item_strategy()) {
            prop_assert_eq!(item.total, item.quantity * item.price);
        }
    }

    #[test]
    fn test_bill_numbers_carry_the_prefix() {
        let number = next_bill_number();
        assert!(number.starts_with('B'));
        assert!(number.len() > 1);
    }

    #[test]
    fn test_builder_output_passes_the_domain_assertion() {
        let bill = crate::builders::TestBillBuilder::new().build();
        assert_bill_consistent(&bill.items, bill.subtotal, bill.tax, bill.total);
    }
}
