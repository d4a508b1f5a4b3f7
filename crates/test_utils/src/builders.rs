//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults. Tests
//! specify only the fields they care about; totals are derived from the items
//! unless set explicitly.

use chrono::NaiveDate;
use fake::faker::company::en::CompanyName;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_billing::{BillItem, NewBill, TransactionType};

use crate::fixtures::TemporalFixtures;

/// Builder for constructing a test line item
pub struct TestBillItemBuilder {
    product_id: String,
    product_name: String,
    quantity: Decimal,
    price: Decimal,
}

impl Default for TestBillItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBillItemBuilder {
    /// Creates a builder with the canonical five-widgets-at-100 item
    pub fn new() -> Self {
        Self {
            product_id: "p-1".to_string(),
            product_name: "Widget".to_string(),
            quantity: dec!(5),
            price: dec!(100),
        }
    }

    /// Sets the product id
    pub fn with_product_id(mut self, id: impl Into<String>) -> Self {
        self.product_id = id.into();
        self
    }

    /// Sets the product name
    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = name.into();
        self
    }

    /// Sets the quantity
    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the unit price
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    /// Builds the item; the line total is quantity times price
    pub fn build(self) -> BillItem {
        BillItem {
            total: self.quantity * self.price,
            product_id: self.product_id,
            product_name: self.product_name,
            quantity: self.quantity,
            price: self.price,
        }
    }
}

/// Builder for constructing a test NewBill
pub struct TestBillBuilder {
    customer_id: String,
    customer_name: String,
    date: NaiveDate,
    items: Vec<BillItem>,
    tax: Option<Decimal>,
    transaction_type: TransactionType,
    remarks: Option<String>,
}

impl Default for TestBillBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBillBuilder {
    /// Creates a builder with one canonical item and no tax
    pub fn new() -> Self {
        Self {
            customer_id: "c-1".to_string(),
            customer_name: "Acme Traders".to_string(),
            date: TemporalFixtures::bill_date(),
            items: vec![TestBillItemBuilder::new().build()],
            tax: None,
            transaction_type: TransactionType::Debit,
            remarks: None,
        }
    }

    /// Creates a builder with a randomized customer name
    pub fn random_customer() -> Self {
        Self::new().with_customer("c-1", CompanyName().fake::<String>())
    }

    /// Sets the customer id and name together
    pub fn with_customer(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.customer_id = id.into();
        self.customer_name = name.into();
        self
    }

    /// Clears the customer (walk-in sale, stored as a null foreign key)
    pub fn without_customer(mut self) -> Self {
        self.customer_id = String::new();
        self.customer_name = String::new();
        self
    }

    /// Sets the bill date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Replaces the item list
    pub fn with_items(mut self, items: Vec<BillItem>) -> Self {
        self.items = items;
        self
    }

    /// Removes all items
    pub fn without_items(mut self) -> Self {
        self.items.clear();
        self
    }

    /// Sets the tax amount
    pub fn with_tax(mut self, tax: Decimal) -> Self {
        self.tax = Some(tax);
        self
    }

    /// Sets the transaction type
    pub fn with_transaction_type(mut self, t: TransactionType) -> Self {
        self.transaction_type = t;
        self
    }

    /// Sets the remarks
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    /// Builds the NewBill; subtotal is the sum of item totals and the grand
    /// total adds the tax if one was set
    pub fn build(self) -> NewBill {
        let subtotal: Decimal = self.items.iter().map(|i| i.total).sum();
        let total = subtotal + self.tax.unwrap_or(Decimal::ZERO);
        NewBill {
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            date: self.date,
            items: self.items,
            subtotal,
            tax: self.tax,
            total,
            transaction_type: self.transaction_type,
            remarks: self.remarks,
        }
    }
}
