//! Party Domain - Customers
//!
//! Customers are reference entities: bills hold them by plain id (a weak
//! reference) and take a name snapshot at composition time. Nothing in this
//! crate blocks or cascades customer deletion into bill data; that constraint
//! lives in the external storage schema.

pub mod customer;
pub mod transform;

pub use customer::Customer;
pub use transform::{customer_from_row, customer_to_row, load_customers};
