//! Catalog Domain - Products
//!
//! Products are reference entities looked up by id when composing a bill.
//! A bill's line item keeps a name snapshot, so products can be deleted or
//! renamed without touching existing bills.

pub mod product;
pub mod transform;

pub use product::Product;
pub use transform::{load_products, product_from_row, product_to_row};
