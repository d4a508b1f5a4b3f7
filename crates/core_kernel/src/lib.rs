//! Core Kernel - Foundational types and utilities for the merchant desk system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers for domain entities
//! - The storage port abstraction over the hosted row store, with its
//!   error taxonomy
//! - Total accessors for shaping storage rows

pub mod identifiers;
pub mod ports;
pub mod rows;

pub use identifiers::{BillId, CustomerId, ExpenseId, ProductId};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock;
pub use ports::{RowFilter, StoreError, StorePort};
