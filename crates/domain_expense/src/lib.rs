//! Expense Domain
//!
//! Expenses are flat reference entities for the expense-tracking views.
//! No lifecycle logic: single-row inserts and deletes only.

pub mod expense;
pub mod transform;

pub use expense::Expense;
pub use transform::{expense_from_row, expense_to_row, load_expenses};
