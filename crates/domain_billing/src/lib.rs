//! Billing Domain - Bill Lifecycle
//!
//! This crate owns the only multi-step write operation in the system:
//! creating a bill header plus its line items as one logical unit, and
//! deleting a bill together with its line items in dependency order.
//!
//! # Two-step writes without a transaction
//!
//! The backing row store guarantees per-call atomicity only, so a bill and
//! its items are written as separate calls. The lifecycle sequences them
//! explicitly and compensates on partial failure:
//!
//! - header insert fails -> clean abort, nothing written;
//! - item insert fails -> the partial bill is deleted again (compensation);
//! - the compensating deletes themselves fail -> a partial bill is left
//!   behind and reported distinctly so an operator can remediate.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{BillLifecycle, NewBill};
//!
//! let lifecycle = BillLifecycle::new(store);
//! let bill = lifecycle.create(new_bill).await?;
//! lifecycle.delete(&bill.id).await?;
//! ```

pub mod bill;
pub mod error;
pub mod lifecycle;
pub mod transform;

pub use bill::{next_bill_number, Bill, BillItem, NewBill, TransactionType};
pub use error::BillingError;
pub use lifecycle::BillLifecycle;
