//! Dashboard Application Service
//!
//! The surface the presentation layer talks to. Owns an in-process cache of
//! every collection the dashboard renders (bills, customers, products,
//! expenses) and the two mutations the dashboard performs (create bill,
//! delete bill).
//!
//! The cache is refreshed wholesale from storage and mutated locally only
//! after a mutation succeeds, so a failed write never leaves the cache
//! disagreeing with the store.

pub mod service;

pub use service::DashboardService;
