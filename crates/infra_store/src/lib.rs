//! Storage Infrastructure
//!
//! The internet-facing adapter for the [`core_kernel::StorePort`]: a client
//! for the hosted backend's REST row API (PostgREST conventions). Everything
//! above this crate works against the port trait and can run on the
//! in-memory mock instead.

pub mod config;
pub mod rest;

pub use config::StoreConfig;
pub use rest::RestStore;
