//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! dashboard test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built storage rows and domain values for common entities
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;

use once_cell::sync::OnceCell;

static TRACING: OnceCell<()> = OnceCell::new();

/// Installs a test tracing subscriber once per process
///
/// Honors `RUST_LOG`; output goes through the test writer so it interleaves
/// with captured test output instead of stderr.
pub fn init_tracing() {
    TRACING.get_or_init(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}
