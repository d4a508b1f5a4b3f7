//! Storage Port
//!
//! This module defines the capability set the system expects from its
//! persistence collaborator: a hosted row store addressed by table name,
//! exchanging flat JSON rows.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Application Layer                        │
//! │           (BillLifecycle, DashboardService, ...)             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        StorePort                             │
//! │          insert / select_all / delete_where                  │
//! └─────────────────────────────────────────────────────────────┘
//!                    ▲                         ▲
//!                    │                         │
//!         ┌─────────┴─────────┐     ┌────────┴────────┐
//!         │   REST Adapter    │     │   MemoryStore    │
//!         │   (infra_store)   │     │   (tests/mock)   │
//!         └───────────────────┘     └──────────────────┘
//! ```
//!
//! The port guarantees per-call atomicity of a single insert or delete and
//! nothing more. There is no multi-statement transaction: callers that need a
//! multi-step write kept consistent must sequence the calls themselves and
//! compensate on partial failure.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Error type for storage operations
///
/// Every failed insert/select/delete surfaces as one of these. The message and
/// cause are passed through from the backend, not interpreted; retry policy
/// belongs to the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested entity was not found
    #[error("Not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// The backend rejected the row
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The operation conflicts with existing data (e.g. a unique index)
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Connection to the backend failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout { operation: String, duration_ms: u64 },

    /// Authentication or authorization failed
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The backend is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable { service: String },

    /// A row could not be shaped for the wire
    #[error("Transformation error: {message}")]
    Transformation { message: String },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StoreError {
    /// Creates a NotFound error
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        StoreError::Validation {
            message: message.into(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        StoreError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        StoreError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Connection error with a cause
    pub fn connection_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        StoreError::Connection {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl Into<String>) -> Self {
        StoreError::Transformation {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        StoreError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::Connection { .. }
                | StoreError::Timeout { .. }
                | StoreError::ServiceUnavailable { .. }
        )
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Equality filter on a single row field
///
/// The backend's row API only needs equality matches (`field=eq.value`), so
/// that is all the port models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    /// Field to match on
    pub field: String,
    /// Value the field must equal (stringified for the wire)
    pub value: String,
}

impl RowFilter {
    /// Creates an equality filter
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// The persistence capability set
///
/// Rows are flat JSON objects in the backend's snake_case shape. Adapters must
/// tolerate extra fields on the way in and preserve whatever the backend
/// returns on the way out; shaping rows into domain types is the record
/// transformers' job, not the port's.
#[async_trait]
pub trait StorePort: Send + Sync {
    /// Inserts one row into `table`, returning the created row
    async fn insert(&self, table: &str, row: Value) -> Result<Value, StoreError>;

    /// Returns every row of `table`, optionally narrowed by an equality filter
    async fn select_all(
        &self,
        table: &str,
        filter: Option<RowFilter>,
    ) -> Result<Vec<Value>, StoreError>;

    /// Deletes every row of `table` whose `field` equals `value`
    ///
    /// Matching zero rows is a success, which is what makes dependent-row
    /// cleanup and repeated deletes safe to attempt unconditionally.
    async fn delete_where(&self, table: &str, field: &str, value: &str)
        -> Result<(), StoreError>;
}

/// In-memory implementation of StorePort for testing
///
/// Stores rows per table behind an async lock and supports one-shot fault
/// injection so multi-step write failure paths (compensation, orphaned
/// headers) can be exercised deterministically.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use tokio::sync::RwLock;
    use uuid::Uuid;

    /// In-memory row store
    #[derive(Debug, Default)]
    pub struct MemoryStore {
        tables: RwLock<HashMap<String, Vec<Value>>>,
        failing_inserts: RwLock<HashSet<String>>,
        failing_deletes: RwLock<HashSet<String>>,
    }

    impl MemoryStore {
        /// Creates an empty store
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates a table with rows
        pub async fn seed(&self, table: impl Into<String>, rows: Vec<Value>) {
            self.tables.write().await.insert(table.into(), rows);
        }

        /// Returns a snapshot of a table's rows (empty if the table is unknown)
        pub async fn rows(&self, table: &str) -> Vec<Value> {
            self.tables
                .read()
                .await
                .get(table)
                .cloned()
                .unwrap_or_default()
        }

        /// Arms a one-shot failure for the next insert into `table`
        pub async fn fail_next_insert(&self, table: impl Into<String>) {
            self.failing_inserts.write().await.insert(table.into());
        }

        /// Arms a one-shot failure for the next delete against `table`
        pub async fn fail_next_delete(&self, table: impl Into<String>) {
            self.failing_deletes.write().await.insert(table.into());
        }

        fn field_matches(row: &Value, field: &str, value: &str) -> bool {
            match row.get(field) {
                Some(Value::String(s)) => s == value,
                Some(Value::Null) | None => false,
                Some(other) => other.to_string() == value,
            }
        }
    }

    #[async_trait]
    impl StorePort for MemoryStore {
        async fn insert(&self, table: &str, row: Value) -> Result<Value, StoreError> {
            if self.failing_inserts.write().await.remove(table) {
                return Err(StoreError::connection(format!(
                    "injected insert failure for table {table}"
                )));
            }

            let mut created = row;
            if let Some(obj) = created.as_object_mut() {
                // The backend assigns ids server-side when the caller omits them
                obj.entry("id")
                    .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
            } else {
                return Err(StoreError::validation(format!(
                    "row for table {table} is not a JSON object"
                )));
            }

            self.tables
                .write()
                .await
                .entry(table.to_string())
                .or_default()
                .push(created.clone());
            Ok(created)
        }

        async fn select_all(
            &self,
            table: &str,
            filter: Option<RowFilter>,
        ) -> Result<Vec<Value>, StoreError> {
            let tables = self.tables.read().await;
            let rows = tables.get(table).cloned().unwrap_or_default();
            Ok(match filter {
                Some(f) => rows
                    .into_iter()
                    .filter(|r| Self::field_matches(r, &f.field, &f.value))
                    .collect(),
                None => rows,
            })
        }

        async fn delete_where(
            &self,
            table: &str,
            field: &str,
            value: &str,
        ) -> Result<(), StoreError> {
            if self.failing_deletes.write().await.remove(table) {
                return Err(StoreError::connection(format!(
                    "injected delete failure for table {table}"
                )));
            }

            let mut tables = self.tables.write().await;
            if let Some(rows) = tables.get_mut(table) {
                rows.retain(|r| !Self::field_matches(r, field, value));
            }
            Ok(())
        }
    }
}
