//! REST adapter for the hosted row store
//!
//! Speaks the backend's PostgREST-style conventions:
//!
//! - `POST /{table}` with `Prefer: return=representation` to insert;
//! - `GET /{table}?select=*` (plus `field=eq.value`) to read;
//! - `DELETE /{table}?field=eq.value` to delete.
//!
//! HTTP failures map onto [`StoreError`] without interpretation beyond the
//! status class: 401/403 -> Unauthorized, 404 -> NotFound, 409 -> Conflict,
//! 5xx -> ServiceUnavailable, client timeout -> Timeout, anything else ->
//! Internal. The response body rides along in the message for operators.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::debug;

use core_kernel::{RowFilter, StoreError, StorePort};

use crate::config::StoreConfig;

/// StorePort implementation over the hosted row API
#[derive(Debug, Clone)]
pub struct RestStore {
    config: StoreConfig,
    client: Client,
}

impl RestStore {
    /// Creates an adapter from configuration
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Internal` if the HTTP client cannot be built.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Internal {
                message: "failed to build HTTP client".to_string(),
                source: Some(Box::new(e)),
            })?;
        Ok(Self { config, client })
    }

    /// Returns the configured base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Attaches auth headers plus the schema profile header
    ///
    /// The API selects the schema per request: `Accept-Profile` on reads,
    /// `Content-Profile` on writes.
    fn authed(&self, builder: RequestBuilder, profile_header: &str) -> RequestBuilder {
        builder
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header(profile_header, &self.config.schema)
    }

    async fn check(&self, response: Response, operation: &str) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Self::map_status(status, &body, operation))
    }

    fn map_status(status: StatusCode, body: &str, operation: &str) -> StoreError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Unauthorized {
                message: format!("{operation}: HTTP {status}: {body}"),
            },
            StatusCode::NOT_FOUND => StoreError::not_found(operation, status),
            StatusCode::CONFLICT => StoreError::conflict(format!("{operation}: {body}")),
            s if s.is_server_error() => StoreError::ServiceUnavailable {
                service: format!("{operation}: HTTP {status}: {body}"),
            },
            _ => StoreError::internal(format!("{operation}: HTTP {status}: {body}")),
        }
    }

    fn map_send_error(error: reqwest::Error, operation: &str, timeout_secs: u64) -> StoreError {
        if error.is_timeout() {
            StoreError::Timeout {
                operation: operation.to_string(),
                duration_ms: timeout_secs * 1000,
            }
        } else {
            StoreError::connection_with_source(format!("{operation} failed"), error)
        }
    }
}

#[async_trait]
impl StorePort for RestStore {
    async fn insert(&self, table: &str, row: Value) -> Result<Value, StoreError> {
        let operation = format!("insert {table}");
        debug!(table, "inserting row");

        let response = self
            .authed(self.client.post(self.config.table_url(table)), "Content-Profile")
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(|e| Self::map_send_error(e, &operation, self.config.timeout_secs))?;
        let response = self.check(response, &operation).await?;

        // The API returns the created rows as a one-element array
        let body: Value = response
            .json()
            .await
            .map_err(|e| StoreError::transformation(format!("{operation}: {e}")))?;
        match body {
            Value::Array(mut rows) if !rows.is_empty() => Ok(rows.remove(0)),
            Value::Object(_) => Ok(body),
            other => Err(StoreError::transformation(format!(
                "{operation}: unexpected response shape: {other}"
            ))),
        }
    }

    async fn select_all(
        &self,
        table: &str,
        filter: Option<RowFilter>,
    ) -> Result<Vec<Value>, StoreError> {
        let operation = format!("select {table}");
        debug!(table, ?filter, "selecting rows");

        let mut request = self
            .authed(self.client.get(self.config.table_url(table)), "Accept-Profile")
            .query(&[("select", "*")]);
        if let Some(f) = &filter {
            request = request.query(&[(f.field.as_str(), format!("eq.{}", f.value))]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Self::map_send_error(e, &operation, self.config.timeout_secs))?;
        let response = self.check(response, &operation).await?;

        response
            .json()
            .await
            .map_err(|e| StoreError::transformation(format!("{operation}: {e}")))
    }

    async fn delete_where(
        &self,
        table: &str,
        field: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        let operation = format!("delete {table}");
        debug!(table, field, value, "deleting rows");

        let response = self
            .authed(self.client.delete(self.config.table_url(table)), "Content-Profile")
            .query(&[(field, format!("eq.{value}"))])
            .send()
            .await
            .map_err(|e| Self::map_send_error(e, &operation, self.config.timeout_secs))?;
        // Zero matched rows still returns 2xx, which is the contract we want
        self.check(response, &operation).await?;
        Ok(())
    }
}
