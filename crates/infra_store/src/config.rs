//! Store adapter configuration

use serde::Deserialize;

/// Configuration for the hosted row-store adapter
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the row API (e.g. "https://abc.example.co/rest/v1")
    pub base_url: String,
    /// API key sent as both `apikey` and bearer token
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Database schema the row API exposes, sent as the profile header
    pub schema: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321/rest/v1".to_string(),
            api_key: String::new(),
            timeout_secs: 30,
            schema: "public".to_string(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration from `STORE_`-prefixed environment variables
    ///
    /// A `.env` file in the working directory is read first if present, so
    /// local development does not need exported variables.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        config::Config::builder()
            .add_source(config::Environment::with_prefix("STORE"))
            .set_default("timeout_secs", 30)?
            .set_default("schema", "public")?
            .build()?
            .try_deserialize()
    }

    /// Returns the full URL for a table resource
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_joins_cleanly() {
        let config = StoreConfig {
            base_url: "https://api.example.com/rest/v1/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.table_url("bills"),
            "https://api.example.com/rest/v1/bills"
        );
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.schema, "public");
        assert!(config.api_key.is_empty());
    }
}
