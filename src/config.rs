//! Backend configuration from the environment.
//!
//! The original deployment configured its client through environment
//! variables (optionally via a `.env` file), so the CLI does the same.

use crate::error::{InventoryError, Result};

/// Connection settings for the remote backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend project, e.g. `https://xyz.supabase.co`
    pub base_url: String,
    /// API key sent with every request
    pub api_key: String,
    /// Name of the inventory table
    pub table: String,
    /// Object storage bucket holding item photos
    pub bucket: String,
}

const DEFAULT_TABLE: &str = "items";
const DEFAULT_BUCKET: &str = "images";

impl BackendConfig {
    /// Reads configuration from `SUPABASE_URL`, `SUPABASE_ANON_KEY` and the
    /// optional `INVENTORY_TABLE` / `INVENTORY_BUCKET` overrides.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("SUPABASE_URL")
            .map_err(|_| InventoryError::Config("SUPABASE_URL is not set".to_string()))?;
        let api_key = std::env::var("SUPABASE_ANON_KEY")
            .map_err(|_| InventoryError::Config("SUPABASE_ANON_KEY is not set".to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            table: std::env::var("INVENTORY_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.to_string()),
            bucket: std::env::var("INVENTORY_BUCKET")
                .unwrap_or_else(|_| DEFAULT_BUCKET.to_string()),
        })
    }

    /// Builds a config directly, for tests and embedding.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            table: DEFAULT_TABLE.to_string(),
            bucket: DEFAULT_BUCKET.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let config = BackendConfig::new("https://example.supabase.co/", "key");
        assert_eq!(config.base_url, "https://example.supabase.co");
        assert_eq!(config.table, "items");
        assert_eq!(config.bucket, "images");
    }

    #[test]
    fn from_env_reports_missing_url() {
        std::env::remove_var("SUPABASE_URL");
        let err = BackendConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("SUPABASE_URL"));
    }
}
