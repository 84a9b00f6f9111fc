//! Remote backend client.
//!
//! Speaks the backend's REST surface directly: row CRUD on the inventory
//! table, object storage for photos, and password sign-in for the session
//! gate. The client is constructed from [`BackendConfig`] and injected
//! wherever remote access is needed, so tests can point it at a mock
//! server.

mod items;
mod session;
mod storage;

pub use storage::guess_content_type;

use reqwest::Client;

use crate::config::BackendConfig;
use crate::error::{InventoryError, Result};

/// REST client for the inventory backend.
pub struct BackendClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) api_key: String,
    pub(crate) table: String,
    pub(crate) bucket: String,
    pub(crate) access_token: Option<String>,
}

impl BackendClient {
    /// Creates a client from config. Requests authenticate with the API
    /// key until [`BackendClient::sign_in`] stores a user token.
    pub fn new(config: &BackendConfig) -> Self {
        log::debug!("Creating backend client for {}", config.base_url);
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            table: config.table.clone(),
            bucket: config.bucket.clone(),
            access_token: None,
        }
    }

    /// URL of the inventory table endpoint.
    pub(crate) fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    /// Bearer value for the Authorization header: the user token when
    /// signed in, the API key otherwise.
    pub(crate) fn bearer(&self) -> String {
        format!(
            "Bearer {}",
            self.access_token.as_deref().unwrap_or(&self.api_key)
        )
    }

    /// Maps a non-success response to an error carrying the backend's
    /// response body verbatim.
    pub(crate) async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            log::error!("Backend request failed with {}: {}", status, message);
            Err(InventoryError::Backend { status, message })
        }
    }
}

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
