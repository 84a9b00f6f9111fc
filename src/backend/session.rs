//! Password sign-in and the session gate.

use log::{debug, info};
use serde::Deserialize;

use crate::error::Result;

use super::BackendClient;

#[derive(Debug, Deserialize)]
struct SessionResponse {
    access_token: String,
}

impl BackendClient {
    /// Signs in with email and password. On success the returned access
    /// token replaces the API key as the bearer for subsequent requests.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<()> {
        let url = format!("{}/auth/v1/token", self.base_url);
        debug!("Signing in as {email} at: {url}");

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .query(&[("grant_type", "password")])
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        let response = self.check(response).await?;

        let session: SessionResponse = response.json().await?;
        self.access_token = Some(session.access_token);
        info!("Signed in as {email}");
        Ok(())
    }

    /// Whether a user session is active. Without one, protected calls
    /// fall back to the API key and the backend's policies decide.
    pub fn has_session(&self) -> bool {
        self.access_token.is_some()
    }
}
