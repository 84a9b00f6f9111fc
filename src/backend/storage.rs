//! Object storage: photo upload, download and public URL derivation.

use chrono::Utc;
use log::{debug, info};

use crate::error::{InventoryError, Result};

use super::BackendClient;

impl BackendClient {
    /// Uploads photo bytes under a timestamp-prefixed key and returns the
    /// stored key.
    pub async fn upload_photo(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        let key = format!("{}_{}", Utc::now().timestamp_millis(), file_name);
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            urlencoding::encode(&key)
        );
        debug!("Uploading photo ({} bytes) to: {url}", bytes.len());

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", self.bearer())
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await?;
        self.check(response).await?;

        info!("Uploaded photo as: {key}");
        Ok(key)
    }

    /// Downloads a stored photo via its public URL.
    pub async fn download_photo(&self, key: &str) -> Result<Vec<u8>> {
        let url = self.public_url(key);
        debug!("Fetching photo from: {url}");

        let response = self.client.get(&url).send().await?;
        if response.status().is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            Err(InventoryError::PhotoFetchFailed(url))
        }
    }

    /// Public URL for a stored object key.
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            urlencoding::encode(key)
        )
    }
}

/// Content type for a photo file, from its extension.
pub fn guess_content_type(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
