//! Row CRUD on the inventory table.

use log::{debug, info};
use serde_json::{Map, Value};

use crate::error::{InventoryError, Result};
use crate::models::Item;

use super::BackendClient;

impl BackendClient {
    /// Fetches all rows, ordered by name.
    pub async fn fetch_items(&self) -> Result<Vec<Item>> {
        let url = self.table_url();
        debug!("Fetching items from: {url}");

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", self.bearer())
            .query(&[("select", "*"), ("order", "name.asc")])
            .send()
            .await?;
        let response = self.check(response).await?;

        let items: Vec<Item> = response.json().await?;
        info!("Fetched {} items", items.len());
        Ok(items)
    }

    /// Inserts one row and returns it as created by the backend, with the
    /// server-assigned id and timestamp.
    pub async fn insert_item(&self, item: &Item) -> Result<Item> {
        let url = self.table_url();
        debug!("Inserting item '{}' at: {url}", item.name);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", self.bearer())
            .header("Prefer", "return=representation")
            .json(&[item.payload()])
            .send()
            .await?;
        let response = self.check(response).await?;

        let mut created: Vec<Item> = response.json().await?;
        let created = created.pop().ok_or_else(|| {
            InventoryError::UnexpectedResponse("insert returned no rows".to_string())
        })?;
        info!("Inserted item '{}' (id: {:?})", created.name, created.id);
        Ok(created)
    }

    /// Inserts all rows in a single bulk call.
    pub async fn insert_items(&self, items: &[Item]) -> Result<usize> {
        if items.is_empty() {
            return Ok(0);
        }
        let url = self.table_url();
        debug!("Bulk inserting {} items at: {url}", items.len());

        let payloads: Vec<Map<String, Value>> = items.iter().map(Item::payload).collect();
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", self.bearer())
            .header("Prefer", "return=minimal")
            .json(&payloads)
            .send()
            .await?;
        self.check(response).await?;

        info!("Bulk inserted {} items", items.len());
        Ok(items.len())
    }

    /// Patches the row with the given id. `patch` carries only the fields
    /// to change.
    pub async fn update_item(&self, id: i64, patch: &Map<String, Value>) -> Result<()> {
        let url = self.table_url();
        debug!("Updating item {id} with {} field(s)", patch.len());

        let response = self
            .client
            .patch(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", self.bearer())
            .query(&[("id", format!("eq.{id}"))])
            .json(patch)
            .send()
            .await?;
        self.check(response).await?;

        info!("Updated item {id}");
        Ok(())
    }

    /// Deletes the row with the given id.
    pub async fn delete_item(&self, id: i64) -> Result<()> {
        let url = self.table_url();
        debug!("Deleting item {id} at: {url}");

        let response = self
            .client
            .delete(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", self.bearer())
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        self.check(response).await?;

        info!("Deleted item {id}");
        Ok(())
    }
}
