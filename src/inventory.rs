//! The inventory synchronizer.
//!
//! Holds the in-memory list of items mirroring the remote table. Every
//! mutation performs one remote call and then reloads the list wholesale,
//! so server-assigned defaults and triggers are always reflected locally.

use std::io::{Seek, Write};

use log::{info, warn};

use crate::archive;
use crate::backend::BackendClient;
use crate::csv_io;
use crate::error::{InventoryError, Result};
use crate::models::Item;

/// Photo file attached to an add operation.
pub struct PhotoUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Client-side list filter: free-text search over name/brand/model/notes
/// plus exact category, location and condition matches.
#[derive(Debug, Default, Clone)]
pub struct ItemFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub condition: Option<String>,
}

impl ItemFilter {
    fn matches(&self, item: &Item) -> bool {
        if let Some(ref query) = self.search {
            let haystack = format!(
                "{} {} {} {}",
                item.name, item.brand, item.model, item.notes
            )
            .to_lowercase();
            if !haystack.contains(&query.to_lowercase()) {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if &item.category != category {
                return false;
            }
        }
        if let Some(ref location) = self.location {
            if &item.location != location {
                return false;
            }
        }
        if let Some(ref condition) = self.condition {
            if &item.condition != condition {
                return false;
            }
        }
        true
    }
}

/// In-memory mirror of the remote inventory table.
pub struct Inventory {
    client: BackendClient,
    items: Vec<Item>,
}

impl Inventory {
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            items: Vec::new(),
        }
    }

    /// The current local list, in backend name order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut BackendClient {
        &mut self.client
    }

    /// Public URL of an item's primary photo, if it has one.
    pub fn photo_url(&self, item: &Item) -> Option<String> {
        item.primary_photo_key().map(|key| self.client.public_url(key))
    }

    /// Fetches all rows ordered by name and replaces the local list
    /// wholesale. On error the prior list is left unchanged.
    pub async fn load(&mut self) -> Result<()> {
        let items = self.client.fetch_items().await?;
        self.items = items;
        Ok(())
    }

    /// Adds one item. An attached photo is uploaded first and its stored
    /// key becomes the photo reference; if the upload fails the add still
    /// proceeds without a photo. Returns the row as created by the
    /// backend.
    pub async fn add(&mut self, mut draft: Item, photo: Option<PhotoUpload>) -> Result<Item> {
        if draft.name.trim().is_empty() {
            return Err(InventoryError::Validation("item name is empty".to_string()));
        }
        if draft.category.trim().is_empty() {
            warn!("Adding item '{}' without a category", draft.name);
        }

        if let Some(photo) = photo {
            match self
                .client
                .upload_photo(&photo.file_name, photo.bytes, &photo.content_type)
                .await
            {
                Ok(key) => draft.photo_ref = key,
                Err(e) => {
                    warn!(
                        "Photo upload failed, adding '{}' without a photo: {}",
                        draft.name, e
                    );
                    draft.photo_ref = String::new();
                }
            }
        }

        let created = self.client.insert_item(&draft).await?;
        self.load().await?;
        Ok(created)
    }

    /// Updates the item with the given id. Only fields that differ from
    /// the locally held copy are sent, so fields absent from a caller's
    /// form are never blanked.
    pub async fn update(&mut self, id: i64, fields: Item) -> Result<()> {
        let current = self
            .items
            .iter()
            .find(|item| item.id == Some(id))
            .ok_or(InventoryError::UnknownItem(id))?;

        let patch = current.diff(&fields);
        if patch.is_empty() {
            info!("Item {id} unchanged, skipping update");
            return Ok(());
        }

        self.client.update_item(id, &patch).await?;
        self.load().await
    }

    /// Deletes the item with the given id and reloads. Confirmation is
    /// the caller's responsibility.
    pub async fn delete(&mut self, id: i64) -> Result<()> {
        self.client.delete_item(id).await?;
        self.load().await
    }

    /// Imports a CSV snapshot: parse, one bulk insert, reload. A remote
    /// error aborts the import; nothing is rolled back.
    pub async fn import_csv(&mut self, text: &str) -> Result<usize> {
        let rows = csv_io::parse_items(text)?;
        if rows.is_empty() {
            info!("CSV contained no data rows, nothing to import");
            return Ok(0);
        }

        let inserted = self.client.insert_items(&rows).await?;
        self.load().await?;
        Ok(inserted)
    }

    /// Exports the current list as CSV with photo references resolved to
    /// public URLs.
    pub fn export_csv(&self) -> Result<String> {
        csv_io::write_items(&self.items, |key| self.client.public_url(key))
    }

    /// Bundles every referenced photo into a zip archive. Items whose
    /// photo cannot be fetched are skipped and logged. Returns the number
    /// of images written.
    pub async fn export_archive<W: Write + Seek>(&self, writer: W) -> Result<usize> {
        archive::bundle_photos(&self.client, &self.items, writer).await
    }

    /// Applies the filter to the local list.
    pub fn search(&self, filter: &ItemFilter) -> Vec<&Item> {
        self.items.iter().filter(|item| filter.matches(item)).collect()
    }
}

#[cfg(test)]
#[path = "inventory_tests.rs"]
mod tests;
