//! Inventory record types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One inventory record (tool or part) with descriptive fields and an
/// optional photo stored in object storage.
///
/// `id` and `created_at` are assigned by the backend and are never part of
/// insert or update payloads; see [`Item::payload`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub notes: String,
    /// Object storage key, or a comma-joined list of keys
    #[serde(default)]
    pub photo_ref: String,
}

impl Default for Item {
    fn default() -> Self {
        Self {
            id: None,
            created_at: None,
            name: String::new(),
            category: String::new(),
            subcategory: String::new(),
            brand: String::new(),
            model: String::new(),
            quantity: 1,
            unit: String::new(),
            location: String::new(),
            condition: String::new(),
            notes: String::new(),
            photo_ref: String::new(),
        }
    }
}

impl Item {
    /// Serializes the record for insert/update, with the server-assigned
    /// `id` and `created_at` stripped.
    pub fn payload(&self) -> Map<String, Value> {
        let mut map = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        map.remove("id");
        map.remove("created_at");
        map
    }

    /// Returns only the fields of `updated` that differ from `self`, for
    /// partial-patch updates. Server-assigned fields never appear.
    pub fn diff(&self, updated: &Item) -> Map<String, Value> {
        let current = self.payload();
        updated
            .payload()
            .into_iter()
            .filter(|(key, value)| current.get(key) != Some(value))
            .collect()
    }

    /// The primary photo key. A photo reference may hold a comma-joined
    /// list of keys; the first non-empty one wins.
    pub fn primary_photo_key(&self) -> Option<&str> {
        self.photo_ref
            .split(',')
            .map(str::trim)
            .find(|key| !key.is_empty())
    }
}
