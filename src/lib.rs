//! Workshop Inventory - remote inventory mirror
//!
//! Keeps an in-memory list of workshop items in sync with a remote
//! inventory table (Supabase-style REST backend) and handles CSV
//! import/export plus photo attachments in object storage.

pub mod archive;
pub mod backend;
pub mod config;
pub mod csv_io;
pub mod error;
pub mod inventory;
pub mod models;
pub mod web;

pub use backend::BackendClient;
pub use config::BackendConfig;
pub use error::{InventoryError, Result};
pub use inventory::{Inventory, ItemFilter, PhotoUpload};
pub use models::Item;
