//! Error types for workshop_inventory

use std::fmt;

/// Unified error type for inventory operations
#[derive(Debug)]
pub enum InventoryError {
    /// HTTP request failed (network error, timeout, etc.)
    Network(reqwest::Error),
    /// Failed to parse JSON response
    Parse(serde_json::Error),
    /// Backend rejected the request; carries the response body verbatim
    Backend {
        status: reqwest::StatusCode,
        message: String,
    },
    /// Backend answered 2xx but the payload was not what the call expects
    UnexpectedResponse(String),
    /// CSV read or write failed
    Csv(csv::Error),
    /// File I/O error
    Io(std::io::Error),
    /// Zip archive operation failed
    Archive(zip::result::ZipError),
    /// Missing or invalid configuration
    Config(String),
    /// No locally known item with this identifier
    UnknownItem(i64),
    /// A required field was empty on an item draft
    Validation(String),
    /// Failed to fetch a photo from object storage
    PhotoFetchFailed(String),
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryError::Network(e) => write!(f, "Network error: {}", e),
            InventoryError::Parse(e) => write!(f, "Parse error: {}", e),
            InventoryError::Backend { status, message } => {
                write!(f, "Backend error ({}): {}", status, message)
            }
            InventoryError::UnexpectedResponse(msg) => {
                write!(f, "Unexpected backend response: {}", msg)
            }
            InventoryError::Csv(e) => write!(f, "CSV error: {}", e),
            InventoryError::Io(e) => write!(f, "I/O error: {}", e),
            InventoryError::Archive(e) => write!(f, "Archive error: {}", e),
            InventoryError::Config(msg) => write!(f, "Configuration error: {}", msg),
            InventoryError::UnknownItem(id) => write!(f, "No item with id {}", id),
            InventoryError::Validation(msg) => write!(f, "Validation error: {}", msg),
            InventoryError::PhotoFetchFailed(url) => {
                write!(f, "Failed to fetch photo from: {}", url)
            }
        }
    }
}

impl std::error::Error for InventoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InventoryError::Network(e) => Some(e),
            InventoryError::Parse(e) => Some(e),
            InventoryError::Csv(e) => Some(e),
            InventoryError::Io(e) => Some(e),
            InventoryError::Archive(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for InventoryError {
    fn from(err: reqwest::Error) -> Self {
        InventoryError::Network(err)
    }
}

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        InventoryError::Parse(err)
    }
}

impl From<csv::Error> for InventoryError {
    fn from(err: csv::Error) -> Self {
        InventoryError::Csv(err)
    }
}

impl From<std::io::Error> for InventoryError {
    fn from(err: std::io::Error) -> Self {
        InventoryError::Io(err)
    }
}

impl From<zip::result::ZipError> for InventoryError {
    fn from(err: zip::result::ZipError) -> Self {
        InventoryError::Archive(err)
    }
}

/// Result alias for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;
