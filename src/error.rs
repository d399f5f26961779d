//! Error taxonomy for catalog and storage operations
//!
//! Neither kind is fatal. Catalog errors collapse into one generic alert,
//! storage errors are logged and swallowed by the favorites store.

use thiserror::Error;

use crate::constants::text;

/// Any failure while fetching or decoding a catalog page
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport failure, including timeouts
    #[error("catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("catalog responded with status {0}")]
    Status(u16),

    #[error("catalog response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogError {
    /// Text shown to the user, regardless of cause
    pub fn user_message(&self) -> &'static str {
        text::LOAD_FAILED
    }
}

/// Failure reading or writing the on-device key-value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize value for '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored value for '{key}' is corrupt: {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
