//! Store error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid {collection} record: {reason}")]
    InvalidRecord { collection: String, reason: String },

    #[error("`{0}` is not a collection")]
    NotACollection(String),

    #[error("Store lock poisoned")]
    Poisoned,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    pub(crate) fn invalid(collection: &str, reason: impl Into<String>) -> Self {
        StoreError::InvalidRecord {
            collection: collection.to_string(),
            reason: reason.into(),
        }
    }
}
