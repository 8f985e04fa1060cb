use thiserror::Error;

/// Outcome of a failed backup listing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// Caller-fixable settings problem, found before talking to the provider
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Anything that went wrong while building or calling the provider
    #[error("could not access storage ({kind}): {message}")]
    Access { kind: String, message: String },
}

/// Failure reported by a [`crate::storage::Storage`] backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct StorageError {
    pub kind: String,
    pub message: String,
}

impl StorageError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        StorageError {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl From<StorageError> for ListingError {
    fn from(e: StorageError) -> Self {
        ListingError::Access {
            kind: e.kind,
            message: e.message,
        }
    }
}
