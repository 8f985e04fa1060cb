use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StorageError;

pub mod s3;

/// One object as reported by the provider.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectSummary {
    pub key: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub size: u64,
}

/// A single page of results.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectListing {
    pub objects: Vec<ObjectSummary>,
    /// The provider has more results than this page holds
    pub truncated: bool,
}

#[async_trait(?Send)]
pub trait Storage {
    /// Lists the first page of objects whose key starts with `prefix`.
    async fn list(&self, prefix: &str) -> Result<ObjectListing, StorageError>;
}
