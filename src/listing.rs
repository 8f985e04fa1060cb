use chrono::{DateTime, Utc};
use serde::Serialize;
use std::rc::Rc;
use tracing::{debug, error, info, warn};

use crate::{
    config::Config,
    error::{ListingError, StorageError},
    storage::{s3::S3Storage, Storage},
};

pub const BACKUP_PREFIX: &str = "AB_CADASTROPOSITIVO_";
pub const BACKUP_SUFFIX: &str = ".bak";

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct BackupDescriptor {
    pub filename: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub size: u64,
}

/// Lists the backups in the configured S3 bucket.
pub async fn list_backups(config: &Config) -> Result<Vec<BackupDescriptor>, ListingError> {
    list_backups_with(config, |config| {
        S3Storage::from_config(config).map(|s| Rc::new(s) as Rc<dyn Storage>)
    })
    .await
}

/// Same as [`list_backups`], with the storage built by `connect`.
///
/// `connect` is only called once the configuration is valid, and the storage
/// it returns receives exactly one list call.
pub async fn list_backups_with<F>(
    config: &Config,
    connect: F,
) -> Result<Vec<BackupDescriptor>, ListingError>
where
    F: FnOnce(&Config) -> Result<Rc<dyn Storage>, StorageError>,
{
    if let Err(e) = config.validate() {
        error!(error = %e, "invalid configuration");
        return Err(e);
    }

    info!(
        bucket = config.bucket().unwrap_or_default(),
        region = config.aws_region_name.as_deref().unwrap_or("default"),
        prefix = BACKUP_PREFIX,
        "listing backups"
    );

    let listing = match connect(config) {
        Ok(storage) => storage.list(BACKUP_PREFIX).await,
        Err(e) => Err(e),
    };

    let listing = match listing {
        Ok(listing) => listing,
        Err(e) => {
            error!(kind = %e.kind, error = %e.message, "could not list backups");
            return Err(e.into());
        }
    };

    if listing.objects.is_empty() {
        info!("no objects found with the backup prefix");
        return Ok(Vec::new());
    }

    if listing.truncated {
        warn!("listing was truncated, only the first page is shown");
    }

    let backups: Vec<BackupDescriptor> = listing
        .objects
        .into_iter()
        .filter(|obj| is_backup(&obj.key))
        .map(|obj| BackupDescriptor {
            filename: obj.key,
            last_modified: obj.last_modified,
            size: obj.size,
        })
        .collect();

    info!(count = backups.len(), "found matching backup files");
    debug!(?backups);

    Ok(backups)
}

fn is_backup(key: &str) -> bool {
    key.starts_with(BACKUP_PREFIX) && key.ends_with(BACKUP_SUFFIX)
}
