use serde::Serialize;
use std::fmt;

use crate::{error::ListingError, listing::BackupDescriptor};

const MISSING_BUCKET: &str = "N/A";

/// Everything the backup page needs to render, whether the listing worked or not.
#[derive(Serialize, Debug, PartialEq)]
pub struct BackupPage {
    pub backups: Vec<BackupDescriptor>,
    pub s3_error: Option<String>,
    pub s3_bucket_name: String,
}

impl BackupPage {
    pub fn from_result(
        bucket_name: Option<&str>,
        result: Result<Vec<BackupDescriptor>, ListingError>,
    ) -> Self {
        let (backups, s3_error) = match result {
            Ok(backups) => (backups, None),
            Err(e) => (Vec::new(), Some(user_message(&e))),
        };

        BackupPage {
            backups,
            s3_error,
            s3_bucket_name: bucket_name
                .filter(|b| !b.is_empty())
                .unwrap_or(MISSING_BUCKET)
                .to_owned(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn user_message(e: &ListingError) -> String {
    match e {
        ListingError::Configuration(msg) => {
            format!("Configuration error: {}. Check your settings.", msg)
        }
        ListingError::Access { kind, .. } => format!(
            "Error accessing S3 ({}). Check the credentials, permissions, configuration and server logs.",
            kind
        ),
    }
}

impl fmt::Display for BackupPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Backups in bucket {}", self.s3_bucket_name)?;

        if let Some(error) = &self.s3_error {
            return writeln!(f, "{}", error);
        }

        if self.backups.is_empty() {
            return writeln!(f, "No backup files found.");
        }

        let width = self
            .backups
            .iter()
            .map(|b| b.filename.len())
            .max()
            .unwrap_or(0);

        for backup in &self.backups {
            let last_modified = backup
                .last_modified
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "{:<width$}  {}  {:>12}",
                backup.filename,
                last_modified,
                human_size(backup.size),
                width = width
            )?;
        }

        Ok(())
    }
}

fn human_size(size: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", size, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
