use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusoto_core::credential::{DefaultCredentialsProvider, StaticProvider};
use rusoto_core::{HttpClient, Region, RusotoError};
use rusoto_s3::{ListObjectsV2Error, ListObjectsV2Request, Object, S3Client, S3};
use std::str::FromStr;
use tracing::debug;

use super::{ObjectListing, ObjectSummary, Storage};
use crate::config::{non_empty, Config};
use crate::error::StorageError;

const DEFAULT_REGION_NAME: &str = "us-east-1";

pub struct S3Storage {
    bucket_name: String,
    s3_client: S3Client,
}

impl S3Storage {
    pub fn new(s3_client: S3Client, bucket_name: &str) -> Self {
        S3Storage {
            bucket_name: bucket_name.to_owned(),
            s3_client,
        }
    }

    /// Builds a client from `config`. The bucket is assumed to be validated.
    pub fn from_config(config: &Config) -> Result<Self, StorageError> {
        let bucket_name = config.bucket().unwrap_or_default();
        let region = region_from_config(config);
        let dispatcher = HttpClient::new()
            .map_err(|e| StorageError::new("HttpClient", e.to_string()))?;

        let access_key = non_empty(&config.aws_access_key_id);
        let secret_key = non_empty(&config.aws_secret_access_key);

        let s3_client = match (access_key, secret_key) {
            (Some(access_key), Some(secret_key)) => {
                let provider = StaticProvider::new(
                    access_key.to_owned(),
                    secret_key.to_owned(),
                    non_empty(&config.aws_session_token).map(str::to_owned),
                    None,
                );
                S3Client::new_with(dispatcher, provider, region)
            }
            (None, None) => {
                let provider = DefaultCredentialsProvider::new()
                    .map_err(|e| StorageError::new("Credentials", e.to_string()))?;
                S3Client::new_with(dispatcher, provider, region)
            }
            _ => {
                return Err(StorageError::new(
                    "PartialCredentials",
                    "both the access key and the secret key must be set",
                ))
            }
        };

        Ok(S3Storage::new(s3_client, bucket_name))
    }
}

#[async_trait(?Send)]
impl Storage for S3Storage {
    async fn list(&self, prefix: &str) -> Result<ObjectListing, StorageError> {
        let list_req = ListObjectsV2Request {
            bucket: self.bucket_name.to_string(),
            prefix: Some(prefix.to_string()),
            ..Default::default()
        };

        debug!(bucket = %self.bucket_name, prefix, "sending ListObjectsV2");

        match self.s3_client.list_objects_v2(list_req).await {
            Ok(output) => {
                let objects = output
                    .contents
                    .unwrap_or_default()
                    .into_iter()
                    .map(object_summary)
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(ObjectListing {
                    objects,
                    truncated: output.is_truncated.unwrap_or(false),
                })
            }
            Err(e) => Err(StorageError::new(error_kind(&e), e.to_string())),
        }
    }
}

fn region_from_config(config: &Config) -> Region {
    let name = non_empty(&config.aws_region_name);

    if let Some(endpoint) = non_empty(&config.aws_endpoint) {
        return Region::Custom {
            name: name.unwrap_or(DEFAULT_REGION_NAME).to_owned(),
            endpoint: endpoint.to_owned(),
        };
    }

    match name {
        Some(name) => Region::from_str(name).unwrap_or_else(|_| Region::Custom {
            name: name.to_owned(),
            endpoint: format!("https://s3.{}.amazonaws.com", name),
        }),
        None => Region::default(),
    }
}

fn object_summary(obj: Object) -> Result<ObjectSummary, StorageError> {
    let key = obj
        .key
        .ok_or_else(|| StorageError::new("MalformedResponse", "object without a key"))?;

    let last_modified = match obj.last_modified {
        Some(ts) => Some(
            DateTime::parse_from_rfc3339(&ts)
                .map_err(|e| {
                    StorageError::new(
                        "MalformedResponse",
                        format!("invalid timestamp {} for {}: {}", ts, key, e),
                    )
                })?
                .with_timezone(&Utc),
        ),
        None => None,
    };

    let size = u64::try_from(obj.size.unwrap_or(0)).map_err(|_| {
        StorageError::new("MalformedResponse", format!("negative size for {}", key))
    })?;

    Ok(ObjectSummary {
        key,
        last_modified,
        size,
    })
}

fn error_kind(e: &RusotoError<ListObjectsV2Error>) -> String {
    match e {
        RusotoError::Service(ListObjectsV2Error::NoSuchBucket(_)) => "NoSuchBucket".to_string(),
        RusotoError::HttpDispatch(_) => "HttpDispatch".to_string(),
        RusotoError::Credentials(_) => "Credentials".to_string(),
        RusotoError::Validation(_) => "Validation".to_string(),
        RusotoError::ParseError(_) => "ParseError".to_string(),
        RusotoError::Unknown(resp) if resp.status.as_u16() == 403 => "AccessDenied".to_string(),
        RusotoError::Unknown(resp) => format!("HttpStatus{}", resp.status.as_u16()),
        RusotoError::Blocking => "Blocking".to_string(),
    }
}
