use std::env;

use crate::error::ListingError;

pub const ACCESS_KEY_VAR: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";
pub const SESSION_TOKEN_VAR: &str = "AWS_SESSION_TOKEN";
pub const REGION_VAR: &str = "AWS_S3_REGION_NAME";
pub const BUCKET_VAR: &str = "S3_BUCKET_NAME";
pub const ENDPOINT_VAR: &str = "AWS_ENDPOINT";

/// Access keys of temporary (STS) credentials start with this.
const TEMPORARY_KEY_PREFIX: &str = "ASIA";

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_session_token: Option<String>,
    pub aws_region_name: Option<String>,
    pub aws_endpoint: Option<String>,
    pub bucket_name: Option<String>,
}

impl Config {
    pub fn from_env() -> Config {
        Config {
            aws_access_key_id: get_from_env(ACCESS_KEY_VAR),
            aws_secret_access_key: get_from_env(SECRET_KEY_VAR),
            aws_session_token: get_from_env(SESSION_TOKEN_VAR),
            aws_region_name: get_from_env(REGION_VAR),
            aws_endpoint: get_from_env(ENDPOINT_VAR),
            bucket_name: get_from_env(BUCKET_VAR),
        }
    }

    pub fn new(bucket_name: &str) -> Self {
        Config {
            bucket_name: Some(bucket_name.to_owned()),
            ..Default::default()
        }
    }

    #[cfg(test)]
    pub fn with_credentials(
        mut self,
        access_key: &str,
        secret_key: &str,
        session_token: Option<&str>,
    ) -> Self {
        self.aws_access_key_id = Some(access_key.to_owned());
        self.aws_secret_access_key = Some(secret_key.to_owned());
        self.aws_session_token = session_token.map(str::to_owned);
        self
    }

    #[cfg(test)]
    pub fn with_region(mut self, region: &str) -> Self {
        self.aws_region_name = Some(region.to_owned());
        self
    }

    /// Command line values win over the environment.
    pub fn override_with(
        mut self,
        bucket: Option<String>,
        region: Option<String>,
        endpoint: Option<String>,
    ) -> Self {
        if let Some(bucket) = bucket {
            self.bucket_name = Some(bucket);
        }
        if let Some(region) = region {
            self.aws_region_name = Some(region);
        }
        if let Some(endpoint) = endpoint {
            self.aws_endpoint = Some(endpoint);
        }
        self
    }

    /// Bucket name, if one is configured and non-empty.
    pub fn bucket(&self) -> Option<&str> {
        non_empty(&self.bucket_name)
    }

    pub fn uses_temporary_credentials(&self) -> bool {
        non_empty(&self.aws_access_key_id)
            .map(|key| key.starts_with(TEMPORARY_KEY_PREFIX))
            .unwrap_or(false)
    }

    /// Checks the settings that can be checked without a network call.
    pub fn validate(&self) -> Result<(), ListingError> {
        if self.bucket().is_none() {
            return Err(ListingError::Configuration(format!(
                "{} is not configured",
                BUCKET_VAR
            )));
        }

        if self.uses_temporary_credentials() && non_empty(&self.aws_session_token).is_none() {
            return Err(ListingError::Configuration(format!(
                "{} is required for temporary credentials ({}...) but was not found in the configuration",
                SESSION_TOKEN_VAR, TEMPORARY_KEY_PREFIX
            )));
        }

        Ok(())
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn get_from_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod test {
    use super::Config;
    use crate::error::ListingError;

    #[test]
    fn should_accept_permanent_credentials() {
        let config = Config::new("my-bucket")
            .with_credentials("AKIAEXAMPLE", "secret", None)
            .with_region("us-east-1");

        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_reject_missing_bucket() {
        let config = Config::default();

        match config.validate() {
            Err(ListingError::Configuration(msg)) => assert!(msg.contains("S3_BUCKET_NAME")),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn should_reject_empty_bucket() {
        let config = Config::new("");

        assert!(matches!(
            config.validate(),
            Err(ListingError::Configuration(_))
        ));
    }

    #[test]
    fn should_require_session_token_for_temporary_keys() {
        let config = Config::new("b").with_credentials("ASIA123", "secret", None);

        match config.validate() {
            Err(ListingError::Configuration(msg)) => assert!(msg.contains("AWS_SESSION_TOKEN")),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn should_treat_empty_session_token_as_missing() {
        let config = Config::new("b").with_credentials("ASIA123", "secret", Some(""));

        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_temporary_keys_with_token() {
        let config = Config::new("b").with_credentials("ASIA123", "secret", Some("token"));

        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_override_from_command_line() {
        let config = Config::new("env-bucket").with_region("eu-west-1").override_with(
            Some("cli-bucket".to_string()),
            None,
            Some("http://localhost:9000".to_string()),
        );

        assert_eq!(config.bucket(), Some("cli-bucket"));
        assert_eq!(config.aws_region_name.as_deref(), Some("eu-west-1"));
        assert_eq!(config.aws_endpoint.as_deref(), Some("http://localhost:9000"));
    }
}
