//! Credential sources for the alert topic.
//!
//! The dispatcher treats credential lookup as a pluggable capability; this
//! module provides the two concrete sources the application ships with: a
//! JSON file (the classic `credentials.json` next to the binary) and the
//! process environment. Both fail fast with a typed error when a field is
//! absent, so the dispatcher can report a configuration failure without
//! ever touching the network.

use crate::core::{CredentialsProvider, TopicCredentials};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while resolving credentials. Always a configuration
/// problem; the network is never involved.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// The credentials file does not exist.
    #[error("credentials file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The credentials file exists but could not be read.
    #[error("failed to read credentials file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The credentials source exists but is not valid JSON.
    #[error("malformed credentials: {0}")]
    Malformed(String),
    /// A required field is absent or empty.
    #[error("missing credential field: {0}")]
    MissingField(String),
}

/// Extracts a required, non-empty credential field.
fn required(value: Option<String>, name: &str) -> Result<String, CredentialsError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CredentialsError::MissingField(name.to_string())),
    }
}

// =============================================================================
// JSON file provider
// =============================================================================

/// Reads credentials from a JSON document with `access_key`, `secret_key`
/// and `topic` fields.
pub struct JsonFileCredentials {
    path: PathBuf,
}

/// On-disk shape of the credentials file. Fields are optional so a partial
/// file reports the exact missing field instead of a generic parse error.
#[derive(Deserialize)]
struct CredentialsFile {
    access_key: Option<String>,
    secret_key: Option<String>,
    topic: Option<String>,
}

impl JsonFileCredentials {
    /// Creates a provider reading from `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl CredentialsProvider for JsonFileCredentials {
    async fn resolve(&self) -> Result<TopicCredentials, CredentialsError> {
        if !self.path.exists() {
            return Err(CredentialsError::NotFound(self.path.clone()));
        }

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CredentialsError::Io {
                path: self.path.clone(),
                source,
            })?;

        let parsed: CredentialsFile =
            serde_json::from_str(&raw).map_err(|e| CredentialsError::Malformed(e.to_string()))?;

        Ok(TopicCredentials {
            access_key: required(parsed.access_key, "access_key")?,
            secret_key: required(parsed.secret_key, "secret_key")?,
            topic: required(parsed.topic, "topic")?,
        })
    }
}

// =============================================================================
// Environment provider
// =============================================================================

/// Reads credentials from `<PREFIX>ACCESS_KEY`, `<PREFIX>SECRET_KEY` and
/// `<PREFIX>TOPIC` environment variables.
pub struct EnvCredentials {
    prefix: String,
}

impl EnvCredentials {
    /// Creates a provider reading variables under `prefix`
    /// (e.g. `FIELDWATCH_`).
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn var(&self, suffix: &str) -> Result<String, CredentialsError> {
        let name = format!("{}{}", self.prefix, suffix);
        required(std::env::var(&name).ok(), &name)
    }
}

#[async_trait]
impl CredentialsProvider for EnvCredentials {
    async fn resolve(&self) -> Result<TopicCredentials, CredentialsError> {
        Ok(TopicCredentials {
            access_key: self.var("ACCESS_KEY")?,
            secret_key: self.var("SECRET_KEY")?,
            topic: self.var("TOPIC")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_credentials_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[tokio::test]
    async fn file_provider_reads_all_fields() {
        let file = write_credentials_file(
            r#"{
                "access_key": "AKIAEXAMPLE",
                "secret_key": "wJalrEXAMPLEKEY",
                "topic": "arn:aws:sns:us-east-1:123456789012:irrigation-alerts"
            }"#,
        );

        let provider = JsonFileCredentials::new(file.path());
        let credentials = provider.resolve().await.unwrap();

        assert_eq!(credentials.access_key, "AKIAEXAMPLE");
        assert_eq!(credentials.secret_key, "wJalrEXAMPLEKEY");
        assert_eq!(
            credentials.topic,
            "arn:aws:sns:us-east-1:123456789012:irrigation-alerts"
        );
    }

    #[tokio::test]
    async fn file_provider_reports_missing_file() {
        let provider = JsonFileCredentials::new("/nonexistent/credentials.json");

        let err = provider.resolve().await.unwrap_err();
        assert!(matches!(err, CredentialsError::NotFound(_)));
        assert!(err.to_string().contains("credentials file not found"));
    }

    #[tokio::test]
    async fn file_provider_reports_malformed_json() {
        let file = write_credentials_file("{ this is not json");

        let provider = JsonFileCredentials::new(file.path());
        let err = provider.resolve().await.unwrap_err();

        assert!(matches!(err, CredentialsError::Malformed(_)));
    }

    #[tokio::test]
    async fn file_provider_reports_missing_field() {
        let file = write_credentials_file(
            r#"{ "access_key": "AKIAEXAMPLE", "secret_key": "wJalrEXAMPLEKEY" }"#,
        );

        let provider = JsonFileCredentials::new(file.path());
        let err = provider.resolve().await.unwrap_err();

        match err {
            CredentialsError::MissingField(field) => assert_eq!(field, "topic"),
            other => panic!("expected missing field, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn file_provider_rejects_empty_field() {
        let file = write_credentials_file(
            r#"{ "access_key": "", "secret_key": "wJalrEXAMPLEKEY", "topic": "alerts" }"#,
        );

        let provider = JsonFileCredentials::new(file.path());
        let err = provider.resolve().await.unwrap_err();

        assert!(matches!(err, CredentialsError::MissingField(_)));
    }

    #[tokio::test]
    #[serial]
    async fn env_provider_reads_all_fields() {
        std::env::set_var("FWTEST_ACCESS_KEY", "AKIAEXAMPLE");
        std::env::set_var("FWTEST_SECRET_KEY", "wJalrEXAMPLEKEY");
        std::env::set_var("FWTEST_TOPIC", "irrigation-alerts");

        let provider = EnvCredentials::new("FWTEST_");
        let credentials = provider.resolve().await.unwrap();

        assert_eq!(credentials.access_key, "AKIAEXAMPLE");
        assert_eq!(credentials.topic, "irrigation-alerts");

        std::env::remove_var("FWTEST_ACCESS_KEY");
        std::env::remove_var("FWTEST_SECRET_KEY");
        std::env::remove_var("FWTEST_TOPIC");
    }

    #[tokio::test]
    #[serial]
    async fn env_provider_names_the_missing_variable() {
        std::env::remove_var("FWTEST_ACCESS_KEY");
        std::env::remove_var("FWTEST_SECRET_KEY");
        std::env::remove_var("FWTEST_TOPIC");

        let provider = EnvCredentials::new("FWTEST_");
        let err = provider.resolve().await.unwrap_err();

        match err {
            CredentialsError::MissingField(field) => assert_eq!(field, "FWTEST_ACCESS_KEY"),
            other => panic!("expected missing field, got {other:?}"),
        }
    }
}
