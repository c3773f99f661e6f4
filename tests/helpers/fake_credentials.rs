//! A fake credentials provider for testing the dispatcher.

use async_trait::async_trait;
use fieldwatch::core::{CredentialsProvider, TopicCredentials};
use fieldwatch::credentials::CredentialsError;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Records how often it was asked for credentials, and either hands out a
/// fixed credential set or fails with a missing-field error.
pub struct FakeCredentialsProvider {
    credentials: Option<TopicCredentials>,
    calls: AtomicUsize,
}

impl FakeCredentialsProvider {
    /// A provider that always resolves `credentials`.
    pub fn with_credentials(credentials: TopicCredentials) -> Self {
        Self {
            credentials: Some(credentials),
            calls: AtomicUsize::new(0),
        }
    }

    /// A provider that always fails resolution.
    pub fn failing() -> Self {
        Self {
            credentials: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `resolve` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialsProvider for FakeCredentialsProvider {
    async fn resolve(&self) -> Result<TopicCredentials, CredentialsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.credentials {
            Some(credentials) => Ok(credentials.clone()),
            None => Err(CredentialsError::MissingField("secret_key".to_string())),
        }
    }
}
