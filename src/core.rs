//! Core domain types and service traits for FieldWatch
//!
//! This module defines the fundamental data structures and trait contracts
//! that govern component interactions throughout the application.

use crate::credentials::CredentialsError;
use crate::notification::PublishError;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single soil-moisture reading, in percent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    /// The measured value (e.g. 35.0 for 35% soil moisture).
    pub value: f64,
    /// ISO 8601 timestamp when the reading was taken.
    pub timestamp: String,
}

impl Measurement {
    /// Creates a measurement stamped with the current time.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Creates a measurement with an explicit timestamp.
    pub fn with_timestamp(value: f64, timestamp: impl Into<String>) -> Self {
        Self {
            value,
            timestamp: timestamp.into(),
        }
    }
}

/// Credential material for one pub/sub topic.
///
/// Borrowed from a [`CredentialsProvider`] for the duration of a single
/// publish call. Never cached by the dispatcher.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct TopicCredentials {
    /// Access key identifying the publishing principal.
    pub access_key: String,
    /// Secret key paired with the access key.
    pub secret_key: String,
    /// Identifier of the topic alerts are published to.
    pub topic: String,
}

// Secret material must not reach logs, so Debug redacts it.
impl fmt::Debug for TopicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopicCredentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("topic", &self.topic)
            .finish()
    }
}

/// The outcome of a single dispatch attempt.
///
/// Every invocation of [`crate::dispatch::Dispatcher::dispatch`] returns
/// exactly one of these; failures are carried as data and never propagate
/// as panics or `Err` values.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchResult {
    /// The measurement did not breach the threshold; nothing was attempted.
    Skipped,
    /// The alert was published; `message_id` is the service-assigned id.
    Sent { message_id: String },
    /// Credential resolution or the publish call failed.
    Failed { error: crate::dispatch::DispatchError },
}

impl DispatchResult {
    /// Returns true if an alert was successfully published.
    pub fn is_sent(&self) -> bool {
        matches!(self, DispatchResult::Sent { .. })
    }

    /// Returns true if the dispatch failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, DispatchResult::Failed { .. })
    }
}

// =============================================================================
// Service Traits
// =============================================================================

/// Supplies pub/sub credentials by name, independent of storage mechanism
///
/// Implementations may read a file, the process environment, or a secret
/// store; the dispatcher only relies on "fetch, fail if absent".
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Resolves the full credential set for the alert topic.
    ///
    /// # Returns
    /// * `Ok(TopicCredentials)` when all three fields are present
    /// * `Err` when the source is missing, unreadable, or incomplete
    async fn resolve(&self) -> Result<TopicCredentials, CredentialsError>;
}

/// Delivers one alert message to one pub/sub topic
#[async_trait]
pub trait AlertPublisher: Send + Sync {
    /// A unique, descriptive name for the publisher (e.g. "http").
    /// Used for logging.
    fn name(&self) -> &str;

    /// Publishes a message to the topic named in `credentials`.
    ///
    /// # Arguments
    /// * `credentials` - borrowed credential material for this call only
    /// * `subject` - the alert subject line
    /// * `body` - the formatted alert body
    ///
    /// # Returns
    /// * `Ok(message_id)` with the service's opaque identifier
    /// * `Err` if the service rejected the publish or was unreachable
    async fn publish(
        &self,
        credentials: &TopicCredentials,
        subject: &str,
        body: &str,
    ) -> Result<String, PublishError>;
}
