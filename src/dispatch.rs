//! The threshold-triggered alert dispatcher.
//!
//! A single-shot, stateless operation: evaluate a measurement against the
//! alert threshold, and on breach resolve credentials, format the alert and
//! publish it to the configured topic. Every failure mode comes back to the
//! caller as a [`DispatchResult::Failed`]; retry policy belongs to the
//! calling layer.

use crate::config::AlertConfig;
use crate::core::{AlertPublisher, CredentialsProvider, DispatchResult, Measurement};
use crate::credentials::CredentialsError;
use crate::notification::PublishError;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// The two failure kinds a dispatch can surface.
///
/// `Configuration` means no network call was attempted; `Transport` means
/// the publish was attempted and the service rejected it or was
/// unreachable. Both carry the underlying detail verbatim.
#[derive(Debug, Clone, Error, Serialize, PartialEq)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DispatchError {
    /// Credentials missing or malformed, or dispatcher inputs unusable.
    #[error("credentials unavailable: {0}")]
    Configuration(String),
    /// The publish call failed after the network was attempted.
    #[error("publish failed: {0}")]
    Transport(String),
}

impl From<CredentialsError> for DispatchError {
    fn from(err: CredentialsError) -> Self {
        DispatchError::Configuration(err.to_string())
    }
}

impl From<PublishError> for DispatchError {
    fn from(err: PublishError) -> Self {
        DispatchError::Transport(err.to_string())
    }
}

/// Evaluates measurements against a threshold and publishes alerts on breach.
///
/// Holds no mutable state: each call to [`Dispatcher::dispatch`] resolves
/// its own credentials and performs at most one publish, so concurrent
/// invocations are independent.
pub struct Dispatcher {
    threshold: f64,
    message_template: String,
    subject: String,
    credentials: Arc<dyn CredentialsProvider>,
    publisher: Arc<dyn AlertPublisher>,
}

impl Dispatcher {
    /// Creates a dispatcher with an explicit threshold and message template.
    ///
    /// The template's `{measurement}` placeholders are replaced with the
    /// measured value at dispatch time. Returns a `Configuration` error for
    /// a non-finite threshold or an empty template.
    pub fn new(
        threshold: f64,
        message_template: impl Into<String>,
        subject: impl Into<String>,
        credentials: Arc<dyn CredentialsProvider>,
        publisher: Arc<dyn AlertPublisher>,
    ) -> Result<Self, DispatchError> {
        let message_template = message_template.into();
        if !threshold.is_finite() {
            return Err(DispatchError::Configuration(format!(
                "alert threshold must be finite, got {}",
                threshold
            )));
        }
        if message_template.trim().is_empty() {
            return Err(DispatchError::Configuration(
                "alert message template must not be empty".to_string(),
            ));
        }
        Ok(Self {
            threshold,
            message_template,
            subject: subject.into(),
            credentials,
            publisher,
        })
    }

    /// Creates a dispatcher from the `[alert]` configuration section.
    pub fn from_config(
        config: &AlertConfig,
        credentials: Arc<dyn CredentialsProvider>,
        publisher: Arc<dyn AlertPublisher>,
    ) -> Result<Self, DispatchError> {
        Self::new(
            config.threshold,
            config.message_template.clone(),
            config.subject.clone(),
            credentials,
            publisher,
        )
    }

    /// The configured alert threshold, in percent.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Evaluates one measurement and publishes an alert if it breaches the
    /// threshold.
    ///
    /// Strict-less-than semantics: a measurement exactly equal to the
    /// threshold is not a breach. On breach, exactly one outbound publish is
    /// attempted; otherwise none. All failures are returned as
    /// [`DispatchResult::Failed`], never as a panic.
    #[instrument(skip(self), fields(value = measurement.value, threshold = self.threshold))]
    pub async fn dispatch(&self, measurement: &Measurement) -> DispatchResult {
        // NaN compares false against everything, so it must be rejected
        // before the threshold check or it would fall through as a breach.
        if !measurement.value.is_finite() {
            return DispatchResult::Failed {
                error: DispatchError::Configuration(format!(
                    "measurement must be finite, got {}",
                    measurement.value
                )),
            };
        }

        if measurement.value >= self.threshold {
            debug!("measurement within normal range, no alert");
            return DispatchResult::Skipped;
        }

        info!("threshold breached, dispatching alert");

        let credentials = match self.credentials.resolve().await {
            Ok(credentials) => credentials,
            Err(e) => {
                error!(error = %e, "failed to resolve credentials");
                return DispatchResult::Failed { error: e.into() };
            }
        };

        let body = self.render_message(measurement);
        match self
            .publisher
            .publish(&credentials, &self.subject, &body)
            .await
        {
            Ok(message_id) => {
                info!(
                    publisher = self.publisher.name(),
                    message_id = %message_id,
                    "alert published"
                );
                DispatchResult::Sent { message_id }
            }
            Err(e) => {
                error!(publisher = self.publisher.name(), error = %e, "publish failed");
                DispatchResult::Failed { error: e.into() }
            }
        }
    }

    /// Substitutes the measurement into the message template.
    fn render_message(&self, measurement: &Measurement) -> String {
        self.message_template
            .replace("{measurement}", &format!("{:.1}", measurement.value))
    }
}
