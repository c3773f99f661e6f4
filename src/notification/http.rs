//! A client for publishing alerts to an HTTP pub/sub gateway.

use crate::core::{AlertPublisher, TopicCredentials};
use crate::notification::PublishError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, instrument};

/// Publishes one message per call to a pub/sub gateway endpoint.
///
/// Authentication uses HTTP Basic auth built from the access/secret key
/// pair; the topic travels in the payload. A fresh client is built for each
/// call, so concurrent publishes share no connection state.
pub struct HttpPublisher {
    endpoint: String,
    timeout: std::time::Duration,
}

impl HttpPublisher {
    /// Creates a new `HttpPublisher` for the given gateway endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: std::time::Duration::from_secs(10),
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Success body returned by the gateway.
#[derive(Deserialize)]
struct PublishResponse {
    message_id: String,
}

#[async_trait]
impl AlertPublisher for HttpPublisher {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, credentials, body), fields(topic = %credentials.topic))]
    async fn publish(
        &self,
        credentials: &TopicCredentials,
        subject: &str,
        body: &str,
    ) -> Result<String, PublishError> {
        let payload = json!({
            "topic": credentials.topic,
            "subject": subject,
            "message": body,
        });

        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        let response = client
            .post(&self.endpoint)
            .basic_auth(&credentials.access_key, Some(&credentials.secret_key))
            .json(&payload)
            .send()
            .await?;

        if response.status().is_success() {
            let parsed: PublishResponse = response
                .json()
                .await
                .map_err(|e| PublishError::InvalidResponse(e.to_string()))?;
            info!(message_id = %parsed.message_id, "gateway accepted alert");
            Ok(parsed.message_id)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                body = %text,
                "gateway rejected alert"
            );
            Err(PublishError::Rejected { status, body: text })
        }
    }
}
