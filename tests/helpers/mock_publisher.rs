//! A mock publisher for testing the dispatcher without a network.

use async_trait::async_trait;
use fieldwatch::core::{AlertPublisher, TopicCredentials};
use fieldwatch::notification::PublishError;
use std::sync::{Arc, Mutex};

/// One recorded publish call: (topic, subject, body).
pub type PublishedMessage = (String, String, String);

/// Records every publish call and either returns a fixed message id or a
/// transport error.
#[derive(Clone)]
pub struct MockPublisher {
    pub published: Arc<Mutex<Vec<PublishedMessage>>>,
    message_id: Option<String>,
    error_detail: Option<String>,
}

impl MockPublisher {
    /// A publisher that always succeeds with `message_id`.
    pub fn succeeding(message_id: &str) -> Self {
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
            message_id: Some(message_id.to_string()),
            error_detail: None,
        }
    }

    /// A publisher that always fails with `detail`.
    pub fn failing(detail: &str) -> Self {
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
            message_id: None,
            error_detail: Some(detail.to_string()),
        }
    }

    /// How many publish calls were attempted.
    pub fn call_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }
}

#[async_trait]
impl AlertPublisher for MockPublisher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn publish(
        &self,
        credentials: &TopicCredentials,
        subject: &str,
        body: &str,
    ) -> Result<String, PublishError> {
        self.published.lock().unwrap().push((
            credentials.topic.clone(),
            subject.to_string(),
            body.to_string(),
        ));
        match (&self.message_id, &self.error_detail) {
            (Some(id), _) => Ok(id.clone()),
            (None, Some(detail)) => Err(PublishError::InvalidResponse(detail.clone())),
            (None, None) => unreachable!("mock publisher configured with neither id nor error"),
        }
    }
}
