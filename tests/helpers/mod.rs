//! Common fakes and fixtures for integration tests.

#![allow(dead_code)] // Not every test binary uses every helper.

pub mod fake_credentials;
pub mod mock_publisher;

use fieldwatch::core::TopicCredentials;

/// A valid credential set used across tests.
pub fn test_credentials() -> TopicCredentials {
    TopicCredentials {
        access_key: "AKIAEXAMPLE".to_string(),
        secret_key: "wJalrEXAMPLEKEY".to_string(),
        topic: "irrigation-alerts".to_string(),
    }
}
