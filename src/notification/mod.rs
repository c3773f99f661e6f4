//! Handles the delivery of alerts to the external pub/sub gateway.
//!
//! The dispatcher is decoupled from any concrete delivery mechanism through
//! the `AlertPublisher` trait in `core`; this module provides the HTTP
//! implementation the application ships with, plus the transport error
//! taxonomy shared by all publishers.
pub mod http;

pub use http::HttpPublisher;

use thiserror::Error;

/// Errors raised by a publish attempt. The network was contacted (or the
/// attempt to contact it failed); the caller decides whether to retry.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The request could not be completed (connect failure, timeout, TLS).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The gateway answered with a non-success status.
    #[error("publish rejected: status {status}, body: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
    /// The gateway accepted the request but returned an unusable body.
    #[error("unexpected publish response: {0}")]
    InvalidResponse(String),
}
