//! FieldWatch - threshold-triggered irrigation alert dispatching
//!
//! This library evaluates soil-moisture readings against an alert threshold
//! and, on breach, publishes a notification to an external pub/sub topic
//! using externally supplied credentials. Callers receive a structured
//! [`core::DispatchResult`] and own all retry, display and logging policy.
pub mod cli;
pub mod config;
pub mod core;
pub mod credentials;
pub mod dispatch;
pub mod notification;

// Re-export core types for convenience
pub use core::*;
pub use dispatch::{DispatchError, Dispatcher};
