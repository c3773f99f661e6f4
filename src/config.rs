//! Configuration management for FieldWatch
//!
//! This module defines the main `Config` struct and its sub-structs,
//! responsible for holding all application settings. It uses the `figment`
//! crate to load configuration from a `fieldwatch.toml` file and merge it
//! with environment variables and command-line arguments.

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::Cli;

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// Threshold rule and alert message settings.
    pub alert: AlertConfig,
    /// Settings for the pub/sub gateway publisher.
    pub publisher: PublisherConfig,
    /// Where credentials are resolved from.
    pub credentials: CredentialsConfig,
}

/// Threshold rule and alert message settings.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AlertConfig {
    /// Soil-moisture percentage below which an alert is dispatched.
    pub threshold: f64,
    /// Alert body template; `{measurement}` is replaced with the reading.
    pub message_template: String,
    /// Subject line attached to every alert.
    pub subject: String,
}

/// Settings for the pub/sub gateway publisher.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PublisherConfig {
    /// The gateway publish endpoint. Required; there is no sensible default.
    pub endpoint: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

/// The credential source to use at startup.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CredentialsSource {
    /// Read a JSON file (`credentials.file_path`).
    File,
    /// Read environment variables under `credentials.env_prefix`.
    Env,
}

/// Where credentials are resolved from.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CredentialsConfig {
    /// Which provider to construct.
    pub source: CredentialsSource,
    /// Path to the JSON credentials file (used when `source = "file"`).
    pub file_path: PathBuf,
    /// Environment variable prefix (used when `source = "env"`).
    pub env_prefix: String,
}

impl Config {
    /// Loads the application configuration by layering sources: defaults,
    /// TOML file, environment variables, and CLI arguments (highest
    /// precedence last).
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from("fieldwatch.toml"));

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            // Allow overriding with environment variables, e.g.
            // FIELDWATCH_LOG_LEVEL=debug
            .merge(Env::prefixed("FIELDWATCH_").split("__"))
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }
}

// Provide a default implementation for tests and easy setup.
impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            alert: AlertConfig {
                threshold: 40.0,
                message_template:
                    "ALERT: soil moisture critical at {measurement}%. Trigger irrigation."
                        .to_string(),
                subject: "FieldWatch Automatic Alert".to_string(),
            },
            publisher: PublisherConfig {
                endpoint: String::new(),
                timeout_seconds: 10,
            },
            credentials: CredentialsConfig {
                source: CredentialsSource::File,
                file_path: PathBuf::from("credentials.json"),
                env_prefix: "FIELDWATCH_".to_string(),
            },
        }
    }
}
