//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using
//! the `clap` crate. These arguments are parsed at startup and then merged
//! with the configuration from the `fieldwatch.toml` file and environment
//! variables. Only the configuration overrides participate in the figment
//! merge; run-mode arguments (`--measurement`, `--stdin`, `--json`) are
//! read directly by `main`.

use clap::Parser;
use figment::{
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// A threshold-triggered irrigation alert dispatcher for soil-moisture readings.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Soil-moisture reading to evaluate, in percent.
    #[arg(short, long, value_name = "PERCENT")]
    pub measurement: Option<f64>,

    /// Read one measurement per line from stdin instead of a single value.
    #[arg(long, conflicts_with = "measurement")]
    pub stdin: bool,

    /// Alert threshold override, in percent.
    #[arg(long, value_name = "PERCENT")]
    pub threshold: Option<f64>,

    /// Pub/sub gateway endpoint override.
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Path to the JSON credentials file.
    #[arg(long, value_name = "FILE")]
    pub credentials_file: Option<PathBuf>,

    /// Render dispatch results as JSON instead of plain text.
    #[arg(long)]
    pub json: bool,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        let mut alert = Dict::new();
        if let Some(threshold) = self.threshold {
            alert.insert("threshold".into(), Value::from(threshold));
        }
        if !alert.is_empty() {
            dict.insert("alert".into(), Value::serialize(alert)?);
        }

        let mut publisher = Dict::new();
        if let Some(endpoint) = &self.endpoint {
            publisher.insert("endpoint".into(), Value::from(endpoint.clone()));
        }
        if !publisher.is_empty() {
            dict.insert("publisher".into(), Value::serialize(publisher)?);
        }

        let mut credentials = Dict::new();
        if let Some(path) = &self.credentials_file {
            credentials.insert(
                "file_path".into(),
                Value::from(path.display().to_string()),
            );
            // Pointing at a file implies the file source.
            credentials.insert("source".into(), Value::from("file"));
        }
        if !credentials.is_empty() {
            dict.insert("credentials".into(), Value::serialize(credentials)?);
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
