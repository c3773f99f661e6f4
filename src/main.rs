//! FieldWatch - soil-moisture alert dispatcher
//!
//! A reference caller for the dispatch library: reads one measurement (or a
//! stream of measurements on stdin), evaluates the threshold rule, and
//! renders the returned dispatch result.

use anyhow::Result;
use clap::Parser;
use fieldwatch::{
    cli::Cli,
    config::{Config, CredentialsSource},
    core::{AlertPublisher, CredentialsProvider, DispatchResult, Measurement},
    credentials::{EnvCredentials, JsonFileCredentials},
    dispatch::Dispatcher,
    notification::HttpPublisher,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment,
    // and CLI args.
    let config = Config::load(&cli).unwrap_or_else(|err| {
        // The subscriber is not up yet, so report on stderr directly.
        eprintln!("Failed to load configuration: {}", err);
        std::process::exit(1);
    });

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("FieldWatch starting up...");
    info!("Alert Threshold: {}%", config.alert.threshold);
    info!("Alert Subject: {}", config.alert.subject);
    info!(
        "Credentials Source: {}",
        match config.credentials.source {
            CredentialsSource::File => format!("file ({})", config.credentials.file_path.display()),
            CredentialsSource::Env => format!("env (prefix {})", config.credentials.env_prefix),
        }
    );
    info!("Publisher Endpoint: {}", config.publisher.endpoint);

    if config.publisher.endpoint.trim().is_empty() {
        anyhow::bail!(
            "publisher.endpoint is required (set it in fieldwatch.toml or pass --endpoint)"
        );
    }

    let credentials: Arc<dyn CredentialsProvider> = match config.credentials.source {
        CredentialsSource::File => {
            Arc::new(JsonFileCredentials::new(&config.credentials.file_path))
        }
        CredentialsSource::Env => Arc::new(EnvCredentials::new(&config.credentials.env_prefix)),
    };

    let publisher: Arc<dyn AlertPublisher> = Arc::new(
        HttpPublisher::new(config.publisher.endpoint.clone())
            .with_timeout(Duration::from_secs(config.publisher.timeout_seconds)),
    );

    let dispatcher = Dispatcher::from_config(&config.alert, credentials, publisher)?;

    let mut failures = 0usize;
    if cli.stdin {
        // Poll mode: one dispatch per line of sensor input.
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let value: f64 = match line.parse() {
                Ok(value) => value,
                Err(_) => {
                    warn!("ignoring unparsable measurement: {:?}", line);
                    continue;
                }
            };
            let result = dispatcher.dispatch(&Measurement::new(value)).await;
            if result.is_failed() {
                failures += 1;
            }
            render_result(&result, cli.json);
        }
    } else if let Some(value) = cli.measurement {
        let result = dispatcher.dispatch(&Measurement::new(value)).await;
        if result.is_failed() {
            failures += 1;
        }
        render_result(&result, cli.json);
    } else {
        anyhow::bail!("provide a reading with --measurement or stream readings with --stdin");
    }

    if failures > 0 {
        error!("{} dispatch attempt(s) failed", failures);
        std::process::exit(1);
    }

    Ok(())
}

/// Renders one dispatch result to stdout; all diagnostics go to the log.
fn render_result(result: &DispatchResult, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::to_string(result).expect("dispatch result serializes")
        );
        return;
    }
    match result {
        DispatchResult::Skipped => println!("moisture within normal range, no alert sent"),
        DispatchResult::Sent { message_id } => println!("alert sent, message id: {}", message_id),
        DispatchResult::Failed { error } => println!("alert failed: {}", error),
    }
}
