//! # Structured Logging
//!
//! `tracing` subscriber setup for the CLI. Everything goes to stderr; stdout
//! carries the JSON documents and nothing else, so
//! `webdid keys … > bundle.json` stays clean.
//!
//! Filtering: `RUST_LOG` wins when set. Otherwise `--log-level` applies. A
//! bare level such as `debug` is scoped to this workspace's crates, and a
//! full directive string like `webdid_protocol=trace` is used verbatim.

use clap::ValueEnum;
use std::io::IsTerminal;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates whose events a bare `--log-level` turns on.
const LOG_TARGETS: [&str; 2] = ["webdid", "webdid_protocol"];

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines, colored when stderr is a terminal.
    Pretty,
    /// One JSON object per event, fields flattened to the top level.
    Json,
}

/// Expand `--log-level` into an `EnvFilter` directive string.
fn default_directive(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(level: &str, format: LogFormat) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_target(false),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    }
}
