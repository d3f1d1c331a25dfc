use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialise the tracing subscriber. Call once at startup.
///
/// * Honours `RUST_LOG` when set, falling back to `info` so normal runs are
///   quiet.
/// * Console output drops timestamps and target names to keep the prompt
///   screens clean.
/// * With a log file, records are appended there as well, timestamps
///   included.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    let console = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            let file_layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file));

            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(file_layer)
                .init();
        }
        None => {
            tracing_subscriber::registry().with(filter).with(console).init();
        }
    }

    Ok(())
}
