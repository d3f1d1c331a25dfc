use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use directories::ProjectDirs;
use tracing::debug;

use quote_cli::{QuoteApp, logging, screens};
use quote_store::{StoreConfig, open_store};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Quotation builder for a tyre sales and service counter.
///
/// Opens the configured store, loads the saved quotations and the company
/// profile, and drives the interactive screens until the operator quits.
#[derive(Debug, Parser)]
struct Cli {
    /// Store backend to use, `file` or `memory`.
    #[arg(long, default_value = "file")]
    store: String,

    /// Directory holding the store files and rendered previews.
    /// Defaults to the per-user data directory.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Append log records to this file as well as the console.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref())?;

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => ProjectDirs::from("com", "tyrequote", "tyrequote")
            .context("no home directory to place data in; pass --data-dir")?
            .data_dir()
            .to_path_buf(),
    };

    let config = StoreConfig {
        backend: cli.store,
        data_dir: data_dir.clone(),
    };
    debug!(
        "opening {} store in {}",
        config.backend,
        config.data_dir.display()
    );
    let store = open_store(&config)?;

    let mut app = QuoteApp::open(store, data_dir.join("previews"));
    screens::run(&mut app)
}
