//! tracing setup for the CLI: append to `cssembed.log` in the XDG state
//! directory, or write to stderr when that file cannot be opened.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "cssembed.log";

/// Used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "info,cssembed=debug,cssembed_core=debug";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open_append(path: &Path) -> io::Result<File> {
    fs::OpenOptions::new().create(true).append(true).open(path)
}

fn install(writer: BoxMakeWriter) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))
}

/// Log to `$XDG_STATE_HOME/cssembed/cssembed.log`.
///
/// Errors leave no subscriber installed, so the caller can still use
/// [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = xdg::BaseDirectories::with_prefix("cssembed")?
        .place_state_file(LOG_FILE)
        .context("create cssembed state directory")?;
    let file = open_append(&path).with_context(|| format!("open {}", path.display()))?;

    install(BoxMakeWriter::new(Mutex::new(file)))?;
    tracing::info!("cssembed logging to {}", path.display());
    Ok(())
}

/// Log to stderr. A subscriber that is already installed is kept.
pub fn init_logging_stderr() {
    let _ = install(BoxMakeWriter::new(io::stderr));
}
