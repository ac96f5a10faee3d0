//! Tracing setup.
//!
//! The chart owns the terminal, so log output goes to a file instead of
//! stdout.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use crate::{Result, RibbonError};

/// Installs the global tracing subscriber, appending to `path`.
///
/// # Errors
///
/// Returns [`RibbonError::Io`] if the file cannot be opened or a global
/// subscriber is already installed.
pub fn init(path: impl AsRef<Path>) -> Result<()> {
    let file = open_log_file(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| RibbonError::Io(format!("failed to install tracing subscriber: {e}")))
}

/// Opens `path` for appending, creating it if needed.
///
/// # Errors
///
/// Returns [`RibbonError::Io`] if the file cannot be opened.
pub fn open_log_file(path: impl AsRef<Path>) -> Result<File> {
    let path = path.as_ref();
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| RibbonError::Io(format!("failed to open log file {}: {e}", path.display())))
}
