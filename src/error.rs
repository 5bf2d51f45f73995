//! Error types
//!
//! The simulation itself is total; only loading tuning data can fail.

use std::io;

/// Failure to read or parse a settings file.
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
