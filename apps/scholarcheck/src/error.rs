//! Error types for the command-line front end

use std::path::PathBuf;

use scholarcheck_core::{ConfigError, ReportError, SourceError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Could not set up source: {0}")]
    Source(#[from] SourceError),

    #[error("Could not read publications from {path}: {message}")]
    Input { path: PathBuf, message: String },

    #[error("No publications found in {0}")]
    EmptyInput(PathBuf),
}

impl CliError {
    pub fn input(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::Input {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}
