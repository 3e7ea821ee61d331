//! Configuration error types.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load env file {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
    #[error("failed to read {kind} file {}: {source}", path.display())]
    ReadFile {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0} environment variable is required but not set")]
    MissingRequired(&'static str),
}

impl ConfigError {
    /// Path of the file that failed, for the file variants.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::EnvFile { path, .. } | ConfigError::ReadFile { path, .. } => Some(path),
            _ => None,
        }
    }

    /// True when the env file or a referenced file could not be used.
    pub fn is_file_error(&self) -> bool {
        self.path().is_some()
    }

    pub fn is_missing_required(&self) -> bool {
        matches!(self, ConfigError::MissingRequired(_))
    }
}
