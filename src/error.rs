//! Error types for the study centre.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::data::LoadError;

/// Result type alias for study centre operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, navigating or exporting content.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Content could not be loaded or failed validation.
    #[error("Failed to load content: {0}")]
    Load(#[from] LoadError),

    /// Configuration file problem.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Route table or link resolution problem.
    #[error("Routing error: {0}")]
    Route(#[from] RouteError),

    /// Terminal or filesystem IO.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// IO error tied to a specific file.
    #[error("IO error at {path}: {source}")]
    IoPath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No mock exam with the requested id.
    #[error("Unknown mock exam: {0}")]
    UnknownExam(String),
}

impl Error {
    /// Wrap an IO error with the path it happened on.
    pub fn io_with_path(source: io::Error, path: impl Into<PathBuf>) -> Self {
        Self::IoPath {
            path: path.into(),
            source,
        }
    }
}

/// Errors from reading `study-centre.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid log level '{0}'")]
    LogLevel(String),
}

/// Errors from the route table.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouteError {
    #[error("duplicate route {0}")]
    Duplicate(String),

    #[error("no page at {0}")]
    NotFound(String),
}
