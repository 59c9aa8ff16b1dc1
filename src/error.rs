//! Error taxonomy for surfaced failures
//!
//! Per-file traversal and extraction problems are recovered where they occur
//! and never reach this type.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = ContextError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ContextError {
    #[error("Path '{}' does not exist", .0.display())]
    PathNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Invalid skip pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("Cannot write output file '{}': {source}", .path.display())]
    Destination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Operation cancelled by user")]
    Interrupted,
}

impl From<figment::Error> for ContextError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl ContextError {
    pub fn destination(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Destination { path: path.into(), source }
    }
}
