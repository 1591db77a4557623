//! Errors of the orchestration layer (reading inputs, configuration, thread pools).
//!
//! Inference itself never fails: an unresolvable type is `Conflict`, not an error.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse {what} at JSON path {path}: {message}")]
    JsonAt {
        what: String,
        path: String,
        message: String,
    },

    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("Unreadable glob match: {0}")]
    GlobMatch(#[from] glob::GlobError),

    #[error("Glob pattern matched no files: {pattern}")]
    NoMatch { pattern: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
