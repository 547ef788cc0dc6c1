//! Error types for jobdiff operations
//!
//! Only the outer layers (CLI, config loading, report output) return these.
//! The comparison core is total and never fails.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, JobdiffError>;

#[derive(Error, Debug)]
pub enum JobdiffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl JobdiffError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }
}
