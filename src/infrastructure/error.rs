//! Infrastructure-level errors (wraps application errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::application::ApplicationError;

/// Infrastructure errors wrap application errors and add I/O-level concerns.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("tree file not found: {}", .0.display())]
    TreeNotFound(PathBuf),

    #[error("invalid tree in {source_name}: {message}")]
    InvalidTree {
        source_name: String,
        message: String,
    },

    #[error("tree source unavailable: {0}")]
    Unavailable(String),

    #[error("selector failed: {message}")]
    Selector { message: String },
}

impl InfraError {
    /// Create a selector error.
    pub fn selector(message: impl Into<String>) -> Self {
        Self::Selector {
            message: message.into(),
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
