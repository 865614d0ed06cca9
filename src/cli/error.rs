//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::TreeNotFound(_) => crate::exitcode::NOINPUT,
                InfraError::InvalidTree { .. } => crate::exitcode::DATAERR,
                InfraError::Unavailable(_) => crate::exitcode::UNAVAILABLE,
                InfraError::Selector { .. } => crate::exitcode::SOFTWARE,
                InfraError::Application(ApplicationError::Config { .. }) => {
                    crate::exitcode::CONFIG
                }
                InfraError::Application(ApplicationError::TreeUnavailable(_)) => {
                    crate::exitcode::UNAVAILABLE
                }
                InfraError::Application(_) => crate::exitcode::SOFTWARE,
            },
        }
    }
}
