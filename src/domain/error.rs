//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the questionnaire's structure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("tree has no 'initial' entry")]
    MissingInitial,

    #[error("node '{node}' references unknown option '{option}'")]
    DanglingReference { node: String, option: String },
}

/// The tree could not be produced. Terminal for the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("decision tree unavailable: {reason}")]
pub struct TreeUnavailable {
    pub reason: String,
}

impl TreeUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
