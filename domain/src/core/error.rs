//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Construction-time failures only. A solvable-but-degenerate input (fewer
/// than 2 participants, empty primary field) is not an error: the solver
/// reports it as an unsuccessful [`SolverResult`](crate::SolverResult).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown decision domain: {0}. Valid: meeting, trip, project, purchase")]
    UnknownDomain(String),

    #[error("Unknown {kind} method: {value}")]
    UnknownMethod { kind: &'static str, value: String },
}

impl DomainError {
    /// Build an [`DomainError::UnknownMethod`] for a configuration field
    pub fn unknown_method(kind: &'static str, value: impl Into<String>) -> Self {
        DomainError::UnknownMethod {
            kind,
            value: value.into(),
        }
    }
}
