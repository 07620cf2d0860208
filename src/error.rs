//! Error taxonomy for dialog and wizard actions
//!
//! Every variant is recoverable: the UI stays in its pre-action state and
//! shows the message.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrowserError {
    /// A path or id lookup missed. Callers treat this as a no-op.
    #[error("{what} not found")]
    NotFound { what: String },

    /// An HTTP call failed
    #[error("Network failure: {message}")]
    NetworkFailure { message: String },

    /// A required field is missing or invalid
    #[error("{field} {problem}")]
    ValidationFailure { field: String, problem: String },

    /// The embedding host rejected or failed an operation
    #[error("Host error: {message}")]
    Host { message: String },
}

impl BrowserError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// A required value is missing
    pub fn validation(field: impl Into<String>) -> Self {
        Self::invalid(field, "is required")
    }

    /// A value is present but unusable; `problem` completes the sentence
    pub fn invalid(field: impl Into<String>, problem: impl Into<String>) -> Self {
        Self::ValidationFailure {
            field: field.into(),
            problem: problem.into(),
        }
    }

    pub fn host(message: impl Into<String>) -> Self {
        Self::Host {
            message: message.into(),
        }
    }

    /// Convert a failed request, naming the action and the root cause
    pub fn network(action: &str, error: &anyhow::Error) -> Self {
        Self::NetworkFailure {
            message: crate::logic::errors::describe_failure(action, error),
        }
    }

    /// Whether the UI should tell the user about this error
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Self::NotFound { .. })
    }
}
