//! Errors surfaced to API clients.
//!
//! Layer-specific errors (`ProjectError`, `RepositoryError`, ...) are folded
//! into an [`AppError`] at the HTTP boundary, which fixes the status code and
//! the machine-readable `error` field of the response body.

use thiserror::Error;

/// Client-facing error categories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// The addressed project or deliverable does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed input or a failed field rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request clashes with stored state, such as a taken identifier.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The database could not be reached or rejected a query.
    #[error("Database error: {0}")]
    Database(String),

    /// Stored data or code is in a state that should not happen.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for the category.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Value of the `error` field in JSON responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the failure is on our side. Details of these are not echoed
    /// back to the client.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}
