//! Project and deliverable validation errors.

use thiserror::Error;

/// Project-related validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    /// Project name is empty.
    #[error("Project name cannot be blank")]
    BlankName,

    /// Project identifier is not lowercase alphanumerics and dashes.
    #[error("Invalid project identifier: {0:?}")]
    InvalidIdentifier(String),

    /// Deliverable subject is empty.
    #[error("Deliverable subject cannot be blank")]
    BlankSubject,

    /// Deliverable budget is negative.
    #[error("Budget cannot be negative")]
    NegativeBudget,

    /// Deliverable spent amount is negative.
    #[error("Spent amount cannot be negative")]
    NegativeSpent,

    /// Amount does not fit a `NUMERIC(19,4)` column.
    #[error("{0} exceeds the maximum of 999999999999999.9999")]
    AmountTooLarge(&'static str),

    /// Amount has more than four decimal places.
    #[error("{0} cannot have more than 4 decimal places")]
    AmountTooPrecise(&'static str),

    /// Progress outside of 0..=100.
    #[error("Progress must be between 0 and 100, got {0}")]
    ProgressOutOfRange(i32),
}
