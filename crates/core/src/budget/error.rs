//! Budget error types.

use scopeline_shared::types::ProjectId;
use thiserror::Error;

use crate::project::SourceError;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// No project with this ID.
    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The project source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}
