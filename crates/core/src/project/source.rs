//! Data-access contract for resolving projects.

use async_trait::async_trait;
use scopeline_shared::types::ProjectId;
use thiserror::Error;

use super::types::Project;

/// Errors raised by a [`ProjectSource`].
#[derive(Debug, Error)]
pub enum SourceError {
    /// The backing store could not be queried.
    #[error("Project source unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be mapped to a domain value.
    #[error("Invalid stored record: {0}")]
    InvalidRecord(String),
}

/// Resolves projects together with their deliverables.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    /// Finds a project by ID.
    ///
    /// The returned project carries its deliverables in the order the
    /// source keeps them. Returns `Ok(None)` when no such project exists.
    async fn find_project(&self, id: ProjectId) -> Result<Option<Project>, SourceError>;
}
