//! In-memory project source.
//!
//! Keeps projects in a map behind a lock. Used by tests and local tooling
//! that need a [`ProjectSource`] without a database.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use scopeline_shared::types::ProjectId;

use super::source::{ProjectSource, SourceError};
use super::types::{Deliverable, Project};

/// In-memory [`ProjectSource`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectSource {
    projects: Arc<RwLock<HashMap<ProjectId, Project>>>,
}

impl InMemoryProjectSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a project, replacing any project with the same ID.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Unavailable` if the lock is poisoned.
    pub fn insert(&self, project: Project) -> Result<(), SourceError> {
        let mut projects = self
            .projects
            .write()
            .map_err(|_| SourceError::Unavailable("project store lock poisoned".to_string()))?;
        projects.insert(project.id, project);
        Ok(())
    }

    /// Appends a deliverable to its project.
    ///
    /// Returns `Ok(false)` if the deliverable's project is unknown.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Unavailable` if the lock is poisoned.
    pub fn add_deliverable(&self, deliverable: Deliverable) -> Result<bool, SourceError> {
        let mut projects = self
            .projects
            .write()
            .map_err(|_| SourceError::Unavailable("project store lock poisoned".to_string()))?;
        match projects.get_mut(&deliverable.project_id) {
            Some(project) => {
                project.deliverables.push(deliverable);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Number of stored projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.read().map_or(0, |p| p.len())
    }

    /// Returns true when no project is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProjectSource for InMemoryProjectSource {
    async fn find_project(&self, id: ProjectId) -> Result<Option<Project>, SourceError> {
        let projects = self
            .projects
            .read()
            .map_err(|_| SourceError::Unavailable("project store lock poisoned".to_string()))?;
        Ok(projects.get(&id).cloned())
    }
}
