//! Project repository for project and deliverable database operations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use tracing::{debug, info};
use uuid::Uuid;

use scopeline_core::project::{
    Deliverable, DeliverableUpdate, NewDeliverable, NewProject, Project, ProjectError,
    ProjectService, ProjectSource, SourceError,
};
use scopeline_shared::types::{DeliverableId, PageRequest, ProjectId};

use crate::entities::{deliverables, projects};

/// Error types for project operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Project not found.
    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    /// Deliverable not found in the given project.
    #[error("Deliverable not found: {0}")]
    DeliverableNotFound(Uuid),

    /// Project identifier already in use.
    #[error("Project identifier already exists: {0}")]
    DuplicateIdentifier(String),

    /// Input failed domain validation.
    #[error(transparent)]
    Validation(#[from] ProjectError),

    /// A stored row could not be mapped to the domain.
    #[error(transparent)]
    InvalidRecord(#[from] SourceError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Project repository for CRUD operations and budget loading.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    db: DatabaseConnection,
}

impl ProjectRepository {
    /// Creates a new project repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new project.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name or identifier is invalid
    /// - The identifier is already taken
    /// - Database operation fails
    pub async fn create_project(
        &self,
        input: NewProject,
    ) -> Result<projects::Model, RepositoryError> {
        ProjectService::validate_project(&input)?;

        if self.identifier_taken(&input.identifier).await? {
            return Err(RepositoryError::DuplicateIdentifier(input.identifier));
        }

        let now = Utc::now().into();
        let project = projects::ActiveModel {
            id: Set(ProjectId::new().into_inner()),
            name: Set(input.name.trim().to_string()),
            identifier: Set(input.identifier.clone()),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let project = match project.insert(&self.db).await {
            Ok(project) => project,
            Err(err) => {
                // A concurrent create can claim the identifier between the check and the insert.
                if is_unique_violation(&err) || self.identifier_taken(&input.identifier).await? {
                    debug!(identifier = %input.identifier, error = %err, "Identifier claimed concurrently");
                    return Err(RepositoryError::DuplicateIdentifier(input.identifier));
                }
                return Err(err.into());
            }
        };
        info!(project_id = %project.id, identifier = %project.identifier, "Project created");
        Ok(project)
    }

    async fn identifier_taken(&self, identifier: &str) -> Result<bool, DbErr> {
        let existing = projects::Entity::find()
            .filter(projects::Column::Identifier.eq(identifier))
            .one(&self.db)
            .await?;
        Ok(existing.is_some())
    }

    /// Finds a project by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<projects::Model>, DbErr> {
        projects::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_projects(&self, page: &PageRequest) -> Result<Vec<projects::Model>, DbErr> {
        projects::Entity::find()
            .order_by_desc(projects::Column::CreatedAt)
            .order_by_desc(projects::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
    }

    /// Counts all projects.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_projects(&self) -> Result<u64, DbErr> {
        projects::Entity::find().count(&self.db).await
    }

    /// Lists a project's deliverables in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_deliverables(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<deliverables::Model>, DbErr> {
        deliverables::Entity::find()
            .filter(deliverables::Column::ProjectId.eq(project_id))
            .order_by_asc(deliverables::Column::CreatedAt)
            .order_by_asc(deliverables::Column::Id)
            .all(&self.db)
            .await
    }

    /// Adds a deliverable to a project.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input fails validation
    /// - The project does not exist
    /// - Database operation fails
    pub async fn create_deliverable(
        &self,
        project_id: Uuid,
        input: NewDeliverable,
    ) -> Result<deliverables::Model, RepositoryError> {
        let progress = ProjectService::validate_deliverable(&input)?;

        if self.find_by_id(project_id).await?.is_none() {
            return Err(RepositoryError::ProjectNotFound(project_id));
        }

        let now = Utc::now().into();
        let deliverable = deliverables::ActiveModel {
            id: Set(DeliverableId::new().into_inner()),
            project_id: Set(project_id),
            subject: Set(input.subject.trim().to_string()),
            description: Set(input.description),
            budget: Set(input.budget),
            spent: Set(input.spent),
            progress: Set(i16::from(progress)),
            due_date: Set(input.due_date),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let deliverable = deliverable.insert(&self.db).await?;
        info!(
            project_id = %project_id,
            deliverable_id = %deliverable.id,
            budget = %deliverable.budget,
            "Deliverable created"
        );
        Ok(deliverable)
    }

    /// Applies a partial update to a deliverable of a project.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The deliverable does not exist in this project
    /// - The update fails validation
    /// - Database operation fails
    pub async fn update_deliverable(
        &self,
        project_id: Uuid,
        deliverable_id: Uuid,
        update: DeliverableUpdate,
    ) -> Result<deliverables::Model, RepositoryError> {
        let model = deliverables::Entity::find_by_id(deliverable_id)
            .filter(deliverables::Column::ProjectId.eq(project_id))
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::DeliverableNotFound(deliverable_id))?;

        let mut deliverable = deliverable_from_model(model.clone())?;
        ProjectService::apply_update(&mut deliverable, update)?;

        let mut active: deliverables::ActiveModel = model.into();
        active.subject = Set(deliverable.subject);
        active.description = Set(deliverable.description);
        active.budget = Set(deliverable.budget);
        active.spent = Set(deliverable.spent);
        active.progress = Set(i16::from(deliverable.progress));
        active.due_date = Set(deliverable.due_date);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        info!(
            project_id = %project_id,
            deliverable_id = %deliverable_id,
            "Deliverable updated"
        );
        Ok(updated)
    }
}

#[async_trait]
impl ProjectSource for ProjectRepository {
    async fn find_project(&self, id: ProjectId) -> Result<Option<Project>, SourceError> {
        let project_id = id.into_inner();

        let Some(project) = self.find_by_id(project_id).await.map_err(unavailable)? else {
            debug!(project_id = %project_id, "Project not found");
            return Ok(None);
        };

        let deliverables = self
            .list_deliverables(project_id)
            .await
            .map_err(unavailable)?;

        debug!(
            project_id = %project_id,
            deliverables = deliverables.len(),
            "Project loaded"
        );

        project_from_models(project, deliverables).map(Some)
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn unavailable(err: DbErr) -> SourceError {
    SourceError::Unavailable(err.to_string())
}

/// Maps a deliverable row to the domain type.
///
/// # Errors
///
/// Returns `SourceError::InvalidRecord` if the stored progress is outside 0..=100.
pub fn deliverable_from_model(model: deliverables::Model) -> Result<Deliverable, SourceError> {
    let progress = u8::try_from(model.progress)
        .ok()
        .filter(|p| *p <= 100)
        .ok_or_else(|| {
            SourceError::InvalidRecord(format!(
                "deliverable {} has progress {}",
                model.id, model.progress
            ))
        })?;

    Ok(Deliverable {
        id: DeliverableId::from_uuid(model.id),
        project_id: ProjectId::from_uuid(model.project_id),
        subject: model.subject,
        description: model.description,
        budget: model.budget,
        spent: model.spent,
        progress,
        due_date: model.due_date,
    })
}

/// Maps a project row and its deliverable rows to the domain aggregate.
///
/// Deliverables keep the order they are given in.
///
/// # Errors
///
/// Returns `SourceError::InvalidRecord` if any deliverable row is invalid.
pub fn project_from_models(
    project: projects::Model,
    deliverables: Vec<deliverables::Model>,
) -> Result<Project, SourceError> {
    let deliverables = deliverables
        .into_iter()
        .map(deliverable_from_model)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Project {
        id: ProjectId::from_uuid(project.id),
        name: project.name,
        identifier: project.identifier,
        description: project.description,
        deliverables,
        created_at: project.created_at.with_timezone(&Utc),
    })
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
