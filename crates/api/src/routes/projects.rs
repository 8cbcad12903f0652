//! Project routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use scopeline_core::project::NewProject;
use scopeline_db::{ProjectRepository, entities::projects};
use scopeline_shared::{
    AppError,
    types::{PageRequest, PageResponse},
};

use super::deliverables::DeliverableResponse;
use super::parse_project_id;
use crate::{ApiError, AppState};

/// Creates the project routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/{project_id}", get(get_project))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a project.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    /// Display name.
    pub name: String,
    /// Short URL-safe identifier.
    pub identifier: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Response for a project.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    /// Project ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Short identifier.
    pub identifier: String,
    /// Description.
    pub description: Option<String>,
    /// Created at timestamp.
    pub created_at: DateTime<FixedOffset>,
    /// Updated at timestamp.
    pub updated_at: DateTime<FixedOffset>,
}

impl From<projects::Model> for ProjectResponse {
    fn from(model: projects::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            identifier: model.identifier,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Response for a project with its deliverables.
#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    /// Project fields.
    #[serde(flatten)]
    pub project: ProjectResponse,
    /// Deliverables in order.
    pub deliverables: Vec<DeliverableResponse>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/projects` - List projects, newest first.
async fn list_projects(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<PageResponse<ProjectResponse>>, ApiError> {
    let page = page.normalized();
    let repo = ProjectRepository::new((*state.db).clone());

    let total = repo.count_projects().await?;
    let projects = repo.list_projects(&page).await?;

    Ok(Json(
        PageResponse::new(projects, page.page, page.per_page, total).map(ProjectResponse::from),
    ))
}

/// POST `/projects` - Create a project.
async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    let repo = ProjectRepository::new((*state.db).clone());

    let project = repo
        .create_project(NewProject {
            name: payload.name,
            identifier: payload.identifier,
            description: payload.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(project.into())))
}

/// GET `/projects/{project_id}` - Get a project with its deliverables.
async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<ProjectDetailResponse>, ApiError> {
    let project_id = parse_project_id(&project_id)?.into_inner();
    let repo = ProjectRepository::new((*state.db).clone());

    let project = repo
        .find_by_id(project_id)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound(format!("Project not found: {project_id}"))))?;

    let deliverables = repo.list_deliverables(project_id).await?;
    info!(
        project_id = %project_id,
        deliverables = deliverables.len(),
        "Project fetched"
    );

    Ok(Json(ProjectDetailResponse {
        project: project.into(),
        deliverables: deliverables.into_iter().map(Into::into).collect(),
    }))
}
