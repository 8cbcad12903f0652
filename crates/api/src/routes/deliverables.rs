//! Deliverable routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use scopeline_core::budget::metrics;
use scopeline_core::project::{DeliverableUpdate, NewDeliverable};
use scopeline_db::{ProjectRepository, entities::deliverables};
use scopeline_shared::{
    AppError,
    types::{DeliverableId, deserialize_date_patch, deserialize_optional_date, deserialize_patch},
};

use super::parse_project_id;
use crate::{ApiError, AppState};

/// Creates the deliverable routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/{project_id}/deliverables",
            get(list_deliverables).post(create_deliverable),
        )
        .route(
            "/projects/{project_id}/deliverables/{deliverable_id}",
            put(update_deliverable),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a deliverable.
#[derive(Debug, Deserialize)]
pub struct CreateDeliverableRequest {
    /// Short title.
    pub subject: String,
    /// Optional description.
    pub description: Option<String>,
    /// Planned cost.
    pub budget: Decimal,
    /// Cost incurred so far.
    #[serde(default)]
    pub spent: Decimal,
    /// Completion percentage.
    #[serde(default)]
    pub progress: i32,
    /// Due date; empty string means none.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub due_date: Option<NaiveDate>,
}

impl From<CreateDeliverableRequest> for NewDeliverable {
    fn from(req: CreateDeliverableRequest) -> Self {
        Self {
            subject: req.subject,
            description: req.description,
            budget: req.budget,
            spent: req.spent,
            progress: req.progress,
            due_date: req.due_date,
        }
    }
}

/// Request body for a partial deliverable update.
///
/// Absent fields are left unchanged. A `null` description clears it, as
/// does a `null` or empty `due_date`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDeliverableRequest {
    /// New title.
    pub subject: Option<String>,
    /// New description.
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub description: Option<Option<String>>,
    /// New planned cost.
    pub budget: Option<Decimal>,
    /// New cost incurred.
    pub spent: Option<Decimal>,
    /// New completion percentage.
    pub progress: Option<i32>,
    /// New due date.
    #[serde(default, deserialize_with = "deserialize_date_patch")]
    pub due_date: Option<Option<NaiveDate>>,
}

impl From<UpdateDeliverableRequest> for DeliverableUpdate {
    fn from(req: UpdateDeliverableRequest) -> Self {
        Self {
            subject: req.subject,
            description: req.description,
            budget: req.budget,
            spent: req.spent,
            progress: req.progress,
            due_date: req.due_date,
        }
    }
}

/// Response for a deliverable, with its per-item cost figures.
#[derive(Debug, Serialize)]
pub struct DeliverableResponse {
    /// Deliverable ID.
    pub id: Uuid,
    /// Owning project ID.
    pub project_id: Uuid,
    /// Short title.
    pub subject: String,
    /// Description.
    pub description: Option<String>,
    /// Planned cost.
    pub budget: Decimal,
    /// Cost incurred so far.
    pub spent: Decimal,
    /// Budget minus spent.
    pub left: Decimal,
    /// Amount spent beyond budget.
    pub overruns: Decimal,
    /// Spent as a whole percentage of budget.
    pub budget_ratio: i64,
    /// Completion percentage.
    pub progress: i16,
    /// Due date.
    pub due_date: Option<NaiveDate>,
}

impl From<deliverables::Model> for DeliverableResponse {
    fn from(model: deliverables::Model) -> Self {
        let left = metrics::left(model.budget, model.spent);
        Self {
            id: model.id,
            project_id: model.project_id,
            subject: model.subject,
            description: model.description,
            budget: model.budget,
            spent: model.spent,
            left,
            overruns: metrics::overruns(left),
            budget_ratio: metrics::budget_ratio(model.budget, model.spent),
            progress: model.progress,
            due_date: model.due_date,
        }
    }
}

fn parse_deliverable_id(raw: &str) -> Result<DeliverableId, ApiError> {
    raw.parse::<DeliverableId>().map_err(|_| {
        ApiError(AppError::Validation(format!("Invalid deliverable id: {raw:?}")))
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/projects/{project_id}/deliverables` - List a project's deliverables.
async fn list_deliverables(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<Vec<DeliverableResponse>>, ApiError> {
    let project_id = parse_project_id(&project_id)?.into_inner();
    let repo = ProjectRepository::new((*state.db).clone());

    if repo.find_by_id(project_id).await?.is_none() {
        return Err(ApiError(AppError::NotFound(format!(
            "Project not found: {project_id}"
        ))));
    }

    let deliverables = repo.list_deliverables(project_id).await?;
    Ok(Json(deliverables.into_iter().map(Into::into).collect()))
}

/// POST `/projects/{project_id}/deliverables` - Add a deliverable.
async fn create_deliverable(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(payload): Json<CreateDeliverableRequest>,
) -> Result<(StatusCode, Json<DeliverableResponse>), ApiError> {
    let project_id = parse_project_id(&project_id)?.into_inner();
    let repo = ProjectRepository::new((*state.db).clone());

    let deliverable = repo.create_deliverable(project_id, payload.into()).await?;

    Ok((StatusCode::CREATED, Json(deliverable.into())))
}

/// PUT `/projects/{project_id}/deliverables/{deliverable_id}` - Update a deliverable.
async fn update_deliverable(
    State(state): State<AppState>,
    Path((project_id, deliverable_id)): Path<(String, String)>,
    Json(payload): Json<UpdateDeliverableRequest>,
) -> Result<Json<DeliverableResponse>, ApiError> {
    let project_id = parse_project_id(&project_id)?.into_inner();
    let deliverable_id = parse_deliverable_id(&deliverable_id)?.into_inner();
    let repo = ProjectRepository::new((*state.db).clone());

    let deliverable = repo
        .update_deliverable(project_id, deliverable_id, payload.into())
        .await?;

    info!(
        project_id = %project_id,
        deliverable_id = %deliverable_id,
        spent = %deliverable.spent,
        progress = deliverable.progress,
        "Deliverable saved"
    );

    Ok(Json(deliverable.into()))
}
