//! Budget report route.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::info;

use scopeline_core::budget::{Budget, BudgetReport};
use scopeline_db::ProjectRepository;

use super::parse_project_id;
use crate::{ApiError, AppState};

/// Creates the budget routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/projects/{project_id}/budget", get(get_budget))
}

/// GET `/projects/{project_id}/budget` - Aggregated cost and progress report.
async fn get_budget(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<BudgetReport>, ApiError> {
    let project_id = parse_project_id(&project_id)?;
    let repo = ProjectRepository::new((*state.db).clone());

    let budget = Budget::load(&repo, project_id).await?;
    let report = budget.report();

    info!(
        project_id = %project_id,
        budget = %report.budget,
        spent = %report.spent,
        score = report.score,
        "Budget report generated"
    );

    Ok(Json(report))
}
