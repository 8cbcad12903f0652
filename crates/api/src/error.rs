//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

use scopeline_core::budget::BudgetError;
use scopeline_core::project::SourceError;
use scopeline_db::RepositoryError;
use scopeline_shared::AppError;

/// Handler error rendered as `{"error": CODE, "message": ...}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Returns the wrapped application error.
    #[must_use]
    pub const fn inner(&self) -> &AppError {
        &self.0
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Unavailable(msg) => Self(AppError::Database(msg)),
            SourceError::InvalidRecord(msg) => Self(AppError::Internal(msg)),
        }
    }
}

impl From<BudgetError> for ApiError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::ProjectNotFound(id) => {
                Self(AppError::NotFound(format!("Project not found: {id}")))
            }
            BudgetError::Source(source) => source.into(),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let app = match err {
            RepositoryError::ProjectNotFound(_) | RepositoryError::DeliverableNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            RepositoryError::DuplicateIdentifier(_) => AppError::Conflict(err.to_string()),
            RepositoryError::Validation(e) => AppError::Validation(e.to_string()),
            RepositoryError::InvalidRecord(e) => return e.into(),
            RepositoryError::Database(e) => AppError::Database(e.to_string()),
        };
        Self(app)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Server-side details stay in the logs.
        let message = if self.0.is_server_error() {
            error!(error = %self.0, code = self.0.error_code(), "Request failed");
            "An error occurred".to_string()
        } else {
            self.0.to_string()
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message
            })),
        )
            .into_response()
    }
}
