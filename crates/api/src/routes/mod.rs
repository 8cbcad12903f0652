//! API route definitions.

use axum::Router;
use scopeline_shared::{AppError, types::ProjectId};

use crate::{AppState, ApiError};

pub mod budget;
pub mod deliverables;
pub mod health;
pub mod projects;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(projects::routes())
        .merge(deliverables::routes())
        .merge(budget::routes())
}

/// Parses a project ID path segment, rejecting malformed values.
pub(crate) fn parse_project_id(raw: &str) -> Result<ProjectId, ApiError> {
    raw.parse::<ProjectId>()
        .map_err(|_| ApiError(AppError::Validation(format!("Invalid project id: {raw:?}"))))
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Helpers for exercising routes against a mock database.

    use axum::{
        Router,
        body::Body,
        http::{Request, Response},
    };
    use chrono::Utc;
    use http_body_util::BodyExt;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use tower::ServiceExt;
    use uuid::Uuid;

    use scopeline_db::entities::{deliverables, projects};

    use crate::{AppState, create_router};

    pub fn project_model(id: Uuid) -> projects::Model {
        let now = Utc::now().into();
        projects::Model {
            id,
            name: "Website redesign".to_string(),
            identifier: "website-redesign".to_string(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn deliverable_model(
        project_id: Uuid,
        subject: &str,
        budget: Decimal,
        spent: Decimal,
        progress: i16,
    ) -> deliverables::Model {
        let now = Utc::now().into();
        deliverables::Model {
            id: Uuid::new_v4(),
            project_id,
            subject: subject.to_string(),
            description: None,
            budget,
            spent,
            progress,
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn app(db: MockDatabase) -> Router {
        create_router(AppState::new(db.into_connection()))
    }

    pub fn mock_db() -> MockDatabase {
        MockDatabase::new(DatabaseBackend::Postgres)
    }

    pub async fn send(app: Router, request: Request<Body>) -> (u16, serde_json::Value) {
        let response: Response<Body> = app.oneshot(request).await.unwrap();
        let status = response.status().as_u16();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }
}
