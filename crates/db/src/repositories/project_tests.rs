//! Tests for the project repository against a mock database.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase};
use uuid::Uuid;

use scopeline_core::budget::Budget;
use scopeline_core::project::{
    DeliverableUpdate, NewDeliverable, NewProject, ProjectError, ProjectSource, SourceError,
};
use scopeline_shared::types::ProjectId;

use super::*;
use crate::entities::{deliverables, projects};

fn project_model(id: Uuid) -> projects::Model {
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

fn deliverable_model(project_id: Uuid, budget: Decimal, progress: i16) -> deliverables::Model {
    let now = Utc::now().into();
    deliverables::Model {
        id: Uuid::new_v4(),
        project_id,
        subject: "Deliverable".to_string(),
        description: None,
        budget,
        spent: Decimal::ZERO,
        progress,
        due_date: None,
        created_at: now,
        updated_at: now,
    }
}

fn new_deliverable() -> NewDeliverable {
    NewDeliverable {
        subject: "Design".to_string(),
        description: None,
        budget: dec!(2000.00),
        spent: dec!(0),
        progress: 50,
        due_date: NaiveDate::from_ymd_opt(2026, 11, 1),
    }
}

fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

#[tokio::test]
async fn test_find_project_keeps_deliverable_order() {
    let project_id = Uuid::new_v4();
    let second = deliverable_model(project_id, dec!(3000), 75);
    let first = deliverable_model(project_id, dec!(2000), 50);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project_model(project_id)]])
        .append_query_results([vec![second.clone(), first.clone()]])
        .into_connection();
    let repo = ProjectRepository::new(db);

    let project = repo
        .find_project(ProjectId::from_uuid(project_id))
        .await
        .unwrap()
        .unwrap();

    let ids: Vec<Uuid> = project.deliverables.iter().map(|d| d.id.into_inner()).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert_eq!(project.identifier, "website-redesign");
}

#[tokio::test]
async fn test_find_project_missing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<projects::Model>::new()])
        .into_connection();
    let repo = ProjectRepository::new(db);

    let result = repo.find_project(ProjectId::new()).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_find_project_rejects_corrupt_progress() {
    let project_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project_model(project_id)]])
        .append_query_results([vec![deliverable_model(project_id, dec!(10), 140)]])
        .into_connection();
    let repo = ProjectRepository::new(db);

    let result = repo.find_project(ProjectId::from_uuid(project_id)).await;
    assert!(matches!(result, Err(SourceError::InvalidRecord(_))));
}

#[tokio::test]
async fn test_find_project_reports_unavailable_database() {
    // No query results queued: the mock returns an error for the first query.
    let repo = ProjectRepository::new(empty_db());

    let result = repo.find_project(ProjectId::new()).await;
    assert!(matches!(result, Err(SourceError::Unavailable(_))));
}

#[tokio::test]
async fn test_budget_loads_through_repository() {
    let project_id = Uuid::new_v4();
    let mut design = deliverable_model(project_id, dec!(2000.00), 50);
    design.spent = dec!(1500.00);
    design.due_date = NaiveDate::from_ymd_opt(2026, 11, 1);
    let mut build = deliverable_model(project_id, dec!(3000.00), 75);
    build.spent = dec!(500.00);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project_model(project_id)]])
        .append_query_results([vec![design, build]])
        .into_connection();
    let repo = ProjectRepository::new(db);

    let budget = Budget::load(&repo, ProjectId::from_uuid(project_id))
        .await
        .unwrap();

    assert_eq!(budget.budget(), dec!(5000.00));
    assert_eq!(budget.progress(), 65);
    assert_eq!(budget.budget_ratio(), 40);
    assert_eq!(budget.score(), 25);
    assert_eq!(budget.next_due_date(), NaiveDate::from_ymd_opt(2026, 11, 1));
}

#[tokio::test]
async fn test_create_project_rejects_duplicate_identifier() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project_model(Uuid::new_v4())]])
        .into_connection();
    let repo = ProjectRepository::new(db);

    let result = repo
        .create_project(NewProject {
            name: "Another".to_string(),
            identifier: "website-redesign".to_string(),
            description: None,
        })
        .await;

    assert!(matches!(
        result,
        Err(RepositoryError::DuplicateIdentifier(ref id)) if id == "website-redesign"
    ));
}

#[tokio::test]
async fn test_create_project_validates_before_querying() {
    let repo = ProjectRepository::new(empty_db());

    let result = repo
        .create_project(NewProject {
            name: "Bad".to_string(),
            identifier: "Not Valid".to_string(),
            description: None,
        })
        .await;

    assert!(matches!(
        result,
        Err(RepositoryError::Validation(ProjectError::InvalidIdentifier(_)))
    ));
}

fn website_redesign() -> NewProject {
    NewProject {
        name: "Website redesign".to_string(),
        identifier: "website-redesign".to_string(),
        description: None,
    }
}

#[tokio::test]
async fn test_create_project_identifier_claimed_during_insert() {
    // Free at the check, insert fails, and the identifier is now taken.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<projects::Model>::new()])
        .append_query_errors([DbErr::Custom("duplicate key value".to_string())])
        .append_query_results([vec![project_model(Uuid::new_v4())]])
        .into_connection();
    let repo = ProjectRepository::new(db);

    let result = repo.create_project(website_redesign()).await;

    assert!(matches!(
        result,
        Err(RepositoryError::DuplicateIdentifier(ref id)) if id == "website-redesign"
    ));
}

#[tokio::test]
async fn test_create_project_insert_failure_is_database_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<projects::Model>::new()])
        .append_query_errors([DbErr::Custom("connection reset".to_string())])
        .append_query_results([Vec::<projects::Model>::new()])
        .into_connection();
    let repo = ProjectRepository::new(db);

    let result = repo.create_project(website_redesign()).await;

    assert!(matches!(result, Err(RepositoryError::Database(_))));
}

#[test]
fn test_generic_errors_are_not_unique_violations() {
    assert!(!is_unique_violation(&DbErr::Custom("boom".to_string())));
    assert!(!is_unique_violation(&DbErr::RecordNotInserted));
}

#[tokio::test]
async fn test_create_project() {
    let project_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<projects::Model>::new(), vec![project_model(project_id)]])
        .into_connection();
    let repo = ProjectRepository::new(db);

    let project = repo
        .create_project(NewProject {
            name: "Website redesign".to_string(),
            identifier: "website-redesign".to_string(),
            description: None,
        })
        .await
        .unwrap();

    assert_eq!(project.id, project_id);
}

#[tokio::test]
async fn test_create_deliverable_validates_before_querying() {
    let repo = ProjectRepository::new(empty_db());
    let mut input = new_deliverable();
    input.progress = 101;

    let result = repo.create_deliverable(Uuid::new_v4(), input).await;
    assert!(matches!(
        result,
        Err(RepositoryError::Validation(ProjectError::ProgressOutOfRange(101)))
    ));
}

#[tokio::test]
async fn test_create_deliverable_for_unknown_project() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<projects::Model>::new()])
        .into_connection();
    let repo = ProjectRepository::new(db);
    let project_id = Uuid::new_v4();

    let result = repo.create_deliverable(project_id, new_deliverable()).await;
    assert!(matches!(result, Err(RepositoryError::ProjectNotFound(id)) if id == project_id));
}

#[tokio::test]
async fn test_create_deliverable() {
    let project_id = Uuid::new_v4();
    let stored = deliverable_model(project_id, dec!(2000.00), 50);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project_model(project_id)]])
        .append_query_results([vec![stored.clone()]])
        .into_connection();
    let repo = ProjectRepository::new(db);

    let created = repo
        .create_deliverable(project_id, new_deliverable())
        .await
        .unwrap();

    assert_eq!(created, stored);
}

#[tokio::test]
async fn test_update_deliverable_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<deliverables::Model>::new()])
        .into_connection();
    let repo = ProjectRepository::new(db);
    let deliverable_id = Uuid::new_v4();

    let result = repo
        .update_deliverable(Uuid::new_v4(), deliverable_id, DeliverableUpdate::default())
        .await;

    assert!(matches!(
        result,
        Err(RepositoryError::DeliverableNotFound(id)) if id == deliverable_id
    ));
}

#[tokio::test]
async fn test_update_deliverable_rejects_invalid_update() {
    let project_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![deliverable_model(project_id, dec!(10), 10)]])
        .into_connection();
    let repo = ProjectRepository::new(db);

    let update = DeliverableUpdate {
        spent: Some(dec!(-5)),
        ..DeliverableUpdate::default()
    };
    let result = repo
        .update_deliverable(project_id, Uuid::new_v4(), update)
        .await;

    assert!(matches!(
        result,
        Err(RepositoryError::Validation(ProjectError::NegativeSpent))
    ));
}

#[tokio::test]
async fn test_update_deliverable() {
    let project_id = Uuid::new_v4();
    let existing = deliverable_model(project_id, dec!(3000), 10);
    let mut updated = existing.clone();
    updated.spent = dec!(1200);
    updated.progress = 60;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![existing.clone()], vec![updated.clone()]])
        .into_connection();
    let repo = ProjectRepository::new(db);

    let update = DeliverableUpdate {
        spent: Some(dec!(1200)),
        progress: Some(60),
        ..DeliverableUpdate::default()
    };
    let result = repo
        .update_deliverable(project_id, existing.id, update)
        .await
        .unwrap();

    assert_eq!(result.spent, dec!(1200));
    assert_eq!(result.progress, 60);
}

#[test]
fn test_project_from_models_maps_fields() {
    let project_id = Uuid::new_v4();
    let mut row = deliverable_model(project_id, dec!(100.50), 30);
    row.due_date = NaiveDate::from_ymd_opt(2026, 12, 24);

    let project = project_from_models(project_model(project_id), vec![row.clone()]).unwrap();

    assert_eq!(project.id.into_inner(), project_id);
    let deliverable = &project.deliverables[0];
    assert_eq!(deliverable.id.into_inner(), row.id);
    assert_eq!(deliverable.budget, dec!(100.50));
    assert_eq!(deliverable.progress, 30);
    assert_eq!(deliverable.due_date, row.due_date);
}

proptest! {
    /// Stored progress maps to the domain exactly when it is within 0..=100.
    #[test]
    fn prop_progress_mapping(progress in any::<i16>()) {
        let row = deliverable_model(Uuid::new_v4(), Decimal::ONE, progress);
        let mapped = deliverable_from_model(row);

        if (0..=100).contains(&progress) {
            prop_assert_eq!(i16::from(mapped.unwrap().progress), progress);
        } else {
            prop_assert!(mapped.is_err());
        }
    }
}
