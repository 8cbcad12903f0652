//! Projects and deliverables migration.
//!
//! Creates the `projects` and `deliverables` tables. Budget figures are
//! derived from deliverables at read time and have no table of their own.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(PROJECTS_SQL).await?;
        db.execute_unprepared(DELIVERABLES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS deliverables CASCADE;
             DROP TABLE IF EXISTS projects CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const PROJECTS_SQL: &str = r"
CREATE TABLE projects (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    identifier VARCHAR(100) NOT NULL,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_projects_identifier UNIQUE (identifier),
    CONSTRAINT chk_projects_identifier CHECK (identifier ~ '^[a-z0-9]([a-z0-9-]*[a-z0-9])?$')
);

-- Newest-first listing
CREATE INDEX idx_projects_created ON projects(created_at DESC);
";

const DELIVERABLES_SQL: &str = r"
CREATE TABLE deliverables (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    subject VARCHAR(255) NOT NULL,
    description TEXT,
    budget NUMERIC(19, 4) NOT NULL DEFAULT 0,
    spent NUMERIC(19, 4) NOT NULL DEFAULT 0,
    progress SMALLINT NOT NULL DEFAULT 0,
    due_date DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_deliverables_budget CHECK (budget >= 0),
    CONSTRAINT chk_deliverables_spent CHECK (spent >= 0),
    CONSTRAINT chk_deliverables_progress CHECK (progress BETWEEN 0 AND 100)
);

-- Deliverables of a project in creation order
CREATE INDEX idx_deliverables_project ON deliverables(project_id, created_at, id);

-- Upcoming due dates
CREATE INDEX idx_deliverables_due ON deliverables(project_id, due_date) WHERE due_date IS NOT NULL;
";
