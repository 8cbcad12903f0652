//! Database migration runner for Scopeline.
//!
//! Usage:
//!   scopeline-migrator up      - Run all pending migrations
//!   scopeline-migrator down    - Rollback last migration
//!   scopeline-migrator status  - Show migration status
//!   scopeline-migrator fresh   - Drop all tables and re-run migrations
//!
//! Reads `DATABASE_URL` from the environment or a `.env` file.

use sea_orm_migration::prelude::*;
use scopeline_db::migration::Migrator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The CLI sets up its own tracing.
    cli::run_cli(Migrator).await;
}
