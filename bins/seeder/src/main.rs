//! Database seeder for Scopeline development and testing.
//!
//! Seeds a demo project with a handful of deliverables so the budget
//! report has something to show. Safe to run repeatedly. Reads the same
//! configuration as the server (`config/*.toml`, `SCOPELINE__*`).
//!
//! Usage: cargo run --bin scopeline-seeder

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use scopeline_core::budget::Budget;
use scopeline_core::project::{NewDeliverable, NewProject};
use scopeline_db::{ProjectRepository, RepositoryError};
use scopeline_shared::AppConfig;
use scopeline_shared::types::ProjectId;

/// Identifier of the demo project.
const DEMO_IDENTIFIER: &str = "website-redesign";

/// (subject, budget, spent, progress, due date)
const DEMO_DELIVERABLES: [(&str, Decimal, Decimal, i32, Option<(i32, u32, u32)>); 4] = [
    ("Discovery workshop", dec!(1200.00), dec!(1200.00), 100, Some((2026, 9, 15))),
    ("Visual design", dec!(4000.00), dec!(2600.00), 70, Some((2026, 10, 30))),
    ("Frontend build", dec!(9000.00), dec!(3100.00), 35, Some((2026, 12, 11))),
    ("Launch support", dec!(1500.00), dec!(0), 0, None),
];

fn demo_deliverables() -> Vec<NewDeliverable> {
    DEMO_DELIVERABLES
        .into_iter()
        .map(|(subject, budget, spent, progress, due)| NewDeliverable {
            subject: subject.to_string(),
            description: None,
            budget,
            spent,
            progress,
            due_date: due.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Connecting to database...");
    let db = scopeline_db::connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;
    let repo = ProjectRepository::new(db);

    println!("Seeding demo project...");
    let project = match repo
        .create_project(NewProject {
            name: "Website redesign".to_string(),
            identifier: DEMO_IDENTIFIER.to_string(),
            description: Some("Demo project for local development".to_string()),
        })
        .await
    {
        Ok(project) => project,
        Err(RepositoryError::DuplicateIdentifier(_)) => {
            println!("  Demo project already exists, skipping...");
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to insert demo project"),
    };
    println!("  Created project: {} ({})", project.name, project.id);

    println!("Seeding deliverables...");
    for input in demo_deliverables() {
        let subject = input.subject.clone();
        repo.create_deliverable(project.id, input)
            .await
            .with_context(|| format!("Failed to insert deliverable {subject}"))?;
        println!("  Created deliverable: {subject}");
    }

    let budget = Budget::load(&repo, ProjectId::from_uuid(project.id))
        .await
        .context("Failed to load demo budget")?;
    println!(
        "  Budget {} / spent {} / progress {}% / score {}",
        budget.budget(),
        budget.spent(),
        budget.progress(),
        budget.score()
    );

    println!("Seeding complete!");
    Ok(())
}
