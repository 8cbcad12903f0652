//! Budget report types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use scopeline_shared::types::{DeliverableId, ProjectId};

/// Schedule position derived from the budget score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    /// Progress is ahead of spend (positive score).
    Ahead,
    /// Progress matches spend (zero score).
    OnTrack,
    /// Spend is ahead of progress (negative score).
    Behind,
}

impl ScheduleStatus {
    /// Classifies a score.
    #[must_use]
    pub const fn from_score(score: i64) -> Self {
        if score > 0 {
            Self::Ahead
        } else if score < 0 {
            Self::Behind
        } else {
            Self::OnTrack
        }
    }
}

/// Snapshot of every budget metric for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetReport {
    /// Project ID.
    pub project_id: ProjectId,
    /// Project name.
    pub project_name: String,
    /// Total budget.
    pub budget: Decimal,
    /// Total spent.
    pub spent: Decimal,
    /// Unspent budget (negative when overspent).
    pub left: Decimal,
    /// Overspend, or zero.
    pub overruns: Decimal,
    /// Budget-weighted progress percentage.
    pub progress: i64,
    /// Percentage of budget spent.
    pub budget_ratio: i64,
    /// Progress minus budget ratio.
    pub score: i64,
    /// Schedule position.
    pub status: ScheduleStatus,
    /// Earliest deliverable due date.
    pub next_due_date: Option<NaiveDate>,
    /// Latest deliverable due date.
    pub final_due_date: Option<NaiveDate>,
    /// Per-deliverable breakdown, in project order.
    pub deliverables: Vec<DeliverableSummary>,
}

/// Budget figures for a single deliverable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverableSummary {
    /// Deliverable ID.
    pub id: DeliverableId,
    /// Subject.
    pub subject: String,
    /// Budgeted amount.
    pub budget: Decimal,
    /// Amount spent.
    pub spent: Decimal,
    /// Unspent budget.
    pub left: Decimal,
    /// Overspend, or zero.
    pub overruns: Decimal,
    /// Percentage of budget spent.
    pub budget_ratio: i64,
    /// Percent complete.
    pub progress: u8,
    /// Due date.
    pub due_date: Option<NaiveDate>,
}
