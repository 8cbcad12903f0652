//! The `Budget` view over a project.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use scopeline_shared::types::ProjectId;

use super::error::BudgetError;
use super::metrics;
use super::types::{BudgetReport, DeliverableSummary, ScheduleStatus};
use crate::project::{Deliverable, Project, ProjectSource};

/// Financial and schedule view of a project, derived from its deliverables.
///
/// A `Budget` is never stored. It holds the resolved project and computes
/// every metric on each call.
#[derive(Debug, Clone)]
pub struct Budget {
    project: Project,
}

impl Budget {
    /// Creates the view for an already-resolved project.
    #[must_use]
    pub const fn new(project: Project) -> Self {
        Self { project }
    }

    /// Resolves the project through `source` and creates its view.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::ProjectNotFound` if the ID does not resolve and
    /// `BudgetError::Source` if the source fails.
    pub async fn load<S>(source: &S, project_id: ProjectId) -> Result<Self, BudgetError>
    where
        S: ProjectSource + ?Sized,
    {
        source
            .find_project(project_id)
            .await?
            .map(Self::new)
            .ok_or(BudgetError::ProjectNotFound(project_id))
    }

    /// The resolved project.
    #[must_use]
    pub const fn project(&self) -> &Project {
        &self.project
    }

    /// The project's deliverables in source order.
    #[must_use]
    pub fn deliverables(&self) -> &[Deliverable] {
        &self.project.deliverables
    }

    /// Earliest due date, ignoring deliverables without one.
    #[must_use]
    pub fn next_due_date(&self) -> Option<NaiveDate> {
        metrics::next_due_date(self.deliverables())
    }

    /// Latest due date, ignoring deliverables without one.
    #[must_use]
    pub fn final_due_date(&self) -> Option<NaiveDate> {
        metrics::final_due_date(self.deliverables())
    }

    /// Total budget of all deliverables.
    #[must_use]
    pub fn budget(&self) -> Decimal {
        metrics::total_budget(self.deliverables())
    }

    /// Total spent on all deliverables.
    #[must_use]
    pub fn spent(&self) -> Decimal {
        metrics::total_spent(self.deliverables())
    }

    /// Budget-weighted progress; 100 when there are no deliverables.
    #[must_use]
    pub fn progress(&self) -> i64 {
        metrics::weighted_progress(self.deliverables())
    }

    /// Whole-number percentage of the budget spent.
    #[must_use]
    pub fn budget_ratio(&self) -> i64 {
        metrics::budget_ratio(self.budget(), self.spent())
    }

    /// `progress - budget_ratio`; positive when ahead of spend.
    #[must_use]
    pub fn score(&self) -> i64 {
        metrics::score(self.progress(), self.budget_ratio())
    }

    /// Unspent budget; negative when overspent.
    #[must_use]
    pub fn left(&self) -> Decimal {
        metrics::left(self.budget(), self.spent())
    }

    /// Overspend, or zero while budget remains.
    #[must_use]
    pub fn overruns(&self) -> Decimal {
        metrics::overruns(self.left())
    }

    /// Schedule position derived from [`Budget::score`].
    #[must_use]
    pub fn status(&self) -> ScheduleStatus {
        ScheduleStatus::from_score(self.score())
    }

    /// Snapshot of all metrics plus a per-deliverable breakdown.
    #[must_use]
    pub fn report(&self) -> BudgetReport {
        let budget = self.budget();
        let spent = self.spent();
        let left = metrics::left(budget, spent);
        let progress = self.progress();
        let budget_ratio = metrics::budget_ratio(budget, spent);
        let score = metrics::score(progress, budget_ratio);

        BudgetReport {
            project_id: self.project.id,
            project_name: self.project.name.clone(),
            budget,
            spent,
            left,
            overruns: metrics::overruns(left),
            progress,
            budget_ratio,
            score,
            status: ScheduleStatus::from_score(score),
            next_due_date: self.next_due_date(),
            final_due_date: self.final_due_date(),
            deliverables: self
                .deliverables()
                .iter()
                .map(|d| DeliverableSummary {
                    id: d.id,
                    subject: d.subject.clone(),
                    budget: d.budget,
                    spent: d.spent,
                    left: d.left(),
                    overruns: d.overruns(),
                    budget_ratio: d.budget_ratio(),
                    progress: d.progress,
                    due_date: d.due_date,
                })
                .collect(),
        }
    }
}
