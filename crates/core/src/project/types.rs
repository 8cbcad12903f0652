//! Project and deliverable data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use scopeline_shared::types::{DeliverableId, ProjectId};

use crate::budget::metrics;

/// A project: the aggregate root owning an ordered list of deliverables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project ID.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// Short URL-safe identifier (e.g. `website-redesign`).
    pub identifier: String,
    /// Optional description.
    pub description: Option<String>,
    /// Deliverables in source order.
    pub deliverables: Vec<Deliverable>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Creates a project with no deliverables.
    #[must_use]
    pub fn new(id: ProjectId, name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            identifier: identifier.into(),
            description: None,
            deliverables: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Replaces the deliverables, keeping the given order.
    #[must_use]
    pub fn with_deliverables(mut self, deliverables: Vec<Deliverable>) -> Self {
        self.deliverables = deliverables;
        self
    }
}

/// A billable unit of project work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deliverable {
    /// Deliverable ID.
    pub id: DeliverableId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Short title.
    pub subject: String,
    /// Optional description.
    pub description: Option<String>,
    /// Budgeted amount.
    pub budget: Decimal,
    /// Amount already spent.
    pub spent: Decimal,
    /// Percent complete, 0 to 100.
    pub progress: u8,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
}

impl Deliverable {
    /// Creates a deliverable with zero spend, no progress and no due date.
    #[must_use]
    pub fn new(project_id: ProjectId, subject: impl Into<String>, budget: Decimal) -> Self {
        Self {
            id: DeliverableId::new(),
            project_id,
            subject: subject.into(),
            description: None,
            budget,
            spent: Decimal::ZERO,
            progress: 0,
            due_date: None,
        }
    }

    /// Sets the amount spent.
    #[must_use]
    pub fn with_spent(mut self, spent: Decimal) -> Self {
        self.spent = spent;
        self
    }

    /// Sets the progress percentage.
    #[must_use]
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Unspent budget; negative when overspent.
    #[must_use]
    pub fn left(&self) -> Decimal {
        metrics::left(self.budget, self.spent)
    }

    /// Amount spent beyond the budget, or zero.
    #[must_use]
    pub fn overruns(&self) -> Decimal {
        metrics::overruns(self.left())
    }

    /// Whole-number percentage of the budget consumed.
    #[must_use]
    pub fn budget_ratio(&self) -> i64 {
        metrics::budget_ratio(self.budget, self.spent)
    }
}

/// Input for creating a project.
#[derive(Debug, Clone)]
pub struct NewProject {
    /// Display name.
    pub name: String,
    /// Short URL-safe identifier.
    pub identifier: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Input for creating a deliverable.
#[derive(Debug, Clone)]
pub struct NewDeliverable {
    /// Short title.
    pub subject: String,
    /// Optional description.
    pub description: Option<String>,
    /// Budgeted amount.
    pub budget: Decimal,
    /// Amount already spent.
    pub spent: Decimal,
    /// Percent complete as submitted; validated into 0..=100.
    pub progress: i32,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
}

/// Partial update of a deliverable. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct DeliverableUpdate {
    /// New subject.
    pub subject: Option<String>,
    /// New description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// New budget.
    pub budget: Option<Decimal>,
    /// New spent amount.
    pub spent: Option<Decimal>,
    /// New progress.
    pub progress: Option<i32>,
    /// New due date; `Some(None)` clears it.
    pub due_date: Option<Option<NaiveDate>>,
}

impl DeliverableUpdate {
    /// Returns true when the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.description.is_none()
            && self.budget.is_none()
            && self.spent.is_none()
            && self.progress.is_none()
            && self.due_date.is_none()
    }
}
