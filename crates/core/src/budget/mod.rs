//! Budget reporting over a project's deliverables.

pub mod error;
pub mod metrics;
pub mod types;
pub mod view;


pub use error::BudgetError;
pub use types::{BudgetReport, DeliverableSummary, ScheduleStatus};
pub use view::Budget;
