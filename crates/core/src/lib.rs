//! Core business logic for Scopeline.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `project` - Projects, deliverables, validation, and the `ProjectSource` contract
//! - `budget` - The `Budget` view: cost, progress, schedule, and overrun metrics

pub mod budget;
pub mod project;

pub use budget::{Budget, BudgetError, BudgetReport, ScheduleStatus};
pub use project::{Deliverable, Project, ProjectSource, SourceError};
