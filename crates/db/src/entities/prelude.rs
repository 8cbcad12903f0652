//! Entity re-exports.

pub use super::deliverables::Entity as Deliverables;
pub use super::projects::Entity as Projects;
