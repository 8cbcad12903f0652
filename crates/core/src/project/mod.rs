//! Projects, their deliverables, and the contract for loading them.

pub mod error;
pub mod memory;
pub mod service;
pub mod source;
pub mod types;

pub use error::ProjectError;
pub use memory::InMemoryProjectSource;
pub use service::ProjectService;
pub use source::{ProjectSource, SourceError};
pub use types::{Deliverable, DeliverableUpdate, NewDeliverable, NewProject, Project};
