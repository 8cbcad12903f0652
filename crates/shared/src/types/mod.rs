//! Common types used across the application.

pub mod date;
pub mod id;
pub mod pagination;
pub mod patch;

pub use date::{deserialize_date_patch, deserialize_optional_date, parse_optional_date};
pub use id::*;
pub use pagination::{PageMeta, PageRequest, PageResponse};
pub use patch::deserialize_patch;
