//! `SeaORM` entity definitions.

pub mod prelude;

pub mod deliverables;
pub mod projects;
