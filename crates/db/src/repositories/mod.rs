//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod assignment_repo;
pub mod entrepreneur_repo;

pub use assignment_repo::AssignmentRepo;
pub use entrepreneur_repo::EntrepreneurRepo;
