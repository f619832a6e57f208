//! Standboard domain core.
//!
//! Holds the rotation rules and the weekly stand-assignment scheduler. Has no
//! dependency on the database or HTTP crates: storage is reached only through
//! the [`repository::StandRepository`] trait so the same logic runs against
//! PostgreSQL in production and [`memory::InMemoryRepository`] in tests.

pub mod category;
pub mod counters;
pub mod error;
pub mod memory;
pub mod models;
pub mod ranking;
pub mod repository;
pub mod scheduler;
pub mod slot;
pub mod store;
pub mod types;
pub mod week;
