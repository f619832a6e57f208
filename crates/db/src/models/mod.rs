//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` struct matching the table row and a
//! conversion into the corresponding `standboard_core::models` type.

pub mod assignment;
pub mod entrepreneur;
