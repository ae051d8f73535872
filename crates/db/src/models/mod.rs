//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Create/update DTOs with a `normalized` step that maps blank optional
//!   text to `NULL` and a `0` sort order to "unsorted"

pub mod category;
pub mod cv;
pub mod project;
