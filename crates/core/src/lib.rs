//! Domain layer for the folio portfolio backend.
//!
//! Holds everything that does not need a database connection or an HTTP
//! stack: shared types and errors, form-list parsing, the icon catalogue,
//! the public portfolio view, the [`storage::ObjectStore`] abstraction and
//! the upload orchestration built on top of it.

pub mod error;
pub mod icons;
pub mod portfolio;
pub mod storage;
pub mod text;
pub mod types;
pub mod uploads;
