//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod cv_repo;
pub mod project_repo;

pub use category_repo::CategoryRepo;
pub use cv_repo::CvRepo;
pub use project_repo::ProjectRepo;
