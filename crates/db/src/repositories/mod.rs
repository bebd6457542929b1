//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod template_repo;
pub mod user_repo;

pub use template_repo::TemplateRepo;
pub use user_repo::UserRepo;
