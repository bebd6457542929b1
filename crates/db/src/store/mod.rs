//! Store interfaces consumed by the API layer.
//!
//! Services receive an `Arc<dyn TemplateStore>` / `Arc<dyn UserStore>` at
//! construction time. Two implementations exist: [`postgres`] (delegating to
//! the repositories) and [`memory`] (for local runs and tests).

use async_trait::async_trait;
use stencil_core::types::DbId;

use crate::models::template::{CreateTemplate, Template, UpdateTemplate};
use crate::models::user::{CreateUser, User};

pub mod memory;
pub mod postgres;

pub use memory::{MemoryTemplateStore, MemoryUserStore};
pub use postgres::{PgTemplateStore, PgUserStore};

/// Errors raised by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// A uniqueness rule was violated outside the database (in-memory store).
    #[error("Conflict: {0}")]
    Conflict(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence of template records.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn create(&self, input: &CreateTemplate) -> StoreResult<Template>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Template>>;

    /// Apply a partial update. Returns `None` when the id does not exist.
    async fn update(&self, id: DbId, input: &UpdateTemplate) -> StoreResult<Option<Template>>;

    /// Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> StoreResult<bool>;

    /// One page of templates (newest first) and the total row count.
    async fn list(&self, limit: i64, offset: i64) -> StoreResult<(Vec<Template>, i64)>;

    /// Confirm the backing storage is reachable.
    async fn ping(&self) -> StoreResult<()>;
}

/// Persistence of user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. A taken username is a conflict.
    async fn create(&self, input: &CreateUser) -> StoreResult<User>;

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;
}
