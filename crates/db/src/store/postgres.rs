//! PostgreSQL-backed stores.

use async_trait::async_trait;
use stencil_core::types::DbId;

use super::{StoreResult, TemplateStore, UserStore};
use crate::models::template::{CreateTemplate, Template, UpdateTemplate};
use crate::models::user::{CreateUser, User};
use crate::repositories::{TemplateRepo, UserRepo};
use crate::DbPool;

/// [`TemplateStore`] over the `templates` table.
#[derive(Clone)]
pub struct PgTemplateStore {
    pool: DbPool,
}

impl PgTemplateStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateStore for PgTemplateStore {
    async fn create(&self, input: &CreateTemplate) -> StoreResult<Template> {
        Ok(TemplateRepo::create(&self.pool, input).await?)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Template>> {
        Ok(TemplateRepo::find_by_id(&self.pool, id).await?)
    }

    async fn update(&self, id: DbId, input: &UpdateTemplate) -> StoreResult<Option<Template>> {
        Ok(TemplateRepo::update(&self.pool, id, input).await?)
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        Ok(TemplateRepo::delete(&self.pool, id).await?)
    }

    async fn list(&self, limit: i64, offset: i64) -> StoreResult<(Vec<Template>, i64)> {
        let items = TemplateRepo::list(&self.pool, limit, offset).await?;
        let total = TemplateRepo::count(&self.pool).await?;
        Ok((items, total))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }
}

/// [`UserStore`] over the `users` table.
#[derive(Clone)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, input: &CreateUser) -> StoreResult<User> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }
}
