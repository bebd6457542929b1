//! In-memory stores.
//!
//! Used when `STORE_BACKEND=memory` and by the API integration tests. Rows
//! live in `RwLock`-guarded maps and ids come from an atomic counter, so the
//! same ordering and not-found semantics as the SQL store hold.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use stencil_core::types::DbId;
use tokio::sync::RwLock;

use super::{StoreError, StoreResult, TemplateStore, UserStore};
use crate::models::template::{CreateTemplate, Template, UpdateTemplate};
use crate::models::user::{CreateUser, User};

/// [`TemplateStore`] keeping rows in a `BTreeMap` keyed by id.
#[derive(Debug, Default)]
pub struct MemoryTemplateStore {
    rows: RwLock<BTreeMap<DbId, Template>>,
    last_id: AtomicI64,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn create(&self, input: &CreateTemplate) -> StoreResult<Template> {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let template = Template {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            content: input.content.clone(),
            category: input.category,
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.insert(id, template.clone());
        Ok(template)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Template>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn update(&self, id: DbId, input: &UpdateTemplate) -> StoreResult<Option<Template>> {
        let mut rows = self.rows.write().await;
        let Some(template) = rows.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = &input.title {
            template.title = title.clone();
        }
        if let Some(description) = &input.description {
            template.description = Some(description.clone());
        }
        if let Some(content) = &input.content {
            template.content = content.clone();
        }
        if let Some(category) = input.category {
            template.category = category;
        }
        template.updated_at = Utc::now();

        Ok(Some(template.clone()))
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }

    async fn list(&self, limit: i64, offset: i64) -> StoreResult<(Vec<Template>, i64)> {
        let rows = self.rows.read().await;
        let total = rows.len() as i64;
        let items = rows
            .values()
            .rev()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect();
        Ok((items, total))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// [`UserStore`] keeping accounts in a `HashMap` keyed by username.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
    last_id: AtomicI64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, input: &CreateUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&input.username) {
            return Err(StoreError::Conflict(format!(
                "Username '{}' is already taken",
                input.username
            )));
        }

        let now = Utc::now();
        let user = User {
            id: self.last_id.fetch_add(1, Ordering::SeqCst) + 1,
            username: input.username.clone(),
            password_hash: input.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(username).cloned())
    }
}
