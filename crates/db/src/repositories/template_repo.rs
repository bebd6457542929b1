//! Repository for the `templates` table.

use sqlx::types::Json;
use sqlx::PgPool;
use stencil_core::types::DbId;

use crate::models::template::{CreateTemplate, Template, UpdateTemplate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, content, category, created_at, updated_at";

/// Provides CRUD operations for templates.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Insert a new template, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTemplate) -> Result<Template, sqlx::Error> {
        let query = format!(
            "INSERT INTO templates (title, description, content, category)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(Json(&input.content))
            .bind(input.category.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a template by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates WHERE id = $1");
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of templates, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Template>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM templates ORDER BY id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of templates.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM templates")
            .fetch_one(pool)
            .await
    }

    /// Update a template. Only non-`None` fields in `input` are applied;
    /// `updated_at` is always refreshed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTemplate,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!(
            "UPDATE templates SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                content = COALESCE($4, content),
                category = COALESCE($5, category),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.content.as_ref().map(Json))
            .bind(input.category.map(|c| c.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a template by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
