//! Template entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use stencil_core::category::Category;
use stencil_core::content::TextContent;
use stencil_core::types::{DbId, Timestamp};

/// A template row from the `templates` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Template {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(json)]
    pub content: TextContent,
    #[sqlx(try_from = "String")]
    pub category: Category,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a template. Content and category are already validated.
#[derive(Debug, Clone)]
pub struct CreateTemplate {
    pub title: String,
    pub description: Option<String>,
    pub content: TextContent,
    pub category: Category,
}

/// DTO for a partial update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTemplate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<TextContent>,
    pub category: Option<Category>,
}
