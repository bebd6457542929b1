//! Template use cases: CRUD, rendering and variable reporting.
//!
//! Handlers stay thin and call into [`TemplateService`], which owns the
//! validation order (title, then content, then category) and talks to the
//! store through the [`TemplateStore`] interface only.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use stencil_core::category::normalize_category;
use stencil_core::content::{extract_content_variables, validate_text_content, TextContent};
use stencil_core::error::CoreError;
use stencil_core::pagination::{Page, PageRequest};
use stencil_core::render::{render_template, RenderOutput};
use stencil_core::types::{DbId, Variables};
use stencil_db::models::template::{CreateTemplate, Template, UpdateTemplate};
use stencil_db::store::TemplateStore;
use validator::Validate;

use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /templates`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTemplateRequest {
    #[validate(length(min = 1, max = 150, message = "Title must be 1 to 150 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub content: TextContent,
    #[serde(default)]
    pub category: Option<String>,
}

/// Request body for `PATCH /templates/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTemplateRequest {
    #[validate(length(min = 1, max = 150, message = "Title must be 1 to 150 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<TextContent>,
    pub category: Option<String>,
}

/// Request body for `POST /templates/{id}/render`.
#[derive(Debug, Default, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub variables: Option<Value>,
}

/// Request body for `POST /templates/preview`.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub content: TextContent,
    #[serde(default)]
    pub variables: Option<Value>,
}

/// Accept only a JSON object as the variables payload.
fn require_variables(variables: Option<Value>) -> Result<Variables, CoreError> {
    match variables {
        Some(Value::Object(map)) => Ok(map),
        _ => Err(CoreError::MissingVariablesPayload),
    }
}

fn require_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title cannot be blank".into()));
    }
    Ok(())
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Template",
        id,
    })
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

pub struct TemplateService {
    store: Arc<dyn TemplateStore>,
}

impl TemplateService {
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a new template.
    pub async fn create(&self, input: CreateTemplateRequest) -> AppResult<Template> {
        input.validate()?;
        require_title(&input.title)?;
        validate_text_content(&input.content)?;
        let category = normalize_category(input.category.as_deref()).assert_valid()?;

        let created = self
            .store
            .create(&CreateTemplate {
                title: input.title,
                description: input.description,
                content: input.content,
                category,
            })
            .await?;
        tracing::info!(id = created.id, category = %created.category, "Template created");
        Ok(created)
    }

    pub async fn get(&self, id: DbId) -> AppResult<Template> {
        self.store.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// One page of templates, newest first.
    pub async fn list(&self, request: PageRequest) -> AppResult<Page<Template>> {
        let (items, total) = self.store.list(request.limit, request.offset()).await?;
        tracing::debug!(count = items.len(), total, page = request.page, "Listed templates");
        Ok(Page::new(items, total, request))
    }

    /// Apply a partial update. Content and category are checked only when present.
    pub async fn update(&self, id: DbId, input: UpdateTemplateRequest) -> AppResult<Template> {
        input.validate()?;
        if let Some(title) = &input.title {
            require_title(title)?;
        }
        if let Some(content) = &input.content {
            validate_text_content(content)?;
        }
        let category = match input.category.as_deref() {
            Some(raw) => Some(normalize_category(Some(raw)).assert_valid()?),
            None => None,
        };

        let patch = UpdateTemplate {
            title: input.title,
            description: input.description,
            content: input.content,
            category,
        };
        let updated = self
            .store
            .update(id, &patch)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(id, "Template updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(id, "Template deleted");
        Ok(())
    }

    /// Render a stored template.
    ///
    /// The payload shape is checked before the store is consulted.
    pub async fn render(&self, id: DbId, input: RenderRequest) -> AppResult<RenderOutput> {
        let variables = require_variables(input.variables)?;
        let template = self.get(id).await?;
        let output = render_template(&template.content, &variables)?;
        tracing::debug!(id, detected = output.variables.len(), "Template rendered");
        Ok(output)
    }

    /// Sorted variable names a stored template references.
    pub async fn variables(&self, id: DbId) -> AppResult<BTreeSet<String>> {
        let template = self.get(id).await?;
        validate_text_content(&template.content)?;
        Ok(extract_content_variables(&template.content))
    }

    /// Render unsaved content.
    pub fn preview(&self, input: PreviewRequest) -> AppResult<RenderOutput> {
        let variables = require_variables(input.variables)?;
        Ok(render_template(&input.content, &variables)?)
    }

    /// Whether the backing store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.store.ping().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;
    use stencil_core::category::Category;
    use stencil_core::content::RenderedContent;
    use stencil_core::error::ContentError;
    use stencil_db::store::MemoryTemplateStore;

    use super::*;

    fn service() -> TemplateService {
        TemplateService::new(Arc::new(MemoryTemplateStore::new()))
    }

    fn create_request(content: &str, category: Option<&str>) -> CreateTemplateRequest {
        CreateTemplateRequest {
            title: "Invoice".to_string(),
            description: None,
            content: content.into(),
            category: category.map(str::to_string),
        }
    }

    fn render_request(variables: Value) -> RenderRequest {
        RenderRequest {
            variables: Some(variables),
        }
    }

    #[tokio::test]
    async fn lowercase_category_is_persisted_canonically() {
        let svc = service();
        let created = svc.create(create_request("Hi {{ name }}", Some("email"))).await.unwrap();
        assert_eq!(created.category, Category::Email);

        let fetched = svc.get(created.id).await.unwrap();
        assert_eq!(fetched.category, Category::Email);
    }

    #[tokio::test]
    async fn missing_category_defaults_to_other() {
        let created = service().create(create_request("x", None)).await.unwrap();
        assert_eq!(created.category, Category::Other);
    }

    #[tokio::test]
    async fn unknown_category_is_rejected() {
        let err = service()
            .create(create_request("Hi", Some("nonsense")))
            .await
            .unwrap_err();
        assert_matches!(
            err,
            AppError::Core(CoreError::InvalidCategory { ref value, .. }) if value == "nonsense"
        );
    }

    #[tokio::test]
    async fn content_is_checked_before_category() {
        let err = service()
            .create(create_request("{{ | x }}", Some("nonsense")))
            .await
            .unwrap_err();
        assert_matches!(
            err,
            AppError::Core(CoreError::Content(ContentError::MalformedPlaceholder { .. }))
        );
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let mut request = create_request("x", None);
        request.title = "   ".to_string();
        let err = service().create(request).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn overlong_title_fails_validator() {
        let mut request = create_request("x", None);
        request.title = "t".repeat(151);
        let err = service().create(request).await.unwrap_err();
        assert_matches!(err, AppError::Invalid(_));
    }

    #[tokio::test]
    async fn render_missing_template_is_not_found() {
        let err = service()
            .render(999, render_request(json!({})))
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::NotFound { id: 999, .. }));
    }

    #[tokio::test]
    async fn render_without_variables_object_fails_before_lookup() {
        // The id does not exist, so reaching the store would yield NotFound.
        let err = service()
            .render(999, RenderRequest::default())
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::MissingVariablesPayload));

        let err = service()
            .render(999, render_request(json!(["name"])))
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::MissingVariablesPayload));
    }

    #[tokio::test]
    async fn render_stored_template() {
        let svc = service();
        let created = svc
            .create(create_request(
                "Hello {{ name }}, your invoice is {{ amount | $0.00 }}",
                Some("Invoice"),
            ))
            .await
            .unwrap();

        let output = svc
            .render(created.id, render_request(json!({"name": "Ana"})))
            .await
            .unwrap();
        assert_eq!(
            output.rendered_content,
            RenderedContent::Plain("Hello Ana, your invoice is $0.00".to_string())
        );
        assert_eq!(
            output.variables.into_iter().collect::<Vec<_>>(),
            vec!["amount".to_string(), "name".to_string()]
        );
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let svc = service();
        let created = svc.create(create_request("Hi {{ name }}", Some("blog"))).await.unwrap();

        let updated = svc
            .update(
                created.id,
                UpdateTemplateRequest {
                    title: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.content, created.content);
        assert_eq!(updated.category, Category::Blog);
    }

    #[tokio::test]
    async fn update_rejects_bad_content_and_category() {
        let svc = service();
        let created = svc.create(create_request("Hi", None)).await.unwrap();

        let err = svc
            .update(
                created.id,
                UpdateTemplateRequest {
                    content: Some("{{ 1bad }}".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_matches!(
            err,
            AppError::Core(CoreError::Content(ContentError::InvalidVariableName { ref name }))
                if name == "1bad"
        );

        let err = svc
            .update(
                created.id,
                UpdateTemplateRequest {
                    category: Some("Recipes".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::InvalidCategory { .. }));
    }

    #[tokio::test]
    async fn update_and_delete_missing_template_are_not_found() {
        let svc = service();
        let err = svc
            .update(7, UpdateTemplateRequest::default())
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::NotFound { id: 7, .. }));

        let err = svc.delete(7).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::NotFound { id: 7, .. }));
    }

    #[tokio::test]
    async fn list_pages_newest_first() {
        let svc = service();
        for i in 0..3 {
            svc.create(CreateTemplateRequest {
                title: format!("T{i}"),
                ..create_request("x", None)
            })
            .await
            .unwrap();
        }

        let page = svc.list(PageRequest::new(Some(1), Some(2))).await.unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.last_page, 2);
        let titles: Vec<_> = page.data.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["T2", "T1"]);

        let page = svc.list(PageRequest::new(Some(2), Some(2))).await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].title, "T0");
    }

    #[tokio::test]
    async fn variables_of_structured_template() {
        let svc = service();
        let content: TextContent = serde_json::from_value(json!({
            "subject": "Order {{ order_id }}",
            "body": "Hi {{ name }}, order {{ order_id }} shipped",
        }))
        .unwrap();
        let created = svc
            .create(CreateTemplateRequest {
                content,
                ..create_request("x", None)
            })
            .await
            .unwrap();

        let names: Vec<_> = svc.variables(created.id).await.unwrap().into_iter().collect();
        assert_eq!(names, ["name", "order_id"]);
    }

    #[test]
    fn preview_renders_without_persisting() {
        let output = service()
            .preview(PreviewRequest {
                content: "{{ greeting | Hello }}, {{ who }}!".into(),
                variables: Some(json!({"who": "world"})),
            })
            .unwrap();
        assert_eq!(
            output.rendered_content,
            RenderedContent::Plain("Hello, world!".to_string())
        );
    }
}
