//! Handlers for the `/templates` resource.
//!
//! Reads, rendering and preview are public; create, update and delete
//! require a bearer token.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use stencil_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::services::templates::{
    CreateTemplateRequest, PreviewRequest, RenderRequest, UpdateTemplateRequest,
};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /templates
// ---------------------------------------------------------------------------

/// List templates, newest first, one page at a time.
pub async fn list_templates(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = state.templates.list(params.into()).await?;
    Ok(Json(page))
}

// ---------------------------------------------------------------------------
// POST /templates
// ---------------------------------------------------------------------------

pub async fn create_template(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTemplateRequest>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(user_id = auth.user_id, username = %auth.username, "Creating template");
    let created = state.templates.create(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /templates/{id}
// ---------------------------------------------------------------------------

pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let template = state.templates.get(id).await?;
    Ok(Json(DataResponse { data: template }))
}

// ---------------------------------------------------------------------------
// PATCH /templates/{id}
// ---------------------------------------------------------------------------

pub async fn update_template(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTemplateRequest>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(user_id = auth.user_id, username = %auth.username, id, "Updating template");
    let updated = state.templates.update(id, input).await?;
    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /templates/{id}
// ---------------------------------------------------------------------------

pub async fn delete_template(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    tracing::debug!(user_id = auth.user_id, username = %auth.username, id, "Deleting template");
    state.templates.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// POST /templates/{id}/render
// ---------------------------------------------------------------------------

/// Render a stored template with the supplied variables.
///
/// A missing or unreadable body is treated as a request without a
/// `variables` object, so the client gets `MISSING_VARIABLES` in the
/// usual JSON envelope instead of the extractor's plain-text rejection.
pub async fn render_template(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Result<Json<RenderRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => {
            tracing::debug!(id, error = %rejection.body_text(), "Render body rejected");
            RenderRequest::default()
        }
    };
    let output = state.templates.render(id, input).await?;
    Ok(Json(output))
}

// ---------------------------------------------------------------------------
// GET /templates/{id}/variables
// ---------------------------------------------------------------------------

pub async fn template_variables(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let names = state.templates.variables(id).await?;
    Ok(Json(DataResponse { data: names }))
}

// ---------------------------------------------------------------------------
// POST /templates/preview
// ---------------------------------------------------------------------------

/// Render unsaved content; nothing is persisted.
pub async fn preview_template(
    State(state): State<AppState>,
    body: Result<Json<PreviewRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let output = state.templates.preview(input)?;
    Ok(Json(output))
}
