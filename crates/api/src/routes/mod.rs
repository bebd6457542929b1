pub mod auth;
pub mod health;
pub mod templates;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                  register (public)
/// /auth/login                     login (public)
///
/// /templates                      list (public), create (auth)
/// /templates/preview              render unsaved content (public)
/// /templates/{id}                 get (public), update, delete (auth)
/// /templates/{id}/render          render stored template (public)
/// /templates/{id}/variables       referenced variable names (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/templates", templates::router())
}
