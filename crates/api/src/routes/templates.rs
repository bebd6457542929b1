use axum::routing::{get, post};
use axum::Router;

use crate::handlers::templates;
use crate::state::AppState;

/// Template routes -- mounted at `/templates`.
///
/// ```text
/// GET    /                     list_templates
/// POST   /                     create_template
/// POST   /preview              preview_template
/// GET    /{id}                 get_template
/// PATCH  /{id}                 update_template
/// DELETE /{id}                 delete_template
/// POST   /{id}/render          render_template
/// GET    /{id}/variables       template_variables
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(templates::list_templates).post(templates::create_template),
        )
        .route("/preview", post(templates::preview_template))
        .route(
            "/{id}",
            get(templates::get_template)
                .patch(templates::update_template)
                .delete(templates::delete_template),
        )
        .route("/{id}/render", post(templates::render_template))
        .route("/{id}/variables", get(templates::template_variables))
}
