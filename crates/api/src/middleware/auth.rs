//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use stencil_core::error::CoreError;
use stencil_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// Add it as a handler parameter to require a valid token:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?;

        let claims = validate_token(token.trim(), &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        Ok(AuthUser {
            user_id: claims.sub,
            username: claims.username,
        })
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use axum::http::Request;
    use stencil_db::store::{MemoryTemplateStore, MemoryUserStore};

    use super::*;
    use crate::auth::jwt::{generate_access_token, JwtConfig};
    use crate::config::{ServerConfig, StoreBackend};

    fn state() -> AppState {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: Vec::new(),
            request_timeout_secs: 30,
            store: StoreBackend::Memory,
            jwt: JwtConfig {
                secret: "extractor-secret".to_string(),
                access_token_expiry_mins: 5,
            },
            min_password_length: 8,
        };
        AppState::new(
            config,
            Arc::new(MemoryTemplateStore::new()),
            Arc::new(MemoryUserStore::new()),
        )
    }

    async fn extract(state: &AppState, header: Option<String>) -> Result<AuthUser, AppError> {
        let mut builder = Request::builder().uri("/api/v1/templates");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        AuthUser::from_request_parts(&mut parts, state).await
    }

    #[tokio::test]
    async fn bearer_token_yields_id_and_username() {
        let state = state();
        let token = generate_access_token(7, "ana", &state.config.jwt).unwrap();

        let user = extract(&state, Some(format!("Bearer {token}"))).await.unwrap();
        assert_eq!(user.user_id, 7);
        assert_eq!(user.username, "ana");
    }

    #[tokio::test]
    async fn missing_or_malformed_header_is_unauthorized() {
        let state = state();

        let err = extract(&state, None).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Unauthorized(ref m)) if m == "Missing Authorization header");

        let err = extract(&state, Some("Token abc".to_string())).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Unauthorized(_)));

        let err = extract(&state, Some("Bearer not-a-jwt".to_string())).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Unauthorized(ref m)) if m == "Invalid or expired token");
    }
}
