//! Account registration and password login.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use stencil_core::error::CoreError;
use stencil_db::models::user::{CreateUser, UserResponse};
use stencil_db::store::UserStore;
use validator::Validate;

use crate::auth::jwt::{generate_access_token, JwtConfig};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};

/// Message for every failed login, so callers cannot tell which usernames exist.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 64, message = "Username must be 3 to 64 characters"))]
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt: JwtConfig,
    min_password_length: usize,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, jwt: JwtConfig, min_password_length: usize) -> Self {
        Self {
            users,
            jwt,
            min_password_length,
        }
    }

    pub fn jwt(&self) -> &JwtConfig {
        &self.jwt
    }

    /// Create an account. A taken username surfaces as a conflict.
    pub async fn register(&self, input: RegisterRequest) -> AppResult<UserResponse> {
        input.validate()?;
        validate_password_strength(&input.password, self.min_password_length)?;

        let password_hash = hash_password(&input.password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

        let user = self
            .users
            .create(&CreateUser {
                username: input.username,
                password_hash,
            })
            .await?;
        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user.into())
    }

    /// Exchange username and password for a bearer token.
    pub async fn login(&self, input: LoginRequest) -> AppResult<TokenResponse> {
        let user = self
            .users
            .find_by_username(&input.username)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

        let password_valid = verify_password(&input.password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
        if !password_valid {
            tracing::debug!(user_id = user.id, "Login rejected");
            return Err(AppError::Core(CoreError::Unauthorized(
                INVALID_CREDENTIALS.into(),
            )));
        }

        let access_token = generate_access_token(user.id, &user.username, &self.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
        tracing::info!(user_id = user.id, "User logged in");

        Ok(TokenResponse {
            access_token,
            token_type: "Bearer",
            expires_in: self.jwt.expires_in_secs(),
        })
    }
}
