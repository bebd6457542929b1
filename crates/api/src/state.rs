use std::sync::Arc;

use stencil_db::store::{TemplateStore, UserStore};

use crate::config::ServerConfig;
use crate::services::{AuthService, TemplateService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Template CRUD and rendering.
    pub templates: Arc<TemplateService>,
    /// Registration and login.
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Wire the services onto the chosen store implementations.
    pub fn new(
        config: ServerConfig,
        template_store: Arc<dyn TemplateStore>,
        user_store: Arc<dyn UserStore>,
    ) -> Self {
        let auth = AuthService::new(user_store, config.jwt.clone(), config.min_password_length);
        Self {
            templates: Arc::new(TemplateService::new(template_store)),
            auth: Arc::new(auth),
            config: Arc::new(config),
        }
    }
}
