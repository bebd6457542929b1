//! Use-case layer between handlers and the stores.

pub mod auth;
pub mod templates;

pub use auth::AuthService;
pub use templates::TemplateService;
