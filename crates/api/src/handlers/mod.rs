pub mod auth;
pub mod templates;
