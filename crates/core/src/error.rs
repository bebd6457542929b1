use crate::types::DbId;

/// Reasons a piece of template text is rejected before it is stored or rendered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("Template content cannot be empty")]
    EmptyContent,

    #[error("Invalid placeholder format detected: {placeholder}")]
    MalformedPlaceholder { placeholder: String },

    #[error("Invalid variable name: {name}")]
    InvalidVariableName { name: String },
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("Invalid category '{value}'. Must be one of: {allowed}")]
    InvalidCategory { value: String, allowed: String },

    #[error("Render request must include a `variables` object")]
    MissingVariablesPayload,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
