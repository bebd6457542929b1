//! Template content shapes.
//!
//! Content is either a single text blob or an object of named text fields
//! (e.g. `subject` and `body`). Validation, extraction and rendering all work
//! per field; a plain blob is simply a content with one unnamed field.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::placeholder::{extract_variables, validate_content};

/// Stored template text.
///
/// Serialized untagged: a JSON string is [`TextContent::Plain`], a JSON object
/// of strings is [`TextContent::Structured`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextContent {
    Plain(String),
    Structured(BTreeMap<String, String>),
}

impl TextContent {
    /// Iterate over `(field_name, text)` pairs. Plain content has no field name.
    pub fn fields(&self) -> Box<dyn Iterator<Item = (Option<&str>, &str)> + '_> {
        match self {
            TextContent::Plain(text) => Box::new(std::iter::once((None, text.as_str()))),
            TextContent::Structured(fields) => Box::new(
                fields
                    .iter()
                    .map(|(name, text)| (Some(name.as_str()), text.as_str())),
            ),
        }
    }
}

impl From<&str> for TextContent {
    fn from(text: &str) -> Self {
        TextContent::Plain(text.to_string())
    }
}

impl From<String> for TextContent {
    fn from(text: String) -> Self {
        TextContent::Plain(text)
    }
}

/// Validate every field of `content`.
///
/// A structured content with no fields counts as empty.
pub fn validate_text_content(content: &TextContent) -> Result<(), ContentError> {
    if let TextContent::Structured(fields) = content {
        if fields.is_empty() {
            return Err(ContentError::EmptyContent);
        }
    }
    content
        .fields()
        .try_for_each(|(_, text)| validate_content(text))
}

/// Union of the variable names referenced by all fields of `content`.
pub fn extract_content_variables(content: &TextContent) -> BTreeSet<String> {
    content
        .fields()
        .flat_map(|(_, text)| extract_variables(text))
        .collect()
}

/// Rendered counterpart of [`TextContent`], keeping the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RenderedContent {
    Plain(String),
    Structured(BTreeMap<String, String>),
}
