//! Placeholder substitution engine.
//!
//! Rendering is a single left-to-right pass: substituted values and defaults
//! are never scanned again, so variable values cannot inject placeholders.

use std::collections::BTreeSet;

use regex::Captures;
use serde::Serialize;
use serde_json::Value;

use crate::content::{
    extract_content_variables, validate_text_content, RenderedContent, TextContent,
};
use crate::error::CoreError;
use crate::placeholder::{Placeholder, PLACEHOLDER_RE};
use crate::types::Variables;

/// Result of a render request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderOutput {
    pub rendered_content: RenderedContent,
    /// Every variable name the template references, sorted.
    pub variables: BTreeSet<String>,
}

/// Textual form of a variable value, or `None` when it is null.
///
/// Strings are used as-is, numbers and booleans in their canonical form,
/// arrays and objects as compact JSON.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Substitute every placeholder in `text`.
///
/// Lookup uses the trimmed name as an exact key. A missing or null value
/// falls back to the default clause, then to the empty string; this never
/// fails.
pub fn render(text: &str, variables: &Variables) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let placeholder = Placeholder::from_captures(caps);
            variables
                .get(placeholder.name)
                .and_then(value_to_text)
                .or_else(|| placeholder.default.map(str::to_string))
                .unwrap_or_default()
        })
        .into_owned()
}

/// Render each field of `content` independently.
pub fn render_content(content: &TextContent, variables: &Variables) -> RenderedContent {
    match content {
        TextContent::Plain(text) => RenderedContent::Plain(render(text, variables)),
        TextContent::Structured(fields) => RenderedContent::Structured(
            fields
                .iter()
                .map(|(name, text)| (name.clone(), render(text, variables)))
                .collect(),
        ),
    }
}

/// Full render pipeline: validate, extract, substitute.
///
/// Validation is a hard gate; nothing is substituted when it fails.
pub fn render_template(
    content: &TextContent,
    variables: &Variables,
) -> Result<RenderOutput, CoreError> {
    validate_text_content(content)?;
    let detected = extract_content_variables(content);
    let rendered_content = render_content(content, variables);
    Ok(RenderOutput {
        rendered_content,
        variables: detected,
    })
}
