//! Placeholder syntax, content validation and variable extraction.
//!
//! A placeholder is `{{ name }}` or `{{ name | default }}`. Whitespace around
//! the name, the pipe and the default is insignificant. Names are identifiers
//! (`[A-Za-z_][A-Za-z0-9_]*`), optionally joined with dots (`user.name`);
//! a dotted name is one opaque key into the flat variable map.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::ContentError;

/// Regex pattern matching one placeholder token.
///
/// Group 1 is the raw name, group 2 the optional default clause including its
/// leading `|`. Neither may contain braces.
pub const PLACEHOLDER_PATTERN: &str = r"\{\{([^{}|]*)(\|[^{}]*)?\}\}";

/// Regex pattern a trimmed placeholder name must match in full.
pub const VARIABLE_NAME_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*$";

/// Compiled placeholder regex. `Regex` keeps no match position between calls,
/// so sharing one instance never couples separate scans.
pub(crate) static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

static VARIABLE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VARIABLE_NAME_PATTERN).expect("valid regex"));

/// One placeholder occurrence, borrowed from the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// The whole token, braces included.
    pub token: &'a str,
    /// Trimmed variable name (may be empty for malformed tokens).
    pub name: &'a str,
    /// Trimmed default literal, if a `|` clause was present.
    pub default: Option<&'a str>,
}

impl<'a> Placeholder<'a> {
    pub(crate) fn from_captures(caps: &Captures<'a>) -> Self {
        let token = caps.get(0).map_or("", |m| m.as_str());
        let name = caps.get(1).map_or("", |m| m.as_str().trim());
        let default = caps.get(2).map(|m| m.as_str()[1..].trim());
        Self {
            token,
            name,
            default,
        }
    }
}

/// Scan `text` left to right and yield every placeholder occurrence.
pub fn placeholders(text: &str) -> impl Iterator<Item = Placeholder<'_>> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .map(|caps| Placeholder::from_captures(&caps))
}

/// Returns `true` if `name` is a valid (optionally dotted) identifier.
pub fn is_valid_variable_name(name: &str) -> bool {
    VARIABLE_NAME_RE.is_match(name)
}

/// Validate a single text field before it is persisted or rendered.
///
/// Checks, in order:
/// 1. the text is not empty or all whitespace;
/// 2. no placeholder has an empty name (`{{ | x }}`, `{{ }}`);
/// 3. every placeholder name is a valid identifier. The first offending name
///    in scan order is reported.
pub fn validate_content(text: &str) -> Result<(), ContentError> {
    if text.trim().is_empty() {
        return Err(ContentError::EmptyContent);
    }

    if let Some(p) = placeholders(text).find(|p| p.name.is_empty()) {
        return Err(ContentError::MalformedPlaceholder {
            placeholder: p.token.to_string(),
        });
    }

    if let Some(p) = placeholders(text).find(|p| !is_valid_variable_name(p.name)) {
        return Err(ContentError::InvalidVariableName {
            name: p.name.to_string(),
        });
    }

    Ok(())
}

/// Collect the distinct variable names referenced by `text`.
///
/// Default clauses are ignored and duplicates collapse. Tokens with an empty
/// name are skipped; callers validate first.
pub fn extract_variables(text: &str) -> BTreeSet<String> {
    placeholders(text)
        .filter(|p| !p.name.is_empty())
        .map(|p| p.name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // -- placeholders --

    #[test]
    fn parses_name_and_default_with_whitespace() {
        let found: Vec<_> = placeholders("{{  amount |  $0.00  }}").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "amount");
        assert_eq!(found[0].default, Some("$0.00"));
        assert_eq!(found[0].token, "{{  amount |  $0.00  }}");
    }

    #[test]
    fn default_keeps_inner_pipes() {
        let p = placeholders("{{ sep | a | b }}").next().unwrap();
        assert_eq!(p.name, "sep");
        assert_eq!(p.default, Some("a | b"));
    }

    #[test]
    fn unterminated_token_is_not_a_placeholder() {
        assert_eq!(placeholders("Hello {{ name").count(), 0);
    }

    // -- validate_content --

    #[test]
    fn accepts_plain_placeholders() {
        assert!(validate_content("Hi {{ name }}").is_ok());
        assert!(validate_content("Hi {{name}}").is_ok());
    }

    #[test]
    fn accepts_defaults_and_dotted_names() {
        assert!(validate_content("{{ name | friend }}").is_ok());
        assert!(validate_content("{{ user.name }}").is_ok());
        assert!(validate_content("{{ _private.value_2 | x }}").is_ok());
    }

    #[test]
    fn accepts_text_without_placeholders() {
        assert!(validate_content("No variables here.").is_ok());
    }

    #[test]
    fn rejects_empty_and_whitespace_content() {
        assert_eq!(validate_content(""), Err(ContentError::EmptyContent));
        assert_eq!(validate_content("  \n\t "), Err(ContentError::EmptyContent));
    }

    #[test]
    fn rejects_pipe_without_name() {
        let err = validate_content("Hello {{ | foo }}").unwrap_err();
        assert_matches!(err, ContentError::MalformedPlaceholder { ref placeholder } if placeholder == "{{ | foo }}");
    }

    #[test]
    fn rejects_empty_braces() {
        assert_matches!(
            validate_content("Hello {{ }}"),
            Err(ContentError::MalformedPlaceholder { .. })
        );
    }

    #[test]
    fn malformed_takes_precedence_over_bad_names() {
        assert_matches!(
            validate_content("{{ 1bad }} then {{ | x }}"),
            Err(ContentError::MalformedPlaceholder { .. })
        );
    }

    #[test]
    fn rejects_name_starting_with_digit() {
        assert_eq!(
            validate_content("{{ 1bad }}"),
            Err(ContentError::InvalidVariableName {
                name: "1bad".to_string()
            })
        );
    }

    #[test]
    fn rejects_names_with_spaces_or_symbols() {
        assert_matches!(
            validate_content("{{ first name }}"),
            Err(ContentError::InvalidVariableName { ref name }) if name == "first name"
        );
        assert_matches!(
            validate_content("{{ price$ }}"),
            Err(ContentError::InvalidVariableName { ref name }) if name == "price$"
        );
        assert_matches!(
            validate_content("{{ user..name }}"),
            Err(ContentError::InvalidVariableName { .. })
        );
    }

    #[test]
    fn reports_first_invalid_name() {
        assert_matches!(
            validate_content("{{ ok }} {{ 2nd }} {{ 3rd }}"),
            Err(ContentError::InvalidVariableName { ref name }) if name == "2nd"
        );
    }

    // -- extract_variables --

    #[test]
    fn extracts_distinct_names_ignoring_defaults() {
        let vars = extract_variables("{{ b }} {{ a | x }} {{ b | y }} {{a}}");
        assert_eq!(vars.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn extraction_is_independent_of_order_and_duplication() {
        let forward = extract_variables("{{ x }} {{ y }} {{ z }}");
        let shuffled = extract_variables("{{ z }}{{ x }}{{ z }}{{ y }}{{ x }}");
        assert_eq!(forward, shuffled);
        assert_eq!(forward.len(), 3);
    }

    #[test]
    fn extracts_dotted_names_verbatim() {
        let vars = extract_variables("{{ user.name }} and {{ user.email | none }}");
        assert!(vars.contains("user.name"));
        assert!(vars.contains("user.email"));
    }

    #[test]
    fn no_placeholders_yields_empty_set() {
        assert!(extract_variables("plain text").is_empty());
    }
}
