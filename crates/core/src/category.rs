//! Template categories.
//!
//! Categories form a closed set stored with canonical casing. Incoming values
//! go through two steps: [`normalize_category`] maps case variants onto the
//! canonical member (and blank input onto [`Category::Other`]) but passes
//! unknown text through untouched; [`CategoryCandidate::assert_valid`] then
//! rejects anything that is still not a member.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Closed classification tag attached to every template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Email,
    #[serde(rename = "Landing Page")]
    LandingPage,
    Invoice,
    Portfolio,
    Blog,
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 6] = [
        Category::Email,
        Category::LandingPage,
        Category::Invoice,
        Category::Portfolio,
        Category::Blog,
        Category::Other,
    ];

    /// Canonical label, as persisted.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Email => "Email",
            Category::LandingPage => "Landing Page",
            Category::Invoice => "Invoice",
            Category::Portfolio => "Portfolio",
            Category::Blog => "Blog",
            Category::Other => "Other",
        }
    }

    /// Case-insensitive lookup of a label (surrounding whitespace ignored).
    pub fn parse(label: &str) -> Option<Category> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(label))
    }

    /// Comma-separated list of the canonical labels, used in error messages.
    pub fn allowed_values() -> String {
        Self::ALL.map(Category::as_str).join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Category {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        normalize_category(Some(&value)).assert_valid()
    }
}

/// Result of [`normalize_category`]: either a known member or the raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryCandidate {
    Known(Category),
    Raw(String),
}

impl CategoryCandidate {
    /// Textual form of the candidate (canonical label or the raw input).
    pub fn as_str(&self) -> &str {
        match self {
            CategoryCandidate::Known(c) => c.as_str(),
            CategoryCandidate::Raw(raw) => raw,
        }
    }

    /// Accept a known member, reject raw input with [`CoreError::InvalidCategory`].
    pub fn assert_valid(self) -> Result<Category, CoreError> {
        match self {
            CategoryCandidate::Known(c) => Ok(c),
            CategoryCandidate::Raw(value) => Err(CoreError::InvalidCategory {
                value,
                allowed: Category::allowed_values(),
            }),
        }
    }
}

/// Map user input onto a category candidate.
///
/// - absent or blank input becomes [`Category::Other`];
/// - a case-insensitive match becomes the canonical member;
/// - anything else is returned unchanged as [`CategoryCandidate::Raw`].
pub fn normalize_category(input: Option<&str>) -> CategoryCandidate {
    match input {
        None => CategoryCandidate::Known(Category::Other),
        Some(raw) if raw.trim().is_empty() => CategoryCandidate::Known(Category::Other),
        Some(raw) => match Category::parse(raw) {
            Some(category) => CategoryCandidate::Known(category),
            None => CategoryCandidate::Raw(raw.to_string()),
        },
    }
}
