//! Field validation shared by job and knowledge write paths.
//!
//! # Invariants
//! - Validation runs before any storage write; a failure means nothing
//!   was persisted.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(ftp|http|https|hyper|tel|file|magnet):(//)?[^\s$.?#].[^\s]*$")
        .expect("valid url regex")
});

/// Input rejected before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is empty or whitespace-only.
    MissingField(&'static str),
    /// URL does not carry an accepted scheme or is malformed.
    InvalidUrl(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::InvalidUrl(value) => write!(f, "invalid url: `{value}`"),
        }
    }
}

impl Error for ValidationError {}

/// Rejects empty or whitespace-only values for a required field.
pub fn require_non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// Returns whether `value` matches the accepted URI scheme pattern.
///
/// Accepted schemes: ftp, http, https, hyper, tel, file, magnet.
pub fn is_valid_url(value: &str) -> bool {
    URL_RE.is_match(value)
}

/// Validates an optional URL; empty input is treated as "no URL".
pub fn validate_optional_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || is_valid_url(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidUrl(value.to_string()))
    }
}

/// Trims an optional text field, collapsing blank input to `None`.
pub fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
