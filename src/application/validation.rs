//! Request field validation shared by the use cases.
//!
//! All checks here run before any call to a collaborator.

use crate::domain::errors::DomainError;
use crate::domain::value_objects::KeySegment;

/// A field counts as present only when it holds non-whitespace text.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a present field into a key segment
pub fn key_segment(field: &'static str, value: &str) -> Result<KeySegment, DomainError> {
    KeySegment::parse(field, value)
}
