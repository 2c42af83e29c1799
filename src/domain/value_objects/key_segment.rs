use crate::domain::errors::DomainError;

/// One `/`-free component of a storage key (user, category, label or file name).
///
/// Values are kept verbatim; only blank values and values that would change
/// the shape of the key are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeySegment(String);

impl KeySegment {
    pub fn parse(field: &'static str, value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(DomainError::EmptySegment(field));
        }

        if value.contains('/') {
            return Err(DomainError::InvalidSegment {
                field,
                reason: "must not contain '/'",
            });
        }

        if value == "." || value == ".." {
            return Err(DomainError::InvalidSegment {
                field,
                reason: "must not be a relative path component",
            });
        }

        if value.chars().any(char::is_control) {
            return Err(DomainError::InvalidSegment {
                field,
                reason: "must not contain control characters",
            });
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for KeySegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
