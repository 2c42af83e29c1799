//! Storage key construction.
//!
//! Keys are hierarchical: `{user}/{category}/{label}[/{filename}]`. The
//! functions here are pure string builders; inputs are expected to be
//! validated [`KeySegment`](crate::domain::value_objects::KeySegment)s.

use crate::domain::errors::DomainError;

pub const SEPARATOR: char = '/';

/// Largest key the object store accepts, in UTF-8 bytes.
pub const MAX_KEY_LENGTH: usize = 1024;

/// `{user}/{category}/{label}`, used as a listing prefix.
pub fn build_prefix(user: &str, category: &str, label: &str) -> String {
    format!("{user}{SEPARATOR}{category}{SEPARATOR}{label}")
}

/// `{user}/{category}/`, the listing prefix when no label is given.
pub fn build_category_prefix(user: &str, category: &str) -> String {
    format!("{user}{SEPARATOR}{category}{SEPARATOR}")
}

/// `{user}/{category}/{label}/`, the folder a document's files live under.
/// This is also the key of the folder marker object.
pub fn build_folder_prefix(user: &str, category: &str, label: &str) -> String {
    let mut prefix = build_prefix(user, category, label);
    prefix.push(SEPARATOR);
    prefix
}

/// Append a file name to a prefix, inserting a separator only when needed.
pub fn build_key(prefix: &str, filename: &str) -> String {
    if prefix.ends_with(SEPARATOR) {
        format!("{prefix}{filename}")
    } else {
        format!("{prefix}{SEPARATOR}{filename}")
    }
}

/// Last `/`-delimited segment of a key. Folder markers yield an empty name.
pub fn display_name(key: &str) -> &str {
    key.rsplit(SEPARATOR).next().unwrap_or(key)
}

pub fn ensure_key_length(key: &str) -> Result<(), DomainError> {
    if key.len() > MAX_KEY_LENGTH {
        return Err(DomainError::KeyTooLong {
            len: key.len(),
            max: MAX_KEY_LENGTH,
        });
    }
    Ok(())
}
