use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Missing required field: {0}")]
    EmptySegment(&'static str),

    #[error("Invalid {field}: {reason}")]
    InvalidSegment {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Storage key too long: {len} > {max} bytes")]
    KeyTooLong { len: usize, max: usize },
}
