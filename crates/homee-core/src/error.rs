use thiserror::Error;

/// Errors parsing symbolic names into core types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("unknown attribute type '{0}'")]
    UnknownAttributeType(String),

    #[error("unknown homee mode '{0}'")]
    UnknownMode(String),

    #[error("entity_id must contain exactly one '.' separator: '{0}'")]
    InvalidEntityId(String),
}
