use std::fmt;

use thiserror::Error;

/// Which record table an id was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PrepError {
    /// A record lacks an attribute the feature builder needs.
    #[error("record has no '{column}' attribute")]
    MissingAttribute { column: String },

    #[error("attribute '{column}' is not numeric: '{value}'")]
    NonNumericAttribute { column: String, value: String },

    /// No record with this id exists in the table.
    #[error("{side} table has no record with id {id}")]
    RecordNotFound { side: Side, id: i64 },

    #[error("missing column '{column}'")]
    MissingColumn { column: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Record ids must be strictly ascending.
    #[error("record ids not strictly ascending at row {position}: {previous} then {id}")]
    UnsortedIds { position: usize, previous: i64, id: i64 },

    #[error("row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("config validation error: {0}")]
    ConfigValidation(String),
}

pub type Result<T> = std::result::Result<T, PrepError>;
