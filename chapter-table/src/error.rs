//! Table engine errors

/// Errors raised by the table engine.
///
/// Stale selection references are not errors; they are dropped silently.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// Two column definitions share an id.
    #[error("Duplicate column id: {0}")]
    DuplicateColumnId(String),

    /// A filter, visibility, sort or click mutation named a column that is not
    /// registered.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}

pub type Result<T> = std::result::Result<T, TableError>;
