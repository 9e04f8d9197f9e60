use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("action `{action}` is disabled for this row")]
    ActionDisabled { action: String },

    #[error("unknown sort direction: {0}")]
    InvalidSortDirection(String),

    #[error("invalid page size: {0}")]
    InvalidPageSize(i64),
}
