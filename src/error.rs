use thiserror::Error;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("trade {0} not found")]
    NotFound(String),

    /// Closed trades are immutable; the only remaining operation is delete.
    #[error("trade {0} is closed and can no longer be modified")]
    TradeClosed(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
