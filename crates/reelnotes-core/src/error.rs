use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to prepare database location: {0}")]
    Io(#[from] std::io::Error),

    #[error("pool size must be at least 1")]
    InvalidPoolSize,
}

/// What the front end gets back from the orchestrator
///
/// Source failures are logged and collapsed into `NotFound`; the message is
/// meant to be shown to the user as is.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("failed to save review: {0}")]
    Store(#[from] StoreError),
}
