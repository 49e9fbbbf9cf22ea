use thiserror::Error;

/// Failure of a storage backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend cannot be reached. The fallback store retries the operation locally.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    /// A uniqueness rule was violated. The message is safe to return to the client.
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Mongo(Box<mongodb::error::Error>),
}
