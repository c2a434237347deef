use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Failed to access the persisted session: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Failed to serialize the session record: {0}")]
    Serialization(#[from] serde_json::Error),
}
