/// Errors raised by repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The caller passed a record that cannot be written as-is.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The backend failed; any open transaction was rolled back.
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}
