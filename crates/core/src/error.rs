/// Domain-level error shared by every layer above the repository.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The storage collaborator failed. In-memory copies held by the caller
    /// may now be stale and should be reloaded.
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Wrap a backend error (sqlx, I/O, ...) as a storage failure.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage(Box::new(err))
    }
}

/// Convenience alias used by the repository trait and the store service.
pub type CoreResult<T> = Result<T, CoreError>;
