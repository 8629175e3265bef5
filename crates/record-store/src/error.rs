//! # Store Errors
//!
//! Failures raised by the store plumbing itself. Errors produced by a row's own hooks travel
//! boxed inside [`StoreError::Record`] and can be recovered with
//! [`StoreError::into_record_error`].

/// Errors that can occur while talking to a [`RecordStore`](crate::RecordStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Record error: {0}")]
    Record(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Recovers the typed error a record hook returned.
    ///
    /// Any other variant, or a boxed error of a different type, is handed back unchanged.
    pub fn into_record_error<E>(self) -> Result<E, StoreError>
    where
        E: std::error::Error + 'static,
    {
        match self {
            StoreError::Record(inner) => inner
                .downcast::<E>()
                .map(|typed| *typed)
                .map_err(StoreError::Record),
            other => Err(other),
        }
    }
}
