//! # TableClient Trait
//!
//! Domain clients wrap a [`StoreClient`] and translate [`StoreError`] into their own error
//! type. Implementing `TableClient` gives them the read paths (`get`, `scan`) for free.
use crate::{Record, StoreClient, StoreError};
use async_trait::async_trait;

/// Shared read operations for table-specific clients.
///
/// # Example
///
/// ```rust
/// use record_store::{Record, StoreClient, StoreError, TableClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Tag { id: u32 }
/// #[derive(Debug, thiserror::Error)] #[error("tag error: {0}")] struct TagError(String);
///
/// #[async_trait]
/// impl Record for Tag {
///     type Id = u32; type Create = (); type Update = (); type Filter = (); type Caller = ();
///     type Action = (); type ActionResult = (); type Context = (); type Error = TagError;
///     fn from_create_params(id: u32, _: ()) -> Result<Self, TagError> { Ok(Self { id }) }
///     fn matches(&self, _: &()) -> bool { true }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
/// }
///
/// struct TagClient { inner: StoreClient<Tag> }
///
/// #[async_trait]
/// impl TableClient<Tag> for TagClient {
///     type Error = TagError;
///     fn inner(&self) -> &StoreClient<Tag> { &self.inner }
///     fn map_error(e: StoreError) -> TagError { TagError(e.to_string()) }
/// }
///
/// async fn usage(client: TagClient) {
///     let _ = client.get(1).await;
///     let _ = client.scan(()).await;
/// }
/// ```
#[async_trait]
pub trait TableClient<T: Record>: Send + Sync {
    /// The table-specific error type.
    type Error: Send + Sync;

    /// The wrapped store handle.
    fn inner(&self) -> &StoreClient<T>;

    /// Converts store failures into the table's error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetches a row by id. Absence is `Ok(None)`, not an error.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Scans the table with `filter`.
    #[tracing::instrument(skip(self))]
    async fn scan(&self, filter: T::Filter) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(filter).await.map_err(Self::map_error)
    }
}
