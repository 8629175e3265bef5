//! # Record Store Task
//!
//! `RecordStore<T>` owns one table and serves it from a single Tokio task. Requests are handled
//! strictly one after another, so every request is a transaction: read-modify-write actions
//! such as counter increments cannot lose updates, however many clients send them at once.

use crate::client::StoreClient;
use crate::error::StoreError;
use crate::message::{Reply, StoreRequest};
use crate::record::Record;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The server half of a table.
///
/// It owns the rows (`records`) and the receiving end of the request channel. No `Mutex` is
/// needed around the rows: the run loop is the only code that ever touches them.
///
/// # Usage Pattern
///
/// 1.  **Create**: `RecordStore::new()` returns the store and a cloneable [`StoreClient`].
/// 2.  **Wire**: pass dependencies (other clients) into `store.run(context)`.
/// 3.  **Run**: spawn `run` on the Tokio runtime.
///
/// ```rust
/// use record_store::{Record, RecordStore};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Tag { id: u32, label: String }
/// #[derive(Debug)] struct TagCreate(String);
/// #[derive(Debug, thiserror::Error)] #[error("tag error")] struct TagError;
///
/// #[async_trait]
/// impl Record for Tag {
///     type Id = u32;
///     type Create = TagCreate;
///     type Update = String;
///     type Filter = ();
///     type Caller = ();
///     type Action = ();
///     type ActionResult = ();
///     type Context = ();
///     type Error = TagError;
///
///     fn from_create_params(id: u32, params: TagCreate) -> Result<Self, TagError> {
///         Ok(Self { id, label: params.0 })
///     }
///     fn matches(&self, _: &()) -> bool { true }
///     async fn on_update(&mut self, label: String, _: &()) -> Result<(), TagError> {
///         self.label = label;
///         Ok(())
///     }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (store, client) = RecordStore::<Tag>::new(8);
///     tokio::spawn(store.run(()));
///
///     let id = client.create(TagCreate("organic".into())).await.unwrap();
///     assert_eq!(client.get(id).await.unwrap().unwrap().label, "organic");
/// }
/// ```
pub struct RecordStore<T: Record> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    records: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: Record> RecordStore<T> {
    /// Creates a store and its client.
    ///
    /// `capacity` bounds the request channel; when it is full, clients wait for room.
    pub fn new(capacity: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(capacity);
        let store = Self {
            receiver,
            records: BTreeMap::new(),
            next_id: 1,
        };
        (store, StoreClient::new(sender))
    }

    /// Serves requests until every client has been dropped.
    ///
    /// `context` is lent to each record hook for the lifetime of the loop.
    pub async fn run(mut self, context: T::Context) {
        // "Crop" rather than "farm_market::model::crop::Crop"
        let record_type = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown");
        info!(record_type, "Store started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                StoreRequest::Create { params, respond_to } => {
                    debug!(record_type, ?params, "Create");
                    self.create(record_type, params, respond_to, &context).await;
                }
                StoreRequest::Get { id, respond_to } => {
                    let record = self.records.get(&id).cloned();
                    debug!(record_type, %id, found = record.is_some(), "Get");
                    let _ = respond_to.send(Ok(record));
                }
                StoreRequest::List { filter, respond_to } => {
                    let matched: Vec<T> = self
                        .records
                        .values()
                        .filter(|record| record.matches(&filter))
                        .cloned()
                        .collect();
                    debug!(record_type, ?filter, matched = matched.len(), "Listed");
                    let _ = respond_to.send(Ok(matched));
                }
                StoreRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(record_type, %id, ?update, "Update");
                    self.update(record_type, id, update, respond_to, &context)
                        .await;
                }
                StoreRequest::Delete {
                    id,
                    caller,
                    respond_to,
                } => {
                    debug!(record_type, %id, ?caller, "Delete");
                    self.delete(record_type, id, caller, respond_to, &context)
                        .await;
                }
                StoreRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(record_type, %id, ?action, "Action");
                    self.act(record_type, id, action, respond_to, &context).await;
                }
            }
        }

        info!(record_type, size = self.records.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        record_type: &str,
        params: T::Create,
        respond_to: Reply<T::Id>,
        context: &T::Context,
    ) {
        let id = T::Id::from(self.next_id);

        let mut record = match T::from_create_params(id.clone(), params) {
            Ok(record) => record,
            Err(e) => {
                warn!(record_type, error = %e, "Create failed");
                let _ = respond_to.send(Err(StoreError::Record(Box::new(e))));
                return;
            }
        };
        if let Err(e) = record.on_create(context).await {
            warn!(record_type, error = %e, "on_create failed");
            let _ = respond_to.send(Err(StoreError::Record(Box::new(e))));
            return;
        }

        // Only consume the id once the row is actually stored.
        self.next_id += 1;
        self.records.insert(id.clone(), record);
        info!(record_type, %id, size = self.records.len(), "Created");
        let _ = respond_to.send(Ok(id));
    }

    async fn update(
        &mut self,
        record_type: &str,
        id: T::Id,
        update: T::Update,
        respond_to: Reply<T>,
        context: &T::Context,
    ) {
        let Some(mut draft) = self.records.get(&id).cloned() else {
            warn!(record_type, %id, "Not found");
            let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
            return;
        };

        match draft.on_update(update, context).await {
            Ok(()) => {
                self.records.insert(id.clone(), draft.clone());
                info!(record_type, %id, "Updated");
                let _ = respond_to.send(Ok(draft));
            }
            Err(e) => {
                warn!(record_type, %id, error = %e, "Update failed");
                let _ = respond_to.send(Err(StoreError::Record(Box::new(e))));
            }
        }
    }

    async fn delete(
        &mut self,
        record_type: &str,
        id: T::Id,
        caller: T::Caller,
        respond_to: Reply<()>,
        context: &T::Context,
    ) {
        let Some(record) = self.records.get(&id) else {
            warn!(record_type, %id, "Not found");
            let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
            return;
        };

        if let Err(e) = record.on_delete(&caller, context).await {
            warn!(record_type, %id, error = %e, "on_delete failed");
            let _ = respond_to.send(Err(StoreError::Record(Box::new(e))));
            return;
        }

        self.records.remove(&id);
        info!(record_type, %id, size = self.records.len(), "Deleted");
        let _ = respond_to.send(Ok(()));
    }

    async fn act(
        &mut self,
        record_type: &str,
        id: T::Id,
        action: T::Action,
        respond_to: Reply<T::ActionResult>,
        context: &T::Context,
    ) {
        let Some(mut draft) = self.records.get(&id).cloned() else {
            warn!(record_type, %id, "Not found");
            let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
            return;
        };

        match draft.handle_action(action, context).await {
            Ok(result) => {
                self.records.insert(id.clone(), draft);
                info!(record_type, %id, "Action ok");
                let _ = respond_to.send(Ok(result));
            }
            Err(e) => {
                warn!(record_type, %id, error = %e, "Action failed");
                let _ = respond_to.send(Err(StoreError::Record(Box::new(e))));
            }
        }
    }
}
