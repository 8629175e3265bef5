//! # Record Store
//!
//! In-process tables for resource-oriented services. Each table is an actor: one Tokio task
//! owns the rows and serves requests that arrive over a bounded channel, one at a time.
//!
//! ## Why one task per table?
//!
//! - **Transactions for free**: a request is handled start to finish before the next one is
//!   looked at, so read-modify-write operations (counters, status changes, ownership checks
//!   followed by a patch) are atomic without locks.
//! - **Isolation**: tables only talk to each other through their clients.
//! - **Uniform API**: Create, Get, List, Update, Delete and custom Actions look the same for
//!   every row type.
//!
//! See [Actors with Tokio](https://ryhl.io/blog/actors-with-tokio/) for the underlying pattern.
//!
//! ## Layers
//!
//! 1. **Row layer** ([`Record`]): the row type, its DTOs and hooks.
//! 2. **Runtime layer** ([`RecordStore`]): the task that owns the rows.
//! 3. **Interface layer** ([`StoreClient`], [`TableClient`]): typed requests and replies.
//!
//! ## Context Injection
//!
//! Dependencies are passed to [`RecordStore::run`], not to [`RecordStore::new`]. A table whose
//! hooks need another table receives that table's client as its `Context`:
//!
//! ```rust
//! use record_store::{Record, RecordStore, StoreClient};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Field { id: u32 }
//! #[derive(Debug, thiserror::Error)] #[error("field error")] struct FieldError;
//!
//! #[async_trait]
//! impl Record for Field {
//!     type Id = u32; type Create = (); type Update = (); type Filter = (); type Caller = ();
//!     type Action = (); type ActionResult = (); type Context = (); type Error = FieldError;
//!     fn from_create_params(id: u32, _: ()) -> Result<Self, FieldError> { Ok(Self { id }) }
//!     fn matches(&self, _: &()) -> bool { true }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), FieldError> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), FieldError> { Ok(()) }
//! }
//!
//! #[derive(Clone, Debug)] struct Harvest { id: u32, field: u32 }
//! #[derive(Debug, thiserror::Error)] #[error("unknown field")] struct HarvestError;
//!
//! #[async_trait]
//! impl Record for Harvest {
//!     type Id = u32; type Create = u32; type Update = (); type Filter = (); type Caller = ();
//!     type Action = (); type ActionResult = ();
//!     type Context = StoreClient<Field>;
//!     type Error = HarvestError;
//!
//!     fn from_create_params(id: u32, field: u32) -> Result<Self, HarvestError> {
//!         Ok(Self { id, field })
//!     }
//!     fn matches(&self, _: &()) -> bool { true }
//!
//!     // Refuse harvests for fields that do not exist.
//!     async fn on_create(&mut self, fields: &StoreClient<Field>) -> Result<(), HarvestError> {
//!         match fields.get(self.field).await {
//!             Ok(Some(_)) => Ok(()),
//!             _ => Err(HarvestError),
//!         }
//!     }
//!     async fn on_update(&mut self, _: (), _: &StoreClient<Field>) -> Result<(), HarvestError> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &StoreClient<Field>) -> Result<(), HarvestError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (field_store, fields) = RecordStore::<Field>::new(8);
//!     let (harvest_store, harvests) = RecordStore::<Harvest>::new(8);
//!     tokio::spawn(field_store.run(()));
//!     tokio::spawn(harvest_store.run(fields.clone()));
//!
//!     let field = fields.create(()).await.unwrap();
//!     assert!(harvests.create(field).await.is_ok());
//!     assert!(harvests.create(99).await.is_err());
//! }
//! ```
//!
//! ## Testing
//!
//! The [`mock`] module provides [`mock::MockStore`], a scripted stand-in for a table.

pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod record;
pub mod store;
pub mod table;

pub use client::StoreClient;
pub use error::StoreError;
pub use message::{Reply, StoreRequest};
pub use record::Record;
pub use store::RecordStore;
pub use table::TableClient;
