//! # Record Trait
//!
//! The `Record` trait is the contract every table row type (users, crops, orders, …) implements
//! to be stored by a [`RecordStore`](crate::RecordStore). It names the DTOs used to create,
//! patch, filter and act on a record, plus the hooks the store calls while it owns the row.
//!
//! # Provided Methods (Hooks)
//! - [`Record::on_create`]
//! - [`Record::on_delete`]
//!
//! The defaults do nothing (`Ok(())`). Implement them when a table needs to consult a
//! neighbouring table on insert, or to authorize removals.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// A row type that can live in a [`RecordStore`](crate::RecordStore).
///
/// # Async & Context
/// The hooks are `#[async_trait]` so they may await other stores. The `Context` type is handed
/// to every hook by [`RecordStore::run`](crate::RecordStore::run), which lets tables be wired to
/// each other after they have been constructed.
///
/// # Atomicity
/// The store applies `on_update` and `handle_action` to a draft copy and only commits the draft
/// when the hook returns `Ok`. A hook that fails half way through therefore never leaves a
/// partially patched row behind.
#[async_trait]
pub trait Record: Clone + Debug + Send + Sync + 'static {
    /// Row identifier. Ids are allocated from a `u32` sequence starting at 1, and `Ord` gives
    /// scans their storage order.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload used to insert a new row.
    type Create: Send + Sync + Debug;

    /// Payload used to patch an existing row.
    type Update: Send + Sync + Debug;

    /// Predicate payload for [`StoreClient::list`](crate::StoreClient::list).
    type Filter: Send + Sync + Debug;

    /// Identity presented when deleting a row. Use `()` for tables without ownership.
    type Caller: Send + Sync + Debug;

    /// Row-specific operations beyond CRUD (e.g. counter increments).
    type Action: Send + Sync + Debug;

    /// Result of a row-specific operation.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected at `run()` time. Use `()` when none are needed.
    type Context: Send + Sync;

    /// One error enum per table.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the row from its allocated id and the create payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Returns true when the row satisfies `filter`.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Called after `from_create_params` and before the row is inserted.
    /// Returning an error aborts the insert.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies a patch.
    async fn on_update(&mut self, update: Self::Update, ctx: &Self::Context)
        -> Result<(), Self::Error>;

    /// Called before the row is removed. Returning an error keeps the row.
    async fn on_delete(&self, _caller: &Self::Caller, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handles a row-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
