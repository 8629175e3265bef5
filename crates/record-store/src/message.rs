//! # Store Messages
//!
//! The requests a [`StoreClient`](crate::StoreClient) sends to its
//! [`RecordStore`](crate::RecordStore), one variant per table operation.

use crate::error::StoreError;
use crate::record::Record;
use tokio::sync::oneshot;

/// One-shot reply channel carried by every request.
pub type Reply<T> = oneshot::Sender<Result<T, StoreError>>;

/// A request addressed to a single table.
///
/// The payload types come from the row's [`Record`] implementation, so a crop patch can never
/// be sent to the orders table.
#[derive(Debug)]
pub enum StoreRequest<T: Record> {
    Create {
        params: T::Create,
        respond_to: Reply<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Reply<Option<T>>,
    },
    /// Full scan, filtered in memory, returned in id order.
    List {
        filter: T::Filter,
        respond_to: Reply<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Reply<T>,
    },
    Delete {
        id: T::Id,
        caller: T::Caller,
        respond_to: Reply<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Reply<T::ActionResult>,
    },
}
