//! Order resource logic: placement, per-role listings and status changes.

pub mod entity;
pub mod error;
pub mod transition;

pub use error::*;
pub use transition::*;

use crate::clients::{CropClient, OrderClient};
use crate::model::Order;
use record_store::RecordStore;
use std::sync::Arc;

/// Dependencies the orders table receives at `run()` time.
#[derive(Clone)]
pub struct OrderContext {
    pub crops: CropClient,
    pub transitions: Arc<dyn TransitionPolicy>,
}

/// Creates the orders store and its client.
///
/// The client needs the crops table to look up the crop an order is placed against.
pub fn new(capacity: usize, crops: CropClient) -> (RecordStore<Order>, OrderClient) {
    let (store, inner) = RecordStore::new(capacity);
    (store, OrderClient::new(inner, crops))
}
