//! Crop catalog resource logic, including the view and sale counters.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CropClient;
use crate::model::Crop;
use record_store::RecordStore;

/// Creates the crops store and its client.
pub fn new(capacity: usize) -> (RecordStore<Crop>, CropClient) {
    let (store, inner) = RecordStore::new(capacity);
    (store, CropClient::new(inner))
}
