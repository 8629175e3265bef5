//! Type-safe wrappers around [`StoreClient`](record_store::StoreClient).

pub mod crop_client;
pub mod order_client;
pub mod user_client;

pub use crop_client::*;
pub use order_client::*;
pub use user_client::*;
