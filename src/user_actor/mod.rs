//! # User Actor
//!
//! The users table: the identity provider the rest of the market resolves callers against.
//!
//! ## Structure
//!
//! - [`entity`] - [`Record`](record_store::Record) implementation for [`User`]
//! - [`error`] - [`UserError`]
//! - [`new()`] - Factory function that creates the store and client
//!
//! ## Usage
//!
//! ```rust
//! use farm_market::model::{Caller, UserCreate};
//! use farm_market::user_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (store, users) = user_actor::new(32);
//!
//!     // No dependencies, so context is ()
//!     tokio::spawn(store.run(()));
//!
//!     let id = users.sign_up(UserCreate::new("Alice", "alice@example.com")).await?;
//!     let caller = users.resolve(Some(id)).await?;
//!     assert_eq!(caller.id(), Some(id));
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::UserClient;
use crate::model::User;
use record_store::RecordStore;

/// Creates the users store and its client.
pub fn new(capacity: usize) -> (RecordStore<User>, UserClient) {
    let (store, inner) = RecordStore::new(capacity);
    (store, UserClient::new(inner))
}
