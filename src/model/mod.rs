//! Pure data structures (rows and DTOs) stored by the [`record_store`] tables.

pub mod caller;
pub mod crop;
pub mod order;
pub mod user;

pub use caller::*;
pub use crop::*;
pub use order::*;
pub use user::*;
