//! # System Lifecycle
//!
//! Creating, wiring and stopping the market's tables.
//!
//! ## Dependency Injection via Context
//!
//! Stores are created without their dependencies and receive them through `run(context)`:
//!
//! ```rust,ignore
//! let (crop_store, crops) = crop_actor::new(capacity);
//! let (order_store, orders) = order_actor::new(capacity, crops.clone());
//!
//! tokio::spawn(crop_store.run(()));
//! tokio::spawn(order_store.run(OrderContext { crops: crops.clone(), transitions }));
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients**: closes the sender side of each channel
//! 2. **Stores detect closure**: `receiver.recv()` returns `None` once queued requests are served
//! 3. **Await completion**: [`MarketSystem::shutdown`] joins every task
//!
//! Clients held inside a store's context are clones. They keep the upstream table alive only
//! until the holding store exits.

pub mod market_system;
pub mod tracing;

pub use self::market_system::*;
pub use self::tracing::*;
