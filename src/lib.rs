//! # Farm Market
//!
//! The service core of a marketplace where farmers list crops and customers order them:
//! listing management, ordering, and the dashboard figures (views, sales, revenue).
//!
//! ## Design
//!
//! Each table (users, crops, orders) is a [`record_store::RecordStore`] running in its own
//! Tokio task. Requests are served one at a time, so an ownership check and the write it
//! guards, or a counter increment, happen as a single transaction. There are no locks.
//!
//! Identity is explicit. Every operation that cares who is asking takes a
//! [`&Caller`](model::Caller), resolved up front by [`UserClient::resolve`](clients::UserClient::resolve).
//!
//! ## Module Tour
//!
//! ### 1. The Rows ([`model`])
//! Records and DTOs, serialized with the camelCase field names of the stored documents.
//!
//! ### 2. The Tables ([`user_actor`], [`crop_actor`], [`order_actor`])
//! [`Record`](record_store::Record) implementations: authorization, counters, and status
//! transitions.
//!
//! ### 3. The Interface ([`clients`])
//! [`CropClient`](clients::CropClient) and [`OrderClient`](clients::OrderClient) expose the
//! market operations; store failures come back as typed errors.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`MarketSystem`](lifecycle::MarketSystem) spawns and wires the tables and shuts them down.
//!
//! Also: [`analytics`] for the farmer dashboard and [`config`] for [`MarketConfig`](config::MarketConfig).
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod analytics;
pub mod clients;
pub mod config;
pub mod crop_actor;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod user_actor;
