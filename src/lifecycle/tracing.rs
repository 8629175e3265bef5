//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by `RUST_LOG`.
//!
//! The module path prefix is hidden (`with_target(false)`); every store event already carries
//! a `record_type` field naming its table.
//!
//! ## What Gets Traced
//!
//! - **Store lifecycle**: `Store started` and `Shutdown` with the final row count
//! - **Row operations**: Created, Updated, Deleted, Action ok / Action failed
//! - **Client calls**: one `#[instrument]` span per client method
//! - **Integrity warnings**: order totals that disagree with the crop price
//!
//! ```bash
//! # Lifecycle and writes
//! RUST_LOG=info cargo run
//!
//! # Full request payloads
//! RUST_LOG=debug cargo run
//!
//! # Only the store runtime
//! RUST_LOG=record_store=debug cargo run
//! ```
//!
//! ```text
//! INFO Store started record_type="Crop"
//! INFO create: Created record_type="Crop" id=crop_1 size=1
//! WARN create:create: Submitted total does not match quantity x price per unit order=order_1 ...
//! ```

/// Installs the global subscriber. Call once, at the start of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
