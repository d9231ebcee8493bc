//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter that hides the
//! module prefix (`with_target(false)`). Levels come from `RUST_LOG`; without it the
//! subscriber logs at `info`.
//!
//! ```bash
//! # Placements, pickups and waste
//! RUST_LOG=info cargo run -- --orders orders.json
//!
//! # Every request, courier dispatch and full ticket payloads
//! RUST_LOG=debug cargo run -- --orders orders.json
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: start, shutdown and final statistics
//! - **Placement**: assigned shelf, evicted victim, live order count
//! - **Waste**: every order discarded by decay, eviction or a full overflow shelf
//! - **Couriers**: each runs in a `courier` span carrying its `order_id`
//!
//! With `RUST_LOG=info` a short run reads like:
//!
//! ```text
//! INFO ingestion: Placed order_id=order_1 shelf=Some(Frozen) evicted=None live=1
//! INFO ingestion: Placed order_id=order_2 shelf=Some(Overflow) evicted=None live=2
//! INFO courier: Picked up order_id=order_1 shelf=frozen value=0.93
//! INFO Order decayed order_id=order_2 shelf=overflow name=Banana Split
//! ```

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
