//! Runtime orchestration and lifecycle management.
//!
//! - [`KitchenSystem`] - spawns the kitchen actor, the decay sweeper and the
//!   courier dispatcher, feeds orders in and shuts everything down
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod kitchen_system;
pub mod tracing;

pub use kitchen_system::*;
pub use tracing::*;
