//! Error types for the kitchen actor.

use crate::model::OrderError;
use crate::source::SourceError;
use thiserror::Error;

/// Errors surfaced by the kitchen actor, its client and the system around it.
///
/// Losing a race (a pickup finding its order already wasted) is *not* an error;
/// those outcomes are plain `bool`s.
#[derive(Debug, Error)]
pub enum KitchenError {
    #[error("Kitchen actor closed")]
    ActorClosed,

    #[error("Kitchen actor dropped response channel")]
    ActorDropped,

    #[error("Invalid order: {0}")]
    InvalidOrder(#[from] OrderError),

    #[error("Order source failed: {0}")]
    Source(#[from] SourceError),

    #[error("Shutdown failed: {0}")]
    Shutdown(String),
}
