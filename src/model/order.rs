//! Represents a single food item travelling from the kitchen to a courier.
//!
//! # Lifecycle
//! A ticket arrives from the order source, the kitchen actor stamps it with an
//! [`OrderId`] and a placement time, and from then on the order lives on exactly
//! one shelf until it is picked up, decays to zero, or is evicted.
//!
//! See [`Order::new`] for the validation applied to incoming tickets.

use crate::decay;
use crate::model::{OrderError, Temperature};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::Duration;
use tokio::time::Instant;

/// Type-safe identifier for Orders.
///
/// Order names are not unique, so the kitchen hands out its own ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// An order record as produced by the order source.
///
/// Field names follow the camelCase used by the order feed:
///
/// ```json
/// {"name": "Banana Split", "temp": "frozen", "shelfLife": 20, "decayRate": 0.63}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTicket {
    pub name: String,
    pub temp: Temperature,
    /// Nominal shelf life in seconds.
    pub shelf_life: f64,
    pub decay_rate: f64,
}

impl OrderTicket {
    pub fn new(
        name: impl Into<String>,
        temp: Temperature,
        shelf_life: f64,
        decay_rate: f64,
    ) -> Self {
        Self {
            name: name.into(),
            temp,
            shelf_life,
            decay_rate,
        }
    }
}

/// A validated order that has been accepted by the kitchen.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub name: String,
    pub temp: Temperature,
    pub shelf_life: f64,
    pub decay_rate: f64,
    /// Set once, when the kitchen accepts the order.
    pub placed_at: Instant,
}

impl Order {
    /// Validates a ticket and stamps it with its id and placement time.
    ///
    /// # Errors
    /// - [`OrderError::InvalidShelfLife`] if the shelf life is not a finite positive number.
    /// - [`OrderError::InvalidDecayRate`] if the decay rate is negative or not finite.
    pub fn new(id: OrderId, ticket: OrderTicket, placed_at: Instant) -> Result<Self, OrderError> {
        if !ticket.shelf_life.is_finite() || ticket.shelf_life <= 0.0 {
            return Err(OrderError::InvalidShelfLife(ticket.shelf_life));
        }
        if !ticket.decay_rate.is_finite() || ticket.decay_rate < 0.0 {
            return Err(OrderError::InvalidDecayRate(ticket.decay_rate));
        }
        Ok(Self {
            id,
            name: ticket.name,
            temp: ticket.temp,
            shelf_life: ticket.shelf_life,
            decay_rate: ticket.decay_rate,
            placed_at,
        })
    }

    /// Time elapsed since placement. Saturates at zero for `now` before placement.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.placed_at)
    }

    /// Normalized freshness of this order at `now` on a shelf with `decay_modifier`.
    pub fn value(&self, decay_modifier: f64, now: Instant) -> f64 {
        decay::value(self, decay_modifier, self.age(now).as_secs_f64())
    }
}
