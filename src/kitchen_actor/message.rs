//! # Kitchen Messages
//!
//! Requests sent from a [`KitchenClient`](crate::clients::KitchenClient) to the
//! [`KitchenActor`](super::KitchenActor). Each carries a oneshot sender the actor
//! answers on.

use super::KitchenError;
use crate::manager::{KitchenSnapshot, OrderView, Placement};
use crate::model::{Order, OrderId, OrderTicket};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, KitchenError>>;

#[derive(Debug)]
pub enum KitchenRequest {
    /// Validate a ticket, stamp it and put it on a shelf.
    Place {
        ticket: OrderTicket,
        respond_to: Response<Placement>,
    },
    /// Courier arrival. Answers `false` if the order is already gone.
    Pickup {
        id: OrderId,
        respond_to: Response<bool>,
    },
    /// Remove every order whose value has reached zero.
    SweepDecay { respond_to: Response<Vec<Order>> },
    Get {
        id: OrderId,
        respond_to: Response<Option<OrderView>>,
    },
    Snapshot { respond_to: Response<KitchenSnapshot> },
}
