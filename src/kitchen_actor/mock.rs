//! # Mock Kitchen & Testing Guide
//!
//! Collaborators of the kitchen (the courier [`Dispatcher`](crate::dispatch::Dispatcher),
//! the [`KitchenSystem`](crate::lifecycle::KitchenSystem) producer loop) only ever see a
//! [`KitchenClient`]. This module hands out clients backed by a channel the test
//! controls, so those collaborators can be tested without spawning a real actor.
//!
//! | Approach | Use Case |
//! |----------|----------|
//! | [`create_mock_client`] + `expect_*` | Step through requests one at a time and answer each by hand |
//! | [`MockKitchen`] | Script all answers up front, then [`verify`](MockKitchen::verify) |
//! | Real [`KitchenActor`](super::KitchenActor) | Testing shelf semantics themselves |
//!
//! ```rust
//! use kitchen_shelves::kitchen_actor::mock::MockKitchen;
//! use kitchen_shelves::model::OrderId;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockKitchen::new();
//!     mock.expect_pickup(OrderId(1)).return_ok(true);
//!     mock.expect_pickup(OrderId(1)).return_ok(false);
//!
//!     let client = mock.client();
//!     assert!(client.pickup(OrderId(1)).await.unwrap());
//!     assert!(!client.pickup(OrderId(1)).await.unwrap());
//!
//!     mock.verify().await;
//! }
//! ```

use super::{KitchenError, KitchenRequest};
use crate::clients::KitchenClient;
use crate::manager::{KitchenSnapshot, Placement};
use crate::model::{OrderId, OrderTicket};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation {
    Place {
        response: Result<Placement, KitchenError>,
    },
    Pickup {
        id: OrderId,
        response: Result<bool, KitchenError>,
    },
    Snapshot {
        response: Result<KitchenSnapshot, KitchenError>,
    },
}

#[derive(Default)]
struct Script {
    expectations: VecDeque<Expectation>,
    failures: Vec<String>,
    placed: Vec<OrderTicket>,
}

/// A scripted kitchen that answers requests from a queue of expectations.
///
/// Expectations are consumed strictly in order. A request that does not match
/// the next expectation is recorded as a failure and left unanswered, which the
/// caller observes as [`KitchenError::ActorDropped`].
pub struct MockKitchen {
    client: KitchenClient,
    script: Arc<Mutex<Script>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl Default for MockKitchen {
    fn default() -> Self {
        Self::new()
    }
}

impl MockKitchen {
    /// Creates a new mock with no expectations. Must be called inside a runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<KitchenRequest>(100);
        let script = Arc::new(Mutex::new(Script::default()));
        let script_clone = script.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut script = script_clone.lock().unwrap();
                let expectation = script.expectations.pop_front();

                match (request, expectation) {
                    (
                        KitchenRequest::Place { ticket, respond_to },
                        Some(Expectation::Place { response }),
                    ) => {
                        script.placed.push(ticket);
                        let _ = respond_to.send(response);
                    }
                    (
                        KitchenRequest::Pickup { id, respond_to },
                        Some(Expectation::Pickup {
                            id: expected,
                            response,
                        }),
                    ) => {
                        if id == expected {
                            let _ = respond_to.send(response);
                        } else {
                            script
                                .failures
                                .push(format!("pickup for {id}, expected {expected}"));
                        }
                    }
                    (
                        KitchenRequest::Snapshot { respond_to },
                        Some(Expectation::Snapshot { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        script.failures.push(format!("unexpected request {request:?}"));
                    }
                }
            }
        });

        Self {
            client: KitchenClient::new(sender),
            script,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> KitchenClient {
        self.client.clone()
    }

    pub fn expect_place(&mut self) -> PlaceExpectationBuilder {
        PlaceExpectationBuilder {
            script: self.script.clone(),
        }
    }

    pub fn expect_pickup(&mut self, id: OrderId) -> PickupExpectationBuilder {
        PickupExpectationBuilder {
            id,
            script: self.script.clone(),
        }
    }

    pub fn expect_snapshot(&mut self) -> SnapshotExpectationBuilder {
        SnapshotExpectationBuilder {
            script: self.script.clone(),
        }
    }

    /// Tickets received by `place`, in arrival order.
    pub fn placed_tickets(&self) -> Vec<OrderTicket> {
        self.script.lock().unwrap().placed.clone()
    }

    /// Asserts that every expectation was consumed and nothing unexpected arrived.
    ///
    /// Yields once first so requests already in the channel are processed.
    pub async fn verify(&self) {
        tokio::task::yield_now().await;
        let script = self.script.lock().unwrap();
        if !script.failures.is_empty() {
            panic!("Mock kitchen saw unexpected requests: {:?}", script.failures);
        }
        if !script.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                script.expectations.len()
            );
        }
    }
}

pub struct PlaceExpectationBuilder {
    script: Arc<Mutex<Script>>,
}

impl PlaceExpectationBuilder {
    pub fn return_ok(self, placement: Placement) {
        self.push(Ok(placement));
    }

    pub fn return_err(self, error: KitchenError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Placement, KitchenError>) {
        let mut script = self.script.lock().unwrap();
        script.expectations.push_back(Expectation::Place { response });
    }
}

pub struct PickupExpectationBuilder {
    id: OrderId,
    script: Arc<Mutex<Script>>,
}

impl PickupExpectationBuilder {
    pub fn return_ok(self, picked_up: bool) {
        self.push(Ok(picked_up));
    }

    pub fn return_err(self, error: KitchenError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<bool, KitchenError>) {
        let mut script = self.script.lock().unwrap();
        script.expectations.push_back(Expectation::Pickup {
            id: self.id,
            response,
        });
    }
}

pub struct SnapshotExpectationBuilder {
    script: Arc<Mutex<Script>>,
}

impl SnapshotExpectationBuilder {
    pub fn return_ok(self, snapshot: KitchenSnapshot) {
        let mut script = self.script.lock().unwrap();
        script.expectations.push_back(Expectation::Snapshot {
            response: Ok(snapshot),
        });
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a client whose requests land on a receiver the test owns.
pub fn create_mock_client(buffer_size: usize) -> (KitchenClient, mpsc::Receiver<KitchenRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (KitchenClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is a `Place`.
pub async fn expect_place(
    receiver: &mut mpsc::Receiver<KitchenRequest>,
) -> Option<(OrderTicket, oneshot::Sender<Result<Placement, KitchenError>>)> {
    match receiver.recv().await {
        Some(KitchenRequest::Place { ticket, respond_to }) => Some((ticket, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a `Pickup`.
pub async fn expect_pickup(
    receiver: &mut mpsc::Receiver<KitchenRequest>,
) -> Option<(OrderId, oneshot::Sender<Result<bool, KitchenError>>)> {
    match receiver.recv().await {
        Some(KitchenRequest::Pickup { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ShelfKind, Temperature};

    #[tokio::test]
    async fn test_mock_kitchen_answers_in_order() {
        let mut mock = MockKitchen::new();
        mock.expect_place().return_ok(Placement {
            order_id: OrderId(1),
            shelf: Some(ShelfKind::Frozen),
            evicted: None,
        });
        mock.expect_pickup(OrderId(1)).return_ok(true);

        let client = mock.client();
        let ticket = OrderTicket::new("Popsicle", Temperature::Frozen, 345.0, 0.75);
        let placement = client.place(ticket).await.unwrap();
        assert_eq!(placement.shelf, Some(ShelfKind::Frozen));
        assert!(client.pickup(OrderId(1)).await.unwrap());

        assert_eq!(mock.placed_tickets()[0].name, "Popsicle");
        mock.verify().await;
    }

    #[tokio::test]
    async fn test_mismatched_pickup_is_left_unanswered() {
        let mut mock = MockKitchen::new();
        mock.expect_pickup(OrderId(1)).return_ok(true);

        let client = mock.client();
        assert!(matches!(
            client.pickup(OrderId(2)).await,
            Err(KitchenError::ActorDropped)
        ));
    }
}
