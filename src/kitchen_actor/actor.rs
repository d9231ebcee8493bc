//! # Kitchen Actor
//!
//! The single serialization point for shelf state. The actor owns the
//! [`ShelfManager`] and the receiving end of the request channel, and handles one
//! request at a time, so placement, pickup and decay for any order can never
//! interleave. No `Mutex` is involved: exclusive ownership inside the task is
//! the lock.
//!
//! Decay is also applied lazily: every `Place` and `Snapshot` sweeps first, so a
//! dead order never occupies a slot a live one needs and is never reported.

use super::{KitchenError, KitchenRequest};
use crate::clients::KitchenClient;
use crate::manager::ShelfManager;
use crate::model::{Order, OrderId};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub struct KitchenActor {
    receiver: mpsc::Receiver<KitchenRequest>,
    manager: ShelfManager,
    next_id: u64,
}

impl KitchenActor {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` bounds the request channel; callers wait for space when it
    /// is full.
    pub fn new(manager: ShelfManager, buffer_size: usize) -> (Self, KitchenClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            manager,
            next_id: 1,
        };
        (actor, KitchenClient::new(sender))
    }

    /// Processes requests until every client has been dropped.
    pub async fn run(mut self) {
        info!("Kitchen actor started");
        while let Some(msg) = self.receiver.recv().await {
            self.handle(msg, Instant::now());
        }
        let stats = self.manager.stats();
        info!(live = self.manager.live_count(), ?stats, "Shutdown");
    }

    fn handle(&mut self, msg: KitchenRequest, now: Instant) {
        match msg {
            KitchenRequest::Place { ticket, respond_to } => {
                debug!(?ticket, "Place");
                let id = OrderId::from(self.next_id);
                self.next_id += 1;

                match Order::new(id, ticket, now) {
                    Ok(order) => {
                        self.manager.sweep_decay(now);
                        let placement = self.manager.place(order, now);
                        info!(
                            order_id = %id,
                            shelf = ?placement.shelf,
                            evicted = ?placement.evicted.as_ref().map(|o| o.id),
                            live = self.manager.live_count(),
                            "Placed"
                        );
                        let _ = respond_to.send(Ok(placement));
                    }
                    Err(e) => {
                        warn!(order_id = %id, error = %e, "Order rejected");
                        self.manager.record_rejected();
                        let _ = respond_to.send(Err(KitchenError::InvalidOrder(e)));
                    }
                }
            }
            KitchenRequest::Pickup { id, respond_to } => {
                let picked_up = self.manager.pickup(id, now);
                debug!(order_id = %id, picked_up, "Pickup");
                let _ = respond_to.send(Ok(picked_up));
            }
            KitchenRequest::SweepDecay { respond_to } => {
                let wasted = self.manager.sweep_decay(now);
                if !wasted.is_empty() {
                    info!(count = wasted.len(), live = self.manager.live_count(), "Swept");
                }
                let _ = respond_to.send(Ok(wasted));
            }
            KitchenRequest::Get { id, respond_to } => {
                let view = self.manager.get(id, now);
                debug!(order_id = %id, found = view.is_some(), "Get");
                let _ = respond_to.send(Ok(view));
            }
            KitchenRequest::Snapshot { respond_to } => {
                self.manager.sweep_decay(now);
                let snapshot = self.manager.snapshot(now);
                debug!(live = snapshot.live_count(), "Snapshot");
                let _ = respond_to.send(Ok(snapshot));
            }
        }
    }
}
