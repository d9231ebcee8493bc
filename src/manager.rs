//! # Shelf Manager
//!
//! Owns the four shelves and the order → shelf index, and implements the placement
//! policy:
//!
//! 1. Try the order's home shelf.
//! 2. Otherwise try Overflow.
//! 3. Otherwise evict the lowest-value Overflow order (ties: oldest placement, then
//!    earliest insertion) and place the new order in the freed slot. With a
//!    zero-capacity Overflow there is nothing to evict and the new order is
//!    discarded on arrival.
//!
//! Orders are never promoted back from Overflow. Decay always runs from the original
//! placement time using the modifier of the shelf the order sits on.
//!
//! Every removal goes through [`ShelfManager::take`], which keeps the index and the
//! shelves in step, so each order leaves the kitchen exactly once.

use crate::config::ShelvesConfig;
use crate::model::{Order, OrderId, ShelfKind, Temperature};
use crate::shelf::Shelf;
use serde::Serialize;
use std::collections::HashMap;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Result of [`ShelfManager::place`].
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub order_id: OrderId,
    /// Where the order landed. `None` means it was wasted on arrival.
    pub shelf: Option<ShelfKind>,
    /// The Overflow resident evicted to make room, if any.
    pub evicted: Option<Order>,
}

impl Placement {
    /// True when the order could not be shelved at all.
    pub fn wasted(&self) -> bool {
        self.shelf.is_none()
    }
}

/// Running totals of every order outcome.
///
/// Every ticket offered to the kitchen counts as `received`, valid or not. After
/// every operation:
///
/// - `received == placed_home + placed_overflow + discarded + rejected`
/// - `placed_home + placed_overflow == picked_up + decayed + evicted + live`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KitchenStats {
    pub received: u64,
    pub rejected: u64,
    pub placed_home: u64,
    pub placed_overflow: u64,
    pub picked_up: u64,
    pub decayed: u64,
    pub evicted: u64,
    pub discarded: u64,
}

/// Point-in-time view of one live order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderView {
    pub id: OrderId,
    pub name: String,
    pub temp: Temperature,
    pub shelf: ShelfKind,
    pub value: f64,
    pub age_secs: f64,
    pub resident_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelfSnapshot {
    pub kind: ShelfKind,
    pub capacity: usize,
    pub decay_modifier: f64,
    pub orders: Vec<OrderView>,
}

/// Every shelf's contents plus the outcome totals, taken at a single instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KitchenSnapshot {
    pub shelves: Vec<ShelfSnapshot>,
    pub stats: KitchenStats,
}

impl KitchenSnapshot {
    pub fn shelf(&self, kind: ShelfKind) -> Option<&ShelfSnapshot> {
        self.shelves.iter().find(|s| s.kind == kind)
    }

    /// Total number of orders on all shelves.
    pub fn live_count(&self) -> usize {
        self.shelves.iter().map(|s| s.orders.len()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct ShelfManager {
    /// Indexed by [`ShelfKind::index`].
    shelves: [Shelf; 4],
    index: HashMap<OrderId, ShelfKind>,
    stats: KitchenStats,
}

impl ShelfManager {
    pub fn new(layout: &ShelvesConfig) -> Self {
        let shelf = |kind: ShelfKind| {
            let cfg = layout.get(kind);
            Shelf::new(kind, cfg.capacity, cfg.decay_modifier)
        };
        Self {
            shelves: [
                shelf(ShelfKind::Hot),
                shelf(ShelfKind::Cold),
                shelf(ShelfKind::Frozen),
                shelf(ShelfKind::Overflow),
            ],
            index: HashMap::new(),
            stats: KitchenStats::default(),
        }
    }

    pub fn shelf(&self, kind: ShelfKind) -> &Shelf {
        &self.shelves[kind.index()]
    }

    fn shelf_mut(&mut self, kind: ShelfKind) -> &mut Shelf {
        &mut self.shelves[kind.index()]
    }

    pub fn stats(&self) -> KitchenStats {
        self.stats
    }

    /// Number of orders currently on any shelf.
    pub fn live_count(&self) -> usize {
        self.index.len()
    }

    /// The shelf currently holding `id`, if it is still live.
    pub fn location(&self, id: OrderId) -> Option<ShelfKind> {
        self.index.get(&id).copied()
    }

    /// Counts a ticket that failed validation and never reached a shelf.
    pub fn record_rejected(&mut self) {
        self.stats.received += 1;
        self.stats.rejected += 1;
    }

    /// Shelves a freshly accepted order.
    pub fn place(&mut self, order: Order, now: Instant) -> Placement {
        self.stats.received += 1;
        let order_id = order.id;
        let home = order.temp.home_shelf();

        let order = match self.shelf_mut(home).try_place(order, now) {
            Ok(()) => {
                self.index.insert(order_id, home);
                self.stats.placed_home += 1;
                debug!(%order_id, shelf = %home, "Placed on home shelf");
                return Placement {
                    order_id,
                    shelf: Some(home),
                    evicted: None,
                };
            }
            Err(order) => order,
        };

        let order = match self.place_on_overflow(order, now) {
            Ok(()) => {
                return Placement {
                    order_id,
                    shelf: Some(ShelfKind::Overflow),
                    evicted: None,
                }
            }
            Err(order) => order,
        };

        let victim = self
            .shelf(ShelfKind::Overflow)
            .lowest_value(now)
            .map(|o| o.id);
        let evicted = victim.and_then(|victim| self.take(victim));
        if let Some(evicted) = &evicted {
            self.stats.evicted += 1;
            info!(%order_id, victim = %evicted.id, "Evicted lowest-value overflow order");
        }

        match self.place_on_overflow(order, now) {
            Ok(()) => Placement {
                order_id,
                shelf: Some(ShelfKind::Overflow),
                evicted,
            },
            Err(order) => {
                self.stats.discarded += 1;
                warn!(
                    order_id = %order.id,
                    name = %order.name,
                    "No shelf space, order wasted on arrival"
                );
                Placement {
                    order_id,
                    shelf: None,
                    evicted,
                }
            }
        }
    }

    fn place_on_overflow(&mut self, order: Order, now: Instant) -> Result<(), Order> {
        let order_id = order.id;
        self.shelf_mut(ShelfKind::Overflow).try_place(order, now)?;
        self.index.insert(order_id, ShelfKind::Overflow);
        self.stats.placed_overflow += 1;
        debug!(%order_id, "Placed on overflow shelf");
        Ok(())
    }

    /// Hands an order to its courier.
    ///
    /// Returns `false` if the order is already gone. An order found at zero value
    /// is wasted here instead of being handed over.
    pub fn pickup(&mut self, id: OrderId, now: Instant) -> bool {
        let Some(kind) = self.location(id) else {
            debug!(order_id = %id, "Pickup found nothing, order already removed");
            return false;
        };
        let shelf = self.shelf(kind);
        let value = shelf
            .get(id)
            .map(|order| order.value(shelf.decay_modifier(), now))
            .unwrap_or(0.0);

        if self.take(id).is_none() {
            return false;
        }
        if value <= 0.0 {
            self.stats.decayed += 1;
            info!(order_id = %id, shelf = %kind, "Order decayed before pickup");
            return false;
        }
        self.stats.picked_up += 1;
        info!(order_id = %id, shelf = %kind, value, "Picked up");
        true
    }

    /// Removes every order whose value has reached zero and returns them.
    pub fn sweep_decay(&mut self, now: Instant) -> Vec<Order> {
        let mut wasted = Vec::new();
        for kind in ShelfKind::ALL {
            for id in self.shelf(kind).expired(now) {
                if let Some(order) = self.take(id) {
                    info!(order_id = %id, shelf = %kind, name = %order.name, "Order decayed");
                    wasted.push(order);
                }
            }
        }
        self.stats.decayed += wasted.len() as u64;
        wasted
    }

    /// Looks up a live order.
    pub fn get(&self, id: OrderId, now: Instant) -> Option<OrderView> {
        let kind = self.location(id)?;
        let shelf = self.shelf(kind);
        let order = shelf.get(id)?;
        Some(view(shelf, order, order.value(shelf.decay_modifier(), now), now))
    }

    /// Every shelf with the current value of each resident.
    pub fn snapshot(&self, now: Instant) -> KitchenSnapshot {
        let shelves = self
            .shelves
            .iter()
            .map(|shelf| ShelfSnapshot {
                kind: shelf.kind(),
                capacity: shelf.capacity(),
                decay_modifier: shelf.decay_modifier(),
                orders: shelf
                    .snapshot(now)
                    .iter()
                    .map(|(order, value)| view(shelf, order, *value, now))
                    .collect(),
            })
            .collect();
        KitchenSnapshot {
            shelves,
            stats: self.stats,
        }
    }

    /// The single removal path: drops `id` from the index and from its shelf.
    fn take(&mut self, id: OrderId) -> Option<Order> {
        let kind = self.index.remove(&id)?;
        self.shelf_mut(kind).remove(id)
    }
}

fn view(shelf: &Shelf, order: &Order, value: f64, now: Instant) -> OrderView {
    let resident_secs = shelf
        .resident_since(order.id)
        .map(|since| now.saturating_duration_since(since).as_secs_f64())
        .unwrap_or_default();
    OrderView {
        id: order.id,
        name: order.name.clone(),
        temp: order.temp,
        shelf: shelf.kind(),
        value,
        age_secs: order.age(now).as_secs_f64(),
        resident_secs,
    }
}
