//! # Shelf
//!
//! A capacity-bounded, temperature-typed container of [`Order`]s.
//!
//! A `Shelf` has no interior locking. It is owned by the
//! [`ShelfManager`](crate::manager::ShelfManager), which in turn is owned by a single
//! kitchen actor task, so `&mut self` already guarantees each insert or removal is
//! atomic with respect to every other operation.

use crate::model::{Order, OrderId, ShelfKind};
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Slot {
    order: Order,
    /// When the order arrived on *this* shelf. Diagnostics only; decay always
    /// runs from the original placement time.
    resident_since: Instant,
    /// Insertion sequence, the final tie-break for eviction.
    seq: u64,
}

/// A single shelf in the kitchen.
#[derive(Debug, Clone)]
pub struct Shelf {
    kind: ShelfKind,
    capacity: usize,
    decay_modifier: f64,
    slots: Vec<Slot>,
    next_seq: u64,
}

impl Shelf {
    pub fn new(kind: ShelfKind, capacity: usize, decay_modifier: f64) -> Self {
        Self {
            kind,
            capacity,
            decay_modifier,
            slots: Vec::with_capacity(capacity),
            next_seq: 0,
        }
    }

    pub fn kind(&self) -> ShelfKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn decay_modifier(&self) -> f64 {
        self.decay_modifier
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.slots.iter().any(|slot| slot.order.id == id)
    }

    /// Places `order` if there is room, recording `now` as its residency start.
    ///
    /// On a full shelf the order is handed back untouched.
    pub fn try_place(&mut self, order: Order, now: Instant) -> Result<(), Order> {
        if self.is_full() {
            return Err(order);
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots.push(Slot {
            order,
            resident_since: now,
            seq,
        });
        Ok(())
    }

    /// Removes an order. `None` means it was not here, which is the normal
    /// outcome of a pickup racing a decay or eviction.
    pub fn remove(&mut self, id: OrderId) -> Option<Order> {
        let pos = self.slots.iter().position(|slot| slot.order.id == id)?;
        Some(self.slots.remove(pos).order)
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.slots
            .iter()
            .find(|slot| slot.order.id == id)
            .map(|slot| &slot.order)
    }

    pub fn resident_since(&self, id: OrderId) -> Option<Instant> {
        self.slots
            .iter()
            .find(|slot| slot.order.id == id)
            .map(|slot| slot.resident_since)
    }

    /// Every resident with its value at `now`, in insertion order.
    pub fn snapshot(&self, now: Instant) -> Vec<(Order, f64)> {
        self.slots
            .iter()
            .map(|slot| {
                let value = slot.order.value(self.decay_modifier, now);
                (slot.order.clone(), value)
            })
            .collect()
    }

    /// The resident with the lowest value at `now`.
    ///
    /// Ties go to the earliest placement time, then to the earliest insertion.
    pub fn lowest_value(&self, now: Instant) -> Option<&Order> {
        self.slots
            .iter()
            .map(|slot| (slot, slot.order.value(self.decay_modifier, now)))
            .min_by(|(a, va), (b, vb)| {
                va.total_cmp(vb)
                    .then_with(|| a.order.placed_at.cmp(&b.order.placed_at))
                    .then_with(|| a.seq.cmp(&b.seq))
            })
            .map(|(slot, _)| &slot.order)
    }

    /// Ids of residents whose value at `now` has reached zero.
    pub(crate) fn expired(&self, now: Instant) -> Vec<OrderId> {
        self.slots
            .iter()
            .filter(|slot| slot.order.value(self.decay_modifier, now) <= 0.0)
            .map(|slot| slot.order.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderTicket, Temperature};
    use std::time::Duration;

    fn order(id: u64, shelf_life: f64, decay_rate: f64, placed_at: Instant) -> Order {
        let ticket =
            OrderTicket::new(format!("item {id}"), Temperature::Hot, shelf_life, decay_rate);
        Order::new(OrderId(id), ticket, placed_at).unwrap()
    }

    #[test]
    fn test_try_place_respects_capacity() {
        let now = Instant::now();
        let mut shelf = Shelf::new(ShelfKind::Hot, 2, 1.0);
        assert!(shelf.try_place(order(1, 60.0, 0.5, now), now).is_ok());
        assert!(shelf.try_place(order(2, 60.0, 0.5, now), now).is_ok());

        let rejected = shelf.try_place(order(3, 60.0, 0.5, now), now).unwrap_err();
        assert_eq!(rejected.id, OrderId(3));
        assert_eq!(shelf.len(), 2);
        assert!(!shelf.contains(OrderId(3)));
    }

    #[test]
    fn test_zero_capacity_shelf_rejects_everything() {
        let now = Instant::now();
        let mut shelf = Shelf::new(ShelfKind::Overflow, 0, 2.0);
        assert!(shelf.try_place(order(1, 60.0, 0.5, now), now).is_err());
        assert!(shelf.is_empty());
        assert!(shelf.lowest_value(now).is_none());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let now = Instant::now();
        let mut shelf = Shelf::new(ShelfKind::Cold, 1, 1.0);
        shelf.try_place(order(1, 60.0, 0.5, now), now).unwrap();

        assert_eq!(shelf.remove(OrderId(1)).map(|o| o.id), Some(OrderId(1)));
        assert!(shelf.remove(OrderId(1)).is_none());
        assert!(shelf.is_empty());
    }

    #[test]
    fn test_snapshot_is_in_insertion_order() {
        let now = Instant::now();
        let mut shelf = Shelf::new(ShelfKind::Frozen, 3, 1.0);
        for id in [5, 2, 9] {
            shelf.try_place(order(id, 60.0, 0.5, now), now).unwrap();
        }
        let ids: Vec<u64> = shelf.snapshot(now).iter().map(|(o, _)| o.id.0).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    #[test]
    fn test_lowest_value_picks_most_decayed() {
        let t0 = Instant::now();
        let mut shelf = Shelf::new(ShelfKind::Overflow, 3, 2.0);
        shelf.try_place(order(1, 100.0, 0.1, t0), t0).unwrap();
        shelf.try_place(order(2, 10.0, 0.9, t0), t0).unwrap();
        shelf.try_place(order(3, 50.0, 0.2, t0), t0).unwrap();

        let now = t0 + Duration::from_secs(2);
        assert_eq!(shelf.lowest_value(now).map(|o| o.id), Some(OrderId(2)));
    }

    #[test]
    fn test_lowest_value_ties_break_by_age_then_insertion() {
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_secs(1);
        let mut shelf = Shelf::new(ShelfKind::Overflow, 3, 2.0);
        // At age zero every order is worth exactly 1.0.
        shelf.try_place(order(1, 60.0, 0.5, t1), t1).unwrap();
        shelf.try_place(order(2, 60.0, 0.5, t1), t1).unwrap();
        assert_eq!(shelf.lowest_value(t1).map(|o| o.id), Some(OrderId(1)));

        // Identical values but order 3 was placed earlier.
        let mut shelf = Shelf::new(ShelfKind::Overflow, 3, 2.0);
        shelf.try_place(order(4, 60.0, 0.0, t1), t1).unwrap();
        shelf.try_place(order(3, 60.0, 0.0, t0), t1).unwrap();
        let now = t1 + Duration::from_secs(100);
        assert_eq!(shelf.lowest_value(now).map(|o| o.id), Some(OrderId(3)));
    }

    #[test]
    fn test_resident_since_tracks_shelf_arrival() {
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_secs(3);
        let mut shelf = Shelf::new(ShelfKind::Hot, 1, 1.0);
        shelf.try_place(order(1, 60.0, 0.5, t0), t1).unwrap();
        assert_eq!(shelf.resident_since(OrderId(1)), Some(t1));
        assert_eq!(shelf.get(OrderId(1)).map(|o| o.placed_at), Some(t0));
    }

    #[test]
    fn test_expired_lists_zero_value_orders() {
        let t0 = Instant::now();
        let mut shelf = Shelf::new(ShelfKind::Hot, 2, 1.0);
        shelf.try_place(order(1, 10.0, 1.0, t0), t0).unwrap();
        shelf.try_place(order(2, 100.0, 1.0, t0), t0).unwrap();
        assert!(shelf.expired(t0 + Duration::from_secs(4)).is_empty());
        assert_eq!(shelf.expired(t0 + Duration::from_secs(5)), vec![OrderId(1)]);
    }
}
