//! # Decay Model
//!
//! An order's value is its normalized freshness:
//!
//! ```text
//! value = (shelfLife - age - decayRate * age * modifier) / shelfLife
//! ```
//!
//! clamped to `[0, 1]`. It starts at exactly `1.0`, falls linearly with age and hits
//! zero at the order's waste time `shelfLife / (1 + decayRate * modifier)`. Because
//! the shelf's decay modifier multiplies the decay term, the overflow shelf (with its
//! larger modifier) always wastes an order sooner than its home shelf when
//! `decayRate > 0`.

use crate::model::Order;

/// Normalized value of `order` after `age_secs` on a shelf with `decay_modifier`.
///
/// Negative ages are treated as zero. The result is never negative.
pub fn value(order: &Order, decay_modifier: f64, age_secs: f64) -> f64 {
    let age = age_secs.max(0.0);
    let remaining = order.shelf_life - age - order.decay_rate * age * decay_modifier;
    (remaining / order.shelf_life).clamp(0.0, 1.0)
}

/// Age in seconds at which `order` reaches zero value on a shelf with `decay_modifier`.
pub fn waste_age_secs(order: &Order, decay_modifier: f64) -> f64 {
    order.shelf_life / (1.0 + order.decay_rate * decay_modifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderId, OrderTicket, Temperature};
    use tokio::time::Instant;

    fn order(shelf_life: f64, decay_rate: f64) -> Order {
        let ticket = OrderTicket::new("Cheese Pizza", Temperature::Hot, shelf_life, decay_rate);
        Order::new(OrderId(1), ticket, Instant::now()).unwrap()
    }

    #[test]
    fn test_fresh_order_has_full_value() {
        let o = order(300.0, 0.45);
        assert!((value(&o, 1.0, 0.0) - 1.0).abs() < 1e-12);
        assert!((value(&o, 2.0, 0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_value_reaches_zero_at_waste_age() {
        // shelfLife=60s, decayRate=1.0, modifier=1 wastes at 30s with this formula.
        let o = order(60.0, 1.0);
        let waste = waste_age_secs(&o, 1.0);
        assert!((waste - 30.0).abs() < 1e-12);
        assert!(value(&o, 1.0, waste - 0.5) > 0.0);
        assert_eq!(value(&o, 1.0, waste), 0.0);
        assert_eq!(value(&o, 1.0, 60.0), 0.0);
        assert_eq!(value(&o, 1.0, 10_000.0), 0.0);
    }

    #[test]
    fn test_zero_decay_rate_still_wastes_at_shelf_life() {
        let o = order(20.0, 0.0);
        assert!(value(&o, 2.0, 19.0) > 0.0);
        assert_eq!(value(&o, 2.0, 20.0), 0.0);
        assert_eq!(waste_age_secs(&o, 2.0), 20.0);
    }

    #[test]
    fn test_overflow_modifier_decays_faster() {
        let o = order(100.0, 0.5);
        for age in [1.0, 10.0, 25.0, 49.0] {
            assert!(value(&o, 2.0, age) < value(&o, 1.0, age));
        }
        assert!(waste_age_secs(&o, 2.0) < waste_age_secs(&o, 1.0));
    }

    #[test]
    fn test_negative_age_is_clamped() {
        let o = order(100.0, 0.5);
        assert_eq!(value(&o, 1.0, -5.0), 1.0);
    }
}
