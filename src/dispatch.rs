//! # Dispatch Scheduler
//!
//! Simulates couriers. Every shelved order gets exactly one courier task that sleeps
//! for a randomized delay and then asks the kitchen for a pickup. There is no
//! cancellation: if the order decayed or was evicted in the meantime, the pickup
//! simply comes back `false`.
//!
//! Couriers that have returned are reaped whenever a new one is sent, and only
//! their totals are kept, so a long run holds one task per courier still on the
//! road rather than one per order ever placed.

use crate::clients::KitchenClient;
use crate::config::DispatchConfig;
use crate::model::OrderId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn, Instrument};

/// Supplies courier travel times.
pub trait DelaySource: Send {
    fn next_delay(&mut self) -> Duration;
}

impl<F> DelaySource for F
where
    F: FnMut() -> Duration + Send,
{
    fn next_delay(&mut self) -> Duration {
        self()
    }
}

/// Uniformly distributed delays over an inclusive millisecond range.
#[derive(Debug, Clone)]
pub struct UniformDelay {
    rng: StdRng,
    min_ms: u64,
    max_ms: u64,
}

impl UniformDelay {
    /// A `seed` makes the delay sequence reproducible. If `min_ms > max_ms` the
    /// bounds are swapped.
    pub fn new(min_ms: u64, max_ms: u64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            min_ms: min_ms.min(max_ms),
            max_ms: max_ms.max(min_ms),
        }
    }

    pub fn from_config(config: &DispatchConfig) -> Self {
        Self::new(config.min_delay_ms, config.max_delay_ms, config.seed)
    }
}

impl DelaySource for UniformDelay {
    fn next_delay(&mut self) -> Duration {
        Duration::from_millis(self.rng.random_range(self.min_ms..=self.max_ms))
    }
}

/// The same delay for every courier.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl DelaySource for FixedDelay {
    fn next_delay(&mut self) -> Duration {
        self.0
    }
}

/// What a single courier found when it arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourierReport {
    pub order_id: OrderId,
    pub delay: Duration,
    pub picked_up: bool,
}

/// Running totals over every courier sent.
///
/// `dispatched == picked_up + missed + recalled + pending` holds at all times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CourierTally {
    pub dispatched: u64,
    pub picked_up: u64,
    /// Arrived to find the order gone, or could not reach the kitchen.
    pub missed: u64,
    pub recalled: u64,
}

/// Spawns and tracks courier tasks.
pub struct Dispatcher {
    client: KitchenClient,
    delays: Box<dyn DelaySource>,
    couriers: JoinSet<CourierReport>,
    tally: CourierTally,
}

impl Dispatcher {
    pub fn new(client: KitchenClient, delays: impl DelaySource + 'static) -> Self {
        Self {
            client,
            delays: Box::new(delays),
            couriers: JoinSet::new(),
            tally: CourierTally::default(),
        }
    }

    /// Sends a courier for `order_id` and returns its travel time.
    pub fn schedule(&mut self, order_id: OrderId) -> Duration {
        self.reap();
        let delay = self.delays.next_delay();
        let client = self.client.clone();
        let span = tracing::info_span!("courier", %order_id);

        self.couriers.spawn(
            async move {
                tokio::time::sleep(delay).await;
                let picked_up = match client.pickup(order_id).await {
                    Ok(true) => {
                        info!("Courier collected order");
                        true
                    }
                    Ok(false) => {
                        info!("Courier arrived, order already gone");
                        false
                    }
                    Err(e) => {
                        warn!(error = %e, "Courier could not reach kitchen");
                        false
                    }
                };
                CourierReport {
                    order_id,
                    delay,
                    picked_up,
                }
            }
            .instrument(span),
        );
        self.tally.dispatched += 1;
        debug!(%order_id, delay_ms = delay.as_millis() as u64, "Courier dispatched");
        delay
    }

    /// Couriers still on their way.
    pub fn pending(&mut self) -> usize {
        self.reap();
        self.couriers.len()
    }

    pub fn tally(&self) -> CourierTally {
        self.tally
    }

    /// Waits for every courier still on its way and returns their reports in
    /// completion order. Couriers reaped earlier appear only in [`tally`](Self::tally).
    pub async fn drain(&mut self) -> Vec<CourierReport> {
        let mut reports = Vec::with_capacity(self.couriers.len());
        while let Some(joined) = self.couriers.join_next().await {
            reports.extend(self.record(joined));
        }
        reports
    }

    /// Recalls every courier still on its way and waits until they are gone.
    /// Returns how many were cut short.
    pub async fn recall(&mut self) -> u64 {
        let before = self.tally.recalled;
        self.couriers.abort_all();
        while let Some(joined) = self.couriers.join_next().await {
            self.record(joined);
        }
        self.tally.recalled - before
    }

    /// Collects couriers that have already returned, without waiting.
    fn reap(&mut self) {
        while let Some(joined) = self.couriers.try_join_next() {
            self.record(joined);
        }
    }

    fn record(&mut self, joined: Result<CourierReport, JoinError>) -> Option<CourierReport> {
        match joined {
            Ok(report) => {
                if report.picked_up {
                    self.tally.picked_up += 1;
                } else {
                    self.tally.missed += 1;
                }
                Some(report)
            }
            Err(e) if e.is_cancelled() => {
                self.tally.recalled += 1;
                None
            }
            Err(e) => {
                warn!(error = %e, "Courier task failed");
                self.tally.missed += 1;
                None
            }
        }
    }
}
