use crate::clients::KitchenClient;
use crate::config::{ConfigError, KitchenConfig};
use crate::dispatch::{CourierReport, CourierTally, DelaySource, Dispatcher, UniformDelay};
use crate::kitchen_actor::{self, KitchenError};
use crate::manager::{KitchenSnapshot, KitchenStats, Placement, ShelfManager};
use crate::model::OrderTicket;
use crate::source::OrderSource;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

/// The running kitchen: one actor owning the shelves, a periodic decay sweeper and
/// the courier dispatcher.
///
/// # Example
///
/// ```rust
/// use kitchen_shelves::config::KitchenConfig;
/// use kitchen_shelves::lifecycle::KitchenSystem;
/// use kitchen_shelves::model::{OrderTicket, Temperature};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut config = KitchenConfig::default();
///     config.dispatch.min_delay_ms = 10;
///     config.dispatch.max_delay_ms = 20;
///
///     let mut system = KitchenSystem::new(&config)?;
///     let ticket = OrderTicket::new("Cheese Pizza", Temperature::Hot, 300.0, 0.45);
///     let placement = system.submit(ticket).await?;
///     assert!(!placement.wasted());
///
///     let reports = system.drain().await;
///     assert!(reports[0].picked_up);
///
///     let stats = system.shutdown().await?;
///     assert_eq!(stats.picked_up, 1);
///     Ok(())
/// }
/// ```
pub struct KitchenSystem {
    /// Client for the kitchen actor.
    pub client: KitchenClient,

    dispatcher: Dispatcher,
    ingestion_interval: Duration,
    sweeper: JoinHandle<()>,
    actor: JoinHandle<()>,
}

impl KitchenSystem {
    /// Starts a kitchen whose couriers arrive after uniformly random delays.
    pub fn new(config: &KitchenConfig) -> Result<Self, ConfigError> {
        Self::with_delays(config, UniformDelay::from_config(&config.dispatch))
    }

    /// Starts a kitchen with a caller-supplied courier delay source.
    pub fn with_delays(
        config: &KitchenConfig,
        delays: impl DelaySource + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let manager = ShelfManager::new(&config.shelves);
        let (actor, client) = kitchen_actor::new(manager, config.mailbox_size);
        let actor = tokio::spawn(actor.run());
        let sweeper = tokio::spawn(sweep_loop(client.clone(), config.sweep.interval()));

        info!(
            hot = config.shelves.hot.capacity,
            cold = config.shelves.cold.capacity,
            frozen = config.shelves.frozen.capacity,
            overflow = config.shelves.overflow.capacity,
            "Kitchen open"
        );

        Ok(Self {
            dispatcher: Dispatcher::new(client.clone(), delays),
            client,
            ingestion_interval: config.ingestion.interval(),
            sweeper,
            actor,
        })
    }

    /// Places one order and, if it landed on a shelf, sends its courier.
    pub async fn submit(&mut self, ticket: OrderTicket) -> Result<Placement, KitchenError> {
        let placement = self.client.place(ticket).await?;
        if !placement.wasted() {
            self.dispatcher.schedule(placement.order_id);
        }
        Ok(placement)
    }

    /// Feeds every ticket from `source` into the kitchen at the configured rate.
    ///
    /// Invalid tickets are logged and skipped. A source error stops ingestion and
    /// is returned; orders already on the shelves keep their couriers.
    ///
    /// Returns the number of tickets read.
    pub async fn run<S>(&mut self, source: &mut S) -> Result<usize, KitchenError>
    where
        S: OrderSource + ?Sized,
    {
        let mut ingested = 0;
        while let Some(next) = source.next_ticket().await {
            let ticket = match next {
                Ok(ticket) => ticket,
                Err(e) => {
                    error!(error = %e, ingested, "Order source failed, halting ingestion");
                    return Err(e.into());
                }
            };
            if ingested > 0 {
                tokio::time::sleep(self.ingestion_interval).await;
            }
            ingested += 1;

            match self.submit(ticket).await {
                Ok(_) => {}
                Err(KitchenError::InvalidOrder(e)) => warn!(error = %e, "Skipping invalid order"),
                Err(e) => return Err(e),
            }
        }
        info!(ingested, "Order source exhausted");
        Ok(ingested)
    }

    /// Couriers still on their way.
    pub fn pending_couriers(&mut self) -> usize {
        self.dispatcher.pending()
    }

    /// Totals over every courier sent so far.
    pub fn couriers(&self) -> CourierTally {
        self.dispatcher.tally()
    }

    /// Waits for every courier still on its way to arrive.
    pub async fn drain(&mut self) -> Vec<CourierReport> {
        self.dispatcher.drain().await
    }

    pub async fn snapshot(&self) -> Result<KitchenSnapshot, KitchenError> {
        self.client.snapshot().await
    }

    /// Stops the sweeper, recalls outstanding couriers and waits for the actor to
    /// exit. Returns the final statistics.
    pub async fn shutdown(mut self) -> Result<KitchenStats, KitchenError> {
        info!("Shutting down kitchen...");

        self.sweeper.abort();
        if let Err(e) = self.sweeper.await {
            if !e.is_cancelled() {
                return Err(KitchenError::Shutdown(format!("Sweeper task failed: {e}")));
            }
        }

        let recalled = self.dispatcher.recall().await;
        if recalled > 0 {
            warn!(recalled, "Recalled couriers still on their way");
        }

        let stats = self.client.snapshot().await?.stats;

        // Dropping the last senders lets the actor drain its queue and exit.
        drop(self.dispatcher);
        drop(self.client);

        if let Err(e) = self.actor.await {
            error!("Kitchen actor failed: {:?}", e);
            return Err(KitchenError::Shutdown(format!("Kitchen actor failed: {e}")));
        }

        info!(?stats, "Kitchen shutdown complete.");
        Ok(stats)
    }
}

async fn sweep_loop(client: KitchenClient, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        if let Err(e) = client.sweep_decay().await {
            warn!(error = %e, "Decay sweeper stopping");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::FixedDelay;
    use crate::model::{ShelfKind, Temperature};
    use crate::source::VecOrderSource;

    #[tokio::test]
    async fn test_new_rejects_invalid_config() {
        let mut config = KitchenConfig::default();
        config.shelves.overflow.decay_modifier = 0.5;
        assert!(matches!(
            KitchenSystem::new(&config),
            Err(ConfigError::OverflowModifierTooLow { .. })
        ));
    }

    #[tokio::test]
    async fn test_unrepresentable_ingestion_rate_is_rejected() {
        let mut config = KitchenConfig::default();
        config.ingestion.orders_per_second = 1e-20;
        assert!(matches!(
            KitchenSystem::with_delays(&config, FixedDelay(Duration::from_secs(1))),
            Err(ConfigError::InvalidIngestionRate(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wasted_order_gets_no_courier() {
        let mut config = KitchenConfig::default();
        config.shelves.hot.capacity = 0;
        config.shelves.overflow.capacity = 0;
        let mut system =
            KitchenSystem::with_delays(&config, FixedDelay(Duration::from_secs(1))).unwrap();

        let placement = system
            .submit(OrderTicket::new("Pad See Ew", Temperature::Hot, 60.0, 0.1))
            .await
            .unwrap();
        assert!(placement.wasted());
        assert_eq!(system.pending_couriers(), 0);

        let stats = system.shutdown().await.unwrap();
        assert_eq!(stats.discarded, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_skips_invalid_tickets() {
        let config = KitchenConfig::default();
        let mut system =
            KitchenSystem::with_delays(&config, FixedDelay(Duration::from_secs(2))).unwrap();
        let mut source = VecOrderSource::from(vec![
            OrderTicket::new("Spoiled", Temperature::Cold, 0.0, 0.1),
            OrderTicket::new("Kale Salad", Temperature::Cold, 250.0, 0.3),
        ]);

        assert_eq!(system.run(&mut source).await.unwrap(), 2);
        let snapshot = system.snapshot().await.unwrap();
        assert_eq!(snapshot.shelf(ShelfKind::Cold).unwrap().orders.len(), 1);

        let reports = system.drain().await;
        assert_eq!(reports.len(), 1);
        assert!(reports[0].picked_up);

        let stats = system.shutdown().await.unwrap();
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.picked_up, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_recalls_couriers() {
        let config = KitchenConfig::default();
        let mut system =
            KitchenSystem::with_delays(&config, FixedDelay(Duration::from_secs(3600))).unwrap();
        system
            .submit(OrderTicket::new("Beef Stew", Temperature::Hot, 500.0, 0.1))
            .await
            .unwrap();
        assert_eq!(system.pending_couriers(), 1);

        let stats = system.shutdown().await.unwrap();
        assert_eq!(stats.picked_up, 0);
        assert_eq!(stats.placed_home, 1);
    }
}
