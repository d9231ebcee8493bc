//! # Kitchen Simulation
//!
//! Reads a JSON array of orders, feeds them into a [`KitchenSystem`] at the configured
//! rate, waits for every courier and prints the final shelf state.

use clap::Parser;
use kitchen_shelves::config::KitchenConfig;
use kitchen_shelves::lifecycle::{setup_tracing, KitchenSystem};
use kitchen_shelves::source::JsonOrderSource;
use std::path::PathBuf;
use tracing::{error, info, Instrument};

#[derive(Parser, Debug)]
#[command(name = "kitchen-shelves", about = "Simulate an order-holding kitchen")]
struct Args {
    /// JSON array of orders (`name`, `temp`, `shelfLife`, `decayRate`)
    #[arg(short, long)]
    orders: PathBuf,

    /// Kitchen configuration in TOML; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => KitchenConfig::from_file(path).map_err(|e| e.to_string())?,
        None => KitchenConfig::default(),
    };
    let mut source = JsonOrderSource::from_file(&args.orders)
        .await
        .map_err(|e| e.to_string())?;

    info!(orders = source.remaining(), "Starting kitchen simulation");
    let mut system = KitchenSystem::new(&config).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("ingestion");
    let ingestion = system.run(&mut source).instrument(span).await;
    if let Err(e) = &ingestion {
        error!(error = %e, "Ingestion stopped early");
    }

    system.drain().await;
    let couriers = system.couriers();
    info!(
        dispatched = couriers.dispatched,
        delivered = couriers.picked_up,
        missed = couriers.missed,
        "All couriers returned"
    );

    let snapshot = system.snapshot().await.map_err(|e| e.to_string())?;
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => info!("Final shelves:\n{json}"),
        Err(e) => error!(error = %e, "Failed to render snapshot"),
    }

    let stats = system.shutdown().await.map_err(|e| e.to_string())?;
    info!(?stats, "Simulation complete");

    ingestion.map(|_| ()).map_err(|e| e.to_string())
}
