//! TukuApps Dashboard - headless runner
//!
//! Loads the persisted dashboard state, logs the portfolio summary, re-marks
//! open positions and runs one simulated training session while the header
//! clock ticks. Ctrl+C stops training and exits.
//!
//! # Environment Variables
//! - `TUKUAPPS_INITIAL_BALANCE` - Starting cash when nothing is stored (default: 3000000)
//! - `TUKUAPPS_CURRENCY_PREFIX` - Prefix for money amounts (default: `Rp `)
//! - `TUKUAPPS_STORAGE_PATH` - JSON storage file (default: `~/.tukuapps/storage.json`)
//! - `TUKUAPPS_TRAINING_TICK_MS` / `TUKUAPPS_CLOCK_TICK_MS` - Tick periods (default: 1000)
//! - `TUKUAPPS_PRICE_SEED` / `TUKUAPPS_TRAINING_SEED` - Optional RNG seeds

use anyhow::Result;
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;
use tukuapps_dashboard::application::clock::ClockTicker;
use tukuapps_dashboard::application::dashboard_store::DashboardStore;
use tukuapps_dashboard::config::DashboardConfig;
use tukuapps_dashboard::domain::repositories::KeyValueStore;
use tukuapps_dashboard::infrastructure::persistence::{InMemoryStore, JsonFileStore};
use tukuapps_dashboard::interfaces::view_models::{DashboardViewModel, TrainingViewModel};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("TukuApps Dashboard {} starting...", env!("CARGO_PKG_VERSION"));

    let config = DashboardConfig::from_env()?;
    info!(
        "Configuration loaded: storage={}, training tick={:?}",
        config.storage.path.display(),
        config.training_tick()
    );

    let storage: Arc<dyn KeyValueStore> = match JsonFileStore::open(config.storage.path.clone()) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!("Storage unavailable ({:#}), state will not be persisted", e);
            Arc::new(InMemoryStore::new())
        }
    };

    let clock = ClockTicker::spawn(config.clock_tick());
    let mut store = DashboardStore::new(config, storage);

    store.refresh_prices();
    let metrics = DashboardViewModel::get_metrics(&store);
    info!(
        "[{}] Equity {} | Cash {} | Floating P&L {} ({}) {} | {} open positions",
        clock.current(),
        metrics.total_equity,
        metrics.cash,
        metrics.pnl_value,
        metrics.pnl_pct,
        metrics.pnl_arrow,
        metrics.position_count
    );

    store.start_configured_training()?;
    let mut progress = tokio::time::interval(store.config().training_tick());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received.");
                store.stop_training();
                break;
            }
            _ = progress.tick() => {
                let training = TrainingViewModel::get_metrics(&store);
                info!(
                    "[{}] {} epoch {} ({:.0}%) loss {} best {} elapsed {}",
                    clock.current(),
                    training.status,
                    training.epoch_label,
                    training.percent_complete,
                    training.current_loss,
                    training.best_loss,
                    training.elapsed
                );
                if !store.is_training() {
                    break;
                }
            }
        }
    }

    for line in TrainingViewModel::get_log_lines(&store) {
        info!("{} [{}]", line.text, line.severity);
    }

    store.shutdown();
    clock.stop();
    info!("Exiting.");
    Ok(())
}
