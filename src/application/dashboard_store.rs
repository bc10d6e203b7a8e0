//! Single source of truth for the dashboard.
//!
//! The store owns the trade journal, the cash balance, the privacy flag and the
//! training simulation. Portfolio figures are derived on every read from the
//! current trade list; nothing derived is cached.

use crate::application::training_simulator::{
    SharedTrainingState, TrainingHandle, TrainingRun, lock_state, spawn_training,
};
use crate::config::DashboardConfig;
use crate::domain::errors::DashboardError;
use crate::domain::formatting;
use crate::domain::market::prediction::{Prediction, SignalStats, find_prediction};
use crate::domain::market::statistics::{DataStatistics, SyncStatus};
use crate::domain::ml::training::{LogEntry, LogSeverity, TrainingConfiguration, TrainingProgress};
use crate::domain::repositories::{
    KeyValueStore, PRIVACY_MODE_KEY, TRADES_KEY, TRADING_BALANCE_KEY,
};
use crate::domain::trading::journal::JournalSummary;
use crate::domain::trading::portfolio::Portfolio;
use crate::domain::trading::types::{NewPosition, Trade, TradeStatus, TradeType};
use crate::infrastructure::mock;
use crate::infrastructure::persistence::{load_or_default, save};
use crate::infrastructure::simulation::{NoisyDecayLoss, PriceModel, RandomWalkPrice};
use chrono::{Local, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct DashboardStore {
    config: DashboardConfig,
    storage: Arc<dyn KeyValueStore>,

    trades: Vec<Trade>,
    trading_balance: Decimal,
    privacy_mode: bool,

    predictions: Vec<Prediction>,
    data_stats: DataStatistics,
    sync_status: SyncStatus,

    training_config: TrainingConfiguration,
    training: SharedTrainingState,
    training_task: Option<TrainingHandle>,

    price_model: Box<dyn PriceModel>,
}

impl DashboardStore {
    /// Build the store, restoring persisted fields from `storage`.
    ///
    /// Each persisted field falls back to its default independently when the
    /// stored value is missing or unreadable.
    pub fn new(config: DashboardConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        let trades = load_or_default(storage.as_ref(), TRADES_KEY, mock::initial_trades());
        let trading_balance =
            load_or_default(storage.as_ref(), TRADING_BALANCE_KEY, config.initial_balance());
        let privacy_mode = load_or_default(storage.as_ref(), PRIVACY_MODE_KEY, false);
        let price_model = Box::new(RandomWalkPrice::new(config.simulation.price_seed));

        info!(
            "Dashboard store ready: {} trades, balance {}, privacy {}",
            trades.len(),
            trading_balance,
            privacy_mode
        );

        Self {
            config,
            storage,
            trades,
            trading_balance,
            privacy_mode,
            predictions: mock::initial_predictions(),
            data_stats: mock::data_statistics(),
            sync_status: mock::sync_status(),
            training_config: TrainingConfiguration::default(),
            training: SharedTrainingState::default(),
            training_task: None,
            price_model,
        }
    }

    /// Replace the synthetic price tick used by [`DashboardStore::refresh_prices`].
    pub fn with_price_model(mut self, price_model: Box<dyn PriceModel>) -> Self {
        self.price_model = price_model;
        self
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    // ---- Trades & balance -------------------------------------------------

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn trade(&self, id: i64) -> Option<&Trade> {
        self.trades.iter().find(|t| t.id == id)
    }

    pub fn trading_balance(&self) -> Decimal {
        self.trading_balance
    }

    /// Open a new BUY position, debiting its cost from the trading balance.
    ///
    /// Rejected without touching state when the position is malformed or the
    /// balance cannot cover `entry_price * quantity`.
    pub fn add_trade(&mut self, position: NewPosition) -> Result<&Trade, DashboardError> {
        let ticker = position.ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(DashboardError::InvalidPosition {
                reason: "ticker is required".to_string(),
            });
        }
        if position.entry_price <= Decimal::ZERO {
            return Err(DashboardError::InvalidPosition {
                reason: format!("entry price must be positive, got {}", position.entry_price),
            });
        }
        if position.current_price < Decimal::ZERO {
            return Err(DashboardError::InvalidPosition {
                reason: format!(
                    "current price must not be negative, got {}",
                    position.current_price
                ),
            });
        }
        if position.quantity == 0 {
            return Err(DashboardError::InvalidPosition {
                reason: "quantity must be at least 1".to_string(),
            });
        }

        let investment_total = position.investment_total().ok_or_else(|| {
            DashboardError::InvalidPosition {
                reason: format!(
                    "position size {} x{} is out of range",
                    position.entry_price, position.quantity
                ),
            }
        })?;
        if investment_total > self.trading_balance {
            warn!(
                "Rejected {} x{}: need {}, available {}",
                ticker, position.quantity, investment_total, self.trading_balance
            );
            return Err(DashboardError::InsufficientBalance {
                need: investment_total,
                available: self.trading_balance,
            });
        }

        let id = self.next_trade_id().ok_or_else(|| DashboardError::InvalidPosition {
            reason: "no trade id left above the stored journal".to_string(),
        })?;

        let trade = Trade {
            id,
            ticker,
            company: position.company.trim().to_string(),
            trade_type: TradeType::Buy,
            status: TradeStatus::Open,
            entry_price: position.entry_price,
            exit_price: None,
            current_price: position.current_price,
            quantity: position.quantity,
            profit: None,
            profit_percent: None,
            date: Local::now().date_naive(),
            notes: "Added via portfolio".to_string(),
        };

        info!(
            "Opened {} x{} @ {} (id {})",
            trade.ticker, trade.quantity, trade.entry_price, trade.id
        );

        self.trades.insert(0, trade);
        self.trading_balance -= investment_total;
        self.persist_trades();
        self.persist_balance();

        Ok(&self.trades[0])
    }

    /// Realize an open trade at its current price and credit the proceeds.
    pub fn close_trade(&mut self, id: i64) -> Result<&Trade, DashboardError> {
        let index = self
            .trades
            .iter()
            .position(|t| t.id == id)
            .ok_or(DashboardError::TradeNotFound { id })?;

        let trade = &mut self.trades[index];
        if !trade.is_open() {
            return Err(DashboardError::TradeAlreadyClosed {
                id,
                ticker: trade.ticker.clone(),
            });
        }

        let proceeds = trade.close();
        info!(
            "Closed {} x{} @ {}: P&L {} ({}%)",
            trade.ticker,
            trade.quantity,
            trade.current_price,
            trade.profit.unwrap_or_default(),
            trade.profit_percent.unwrap_or_default()
        );

        self.trading_balance = self.trading_balance.saturating_add(proceeds);
        self.persist_trades();
        self.persist_balance();

        Ok(&self.trades[index])
    }

    /// Re-mark open positions.
    ///
    /// Tickers with a prediction move to its last close; the rest take one
    /// synthetic tick from the price model.
    pub fn refresh_prices(&mut self) {
        let mut updated = 0usize;
        for trade in self.trades.iter_mut().filter(|t| t.is_open()) {
            let next = match find_prediction(&self.predictions, &trade.ticker) {
                Some(prediction) => prediction.last_close,
                None => self.price_model.next_price(trade.current_price),
            };
            if next != trade.current_price {
                debug!("{}: {} -> {}", trade.ticker, trade.current_price, next);
                trade.current_price = next;
                updated += 1;
            }
        }

        info!("Refreshed prices: {} open positions re-marked", updated);
        if updated > 0 {
            self.persist_trades();
        }
    }

    fn next_trade_id(&self) -> Option<i64> {
        let max_id = self.trades.iter().map(|t| t.id).max().unwrap_or(0);
        Some(Utc::now().timestamp_millis().max(max_id.checked_add(1)?))
    }

    // ---- Privacy ---------------------------------------------------------

    pub fn privacy_mode(&self) -> bool {
        self.privacy_mode
    }

    pub fn toggle_privacy_mode(&mut self) -> bool {
        self.privacy_mode = !self.privacy_mode;
        debug!("Privacy mode {}", if self.privacy_mode { "on" } else { "off" });
        save(self.storage.as_ref(), PRIVACY_MODE_KEY, &self.privacy_mode);
        self.privacy_mode
    }

    /// `prefix` plus either the grouped amount or the privacy mask.
    pub fn mask_value(&self, value: Decimal, prefix: &str) -> String {
        formatting::mask_value(value, prefix, self.privacy_mode)
    }

    /// Like [`DashboardStore::mask_value`] with the configured currency prefix.
    pub fn mask_amount(&self, value: Decimal) -> String {
        self.mask_value(value, self.config.currency_prefix())
    }

    // ---- Derived portfolio figures ---------------------------------------

    pub fn portfolio(&self) -> Portfolio<'_> {
        Portfolio::new(&self.trades, self.trading_balance)
    }

    pub fn open_trades(&self) -> Vec<&Trade> {
        self.portfolio().open_trades().collect()
    }

    pub fn closed_trades(&self) -> Vec<&Trade> {
        self.portfolio().closed_trades().collect()
    }

    pub fn invested_amount(&self) -> Decimal {
        self.portfolio().invested_amount()
    }

    pub fn market_value(&self) -> Decimal {
        self.portfolio().market_value()
    }

    pub fn total_equity(&self) -> Decimal {
        self.portfolio().total_equity()
    }

    pub fn floating_pl(&self) -> Decimal {
        self.portfolio().floating_pl()
    }

    pub fn floating_pl_percent(&self) -> Decimal {
        self.portfolio().floating_pl_percent()
    }

    pub fn cash_allocation(&self) -> Decimal {
        self.portfolio().cash_allocation()
    }

    pub fn invested_allocation(&self) -> Decimal {
        self.portfolio().invested_allocation()
    }

    pub fn winning_positions(&self) -> usize {
        self.portfolio().winning_positions()
    }

    pub fn losing_positions(&self) -> usize {
        self.portfolio().losing_positions()
    }

    pub fn best_performer(&self) -> Option<&Trade> {
        self.portfolio().best_performer()
    }

    pub fn journal_summary(&self) -> JournalSummary {
        JournalSummary::from_trades(&self.trades)
    }

    // ---- Predictions & statistics ----------------------------------------

    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    pub fn prediction(&self, ticker: &str) -> Option<&Prediction> {
        find_prediction(&self.predictions, ticker)
    }

    pub fn signal_stats(&self) -> SignalStats {
        SignalStats::from_predictions(&self.predictions, mock::MODEL_ACCURACY)
    }

    pub fn data_stats(&self) -> &DataStatistics {
        &self.data_stats
    }

    pub fn sync_status(&self) -> &SyncStatus {
        &self.sync_status
    }

    // ---- Training simulation ---------------------------------------------

    pub fn training_config(&self) -> &TrainingConfiguration {
        &self.training_config
    }

    /// Replace the training configuration. Only allowed while idle.
    pub fn set_training_config(
        &mut self,
        config: TrainingConfiguration,
    ) -> Result<(), DashboardError> {
        if self.is_training() {
            return Err(DashboardError::TrainingInProgress);
        }
        config.validate()?;
        self.training_config = config;
        Ok(())
    }

    pub fn is_training(&self) -> bool {
        lock_state(&self.training).is_training()
    }

    pub fn training_progress(&self) -> TrainingProgress {
        lock_state(&self.training).progress().clone()
    }

    pub fn training_logs(&self) -> Vec<LogEntry> {
        lock_state(&self.training).logs().to_vec()
    }

    /// Start a simulated training run with `config`.
    ///
    /// Returns `Ok(false)` without side effects when a run is already active.
    /// Must be called from within a tokio runtime.
    pub fn start_training(&mut self, config: TrainingConfiguration) -> Result<bool, DashboardError> {
        if self.is_training() {
            debug!("start_training ignored: a run is already active");
            return Ok(false);
        }
        config.validate()?;

        let run_id = {
            let mut state = lock_state(&self.training);
            let run_id = state.begin_run();
            state.push_log("Initializing training...", LogSeverity::Info);
            state.push_log(
                format!(
                    "Configuration: {} epochs, batch size {}",
                    config.epochs, config.batch_size
                ),
                LogSeverity::Info,
            );
            state.push_log("Loading data...", LogSeverity::Info);
            run_id
        };

        let loss_model = Box::new(NoisyDecayLoss::new(
            self.config
                .simulation
                .training_seed
                .map(|seed| seed.wrapping_add(run_id)),
        ));
        let run = TrainingRun::new(run_id, config.epochs, loss_model);

        info!(
            "Training run {} started: {} epochs, batch {}, lr {}, ticker {}",
            run_id, config.epochs, config.batch_size, config.learning_rate, config.ticker
        );

        // A finished previous task is replaced (and its handle dropped) here.
        self.training_task = Some(spawn_training(
            self.training.clone(),
            run,
            self.config.training_tick(),
        ));
        self.training_config = config;
        Ok(true)
    }

    /// Start a run with the stored configuration.
    pub fn start_configured_training(&mut self) -> Result<bool, DashboardError> {
        self.start_training(self.training_config.clone())
    }

    /// Cancel the active run. No epoch is recorded after this returns.
    ///
    /// Idempotent: stopping an idle store only releases the finished task.
    pub fn stop_training(&mut self) {
        let was_training = {
            let mut state = lock_state(&self.training);
            let was_training = state.end_run();
            if was_training {
                state.push_log("Training stopped by user", LogSeverity::Warning);
            }
            was_training
        };

        if let Some(handle) = self.training_task.take() {
            handle.cancel();
        }

        if was_training {
            info!("Training stopped by user");
        }
    }

    pub fn add_log(&self, message: impl Into<String>, severity: LogSeverity) {
        lock_state(&self.training).push_log(message, severity);
    }

    /// Release background work. Called on teardown; also runs on drop.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.training_task.take() {
            handle.cancel();
        }
        lock_state(&self.training).end_run();
        debug!("Dashboard store shut down");
    }

    // ---- Persistence -----------------------------------------------------

    fn persist_trades(&self) {
        save(self.storage.as_ref(), TRADES_KEY, &self.trades);
    }

    fn persist_balance(&self) {
        save(self.storage.as_ref(), TRADING_BALANCE_KEY, &self.trading_balance);
    }
}

impl Drop for DashboardStore {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryStore;
    use crate::infrastructure::simulation::FlatPrice;
    use rust_decimal_macros::dec;

    fn store_with_balance(balance: Decimal) -> (DashboardStore, Arc<InMemoryStore>) {
        let storage = Arc::new(InMemoryStore::new());
        let mut store = DashboardStore::new(DashboardConfig::default(), storage.clone());
        store.trading_balance = balance;
        (store, storage)
    }

    fn position(ticker: &str, entry: Decimal, current: Decimal, quantity: u64) -> NewPosition {
        NewPosition {
            ticker: ticker.to_string(),
            company: "Bank Central Asia".to_string(),
            entry_price: entry,
            current_price: current,
            quantity,
        }
    }

    #[test]
    fn test_fresh_store_uses_seed_defaults() {
        let (store, _) = store_with_balance(dec!(3000000));

        assert_eq!(store.trades().len(), 3);
        assert_eq!(store.open_trades().len(), 2);
        assert_eq!(store.closed_trades().len(), 1);
        assert!(!store.privacy_mode());
        assert_eq!(store.predictions().len(), 4);
    }

    #[test]
    fn test_add_trade_debits_balance() {
        let (mut store, storage) = store_with_balance(dec!(3000000));

        let trade = store
            .add_trade(position(" bbca.jk ", dec!(9650), dec!(9875), 100))
            .unwrap()
            .clone();

        assert_eq!(trade.ticker, "BBCA.JK");
        assert_eq!(trade.status, TradeStatus::Open);
        assert!(trade.profit.is_none());
        assert_eq!(store.trades()[0].id, trade.id);
        assert_eq!(store.trading_balance(), dec!(2035000));
        assert!(trade.id > 3);

        let stored = storage.get(TRADING_BALANCE_KEY).unwrap().unwrap();
        assert_eq!(serde_json::from_str::<Decimal>(&stored).unwrap(), dec!(2035000));
    }

    #[test]
    fn test_add_trade_rejects_insufficient_balance() {
        let (mut store, _) = store_with_balance(dec!(500000));
        let trades_before = store.trades().to_vec();

        let err = store
            .add_trade(position("BBCA.JK", dec!(9650), dec!(9875), 100))
            .unwrap_err();

        assert_eq!(
            err,
            DashboardError::InsufficientBalance {
                need: dec!(965000),
                available: dec!(500000)
            }
        );
        assert_eq!(store.trading_balance(), dec!(500000));
        assert_eq!(store.trades(), trades_before.as_slice());
    }

    #[test]
    fn test_add_trade_allows_exact_balance() {
        let (mut store, _) = store_with_balance(dec!(965000));

        assert!(store.add_trade(position("BBCA.JK", dec!(9650), dec!(9650), 100)).is_ok());
        assert_eq!(store.trading_balance(), Decimal::ZERO);
    }

    #[test]
    fn test_add_trade_validates_input() {
        let (mut store, _) = store_with_balance(dec!(3000000));

        for bad in [
            position("", dec!(100), dec!(100), 1),
            position("AAA", dec!(0), dec!(100), 1),
            position("AAA", dec!(100), dec!(-1), 1),
            position("AAA", dec!(100), dec!(100), 0),
        ] {
            assert!(matches!(
                store.add_trade(bad),
                Err(DashboardError::InvalidPosition { .. })
            ));
        }
        assert_eq!(store.trading_balance(), dec!(3000000));
    }

    #[test]
    fn test_close_trade_realizes_and_credits() {
        let (mut store, _) = store_with_balance(dec!(1000));

        let closed = store.close_trade(1).unwrap().clone();

        assert_eq!(closed.status, TradeStatus::Closed);
        assert_eq!(closed.exit_price, Some(dec!(5425)));
        assert_eq!(closed.profit, Some(dec!(15000)));
        assert_eq!(closed.profit_percent, Some(dec!(1.40)));
        assert_eq!(store.trading_balance(), dec!(1000) + dec!(1085000));
    }

    #[test]
    fn test_close_trade_errors_leave_state() {
        let (mut store, _) = store_with_balance(dec!(1000));

        assert_eq!(
            store.close_trade(999).unwrap_err(),
            DashboardError::TradeNotFound { id: 999 }
        );
        assert!(matches!(
            store.close_trade(3),
            Err(DashboardError::TradeAlreadyClosed { id: 3, .. })
        ));
        assert_eq!(store.trading_balance(), dec!(1000));
    }

    #[test]
    fn test_refresh_prices_marks_to_predictions() {
        let (store, _) = store_with_balance(dec!(0));
        let mut store = store.with_price_model(Box::new(FlatPrice));
        store.trades[0].current_price = dec!(5000);

        store.refresh_prices();

        // BBRI.JK has a prediction, GOTO.JK does not.
        assert_eq!(store.trade(1).unwrap().current_price, dec!(5425));
        assert_eq!(store.trade(2).unwrap().current_price, dec!(78));
        // Closed trades are never re-marked.
        assert_eq!(store.trade(3).unwrap().current_price, dec!(9875));
    }

    #[test]
    fn test_refresh_prices_persists_new_marks() {
        let (store, storage) = store_with_balance(dec!(0));
        let mut store = store.with_price_model(Box::new(FlatPrice));
        store.trades[0].current_price = dec!(5000);

        store.refresh_prices();

        let stored = storage.get(TRADES_KEY).unwrap().unwrap();
        let trades: Vec<Trade> = serde_json::from_str(&stored).unwrap();
        let bbri = trades.iter().find(|t| t.id == 1).unwrap();
        assert_eq!(bbri.current_price, dec!(5425));
        assert_eq!(trades.len(), 3);
    }

    #[test]
    fn test_refresh_without_changes_skips_storage() {
        let (store, storage) = store_with_balance(dec!(0));
        let mut store = store.with_price_model(Box::new(FlatPrice));

        store.refresh_prices();

        assert_eq!(storage.get(TRADES_KEY).unwrap(), None);
    }

    #[test]
    fn test_add_trade_rejects_out_of_range_size() {
        let (mut store, storage) = store_with_balance(dec!(3000000));

        let err = store
            .add_trade(position(
                "BBCA.JK",
                dec!(1000000000000000),
                dec!(1000000000000000),
                1_000_000_000_000_000,
            ))
            .unwrap_err();

        assert!(matches!(err, DashboardError::InvalidPosition { .. }));
        assert_eq!(store.trading_balance(), dec!(3000000));
        assert_eq!(store.trades().len(), 3);
        assert_eq!(storage.get(TRADES_KEY).unwrap(), None);
    }

    #[test]
    fn test_add_trade_rejects_exhausted_ids() {
        let (mut store, _) = store_with_balance(dec!(3000000));
        store.trades[0].id = i64::MAX;

        let err = store
            .add_trade(position("BBCA.JK", dec!(9650), dec!(9875), 1))
            .unwrap_err();

        assert!(matches!(err, DashboardError::InvalidPosition { .. }));
        assert_eq!(store.trading_balance(), dec!(3000000));
        assert_eq!(store.trades().len(), 3);
    }

    #[test]
    fn test_oversized_stored_trade_does_not_panic() {
        let (mut store, _) = store_with_balance(dec!(3000000));
        store.trades[1].current_price = dec!(70000000000000000000000000000);
        store.trades[1].entry_price = dec!(1);
        store.trades[1].quantity = 2;

        assert_eq!(store.total_equity(), Decimal::MAX);
        assert_eq!(store.cash_allocation() + store.invested_allocation(), dec!(100));

        store.close_trade(2).unwrap();
        assert_eq!(store.trading_balance(), Decimal::MAX);
    }

    #[test]
    fn test_privacy_toggle_and_mask() {
        let (mut store, storage) = store_with_balance(dec!(0));

        assert_eq!(store.mask_value(dec!(1234567), "Rp "), "Rp 1,234,567");
        assert!(store.toggle_privacy_mode());
        assert_eq!(store.mask_value(dec!(1234567), "Rp "), "Rp ******");
        assert_eq!(store.mask_value(dec!(-42), "Rp "), "Rp ******");
        assert_eq!(store.mask_amount(dec!(5)), "Rp ******");
        assert_eq!(storage.get(PRIVACY_MODE_KEY).unwrap().as_deref(), Some("true"));

        assert!(!store.toggle_privacy_mode());
        assert_eq!(store.mask_amount(dec!(5)), "Rp 5");
    }

    #[test]
    fn test_derived_reads_follow_mutations() {
        let (mut store, _) = store_with_balance(dec!(3000000));
        let equity_before = store.total_equity();

        store.close_trade(2).unwrap();

        // Closing at the current mark moves value from positions to cash.
        assert_eq!(store.total_equity(), equity_before);
        assert_eq!(store.open_trades().len(), 1);
        assert_eq!(store.invested_amount(), dec!(1070000));
        assert_eq!(store.best_performer().map(|t| t.id), Some(1));
        assert_eq!(store.cash_allocation() + store.invested_allocation(), dec!(100));
    }

    #[test]
    fn test_set_training_config_validates() {
        let (mut store, _) = store_with_balance(dec!(0));

        let config = TrainingConfiguration {
            epochs: 10,
            ..Default::default()
        };
        store.set_training_config(config.clone()).unwrap();
        assert_eq!(store.training_config(), &config);

        let invalid = TrainingConfiguration {
            epochs: 0,
            ..Default::default()
        };
        assert!(store.set_training_config(invalid).is_err());
        assert_eq!(store.training_config().epochs, 10);
    }

    #[test]
    fn test_stop_when_idle_is_quiet() {
        let (mut store, _) = store_with_balance(dec!(0));

        store.stop_training();
        store.stop_training();

        assert!(!store.is_training());
        assert!(store.training_logs().is_empty());
    }

    #[test]
    fn test_add_log_appends() {
        let (store, _) = store_with_balance(dec!(0));

        store.add_log("Dataset refreshed", LogSeverity::Default);

        let logs = store.training_logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].message, "Dataset refreshed");
    }
}
