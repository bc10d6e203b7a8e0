//! Seed data for the dashboard: the starter journal, the point-in-time
//! prediction set and the static dataset statistics.

use crate::domain::market::prediction::{Prediction, Signal, Strategy};
use crate::domain::market::statistics::{DataStatistics, SyncStatus};
use crate::domain::trading::types::{Trade, TradeStatus, TradeType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Overall model accuracy shown next to the signal breakdown.
pub const MODEL_ACCURACY: Decimal = dec!(87.5);

fn seed_date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, day).unwrap_or_default()
}

pub fn initial_trades() -> Vec<Trade> {
    vec![
        Trade {
            id: 1,
            ticker: "BBRI.JK".to_string(),
            company: "Bank Rakyat Indonesia".to_string(),
            trade_type: TradeType::Buy,
            status: TradeStatus::Open,
            entry_price: dec!(5350),
            exit_price: None,
            current_price: dec!(5425),
            quantity: 200,
            profit: None,
            profit_percent: None,
            date: seed_date(30),
            notes: "Long-term hold".to_string(),
        },
        Trade {
            id: 2,
            ticker: "GOTO.JK".to_string(),
            company: "GoTo Gojek Tokopedia".to_string(),
            trade_type: TradeType::Buy,
            status: TradeStatus::Open,
            entry_price: dec!(72),
            exit_price: None,
            current_price: dec!(78),
            quantity: 500,
            profit: None,
            profit_percent: None,
            date: seed_date(29),
            notes: "Speculative play".to_string(),
        },
        Trade {
            id: 3,
            ticker: "BBCA.JK".to_string(),
            company: "Bank Central Asia".to_string(),
            trade_type: TradeType::Buy,
            status: TradeStatus::Closed,
            entry_price: dec!(9650),
            exit_price: Some(dec!(9875)),
            current_price: dec!(9875),
            quantity: 100,
            profit: Some(dec!(22500)),
            profit_percent: Some(dec!(2.33)),
            date: seed_date(28),
            notes: "Strong technical breakout".to_string(),
        },
    ]
}

pub fn initial_predictions() -> Vec<Prediction> {
    vec![
        Prediction {
            ticker: "BBCA.JK".to_string(),
            company: "Bank Central Asia".to_string(),
            last_close: dec!(9875),
            change: dec!(2.34),
            signal: Signal::Buy,
            confidence: 87,
            predicted: dec!(10250),
            strategy: Strategy {
                entry_low: dec!(9800),
                entry_high: dec!(9900),
                target_price: dec!(10500),
                target_percent: dec!(6.3),
                stop_loss: dec!(9500),
                stop_loss_percent: dec!(-3.8),
                trailing_stop: dec!(2.5),
                risk_reward: dec!(1.7),
            },
        },
        Prediction {
            ticker: "BBRI.JK".to_string(),
            company: "Bank Rakyat Indonesia".to_string(),
            last_close: dec!(5425),
            change: dec!(-1.23),
            signal: Signal::Hold,
            confidence: 65,
            predicted: dec!(5400),
            strategy: Strategy {
                entry_low: dec!(5350),
                entry_high: dec!(5450),
                target_price: dec!(5700),
                target_percent: dec!(5.1),
                stop_loss: dec!(5200),
                stop_loss_percent: dec!(-4.1),
                trailing_stop: dec!(2.0),
                risk_reward: dec!(1.2),
            },
        },
        Prediction {
            ticker: "TLKM.JK".to_string(),
            company: "Telkom Indonesia".to_string(),
            last_close: dec!(3850),
            change: dec!(0.52),
            signal: Signal::Buy,
            confidence: 78,
            predicted: dec!(4100),
            strategy: Strategy {
                entry_low: dec!(3800),
                entry_high: dec!(3900),
                target_price: dec!(4200),
                target_percent: dec!(9.1),
                stop_loss: dec!(3650),
                stop_loss_percent: dec!(-5.2),
                trailing_stop: dec!(3.0),
                risk_reward: dec!(1.8),
            },
        },
        Prediction {
            ticker: "ASII.JK".to_string(),
            company: "Astra International".to_string(),
            last_close: dec!(5125),
            change: dec!(-2.15),
            signal: Signal::Sell,
            confidence: 72,
            predicted: dec!(4850),
            strategy: Strategy {
                entry_low: dec!(5000),
                entry_high: dec!(5150),
                target_price: dec!(4700),
                target_percent: dec!(-8.3),
                stop_loss: dec!(5400),
                stop_loss_percent: dec!(5.4),
                trailing_stop: dec!(2.5),
                risk_reward: dec!(1.5),
            },
        },
    ]
}

pub fn data_statistics() -> DataStatistics {
    DataStatistics {
        total_records: 1_250_847,
        total_tickers: 15,
        days_of_data: 365,
        models_count: 15,
        avg_accuracy: 85,
    }
}

pub fn sync_status() -> SyncStatus {
    SyncStatus {
        database: "connected".to_string(),
        last_sync: "2026-02-01 08:30:00".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::prediction::SignalStats;

    #[test]
    fn test_seed_trades_respect_open_invariant() {
        for trade in initial_trades() {
            if trade.is_open() {
                assert!(trade.profit.is_none() && trade.profit_percent.is_none());
                assert!(trade.exit_price.is_none());
            } else {
                assert!(trade.profit.is_some() && trade.exit_price.is_some());
            }
        }
    }

    #[test]
    fn test_seed_signal_breakdown() {
        let stats = SignalStats::from_predictions(&initial_predictions(), MODEL_ACCURACY);
        assert_eq!(
            (stats.buy_signals, stats.sell_signals, stats.hold_signals),
            (2, 1, 1)
        );
    }
}
