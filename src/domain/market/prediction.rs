use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical model output for a ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Hold => write!(f, "HOLD"),
        }
    }
}

/// Entry, exit and trailing parameters accompanying a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub entry_low: Decimal,
    pub entry_high: Decimal,
    pub target_price: Decimal,
    pub target_percent: Decimal,
    pub stop_loss: Decimal,
    pub stop_loss_percent: Decimal,
    pub trailing_stop: Decimal,
    pub risk_reward: Decimal,
}

impl Strategy {
    /// Whether `price` sits inside the recommended entry band (inclusive).
    pub fn in_entry_band(&self, price: Decimal) -> bool {
        price >= self.entry_low && price <= self.entry_high
    }
}

/// Point-in-time model output for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub ticker: String,
    pub company: String,
    pub last_close: Decimal,
    /// Day change in percent.
    pub change: Decimal,
    pub signal: Signal,
    /// Model confidence in percent.
    pub confidence: u8,
    pub predicted: Decimal,
    pub strategy: Strategy,
}

impl Prediction {
    /// Predicted move from the last close, in percent (two decimals).
    pub fn predicted_change_percent(&self) -> Decimal {
        if self.last_close.is_zero() {
            return Decimal::ZERO;
        }
        ((self.predicted - self.last_close) / self.last_close * Decimal::ONE_HUNDRED).round_dp(2)
    }
}

/// Signal breakdown shown on the dashboard and predictions pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalStats {
    pub buy_signals: usize,
    pub sell_signals: usize,
    pub hold_signals: usize,
    pub model_accuracy: Decimal,
}

impl SignalStats {
    pub fn from_predictions(predictions: &[Prediction], model_accuracy: Decimal) -> Self {
        let count = |signal: Signal| predictions.iter().filter(|p| p.signal == signal).count();
        Self {
            buy_signals: count(Signal::Buy),
            sell_signals: count(Signal::Sell),
            hold_signals: count(Signal::Hold),
            model_accuracy,
        }
    }
}

/// Case-insensitive lookup. An unknown ticker is a normal outcome.
pub fn find_prediction<'a>(predictions: &'a [Prediction], ticker: &str) -> Option<&'a Prediction> {
    predictions
        .iter()
        .find(|p| p.ticker.eq_ignore_ascii_case(ticker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn prediction(ticker: &str, signal: Signal, last_close: Decimal, predicted: Decimal) -> Prediction {
        Prediction {
            ticker: ticker.to_string(),
            company: String::new(),
            last_close,
            change: Decimal::ZERO,
            signal,
            confidence: 70,
            predicted,
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
        }
    }

    #[test]
    fn test_predicted_change_percent() {
        let p = prediction("BBCA.JK", Signal::Buy, dec!(9875), dec!(10250));
        // (10250 - 9875) / 9875 * 100 = 3.797...
        assert_eq!(p.predicted_change_percent(), dec!(3.80));
    }

    #[test]
    fn test_signal_stats_counts() {
        let predictions = vec![
            prediction("A", Signal::Buy, dec!(1), dec!(1)),
            prediction("B", Signal::Buy, dec!(1), dec!(1)),
            prediction("C", Signal::Sell, dec!(1), dec!(1)),
            prediction("D", Signal::Hold, dec!(1), dec!(1)),
        ];

        let stats = SignalStats::from_predictions(&predictions, dec!(87.5));

        assert_eq!(stats.buy_signals, 2);
        assert_eq!(stats.sell_signals, 1);
        assert_eq!(stats.hold_signals, 1);
        assert_eq!(stats.model_accuracy, dec!(87.5));
    }

    #[test]
    fn test_find_prediction_unknown_ticker() {
        let predictions = vec![prediction("TLKM.JK", Signal::Buy, dec!(3850), dec!(4100))];

        assert!(find_prediction(&predictions, "tlkm.jk").is_some());
        assert!(find_prediction(&predictions, "XXXX.JK").is_none());
    }

    #[test]
    fn test_entry_band_is_inclusive() {
        let p = prediction("BBCA.JK", Signal::Buy, dec!(9875), dec!(10250));

        assert!(p.strategy.in_entry_band(dec!(9800)));
        assert!(p.strategy.in_entry_band(dec!(9900)));
        assert!(!p.strategy.in_entry_band(dec!(9901)));
    }
}
