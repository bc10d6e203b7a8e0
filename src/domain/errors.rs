use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by dashboard state mutations.
///
/// Every variant leaves the store untouched: callers surface the message to the
/// user and carry on with the previous state.
#[derive(Debug, Error, PartialEq)]
pub enum DashboardError {
    #[error("Insufficient trading balance: need {need}, available {available}")]
    InsufficientBalance { need: Decimal, available: Decimal },

    #[error("Trade not found: {id}")]
    TradeNotFound { id: i64 },

    #[error("Trade {id} ({ticker}) is already closed")]
    TradeAlreadyClosed { id: i64, ticker: String },

    #[error("Invalid position: {reason}")]
    InvalidPosition { reason: String },

    #[error("Invalid training configuration: {reason}")]
    InvalidTrainingConfig { reason: String },

    #[error("Training configuration cannot change while training is running")]
    TrainingInProgress,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_insufficient_balance_formatting() {
        let error = DashboardError::InsufficientBalance {
            need: dec!(965000),
            available: dec!(500000),
        };

        assert_eq!(
            error.to_string(),
            "Insufficient trading balance: need 965000, available 500000"
        );
    }

    #[test]
    fn test_already_closed_formatting() {
        let error = DashboardError::TradeAlreadyClosed {
            id: 3,
            ticker: "BBCA.JK".to_string(),
        };

        let msg = error.to_string();
        assert!(msg.contains("BBCA.JK"));
        assert!(msg.contains('3'));
    }
}
