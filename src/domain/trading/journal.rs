use crate::domain::trading::types::Trade;
use rust_decimal::Decimal;
use serde::Serialize;

/// Realized performance over closed trades.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalSummary {
    /// Percentage of closed trades with a positive profit, one decimal.
    pub win_rate: Decimal,
    pub total_trades: usize,
    /// Mean profit percent across closed trades, two decimals.
    pub average_return: Decimal,
    pub total_profit: Decimal,
}

impl JournalSummary {
    pub fn from_trades<'a>(trades: impl IntoIterator<Item = &'a Trade>) -> Self {
        let mut total_trades = 0usize;
        let mut winners = 0usize;
        let mut return_sum = Decimal::ZERO;
        let mut total_profit = Decimal::ZERO;

        for trade in trades.into_iter().filter(|t| !t.is_open()) {
            let profit = trade.profit.unwrap_or_default();
            total_trades += 1;
            if profit > Decimal::ZERO {
                winners += 1;
            }
            return_sum = return_sum.saturating_add(trade.profit_percent.unwrap_or_default());
            total_profit = total_profit.saturating_add(profit);
        }

        if total_trades == 0 {
            return Self {
                win_rate: Decimal::ZERO,
                total_trades,
                average_return: Decimal::ZERO,
                total_profit,
            };
        }

        let count = Decimal::from(total_trades);
        Self {
            win_rate: (Decimal::from(winners) / count * Decimal::ONE_HUNDRED).round_dp(1),
            total_trades,
            average_return: (return_sum / count).round_dp(2),
            total_profit,
        }
    }
}
