use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeType {
    Buy,
    Sell,
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeType::Buy => write!(f, "BUY"),
            TradeType::Sell => write!(f, "SELL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeStatus {
    Open,
    Closed,
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A journal entry for a position, open or realized.
///
/// `profit` and `profit_percent` stay `None` while the trade is open and are
/// filled in by [`Trade::close`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: i64,
    pub ticker: String,
    pub company: String,
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    pub status: TradeStatus,
    pub entry_price: Decimal,
    pub exit_price: Option<Decimal>,
    pub current_price: Decimal,
    pub quantity: u64,
    pub profit: Option<Decimal>,
    pub profit_percent: Option<Decimal>,
    pub date: NaiveDate,
    pub notes: String,
}

impl Trade {
    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }

    /// Capital committed at entry.
    pub fn cost_basis(&self) -> Decimal {
        self.entry_price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Position value marked to the current price.
    pub fn market_value(&self) -> Decimal {
        self.current_price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Unrealized P&L: (current - entry) * quantity
    pub fn floating_pl(&self) -> Decimal {
        self.current_price
            .saturating_sub(self.entry_price)
            .saturating_mul(Decimal::from(self.quantity))
    }

    /// Unrealized P&L relative to the cost basis, in percent.
    pub fn floating_pl_percent(&self) -> Decimal {
        percent_of(self.floating_pl(), self.cost_basis())
    }

    /// Realize the position at its current price.
    ///
    /// Returns the proceeds to credit back to the trading balance.
    pub fn close(&mut self) -> Decimal {
        let proceeds = self.market_value();
        let profit = self.floating_pl();
        let profit_percent = percent_of(
            self.current_price.saturating_sub(self.entry_price),
            self.entry_price,
        )
        .round_dp(2);

        self.status = TradeStatus::Closed;
        self.exit_price = Some(self.current_price);
        self.profit = Some(profit);
        self.profit_percent = Some(profit_percent);

        proceeds
    }
}

/// `part / whole * 100`, zero for an empty whole, clamped instead of overflowing.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if part.is_sign_negative() == whole.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        })
}

/// User input for opening a position from the portfolio page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPosition {
    pub ticker: String,
    pub company: String,
    pub entry_price: Decimal,
    pub current_price: Decimal,
    pub quantity: u64,
}

impl NewPosition {
    /// Total cash needed to open the position, `None` when it does not fit a `Decimal`.
    pub fn investment_total(&self) -> Option<Decimal> {
        self.entry_price.checked_mul(Decimal::from(self.quantity))
    }
}
