use crate::domain::trading::types::{Trade, percent_of};
use rust_decimal::{Decimal, RoundingStrategy};

/// Read-only view over the trade list and cash balance.
///
/// Every figure is recomputed from the borrowed state on each call, so a view
/// taken right after a mutation always reflects it.
#[derive(Debug, Clone, Copy)]
pub struct Portfolio<'a> {
    trades: &'a [Trade],
    cash: Decimal,
}

impl<'a> Portfolio<'a> {
    pub fn new(trades: &'a [Trade], cash: Decimal) -> Self {
        Self { trades, cash }
    }

    pub fn cash(&self) -> Decimal {
        self.cash
    }

    pub fn open_trades(self) -> impl Iterator<Item = &'a Trade> {
        self.trades.iter().filter(|t| t.is_open())
    }

    pub fn closed_trades(self) -> impl Iterator<Item = &'a Trade> {
        self.trades.iter().filter(|t| !t.is_open())
    }

    /// Σ entry × quantity over open positions
    pub fn invested_amount(&self) -> Decimal {
        saturating_sum(self.open_trades().map(Trade::cost_basis))
    }

    /// Σ current × quantity over open positions
    pub fn market_value(&self) -> Decimal {
        saturating_sum(self.open_trades().map(Trade::market_value))
    }

    /// Calculate total equity (cash + marked value of open positions)
    pub fn total_equity(&self) -> Decimal {
        self.cash.saturating_add(self.market_value())
    }

    /// Calculate unrealized P&L for all open positions
    pub fn floating_pl(&self) -> Decimal {
        saturating_sum(self.open_trades().map(Trade::floating_pl))
    }

    /// Unrealized P&L as a percentage of the invested amount, two decimals.
    pub fn floating_pl_percent(&self) -> Decimal {
        percent_of(self.floating_pl(), self.invested_amount()).round_dp(2)
    }

    /// Share of total equity held as cash, in whole percent.
    ///
    /// An empty portfolio counts as fully in cash.
    pub fn cash_allocation(&self) -> Decimal {
        let equity = self.total_equity();
        if equity <= Decimal::ZERO {
            return Decimal::ONE_HUNDRED;
        }
        whole_percent(self.cash, equity)
    }

    /// Share of total equity held in open positions, in whole percent.
    pub fn invested_allocation(&self) -> Decimal {
        let equity = self.total_equity();
        if equity <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        whole_percent(self.market_value(), equity)
    }

    pub fn winning_positions(&self) -> usize {
        self.open_trades()
            .filter(|t| t.floating_pl() > Decimal::ZERO)
            .count()
    }

    pub fn losing_positions(&self) -> usize {
        self.open_trades()
            .filter(|t| t.floating_pl() < Decimal::ZERO)
            .count()
    }

    /// Open position with the highest floating P&L %.
    ///
    /// Ties resolve to the position listed first (the most recently opened).
    pub fn best_performer(&self) -> Option<&'a Trade> {
        self.open_trades().fold(None, |best: Option<&'a Trade>, trade| match best {
            Some(current) if current.floating_pl_percent() >= trade.floating_pl_percent() => {
                Some(current)
            }
            _ => Some(trade),
        })
    }
}

// Banker's rounding keeps `round(x) + round(100 - x) == 100` at the .5 midpoint.
fn whole_percent(part: Decimal, whole: Decimal) -> Decimal {
    percent_of(part, whole).round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

// Clamps at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}
