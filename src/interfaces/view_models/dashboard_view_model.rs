use crate::application::dashboard_store::DashboardStore;
use crate::domain::formatting::{signed_amount, signed_percent};
use rust_decimal::Decimal;

/// Direction of a figure, used by the presentation layer to pick colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
}

impl Tone {
    pub fn of(value: Decimal) -> Self {
        if value >= Decimal::ZERO {
            Tone::Positive
        } else {
            Tone::Negative
        }
    }
}

pub struct DashboardMetrics {
    pub total_equity: String,
    pub cash: String,
    pub invested: String,
    pub market_value: String,
    pub pnl_value: String,
    pub pnl_pct: String,
    pub pnl_tone: Tone,
    pub pnl_arrow: &'static str,
    pub position_count: usize,
    pub winning_positions: usize,
    pub losing_positions: usize,
    pub cash_allocation: Decimal,
    pub invested_allocation: Decimal,
}

pub struct BestPerformerMetrics {
    pub ticker: String,
    pub company: String,
    pub pnl_pct: String,
    pub pnl_value: String,
}

pub struct JournalMetrics {
    pub win_rate: String,
    pub total_trades: usize,
    pub average_return: String,
    pub total_profit: String,
    pub profit_tone: Tone,
}

pub struct SignalMetrics {
    pub buy: usize,
    pub sell: usize,
    pub hold: usize,
    pub model_accuracy: String,
}

pub struct DashboardViewModel;

impl DashboardViewModel {
    pub fn get_metrics(store: &DashboardStore) -> DashboardMetrics {
        let portfolio = store.portfolio();
        let pnl = portfolio.floating_pl();
        let tone = Tone::of(pnl);
        let currency = store.config().currency_prefix();

        DashboardMetrics {
            total_equity: store.mask_amount(portfolio.total_equity()),
            cash: store.mask_amount(portfolio.cash()),
            invested: store.mask_amount(portfolio.invested_amount()),
            market_value: store.mask_amount(portfolio.market_value()),
            pnl_value: signed_amount(pnl, currency, store.privacy_mode()),
            pnl_pct: signed_percent(portfolio.floating_pl_percent()),
            pnl_tone: tone,
            pnl_arrow: match tone {
                Tone::Positive => "↗",
                Tone::Negative => "↘",
            },
            position_count: portfolio.open_trades().count(),
            winning_positions: portfolio.winning_positions(),
            losing_positions: portfolio.losing_positions(),
            cash_allocation: portfolio.cash_allocation(),
            invested_allocation: portfolio.invested_allocation(),
        }
    }

    pub fn get_best_performer(store: &DashboardStore) -> Option<BestPerformerMetrics> {
        let currency = store.config().currency_prefix();
        store.best_performer().map(|trade| BestPerformerMetrics {
            ticker: trade.ticker.clone(),
            company: trade.company.clone(),
            pnl_pct: signed_percent(trade.floating_pl_percent()),
            pnl_value: signed_amount(trade.floating_pl(), currency, store.privacy_mode()),
        })
    }

    pub fn get_journal(store: &DashboardStore) -> JournalMetrics {
        let summary = store.journal_summary();
        JournalMetrics {
            win_rate: format!("{:.1}%", summary.win_rate),
            total_trades: summary.total_trades,
            average_return: signed_percent(summary.average_return),
            total_profit: signed_amount(
                summary.total_profit,
                store.config().currency_prefix(),
                store.privacy_mode(),
            ),
            profit_tone: Tone::of(summary.total_profit),
        }
    }

    pub fn get_signals(store: &DashboardStore) -> SignalMetrics {
        let stats = store.signal_stats();
        SignalMetrics {
            buy: stats.buy_signals,
            sell: stats.sell_signals,
            hold: stats.hold_signals,
            model_accuracy: format!("{}%", stats.model_accuracy),
        }
    }
}
