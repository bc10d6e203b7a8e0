use crate::application::dashboard_store::DashboardStore;
use crate::domain::formatting::{format_grouped, signed_percent};
use crate::domain::market::prediction::{Prediction, Signal};
use crate::interfaces::view_models::dashboard_view_model::Tone;

pub struct PredictionRow {
    pub ticker: String,
    pub company: String,
    pub signal: Signal,
    pub confidence: String,
    pub last_close: String,
    pub day_change: String,
    pub day_tone: Tone,
    pub predicted: String,
    pub predicted_change: String,
    pub entry_band: String,
    /// Last close sits inside the recommended entry band.
    pub in_entry_band: bool,
    pub target: String,
    pub stop_loss: String,
    pub risk_reward: String,
}

impl From<&Prediction> for PredictionRow {
    fn from(p: &Prediction) -> Self {
        let s = &p.strategy;
        Self {
            ticker: p.ticker.clone(),
            company: p.company.clone(),
            signal: p.signal,
            confidence: format!("{}%", p.confidence),
            last_close: format_grouped(p.last_close),
            day_change: signed_percent(p.change),
            day_tone: Tone::of(p.change),
            predicted: format_grouped(p.predicted),
            predicted_change: signed_percent(p.predicted_change_percent()),
            entry_band: format!(
                "{} - {}",
                format_grouped(s.entry_low),
                format_grouped(s.entry_high)
            ),
            in_entry_band: s.in_entry_band(p.last_close),
            target: format!(
                "{} ({})",
                format_grouped(s.target_price),
                signed_percent(s.target_percent)
            ),
            stop_loss: format!(
                "{} ({})",
                format_grouped(s.stop_loss),
                signed_percent(s.stop_loss_percent)
            ),
            risk_reward: format!("1:{}", s.risk_reward),
        }
    }
}

pub struct PredictionViewModel;

impl PredictionViewModel {
    pub fn get_rows(store: &DashboardStore) -> Vec<PredictionRow> {
        store.predictions().iter().map(PredictionRow::from).collect()
    }

    /// Row for a single ticker, `None` when the model has no opinion on it.
    pub fn get_row(store: &DashboardStore, ticker: &str) -> Option<PredictionRow> {
        store.prediction(ticker).map(PredictionRow::from)
    }
}
