use crate::domain::errors::DashboardError;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Best-loss value before the first epoch reports in.
pub const BEST_LOSS_SENTINEL: f64 = 999.0;

/// Lower bound of the simulated loss curve.
pub const LOSS_FLOOR: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingConfiguration {
    pub epochs: u32,
    pub batch_size: u32,
    pub learning_rate: String,
    /// Ticker filter, `ALL` for every ticker.
    pub ticker: String,
}

impl Default for TrainingConfiguration {
    fn default() -> Self {
        Self {
            epochs: 25,
            batch_size: 32,
            learning_rate: "0.001".to_string(),
            ticker: "ALL".to_string(),
        }
    }
}

impl TrainingConfiguration {
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.epochs == 0 {
            return Err(DashboardError::InvalidTrainingConfig {
                reason: "epochs must be at least 1".to_string(),
            });
        }
        if self.batch_size == 0 {
            return Err(DashboardError::InvalidTrainingConfig {
                reason: "batch size must be at least 1".to_string(),
            });
        }
        match self.learning_rate.trim().parse::<f64>() {
            Ok(rate) if rate.is_finite() && rate > 0.0 => Ok(()),
            _ => Err(DashboardError::InvalidTrainingConfig {
                reason: format!("learning rate '{}' is not a positive number", self.learning_rate),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingProgress {
    pub current_epoch: u32,
    pub current_loss: f64,
    pub best_loss: f64,
    /// Seconds of simulated training.
    pub elapsed_time: u64,
}

impl Default for TrainingProgress {
    fn default() -> Self {
        Self {
            current_epoch: 0,
            current_loss: 0.0,
            best_loss: BEST_LOSS_SENTINEL,
            elapsed_time: 0,
        }
    }
}

impl TrainingProgress {
    /// Record one finished epoch.
    pub fn advance(&mut self, epoch: u32, loss: f64) {
        self.current_epoch = epoch;
        self.current_loss = loss;
        self.best_loss = self.best_loss.min(loss);
        self.elapsed_time += 1;
    }

    /// `None` until an epoch has improved on the sentinel.
    pub fn best_loss(&self) -> Option<f64> {
        (self.best_loss < BEST_LOSS_SENTINEL).then_some(self.best_loss)
    }

    pub fn percent_complete(&self, epochs: u32) -> f64 {
        if epochs == 0 {
            return 0.0;
        }
        (f64::from(self.current_epoch) / f64::from(epochs) * 100.0).min(100.0)
    }

    /// Elapsed time as `"{minutes}m {seconds}s"`.
    pub fn elapsed_label(&self) -> String {
        format!("{}m {}s", self.elapsed_time / 60, self.elapsed_time % 60)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSeverity {
    Success,
    Warning,
    Error,
    Info,
    #[default]
    Default,
}

impl fmt::Display for LogSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSeverity::Success => write!(f, "success"),
            LogSeverity::Warning => write!(f, "warning"),
            LogSeverity::Error => write!(f, "error"),
            LogSeverity::Info => write!(f, "info"),
            LogSeverity::Default => write!(f, "default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub time: String,
    pub message: String,
    #[serde(rename = "type")]
    pub severity: LogSeverity,
}

impl LogEntry {
    /// Stamp a message with the local wall-clock time, e.g. `[08:30:00]`.
    pub fn now(message: impl Into<String>, severity: LogSeverity) -> Self {
        Self {
            time: Local::now().format("[%H:%M:%S]").to_string(),
            message: message.into(),
            severity,
        }
    }
}
