use crate::application::dashboard_store::DashboardStore;
use crate::domain::ml::training::{LogSeverity, TrainingProgress};

pub struct TrainingMetrics {
    pub status: &'static str,
    pub epoch_label: String,
    pub percent_complete: f64,
    pub current_loss: String,
    pub best_loss: String,
    pub elapsed: String,
}

pub struct LogLine {
    pub text: String,
    pub severity: LogSeverity,
}

pub struct TrainingViewModel;

impl TrainingViewModel {
    pub fn get_metrics(store: &DashboardStore) -> TrainingMetrics {
        let progress = store.training_progress();
        let epochs = store.training_config().epochs;
        Self::metrics_for(&progress, epochs, store.is_training())
    }

    fn metrics_for(progress: &TrainingProgress, epochs: u32, is_training: bool) -> TrainingMetrics {
        let status = if is_training {
            "Training"
        } else if progress.current_epoch >= epochs && epochs > 0 {
            "Completed"
        } else {
            "Idle"
        };

        TrainingMetrics {
            status,
            epoch_label: format!("{}/{}", progress.current_epoch, epochs),
            percent_complete: progress.percent_complete(epochs),
            current_loss: format!("{:.4}", progress.current_loss),
            best_loss: progress
                .best_loss()
                .map(|loss| format!("{:.4}", loss))
                .unwrap_or_else(|| "-".to_string()),
            elapsed: progress.elapsed_label(),
        }
    }

    /// Log lines as rendered in the console panel, oldest first.
    pub fn get_log_lines(store: &DashboardStore) -> Vec<LogLine> {
        store
            .training_logs()
            .into_iter()
            .map(|entry| LogLine {
                text: format!("{} {}", entry.time, entry.message),
                severity: entry.severity,
            })
            .collect()
    }
}
