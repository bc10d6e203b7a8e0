//! Fake model training driven by a periodic timer.
//!
//! A [`TrainingRun`] advances the shared [`TrainingState`] one epoch per tick.
//! [`spawn_training`] drives a run on the tokio runtime and hands back a
//! [`TrainingHandle`] whose cancellation is immediate: every tick re-checks the
//! run id under the state lock, so once `stop` has flipped the state no later
//! tick can mutate it.

use crate::domain::ml::training::{LogEntry, LogSeverity, TrainingProgress};
use crate::infrastructure::simulation::LossModel;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Progress, log and run flag shared between the store and the timer task.
#[derive(Debug, Clone, Default)]
pub struct TrainingState {
    progress: TrainingProgress,
    logs: Vec<LogEntry>,
    is_training: bool,
    run_id: u64,
}

impl TrainingState {
    pub fn progress(&self) -> &TrainingProgress {
        &self.progress
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn is_training(&self) -> bool {
        self.is_training
    }

    pub fn push_log(&mut self, message: impl Into<String>, severity: LogSeverity) {
        self.logs.push(LogEntry::now(message, severity));
    }

    /// Reset progress and logs and mark a new run as active.
    pub fn begin_run(&mut self) -> u64 {
        self.run_id += 1;
        self.progress = TrainingProgress::default();
        self.logs.clear();
        self.is_training = true;
        self.run_id
    }

    /// Mark the active run as finished. Returns `false` if nothing was running.
    pub fn end_run(&mut self) -> bool {
        let was_training = self.is_training;
        self.is_training = false;
        was_training
    }

    fn is_current(&self, run_id: u64) -> bool {
        self.is_training && self.run_id == run_id
    }
}

/// Shared handle to the training state.
pub type SharedTrainingState = Arc<Mutex<TrainingState>>;

/// Lock the shared state, recovering the data if a previous holder panicked.
pub fn lock_state(state: &SharedTrainingState) -> MutexGuard<'_, TrainingState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One more epoch recorded, the run continues.
    Advanced,
    /// The final epoch was recorded and the run is over.
    Completed,
    /// The run was stopped or superseded; nothing was recorded.
    Stale,
}

/// One training session: its identity, target epoch count and loss curve.
pub struct TrainingRun {
    run_id: u64,
    epochs: u32,
    loss_model: Box<dyn LossModel>,
}

impl TrainingRun {
    pub fn new(run_id: u64, epochs: u32, loss_model: Box<dyn LossModel>) -> Self {
        Self {
            run_id,
            epochs,
            loss_model,
        }
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Advance the run by one epoch.
    pub fn tick(&mut self, state: &mut TrainingState) -> TickOutcome {
        if !state.is_current(self.run_id) {
            return TickOutcome::Stale;
        }

        let epoch = state.progress.current_epoch + 1;
        let loss = self.loss_model.next_loss(epoch, self.epochs);
        state.progress.advance(epoch, loss);
        state.push_log(
            format!("Epoch {}/{} - Loss: {:.4}", epoch, self.epochs, loss),
            LogSeverity::Success,
        );
        debug!("Training run {}: epoch {} loss {:.4}", self.run_id, epoch, loss);

        if epoch >= self.epochs {
            state.end_run();
            state.push_log("Training completed!", LogSeverity::Success);
            info!(
                "Training run {} completed after {} epochs (best loss {:.4})",
                self.run_id, epoch, state.progress.best_loss
            );
            return TickOutcome::Completed;
        }

        TickOutcome::Advanced
    }
}

/// Cancellable handle to a running progression task.
#[derive(Debug)]
pub struct TrainingHandle {
    run_id: u64,
    task: JoinHandle<()>,
}

impl TrainingHandle {
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Abort the periodic task. Safe to call on a finished task.
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for TrainingHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Drive `run` on the current tokio runtime, one epoch per `period`.
///
/// The first epoch lands one full `period` after the call. Must be called from
/// within a tokio runtime.
pub fn spawn_training(
    state: SharedTrainingState,
    mut run: TrainingRun,
    period: Duration,
) -> TrainingHandle {
    let run_id = run.run_id();
    let task = tokio::spawn(async move {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let outcome = {
                let mut guard = lock_state(&state);
                run.tick(&mut guard)
            };
            if outcome != TickOutcome::Advanced {
                debug!("Training task {} exiting: {:?}", run_id, outcome);
                break;
            }
        }
    });

    TrainingHandle { run_id, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ml::training::BEST_LOSS_SENTINEL;
    use crate::infrastructure::simulation::DeterministicDecayLoss;

    fn started(epochs: u32) -> (TrainingState, TrainingRun) {
        let mut state = TrainingState::default();
        let run_id = state.begin_run();
        (state, TrainingRun::new(run_id, epochs, Box::new(DeterministicDecayLoss)))
    }

    #[test]
    fn test_run_completes_after_configured_epochs() {
        let (mut state, mut run) = started(5);

        let outcomes: Vec<_> = (0..5).map(|_| run.tick(&mut state)).collect();

        assert_eq!(&outcomes[..4], &[TickOutcome::Advanced; 4]);
        assert_eq!(outcomes[4], TickOutcome::Completed);
        assert!(!state.is_training());
        assert_eq!(state.progress().current_epoch, 5);
        assert_eq!(state.progress().elapsed_time, 5);
        assert_eq!(state.logs().last().unwrap().message, "Training completed!");
    }

    #[test]
    fn test_ticks_after_completion_are_stale() {
        let (mut state, mut run) = started(1);

        assert_eq!(run.tick(&mut state), TickOutcome::Completed);
        assert_eq!(run.tick(&mut state), TickOutcome::Stale);
        assert_eq!(state.progress().current_epoch, 1);
    }

    #[test]
    fn test_stopped_run_records_nothing() {
        let (mut state, mut run) = started(10);
        run.tick(&mut state);
        run.tick(&mut state);

        state.end_run();
        let logs_before = state.logs().len();

        assert_eq!(run.tick(&mut state), TickOutcome::Stale);
        assert_eq!(state.progress().current_epoch, 2);
        assert_eq!(state.logs().len(), logs_before);
    }

    #[test]
    fn test_superseded_run_is_stale() {
        let (mut state, mut old_run) = started(10);
        state.end_run();
        let new_id = state.begin_run();
        let mut new_run = TrainingRun::new(new_id, 10, Box::new(DeterministicDecayLoss));

        assert_eq!(old_run.tick(&mut state), TickOutcome::Stale);
        assert_eq!(new_run.tick(&mut state), TickOutcome::Advanced);
        assert_eq!(state.progress().current_epoch, 1);
    }

    #[test]
    fn test_epoch_log_format_and_best_loss() {
        let (mut state, mut run) = started(4);
        assert_eq!(state.progress().best_loss, BEST_LOSS_SENTINEL);

        run.tick(&mut state);

        assert_eq!(state.logs()[0].message, "Epoch 1/4 - Loss: 0.7500");
        assert_eq!(state.logs()[0].severity, LogSeverity::Success);
        assert_eq!(state.progress().best_loss(), Some(0.75));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_run_ticks_once_per_period() {
        let state: SharedTrainingState = Arc::default();
        let run_id = lock_state(&state).begin_run();
        let run = TrainingRun::new(run_id, 3, Box::new(DeterministicDecayLoss));

        let handle = spawn_training(state.clone(), run, Duration::from_secs(1));

        time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(lock_state(&state).progress().current_epoch, 1);

        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(lock_state(&state).progress().current_epoch, 3);
        assert!(!lock_state(&state).is_training());

        time::sleep(Duration::from_millis(10)).await;
        assert!(handle.is_finished());
    }
}
