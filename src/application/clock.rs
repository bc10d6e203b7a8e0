use chrono::{DateTime, Local};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

/// Header clock format, e.g. `01 Feb 2026, 08:30:00`.
pub const CLOCK_FORMAT: &str = "%d %b %Y, %H:%M:%S";

pub fn format_clock(now: DateTime<Local>) -> String {
    now.format(CLOCK_FORMAT).to_string()
}

/// Periodic wall-clock publisher for the dashboard header.
///
/// The ticker owns its task: dropping it (or calling [`ClockTicker::stop`])
/// cancels the periodic work.
#[derive(Debug)]
pub struct ClockTicker {
    rx: watch::Receiver<String>,
    task: JoinHandle<()>,
}

impl ClockTicker {
    /// Start ticking every `period`. Must be called from within a tokio runtime.
    pub fn spawn(period: Duration) -> Self {
        let (tx, rx) = watch::channel(format_clock(Local::now()));

        let task = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // First tick completes immediately and the initial value is already set.
            interval.tick().await;

            loop {
                interval.tick().await;
                if tx.send(format_clock(Local::now())).is_err() {
                    debug!("ClockTicker: all receivers gone, stopping");
                    break;
                }
            }
        });

        Self { rx, task }
    }

    /// Latest formatted time.
    pub fn current(&self) -> String {
        self.rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.rx.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
