use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SimulationEnvConfig {
    pub training_tick_ms: u64,
    pub clock_tick_ms: u64,
    pub price_seed: Option<u64>,
    pub training_seed: Option<u64>,
}

impl Default for SimulationEnvConfig {
    fn default() -> Self {
        Self {
            training_tick_ms: 1000,
            clock_tick_ms: 1000,
            price_seed: None,
            training_seed: None,
        }
    }
}

impl SimulationEnvConfig {
    pub fn from_env() -> Self {
        let training_tick_ms = env::var("TUKUAPPS_TRAINING_TICK_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|ms: &u64| *ms > 0)
            .unwrap_or(1000); // One simulated epoch per second

        let clock_tick_ms = env::var("TUKUAPPS_CLOCK_TICK_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|ms: &u64| *ms > 0)
            .unwrap_or(1000);

        let price_seed = env::var("TUKUAPPS_PRICE_SEED")
            .ok()
            .and_then(|v| v.parse().ok());

        let training_seed = env::var("TUKUAPPS_TRAINING_SEED")
            .ok()
            .and_then(|v| v.parse().ok());

        Self {
            training_tick_ms,
            clock_tick_ms,
            price_seed,
            training_seed,
        }
    }

    pub fn training_tick(&self) -> Duration {
        Duration::from_millis(self.training_tick_ms)
    }

    pub fn clock_tick(&self) -> Duration {
        Duration::from_millis(self.clock_tick_ms)
    }
}
