//! Configuration module for the dashboard.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Portfolio, Simulation and Storage.

mod portfolio_config;
mod simulation_config;
mod storage_config;

pub use portfolio_config::PortfolioEnvConfig;
pub use simulation_config::SimulationEnvConfig;
pub use storage_config::StorageEnvConfig;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::time::Duration;

/// Main dashboard configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub portfolio: PortfolioEnvConfig,
    pub simulation: SimulationEnvConfig,
    pub storage: StorageEnvConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            portfolio: PortfolioEnvConfig::default(),
            simulation: SimulationEnvConfig::default(),
            storage: StorageEnvConfig {
                path: PathBuf::from("tukuapps-storage.json"),
            },
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self> {
        let portfolio = PortfolioEnvConfig::from_env().context("Invalid portfolio configuration")?;
        let storage = StorageEnvConfig::from_env().context("Invalid storage configuration")?;

        Ok(Self {
            portfolio,
            simulation: SimulationEnvConfig::from_env(),
            storage,
        })
    }

    pub fn initial_balance(&self) -> Decimal {
        self.portfolio.initial_balance
    }

    pub fn currency_prefix(&self) -> &str {
        &self.portfolio.currency_prefix
    }

    pub fn training_tick(&self) -> Duration {
        self.simulation.training_tick()
    }

    pub fn clock_tick(&self) -> Duration {
        self.simulation.clock_tick()
    }
}
