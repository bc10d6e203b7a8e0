//! Portfolio configuration parsing from environment variables.
//!
//! This module handles the starting cash balance and the currency prefix used
//! when formatting amounts.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

/// Portfolio environment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioEnvConfig {
    /// Cash balance used when nothing is stored yet.
    pub initial_balance: Decimal,
    pub currency_prefix: String,
}

impl Default for PortfolioEnvConfig {
    fn default() -> Self {
        Self {
            initial_balance: Decimal::from(3_000_000),
            currency_prefix: "Rp ".to_string(),
        }
    }
}

impl PortfolioEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let initial_balance = match env::var("TUKUAPPS_INITIAL_BALANCE") {
            Ok(raw) => {
                let balance = Decimal::from_str(raw.trim())
                    .context("Failed to parse TUKUAPPS_INITIAL_BALANCE")?;
                if balance.is_sign_negative() {
                    anyhow::bail!("TUKUAPPS_INITIAL_BALANCE must not be negative: {}", raw);
                }
                balance
            }
            Err(_) => defaults.initial_balance,
        };

        Ok(Self {
            initial_balance,
            currency_prefix: env::var("TUKUAPPS_CURRENCY_PREFIX")
                .unwrap_or(defaults.currency_prefix),
        })
    }
}
