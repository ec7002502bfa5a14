// src/config.rs

//! A centralized place for simulator defaults, plus the runtime config
//! assembled from an optional JSON file and command-line flags.

use crate::errors::{ConfigError, PersistenceError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// --- Accounts ---
pub const DEFAULT_STARTING_CASH: f64 = 10_000.0;

/// Accounts may start empty, never in debt.
pub fn is_valid_starting_cash(cash: f64) -> bool {
    cash.is_finite() && cash >= 0.0
}

// --- Storage ---
pub const DEFAULT_DATA_DIR: &str = "data";
pub const ACCOUNTS_FILE: &str = "accounts.json";
pub const STOCKS_FILE: &str = "stocks.json";
pub const TRANSACTIONS_FILE: &str = "transactions.log";

// --- Market-data feed (GBM, annualised) ---
pub const DEFAULT_FEED_DRIFT: f64 = 0.05;
pub const DEFAULT_FEED_VOLATILITY: f64 = 0.25;
pub const DEFAULT_FEED_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// When false, prices stay at their listed values.
    pub enabled: bool,
    pub drift: f64,
    pub volatility: f64,
    pub seed: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            drift: DEFAULT_FEED_DRIFT,
            volatility: DEFAULT_FEED_VOLATILITY,
            seed: DEFAULT_FEED_SEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub starting_cash: f64,
    pub data_dir: PathBuf,
    pub feed: FeedConfig,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            starting_cash: DEFAULT_STARTING_CASH,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            feed: FeedConfig::default(),
        }
    }
}

impl SimulatorConfig {
    /// Reads and validates a JSON config file. Missing keys fall back to
    /// defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| PersistenceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let cfg: Self = serde_json::from_str(&text).map_err(PersistenceError::from)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_starting_cash(self.starting_cash) {
            return Err(ConfigError::InvalidStartingCash(self.starting_cash));
        }
        Ok(())
    }

    pub fn accounts_path(&self) -> PathBuf {
        self.data_dir.join(ACCOUNTS_FILE)
    }

    pub fn stocks_path(&self) -> PathBuf {
        self.data_dir.join(STOCKS_FILE)
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.data_dir.join(TRANSACTIONS_FILE)
    }
}
