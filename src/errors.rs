// src/errors.rs

//! Error taxonomy for the simulator.
//!
//! Every variant is recoverable: the console reports it and lets the user
//! try again. None of them is allowed to take the process down.

use crate::types::position::PositionType;
use thiserror::Error;

/// Why a transaction (or a catalog supply move) was refused.
///
/// A refused transaction never leaves a partial change behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradeError {
    #[error("invalid quantity: {0} (must be greater than zero)")]
    InvalidQuantity(i64),

    #[error("stock not found: {symbol}")]
    StockNotFound { symbol: String },

    #[error("insufficient funds: required {required:.2}, available {available:.2}")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("insufficient supply of {symbol}: requested {requested}, available {available}")]
    InsufficientSupply {
        symbol: String,
        requested: u64,
        available: u64,
    },

    #[error("insufficient {position} holdings of {symbol}: requested {requested}, held {held}")]
    InsufficientHoldings {
        symbol: String,
        position: PositionType,
        requested: u64,
        held: u64,
    },

    /// Releasing would push `shares_left` above the total float. Only
    /// reachable when the ledgers were already inconsistent.
    #[error("release of {requested} {symbol} exceeds float: {outstanding} shares outstanding")]
    FloatExceeded {
        symbol: String,
        requested: u64,
        outstanding: u64,
    },
}

/// Failure of `Account::reduce_lot`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LotError {
    #[error("no {position} lot of {symbol} in the portfolio, cannot reduce by {requested}")]
    NotFound {
        symbol: String,
        position: PositionType,
        requested: u64,
    },

    #[error("{position} lot of {symbol} holds {held}, cannot reduce by {requested}")]
    InsufficientQuantity {
        symbol: String,
        position: PositionType,
        requested: u64,
        held: u64,
    },
}

impl From<LotError> for TradeError {
    fn from(err: LotError) -> Self {
        match err {
            LotError::NotFound {
                symbol,
                position,
                requested,
            } => TradeError::InsufficientHoldings {
                symbol,
                position,
                requested,
                held: 0,
            },
            LotError::InsufficientQuantity {
                symbol,
                position,
                requested,
                held,
            } => TradeError::InsufficientHoldings {
                symbol,
                position,
                requested,
                held,
            },
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("account name must not be empty")]
    EmptyName,

    #[error("starting cash must be finite and non-negative, got {0}")]
    InvalidStartingCash(f64),

    #[error("username {0} already exists")]
    AlreadyRegistered(String),

    #[error("username {0} not found, please register")]
    UnknownAccount(String),
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The account and stock snapshots disagree beyond repair.
    #[error("inconsistent snapshot: {0}")]
    Inconsistent(String),
}

#[derive(Error, Debug)]
pub enum LogError {
    #[error("transaction log write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("transaction record encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("starting cash must be finite and non-negative, got {0}")]
    InvalidStartingCash(f64),

    #[error(transparent)]
    Load(#[from] PersistenceError),
}

/// Anything the session layer can report back to the console.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Trade(#[from] TradeError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
