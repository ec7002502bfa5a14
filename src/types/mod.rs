// src/types/mod.rs

pub mod position;
pub mod trade;

pub use position::PositionType;
pub use trade::{CashFlow, SupplyMove, TradeAction, TradeRequest, TransactionRecord};
