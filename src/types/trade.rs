// src/types/trade.rs

use super::position::PositionType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction cash moves on a committed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashFlow {
    Debit,
    Credit,
}

/// Direction the catalog's available float moves on a committed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplyMove {
    /// Shares leave the open market (`shares_left` goes down).
    Reserve,
    /// Shares return to the open market (`shares_left` goes up).
    Release,
}

/// The four transaction kinds.
///
/// Each kind is fully described by the position it touches, which way the
/// cash goes, which way the float goes, and whether it opens or closes a lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeAction {
    Buy,
    Sell,
    SellShort,
    BuyToCover,
}

impl TradeAction {
    pub const ALL: [TradeAction; 4] = [
        TradeAction::Buy,
        TradeAction::Sell,
        TradeAction::SellShort,
        TradeAction::BuyToCover,
    ];

    pub fn position(self) -> PositionType {
        match self {
            TradeAction::Buy | TradeAction::Sell => PositionType::Long,
            TradeAction::SellShort | TradeAction::BuyToCover => PositionType::Short,
        }
    }

    pub fn cash_flow(self) -> CashFlow {
        match self {
            TradeAction::Buy | TradeAction::BuyToCover => CashFlow::Debit,
            TradeAction::Sell | TradeAction::SellShort => CashFlow::Credit,
        }
    }

    pub fn supply_move(self) -> SupplyMove {
        match self {
            TradeAction::Buy | TradeAction::SellShort => SupplyMove::Reserve,
            TradeAction::Sell | TradeAction::BuyToCover => SupplyMove::Release,
        }
    }

    /// True for the kinds that add to a lot, false for the ones that draw it down.
    pub fn opens_position(self) -> bool {
        matches!(self, TradeAction::Buy | TradeAction::SellShort)
    }

    /// Past-tense verb used in the transaction log and console messages.
    pub fn past_tense(self) -> &'static str {
        match self {
            TradeAction::Buy => "bought",
            TradeAction::Sell => "sold",
            TradeAction::SellShort => "sold short",
            TradeAction::BuyToCover => "covered",
        }
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TradeAction::Buy => "Buy",
            TradeAction::Sell => "Sell",
            TradeAction::SellShort => "Sell Short",
            TradeAction::BuyToCover => "Buy to Cover",
        };
        f.write_str(label)
    }
}

/// What the caller asks the engine to do. Quantity is signed so that the
/// engine, not the parser, is the one that rejects `<= 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRequest {
    pub action: TradeAction,
    pub symbol: String,
    pub quantity: i64,
}

impl TradeRequest {
    pub fn new(action: TradeAction, symbol: impl Into<String>, quantity: i64) -> Self {
        Self {
            action,
            symbol: symbol.into(),
            quantity,
        }
    }
}

/// A committed transaction as handed to the transaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub timestamp: DateTime<Utc>,
    pub account: String,
    pub action: TradeAction,
    pub quantity: u64,
    pub symbol: String,
    /// Unit price the trade settled at.
    pub price: f64,
    /// `price * quantity`.
    pub amount: f64,
}
