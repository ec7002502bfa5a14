// src/portfolio/holding.rs

use crate::stocks::Symbol;
use crate::types::position::PositionType;
use serde::{Deserialize, Serialize};

/// A quantity of one symbol held on one side.
///
/// An account keeps at most one lot per `(symbol, position)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingLot {
    pub symbol: Symbol,
    pub position: PositionType,
    pub quantity: u64,
}

impl HoldingLot {
    pub fn new(symbol: impl Into<Symbol>, position: PositionType, quantity: u64) -> Self {
        Self {
            symbol: symbol.into(),
            position,
            quantity,
        }
    }

    /// Does this lot sit under the given key?
    #[inline]
    pub fn is_keyed(&self, symbol: &str, position: PositionType) -> bool {
        self.position == position && self.symbol == symbol
    }
}
