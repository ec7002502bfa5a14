// src/portfolio/account.rs

use super::holding::HoldingLot;
use super::valuation::ShortValuation;
use crate::errors::LotError;
use crate::stocks::StockCatalog;
use crate::types::position::PositionType;
use serde::{Deserialize, Serialize};

/// A trader's cash and lots.
///
/// Mutated only by the transaction engine. Cash never goes negative after a
/// committed trade because every debit is preceded by
/// `has_sufficient_cash`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    name: String,
    cash: f64,
    lots: Vec<HoldingLot>,
}

impl Account {
    pub fn new(name: impl Into<String>, initial_cash: f64) -> Self {
        Self {
            name: name.into(),
            cash: initial_cash,
            lots: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cash_balance(&self) -> f64 {
        self.cash
    }

    /// Lots in the order they were first opened.
    pub fn lots(&self) -> &[HoldingLot] {
        &self.lots
    }

    pub fn has_sufficient_cash(&self, amount: f64) -> bool {
        amount <= self.cash
    }

    pub fn debit(&mut self, amount: f64) {
        debug_assert!(amount >= 0.0, "debit called with negative amount {amount}");
        self.cash -= amount;
    }

    pub fn credit(&mut self, amount: f64) {
        debug_assert!(amount >= 0.0, "credit called with negative amount {amount}");
        self.cash += amount;
    }

    fn lot_index(&self, symbol: &str, position: PositionType) -> Option<usize> {
        self.lots.iter().position(|lot| lot.is_keyed(symbol, position))
    }

    /// Quantity held in the `(symbol, position)` lot, zero when absent.
    pub fn held(&self, symbol: &str, position: PositionType) -> u64 {
        self.lot_index(symbol, position)
            .map_or(0, |i| self.lots[i].quantity)
    }

    /// Merges into the matching lot, or opens a new one.
    pub fn add_lot(&mut self, symbol: &str, position: PositionType, quantity: u64) {
        if quantity == 0 {
            return;
        }
        match self.lot_index(symbol, position) {
            Some(i) => self.lots[i].quantity += quantity,
            None => self.lots.push(HoldingLot::new(symbol, position, quantity)),
        }
    }

    /// Draws a lot down by `quantity`, removing it when it hits zero.
    pub fn reduce_lot(
        &mut self,
        symbol: &str,
        position: PositionType,
        quantity: u64,
    ) -> Result<(), LotError> {
        let i = self
            .lot_index(symbol, position)
            .ok_or_else(|| LotError::NotFound {
                symbol: symbol.to_string(),
                position,
                requested: quantity,
            })?;

        let held = self.lots[i].quantity;
        if held < quantity {
            return Err(LotError::InsufficientQuantity {
                symbol: symbol.to_string(),
                position,
                requested: quantity,
                held,
            });
        }

        if held == quantity {
            self.lots.remove(i);
        } else {
            self.lots[i].quantity -= quantity;
        }
        Ok(())
    }

    /// Cash plus every lot marked at the current catalog price.
    ///
    /// Short lots are counted as assets here, the same as long lots. Use
    /// [`Account::portfolio_value_with`] with [`ShortValuation::AsLiability`]
    /// to net them out instead.
    pub fn portfolio_value(&self, catalog: &StockCatalog) -> f64 {
        self.portfolio_value_with(catalog, ShortValuation::AsAsset)
    }

    pub fn portfolio_value_with(&self, catalog: &StockCatalog, valuation: ShortValuation) -> f64 {
        let holdings: f64 = self
            .lots
            .iter()
            .map(|lot| {
                let price = catalog.price_of(&lot.symbol).unwrap_or(0.0);
                valuation.sign(lot.position) * price * lot.quantity as f64
            })
            .sum();
        self.cash + holdings
    }
}

// -----------------------------------------------------------------------------
//  Unit Tests
// -----------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cash_helpers() {
        let mut account = Account::new("alice", 100.0);
        assert!(account.has_sufficient_cash(100.0));
        assert!(!account.has_sufficient_cash(100.01));

        account.debit(40.0);
        account.credit(15.5);
        assert!((account.cash_balance() - 75.5).abs() < 1e-9);
    }

    #[test]
    fn test_add_lot_merges_same_key() {
        let mut account = Account::new("alice", 0.0);
        account.add_lot("AAPL", PositionType::Long, 10);
        account.add_lot("AAPL", PositionType::Long, 5);

        assert_eq!(account.lots().len(), 1);
        assert_eq!(account.held("AAPL", PositionType::Long), 15);
    }

    #[test]
    fn test_long_and_short_lots_are_distinct() {
        let mut account = Account::new("alice", 0.0);
        account.add_lot("AAPL", PositionType::Long, 10);
        account.add_lot("AAPL", PositionType::Short, 4);

        assert_eq!(account.lots().len(), 2, "a short must not net against a long");
        assert_eq!(account.held("AAPL", PositionType::Long), 10);
        assert_eq!(account.held("AAPL", PositionType::Short), 4);
    }

    #[test]
    fn test_reduce_lot_partial_and_exact() {
        let mut account = Account::new("alice", 0.0);
        account.add_lot("MSFT", PositionType::Long, 10);

        account.reduce_lot("MSFT", PositionType::Long, 3).unwrap();
        assert_eq!(account.held("MSFT", PositionType::Long), 7);

        account.reduce_lot("MSFT", PositionType::Long, 7).unwrap();
        assert!(account.lots().is_empty(), "an emptied lot should be removed");
    }

    #[test]
    fn test_reduce_lot_failures_leave_state_alone() {
        let mut account = Account::new("alice", 0.0);
        account.add_lot("MSFT", PositionType::Long, 10);
        let before = account.clone();

        assert_eq!(
            account.reduce_lot("MSFT", PositionType::Short, 1),
            Err(LotError::NotFound {
                symbol: "MSFT".into(),
                position: PositionType::Short,
                requested: 1,
            })
        );
        assert_eq!(
            account.reduce_lot("MSFT", PositionType::Long, 11),
            Err(LotError::InsufficientQuantity {
                symbol: "MSFT".into(),
                position: PositionType::Long,
                requested: 11,
                held: 10,
            })
        );
        assert_eq!(account, before);
    }

    #[test]
    fn test_portfolio_value_counts_short_lots_as_assets() {
        // Arrange: AAPL 122.02, MSFT 42.60
        let catalog = StockCatalog::new();
        let mut account = Account::new("alice", 1_000.0);
        account.add_lot("AAPL", PositionType::Long, 10);
        account.add_lot("MSFT", PositionType::Short, 5);

        // Act
        let as_asset = account.portfolio_value(&catalog);
        let netted = account.portfolio_value_with(&catalog, ShortValuation::AsLiability);

        // Assert
        assert!((as_asset - (1_000.0 + 1_220.2 + 213.0)).abs() < 1e-6);
        assert!((netted - (1_000.0 + 1_220.2 - 213.0)).abs() < 1e-6);
    }

    #[test]
    fn test_unlisted_lot_is_valued_at_zero() {
        let catalog = StockCatalog::new();
        let mut account = Account::new("alice", 50.0);
        account.add_lot("DELISTED", PositionType::Long, 100);
        assert!((account.portfolio_value(&catalog) - 50.0).abs() < 1e-9);
    }
}
