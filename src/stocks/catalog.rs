// src/stocks/catalog.rs

use super::definitions::{Stock, Symbol, default_stock_universe};
use crate::errors::TradeError;
use std::collections::HashMap;

/// The fixed set of tradable stocks for one session.
///
/// Owned by the session and passed by reference into the engine; there is
/// no process-wide copy.
#[derive(Debug, Clone)]
pub struct StockCatalog {
    stocks: Vec<Stock>,
    /// Ticker to position in `stocks`, for O(1) lookups.
    ticker_index: HashMap<Symbol, usize>,
}

/// Prepare a ticker to index mapping for fast lookups.
fn index_by_ticker(stocks: &[Stock]) -> HashMap<Symbol, usize> {
    stocks
        .iter()
        .enumerate()
        .map(|(i, s)| (s.symbol.clone(), i))
        .collect()
}

impl StockCatalog {
    /// Creates a catalog with the default universe.
    pub fn new() -> Self {
        Self::from_stocks(default_stock_universe())
    }

    /// Builds a catalog from an explicit listing. Later duplicates of a
    /// ticker are dropped so lookups stay unambiguous.
    pub fn from_stocks(stocks: Vec<Stock>) -> Self {
        let mut unique: Vec<Stock> = Vec::with_capacity(stocks.len());
        for stock in stocks {
            if !unique.iter().any(|s| s.symbol == stock.symbol) {
                unique.push(stock);
            }
        }
        let ticker_index = index_by_ticker(&unique);
        Self {
            stocks: unique,
            ticker_index,
        }
    }

    /// Exact, case-sensitive lookup. `None` when the ticker is not listed.
    pub fn find_by_symbol(&self, symbol: &str) -> Option<&Stock> {
        self.ticker_index.get(symbol).map(|&i| &self.stocks[i])
    }

    pub fn find_by_symbol_mut(&mut self, symbol: &str) -> Option<&mut Stock> {
        match self.ticker_index.get(symbol) {
            Some(&i) => Some(&mut self.stocks[i]),
            None => None,
        }
    }

    fn require_mut(&mut self, symbol: &str) -> Result<&mut Stock, TradeError> {
        self.find_by_symbol_mut(symbol)
            .ok_or_else(|| TradeError::StockNotFound {
                symbol: symbol.to_string(),
            })
    }

    /// Decrements `shares_left` of `symbol` by `quantity`.
    pub fn reserve_shares(&mut self, symbol: &str, quantity: u64) -> Result<(), TradeError> {
        self.require_mut(symbol)?.reserve(quantity)
    }

    /// Increments `shares_left` of `symbol` by `quantity`. Only call this for
    /// shares reserved by a matching earlier transaction.
    pub fn release_shares(&mut self, symbol: &str, quantity: u64) -> Result<(), TradeError> {
        self.require_mut(symbol)?.release(quantity)
    }

    /// Market-data entry point. Rejects negative and non-finite prices by
    /// returning `false` and leaving the old price in place.
    pub fn set_price(&mut self, symbol: &str, price: f64) -> Result<bool, TradeError> {
        let stock = self.require_mut(symbol)?;
        if !price.is_finite() || price < 0.0 {
            return Ok(false);
        }
        stock.price = price;
        Ok(true)
    }

    /// Current unit price of `symbol`, if listed.
    pub fn price_of(&self, symbol: &str) -> Option<f64> {
        self.find_by_symbol(symbol).map(|s| s.price)
    }

    /// All listed stocks, in listing order.
    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    pub fn stocks_mut(&mut self) -> impl Iterator<Item = &mut Stock> {
        self.stocks.iter_mut()
    }

    /// Returns a vector of all tickers in listing order.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.stocks.iter().map(|s| s.symbol.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }
}

impl Default for StockCatalog {
    fn default() -> Self {
        Self::new()
    }
}
