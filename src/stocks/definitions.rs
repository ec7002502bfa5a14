// src/stocks/definitions.rs
//! Core stock metadata and supply state.
//
//! `default_stock_universe()` lists the tickers a fresh session boots with.

pub type Symbol = String;

use crate::errors::TradeError;
use log::debug;
use serde::{Deserialize, Serialize};

/// One listed company and its open-market float.
///
/// `total_shares` is fixed at creation. `shares_left` only moves through
/// `reserve` / `release`, and stays within `0..=total_shares`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    /// Exchange ticker (e.g. "AAPL"). Case-sensitive.
    pub symbol: Symbol,
    /// Human-readable company name.
    pub company_name: String,
    /// Current unit price. Moved by the market-data feed, never by trades.
    pub price: f64,
    total_shares: u64,
    shares_left: u64,
}

impl Stock {
    #[inline]
    pub fn new<T1: Into<String>, T2: Into<String>>(
        symbol: T1,
        company_name: T2,
        price: f64,
        total_shares: u64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            company_name: company_name.into(),
            price,
            total_shares,
            shares_left: total_shares,
        }
    }

    pub fn total_shares(&self) -> u64 {
        self.total_shares
    }

    /// Shares not currently held by any account.
    pub fn shares_left(&self) -> u64 {
        self.shares_left
    }

    /// Shares currently in circulation (held long or borrowed short).
    pub fn outstanding(&self) -> u64 {
        self.total_shares - self.shares_left
    }

    /// False for snapshots whose float is out of range or whose price is unusable.
    pub fn is_consistent(&self) -> bool {
        self.shares_left <= self.total_shares && self.price.is_finite() && self.price >= 0.0
    }

    /// Checks a reserve without applying it. A zero reserve counts as a
    /// supply failure, the same as one larger than the float.
    pub fn check_reserve(&self, quantity: u64) -> Result<(), TradeError> {
        if quantity == 0 || quantity > self.shares_left {
            return Err(TradeError::InsufficientSupply {
                symbol: self.symbol.clone(),
                requested: quantity,
                available: self.shares_left,
            });
        }
        Ok(())
    }

    /// Checks a release without applying it.
    pub fn check_release(&self, quantity: u64) -> Result<(), TradeError> {
        if quantity == 0 {
            return Err(TradeError::InvalidQuantity(0));
        }
        if quantity > self.outstanding() {
            return Err(TradeError::FloatExceeded {
                symbol: self.symbol.clone(),
                requested: quantity,
                outstanding: self.outstanding(),
            });
        }
        Ok(())
    }

    /// Re-derives the float from the shares accounts actually hold. Returns
    /// `false`, leaving the stock untouched, when `outstanding` exceeds the
    /// total float.
    pub(crate) fn set_outstanding(&mut self, outstanding: u64) -> bool {
        if outstanding > self.total_shares {
            return false;
        }
        self.shares_left = self.total_shares - outstanding;
        true
    }

    /// Takes `quantity` shares out of the open market.
    pub fn reserve(&mut self, quantity: u64) -> Result<(), TradeError> {
        self.check_reserve(quantity)?;
        self.shares_left -= quantity;
        debug!("{}: reserved {} shares, {} left", self.symbol, quantity, self.shares_left);
        Ok(())
    }

    /// Returns `quantity` previously reserved shares to the open market.
    pub fn release(&mut self, quantity: u64) -> Result<(), TradeError> {
        self.check_release(quantity)?;
        self.shares_left += quantity;
        debug!("{}: released {} shares, {} left", self.symbol, quantity, self.shares_left);
        Ok(())
    }
}

/// The universe of stocks available when a session boots.
#[inline]
pub fn default_stock_universe() -> Vec<Stock> {
    vec![
        Stock::new("AAPL", "Apple Inc.", 122.02, 100_000_000),
        Stock::new("MSFT", "Microsoft Corporation", 42.60, 200_000_000),
        Stock::new("FB", "Facebook Inc.", 81.67, 100_000_000),
        Stock::new("TWTR", "Twitter Inc.", 50.47, 100_000_000),
        Stock::new("PG", "Procter & Gamble Co.", 82.83, 100_000_000),
        Stock::new("JD", "JD.com Inc.", 29.22, 100_000_000),
        Stock::new("GOOG", "Alphabet Inc.", 542.56, 100_000_000),
        Stock::new("WMT", "Walmart Inc.", 80.71, 100_000_000),
        Stock::new("TSCO", "Tesco PLC", 242.13, 100_000_000),
        Stock::new("VA", "Virgin America Inc.", 30.36, 100_000_000),
        Stock::new("BT", "BT Group PLC", 65.65, 100_000_000),
        Stock::new("HSBA", "HSBC Holdings PLC", 581.08, 100_000_000),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_demo_stock() -> Stock {
        Stock::new("GOOG", "Alphabet Inc.", 542.56, 1_000)
    }

    #[test]
    fn new_stock_starts_with_full_float() {
        let s = make_demo_stock();
        assert_eq!(s.shares_left(), 1_000);
        assert_eq!(s.total_shares(), 1_000);
        assert_eq!(s.outstanding(), 0);
    }

    #[test]
    fn reserve_then_release_restores_float() {
        let mut s = make_demo_stock();
        s.reserve(400).unwrap();
        assert_eq!(s.shares_left(), 600);
        s.release(400).unwrap();
        assert_eq!(s.shares_left(), 1_000);
    }

    #[test]
    fn reserve_rejects_zero_and_oversize() {
        let mut s = make_demo_stock();
        assert_eq!(
            s.reserve(0),
            Err(TradeError::InsufficientSupply {
                symbol: "GOOG".into(),
                requested: 0,
                available: 1_000,
            })
        );
        assert_eq!(
            s.reserve(1_001),
            Err(TradeError::InsufficientSupply {
                symbol: "GOOG".into(),
                requested: 1_001,
                available: 1_000,
            })
        );
        assert_eq!(s.shares_left(), 1_000, "failed reserve must not move the float");
    }

    #[test]
    fn release_never_exceeds_total_float() {
        let mut s = make_demo_stock();
        s.reserve(10).unwrap();
        assert!(matches!(
            s.release(11),
            Err(TradeError::FloatExceeded { outstanding: 10, .. })
        ));
        assert_eq!(s.shares_left(), 990);
    }

    #[test]
    fn set_outstanding_rederives_float() {
        let mut s = make_demo_stock();
        assert!(s.set_outstanding(250));
        assert_eq!(s.shares_left(), 750);
        assert!(!s.set_outstanding(1_001));
        assert_eq!(s.shares_left(), 750);
    }

    #[test]
    fn default_universe_has_unique_symbols() {
        let stocks = default_stock_universe();
        assert_eq!(stocks.len(), 12);
        let mut symbols: Vec<_> = stocks.iter().map(|s| s.symbol.as_str()).collect();
        symbols.sort();
        symbols.dedup();
        assert_eq!(symbols.len(), 12);
        for s in &stocks {
            assert_eq!(s.shares_left(), s.total_shares());
            assert!(s.price >= 0.0);
        }
    }
}
