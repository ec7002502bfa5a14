// src/simulators/price_feed.rs

use crate::stocks::StockCatalog;

/// Anything that can move catalog prices between trades.
/// This allows for a pluggable market-data source.
pub trait PriceFeed {
    /// Advances the feed by one time step and writes new prices into the catalog.
    /// Only `price` is touched; supply and holdings are never changed here.
    fn step(&mut self, catalog: &mut StockCatalog);

    /// Resets the feed to its initial state.
    fn reset(&mut self);
}
