// src/engine/concurrent.rs

//! Multi-account variant of the engine.
//!
//! Each stock sits behind its own lock and each account behind its own, so
//! trades on unrelated symbols never contend. Lock order is always account
//! first, then the one stock the trade touches.

use super::{make_record, publish, settle, validate_quantity};
use crate::errors::TradeError;
use crate::portfolio::Account;
use crate::stocks::{Stock, StockCatalog, Symbol};
use crate::transaction_log::TransactionLog;
use crate::types::trade::{TradeRequest, TransactionRecord};
use log::warn;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

pub type SharedAccount = Arc<Mutex<Account>>;

pub fn shared_account(account: Account) -> SharedAccount {
    Arc::new(Mutex::new(account))
}

pub struct SharedMarket<L: TransactionLog> {
    stocks: HashMap<Symbol, Mutex<Stock>>,
    log: L,
}

impl<L: TransactionLog> SharedMarket<L> {
    pub fn new(catalog: StockCatalog, log: L) -> Self {
        let stocks = catalog
            .stocks()
            .iter()
            .map(|s| (s.symbol.clone(), Mutex::new(s.clone())))
            .collect();
        Self { stocks, log }
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// Copy of one stock's current state.
    pub fn stock(&self, symbol: &str) -> Option<Stock> {
        self.stocks.get(symbol).map(|s| s.lock().clone())
    }

    /// Pushes a new price from the market-data feed. `Ok(false)` when the
    /// price is negative or not finite; the old price stays.
    pub fn set_price(&self, symbol: &str, price: f64) -> Result<bool, TradeError> {
        let stock = self.stocks.get(symbol).ok_or_else(|| TradeError::StockNotFound {
            symbol: symbol.to_string(),
        })?;
        if !price.is_finite() || price < 0.0 {
            return Ok(false);
        }
        stock.lock().price = price;
        Ok(true)
    }

    /// Runs one transaction. Holds the account lock for the whole trade and
    /// the stock lock only while settling.
    pub fn execute(
        &self,
        account: &SharedAccount,
        request: &TradeRequest,
    ) -> Result<TransactionRecord, TradeError> {
        let quantity = validate_quantity(request.quantity)?;
        let stock = self
            .stocks
            .get(request.symbol.as_str())
            .ok_or_else(|| TradeError::StockNotFound {
                symbol: request.symbol.clone(),
            })?;

        let mut account = account.lock();
        let settled = {
            let mut stock = stock.lock();
            settle(&mut account, &mut stock, request.action, quantity)
        };

        match settled {
            Ok(settlement) => {
                let record = make_record(&account, request.action, &request.symbol, settlement);
                drop(account);
                publish(&self.log, &record);
                Ok(record)
            }
            Err(e) => {
                warn!("{} rejected for {}: {e}", request.action, account.name());
                Err(e)
            }
        }
    }

    /// Collapses the per-stock locks back into a plain catalog, e.g. for saving.
    pub fn snapshot(&self) -> StockCatalog {
        let mut stocks: Vec<Stock> = self.stocks.values().map(|s| s.lock().clone()).collect();
        stocks.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        StockCatalog::from_stocks(stocks)
    }
}
