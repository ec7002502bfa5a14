// src/engine/mod.rs

//! The transaction engine: Buy, Sell, SellShort and BuyToCover.
//!
//! Every transaction runs validate → compute amount → apply → record. If any
//! check fails nothing is mutated, neither the account nor the catalog.

pub mod concurrent;

use crate::errors::TradeError;
use crate::portfolio::Account;
use crate::stocks::{Stock, StockCatalog};
use crate::transaction_log::{NullLog, TransactionLog};
use crate::types::trade::{CashFlow, SupplyMove, TradeAction, TradeRequest, TransactionRecord};
use chrono::Utc;
use log::{info, warn};

/// Result of a successful settlement against one account and one stock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settlement {
    pub price: f64,
    pub quantity: u64,
    pub amount: f64,
}

/// Rejects `quantity <= 0` before anything else is looked at.
pub(crate) fn validate_quantity(quantity: i64) -> Result<u64, TradeError> {
    if quantity <= 0 {
        return Err(TradeError::InvalidQuantity(quantity));
    }
    Ok(quantity as u64)
}

/// Checks every precondition of `action`, then applies it.
///
/// The fallible mutations below are all pre-checked, so once the first one
/// runs the rest cannot fail.
pub(crate) fn settle(
    account: &mut Account,
    stock: &mut Stock,
    action: TradeAction,
    quantity: u64,
) -> Result<Settlement, TradeError> {
    let price = stock.price;
    let amount = price * quantity as f64;
    let position = action.position();

    // --- Supply / holdings ---
    match action.supply_move() {
        SupplyMove::Reserve => stock.check_reserve(quantity)?,
        SupplyMove::Release => {
            let held = account.held(&stock.symbol, position);
            if held < quantity {
                return Err(TradeError::InsufficientHoldings {
                    symbol: stock.symbol.clone(),
                    position,
                    requested: quantity,
                    held,
                });
            }
            stock.check_release(quantity)?;
        }
    }

    // --- Funds ---
    if action.cash_flow() == CashFlow::Debit && !account.has_sufficient_cash(amount) {
        return Err(TradeError::InsufficientFunds {
            required: amount,
            available: account.cash_balance(),
        });
    }

    // --- Apply ---
    match action.supply_move() {
        SupplyMove::Reserve => stock.reserve(quantity)?,
        SupplyMove::Release => stock.release(quantity)?,
    }
    if action.opens_position() {
        account.add_lot(&stock.symbol, position, quantity);
    } else {
        account.reduce_lot(&stock.symbol, position, quantity)?;
    }
    match action.cash_flow() {
        CashFlow::Debit => account.debit(amount),
        CashFlow::Credit => account.credit(amount),
    }

    Ok(Settlement {
        price,
        quantity,
        amount,
    })
}

pub(crate) fn make_record(
    account: &Account,
    action: TradeAction,
    symbol: &str,
    settlement: Settlement,
) -> TransactionRecord {
    TransactionRecord {
        timestamp: Utc::now(),
        account: account.name().to_string(),
        action,
        quantity: settlement.quantity,
        symbol: symbol.to_string(),
        price: settlement.price,
        amount: settlement.amount,
    }
}

/// Hands a committed record to the log. Failures are reported, not returned.
pub(crate) fn publish<L: TransactionLog + ?Sized>(log: &L, record: &TransactionRecord) {
    info!(
        "{} {} {} {} for {:.2}",
        record.account,
        record.action.past_tense(),
        record.quantity,
        record.symbol,
        record.amount
    );
    if let Err(e) = log.append(record) {
        warn!("trade committed but not logged: {e}");
    }
}

/// Single-threaded engine working on an explicitly passed account and catalog.
pub struct TransactionEngine<L: TransactionLog = NullLog> {
    log: L,
}

impl TransactionEngine<NullLog> {
    pub fn without_log() -> Self {
        Self { log: NullLog }
    }
}

impl<L: TransactionLog> TransactionEngine<L> {
    pub fn new(log: L) -> Self {
        Self { log }
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// Runs one transaction of any kind.
    pub fn execute(
        &self,
        account: &mut Account,
        catalog: &mut StockCatalog,
        request: &TradeRequest,
    ) -> Result<TransactionRecord, TradeError> {
        match self.try_execute(account, catalog, request) {
            Ok(record) => {
                publish(&self.log, &record);
                Ok(record)
            }
            Err(e) => {
                warn!(
                    "{} rejected for {} ({} x {}): {e}",
                    request.action,
                    account.name(),
                    request.quantity,
                    request.symbol
                );
                Err(e)
            }
        }
    }

    fn try_execute(
        &self,
        account: &mut Account,
        catalog: &mut StockCatalog,
        request: &TradeRequest,
    ) -> Result<TransactionRecord, TradeError> {
        let quantity = validate_quantity(request.quantity)?;
        let stock = catalog
            .find_by_symbol_mut(&request.symbol)
            .ok_or_else(|| TradeError::StockNotFound {
                symbol: request.symbol.clone(),
            })?;
        let settlement = settle(account, stock, request.action, quantity)?;
        Ok(make_record(account, request.action, &request.symbol, settlement))
    }

    pub fn buy(
        &self,
        account: &mut Account,
        catalog: &mut StockCatalog,
        symbol: &str,
        quantity: i64,
    ) -> Result<TransactionRecord, TradeError> {
        self.execute(account, catalog, &TradeRequest::new(TradeAction::Buy, symbol, quantity))
    }

    pub fn sell(
        &self,
        account: &mut Account,
        catalog: &mut StockCatalog,
        symbol: &str,
        quantity: i64,
    ) -> Result<TransactionRecord, TradeError> {
        self.execute(account, catalog, &TradeRequest::new(TradeAction::Sell, symbol, quantity))
    }

    pub fn sell_short(
        &self,
        account: &mut Account,
        catalog: &mut StockCatalog,
        symbol: &str,
        quantity: i64,
    ) -> Result<TransactionRecord, TradeError> {
        self.execute(
            account,
            catalog,
            &TradeRequest::new(TradeAction::SellShort, symbol, quantity),
        )
    }

    pub fn buy_to_cover(
        &self,
        account: &mut Account,
        catalog: &mut StockCatalog,
        symbol: &str,
        quantity: i64,
    ) -> Result<TransactionRecord, TradeError> {
        self.execute(
            account,
            catalog,
            &TradeRequest::new(TradeAction::BuyToCover, symbol, quantity),
        )
    }
}


// -----------------------------------------------------------------------------
//  Property tests: ledger invariants over random trade sequences
// -----------------------------------------------------------------------------
#[cfg(test)]
mod proptests {
    use super::*;
    use crate::types::position::PositionType;
    use proptest::prelude::*;

    const SYMBOLS: [&str; 3] = ["AAA", "BBB", "CCC"];

    fn small_catalog() -> StockCatalog {
        StockCatalog::from_stocks(vec![
            Stock::new("AAA", "Alpha", 12.5, 500),
            Stock::new("BBB", "Beta", 3.2, 1_000),
            Stock::new("CCC", "Gamma", 101.01, 50),
        ])
    }

    fn request_strategy() -> impl Strategy<Value = TradeRequest> {
        (0usize..4, 0usize..3, -5i64..120).prop_map(|(a, s, q)| {
            TradeRequest::new(TradeAction::ALL[a], SYMBOLS[s], q)
        })
    }

    proptest! {
        #[test]
        fn ledgers_stay_consistent(requests in prop::collection::vec(request_strategy(), 1..60)) {
            let engine = TransactionEngine::without_log();
            let mut account = Account::new("prop", 2_000.0);
            let mut catalog = small_catalog();

            for request in &requests {
                let account_before = account.clone();
                let catalog_before: Vec<Stock> = catalog.stocks().to_vec();

                let result = engine.execute(&mut account, &mut catalog, request);

                if result.is_err() {
                    prop_assert_eq!(&account, &account_before);
                    prop_assert_eq!(catalog.stocks(), catalog_before.as_slice());
                }
                prop_assert!(account.cash_balance() >= 0.0);
                for stock in catalog.stocks() {
                    prop_assert!(stock.shares_left() <= stock.total_shares());
                    let circulating = account.held(&stock.symbol, PositionType::Long)
                        + account.held(&stock.symbol, PositionType::Short);
                    prop_assert_eq!(stock.outstanding(), circulating);
                }
                for lot in account.lots() {
                    prop_assert!(lot.quantity > 0);
                }
            }
        }

        #[test]
        fn buy_then_sell_round_trips(symbol in 0usize..3, qty in 1i64..40) {
            let engine = TransactionEngine::without_log();
            let mut account = Account::new("prop", 10_000.0);
            let mut catalog = small_catalog();
            let sym = SYMBOLS[symbol];
            let left_before = catalog.find_by_symbol(sym).unwrap().shares_left();

            engine.buy(&mut account, &mut catalog, sym, qty).unwrap();
            engine.sell(&mut account, &mut catalog, sym, qty).unwrap();

            prop_assert!((account.cash_balance() - 10_000.0).abs() < 1e-6);
            prop_assert_eq!(catalog.find_by_symbol(sym).unwrap().shares_left(), left_before);
            prop_assert!(account.lots().is_empty());
        }

        #[test]
        fn short_then_cover_round_trips(symbol in 0usize..3, qty in 1i64..40) {
            let engine = TransactionEngine::without_log();
            let mut account = Account::new("prop", 10_000.0);
            let mut catalog = small_catalog();
            let sym = SYMBOLS[symbol];
            let left_before = catalog.find_by_symbol(sym).unwrap().shares_left();

            engine.sell_short(&mut account, &mut catalog, sym, qty).unwrap();
            engine.buy_to_cover(&mut account, &mut catalog, sym, qty).unwrap();

            prop_assert!((account.cash_balance() - 10_000.0).abs() < 1e-6);
            prop_assert_eq!(catalog.find_by_symbol(sym).unwrap().shares_left(), left_before);
            prop_assert!(account.lots().is_empty());
        }
    }
}
