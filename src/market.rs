// src/market.rs

use crate::config::SimulatorConfig;
use crate::engine::TransactionEngine;
use crate::errors::{ConfigError, PersistenceError, RegistryError, SessionError};
use crate::persistence::{JsonFileStore, Store};
use crate::portfolio::{AccountRegistry, PortfolioReport, ShortValuation};
use crate::simulators::{GbmFeed, PriceFeed};
use crate::stocks::{Stock, StockCatalog};
use crate::transaction_log::{JsonLinesLog, TransactionLog};
use crate::types::trade::{TradeRequest, TransactionRecord};
use log::{info, warn};
use std::collections::HashMap;

/// One running simulator session. It owns the world state (catalog and
/// accounts), the engine, and the stores the state is saved to. Nothing here
/// is process-wide; two sessions never share state.
pub struct Market {
    catalog: StockCatalog,
    registry: AccountRegistry,
    engine: TransactionEngine<Box<dyn TransactionLog>>,
    accounts_store: Option<JsonFileStore<AccountRegistry>>,
    stocks_store: Option<JsonFileStore<Vec<Stock>>>,
    feed: Option<Box<dyn PriceFeed>>,
    valuation: ShortValuation,
}

impl Market {
    /// A session that keeps everything in memory.
    pub fn in_memory(starting_cash: f64, log: Box<dyn TransactionLog>) -> Self {
        Self {
            catalog: StockCatalog::new(),
            registry: AccountRegistry::new(starting_cash),
            engine: TransactionEngine::new(log),
            accounts_store: None,
            stocks_store: None,
            feed: None,
            valuation: ShortValuation::default(),
        }
    }

    /// Opens a session backed by the files under `config.data_dir`, restoring
    /// any snapshots found there.
    pub fn open(config: &SimulatorConfig) -> Result<Self, SessionError> {
        config.validate()?;
        std::fs::create_dir_all(&config.data_dir).map_err(|source| PersistenceError::Io {
            path: config.data_dir.display().to_string(),
            source,
        })?;

        let accounts_store: JsonFileStore<AccountRegistry> =
            JsonFileStore::new(config.accounts_path());
        let stocks_store: JsonFileStore<Vec<Stock>> = JsonFileStore::new(config.stocks_path());

        let mut registry = accounts_store
            .load()?
            .unwrap_or_else(|| AccountRegistry::new(config.starting_cash));
        registry.set_starting_cash(config.starting_cash);

        let mut catalog = match stocks_store.load()? {
            Some(stocks) if !stocks.is_empty() && stocks.iter().all(Stock::is_consistent) => {
                StockCatalog::from_stocks(stocks)
            }
            Some(_) => {
                warn!("stock snapshot is inconsistent, starting from the default listing");
                StockCatalog::new()
            }
            None => StockCatalog::new(),
        };

        reconcile_float(&mut catalog, &registry)?;

        let feed: Option<Box<dyn PriceFeed>> = if config.feed.enabled {
            match GbmFeed::new(config.feed.drift, config.feed.volatility, config.feed.seed) {
                Ok(feed) => Some(Box::new(feed)),
                Err(e) => {
                    warn!("price feed disabled: {e}");
                    None
                }
            }
        } else {
            None
        };

        info!(
            "session opened: {} accounts, {} stocks, data in {}",
            registry.len(),
            catalog.len(),
            config.data_dir.display()
        );

        Ok(Self {
            catalog,
            registry,
            engine: TransactionEngine::new(Box::new(JsonLinesLog::new(config.transactions_path()))),
            accounts_store: Some(accounts_store),
            stocks_store: Some(stocks_store),
            feed,
            valuation: ShortValuation::default(),
        })
    }

    pub fn with_feed(mut self, feed: Box<dyn PriceFeed>) -> Self {
        self.feed = Some(feed);
        self
    }

    pub fn with_valuation(mut self, valuation: ShortValuation) -> Self {
        self.valuation = valuation;
        self
    }

    pub fn catalog(&self) -> &StockCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &AccountRegistry {
        &self.registry
    }

    /// Registers a new account and saves the registry. Returns the stored name.
    pub fn register(&mut self, name: &str) -> Result<String, SessionError> {
        let name = self.registry.register(name)?.name().to_string();
        self.save_accounts()?;
        Ok(name)
    }

    /// Resolves an existing account. Returns the stored name.
    pub fn login(&self, name: &str) -> Result<String, SessionError> {
        Ok(self.registry.login(name)?.name().to_string())
    }

    pub fn search(&self, symbol: &str) -> Option<&Stock> {
        self.catalog.find_by_symbol(symbol)
    }

    /// Runs a trade for `account`. Does not save; call [`Market::save`] after.
    pub fn trade(
        &mut self,
        account: &str,
        request: &TradeRequest,
    ) -> Result<TransactionRecord, SessionError> {
        let account = self
            .registry
            .get_mut(account)
            .ok_or_else(|| RegistryError::UnknownAccount(account.to_string()))?;
        Ok(self.engine.execute(account, &mut self.catalog, request)?)
    }

    pub fn portfolio(&self, account: &str) -> Result<PortfolioReport, SessionError> {
        let account = self
            .registry
            .get(account)
            .ok_or_else(|| RegistryError::UnknownAccount(account.to_string()))?;
        Ok(PortfolioReport::build(account, &self.catalog, self.valuation))
    }

    /// Advances the market-data feed one step, if one is attached.
    pub fn tick(&mut self) {
        if let Some(feed) = self.feed.as_mut() {
            feed.step(&mut self.catalog);
        }
    }

    fn save_accounts(&self) -> Result<(), PersistenceError> {
        match &self.accounts_store {
            Some(store) => store.save(&self.registry),
            None => Ok(()),
        }
    }

    /// Writes both snapshots. Trades already applied stay applied whatever
    /// this returns.
    pub fn save(&self) -> Result<(), PersistenceError> {
        self.save_accounts()?;
        if let Some(store) = &self.stocks_store {
            store.save(&self.catalog.stocks().to_vec())?;
        }
        Ok(())
    }
}

/// Makes every stock's float agree with the lots the accounts hold, so that
/// `shares_left == total_shares - (long + short held)` after a restore.
/// Fails when the accounts hold more of a stock than was ever issued.
fn reconcile_float(
    catalog: &mut StockCatalog,
    registry: &AccountRegistry,
) -> Result<(), PersistenceError> {
    let mut held: HashMap<&str, u64> = HashMap::new();
    for account in registry.accounts() {
        for lot in account.lots() {
            if catalog.find_by_symbol(&lot.symbol).is_none() {
                warn!(
                    "{} holds {} {} {}, which is not listed",
                    account.name(),
                    lot.quantity,
                    lot.position,
                    lot.symbol
                );
                continue;
            }
            let total = held.entry(lot.symbol.as_str()).or_insert(0);
            *total = total.checked_add(lot.quantity).ok_or_else(|| {
                PersistenceError::Inconsistent(format!("holdings of {} overflow", lot.symbol))
            })?;
        }
    }

    for stock in catalog.stocks_mut() {
        let outstanding = held.get(stock.symbol.as_str()).copied().unwrap_or(0);
        if stock.outstanding() == outstanding {
            continue;
        }
        warn!(
            "{}: snapshot float has {} shares out, accounts hold {}; re-deriving",
            stock.symbol,
            stock.outstanding(),
            outstanding
        );
        if !stock.set_outstanding(outstanding) {
            return Err(PersistenceError::Inconsistent(format!(
                "accounts hold {} {} but only {} were issued",
                outstanding,
                stock.symbol,
                stock.total_shares()
            )));
        }
    }
    Ok(())
}
