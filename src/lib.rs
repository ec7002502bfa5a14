// src/lib.rs

// === 1. Declare all the top-level modules ===
pub mod config;
pub mod console;
pub mod engine;
pub mod errors;
pub mod market;
pub mod persistence;
pub mod portfolio;
pub mod simulators;
pub mod stocks;
pub mod transaction_log;
pub mod types;

// === 2. Re-export the public-facing components to create a clean API ===

// --- From `engine` ---
pub use engine::concurrent::{SharedAccount, SharedMarket, shared_account};
pub use engine::{Settlement, TransactionEngine};

// --- From `market` and `console` (the session) ---
pub use config::{FeedConfig, SimulatorConfig};
pub use console::Console;
pub use market::Market;

// --- From `stocks` and `portfolio` ---
pub use portfolio::{Account, AccountRegistry, HoldingLot, PortfolioReport, ShortValuation};
pub use stocks::{Stock, StockCatalog, Symbol, default_stock_universe};

// --- From `simulators` ---
pub use simulators::{GbmFeed, PriceFeed};

// --- Storage and logging ---
pub use persistence::{JsonFileStore, Store};
pub use transaction_log::{JsonLinesLog, MemoryLog, NullLog, TransactionLog};

// --- From `types` and `errors` ---
pub use errors::{ConfigError, LogError, PersistenceError, RegistryError, SessionError, TradeError};
pub use types::{PositionType, TradeAction, TradeRequest, TransactionRecord};
