// src/portfolio/mod.rs

pub mod account;
pub mod holding;
pub mod registry;
pub mod valuation;

pub use account::Account;
pub use holding::HoldingLot;
pub use registry::AccountRegistry;
pub use valuation::{HoldingRow, PortfolioReport, ShortValuation};
