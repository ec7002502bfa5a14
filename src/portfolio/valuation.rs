// src/portfolio/valuation.rs

use super::account::Account;
use crate::stocks::StockCatalog;
use crate::types::position::PositionType;
use std::fmt;

/// How short lots enter the portfolio value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortValuation {
    /// Short lots add `quantity * price`, exactly like long lots. This is the
    /// number the console has always shown.
    #[default]
    AsAsset,
    /// Short lots subtract `quantity * price`: the cost to cover is a debt.
    AsLiability,
}

impl ShortValuation {
    pub(crate) fn sign(self, position: PositionType) -> f64 {
        match (self, position) {
            (ShortValuation::AsLiability, PositionType::Short) => -1.0,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoldingRow {
    pub symbol: String,
    pub position: PositionType,
    pub price: f64,
    pub quantity: u64,
    pub market_value: f64,
}

/// Point-in-time view of an account for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioReport {
    pub account: String,
    pub cash: f64,
    pub total_value: f64,
    pub rows: Vec<HoldingRow>,
}

impl PortfolioReport {
    pub fn build(account: &Account, catalog: &StockCatalog, valuation: ShortValuation) -> Self {
        let rows = account
            .lots()
            .iter()
            .map(|lot| {
                let price = catalog.price_of(&lot.symbol).unwrap_or(0.0);
                HoldingRow {
                    symbol: lot.symbol.clone(),
                    position: lot.position,
                    price,
                    quantity: lot.quantity,
                    market_value: price * lot.quantity as f64,
                }
            })
            .collect();

        Self {
            account: account.name().to_string(),
            cash: account.cash_balance(),
            total_value: account.portfolio_value_with(catalog, valuation),
            rows,
        }
    }
}

impl fmt::Display for PortfolioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}'s Portfolio", self.account)?;
        writeln!(f, "---------------------------")?;
        writeln!(
            f,
            "Account Value: ${:.2}   Cash: ${:.2}",
            self.total_value, self.cash
        )?;
        if self.rows.is_empty() {
            writeln!(f, "(no holdings)")?;
        }
        for row in &self.rows {
            writeln!(
                f,
                "{:<6} {:<5} qty {:>10}  @ ${:>10.2}  = ${:>12.2}",
                row.symbol, row.position, row.quantity, row.price, row.market_value
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lists_lots_and_totals() {
        let catalog = StockCatalog::new();
        let mut account = Account::new("bob", 8_779.8);
        account.add_lot("AAPL", PositionType::Long, 10);

        let report = PortfolioReport::build(&account, &catalog, ShortValuation::default());

        assert_eq!(report.rows.len(), 1);
        assert!((report.rows[0].market_value - 1_220.2).abs() < 1e-9);
        assert!((report.total_value - 10_000.0).abs() < 1e-6);

        let text = report.to_string();
        assert!(text.starts_with("bob's Portfolio"));
        assert!(text.contains("Account Value: $10000.00   Cash: $8779.80"));
        assert!(text.contains("AAPL"));
    }

    #[test]
    fn default_valuation_counts_shorts_as_assets() {
        assert_eq!(ShortValuation::default(), ShortValuation::AsAsset);
        assert_eq!(ShortValuation::AsAsset.sign(PositionType::Short), 1.0);
        assert_eq!(ShortValuation::AsLiability.sign(PositionType::Short), -1.0);
        assert_eq!(ShortValuation::AsLiability.sign(PositionType::Long), 1.0);
    }
}
