// src/simulators/gbm.rs

use super::price_feed::PriceFeed;
use crate::stocks::StockCatalog;
use log::debug;
use rand::SeedableRng;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand_distr::Normal;

/// Prices never drop below one cent.
const PRICE_FLOOR: f64 = 0.01;
const TRADING_DAYS: f64 = 252.0;

/// Geometric Brownian motion applied to every listed stock, one trading day
/// per step.
pub struct GbmFeed {
    drift: f64,
    volatility: f64,
    seed: u64,
    rng: StdRng,
    normal_dist: Normal<f64>,
}

impl GbmFeed {
    /// `drift` and `volatility` are annualised. Fails when the volatility is
    /// negative or not finite.
    pub fn new(drift: f64, volatility: f64, seed: u64) -> Result<Self, rand_distr::NormalError> {
        let daily_volatility = volatility / TRADING_DAYS.sqrt();
        Ok(Self {
            drift,
            volatility,
            seed,
            rng: StdRng::seed_from_u64(seed),
            normal_dist: Normal::new(0.0, daily_volatility)?,
        })
    }

    /// Next price for one stock. Includes the -sigma^2/2 Ito correction.
    fn next_price(&mut self, price: f64) -> f64 {
        let daily_drift = self.drift / TRADING_DAYS;
        let daily_variance = self.volatility.powi(2) / TRADING_DAYS;
        let shock = self.normal_dist.sample(&mut self.rng);
        let next = price * ((daily_drift - 0.5 * daily_variance) + shock).exp();
        ((next * 100.0).round() / 100.0).max(PRICE_FLOOR)
    }
}

impl PriceFeed for GbmFeed {
    fn step(&mut self, catalog: &mut StockCatalog) {
        let moves: Vec<(String, f64)> = catalog
            .stocks()
            .iter()
            .map(|s| (s.symbol.clone(), s.price))
            .collect();
        for (symbol, price) in moves {
            let next = self.next_price(price);
            debug!("{symbol}: {price:.2} -> {next:.2}");
            // Symbols come straight from the catalog, so the lookup cannot miss.
            let _ = catalog.set_price(&symbol, next);
        }
    }

    /// Reseeds the RNG. Catalog prices are left where they are, so the
    /// original path only replays when stepped against the catalog's starting
    /// prices again.
    fn reset(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }
}
