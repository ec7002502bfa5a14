// src/bin/stock_console.rs

use clap::Parser;
use log::error;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use stock_simulator::{ConfigError, Console, Market, SimulatorConfig};

/// Interactive stock trading simulator.
#[derive(Parser, Debug)]
#[command(name = "stock_console")]
#[command(about = "Register, search and trade simulated stocks", long_about = None)]
struct Args {
    /// JSON config file; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the account, stock and transaction files.
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Cash given to newly registered accounts.
    #[arg(long)]
    starting_cash: Option<f64>,

    /// Move prices with a random-walk feed between menu actions.
    #[arg(long)]
    feed: bool,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    volatility: Option<f64>,

    #[arg(long)]
    drift: Option<f64>,
}

impl Args {
    fn into_config(self) -> Result<SimulatorConfig, ConfigError> {
        let mut cfg = match &self.config {
            Some(path) => SimulatorConfig::from_file(path)?,
            None => SimulatorConfig::default(),
        };
        if let Some(dir) = self.data_dir {
            cfg.data_dir = dir;
        }
        if let Some(cash) = self.starting_cash {
            cfg.starting_cash = cash;
        }
        if self.feed {
            cfg.feed.enabled = true;
        }
        if let Some(seed) = self.seed {
            cfg.feed.seed = seed;
        }
        if let Some(volatility) = self.volatility {
            cfg.feed.volatility = volatility;
        }
        if let Some(drift) = self.drift {
            cfg.feed.drift = drift;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = match Args::parse().into_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let market = match Market::open(&cfg) {
        Ok(market) => market,
        Err(e) => {
            error!("could not open market data in {}: {e}", cfg.data_dir.display());
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let mut console = Console::new(market, stdin.lock(), io::stdout());
    if let Err(e) = console.run() {
        error!("console i/o failed: {e}");
        return ExitCode::FAILURE;
    }
    if let Err(e) = console.market().save() {
        error!("final save failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
