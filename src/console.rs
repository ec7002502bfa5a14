// src/console.rs

//! Interactive text front end. Reads menu choices from any `BufRead` and
//! writes prompts to any `Write`, so a whole session can be scripted.

use crate::market::Market;
use crate::types::trade::{TradeAction, TradeRequest};
use log::warn;
use std::io::{self, BufRead, Write};

pub struct Console<R, W> {
    market: Market,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(market: Market, input: R, output: W) -> Self {
        Self {
            market,
            input,
            output,
        }
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    /// Gives back the market and the writer, e.g. to inspect a scripted run.
    pub fn into_parts(self) -> (Market, W) {
        (self.market, self.output)
    }

    /// Next trimmed input line. `None` once the input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Main loop: Login / Register / Exit.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "Welcome to the Stock Market Simulator!")?;
            writeln!(self.output, "1. Login")?;
            writeln!(self.output, "2. Register")?;
            writeln!(self.output, "3. Exit")?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                break;
            };
            match choice.as_str() {
                "1" => {
                    if let Some(name) = self.login()? {
                        if !self.account_menu(&name)? {
                            break;
                        }
                    }
                }
                "2" => self.register()?,
                "3" => break,
                _ => writeln!(self.output, "Invalid option. Please try again.")?,
            }
        }
        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }

    fn login(&mut self) -> io::Result<Option<String>> {
        let Some(name) = self.prompt("Enter your username: ")? else {
            return Ok(None);
        };
        match self.market.login(&name) {
            Ok(name) => {
                writeln!(self.output, "Login successful.")?;
                Ok(Some(name))
            }
            Err(e) => {
                writeln!(self.output, "{e}")?;
                Ok(None)
            }
        }
    }

    fn register(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Choose a username: ")? else {
            return Ok(());
        };
        match self.market.register(&name) {
            Ok(_) => writeln!(self.output, "Registration successful. Please login.")?,
            Err(e) => writeln!(self.output, "{e}")?,
        }
        Ok(())
    }

    /// Portfolio / Search / Trade / Exit. Returns `false` when input ran out.
    fn account_menu(&mut self, account: &str) -> io::Result<bool> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Menu:")?;
            writeln!(self.output, "1. Portfolio")?;
            writeln!(self.output, "2. Search Stock")?;
            writeln!(self.output, "3. Trade Stock")?;
            writeln!(self.output, "4. Exit")?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                return Ok(false);
            };
            match choice.as_str() {
                "1" => self.show_portfolio(account)?,
                "2" => self.search()?,
                "3" => self.trade(account)?,
                "4" => return Ok(true),
                _ => writeln!(self.output, "Invalid option. Please try again.")?,
            }
            self.market.tick();
        }
    }

    fn show_portfolio(&mut self, account: &str) -> io::Result<()> {
        match self.market.portfolio(account) {
            Ok(report) => write!(self.output, "{report}"),
            Err(e) => writeln!(self.output, "{e}"),
        }
    }

    /// Blank input lists the whole catalog.
    fn search(&mut self) -> io::Result<()> {
        let Some(symbol) = self.prompt("Enter stock symbol (blank for all): ")? else {
            return Ok(());
        };
        if symbol.is_empty() {
            let lines: Vec<String> = self
                .market
                .catalog()
                .stocks()
                .iter()
                .map(|s| {
                    format!(
                        "{:<6} {:<24} ${:>9.2}  {:>11} shares available",
                        s.symbol,
                        s.company_name,
                        s.price,
                        s.shares_left()
                    )
                })
                .collect();
            for line in lines {
                writeln!(self.output, "{line}")?;
            }
            return Ok(());
        }
        let line = match self.market.search(&symbol) {
            Some(s) => format!(
                "Symbol: {}, Company: {}, Price: ${:.2}, Shares Available: {}",
                s.symbol,
                s.company_name,
                s.price,
                s.shares_left()
            ),
            None => "Sorry, that stock is not trading.".to_string(),
        };
        writeln!(self.output, "{line}")
    }

    fn choose_action(&mut self) -> io::Result<Option<TradeAction>> {
        writeln!(self.output, "1. Buy")?;
        writeln!(self.output, "2. Sell")?;
        writeln!(self.output, "3. Sell Short")?;
        writeln!(self.output, "4. Buy to Cover")?;
        let Some(choice) = self.prompt("Choose a trade: ")? else {
            return Ok(None);
        };
        let action = match choice.as_str() {
            "1" => Some(TradeAction::Buy),
            "2" => Some(TradeAction::Sell),
            "3" => Some(TradeAction::SellShort),
            "4" => Some(TradeAction::BuyToCover),
            _ => {
                writeln!(self.output, "Invalid option. Please try again.")?;
                None
            }
        };
        Ok(action)
    }

    fn trade(&mut self, account: &str) -> io::Result<()> {
        let Some(action) = self.choose_action()? else {
            return Ok(());
        };
        let Some(symbol) = self.prompt("Enter stock symbol you would like to trade: ")? else {
            return Ok(());
        };
        let Some(raw_quantity) = self.prompt("How many shares would you like to trade: ")? else {
            return Ok(());
        };
        let Ok(quantity) = raw_quantity.parse::<i64>() else {
            writeln!(self.output, "Please enter a whole number of shares.")?;
            return Ok(());
        };

        let request = TradeRequest::new(action, symbol, quantity);
        match self.market.trade(account, &request) {
            Ok(record) => {
                writeln!(
                    self.output,
                    "You {} {} {} at ${:.2}. The total comes to: ${:.2}",
                    record.action.past_tense(),
                    record.quantity,
                    record.symbol,
                    record.price,
                    record.amount
                )?;
                if let Err(e) = self.market.save() {
                    warn!("snapshot save failed after trade: {e}");
                    writeln!(self.output, "Warning: trade done but not saved: {e}")?;
                }
            }
            Err(e) => writeln!(self.output, "Trade not executed: {e}")?,
        }
        Ok(())
    }
}
