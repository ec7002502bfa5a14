// src/portfolio/registry.rs

use super::account::Account;
use crate::config::is_valid_starting_cash;
use crate::errors::RegistryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every account known to the session, keyed by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRegistry {
    starting_cash: f64,
    accounts: BTreeMap<String, Account>,
}

impl AccountRegistry {
    pub fn new(starting_cash: f64) -> Self {
        Self {
            starting_cash,
            accounts: BTreeMap::new(),
        }
    }

    pub fn starting_cash(&self) -> f64 {
        self.starting_cash
    }

    /// Changes the funding of accounts registered from now on.
    pub fn set_starting_cash(&mut self, starting_cash: f64) {
        self.starting_cash = starting_cash;
    }

    /// Opens a new account funded with the starting cash. Names are trimmed
    /// and must be unique. Refuses while the starting cash is negative or
    /// not finite.
    pub fn register(&mut self, name: &str) -> Result<&Account, RegistryError> {
        if !is_valid_starting_cash(self.starting_cash) {
            return Err(RegistryError::InvalidStartingCash(self.starting_cash));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.accounts.contains_key(name) {
            return Err(RegistryError::AlreadyRegistered(name.to_string()));
        }
        let account = Account::new(name, self.starting_cash);
        Ok(self.accounts.entry(name.to_string()).or_insert(account))
    }

    /// Looks up an existing account for a login.
    pub fn login(&self, name: &str) -> Result<&Account, RegistryError> {
        let name = name.trim();
        self.accounts
            .get(name)
            .ok_or_else(|| RegistryError::UnknownAccount(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Account> {
        self.accounts.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Account> {
        self.accounts.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.accounts.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.accounts.keys().map(String::as_str).collect()
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
