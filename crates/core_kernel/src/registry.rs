//! Currency Registry
//!
//! Read-only reference data mapping a currency identifier to its ISO code,
//! display symbol and number of fractional digits. The registry is the only
//! place that decides which precision a [`Money`] value in a given currency
//! carries.
//!
//! # Usage
//!
//! ```rust,ignore
//! use core_kernel::registry::CurrencyRegistry;
//!
//! let registry = CurrencyRegistry::with_defaults();
//! let eur = registry.by_code("EUR")?;
//! let amount = registry.money_in(eur.id, "1,250.50")?;
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::money::{Money, MoneyError, MAX_PRECISION};

/// Identifier of a currency record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyId(u32);

impl CurrencyId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CurrencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CUR-{}", self.0)
    }
}

/// A currency as known to the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub id: CurrencyId,
    /// ISO 4217 code
    pub code: String,
    pub symbol: String,
    /// Number of fractional digits
    pub precision: u8,
}

impl Currency {
    pub fn new(id: CurrencyId, code: impl Into<String>, symbol: impl Into<String>, precision: u8) -> Self {
        Self {
            id,
            code: code.into(),
            symbol: symbol.into(),
            precision,
        }
    }

    /// Zero in this currency
    pub fn zero(&self) -> Result<Money, MoneyError> {
        Money::zero(self.precision)
    }

    /// Formats an amount with this currency's symbol
    pub fn format(&self, money: &Money) -> String {
        format!("{} {}", self.symbol, money.to_formatted(self.precision))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// Errors raised by registry lookups and registration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Currency already registered: {0}")]
    DuplicateCurrency(String),

    #[error("Invalid currency definition: {0}")]
    InvalidDefinition(String),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

/// Lookup table of currencies by id and by code
#[derive(Debug, Clone, Default)]
pub struct CurrencyRegistry {
    currencies: HashMap<CurrencyId, Currency>,
    codes: HashMap<String, CurrencyId>,
}

impl CurrencyRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the commonly used ISO currencies
    pub fn with_defaults() -> Self {
        let defaults = [
            (1, "USD", "$", 2),
            (2, "EUR", "€", 2),
            (3, "GBP", "£", 2),
            (4, "JPY", "¥", 0),
            (5, "CHF", "CHF", 2),
            (6, "INR", "₹", 2),
            (7, "AUD", "A$", 2),
            (8, "CAD", "C$", 2),
            (9, "SGD", "S$", 2),
            (10, "HKD", "HK$", 2),
        ];

        let mut registry = Self::new();
        for (id, code, symbol, precision) in defaults {
            let id = CurrencyId::new(id);
            registry.codes.insert(code.to_string(), id);
            registry
                .currencies
                .insert(id, Currency::new(id, code, symbol, precision));
        }
        registry
    }

    /// Builds a registry from a JSON array of currency records
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let currencies: Vec<Currency> = serde_json::from_str(json)
            .map_err(|e| RegistryError::InvalidDefinition(e.to_string()))?;

        let mut registry = Self::new();
        for currency in currencies {
            registry.register(currency)?;
        }
        Ok(registry)
    }

    /// Adds a currency
    ///
    /// # Errors
    ///
    /// - `DuplicateCurrency` if the id or code is already taken
    /// - `InvalidDefinition` if the code is blank or the precision unsupported
    pub fn register(&mut self, currency: Currency) -> Result<(), RegistryError> {
        if currency.code.trim().is_empty() {
            return Err(RegistryError::InvalidDefinition(format!(
                "currency {} has an empty code",
                currency.id
            )));
        }
        if currency.precision > MAX_PRECISION {
            return Err(RegistryError::InvalidDefinition(format!(
                "{} declares {} fractional digits",
                currency.code, currency.precision
            )));
        }
        if self.currencies.contains_key(&currency.id) {
            return Err(RegistryError::DuplicateCurrency(currency.id.to_string()));
        }
        if self.codes.contains_key(&currency.code) {
            return Err(RegistryError::DuplicateCurrency(currency.code.clone()));
        }

        self.codes.insert(currency.code.clone(), currency.id);
        self.currencies.insert(currency.id, currency);
        Ok(())
    }

    /// Looks up a currency by id
    pub fn get(&self, id: CurrencyId) -> Result<&Currency, RegistryError> {
        self.currencies
            .get(&id)
            .ok_or_else(|| RegistryError::UnknownCurrency(id.to_string()))
    }

    /// Looks up a currency by ISO code
    pub fn by_code(&self, code: &str) -> Result<&Currency, RegistryError> {
        self.codes
            .get(code)
            .and_then(|id| self.currencies.get(id))
            .ok_or_else(|| RegistryError::UnknownCurrency(code.to_string()))
    }

    /// Fractional digits used for amounts in the currency
    pub fn precision_of(&self, id: CurrencyId) -> Result<u8, RegistryError> {
        Ok(self.get(id)?.precision)
    }

    /// Zero in the currency
    pub fn zero_in(&self, id: CurrencyId) -> Result<Money, RegistryError> {
        Ok(self.get(id)?.zero()?)
    }

    /// Parses raw user input as an amount in the currency
    pub fn money_in(&self, id: CurrencyId, input: &str) -> Result<Money, RegistryError> {
        Ok(Money::parse(input, self.precision_of(id)?)?)
    }

    /// Number of registered currencies
    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    /// Iterates currencies ordered by id
    pub fn iter(&self) -> impl Iterator<Item = &Currency> {
        let mut currencies: Vec<&Currency> = self.currencies.values().collect();
        currencies.sort_by_key(|c| c.id);
        currencies.into_iter()
    }
}
