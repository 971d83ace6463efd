//! Money types with exact fixed-precision arithmetic
//!
//! A [`Money`] value is an integer count of minor units bound to a declared
//! number of fractional digits. Arithmetic between two values is only
//! defined when both declare the same precision; combining different
//! precisions requires an explicit [`Money::rescale`] or a currency
//! conversion. Decimal scaling goes through rust_decimal so no binary
//! floating point ever touches an amount.

use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Largest number of fractional digits a [`Money`] value may declare
pub const MAX_PRECISION: u8 = 8;

/// Margin, in currency units, that absorbs rounding noise in balance and
/// total comparisons
pub const TOLERANCE_EPSILON: Decimal = dec!(0.01);

/// Rounding applied whenever a value is scaled to a precision
const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Errors that can occur during money operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Precision mismatch: cannot combine {0} and {1} fractional digits")]
    PrecisionMismatch(u8, u8),

    #[error("Invalid exchange rate: {0} (must be greater than zero)")]
    InvalidRate(Decimal),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid precision: {0} (maximum is {max})", max = MAX_PRECISION)]
    InvalidPrecision(u8),

    #[error("Overflow during calculation")]
    Overflow,
}

/// A monetary amount held as minor units at a fixed precision
///
/// `Money` is immutable; every operation returns a new value. It cannot
/// represent NaN or an undefined amount, so all raw input has to pass
/// through one of the fallible constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMoney")]
pub struct Money {
    minor_units: i64,
    precision: u8,
}

/// Wire shape of [`Money`], checked through [`Money::from_minor`]
#[derive(Deserialize)]
struct RawMoney {
    minor_units: i64,
    precision: u8,
}

impl TryFrom<RawMoney> for Money {
    type Error = MoneyError;

    fn try_from(raw: RawMoney) -> Result<Self, Self::Error> {
        Money::from_minor(raw.minor_units, raw.precision)
    }
}

impl Money {
    /// Creates Money from an integer amount in minor units (e.g., cents)
    pub fn from_minor(minor_units: i64, precision: u8) -> Result<Self, MoneyError> {
        check_precision(precision)?;
        Ok(Self {
            minor_units,
            precision,
        })
    }

    /// Creates a zero amount at the given precision
    pub fn zero(precision: u8) -> Result<Self, MoneyError> {
        Self::from_minor(0, precision)
    }

    /// Scales a decimal to `precision`, rounding half away from zero once
    pub fn from_decimal(value: Decimal, precision: u8) -> Result<Self, MoneyError> {
        check_precision(precision)?;
        let mut rounded = value.round_dp_with_strategy(u32::from(precision), ROUNDING);
        rounded.rescale(u32::from(precision));
        if rounded.scale() != u32::from(precision) {
            return Err(MoneyError::Overflow);
        }
        let minor_units = i64::try_from(rounded.mantissa()).map_err(|_| MoneyError::Overflow)?;
        Ok(Self {
            minor_units,
            precision,
        })
    }

    /// Creates Money from a float captured at an input boundary
    ///
    /// The float is converted to its shortest decimal representation before
    /// scaling, so `0.1` becomes exactly one tenth.
    pub fn from_f64(value: f64, precision: u8) -> Result<Self, MoneyError> {
        if !value.is_finite() {
            return Err(MoneyError::InvalidAmount(format!(
                "amount must be a finite number, got {}",
                value
            )));
        }
        let decimal = Decimal::from_str(&value.to_string())
            .ok()
            .or_else(|| Decimal::from_f64_retain(value))
            .ok_or(MoneyError::Overflow)?;
        Self::from_decimal(decimal, precision)
    }

    /// Parses user-entered text such as `"1,250.50"` or `" 12 "`
    ///
    /// Commas are only accepted as thousands separators in the integer
    /// part: `"1,00.5"` is rejected.
    pub fn parse(input: &str, precision: u8) -> Result<Self, MoneyError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(MoneyError::InvalidAmount("amount is empty".to_string()));
        }
        let invalid = || MoneyError::InvalidAmount(format!("'{}' is not a decimal number", trimmed));

        let cleaned = strip_thousands_separators(trimmed).ok_or_else(invalid)?;
        let value = Decimal::from_str(&cleaned).map_err(|_| invalid())?;
        Self::from_decimal(value, precision)
    }

    /// Tolerance epsilon expressed at `precision`
    ///
    /// Rounds to zero for currencies without fractional digits.
    pub fn tolerance(precision: u8) -> Result<Self, MoneyError> {
        Self::from_decimal(TOLERANCE_EPSILON, precision)
    }

    /// Returns the amount in minor units
    pub fn minor_units(&self) -> i64 {
        self.minor_units
    }

    /// Returns the declared number of fractional digits
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Returns the amount in whole currency units
    pub fn to_unit(&self) -> Decimal {
        Decimal::new(self.minor_units, u32::from(self.precision))
    }

    /// Formats the amount with exactly `precision` fractional digits
    pub fn to_formatted(&self, precision: u8) -> String {
        let value = self
            .to_unit()
            .round_dp_with_strategy(u32::from(precision), ROUNDING);
        format!("{:.dp$}", value, dp = precision as usize)
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.minor_units == 0
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.minor_units > 0
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.minor_units < 0
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Result<Self, MoneyError> {
        let minor_units = self.minor_units.checked_abs().ok_or(MoneyError::Overflow)?;
        Ok(Self {
            minor_units,
            precision: self.precision,
        })
    }

    /// Checked addition that returns an error on precision mismatch
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.same_precision(other)?;
        let minor_units = self
            .minor_units
            .checked_add(other.minor_units)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self {
            minor_units,
            precision: self.precision,
        })
    }

    /// Checked subtraction that returns an error on precision mismatch
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.same_precision(other)?;
        let minor_units = self
            .minor_units
            .checked_sub(other.minor_units)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self {
            minor_units,
            precision: self.precision,
        })
    }

    /// Compares two amounts of the same precision
    pub fn checked_cmp(&self, other: &Money) -> Result<Ordering, MoneyError> {
        self.same_precision(other)?;
        Ok(self.minor_units.cmp(&other.minor_units))
    }

    /// Multiplies by a scalar, rounding once at this precision
    pub fn multiply(&self, factor: Decimal) -> Result<Self, MoneyError> {
        let product = self
            .to_unit()
            .checked_mul(factor)
            .ok_or(MoneyError::Overflow)?;
        Self::from_decimal(product, self.precision)
    }

    /// Divides by a strictly positive scalar, rounding once at this precision
    pub fn divide(&self, divisor: Decimal) -> Result<Self, MoneyError> {
        if divisor <= Decimal::ZERO {
            return Err(MoneyError::InvalidRate(divisor));
        }
        let quotient = self
            .to_unit()
            .checked_div(divisor)
            .ok_or(MoneyError::Overflow)?;
        Self::from_decimal(quotient, self.precision)
    }

    /// Re-expresses the amount at another precision
    pub fn rescale(&self, precision: u8) -> Result<Self, MoneyError> {
        Self::from_decimal(self.to_unit(), precision)
    }

    /// Sums an iterator of amounts that all share `precision`
    pub fn sum<'a, I>(amounts: I, precision: u8) -> Result<Self, MoneyError>
    where
        I: IntoIterator<Item = &'a Money>,
    {
        amounts
            .into_iter()
            .try_fold(Self::zero(precision)?, |acc, m| acc.checked_add(m))
    }

    fn same_precision(&self, other: &Money) -> Result<(), MoneyError> {
        if self.precision != other.precision {
            return Err(MoneyError::PrecisionMismatch(self.precision, other.precision));
        }
        Ok(())
    }
}

impl PartialOrd for Money {
    /// Amounts at different precisions are unordered
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.checked_cmp(other).ok()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_formatted(self.precision))
    }
}

/// Removes well-formed thousands grouping (`1,234,567.89`); `None` when a
/// comma sits anywhere else
fn strip_thousands_separators(input: &str) -> Option<String> {
    let (integer, fraction) = match input.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (input, None),
    };
    if fraction.is_some_and(|f| f.contains(',')) {
        return None;
    }

    let (sign, digits) = match integer.strip_prefix(['-', '+']) {
        Some(rest) => (&integer[..1], rest),
        None => ("", integer),
    };
    let mut groups = digits.split(',');
    let head = groups.next().unwrap_or_default();
    let grouped = digits.contains(',');
    if grouped && !(1..=3).contains(&head.len()) {
        return None;
    }

    let mut cleaned = format!("{sign}{head}");
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        cleaned.push_str(group);
    }
    if let Some(fraction) = fraction {
        cleaned.push('.');
        cleaned.push_str(fraction);
    }
    Some(cleaned)
}

fn check_precision(precision: u8) -> Result<(), MoneyError> {
    if precision > MAX_PRECISION {
        return Err(MoneyError::InvalidPrecision(precision));
    }
    Ok(())
}

/// Conversion rate between a payment currency and an invoice currency
///
/// Expressed as payment-currency units per one invoice-currency unit.
/// Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct ExchangeRate {
    value: Decimal,
}

impl ExchangeRate {
    /// The identity rate used between two amounts in the same currency
    pub const ONE: ExchangeRate = ExchangeRate {
        value: Decimal::ONE,
    };

    /// Creates a rate, rejecting zero and negative values
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        if value <= Decimal::ZERO {
            return Err(MoneyError::InvalidRate(value));
        }
        Ok(Self {
            value: value.normalize(),
        })
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns true for the identity rate
    pub fn is_one(&self) -> bool {
        self.value == Decimal::ONE
    }

    /// Returns the reciprocal rate
    pub fn inverse(&self) -> Result<Self, MoneyError> {
        let inverted = Decimal::ONE
            .checked_div(self.value)
            .ok_or(MoneyError::Overflow)?;
        Self::new(inverted)
    }
}

impl TryFrom<Decimal> for ExchangeRate {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExchangeRate> for Decimal {
    fn from(rate: ExchangeRate) -> Decimal {
        rate.value
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
