//! Core Kernel - Foundational types for the payment reconciliation engine
//!
//! This crate provides the building blocks used by the billing domain:
//! - Money values with exact fixed-precision arithmetic
//! - Exchange rates and the shared tolerance epsilon
//! - The currency registry that decides each currency's precision
//! - Strongly-typed identifiers

pub mod money;
pub mod registry;
pub mod identifiers;

pub use money::{Money, MoneyError, ExchangeRate, MAX_PRECISION, TOLERANCE_EPSILON};
pub use registry::{Currency, CurrencyId, CurrencyRegistry, RegistryError};
pub use identifiers::{PaymentId, InvoiceId, FirmId};
