//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! payment reconciliation test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built currencies, amounts and the reference invoices
//! - `builders`: Builder patterns for invoices and sessions
//! - `assertions`: Custom assertion helpers for money and verdicts
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
