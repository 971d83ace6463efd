//! CLI error handling

use thiserror::Error;

use core_kernel::RegistryError;
use domain_billing::BillingError;

/// Failures that stop a run before a verdict exists
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Currency registry error: {0}")]
    Registry(#[from] RegistryError),

    /// The draft document itself is inconsistent (unknown currency,
    /// invoice amounts at the wrong precision, ...)
    #[error("Invalid payment draft: {0}")]
    Document(#[from] BillingError),
}
