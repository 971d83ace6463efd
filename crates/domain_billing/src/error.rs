//! Billing domain errors
//!
//! One taxonomy covers both rejected edits and reconciliation verdicts.
//! Every variant is recoverable: the caller corrects its input and retries.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use core_kernel::{InvoiceId, Money, MoneyError, RegistryError};

/// Errors that can occur in the billing domain
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BillingError {
    /// Arithmetic-level failure (precision mismatch, invalid rate, overflow)
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Currency lookup failure
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// No allocation line exists for the invoice
    #[error("No allocation line for invoice: {0}")]
    LineNotFound(InvoiceId),

    /// The invoice is not part of the session's snapshot
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(InvoiceId),

    /// A line for the invoice already exists
    #[error("Invoice {0} is already allocated")]
    DuplicateAllocation(InvoiceId),

    /// The invoice's remaining balance is within tolerance of zero
    #[error("Invoice {0} is already settled")]
    InvoiceSettled(InvoiceId),

    /// Allocation amounts cannot be negative
    #[error("Negative allocation for invoice {invoice_id}: {amount}")]
    NegativeAllocation { invoice_id: InvoiceId, amount: Money },

    /// Requested position is outside the line list
    #[error("Invalid position {index} for {len} allocation lines")]
    InvalidPosition { index: usize, len: usize },

    /// Payment date has not been set
    #[error("Payment date is required")]
    MissingDate,

    /// Declared payment total must be strictly positive
    #[error("Payment amount must be greater than zero, got {amount}")]
    NonPositiveAmount { amount: Money },

    /// Fees cannot be negative
    #[error("Fee cannot be negative, got {fee}")]
    NegativeFee { fee: Money },

    /// Fee must be strictly below the payment amount
    #[error("Fee {fee} must be less than the payment amount {amount}")]
    FeeExceedsAmount { fee: Money, amount: Money },

    /// Allocation would overpay the invoice
    #[error("Allocation of {requested} to invoice {invoice_id} exceeds the maximum of {max_allowed}")]
    AllocationExceedsBalance {
        invoice_id: InvoiceId,
        /// Requested amount in payment currency
        requested: Money,
        /// Largest acceptable amount in payment currency
        max_allowed: Money,
    },

    /// Exchange rate is non-positive, or not 1 for a same-currency line
    #[error("Invalid exchange rate {rate} for invoice {invoice_id}")]
    InvalidExchangeRate { invoice_id: InvoiceId, rate: Decimal },

    /// Amount and original amount of a line no longer derive from each other
    #[error("Amount {amount} and original amount {original_amount} of invoice {invoice_id} have drifted apart")]
    PrecisionMismatch {
        invoice_id: InvoiceId,
        amount: Money,
        original_amount: Money,
    },

    /// Declared payment total differs from the sum of its allocations
    #[error("Payment total {declared} does not match allocated total {computed}")]
    TotalMismatch { declared: Money, computed: Money },

    /// Nothing is allocated to any invoice
    #[error("Payment has no valid allocations")]
    NoValidAllocations,
}

impl BillingError {
    /// Stable machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            BillingError::Money(MoneyError::PrecisionMismatch(..)) => "PrecisionMismatch",
            BillingError::Money(MoneyError::InvalidRate(_)) => "InvalidRate",
            BillingError::Money(MoneyError::InvalidAmount(_)) => "InvalidAmount",
            BillingError::Money(MoneyError::InvalidPrecision(_)) => "InvalidPrecision",
            BillingError::Money(MoneyError::Overflow) => "Overflow",
            BillingError::Registry(_) => "UnknownCurrency",
            BillingError::LineNotFound(_) => "LineNotFound",
            BillingError::InvoiceNotFound(_) => "InvoiceNotFound",
            BillingError::DuplicateAllocation(_) => "DuplicateAllocation",
            BillingError::InvoiceSettled(_) => "InvoiceSettled",
            BillingError::NegativeAllocation { .. } => "NegativeAllocation",
            BillingError::InvalidPosition { .. } => "InvalidPosition",
            BillingError::MissingDate => "MissingDate",
            BillingError::NonPositiveAmount { .. } => "NonPositiveAmount",
            BillingError::NegativeFee { .. } => "NegativeFee",
            BillingError::FeeExceedsAmount { .. } => "FeeExceedsAmount",
            BillingError::AllocationExceedsBalance { .. } => "AllocationExceedsBalance",
            BillingError::InvalidExchangeRate { .. } => "InvalidExchangeRate",
            BillingError::PrecisionMismatch { .. } => "PrecisionMismatch",
            BillingError::TotalMismatch { .. } => "TotalMismatch",
            BillingError::NoValidAllocations => "NoValidAllocations",
        }
    }

    /// The invoice the error is about, if any
    pub fn invoice_id(&self) -> Option<InvoiceId> {
        match self {
            BillingError::LineNotFound(id)
            | BillingError::InvoiceNotFound(id)
            | BillingError::DuplicateAllocation(id)
            | BillingError::InvoiceSettled(id) => Some(*id),
            BillingError::NegativeAllocation { invoice_id, .. }
            | BillingError::AllocationExceedsBalance { invoice_id, .. }
            | BillingError::InvalidExchangeRate { invoice_id, .. }
            | BillingError::PrecisionMismatch { invoice_id, .. } => Some(*invoice_id),
            _ => None,
        }
    }

    /// Structured form for display layers
    pub fn detail(&self) -> ErrorDetail {
        let mut context = BTreeMap::new();
        let mut put = |key: &'static str, value: Decimal| {
            context.insert(key, value);
        };

        match self {
            BillingError::Money(MoneyError::InvalidRate(rate)) => put("rate", *rate),
            BillingError::NegativeAllocation { amount, .. } => put("amount", amount.to_unit()),
            BillingError::InvalidPosition { index, len } => {
                put("index", Decimal::from(*index as u64));
                put("len", Decimal::from(*len as u64));
            }
            BillingError::NonPositiveAmount { amount } => put("amount", amount.to_unit()),
            BillingError::NegativeFee { fee } => put("fee", fee.to_unit()),
            BillingError::FeeExceedsAmount { fee, amount } => {
                put("fee", fee.to_unit());
                put("amount", amount.to_unit());
            }
            BillingError::AllocationExceedsBalance {
                requested,
                max_allowed,
                ..
            } => {
                put("requested", requested.to_unit());
                put("maxAllowed", max_allowed.to_unit());
            }
            BillingError::InvalidExchangeRate { rate, .. } => put("rate", *rate),
            BillingError::PrecisionMismatch {
                amount,
                original_amount,
                ..
            } => {
                put("amount", amount.to_unit());
                put("originalAmount", original_amount.to_unit());
            }
            BillingError::TotalMismatch { declared, computed } => {
                put("declared", declared.to_unit());
                put("computed", computed.to_unit());
            }
            _ => {}
        }

        ErrorDetail {
            kind: self.kind(),
            invoice_id: self.invoice_id(),
            message: self.to_string(),
            context,
        }
    }
}

/// Serializable view of a [`BillingError`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<InvoiceId>,
    pub message: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<&'static str, Decimal>,
}
