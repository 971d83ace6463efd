//! Submit-ready payment DTO
//!
//! Built only from a payment that passed reconciliation. This is the only
//! shape that leaves the engine for the persistence layer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CurrencyId, FirmId, InvoiceId, PaymentId};
use crate::error::BillingError;
use crate::payment::{Payment, PaymentMode};

/// A payment ready for persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSubmission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PaymentId>,
    pub date: NaiveDate,
    pub sequential_number: String,
    pub amount: Decimal,
    pub fee: Decimal,
    pub currency_id: CurrencyId,
    pub firm_id: FirmId,
    pub mode: PaymentMode,
    pub notes: Option<String>,
    pub lines: Vec<SubmissionLine>,
}

/// One allocation of a submitted payment
///
/// `original_amount` and `exchange_rate` are only present for
/// cross-currency lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionLine {
    pub invoice_id: InvoiceId,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
}

impl PaymentSubmission {
    /// Snapshots a reconciled payment; zero-amount lines are dropped
    pub(crate) fn from_reconciled(
        payment: &Payment,
        sequential_number: String,
    ) -> Result<Self, BillingError> {
        let date = payment.date.ok_or(BillingError::MissingDate)?;

        let lines = payment
            .lines
            .lines()
            .iter()
            .filter(|l| l.amount.is_positive())
            .map(|l| {
                let cross = l.is_cross_currency();
                SubmissionLine {
                    invoice_id: l.invoice_id,
                    amount: l.amount.to_unit(),
                    original_amount: cross.then(|| l.original_amount.to_unit()),
                    exchange_rate: cross.then_some(l.exchange_rate),
                }
            })
            .collect();

        Ok(Self {
            id: payment.id,
            date,
            sequential_number,
            amount: payment.amount.to_unit(),
            fee: payment.fee.to_unit(),
            currency_id: payment.currency_id,
            firm_id: payment.firm_id,
            mode: payment.mode,
            notes: payment.notes.clone(),
            lines,
        })
    }
}
