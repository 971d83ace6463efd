//! Payment Reconcile CLI
//!
//! Replays a JSON payment draft through a [`PaymentSession`] and reports
//! either the submit-ready payment or the first rule it breaks.
//!
//! # Modules
//!
//! - `config`: environment configuration
//! - `dto`: the draft document format
//! - `error`: failures that prevent a verdict

pub mod config;
pub mod dto;
pub mod error;

use serde::Serialize;
use tracing::{debug, info, instrument};

use core_kernel::{CurrencyRegistry, InvoiceId};
use domain_billing::{BillingError, ErrorDetail, Invoice, PaymentSession, PaymentSubmission};

use crate::dto::{AllocationEdit, PaymentDraftDocument};
use crate::error::CliError;

/// Exit status for a valid payment
pub const EXIT_VALID: u8 = 0;
/// Exit status for I/O, parse and document failures
pub const EXIT_FAILURE: u8 = 1;
/// Exit status for a rejected payment or edit
pub const EXIT_REJECTED: u8 = 2;

/// Outcome of reconciling one draft
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReconcileReport {
    /// Every rule passed
    Valid { submission: PaymentSubmission },
    /// The reconciled draft broke a rule
    Rejected { error: ErrorDetail },
    /// An edit was refused; later edits were not applied
    EditRejected { invoice: InvoiceId, error: ErrorDetail },
}

impl ReconcileReport {
    pub fn is_valid(&self) -> bool {
        matches!(self, ReconcileReport::Valid { .. })
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_valid() {
            EXIT_VALID
        } else {
            EXIT_REJECTED
        }
    }
}

/// Opens a session for the draft, replays its edits and validates it
///
/// # Errors
///
/// Returns `CliError::Document` when the draft cannot even be loaded: an
/// unknown currency code, or invoice amounts that do not fit their
/// currency. A malformed header fee or amount is a rule failure like any
/// other and comes back as [`ReconcileReport::Rejected`].
#[instrument(level = "debug", skip_all, fields(sequential = %document.sequential_number))]
pub fn reconcile(
    document: &PaymentDraftDocument,
    registry: &CurrencyRegistry,
) -> Result<ReconcileReport, CliError> {
    let currency = registry.by_code(&document.currency)?;
    let invoices = document
        .invoices
        .iter()
        .map(|record| record.to_invoice(registry))
        .collect::<Result<Vec<Invoice>, _>>()?;

    let mut session = PaymentSession::open(
        registry.clone(),
        document.firm_id,
        currency.id,
        document.default_rate,
        invoices,
    )?;
    let precision = session.payment().precision();

    if let Some(id) = document.id {
        session.set_id(id);
    }
    if let Some(date) = document.date {
        session.set_date(date);
    }
    session.set_mode(document.mode);
    if let Some(notes) = &document.notes {
        session.set_notes(notes.as_str());
    }
    if let Some(fee) = &document.fee {
        let applied = fee
            .to_money(precision)
            .map_err(BillingError::from)
            .and_then(|fee| session.set_fee(fee));
        if let Err(error) = applied {
            return Ok(rejected(error));
        }
    }

    for edit in &document.edits {
        if let Err(error) = apply_edit(&mut session, edit) {
            debug!(invoice = %edit.invoice, kind = error.kind(), "edit rejected");
            return Ok(ReconcileReport::EditRejected {
                invoice: edit.invoice,
                error: error.detail(),
            });
        }
    }

    if document.sync_amount {
        session.sync_amount_to_allocations()?;
    } else if let Some(amount) = &document.amount {
        let applied = amount
            .to_money(precision)
            .map_err(BillingError::from)
            .and_then(|amount| session.set_amount(amount));
        if let Err(error) = applied {
            return Ok(rejected(error));
        }
    }

    let report = match session.submit(document.sequential_number.as_str()) {
        Ok(submission) => ReconcileReport::Valid { submission },
        Err(error) => rejected(error),
    };
    info!(
        valid = report.is_valid(),
        amount = %currency.format(&session.payment().amount),
        "draft reconciled"
    );
    Ok(report)
}

fn rejected(error: BillingError) -> ReconcileReport {
    debug!(kind = error.kind(), "payment rejected");
    ReconcileReport::Rejected {
        error: error.detail(),
    }
}

fn apply_edit(
    session: &mut PaymentSession,
    edit: &AllocationEdit,
) -> Result<(), BillingError> {
    if let Some(rate) = edit.exchange_rate {
        session.update_exchange_rate(edit.invoice, rate)?;
    }

    if let Some(original) = &edit.original_amount {
        let precision = session
            .lines()
            .iter()
            .find(|l| l.invoice_id == edit.invoice)
            .map(|l| l.original_amount.precision())
            .ok_or(BillingError::LineNotFound(edit.invoice))?;
        session.update_original_amount(edit.invoice, original.to_money(precision)?)?;
    } else if let Some(amount) = &edit.amount {
        let amount = amount.to_money(session.payment().precision())?;
        session.update_amount(edit.invoice, amount)?;
    }
    Ok(())
}
