//! Reconciliation validator
//!
//! A single pre-submit pass over a payment that stops at the first failing
//! rule. Rules, in evaluation order:
//!
//! 1. the payment date is set
//! 2. the declared amount is strictly positive
//! 3. `0 <= fee < amount`
//! 4. no line allocates more than its invoice's remaining balance plus the
//!    tolerance epsilon
//! 5. every line carries a usable rate (positive, and exactly 1 for
//!    same-currency lines) and its two amounts still derive from each other
//! 6. at least one line allocates a positive amount
//! 7. the declared amount equals the sum of line amounts within tolerance
//!
//! The validator reads its inputs only, so it can run after every edit to
//! drive inline errors and always returns the same verdict for the same
//! state.

use rust_decimal::Decimal;

use core_kernel::{Money, MoneyError};
use crate::allocation::check_within_balance;
use crate::error::BillingError;
use crate::invoice::InvoiceSource;
use crate::payment::Payment;

/// Outcome of a reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Rejected(BillingError),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// Converts the verdict into a `Result` for `?` propagation
    pub fn into_result(self) -> Result<(), BillingError> {
        match self {
            Verdict::Valid => Ok(()),
            Verdict::Rejected(error) => Err(error),
        }
    }
}

impl From<Result<(), BillingError>> for Verdict {
    fn from(result: Result<(), BillingError>) -> Self {
        match result {
            Ok(()) => Verdict::Valid,
            Err(error) => Verdict::Rejected(error),
        }
    }
}

/// Stateless rule engine for payments
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconciliationValidator;

impl ReconciliationValidator {
    pub fn new() -> Self {
        Self
    }

    /// Runs every rule against `payment` and returns the first failure
    pub fn validate<S>(&self, payment: &Payment, invoices: &S) -> Verdict
    where
        S: InvoiceSource + ?Sized,
    {
        Verdict::from(self.check(payment, invoices))
    }

    fn check<S>(&self, payment: &Payment, invoices: &S) -> Result<(), BillingError>
    where
        S: InvoiceSource + ?Sized,
    {
        if payment.date.is_none() {
            return Err(BillingError::MissingDate);
        }

        let precision = payment.precision();
        ensure_precision(&payment.amount, precision)?;
        ensure_precision(&payment.fee, precision)?;

        if !payment.amount.is_positive() {
            return Err(BillingError::NonPositiveAmount {
                amount: payment.amount,
            });
        }

        if payment.fee.is_negative() {
            return Err(BillingError::NegativeFee { fee: payment.fee });
        }
        if payment.fee.checked_cmp(&payment.amount)?.is_ge() {
            return Err(BillingError::FeeExceedsAmount {
                fee: payment.fee,
                amount: payment.amount,
            });
        }

        for line in payment.lines.lines() {
            let invoice = invoices
                .invoice(&line.invoice_id)
                .ok_or(BillingError::InvoiceNotFound(line.invoice_id))?;
            ensure_precision(&line.original_amount, invoice.precision())?;
            check_within_balance(line, invoice)?;
        }

        for line in payment.lines.lines() {
            let usable_rate = if line.is_cross_currency() {
                line.exchange_rate > Decimal::ZERO
            } else {
                line.exchange_rate == Decimal::ONE
            };
            if !usable_rate {
                return Err(BillingError::InvalidExchangeRate {
                    invoice_id: line.invoice_id,
                    rate: line.exchange_rate,
                });
            }
            ensure_precision(&line.amount, precision)?;
            if !line.is_consistent()? {
                return Err(BillingError::PrecisionMismatch {
                    invoice_id: line.invoice_id,
                    amount: line.amount,
                    original_amount: line.original_amount,
                });
            }
        }

        if !payment.lines.lines().iter().any(|l| l.amount.is_positive()) {
            return Err(BillingError::NoValidAllocations);
        }

        let computed = payment.lines.total()?;
        let difference = payment.amount.checked_sub(&computed)?.abs()?;
        if difference.checked_cmp(&Money::tolerance(precision)?)?.is_gt() {
            return Err(BillingError::TotalMismatch {
                declared: payment.amount,
                computed,
            });
        }

        Ok(())
    }
}

fn ensure_precision(amount: &Money, precision: u8) -> Result<(), MoneyError> {
    if amount.precision() != precision {
        return Err(MoneyError::PrecisionMismatch(precision, amount.precision()));
    }
    Ok(())
}
