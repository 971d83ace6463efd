//! Allocation lines and the allocation set manager
//!
//! An [`AllocationLine`] pairs one payment with one invoice. It carries the
//! allocated amount twice: `amount` in the payment currency and
//! `original_amount` in the invoice currency, tied together by the line's
//! exchange rate. Every edit picks exactly one independent variable and
//! derives the other field from it through the conversion helpers.
//!
//! The [`AllocationSet`] owns the ordered lines of one payment. Edits are
//! all-or-nothing: a candidate line is computed, checked against the
//! invoice's remaining balance, and only then swapped in.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::trace;

use core_kernel::{Currency, CurrencyId, ExchangeRate, InvoiceId, Money, MoneyError};
use crate::conversion::{to_invoice_currency, to_payment_currency};
use crate::error::BillingError;
use crate::invoice::{Invoice, InvoiceSource};

/// One invoice's share of a payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationLine {
    /// Invoice being paid
    pub invoice_id: InvoiceId,
    /// Allocated amount in the payment currency
    pub amount: Money,
    /// Allocated amount in the invoice currency
    pub original_amount: Money,
    /// Payment-currency units per invoice-currency unit
    pub exchange_rate: Decimal,
    pub payment_currency_id: CurrencyId,
    pub invoice_currency_id: CurrencyId,
}

impl AllocationLine {
    /// Creates an empty line for an invoice
    ///
    /// Same-currency lines always use the identity rate.
    pub fn seeded(
        invoice: &Invoice,
        payment_currency: &Currency,
        default_rate: Decimal,
    ) -> Result<Self, MoneyError> {
        let exchange_rate = if invoice.currency_id == payment_currency.id {
            Decimal::ONE
        } else {
            default_rate
        };

        Ok(Self {
            invoice_id: invoice.id,
            amount: payment_currency.zero()?,
            original_amount: Money::zero(invoice.precision())?,
            exchange_rate,
            payment_currency_id: payment_currency.id,
            invoice_currency_id: invoice.currency_id,
        })
    }

    /// True when payment and invoice currencies differ
    pub fn is_cross_currency(&self) -> bool {
        self.payment_currency_id != self.invoice_currency_id
    }

    /// Line recomputed with `amount` as the independent variable
    pub fn with_amount(&self, amount: Money) -> Result<Self, BillingError> {
        self.check_amount(&amount, self.amount.precision())?;

        let original_amount = if self.is_cross_currency() {
            to_invoice_currency(&amount, self.exchange_rate, self.original_amount.precision())?
        } else {
            amount
        };

        Ok(Self {
            amount,
            original_amount,
            ..self.clone()
        })
    }

    /// Line recomputed with `original_amount` as the independent variable
    pub fn with_original_amount(&self, original_amount: Money) -> Result<Self, BillingError> {
        self.check_amount(&original_amount, self.original_amount.precision())?;

        let amount = if self.is_cross_currency() {
            to_payment_currency(&original_amount, self.exchange_rate, self.amount.precision())?
        } else {
            original_amount
        };

        Ok(Self {
            amount,
            original_amount,
            ..self.clone()
        })
    }

    /// Line with a new rate; `amount` is kept and `original_amount` follows
    pub fn with_exchange_rate(&self, rate: Decimal) -> Result<Self, BillingError> {
        let rate = ExchangeRate::new(rate)?.as_decimal();
        if !self.is_cross_currency() && rate != Decimal::ONE {
            return Err(BillingError::InvalidExchangeRate {
                invoice_id: self.invoice_id,
                rate,
            });
        }

        let original_amount =
            to_invoice_currency(&self.amount, rate, self.original_amount.precision())?;

        Ok(Self {
            original_amount,
            exchange_rate: rate,
            ..self.clone()
        })
    }

    /// True when one of the two amounts derives from the other at the
    /// line's rate
    ///
    /// Only one direction has to hold: whichever field was edited last is
    /// the independent variable and the other carries one rounding step.
    pub fn is_consistent(&self) -> Result<bool, MoneyError> {
        if !self.is_cross_currency() {
            return Ok(self.exchange_rate == Decimal::ONE && self.amount == self.original_amount);
        }

        let forward = to_invoice_currency(
            &self.amount,
            self.exchange_rate,
            self.original_amount.precision(),
        )?;
        if forward == self.original_amount {
            return Ok(true);
        }
        let backward = to_payment_currency(
            &self.original_amount,
            self.exchange_rate,
            self.amount.precision(),
        )?;
        Ok(backward == self.amount)
    }

    fn check_amount(&self, amount: &Money, precision: u8) -> Result<(), BillingError> {
        if amount.precision() != precision {
            return Err(MoneyError::PrecisionMismatch(precision, amount.precision()).into());
        }
        if amount.is_negative() {
            return Err(BillingError::NegativeAllocation {
                invoice_id: self.invoice_id,
                amount: *amount,
            });
        }
        Ok(())
    }
}

/// Rejects a line whose original amount exceeds the invoice's allocatable
/// balance plus the tolerance epsilon
///
/// The reported ceiling is converted into the payment currency.
pub(crate) fn check_within_balance(
    line: &AllocationLine,
    invoice: &Invoice,
) -> Result<(), BillingError> {
    let remaining = invoice.allocatable_balance()?;
    let ceiling = remaining.checked_add(&Money::tolerance(remaining.precision())?)?;

    if line.original_amount.checked_cmp(&ceiling)?.is_le() {
        return Ok(());
    }

    let max_allowed = if line.is_cross_currency() {
        match to_payment_currency(&remaining, line.exchange_rate, line.amount.precision()) {
            Ok(max) => max,
            Err(MoneyError::InvalidRate(rate)) => {
                return Err(BillingError::InvalidExchangeRate {
                    invoice_id: line.invoice_id,
                    rate,
                })
            }
            Err(e) => return Err(e.into()),
        }
    } else {
        remaining
    };

    Err(BillingError::AllocationExceedsBalance {
        invoice_id: line.invoice_id,
        requested: line.amount,
        max_allowed,
    })
}

/// Ordered allocation lines of one payment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationSet {
    payment_currency: Currency,
    lines: Vec<AllocationLine>,
}

impl AllocationSet {
    /// Creates an empty set for a payment currency
    pub fn new(payment_currency: Currency) -> Self {
        Self {
            payment_currency,
            lines: Vec::new(),
        }
    }

    /// Creates one empty line per unsettled invoice
    ///
    /// Invoices whose remaining balance is within the tolerance epsilon
    /// are left out entirely.
    pub fn seed<'a>(
        invoices: impl IntoIterator<Item = &'a Invoice>,
        payment_currency: &Currency,
        default_rate: Decimal,
    ) -> Result<Self, BillingError> {
        let mut set = Self::new(payment_currency.clone());
        for invoice in invoices {
            if invoice.is_settled()? {
                trace!(invoice = %invoice.id, "skipping settled invoice");
                continue;
            }
            set.lines
                .push(AllocationLine::seeded(invoice, payment_currency, default_rate)?);
        }
        Ok(set)
    }

    pub fn payment_currency(&self) -> &Currency {
        &self.payment_currency
    }

    pub fn lines(&self) -> &[AllocationLine] {
        &self.lines
    }

    pub fn get(&self, invoice_id: &InvoiceId) -> Option<&AllocationLine> {
        self.lines.iter().find(|l| &l.invoice_id == invoice_id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Appends an empty line for an invoice not yet in the set
    pub fn add_line(&mut self, invoice: &Invoice, default_rate: Decimal) -> Result<(), BillingError> {
        if self.get(&invoice.id).is_some() {
            return Err(BillingError::DuplicateAllocation(invoice.id));
        }
        if invoice.is_settled()? {
            return Err(BillingError::InvoiceSettled(invoice.id));
        }
        self.lines
            .push(AllocationLine::seeded(invoice, &self.payment_currency, default_rate)?);
        Ok(())
    }

    /// Sets a line's payment-currency amount and returns the new total
    ///
    /// # Errors
    ///
    /// - `LineNotFound` / `InvoiceNotFound` for unknown ids
    /// - `NegativeAllocation` or `Money(PrecisionMismatch)` for bad input
    /// - `AllocationExceedsBalance` if the invoice would be overpaid
    pub fn update_amount<S>(
        &mut self,
        invoice_id: &InvoiceId,
        amount: Money,
        invoices: &S,
    ) -> Result<Money, BillingError>
    where
        S: InvoiceSource + ?Sized,
    {
        let index = self.position(invoice_id)?;
        let candidate = self.lines[index].with_amount(amount)?;
        self.commit(index, candidate, invoices)
    }

    /// Sets a line's invoice-currency amount and returns the new total
    pub fn update_original_amount<S>(
        &mut self,
        invoice_id: &InvoiceId,
        original_amount: Money,
        invoices: &S,
    ) -> Result<Money, BillingError>
    where
        S: InvoiceSource + ?Sized,
    {
        let index = self.position(invoice_id)?;
        let candidate = self.lines[index].with_original_amount(original_amount)?;
        self.commit(index, candidate, invoices)
    }

    /// Sets a line's exchange rate and returns the new total
    pub fn update_exchange_rate<S>(
        &mut self,
        invoice_id: &InvoiceId,
        rate: Decimal,
        invoices: &S,
    ) -> Result<Money, BillingError>
    where
        S: InvoiceSource + ?Sized,
    {
        let index = self.position(invoice_id)?;
        let candidate = self.lines[index].with_exchange_rate(rate)?;
        self.commit(index, candidate, invoices)
    }

    /// Moves a line to `new_index`; amounts are untouched
    pub fn reorder(&mut self, invoice_id: &InvoiceId, new_index: usize) -> Result<(), BillingError> {
        let index = self.position(invoice_id)?;
        if new_index >= self.lines.len() {
            return Err(BillingError::InvalidPosition {
                index: new_index,
                len: self.lines.len(),
            });
        }
        let line = self.lines.remove(index);
        self.lines.insert(new_index, line);
        Ok(())
    }

    /// Removes a line and returns it
    pub fn remove(&mut self, invoice_id: &InvoiceId) -> Result<AllocationLine, BillingError> {
        let index = self.position(invoice_id)?;
        Ok(self.lines.remove(index))
    }

    pub fn clear_all(&mut self) {
        self.lines.clear();
    }

    /// Raw access that bypasses edit checks, for building corrupt states
    #[cfg(test)]
    pub(crate) fn lines_mut(&mut self) -> &mut [AllocationLine] {
        &mut self.lines
    }

    /// Sum of line amounts in the payment currency
    pub fn total(&self) -> Result<Money, MoneyError> {
        Money::sum(self.lines.iter().map(|l| &l.amount), self.payment_currency.precision)
    }

    /// Sum of original amounts per invoice currency
    pub fn total_original_by_invoice_currency(
        &self,
    ) -> Result<BTreeMap<CurrencyId, Money>, MoneyError> {
        let mut totals: BTreeMap<CurrencyId, Money> = BTreeMap::new();
        for line in &self.lines {
            let next = match totals.get(&line.invoice_currency_id) {
                Some(sum) => sum.checked_add(&line.original_amount)?,
                None => line.original_amount,
            };
            totals.insert(line.invoice_currency_id, next);
        }
        Ok(totals)
    }

    fn position(&self, invoice_id: &InvoiceId) -> Result<usize, BillingError> {
        self.lines
            .iter()
            .position(|l| &l.invoice_id == invoice_id)
            .ok_or(BillingError::LineNotFound(*invoice_id))
    }

    fn commit<S>(
        &mut self,
        index: usize,
        candidate: AllocationLine,
        invoices: &S,
    ) -> Result<Money, BillingError>
    where
        S: InvoiceSource + ?Sized,
    {
        let invoice = invoices
            .invoice(&candidate.invoice_id)
            .ok_or(BillingError::InvoiceNotFound(candidate.invoice_id))?;
        check_within_balance(&candidate, invoice)?;

        let previous = std::mem::replace(&mut self.lines[index], candidate);
        match self.total() {
            Ok(total) => Ok(total),
            Err(e) => {
                self.lines[index] = previous;
                Err(e.into())
            }
        }
    }
}
