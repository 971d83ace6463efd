//! Invoices and the invoice balance calculator
//!
//! Invoices are read-only input to the engine. A session takes a snapshot
//! of a firm's invoices when it seeds allocations and looks balances up by
//! id through the [`InvoiceSource`] port, so allocation lines never carry
//! their own copy of a balance.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use core_kernel::{Currency, CurrencyId, InvoiceId, Money, MoneyError};

/// Invoice status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Invoice is being drafted
    Draft,
    /// Invoice has been issued
    Issued,
    /// Partial payment received
    PartiallyPaid,
    /// Fully paid
    Paid,
    /// Cancelled/voided
    Cancelled,
}

/// An invoice as seen by the allocation engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    pub id: InvoiceId,
    /// Invoice number (human-readable)
    pub sequential: String,
    /// Currency the invoice is denominated in
    pub currency_id: CurrencyId,
    /// Total amount
    pub total: Money,
    /// Amount already paid
    pub amount_paid: Money,
    /// Tax withheld by the payer
    pub tax_withholding_amount: Money,
    /// Status
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Creates an issued invoice with nothing paid or withheld
    ///
    /// # Errors
    ///
    /// Returns `PrecisionMismatch` if `total` is not expressed at the
    /// currency's precision
    pub fn new(
        sequential: impl Into<String>,
        currency: &Currency,
        total: Money,
    ) -> Result<Self, MoneyError> {
        if total.precision() != currency.precision {
            return Err(MoneyError::PrecisionMismatch(
                currency.precision,
                total.precision(),
            ));
        }
        let zero = currency.zero()?;

        Ok(Self {
            id: InvoiceId::new_v7(),
            sequential: sequential.into(),
            currency_id: currency.id,
            total,
            amount_paid: zero,
            tax_withholding_amount: zero,
            status: InvoiceStatus::Issued,
        })
    }

    /// Sets the identifier
    pub fn with_id(mut self, id: InvoiceId) -> Self {
        self.id = id;
        self
    }

    /// Sets the amount already paid
    pub fn with_amount_paid(mut self, amount_paid: Money) -> Result<Self, MoneyError> {
        self.amount_paid = amount_paid;
        self.check_precision()?;
        self.status = if amount_paid.is_zero() {
            InvoiceStatus::Issued
        } else if self.remaining_balance()?.is_positive() {
            InvoiceStatus::PartiallyPaid
        } else {
            InvoiceStatus::Paid
        };
        Ok(self)
    }

    /// Sets the tax withholding amount
    pub fn with_tax_withholding(mut self, withholding: Money) -> Result<Self, MoneyError> {
        self.tax_withholding_amount = withholding;
        self.check_precision()?;
        Ok(self)
    }

    /// Sets the status
    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status = status;
        self
    }

    /// Fractional digits shared by all amounts of the invoice
    pub fn precision(&self) -> u8 {
        self.total.precision()
    }

    /// Verifies that total, paid and withheld amounts share one precision
    pub fn check_precision(&self) -> Result<(), MoneyError> {
        let precision = self.precision();
        for amount in [&self.amount_paid, &self.tax_withholding_amount] {
            if amount.precision() != precision {
                return Err(MoneyError::PrecisionMismatch(precision, amount.precision()));
            }
        }
        Ok(())
    }

    /// Total minus amount paid minus tax withheld
    ///
    /// May be negative when the source data is inconsistent; use
    /// [`Invoice::allocatable_balance`] as an allocation ceiling.
    pub fn remaining_balance(&self) -> Result<Money, MoneyError> {
        self.total
            .checked_sub(&self.amount_paid)?
            .checked_sub(&self.tax_withholding_amount)
    }

    /// Remaining balance clamped at zero
    pub fn allocatable_balance(&self) -> Result<Money, MoneyError> {
        let remaining = self.remaining_balance()?;
        if remaining.is_negative() {
            return Money::zero(remaining.precision());
        }
        Ok(remaining)
    }

    /// True when nothing beyond rounding noise is left to pay
    pub fn is_settled(&self) -> Result<bool, MoneyError> {
        let tolerance = Money::tolerance(self.precision())?;
        Ok(self.allocatable_balance()?.checked_cmp(&tolerance)?.is_le())
    }
}

/// Lookup of invoices by id
pub trait InvoiceSource {
    fn invoice(&self, id: &InvoiceId) -> Option<&Invoice>;
}

impl InvoiceSource for [Invoice] {
    fn invoice(&self, id: &InvoiceId) -> Option<&Invoice> {
        self.iter().find(|i| &i.id == id)
    }
}

impl InvoiceSource for Vec<Invoice> {
    fn invoice(&self, id: &InvoiceId) -> Option<&Invoice> {
        self.as_slice().invoice(id)
    }
}

/// Snapshot of one firm's invoices, valid as of seed time
///
/// Keeps the order in which invoices were supplied so seeded lines follow
/// the caller's ordering.
#[derive(Debug, Clone, Default)]
pub struct InvoiceBook {
    invoices: HashMap<InvoiceId, Invoice>,
    order: Vec<InvoiceId>,
}

impl InvoiceBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot; a later invoice with a repeated id replaces the
    /// earlier one in place
    pub fn from_invoices(invoices: impl IntoIterator<Item = Invoice>) -> Self {
        let mut book = Self::new();
        for invoice in invoices {
            book.insert(invoice);
        }
        book
    }

    pub fn insert(&mut self, invoice: Invoice) {
        if !self.invoices.contains_key(&invoice.id) {
            self.order.push(invoice.id);
        }
        self.invoices.insert(invoice.id, invoice);
    }

    /// Invoices in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Invoice> {
        self.order.iter().filter_map(|id| self.invoices.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl InvoiceSource for InvoiceBook {
    fn invoice(&self, id: &InvoiceId) -> Option<&Invoice> {
        self.invoices.get(id)
    }
}
