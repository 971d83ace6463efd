//! Payment editing session
//!
//! A [`PaymentSession`] is the explicit owner of everything one payment
//! edit needs: the currency registry, the invoice snapshot taken when the
//! firm was selected, and the draft [`Payment`]. Each user input event maps
//! to one method. Methods either apply completely and return the derived
//! total, or fail and leave the session exactly as it was.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use core_kernel::{
    Currency, CurrencyId, CurrencyRegistry, ExchangeRate, FirmId, InvoiceId, Money, MoneyError,
    PaymentId,
};
use crate::allocation::{AllocationLine, AllocationSet};
use crate::error::BillingError;
use crate::invoice::{Invoice, InvoiceBook, InvoiceSource};
use crate::payment::{Payment, PaymentMode};
use crate::reconciliation::{ReconciliationValidator, Verdict};
use crate::submission::PaymentSubmission;

/// In-progress edit of a single payment
#[derive(Debug, Clone)]
pub struct PaymentSession {
    registry: CurrencyRegistry,
    invoices: InvoiceBook,
    payment: Payment,
    validator: ReconciliationValidator,
}

impl PaymentSession {
    /// Opens a session for a firm and settlement currency
    ///
    /// Seeds one line per unsettled invoice. Cross-currency lines start at
    /// `default_rate`; a non-positive default is caught later by the
    /// validator or by the first amount edit.
    ///
    /// # Errors
    ///
    /// - `Registry` if the settlement currency or an invoice currency is unknown
    /// - `Money(PrecisionMismatch)` if an invoice's amounts disagree with its
    ///   currency's precision
    #[instrument(level = "debug", skip(registry, invoices), fields(invoice_count = invoices.len()))]
    pub fn open(
        registry: CurrencyRegistry,
        firm_id: FirmId,
        currency_id: CurrencyId,
        default_rate: Decimal,
        invoices: Vec<Invoice>,
    ) -> Result<Self, BillingError> {
        check_invoices(&registry, &invoices)?;
        let currency = registry.get(currency_id)?.clone();
        let invoices = InvoiceBook::from_invoices(invoices);
        let lines = AllocationSet::seed(invoices.iter(), &currency, default_rate)?;
        let payment = Payment::new(firm_id, default_rate, lines)?;

        debug!(lines = payment.lines.len(), currency = %currency, "payment session opened");

        Ok(Self {
            registry,
            invoices,
            payment,
            validator: ReconciliationValidator::new(),
        })
    }

    pub fn payment(&self) -> &Payment {
        &self.payment
    }

    pub fn invoices(&self) -> &InvoiceBook {
        &self.invoices
    }

    pub fn registry(&self) -> &CurrencyRegistry {
        &self.registry
    }

    pub fn payment_currency(&self) -> &Currency {
        self.payment.lines.payment_currency()
    }

    pub fn lines(&self) -> &[AllocationLine] {
        self.payment.lines.lines()
    }

    /// Sum of allocated amounts in the settlement currency
    pub fn total(&self) -> Result<Money, BillingError> {
        Ok(self.payment.lines.total()?)
    }

    /// Switches to another firm, replacing the invoice snapshot and all lines
    #[instrument(level = "debug", skip(self, invoices), fields(invoice_count = invoices.len()))]
    pub fn select_firm(&mut self, firm_id: FirmId, invoices: Vec<Invoice>) -> Result<(), BillingError> {
        check_invoices(&self.registry, &invoices)?;
        let invoices = InvoiceBook::from_invoices(invoices);
        let lines = AllocationSet::seed(
            invoices.iter(),
            self.payment.lines.payment_currency(),
            self.payment.default_conversion_rate,
        )?;

        self.invoices = invoices;
        self.payment.firm_id = firm_id;
        self.payment.lines = lines;
        debug!(lines = self.payment.lines.len(), "firm selected, lines reseeded");
        Ok(())
    }

    /// Switches the settlement currency
    ///
    /// Lines are reseeded from scratch and the declared amount and fee are
    /// reset to zero, since nothing carries over across currencies.
    #[instrument(level = "debug", skip(self))]
    pub fn select_currency(
        &mut self,
        currency_id: CurrencyId,
        default_rate: Decimal,
    ) -> Result<(), BillingError> {
        let currency = self.registry.get(currency_id)?.clone();
        let lines = AllocationSet::seed(self.invoices.iter(), &currency, default_rate)?;
        let zero = currency.zero()?;

        self.payment.currency_id = currency.id;
        self.payment.default_conversion_rate = default_rate;
        self.payment.amount = zero;
        self.payment.fee = zero;
        self.payment.lines = lines;
        debug!(lines = self.payment.lines.len(), currency = %currency, "currency selected, lines reseeded");
        Ok(())
    }

    /// Applies a new default rate to every cross-currency line
    #[instrument(level = "debug", skip(self))]
    pub fn set_default_rate(&mut self, rate: Decimal) -> Result<Money, BillingError> {
        let rate = ExchangeRate::new(rate)?.as_decimal();
        let mut lines = self.payment.lines.clone();
        let cross: Vec<InvoiceId> = lines
            .lines()
            .iter()
            .filter(|l| l.is_cross_currency())
            .map(|l| l.invoice_id)
            .collect();
        for invoice_id in &cross {
            lines.update_exchange_rate(invoice_id, rate, &self.invoices)?;
        }

        let total = lines.total()?;
        self.payment.lines = lines;
        self.payment.default_conversion_rate = rate;
        debug!(updated = cross.len(), %total, "default rate applied");
        Ok(total)
    }

    /// Adds back a line for an invoice from the snapshot
    #[instrument(level = "debug", skip(self))]
    pub fn add_invoice_line(&mut self, invoice_id: InvoiceId) -> Result<(), BillingError> {
        let invoice = self
            .invoices
            .invoice(&invoice_id)
            .ok_or(BillingError::InvoiceNotFound(invoice_id))?;
        self.payment
            .lines
            .add_line(invoice, self.payment.default_conversion_rate)
    }

    /// Edits a line's settlement-currency amount; returns the new total
    #[instrument(level = "debug", skip(self))]
    pub fn update_amount(&mut self, invoice_id: InvoiceId, amount: Money) -> Result<Money, BillingError> {
        let total = self
            .payment
            .lines
            .update_amount(&invoice_id, amount, &self.invoices)?;
        debug!(%total, "allocation amount updated");
        Ok(total)
    }

    /// Parses raw input in the settlement currency and applies it as the
    /// line's amount
    pub fn enter_amount(&mut self, invoice_id: InvoiceId, input: &str) -> Result<Money, BillingError> {
        let amount = Money::parse(input, self.payment.precision())?;
        self.update_amount(invoice_id, amount)
    }

    /// Edits a line's invoice-currency amount; returns the new total
    #[instrument(level = "debug", skip(self))]
    pub fn update_original_amount(
        &mut self,
        invoice_id: InvoiceId,
        original_amount: Money,
    ) -> Result<Money, BillingError> {
        let total = self
            .payment
            .lines
            .update_original_amount(&invoice_id, original_amount, &self.invoices)?;
        debug!(%total, "allocation original amount updated");
        Ok(total)
    }

    /// Edits a line's exchange rate; returns the new total
    #[instrument(level = "debug", skip(self))]
    pub fn update_exchange_rate(&mut self, invoice_id: InvoiceId, rate: Decimal) -> Result<Money, BillingError> {
        let total = self
            .payment
            .lines
            .update_exchange_rate(&invoice_id, rate, &self.invoices)?;
        debug!(%total, "allocation exchange rate updated");
        Ok(total)
    }

    /// Moves a line for display purposes
    pub fn reorder(&mut self, invoice_id: InvoiceId, new_index: usize) -> Result<(), BillingError> {
        self.payment.lines.reorder(&invoice_id, new_index)
    }

    /// Removes a line; returns the new total
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, invoice_id: InvoiceId) -> Result<Money, BillingError> {
        let mut lines = self.payment.lines.clone();
        lines.remove(&invoice_id)?;
        let total = lines.total()?;
        self.payment.lines = lines;
        Ok(total)
    }

    /// Drops every line
    pub fn clear_all(&mut self) {
        self.payment.lines.clear_all();
        debug!("allocation lines cleared");
    }

    /// Sets the declared payment total
    pub fn set_amount(&mut self, amount: Money) -> Result<(), BillingError> {
        self.ensure_settlement_precision(&amount)?;
        self.payment.amount = amount;
        Ok(())
    }

    /// Sets the payment fee
    pub fn set_fee(&mut self, fee: Money) -> Result<(), BillingError> {
        self.ensure_settlement_precision(&fee)?;
        self.payment.fee = fee;
        Ok(())
    }

    /// Sets the declared total to the current allocation total
    pub fn sync_amount_to_allocations(&mut self) -> Result<Money, BillingError> {
        let total = self.payment.lines.total()?;
        self.payment.amount = total;
        Ok(total)
    }

    pub fn set_id(&mut self, id: PaymentId) {
        self.payment.id = Some(id);
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.payment.date = Some(date);
    }

    pub fn set_mode(&mut self, mode: PaymentMode) {
        self.payment.mode = mode;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        let notes = notes.into();
        self.payment.notes = if notes.trim().is_empty() { None } else { Some(notes) };
    }

    /// Runs the reconciliation rules over the current state
    pub fn validate(&self) -> Verdict {
        self.validator.validate(&self.payment, &self.invoices)
    }

    /// Produces the submit-ready DTO if the payment reconciles
    #[instrument(level = "debug", skip(self, sequential_number))]
    pub fn submit(&self, sequential_number: impl Into<String>) -> Result<PaymentSubmission, BillingError> {
        self.validate().into_result()?;
        let submission = PaymentSubmission::from_reconciled(&self.payment, sequential_number.into())?;
        debug!(lines = submission.lines.len(), amount = %submission.amount, "payment ready for submission");
        Ok(submission)
    }

    fn ensure_settlement_precision(&self, amount: &Money) -> Result<(), BillingError> {
        let precision = self.payment.precision();
        if amount.precision() != precision {
            return Err(MoneyError::PrecisionMismatch(precision, amount.precision()).into());
        }
        Ok(())
    }
}

/// Verifies each invoice against the registry before it enters a snapshot
fn check_invoices(registry: &CurrencyRegistry, invoices: &[Invoice]) -> Result<(), BillingError> {
    for invoice in invoices {
        let currency = registry.get(invoice.currency_id)?;
        if invoice.precision() != currency.precision {
            return Err(MoneyError::PrecisionMismatch(currency.precision, invoice.precision()).into());
        }
        invoice.check_precision()?;
    }
    Ok(())
}
