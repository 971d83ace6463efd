//! Test Data Builders
//!
//! Provides builder patterns for constructing invoices and payment sessions
//! with sensible defaults, so tests only spell out what they exercise.

use core_kernel::{Currency, FirmId, InvoiceId, Money};
use domain_billing::{Invoice, InvoiceStatus, PaymentSession};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{CurrencyFixtures, ValueFixtures};

/// Builder for constructing test invoices
pub struct TestInvoiceBuilder {
    id: InvoiceId,
    sequential: String,
    currency: Currency,
    total: Decimal,
    amount_paid: Decimal,
    withholding: Decimal,
    status: Option<InvoiceStatus>,
}

impl Default for TestInvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestInvoiceBuilder {
    /// Creates a new builder for a 100.00 EUR invoice
    pub fn new() -> Self {
        Self {
            id: InvoiceId::new_v7(),
            sequential: "F-TEST-0001".to_string(),
            currency: CurrencyFixtures::eur(),
            total: dec!(100.00),
            amount_paid: Decimal::ZERO,
            withholding: Decimal::ZERO,
            status: None,
        }
    }

    pub fn with_id(mut self, id: InvoiceId) -> Self {
        self.id = id;
        self
    }

    pub fn with_sequential(mut self, sequential: impl Into<String>) -> Self {
        self.sequential = sequential.into();
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_total(mut self, total: Decimal) -> Self {
        self.total = total;
        self
    }

    pub fn with_amount_paid(mut self, amount_paid: Decimal) -> Self {
        self.amount_paid = amount_paid;
        self
    }

    pub fn with_withholding(mut self, withholding: Decimal) -> Self {
        self.withholding = withholding;
        self
    }

    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Builds the invoice
    pub fn build(self) -> Invoice {
        let precision = self.currency.precision;
        let money = |value: Decimal| Money::from_decimal(value, precision).expect("valid amount");

        let invoice = Invoice::new(self.sequential, &self.currency, money(self.total))
            .and_then(|i| i.with_amount_paid(money(self.amount_paid)))
            .and_then(|i| i.with_tax_withholding(money(self.withholding)))
            .expect("valid invoice")
            .with_id(self.id);

        match self.status {
            Some(status) => invoice.with_status(status),
            None => invoice,
        }
    }
}

/// Builder for opening a payment session
pub struct TestSessionBuilder {
    firm_id: FirmId,
    currency: Currency,
    default_rate: Decimal,
    invoices: Vec<Invoice>,
}

impl Default for TestSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSessionBuilder {
    /// Creates a builder for a EUR payment with no invoices
    pub fn new() -> Self {
        Self {
            firm_id: ValueFixtures::firm_id(),
            currency: CurrencyFixtures::eur(),
            default_rate: ValueFixtures::usd_to_eur_rate(),
            invoices: Vec::new(),
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_default_rate(mut self, rate: Decimal) -> Self {
        self.default_rate = rate;
        self
    }

    pub fn with_invoice(mut self, invoice: Invoice) -> Self {
        self.invoices.push(invoice);
        self
    }

    /// Opens the session
    pub fn build(self) -> PaymentSession {
        PaymentSession::open(
            CurrencyFixtures::registry(),
            self.firm_id,
            self.currency.id,
            self.default_rate,
            self.invoices,
        )
        .expect("session opens")
    }
}
