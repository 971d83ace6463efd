//! Payment draft documents
//!
//! The JSON shape accepted on the command line. A document describes a
//! firm's invoice snapshot, the payment header, and a list of allocation
//! edits replayed in order, the same way a user would type them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CurrencyRegistry, FirmId, InvoiceId, Money, MoneyError, PaymentId};
use domain_billing::{BillingError, Invoice, InvoiceStatus, PaymentMode};

/// Amount given either as a JSON number or as raw text such as `"1,214.50"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(Decimal),
    Text(String),
}

impl AmountInput {
    /// Converts to money at `precision`
    pub fn to_money(&self, precision: u8) -> Result<Money, MoneyError> {
        match self {
            AmountInput::Number(value) => Money::from_decimal(*value, precision),
            AmountInput::Text(raw) => Money::parse(raw, precision),
        }
    }
}

/// An invoice of the paying firm
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub id: InvoiceId,
    pub sequential: String,
    /// ISO currency code
    pub currency: String,
    pub total: Decimal,
    #[serde(default)]
    pub amount_paid: Decimal,
    #[serde(default)]
    pub tax_withholding_amount: Decimal,
    #[serde(default)]
    pub status: Option<InvoiceStatus>,
}

impl InvoiceRecord {
    /// Resolves the currency code and builds the domain invoice
    pub fn to_invoice(&self, registry: &CurrencyRegistry) -> Result<Invoice, BillingError> {
        let currency = registry.by_code(&self.currency)?;
        let money = |value: Decimal| Money::from_decimal(value, currency.precision);

        let invoice = Invoice::new(self.sequential.clone(), currency, money(self.total)?)?
            .with_id(self.id)
            .with_amount_paid(money(self.amount_paid)?)?
            .with_tax_withholding(money(self.tax_withholding_amount)?)?;

        Ok(match self.status {
            Some(status) => invoice.with_status(status),
            None => invoice,
        })
    }
}

/// One user edit on an allocation line
///
/// Within an edit the rate is applied first, then whichever amount is
/// given. Supplying both amounts makes the invoice-currency one win.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationEdit {
    pub invoice: InvoiceId,
    #[serde(default)]
    pub exchange_rate: Option<Decimal>,
    #[serde(default)]
    pub amount: Option<AmountInput>,
    #[serde(default)]
    pub original_amount: Option<AmountInput>,
}

fn default_rate() -> Decimal {
    Decimal::ONE
}

/// A payment draft to reconcile
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDraftDocument {
    #[serde(default)]
    pub id: Option<PaymentId>,
    pub firm_id: FirmId,
    /// ISO code of the settlement currency
    pub currency: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default = "default_rate")]
    pub default_rate: Decimal,
    /// Declared total; ignored when `sync_amount` is set
    #[serde(default)]
    pub amount: Option<AmountInput>,
    /// Declare the allocation total as the payment amount
    #[serde(default)]
    pub sync_amount: bool,
    #[serde(default)]
    pub fee: Option<AmountInput>,
    #[serde(default)]
    pub mode: PaymentMode,
    #[serde(default)]
    pub notes: Option<String>,
    pub sequential_number: String,
    pub invoices: Vec<InvoiceRecord>,
    #[serde(default)]
    pub edits: Vec<AllocationEdit>,
}

impl PaymentDraftDocument {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
