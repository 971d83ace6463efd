//! Payment drafts
//!
//! A [`Payment`] is the in-progress record a session edits: the declared
//! total, the fee, and the allocation lines that distribute the total over
//! a firm's invoices.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CurrencyId, FirmId, Money, MoneyError, PaymentId};
use crate::allocation::AllocationSet;

/// Payment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    /// Bank transfer
    #[default]
    BankTransfer,
    /// Credit card
    CreditCard,
    /// Debit card
    DebitCard,
    /// Direct debit
    DirectDebit,
    /// Check/cheque
    Check,
    /// Cash
    Cash,
    /// Digital wallet
    DigitalWallet,
}

/// A payment being prepared for submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    /// Identifier, present when editing an existing payment
    pub id: Option<PaymentId>,
    /// Payment date
    pub date: Option<NaiveDate>,
    /// Paying firm
    pub firm_id: FirmId,
    /// Settlement currency
    pub currency_id: CurrencyId,
    /// Rate applied to newly seeded cross-currency lines
    pub default_conversion_rate: Decimal,
    /// Declared total in the settlement currency
    pub amount: Money,
    /// Bank or processing fee in the settlement currency
    pub fee: Money,
    /// Payment mode
    pub mode: PaymentMode,
    /// Notes
    pub notes: Option<String>,
    /// Allocation lines, exclusively owned by the payment
    pub lines: AllocationSet,
}

impl Payment {
    /// Creates a draft with a zero amount and fee
    pub fn new(
        firm_id: FirmId,
        default_conversion_rate: Decimal,
        lines: AllocationSet,
    ) -> Result<Self, MoneyError> {
        let currency_id = lines.payment_currency().id;
        let zero = lines.payment_currency().zero()?;

        Ok(Self {
            id: None,
            date: None,
            firm_id,
            currency_id,
            default_conversion_rate,
            amount: zero,
            fee: zero,
            mode: PaymentMode::default(),
            notes: None,
            lines,
        })
    }

    /// Fractional digits of the settlement currency
    pub fn precision(&self) -> u8 {
        self.lines.payment_currency().precision
    }
}
