//! Currency conversion between payment and invoice amounts
//!
//! Rates are quoted as payment-currency units per one invoice-currency
//! unit, so `amount = original_amount * rate`. Each conversion is a single
//! multiply or divide followed by one half-up rounding at the target
//! precision.
//!
//! Converting `amount -> original_amount -> amount` is lossy. The drift is
//! bounded by `rate * half an invoice unit + half a payment unit`, which
//! stays within one unit of the coarser precision as long as the rate does
//! not magnify an invoice unit beyond it (for equal precisions: rates
//! below 3).

use rust_decimal::Decimal;

use core_kernel::{ExchangeRate, Money, MoneyError};

/// Converts an invoice-currency amount into the payment currency
pub fn to_payment_currency(
    original_amount: &Money,
    rate: Decimal,
    target_precision: u8,
) -> Result<Money, MoneyError> {
    let rate = ExchangeRate::new(rate)?;
    let value = original_amount
        .to_unit()
        .checked_mul(rate.as_decimal())
        .ok_or(MoneyError::Overflow)?;
    Money::from_decimal(value, target_precision)
}

/// Converts a payment-currency amount into the invoice currency
pub fn to_invoice_currency(
    amount: &Money,
    rate: Decimal,
    target_precision: u8,
) -> Result<Money, MoneyError> {
    let rate = ExchangeRate::new(rate)?;
    let value = amount
        .to_unit()
        .checked_div(rate.as_decimal())
        .ok_or(MoneyError::Overflow)?;
    Money::from_decimal(value, target_precision)
}
