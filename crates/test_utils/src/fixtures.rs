//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the allocation engine. The two
//! reference invoices mirror the worked examples used throughout the test
//! suite: a EUR invoice with 800.00 left to pay and a USD invoice with
//! 450.00 left after withholding.

use chrono::NaiveDate;
use core_kernel::{Currency, CurrencyRegistry, FirmId, Money};
use domain_billing::Invoice;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for currencies
pub struct CurrencyFixtures;

impl CurrencyFixtures {
    /// The default registry
    pub fn registry() -> CurrencyRegistry {
        CurrencyRegistry::with_defaults()
    }

    pub fn eur() -> Currency {
        Self::by_code("EUR")
    }

    pub fn usd() -> Currency {
        Self::by_code("USD")
    }

    /// Zero fractional digits
    pub fn jpy() -> Currency {
        Self::by_code("JPY")
    }

    fn by_code(code: &str) -> Currency {
        Self::registry()
            .by_code(code)
            .expect("default registry contains the currency")
            .clone()
    }
}

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// An amount at two fractional digits
    pub fn cents(value: Decimal) -> Money {
        Money::from_decimal(value, 2).expect("valid two-digit amount")
    }

    /// An amount at the precision of `currency`
    pub fn in_currency(currency: &Currency, value: Decimal) -> Money {
        Money::from_decimal(value, currency.precision).expect("valid amount")
    }
}

/// Fixture for the reference invoices
pub struct InvoiceFixtures;

impl InvoiceFixtures {
    /// EUR invoice: total 1000.00, paid 200.00, remaining 800.00
    pub fn eur_invoice_a() -> Invoice {
        Invoice::new("F-2024-0001", &CurrencyFixtures::eur(), MoneyFixtures::cents(dec!(1000.00)))
            .and_then(|i| i.with_amount_paid(MoneyFixtures::cents(dec!(200.00))))
            .expect("valid invoice")
    }

    /// USD invoice: total 500.00, withholding 50.00, remaining 450.00
    pub fn usd_invoice_b() -> Invoice {
        Invoice::new("F-2024-0002", &CurrencyFixtures::usd(), MoneyFixtures::cents(dec!(500.00)))
            .and_then(|i| i.with_tax_withholding(MoneyFixtures::cents(dec!(50.00))))
            .expect("valid invoice")
    }

    /// EUR invoice that is fully paid
    pub fn settled_eur_invoice() -> Invoice {
        Invoice::new("F-2023-0099", &CurrencyFixtures::eur(), MoneyFixtures::cents(dec!(300.00)))
            .and_then(|i| i.with_amount_paid(MoneyFixtures::cents(dec!(300.00))))
            .expect("valid invoice")
    }
}

/// Fixture for miscellaneous values
pub struct ValueFixtures;

impl ValueFixtures {
    /// EUR per USD used in the worked examples
    pub fn usd_to_eur_rate() -> Decimal {
        dec!(0.92)
    }

    pub fn payment_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date")
    }

    pub fn firm_id() -> FirmId {
        FirmId::new_v7()
    }
}
