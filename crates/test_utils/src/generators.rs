//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating amounts and rates that
//! respect the engine's invariants.

use core_kernel::Money;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for supported precisions
pub fn precision_strategy() -> impl Strategy<Value = u8> {
    prop_oneof![Just(0u8), Just(2u8), Just(3u8)]
}

/// Strategy for non-negative amounts in minor units
pub fn non_negative_minor_strategy() -> impl Strategy<Value = i64> {
    0i64..1_000_000_000i64
}

/// Strategy for non-negative two-digit amounts
pub fn cents_strategy() -> impl Strategy<Value = Money> {
    non_negative_minor_strategy()
        .prop_map(|minor| Money::from_minor(minor, 2).expect("valid precision"))
}

/// Strategy for exchange rates between 0.0001 and 1000 with four digits
pub fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy for rates that do not magnify rounding beyond one unit when
/// both sides use the same precision (0.0001 to 2.9999)
pub fn moderate_rate_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..30_000i64).prop_map(|v| Decimal::new(v, 4))
}
