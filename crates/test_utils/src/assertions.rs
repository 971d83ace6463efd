//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for money and reconciliation
//! verdicts that give more meaningful messages than standard assertions.

use core_kernel::Money;
use domain_billing::{BillingError, Verdict};
use rust_decimal::Decimal;

/// Asserts that two Money values share a precision and differ by at most
/// `tolerance` currency units
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.precision(),
        expected.precision(),
        "Precision mismatch: actual={}, expected={}",
        actual.precision(),
        expected.precision()
    );

    let diff = (actual.to_unit() - expected.to_unit()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that a Money value equals a decimal amount
pub fn assert_money_eq(actual: &Money, expected: Decimal) {
    assert_eq!(
        actual.to_unit(),
        expected,
        "Expected {}, got {}",
        expected,
        actual
    );
}

/// Asserts that a verdict is valid
pub fn assert_valid(verdict: &Verdict) {
    assert!(verdict.is_valid(), "Expected a valid verdict, got {:?}", verdict);
}

/// Asserts that a verdict was rejected and returns the error
pub fn assert_rejected(verdict: &Verdict) -> &BillingError {
    match verdict {
        Verdict::Rejected(error) => error,
        Verdict::Valid => panic!("Expected a rejected verdict, got Valid"),
    }
}

/// Asserts that a verdict was rejected with the given error kind
pub fn assert_rejected_with(verdict: &Verdict, kind: &str) {
    let error = assert_rejected(verdict);
    assert_eq!(error.kind(), kind, "Unexpected rejection: {}", error);
}
