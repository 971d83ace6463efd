//! Comprehensive tests for domain_billing

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{CurrencyId, FirmId, InvoiceId, Money, MoneyError};
use domain_billing::conversion::{to_invoice_currency, to_payment_currency};
use domain_billing::{
    BillingError, InvoiceStatus, PaymentMode, PaymentSession, ReconciliationValidator, Verdict,
};
use test_utils::*;

fn eur(value: Decimal) -> Money {
    MoneyFixtures::cents(value)
}

/// Session over the two reference invoices, paying in EUR at 0.92 EUR/USD
fn reference_session() -> (PaymentSession, InvoiceId, InvoiceId) {
    let a = InvoiceFixtures::eur_invoice_a();
    let b = InvoiceFixtures::usd_invoice_b();
    let (a_id, b_id) = (a.id, b.id);
    let session = TestSessionBuilder::new()
        .with_invoice(a)
        .with_invoice(b)
        .build();
    (session, a_id, b_id)
}

/// Reference session with both invoices fully allocated and dated
fn allocated_session() -> (PaymentSession, InvoiceId, InvoiceId) {
    let (mut session, a, b) = reference_session();
    session.update_amount(a, eur(dec!(800.00))).unwrap();
    session.update_amount(b, eur(dec!(414.00))).unwrap();
    session.set_date(ValueFixtures::payment_date());
    (session, a, b)
}

// ============================================================================
// Invoice Balance Tests
// ============================================================================

mod balance_tests {
    use super::*;

    #[test]
    fn test_remaining_balance_subtracts_paid_and_withholding() {
        let invoice = TestInvoiceBuilder::new()
            .with_total(dec!(500.00))
            .with_amount_paid(dec!(100.00))
            .with_withholding(dec!(25.50))
            .build();

        assert_money_eq(&invoice.remaining_balance().unwrap(), dec!(374.50));
    }

    #[test]
    fn test_remaining_balance_does_not_mutate_invoice() {
        let invoice = InvoiceFixtures::eur_invoice_a();
        let before = invoice.clone();
        let _ = invoice.remaining_balance().unwrap();
        assert_eq!(invoice, before);
    }

    #[test]
    fn test_fully_paid_invoice_status() {
        let invoice = InvoiceFixtures::settled_eur_invoice();
        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert!(invoice.is_settled().unwrap());
    }

    #[test]
    fn test_status_does_not_drive_balance() {
        let invoice = TestInvoiceBuilder::new()
            .with_total(dec!(100.00))
            .with_status(InvoiceStatus::Cancelled)
            .build();

        assert_eq!(invoice.status, InvoiceStatus::Cancelled);
        assert_money_eq(&invoice.allocatable_balance().unwrap(), dec!(100.00));
        assert!(!invoice.is_settled().unwrap());
    }

    #[test]
    fn test_overpaid_invoice_is_clamped_to_zero() {
        let invoice = TestInvoiceBuilder::new()
            .with_total(dec!(100.00))
            .with_amount_paid(dec!(120.00))
            .build();

        assert_money_eq(&invoice.remaining_balance().unwrap(), dec!(-20.00));
        assert!(invoice.allocatable_balance().unwrap().is_zero());
        assert!(invoice.is_settled().unwrap());
    }

    #[test]
    fn test_mixed_precision_invoice_is_rejected() {
        let mut invoice = InvoiceFixtures::eur_invoice_a();
        invoice.amount_paid = Money::from_minor(200, 0).unwrap();
        assert!(matches!(
            invoice.remaining_balance(),
            Err(MoneyError::PrecisionMismatch(..))
        ));
    }
}

// ============================================================================
// Allocation Tests
// ============================================================================

mod allocation_tests {
    use super::*;

    #[test]
    fn test_scenario_same_currency_full_allocation() {
        let (mut session, a, _) = reference_session();

        let total = session.update_amount(a, eur(dec!(800.00))).unwrap();
        let line = session.payment().lines.get(&a).unwrap();

        assert_money_eq(&total, dec!(800.00));
        assert_eq!(line.original_amount, eur(dec!(800.00)));
        assert_eq!(line.amount, line.original_amount);
        assert_eq!(line.exchange_rate, Decimal::ONE);
    }

    #[test]
    fn test_scenario_cross_currency_ceiling() {
        let (mut session, _, b) = reference_session();

        session.update_amount(b, eur(dec!(414.00))).unwrap();
        assert_eq!(
            session.payment().lines.get(&b).unwrap().original_amount,
            eur(dec!(450.00))
        );

        let result = session.update_amount(b, eur(dec!(420.00)));
        assert_eq!(
            result,
            Err(BillingError::AllocationExceedsBalance {
                invoice_id: b,
                requested: eur(dec!(420.00)),
                max_allowed: eur(dec!(414.00)),
            })
        );
        assert_eq!(session.payment().lines.get(&b).unwrap().amount, eur(dec!(414.00)));
    }

    #[test]
    fn test_ceiling_tolerance_boundaries() {
        let (mut session, a, _) = reference_session();

        assert!(session.update_amount(a, eur(dec!(800.00))).is_ok());
        assert!(session.update_amount(a, eur(dec!(800.01))).is_ok());
        assert!(matches!(
            session.update_amount(a, eur(dec!(800.02))),
            Err(BillingError::AllocationExceedsBalance { .. })
        ));
    }

    #[test]
    fn test_rate_change_keeps_amount_and_rechecks_ceiling() {
        let (mut session, _, b) = reference_session();
        session.update_amount(b, eur(dec!(400.00))).unwrap();

        session.update_exchange_rate(b, dec!(0.95)).unwrap();
        let line = session.payment().lines.get(&b).unwrap();
        assert_eq!(line.amount, eur(dec!(400.00)));
        assert_eq!(line.original_amount, eur(dec!(421.05)));

        let result = session.update_exchange_rate(b, dec!(0.80));
        assert!(matches!(result, Err(BillingError::AllocationExceedsBalance { .. })));
        assert_eq!(session.payment().lines.get(&b).unwrap().exchange_rate, dec!(0.95));
    }

    #[test]
    fn test_non_positive_rate_is_rejected() {
        let (mut session, _, b) = reference_session();
        assert!(matches!(
            session.update_exchange_rate(b, Decimal::ZERO),
            Err(BillingError::Money(MoneyError::InvalidRate(_)))
        ));
    }

    #[test]
    fn test_amount_with_wrong_precision_is_rejected() {
        let (mut session, a, _) = reference_session();
        let result = session.update_amount(a, Money::from_minor(800, 0).unwrap());
        assert_eq!(result, Err(BillingError::Money(MoneyError::PrecisionMismatch(2, 0))));
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let (mut session, a, _) = reference_session();
        assert!(matches!(
            session.update_amount(a, eur(dec!(-1.00))),
            Err(BillingError::NegativeAllocation { .. })
        ));
    }

    #[test]
    fn test_enter_amount_parses_raw_input() {
        let (mut session, a, _) = reference_session();
        let total = session.enter_amount(a, " 100.5 ").unwrap();
        assert_money_eq(&total, dec!(100.50));

        let before = session.payment().clone();
        for malformed in ["abc", "1,00.5"] {
            assert!(matches!(
                session.enter_amount(a, malformed),
                Err(BillingError::Money(MoneyError::InvalidAmount(_)))
            ));
        }
        assert_eq!(session.payment(), &before);
    }

    #[test]
    fn test_unknown_line() {
        let (mut session, _, _) = reference_session();
        let stranger = InvoiceId::new();
        assert_eq!(
            session.update_amount(stranger, eur(dec!(1))),
            Err(BillingError::LineNotFound(stranger))
        );
    }

    #[test]
    fn test_remove_and_add_back() {
        let (mut session, a, b) = allocated_session();

        let total = session.remove(b).unwrap();
        assert_money_eq(&total, dec!(800.00));
        assert_eq!(session.lines().len(), 1);

        session.add_invoice_line(b).unwrap();
        assert_eq!(session.lines().len(), 2);
        assert!(session.payment().lines.get(&b).unwrap().amount.is_zero());
        assert_eq!(
            session.add_invoice_line(a),
            Err(BillingError::DuplicateAllocation(a))
        );
    }

    #[test]
    fn test_settled_invoice_cannot_be_added() {
        let settled = InvoiceFixtures::settled_eur_invoice();
        let settled_id = settled.id;
        let mut session = TestSessionBuilder::new().with_invoice(settled).build();

        assert!(session.lines().is_empty());
        assert_eq!(
            session.add_invoice_line(settled_id),
            Err(BillingError::InvoiceSettled(settled_id))
        );
    }

    #[test]
    fn test_clear_all() {
        let (mut session, _, _) = allocated_session();
        session.clear_all();
        assert!(session.lines().is_empty());
        assert!(session.total().unwrap().is_zero());
    }
}

// ============================================================================
// Session Tests
// ============================================================================

mod session_tests {
    use super::*;

    #[test]
    fn test_currency_switch_reseeds_and_resets() {
        let (mut session, a, b) = allocated_session();
        session.set_amount(eur(dec!(1214.00))).unwrap();
        session.set_fee(eur(dec!(5.00))).unwrap();

        let usd = CurrencyFixtures::usd();
        session.select_currency(usd.id, dec!(1.0870)).unwrap();

        let payment = session.payment();
        assert_eq!(payment.currency_id, usd.id);
        assert!(payment.amount.is_zero());
        assert!(payment.fee.is_zero());
        assert!(payment.lines.lines().iter().all(|l| l.amount.is_zero()));
        assert_eq!(payment.lines.get(&a).unwrap().exchange_rate, dec!(1.0870));
        assert_eq!(payment.lines.get(&b).unwrap().exchange_rate, Decimal::ONE);
    }

    #[test]
    fn test_currency_switch_to_zero_decimal_currency() {
        let (mut session, a, _) = reference_session();
        let jpy = CurrencyFixtures::jpy();
        session.select_currency(jpy.id, dec!(162.5)).unwrap();
        assert_eq!(session.payment_currency(), &jpy);

        let total = session
            .update_amount(a, MoneyFixtures::in_currency(&jpy, dec!(130000)))
            .unwrap();
        assert_eq!(total.precision(), 0);
        assert_eq!(
            session.payment().lines.get(&a).unwrap().original_amount,
            eur(dec!(800.00))
        );
    }

    #[test]
    fn test_unknown_currency_leaves_session_untouched() {
        let (mut session, _, _) = allocated_session();
        let before = session.payment().clone();

        let result = session.select_currency(CurrencyId::new(999), dec!(1));
        assert!(matches!(result, Err(BillingError::Registry(_))));
        assert_eq!(session.payment(), &before);
    }

    #[test]
    fn test_firm_switch_replaces_snapshot() {
        let (mut session, a, _) = allocated_session();
        let other = TestInvoiceBuilder::new()
            .with_sequential("F-OTHER-0001")
            .with_total(dec!(75.00))
            .build();
        let other_id = other.id;

        session.select_firm(FirmId::new(), vec![other]).unwrap();

        assert_eq!(session.lines().len(), 1);
        assert_eq!(session.lines()[0].invoice_id, other_id);
        assert!(session.payment().lines.get(&a).is_none());
        assert_eq!(session.invoices().len(), 1);
    }

    #[test]
    fn test_set_default_rate_is_all_or_nothing() {
        let (mut session, a, b) = reference_session();
        session.update_amount(a, eur(dec!(100.00))).unwrap();
        session.update_amount(b, eur(dec!(414.00))).unwrap();
        let before = session.payment().clone();

        let result = session.set_default_rate(dec!(0.90));
        assert!(matches!(result, Err(BillingError::AllocationExceedsBalance { .. })));
        assert_eq!(session.payment(), &before);

        let total = session.set_default_rate(dec!(0.95)).unwrap();
        assert_money_eq(&total, dec!(514.00));
        assert_eq!(session.payment().default_conversion_rate, dec!(0.95));
        assert_eq!(session.payment().lines.get(&a).unwrap().exchange_rate, Decimal::ONE);
    }

    #[test]
    fn test_set_fee_rejects_foreign_precision() {
        let (mut session, _, _) = reference_session();
        let result = session.set_fee(Money::from_minor(5, 3).unwrap());
        assert_eq!(result, Err(BillingError::Money(MoneyError::PrecisionMismatch(2, 3))));
    }

    #[test]
    fn test_submit_produces_dto() {
        let (mut session, a, b) = allocated_session();
        session.sync_amount_to_allocations().unwrap();
        session.set_fee(eur(dec!(2.50))).unwrap();
        session.set_mode(PaymentMode::Check);
        session.set_notes("March settlement");

        let submission = session.submit("PAY-2024-0007").unwrap();

        assert_eq!(submission.amount, dec!(1214.00));
        assert_eq!(submission.fee, dec!(2.50));
        assert_eq!(submission.sequential_number, "PAY-2024-0007");
        assert_eq!(submission.lines.len(), 2);

        let same = submission.lines.iter().find(|l| l.invoice_id == a).unwrap();
        assert_eq!(same.original_amount, None);
        assert_eq!(same.exchange_rate, None);

        let cross = submission.lines.iter().find(|l| l.invoice_id == b).unwrap();
        assert_eq!(cross.amount, dec!(414.00));
        assert_eq!(cross.original_amount, Some(dec!(450.00)));
        assert_eq!(cross.exchange_rate, Some(ValueFixtures::usd_to_eur_rate()));

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["sequentialNumber"], "PAY-2024-0007");
        assert_eq!(json["mode"], "check");
        assert!(json.get("id").is_none());
        assert!(json["lines"][0].get("originalAmount").is_none());
    }

    #[test]
    fn test_submit_drops_zero_lines() {
        let (mut session, a, _) = reference_session();
        session.update_amount(a, eur(dec!(50.00))).unwrap();
        session.sync_amount_to_allocations().unwrap();
        session.set_date(ValueFixtures::payment_date());

        let submission = session.submit("PAY-1").unwrap();
        assert_eq!(submission.lines.len(), 1);
        assert_eq!(submission.lines[0].invoice_id, a);
    }

    #[test]
    fn test_submit_refuses_invalid_payment() {
        let (session, _, _) = allocated_session();
        assert!(matches!(
            session.submit("PAY-2"),
            Err(BillingError::NonPositiveAmount { .. })
        ));
    }
}

// ============================================================================
// Reconciliation Tests
// ============================================================================

mod reconciliation_tests {
    use super::*;

    #[test]
    fn test_valid_payment() {
        let (mut session, _, _) = allocated_session();
        session.set_amount(eur(dec!(1214.00))).unwrap();
        assert_valid(&session.validate());
    }

    #[test]
    fn test_missing_date_is_first_rule() {
        let (mut session, _, _) = reference_session();
        assert_eq!(session.validate(), Verdict::Rejected(BillingError::MissingDate));

        session.set_date(ValueFixtures::payment_date());
        assert_rejected_with(&session.validate(), "NonPositiveAmount");
    }

    #[test]
    fn test_scenario_total_mismatch() {
        let (mut session, _, _) = allocated_session();
        session.set_amount(eur(dec!(1216.00))).unwrap();

        assert_eq!(
            session.validate(),
            Verdict::Rejected(BillingError::TotalMismatch {
                declared: eur(dec!(1216.00)),
                computed: eur(dec!(1214.00)),
            })
        );
    }

    #[test]
    fn test_total_within_tolerance_passes() {
        let (mut session, _, _) = allocated_session();
        session.set_amount(eur(dec!(1214.01))).unwrap();
        assert_valid(&session.validate());
    }

    #[test]
    fn test_scenario_fee_exceeds_amount() {
        let (mut session, _, _) = allocated_session();
        session.set_amount(eur(dec!(100.00))).unwrap();
        session.set_fee(eur(dec!(150.00))).unwrap();

        assert_eq!(
            session.validate(),
            Verdict::Rejected(BillingError::FeeExceedsAmount {
                fee: eur(dec!(150.00)),
                amount: eur(dec!(100.00)),
            })
        );
    }

    #[test]
    fn test_fee_equal_to_amount_is_rejected() {
        let (mut session, _, _) = allocated_session();
        session.set_amount(eur(dec!(1214.00))).unwrap();
        session.set_fee(eur(dec!(1214.00))).unwrap();
        assert_rejected_with(&session.validate(), "FeeExceedsAmount");
    }

    #[test]
    fn test_negative_fee_is_rejected() {
        let (mut session, _, _) = allocated_session();
        session.set_amount(eur(dec!(1214.00))).unwrap();
        session.set_fee(eur(dec!(-1.00))).unwrap();
        assert_rejected_with(&session.validate(), "NegativeFee");
    }

    #[test]
    fn test_scenario_no_valid_allocations_when_all_settled() {
        let mut session = TestSessionBuilder::new()
            .with_invoice(InvoiceFixtures::settled_eur_invoice())
            .build();
        session.set_date(ValueFixtures::payment_date());
        session.set_amount(eur(dec!(100.00))).unwrap();

        assert!(session.lines().is_empty());
        assert_eq!(
            session.validate(),
            Verdict::Rejected(BillingError::NoValidAllocations)
        );
        assert_eq!(session.submit("PAY-3"), Err(BillingError::NoValidAllocations));
    }

    #[test]
    fn test_zero_lines_only_is_no_valid_allocations() {
        let (mut session, _, _) = reference_session();
        session.set_date(ValueFixtures::payment_date());
        session.set_amount(eur(dec!(10.00))).unwrap();
        assert_rejected_with(&session.validate(), "NoValidAllocations");
    }

    #[test]
    fn test_overallocated_line_from_stale_snapshot() {
        let (session, a, b) = allocated_session();
        let mut payment = session.payment().clone();
        payment.amount = eur(dec!(1214.00));

        // the invoice received another payment after seeding
        let mut refreshed = vec![
            InvoiceFixtures::eur_invoice_a(),
            InvoiceFixtures::usd_invoice_b(),
        ];
        refreshed[0].id = a;
        refreshed[0].amount_paid = eur(dec!(500.00));
        refreshed[1].id = b;

        let verdict = ReconciliationValidator::new().validate(&payment, &refreshed);
        assert_eq!(
            verdict,
            Verdict::Rejected(BillingError::AllocationExceedsBalance {
                invoice_id: a,
                requested: eur(dec!(800.00)),
                max_allowed: eur(dec!(500.00)),
            })
        );
    }

    #[test]
    fn test_unresolvable_invoice() {
        let (session, a, _) = allocated_session();
        let mut payment = session.payment().clone();
        payment.amount = eur(dec!(1214.00));

        let only_b = vec![InvoiceFixtures::usd_invoice_b()];
        let verdict = ReconciliationValidator::new().validate(&payment, &only_b);
        assert_eq!(verdict, Verdict::Rejected(BillingError::InvoiceNotFound(a)));
    }

    #[test]
    fn test_non_positive_seeded_rate_is_caught() {
        let a = InvoiceFixtures::eur_invoice_a();
        let b = InvoiceFixtures::usd_invoice_b();
        let (a_id, b_id) = (a.id, b.id);
        let mut session = TestSessionBuilder::new()
            .with_default_rate(Decimal::ZERO)
            .with_invoice(a)
            .with_invoice(b)
            .build();
        session.update_amount(a_id, eur(dec!(800.00))).unwrap();
        session.sync_amount_to_allocations().unwrap();
        session.set_date(ValueFixtures::payment_date());

        assert_eq!(
            session.validate(),
            Verdict::Rejected(BillingError::InvalidExchangeRate {
                invoice_id: b_id,
                rate: Decimal::ZERO,
            })
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let (mut session, _, _) = allocated_session();
        session.set_amount(eur(dec!(1300.00))).unwrap();

        let first = session.validate();
        let second = session.validate();
        assert_eq!(first, second);
        assert_rejected_with(&first, "TotalMismatch");
    }

    #[test]
    fn test_error_detail_is_structured() {
        let (mut session, _, b) = reference_session();
        let error = session.update_amount(b, eur(dec!(420.00))).unwrap_err();
        let detail = error.detail();

        assert_eq!(detail.kind, "AllocationExceedsBalance");
        assert_eq!(detail.invoice_id, Some(b));
        assert_eq!(detail.context["requested"], dec!(420.00));
        assert_eq!(detail.context["maxAllowed"], dec!(414.00));

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["kind"], "AllocationExceedsBalance");
        assert!(json["message"].as_str().unwrap().contains("414.00"));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn same_currency_lines_mirror_amount(minor in 0i64..=80_000i64) {
            let (mut session, a, _) = reference_session();
            let amount = Money::from_minor(minor, 2).unwrap();
            session.update_amount(a, amount).unwrap();

            let line = session.payment().lines.get(&a).unwrap();
            prop_assert_eq!(line.original_amount, amount);
            prop_assert_eq!(line.exchange_rate, Decimal::ONE);
        }

        #[test]
        fn conversion_round_trip_within_one_unit(
            amount in cents_strategy(),
            rate in moderate_rate_strategy()
        ) {
            let original = to_invoice_currency(&amount, rate, 2).unwrap();
            let back = to_payment_currency(&original, rate, 2).unwrap();
            assert_money_approx_eq(&back, &amount, dec!(0.01));
        }

        #[test]
        fn identity_rate_converts_exactly(
            minor in non_negative_minor_strategy(),
            precision in precision_strategy()
        ) {
            let amount = Money::from_minor(minor, precision).unwrap();
            prop_assert_eq!(to_payment_currency(&amount, Decimal::ONE, precision).unwrap(), amount);
            prop_assert_eq!(to_invoice_currency(&amount, Decimal::ONE, precision).unwrap(), amount);
        }

        #[test]
        fn exact_remaining_balance_is_always_accepted(
            remaining_minor in 2i64..10_000_000i64,
            rate in rate_strategy()
        ) {
            let usd = CurrencyFixtures::usd();
            let invoice = TestInvoiceBuilder::new()
                .with_currency(usd)
                .with_total(Decimal::new(remaining_minor, 2))
                .build();
            let id = invoice.id;
            let mut session = TestSessionBuilder::new()
                .with_default_rate(rate)
                .with_invoice(invoice)
                .build();

            let remaining = Money::from_minor(remaining_minor, 2).unwrap();
            let total = session.update_original_amount(id, remaining).unwrap();
            prop_assert_eq!(total, to_payment_currency(&remaining, rate, 2).unwrap());
        }

        #[test]
        fn same_currency_ceiling_is_enforced(remaining_minor in 2i64..10_000_000i64) {
            let invoice = TestInvoiceBuilder::new()
                .with_total(Decimal::new(remaining_minor, 2))
                .build();
            let id = invoice.id;
            let mut session = TestSessionBuilder::new().with_invoice(invoice).build();

            let over = Money::from_minor(remaining_minor + 2, 2).unwrap();
            let is_exceeding = matches!(
                session.update_amount(id, over),
                Err(BillingError::AllocationExceedsBalance { .. })
            );
            prop_assert!(is_exceeding);
            prop_assert!(session.update_amount(id, Money::from_minor(remaining_minor, 2).unwrap()).is_ok());
        }

        #[test]
        fn total_invariant_holds_after_edits(
            a_minor in 1i64..=80_000i64,
            b_minor in 0i64..=41_400i64,
            rate_step in 0i64..8i64
        ) {
            let (mut session, a, b) = reference_session();
            session.set_date(ValueFixtures::payment_date());
            session.update_amount(a, Money::from_minor(a_minor, 2).unwrap()).unwrap();
            session.update_amount(b, Money::from_minor(b_minor, 2).unwrap()).unwrap();
            // higher rates shrink the original amount, so the ceiling still holds
            let _ = session.update_exchange_rate(b, dec!(0.92) + Decimal::new(rate_step, 2));

            let total = session.sync_amount_to_allocations().unwrap();
            prop_assert!(session.validate().is_valid());

            let off = total.checked_add(&Money::from_minor(2, 2).unwrap()).unwrap();
            session.set_amount(off).unwrap();
            let is_mismatch = matches!(
                session.validate(),
                Verdict::Rejected(BillingError::TotalMismatch { .. })
            );
            prop_assert!(is_mismatch);
        }

        #[test]
        fn validator_is_idempotent(declared_minor in 0i64..200_000i64, fee_minor in -100i64..200_000i64) {
            let (mut session, _, _) = allocated_session();
            session.set_amount(Money::from_minor(declared_minor, 2).unwrap()).unwrap();
            session.set_fee(Money::from_minor(fee_minor, 2).unwrap()).unwrap();

            prop_assert_eq!(session.validate(), session.validate());
        }
    }
}
