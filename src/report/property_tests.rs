//! Property-Based Tests for Report Module

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;

use crate::report::{
    aggregate_by_account, aggregate_by_bucket, aggregate_by_period, bucket_for,
    compute_outstanding, to_decimal, AgingBucket, LedgerLine, MonetaryRecord, Period,
};

// == Strategies ==
fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

/// Cents amounts, negative ones included to model credit notes
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn record_strategy() -> impl Strategy<Value = MonetaryRecord> {
    (
        amount_strategy(),
        prop::option::of(amount_strategy()),
        prop::option::of(-60i64..400),
        prop::option::of(-60i64..400),
        prop::option::of(prop_oneof![Just("PAID"), Just("paid"), Just("unpaid"), Just("draft")]),
    )
        .prop_map(|(amount, paid, due_ago, issued_ago, status)| MonetaryRecord {
            reference_id: None,
            amount,
            paid_amount: paid,
            due_date: due_ago.map(|days| as_of() - Duration::days(days)),
            date: issued_ago.map(|days| as_of() - Duration::days(days)),
            status: status.map(str::to_string),
        })
}

fn ledger_line_strategy() -> impl Strategy<Value = LedgerLine> {
    ("[A-D]", 0i64..100_000, 0i64..100_000).prop_map(|(account, debit, credit)| {
        LedgerLine::new(account, Decimal::new(debit, 2), Decimal::new(credit, 2))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Buckets are monotone in days past due.
    #[test]
    fn prop_bucket_is_monotone(a in any::<i64>(), b in any::<i64>()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(bucket_for(low) <= bucket_for(high));
    }

    #[test]
    fn prop_non_positive_days_are_current(days in i64::MIN..=0) {
        prop_assert_eq!(bucket_for(days), AgingBucket::Current);
    }

    #[test]
    fn prop_outstanding_is_never_negative_when_payments_tracked(
        amount in amount_strategy(),
        paid in amount_strategy()
    ) {
        let record = MonetaryRecord::new(amount).with_paid_amount(paid);
        prop_assert!(compute_outstanding(&record) >= Decimal::ZERO);
    }

    // Grand total equals the sum of buckets and of positive outstanding values.
    #[test]
    fn prop_grand_total_is_sum_of_buckets(
        records in prop::collection::vec(record_strategy(), 0..60)
    ) {
        let summary = aggregate_by_bucket(&records, as_of());

        let bucket_sum: Decimal = AgingBucket::ALL.iter().map(|b| summary.total(*b)).sum();
        let outstanding_sum: Decimal = records
            .iter()
            .map(compute_outstanding)
            .filter(|value| *value > Decimal::ZERO)
            .sum();

        prop_assert_eq!(summary.grand_total, bucket_sum);
        prop_assert_eq!(summary.grand_total, outstanding_sum);
        for bucket in AgingBucket::ALL {
            prop_assert!(summary.total(bucket) >= Decimal::ZERO);
        }
    }

    // Iteration order does not change any total.
    #[test]
    fn prop_aggregation_is_order_independent(
        records in prop::collection::vec(record_strategy(), 0..40)
    ) {
        let mut reversed = records.clone();
        reversed.reverse();

        prop_assert_eq!(
            aggregate_by_bucket(&records, as_of()),
            aggregate_by_bucket(&reversed, as_of())
        );
        prop_assert_eq!(
            aggregate_by_period(&records, Period::Month),
            aggregate_by_period(&reversed, Period::Month)
        );
    }

    #[test]
    fn prop_account_balance_is_debit_minus_credit(
        lines in prop::collection::vec(ledger_line_strategy(), 0..50)
    ) {
        let accounts = aggregate_by_account(&lines);

        for (account, totals) in &accounts {
            let debit: Decimal = lines
                .iter()
                .filter(|line| &line.account_id == account)
                .map(|line| line.debit_amount)
                .sum();
            prop_assert_eq!(totals.debit, debit);
            prop_assert_eq!(totals.balance, totals.debit - totals.credit);
        }
    }

    #[test]
    fn prop_period_totals_preserve_the_sum(
        records in prop::collection::vec(record_strategy(), 0..40)
    ) {
        let total: Decimal = records.iter().map(|r| r.amount).sum();

        for period in [Period::Day, Period::Month, Period::Year] {
            let by_period: Decimal = aggregate_by_period(&records, period).values().copied().sum();
            prop_assert_eq!(by_period, total);
        }
    }

    // Normalization never panics and string/number forms agree.
    #[test]
    fn prop_to_decimal_accepts_numbers_and_strings(cents in -100_000_000i64..100_000_000) {
        let expected = Decimal::new(cents, 2);
        let text = expected.to_string();

        prop_assert_eq!(to_decimal(&json!(text)), expected);
        prop_assert_eq!(to_decimal(&json!(cents)), Decimal::from(cents));
    }

    #[test]
    fn prop_to_decimal_is_total(raw in "[0-9,. $-]{0,16}") {
        let _ = to_decimal(&json!(raw));
    }
}
