//! Report Module
//!
//! Pure aggregation over monetary records: aging buckets, per-account ledger
//! totals and per-period sums. Raw JSON rows are normalized once at the
//! boundary (see [`amount`]) so a malformed row never aborts a report.

pub mod amount;
mod aging;
mod ledger;
mod period;
mod record;

#[cfg(test)]
mod property_tests;

pub use aging::{
    aggregate_by_bucket, aging_report, bucket_for, compute_outstanding, days_past_due,
    AgingBucket, AgingDetail, AgingReport, AgingSummary,
};
pub use amount::{to_date, to_decimal};
pub use ledger::{aggregate_by_account, trial_balance, AccountTotals, LedgerLine, TrialBalance};
pub use period::{aggregate_by_period, Period, UNDATED_LABEL};
pub use record::MonetaryRecord;
