//! Aging Module
//!
//! Classifies outstanding balances by how far past due they are and totals
//! them per band, the way receivable / payable aging reports present them.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::record::MonetaryRecord;

// == Aging Bucket ==
/// Fixed days-past-due band. Upper bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgingBucket {
    #[serde(rename = "current")]
    Current,
    #[serde(rename = "1-30")]
    Days1To30,
    #[serde(rename = "31-60")]
    Days31To60,
    #[serde(rename = "61-90")]
    Days61To90,
    #[serde(rename = "90+")]
    Over90,
}

impl AgingBucket {
    /// All buckets from least to most overdue.
    pub const ALL: [AgingBucket; 5] = [
        AgingBucket::Current,
        AgingBucket::Days1To30,
        AgingBucket::Days31To60,
        AgingBucket::Days61To90,
        AgingBucket::Over90,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgingBucket::Current => "current",
            AgingBucket::Days1To30 => "1-30",
            AgingBucket::Days31To60 => "31-60",
            AgingBucket::Days61To90 => "61-90",
            AgingBucket::Over90 => "90+",
        }
    }
}

impl fmt::Display for AgingBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps days past due onto its band. Zero or negative is `current`.
pub fn bucket_for(days_past_due: i64) -> AgingBucket {
    match days_past_due {
        i64::MIN..=0 => AgingBucket::Current,
        1..=30 => AgingBucket::Days1To30,
        31..=60 => AgingBucket::Days31To60,
        61..=90 => AgingBucket::Days61To90,
        _ => AgingBucket::Over90,
    }
}

/// Unpaid remainder of a record.
///
/// Settled records owe nothing. When payments are tracked the remainder is
/// floored at zero; otherwise the full amount is outstanding. Arithmetic
/// saturates at the `Decimal` range instead of overflowing.
pub fn compute_outstanding(record: &MonetaryRecord) -> Decimal {
    if record.is_settled() {
        return Decimal::ZERO;
    }

    match record.paid_amount {
        Some(paid) => record.amount.saturating_sub(paid).max(Decimal::ZERO),
        None => record.amount,
    }
}

/// Whole days between the record's effective due date and `as_of`.
///
/// Records without a usable date count as not yet due.
pub fn days_past_due(record: &MonetaryRecord, as_of: NaiveDate) -> i64 {
    record
        .effective_due_date()
        .map(|due| (as_of - due).num_days())
        .unwrap_or(0)
}

// == Aging Summary ==
/// Outstanding totals per bucket plus their sum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgingSummary {
    #[serde(rename = "current")]
    pub current: Decimal,
    #[serde(rename = "1-30")]
    pub days_1_to_30: Decimal,
    #[serde(rename = "31-60")]
    pub days_31_to_60: Decimal,
    #[serde(rename = "61-90")]
    pub days_61_to_90: Decimal,
    #[serde(rename = "90+")]
    pub over_90: Decimal,
    pub grand_total: Decimal,
}

impl AgingSummary {
    /// Total held in one bucket.
    pub fn total(&self, bucket: AgingBucket) -> Decimal {
        match bucket {
            AgingBucket::Current => self.current,
            AgingBucket::Days1To30 => self.days_1_to_30,
            AgingBucket::Days31To60 => self.days_31_to_60,
            AgingBucket::Days61To90 => self.days_61_to_90,
            AgingBucket::Over90 => self.over_90,
        }
    }

    fn slot(&mut self, bucket: AgingBucket) -> &mut Decimal {
        match bucket {
            AgingBucket::Current => &mut self.current,
            AgingBucket::Days1To30 => &mut self.days_1_to_30,
            AgingBucket::Days31To60 => &mut self.days_31_to_60,
            AgingBucket::Days61To90 => &mut self.days_61_to_90,
            AgingBucket::Over90 => &mut self.over_90,
        }
    }

    fn add(&mut self, bucket: AgingBucket, amount: Decimal) {
        let slot = self.slot(bucket);
        *slot = slot.saturating_add(amount);
        self.grand_total = self.grand_total.saturating_add(amount);
    }
}

/// Buckets every record's outstanding amount as of `as_of`.
///
/// Records with nothing outstanding are left out of the sums.
pub fn aggregate_by_bucket(records: &[MonetaryRecord], as_of: NaiveDate) -> AgingSummary {
    let mut summary = AgingSummary::default();

    for record in records {
        let outstanding = compute_outstanding(record);
        if outstanding <= Decimal::ZERO {
            continue;
        }
        summary.add(bucket_for(days_past_due(record, as_of)), outstanding);
    }

    summary
}

// == Aging Report ==
/// One record's position in the aging report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgingDetail {
    pub reference_id: Option<String>,
    pub effective_due_date: Option<NaiveDate>,
    pub days_past_due: i64,
    pub bucket: AgingBucket,
    pub outstanding: Decimal,
}

/// Summary totals together with the per-record breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgingReport {
    pub as_of: NaiveDate,
    pub summary: AgingSummary,
    /// Every input record in input order, settled ones included
    pub details: Vec<AgingDetail>,
}

pub fn aging_report(records: &[MonetaryRecord], as_of: NaiveDate) -> AgingReport {
    let details = records
        .iter()
        .map(|record| {
            let days = days_past_due(record, as_of);
            AgingDetail {
                reference_id: record.reference_id.clone(),
                effective_due_date: record.effective_due_date(),
                days_past_due: days,
                bucket: bucket_for(days),
                outstanding: compute_outstanding(record),
            }
        })
        .collect();

    AgingReport {
        as_of,
        summary: aggregate_by_bucket(records, as_of),
        details,
    }
}
