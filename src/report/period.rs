//! Period Module
//!
//! Sums record amounts per calendar day, month or year.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::record::MonetaryRecord;

/// Label for records that carry no usable date.
pub const UNDATED_LABEL: &str = "undated";

// == Period ==
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    #[default]
    Month,
    Year,
}

impl Period {
    /// Sortable label of the period containing `date`.
    pub fn label(&self, date: NaiveDate) -> String {
        match self {
            Period::Day => date.format("%Y-%m-%d").to_string(),
            Period::Month => date.format("%Y-%m").to_string(),
            Period::Year => date.format("%Y").to_string(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Period::Day => "day",
            Period::Month => "month",
            Period::Year => "year",
        })
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(Period::Day),
            "month" | "monthly" => Ok(Period::Month),
            "year" | "yearly" => Ok(Period::Year),
            other => Err(format!("Unknown period '{}'", other)),
        }
    }
}

/// Sums `amount` per period of each record's issue date.
///
/// Falls back to the due date, then to [`UNDATED_LABEL`].
pub fn aggregate_by_period(records: &[MonetaryRecord], period: Period) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();

    for record in records {
        let label = record
            .date
            .or(record.due_date)
            .map(|date| period.label(date))
            .unwrap_or_else(|| UNDATED_LABEL.to_string());
        let total = totals.entry(label).or_default();
        *total = total.saturating_add(record.amount);
    }

    totals
}
