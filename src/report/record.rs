//! Monetary records: the invoice / bill rows the aggregator reads.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use super::amount::{lookup, to_date, to_decimal, to_text};

const REFERENCE_FIELDS: &[&str] = &[
    "referenceId",
    "reference_id",
    "reference",
    "invoiceNumber",
    "invoice_number",
    "billNumber",
    "bill_number",
    "id",
];
const AMOUNT_FIELDS: &[&str] = &["amount", "total", "totalAmount", "total_amount"];
const PAID_FIELDS: &[&str] = &["paidAmount", "paid_amount", "amountPaid", "amount_paid"];
const DUE_DATE_FIELDS: &[&str] = &["dueDate", "due_date"];
const DATE_FIELDS: &[&str] = &[
    "date",
    "invoiceDate",
    "invoice_date",
    "billDate",
    "bill_date",
    "createdAt",
    "created_at",
];
const STATUS_FIELDS: &[&str] = &["status"];

/// Status that marks a record as fully settled, compared case-insensitively.
const SETTLED_STATUS: &str = "paid";

// == Monetary Record ==
/// An invoice or bill reduced to the fields reports care about.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonetaryRecord {
    pub reference_id: Option<String>,
    pub amount: Decimal,
    /// Payments applied so far, when the source tracks them
    pub paid_amount: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
    /// Issue date, used when no due date is set
    pub date: Option<NaiveDate>,
    pub status: Option<String>,
}

impl MonetaryRecord {
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount,
            ..Self::default()
        }
    }

    pub fn with_reference(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = Some(reference_id.into());
        self
    }

    pub fn with_paid_amount(mut self, paid_amount: Decimal) -> Self {
        self.paid_amount = Some(paid_amount);
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    // == From JSON ==
    /// Normalizes a raw row, accepting camelCase or snake_case field names.
    ///
    /// Missing or malformed fields fall back to zero / `None`; a non-object
    /// row yields a zero-amount record.
    pub fn from_json(row: &Value) -> Self {
        let Some(fields) = row.as_object() else {
            return Self::default();
        };

        Self {
            reference_id: lookup(fields, REFERENCE_FIELDS).and_then(to_text),
            amount: lookup(fields, AMOUNT_FIELDS)
                .map(to_decimal)
                .unwrap_or_default(),
            paid_amount: lookup(fields, PAID_FIELDS).map(to_decimal),
            due_date: lookup(fields, DUE_DATE_FIELDS).and_then(to_date),
            date: lookup(fields, DATE_FIELDS).and_then(to_date),
            status: lookup(fields, STATUS_FIELDS).and_then(to_text),
        }
    }

    /// Due date, or the issue date when no due date was set.
    pub fn effective_due_date(&self) -> Option<NaiveDate> {
        self.due_date.or(self.date)
    }

    /// Whether the status marks the record as settled (`PAID`, `paid`, ...).
    pub fn is_settled(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|status| status.trim().eq_ignore_ascii_case(SETTLED_STATUS))
    }
}
