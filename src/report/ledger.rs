//! Ledger Module
//!
//! Per-account debit / credit rollups and the trial balance built on them.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::amount::{lookup, to_date, to_decimal, to_text};

const ACCOUNT_FIELDS: &[&str] = &[
    "accountId",
    "account_id",
    "account",
    "accountCode",
    "account_code",
];
const DEBIT_FIELDS: &[&str] = &["debitAmount", "debit_amount", "debit"];
const CREDIT_FIELDS: &[&str] = &["creditAmount", "credit_amount", "credit"];
const DATE_FIELDS: &[&str] = &["date", "entryDate", "entry_date"];

// == Ledger Line ==
/// One side-by-side debit/credit posting against an account.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerLine {
    pub account_id: String,
    pub debit_amount: Decimal,
    pub credit_amount: Decimal,
    pub date: Option<NaiveDate>,
}

impl LedgerLine {
    pub fn new(account_id: impl Into<String>, debit_amount: Decimal, credit_amount: Decimal) -> Self {
        Self {
            account_id: account_id.into(),
            debit_amount,
            credit_amount,
            date: None,
        }
    }

    /// Normalizes a raw journal row. A missing account id groups under `""`.
    pub fn from_json(row: &Value) -> Self {
        let Some(fields) = row.as_object() else {
            return Self::default();
        };

        Self {
            account_id: lookup(fields, ACCOUNT_FIELDS)
                .and_then(to_text)
                .unwrap_or_default(),
            debit_amount: lookup(fields, DEBIT_FIELDS)
                .map(to_decimal)
                .unwrap_or_default(),
            credit_amount: lookup(fields, CREDIT_FIELDS)
                .map(to_decimal)
                .unwrap_or_default(),
            date: lookup(fields, DATE_FIELDS).and_then(to_date),
        }
    }
}

// == Account Totals ==
/// Running totals for a single account. `balance` is always `debit - credit`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountTotals {
    pub debit: Decimal,
    pub credit: Decimal,
    pub balance: Decimal,
}

impl AccountTotals {
    fn post(&mut self, line: &LedgerLine) {
        self.debit = self.debit.saturating_add(line.debit_amount);
        self.credit = self.credit.saturating_add(line.credit_amount);
        self.balance = self.debit.saturating_sub(self.credit);
    }
}

/// Sums debits and credits per account id.
pub fn aggregate_by_account(lines: &[LedgerLine]) -> BTreeMap<String, AccountTotals> {
    let mut accounts: BTreeMap<String, AccountTotals> = BTreeMap::new();

    for line in lines {
        accounts
            .entry(line.account_id.clone())
            .or_default()
            .post(line);
    }

    accounts
}

// == Trial Balance ==
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalance {
    pub accounts: BTreeMap<String, AccountTotals>,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    /// Whether total debits equal total credits
    pub balanced: bool,
}

pub fn trial_balance(lines: &[LedgerLine]) -> TrialBalance {
    let accounts = aggregate_by_account(lines);
    let (total_debit, total_credit) = accounts.values().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(debit, credit), totals| {
            (
                debit.saturating_add(totals.debit),
                credit.saturating_add(totals.credit),
            )
        },
    );

    TrialBalance {
        accounts,
        total_debit,
        total_credit,
        balanced: total_debit == total_credit,
    }
}
