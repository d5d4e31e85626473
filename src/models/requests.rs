//! Request DTOs for the report service API
//!
//! Report requests carry their rows as raw JSON values; normalization to
//! typed records happens in the report module, never here.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::cache::MAX_KEY_LENGTH;
use crate::report::{to_date, Period};

/// Request body for storing a payload (PUT /cache)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// Any JSON payload
    pub value: Value,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key).or_else(|| validate_ttl(self.ttl))
    }
}

/// Request body for POST /reports/aging
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgingReportRequest {
    /// Invoice or bill rows
    #[serde(default)]
    pub records: Vec<Value>,
    /// Report date, defaults to today (UTC)
    #[serde(default, alias = "as_of")]
    pub as_of: Option<String>,
    /// Memoize the result under this key
    #[serde(default, alias = "cache_key")]
    pub cache_key: Option<String>,
    #[serde(default)]
    pub ttl: Option<u64>,
    /// Include per-record detail lines
    #[serde(default)]
    pub detailed: bool,
}

impl AgingReportRequest {
    pub fn validate(&self) -> Option<String> {
        validate_cache_options(self.cache_key.as_deref(), self.ttl)
    }

    /// Parses `asOf`, falling back to today when absent.
    pub fn as_of_date(&self) -> Result<NaiveDate, String> {
        match self.as_of.as_deref() {
            None => Ok(Utc::now().date_naive()),
            Some(raw) => to_date(&Value::from(raw))
                .ok_or_else(|| format!("Invalid asOf date '{}'", raw)),
        }
    }
}

/// Request body for POST /reports/accounts
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountReportRequest {
    /// Journal lines
    #[serde(default)]
    pub lines: Vec<Value>,
    #[serde(default, alias = "cache_key")]
    pub cache_key: Option<String>,
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl AccountReportRequest {
    pub fn validate(&self) -> Option<String> {
        validate_cache_options(self.cache_key.as_deref(), self.ttl)
    }
}

/// Request body for POST /reports/periods
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReportRequest {
    #[serde(default)]
    pub records: Vec<Value>,
    /// `day`, `month` (default) or `year`
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default, alias = "cache_key")]
    pub cache_key: Option<String>,
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl PeriodReportRequest {
    pub fn validate(&self) -> Option<String> {
        validate_cache_options(self.cache_key.as_deref(), self.ttl)
    }

    pub fn period(&self) -> Result<Period, String> {
        self.period
            .as_deref()
            .map(|raw| raw.parse::<Period>())
            .unwrap_or(Ok(Period::default()))
    }
}

// == Validation Helpers ==
/// Checks a cache key is non-empty and within the length limit.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

fn validate_ttl(ttl: Option<u64>) -> Option<String> {
    match ttl {
        Some(0) => Some("TTL must be at least 1 second".to_string()),
        _ => None,
    }
}

fn validate_cache_options(cache_key: Option<&str>, ttl: Option<u64>) -> Option<String> {
    cache_key
        .and_then(validate_key)
        .or_else(|| validate_ttl(ttl))
}
