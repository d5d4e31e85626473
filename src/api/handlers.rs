//! API Handlers
//!
//! HTTP request handlers for cache administration and report endpoints.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    AccountReportRequest, AgingReportRequest, ClearResponse, DeleteResponse, GetResponse,
    HealthResponse, PeriodReportRequest, PeriodReportResponse, SetRequest, SetResponse,
    StatsResponse,
};
use crate::report::{
    aggregate_by_bucket, aggregate_by_period, aging_report, trial_balance, LedgerLine,
    MonetaryRecord,
};

/// Application state shared across all handlers.
///
/// The cache is handed in rather than created globally, so each router (and
/// each test) gets its own isolated instance.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe report cache
    pub cache: Arc<RwLock<TtlCache>>,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: TtlCache) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(TtlCache::new(config.default_ttl()))
    }
}

/// Cache key under which a report is stored: `<scope>:<caller key>`.
///
/// The scope names the endpoint and any option that changes the response
/// shape, so one caller key never serves another report's payload.
fn report_key(scope: &str, cache_key: Option<&str>) -> Option<String> {
    cache_key.map(|key| format!("{}:{}", scope, key))
}

/// Serves `compute()` through the cache when a key is supplied.
///
/// The report is computed outside the lock; two requests racing on the same
/// key both compute and the last write wins.
async fn memoize<F>(
    state: &AppState,
    cache_key: Option<String>,
    ttl_secs: Option<u64>,
    compute: F,
) -> Result<Value>
where
    F: FnOnce() -> Result<Value>,
{
    let Some(key) = cache_key else {
        return compute();
    };
    let key = key.as_str();

    let cached = state.cache.write().await.get(key);
    if let Some(value) = cached {
        debug!(key, "report served from cache");
        return Ok(value);
    }

    let value = compute()?;

    let mut cache = state.cache.write().await;
    let ttl = ttl_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| cache.default_ttl());
    cache.set(key, value.clone(), ttl);
    debug!(key, ttl_secs = ttl.as_secs(), "report cached");

    Ok(value)
}

/// Handler for PUT /cache
///
/// Stores an arbitrary JSON payload with optional TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    let ttl = req
        .ttl
        .map(Duration::from_secs)
        .unwrap_or_else(|| cache.default_ttl());
    cache.set(req.key.clone(), req.value, ttl);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /cache/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: a stale entry is evicted on read
    let mut cache = state.cache.write().await;
    let value = cache
        .get(&key)
        .ok_or_else(|| AppError::NotFound(key.clone()))?;
    let ttl_remaining_ms = cache.ttl_remaining_ms(&key);

    Ok(Json(GetResponse::new(key, value, ttl_remaining_ms)))
}

/// Handler for DELETE /cache/:key
///
/// Forces the next report request for this key to recompute.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let removed = state.cache.write().await.delete(&key);
    if removed {
        info!(key = %key, "cache entry invalidated");
    }

    Json(DeleteResponse::new(key, removed))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.cache.write().await.clear();
    info!("Cache cleared: {} entries dropped", cleared);

    Json(ClearResponse::new(cleared))
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::from(cache.stats()))
}

/// Handler for POST /reports/aging
///
/// Buckets outstanding balances; returns the summary, or the full report with
/// per-record details when `detailed` is set.
pub async fn aging_report_handler(
    State(state): State<AppState>,
    Json(req): Json<AgingReportRequest>,
) -> Result<Json<Value>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }
    let as_of = req.as_of_date().map_err(AppError::InvalidRequest)?;
    let scope = if req.detailed { "aging-detailed" } else { "aging" };
    let cache_key = report_key(scope, req.cache_key.as_deref());

    let report = memoize(&state, cache_key, req.ttl, || -> Result<Value> {
        let records: Vec<MonetaryRecord> =
            req.records.iter().map(MonetaryRecord::from_json).collect();
        debug!(records = records.len(), %as_of, "computing aging report");

        if req.detailed {
            Ok(serde_json::to_value(aging_report(&records, as_of))?)
        } else {
            Ok(serde_json::to_value(aggregate_by_bucket(&records, as_of))?)
        }
    })
    .await?;

    Ok(Json(report))
}

/// Handler for POST /reports/accounts
pub async fn account_report_handler(
    State(state): State<AppState>,
    Json(req): Json<AccountReportRequest>,
) -> Result<Json<Value>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let cache_key = report_key("accounts", req.cache_key.as_deref());

    let report = memoize(&state, cache_key, req.ttl, || -> Result<Value> {
        let lines: Vec<LedgerLine> = req.lines.iter().map(LedgerLine::from_json).collect();
        debug!(lines = lines.len(), "computing trial balance");

        Ok(serde_json::to_value(trial_balance(&lines))?)
    })
    .await?;

    Ok(Json(report))
}

/// Handler for POST /reports/periods
pub async fn period_report_handler(
    State(state): State<AppState>,
    Json(req): Json<PeriodReportRequest>,
) -> Result<Json<Value>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }
    let period = req.period().map_err(AppError::InvalidRequest)?;
    let cache_key = report_key(&format!("periods:{}", period), req.cache_key.as_deref());

    let report = memoize(&state, cache_key, req.ttl, || -> Result<Value> {
        let records: Vec<MonetaryRecord> =
            req.records.iter().map(MonetaryRecord::from_json).collect();
        debug!(records = records.len(), %period, "computing period totals");

        Ok(serde_json::to_value(PeriodReportResponse {
            period,
            totals: aggregate_by_period(&records, period),
        })?)
    })
    .await?;

    Ok(Json(report))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
