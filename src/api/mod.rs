//! API Module
//!
//! HTTP handlers and routing for the report service.
//!
//! # Endpoints
//! - `PUT /cache` - Store a JSON payload
//! - `GET /cache/:key` - Retrieve a live payload
//! - `DELETE /cache/:key` - Invalidate one key
//! - `DELETE /cache` - Invalidate everything
//! - `GET /cache/stats` - Cache statistics
//! - `POST /reports/aging` - Aging buckets for invoices or bills
//! - `POST /reports/accounts` - Per-account trial balance
//! - `POST /reports/periods` - Amount totals per day, month or year
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
