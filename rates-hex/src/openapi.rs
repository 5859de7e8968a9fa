//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use rates_types::dto::{RateEntry, RateResponse, RatesPageResponse};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Rate of a currency recorded at midnight UTC of the given date
#[utoipa::path(
    get,
    path = "/rate/{currency_id}",
    tag = "rates",
    params(
        ("currency_id" = i64, Path, description = "NBRB currency identifier", example = 431),
        ("date" = String, Query, description = "Calendar date (YYYY-MM-DD)", example = "2024-05-02")
    ),
    responses(
        (status = 200, description = "Rate found", body = RateResponse),
        (status = 400, description = "Malformed currency ID or date"),
        (status = 404, description = "No rate for this currency and date"),
        (status = 500, description = "Storage error")
    )
)]
async fn get_rate() {}

/// Stored rates, ten per page, oldest first
#[utoipa::path(
    get,
    path = "/rates",
    tag = "rates",
    params(
        ("page" = u32, Query, description = "1-based page number", example = 1)
    ),
    responses(
        (status = 200, description = "One page of rates; totalPages and count are not computed and stay 0", body = RatesPageResponse),
        (status = 400, description = "Missing or invalid page"),
        (status = 500, description = "Storage error")
    )
)]
async fn list_rates() {}

/// OpenAPI documentation for the Rates API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Official Exchange Rates API",
        version = "1.0.0",
        description = "Daily official exchange rates ingested from the National Bank of the Republic of Belarus, stored as a time series.",
        license(name = "MIT"),
    ),
    paths(health, get_rate, list_rates),
    components(schemas(RateResponse, RateEntry, RatesPageResponse)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "rates", description = "Point-in-time and paginated rate queries"),
    )
)]
pub struct ApiDoc;
