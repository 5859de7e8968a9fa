//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::OpenApi;

use rates_types::{AppError, CurrencyId, RateReader, RateResponse, RatesPageResponse};

use crate::RateQueryService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<R: RateReader> {
    pub service: RateQueryService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Query string of `GET /rate/{currency_id}`.
#[derive(Debug, Deserialize)]
pub struct RateQuery {
    pub date: Option<String>,
}

/// Query string of `GET /rates`.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Get the rate of a currency at a date.
#[tracing::instrument(skip(state), fields(currency_id = %id))]
pub async fn get_rate<R: RateReader>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
    Query(query): Query<RateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let currency_id: CurrencyId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid currency ID".into()))?;

    let date = query
        .date
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("date query parameter is required".into()))?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest("Invalid date, expected YYYY-MM-DD".into()))?;

    let rate = state.service.get_rate(currency_id, date).await?;
    Ok(Json(RateResponse::from(rate)))
}

/// List rates page by page.
#[tracing::instrument(skip(state))]
pub async fn list_rates<R: RateReader>(
    State(state): State<Arc<AppState<R>>>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page: u32 = query
        .page
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("page query parameter is required".into()))?
        .parse()
        .map_err(|_| AppError::BadRequest("page must be a positive integer".into()))?;

    let rates = state.service.list_rates(page).await?;
    Ok(Json(RatesPageResponse::new(page, rates)))
}
