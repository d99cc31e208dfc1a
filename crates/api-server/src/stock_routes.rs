//! Price Anomaly Routes
//!
//! Endpoint for scanning a symbol's daily closes for notable day-over-day
//! moves inside an explicit date range.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use market_core::{AnomalyEvent, DateWindow, PriceHistorySource};
use serde::Deserialize;
use spike_detection::detect_spikes_and_dips;

use crate::{ApiResponse, AppError, AppState};

#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StockChangesQuery {
    /// Ticker symbol to scan
    pub stock_symbol: String,
    /// Start of the range, YYYY-MM-DD
    pub start_date: String,
    /// End of the range, YYYY-MM-DD
    pub end_date: String,
}

pub fn stock_routes() -> Router<AppState> {
    Router::new().route("/api/stock-changes", get(detect_stock_changes))
}

#[utoipa::path(
    get,
    path = "/api/stock-changes",
    params(StockChangesQuery),
    responses(
        (status = 200, description = "Day-over-day moves at or above the configured threshold"),
        (status = 400, description = "Missing or unparsable parameter"),
        (status = 502, description = "Price provider unavailable")
    ),
    tag = "Prices"
)]
pub(crate) async fn detect_stock_changes(
    State(state): State<AppState>,
    Query(query): Query<StockChangesQuery>,
) -> Result<Json<ApiResponse<Vec<AnomalyEvent>>>, AppError> {
    let symbol = query.stock_symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(AppError::BadRequest(
            "stockSymbol must not be empty".to_string(),
        ));
    }

    let start: NaiveDate = query.start_date.parse().map_err(|_| {
        AppError::BadRequest(format!(
            "startDate '{}' is not a valid calendar date",
            query.start_date
        ))
    })?;
    let end: NaiveDate = query.end_date.parse().map_err(|_| {
        AppError::BadRequest(format!(
            "endDate '{}' is not a valid calendar date",
            query.end_date
        ))
    })?;

    let window = DateWindow::between(start, end)?;

    let prices = state.price_history.daily_closes(&symbol, &window).await?;
    let events = detect_spikes_and_dips(&prices, state.anomaly_threshold)?;

    Ok(Json(ApiResponse::success(events)))
}
