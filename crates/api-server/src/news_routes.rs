//! News Lookup Routes
//!
//! Endpoint for retrieving news coverage of a symbol inside a date window
//! built around an anchor date.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use market_core::{DateWindow, NewsArticle, RetrievalOutcome};
use serde::Deserialize;

use crate::{ApiResponse, AppError, AppState};

#[derive(Deserialize, utoipa::IntoParams)]
pub struct NewsQuery {
    /// Ticker symbol to look up
    pub stock: String,
    /// Anchor date, YYYY-MM-DD
    pub date: String,
    /// Days on each side of the anchor date
    pub range: String,
}

pub fn news_routes() -> Router<AppState> {
    Router::new().route("/api/news", get(get_news))
}

#[utoipa::path(
    get,
    path = "/api/news",
    params(NewsQuery),
    responses(
        (status = 200, description = "Articles covering the symbol inside the window"),
        (status = 404, description = "No articles on either provider"),
        (status = 400, description = "Missing or unparsable parameter")
    ),
    tag = "News"
)]
pub(crate) async fn get_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<ApiResponse<Vec<NewsArticle>>>, AppError> {
    let symbol = query.stock.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(AppError::BadRequest(
            "stock symbol must not be empty".to_string(),
        ));
    }

    let anchor: NaiveDate = query.date.parse().map_err(|_| {
        AppError::BadRequest(format!(
            "date '{}' is not a valid calendar date",
            query.date
        ))
    })?;
    let range: i64 = query.range.parse().map_err(|_| {
        AppError::BadRequest(format!(
            "range '{}' is not a whole number of days",
            query.range
        ))
    })?;

    let window = DateWindow::around(anchor, range)?;

    match state.news.retrieve(&symbol, &window).await {
        RetrievalOutcome::Found(articles) => Ok(Json(ApiResponse::success(articles))),
        RetrievalOutcome::NotFound => Err(AppError::NotFound(format!(
            "no articles found for {symbol} between {} and {}",
            DateWindow::calendar_date(window.from_date()),
            DateWindow::calendar_date(window.to_date()),
        ))),
    }
}
