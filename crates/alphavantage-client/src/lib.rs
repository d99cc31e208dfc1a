use std::collections::BTreeMap;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use market_core::{
    DateWindow, MarketError, NewsArticle, NewsSource, PriceHistorySource, PricePoint, TimeOfDay,
};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Whether to request the provider's capped recent window (~100 sessions)
/// or the full daily history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSize {
    Compact,
    Full,
}

impl OutputSize {
    fn as_param(self) -> &'static str {
        match self {
            OutputSize::Compact => "compact",
            OutputSize::Full => "full",
        }
    }
}

/// Sliding-window rate limiter: at most `max_requests` per `window` duration.
#[derive(Clone)]
struct RateLimiter {
    history: Arc<Mutex<VecDeque<Instant>>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            history: Arc::new(Mutex::new(VecDeque::new())),
            max_requests,
            window,
        }
    }

    async fn acquire(&self) {
        loop {
            let mut history = self.history.lock().await;
            let now = Instant::now();

            // Drop timestamps that have left the window
            while history
                .front()
                .is_some_and(|&t| now.duration_since(t) >= self.window)
            {
                history.pop_front();
            }

            if history.len() < self.max_requests {
                history.push_back(now);
                return;
            }

            // Wait until the oldest request falls out of the window
            let oldest = history.front().copied().unwrap_or(now);
            drop(history);
            tracing::debug!("rate limit reached, waiting for an Alpha Vantage slot");
            tokio::time::sleep_until(oldest + self.window).await;
        }
    }
}

#[derive(Clone)]
pub struct AlphaVantageClient {
    api_key: String,
    client: Client,
    output_size: OutputSize,
    rate_limiter: RateLimiter,
}

impl AlphaVantageClient {
    /// `timeout` bounds every provider call; a slow upstream surfaces as
    /// `UpstreamUnavailable` instead of stalling the request.
    pub fn new(api_key: String, timeout: Duration, output_size: OutputSize) -> Self {
        // Free tier allows 5 req/min. Paid plans can raise this.
        let rate_limit: usize = std::env::var("ALPHAVANTAGE_RATE_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_key,
            client,
            output_size,
            rate_limiter: RateLimiter::new(rate_limit, Duration::from_secs(60)),
        }
    }

    async fn get_json(&self, query: &[(&str, &str)]) -> Result<serde_json::Value, MarketError> {
        self.rate_limiter.acquire().await;

        let response = self
            .client
            .get(BASE_URL)
            .query(query)
            .send()
            .await
            .map_err(|e| MarketError::UpstreamUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MarketError::UpstreamUnavailable(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| MarketError::UpstreamUnavailable(e.to_string()))?;

        check_soft_error(&body)?;
        Ok(body)
    }
}

/// Alpha Vantage reports failures inside a 200 body rather than via status
/// codes; surface those as upstream failures.
fn check_soft_error(body: &serde_json::Value) -> Result<(), MarketError> {
    if let Some(error) = body.get("Error Message") {
        return Err(MarketError::UpstreamUnavailable(format!(
            "Alpha Vantage error: {error}"
        )));
    }

    if let Some(note) = body.get("Note") {
        return Err(MarketError::UpstreamUnavailable(format!(
            "Alpha Vantage rate limit: {note}"
        )));
    }

    if let Some(info) = body.get("Information") {
        return Err(MarketError::UpstreamUnavailable(format!(
            "Alpha Vantage notice: {info}"
        )));
    }

    Ok(())
}

#[async_trait]
impl PriceHistorySource for AlphaVantageClient {
    async fn daily_closes(
        &self,
        symbol: &str,
        window: &DateWindow,
    ) -> Result<Vec<PricePoint>, MarketError> {
        let body = self
            .get_json(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol),
                ("outputsize", self.output_size.as_param()),
                ("apikey", &self.api_key),
            ])
            .await?;

        let response: DailySeriesResponse = serde_json::from_value(body)
            .map_err(|e| MarketError::UpstreamUnavailable(e.to_string()))?;

        let Some(series) = response.series else {
            return Err(MarketError::UpstreamUnavailable(
                "daily series missing from response".to_string(),
            ));
        };

        Ok(filter_daily_series(series, window))
    }
}

/// Keep the entries inside the window, take the close field, sort ascending.
/// The provider keys the series by date string and gives no ordering guarantee.
fn filter_daily_series(
    series: BTreeMap<String, DailyBar>,
    window: &DateWindow,
) -> Vec<PricePoint> {
    let mut points: Vec<PricePoint> = series
        .into_iter()
        .filter_map(|(date, bar)| {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").ok()?;
            let close = bar.close.parse::<f64>().ok()?;
            window.contains(date).then_some(PricePoint { date, close })
        })
        .collect();

    points.sort_by_key(|p| p.date);
    points
}

#[async_trait]
impl NewsSource for AlphaVantageClient {
    fn name(&self) -> &'static str {
        "alphavantage"
    }

    async fn articles(
        &self,
        symbol: &str,
        window: &DateWindow,
    ) -> Result<Vec<NewsArticle>, MarketError> {
        let time_from = DateWindow::compact_timestamp(window.from_date(), TimeOfDay::Start);
        let time_to = DateWindow::compact_timestamp(window.to_date(), TimeOfDay::End);

        let body = self
            .get_json(&[
                ("function", "NEWS_SENTIMENT"),
                ("tickers", symbol),
                ("time_from", &time_from),
                ("time_to", &time_to),
                ("apikey", &self.api_key),
            ])
            .await?;

        let response: NewsFeedResponse = serde_json::from_value(body)
            .map_err(|e| MarketError::UpstreamUnavailable(e.to_string()))?;

        // A missing feed means no coverage, not a failure
        Ok(response.feed.into_iter().map(normalize_feed_item).collect())
    }
}

fn normalize_feed_item(item: FeedItem) -> NewsArticle {
    let published_at = item
        .time_published
        .as_deref()
        .and_then(parse_compact_timestamp);

    NewsArticle {
        title: item.title,
        description: item.summary,
        url: item.url,
        published_at,
    }
}

/// Feed timestamps come back in the same `YYYYMMDDTHHMMSS` shape the request
/// window uses; an unparsable one degrades to `None` rather than dropping the
/// article.
fn parse_compact_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y%m%dT%H%M%S")
        .ok()
        .map(|dt| dt.and_utc())
}

// Response structures

#[derive(Debug, Deserialize)]
struct DailySeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    series: Option<BTreeMap<String, DailyBar>>,
}

#[derive(Debug, Deserialize)]
struct DailyBar {
    #[serde(rename = "4. close")]
    close: String,
}

#[derive(Debug, Deserialize)]
struct NewsFeedResponse {
    #[serde(default)]
    feed: Vec<FeedItem>,
}

#[derive(Debug, Deserialize)]
struct FeedItem {
    title: String,
    url: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    time_published: Option<String>,
}
