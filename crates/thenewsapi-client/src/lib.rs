use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use market_core::{DateWindow, MarketError, NewsArticle, NewsSource};
use reqwest::Client;
use serde::Deserialize;

const BASE_URL: &str = "https://api.thenewsapi.com/v1/news/all";

#[derive(Clone)]
pub struct TheNewsApiClient {
    api_token: String,
    client: Client,
}

impl TheNewsApiClient {
    pub fn new(api_token: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { api_token, client }
    }
}

#[async_trait]
impl NewsSource for TheNewsApiClient {
    fn name(&self) -> &'static str {
        "thenewsapi"
    }

    async fn articles(
        &self,
        symbol: &str,
        window: &DateWindow,
    ) -> Result<Vec<NewsArticle>, MarketError> {
        let published_after = DateWindow::calendar_date(window.from_date());
        let published_before = DateWindow::calendar_date(window.to_date());

        let response = self
            .client
            .get(BASE_URL)
            .query(&[
                ("api_token", self.api_token.as_str()),
                ("search", symbol),
                ("published_after", &published_after),
                ("published_before", &published_before),
                ("language", "en"),
            ])
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

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| MarketError::UpstreamUnavailable(e.to_string()))?;

        Ok(body.data.into_iter().map(normalize_record).collect())
    }
}

fn normalize_record(record: ArticleRecord) -> NewsArticle {
    let published_at = record.published_at.as_deref().and_then(|raw| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    });

    NewsArticle {
        title: record.title,
        description: record.description,
        url: record.url,
        published_at,
    }
}

// Response structures

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<ArticleRecord>,
}

#[derive(Debug, Deserialize)]
struct ArticleRecord {
    title: String,
    #[serde(default)]
    description: Option<String>,
    url: String,
    #[serde(default)]
    published_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_search_response_normalization() {
        let raw = r#"{
            "meta": { "found": 2, "returned": 2 },
            "data": [
                {
                    "title": "Tesla beats delivery estimates",
                    "description": "Quarterly deliveries came in ahead of consensus.",
                    "url": "https://news.example.com/tesla-deliveries",
                    "published_at": "2024-01-03T14:22:00.000000Z"
                },
                {
                    "title": "Minimal record",
                    "url": "https://news.example.com/minimal"
                }
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(raw).unwrap();

        let articles: Vec<NewsArticle> =
            response.data.into_iter().map(normalize_record).collect();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "Tesla beats delivery estimates");
        assert_eq!(
            articles[0].published_at.unwrap().date_naive(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
        assert!(articles[1].description.is_none());
        assert!(articles[1].published_at.is_none());
    }

    #[test]
    fn test_missing_data_defaults_to_empty() {
        let response: SearchResponse =
            serde_json::from_str(r#"{ "meta": { "found": 0 } }"#).unwrap();

        assert!(response.data.is_empty());
    }

    #[test]
    fn test_unparsable_timestamp_degrades_to_none() {
        let record = ArticleRecord {
            title: "t".to_string(),
            description: None,
            url: "https://example.com".to_string(),
            published_at: Some("yesterday".to_string()),
        };

        assert!(normalize_record(record).published_at.is_none());
    }
}
