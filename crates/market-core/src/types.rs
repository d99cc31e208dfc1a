use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Single daily close for a symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// One flagged day-over-day move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyEvent {
    pub date: NaiveDate,
    /// Percentage change rounded to two decimals
    pub change_pct: f64,
    pub previous_close: f64,
    pub current_close: f64,
}

/// Provider-agnostic news article. Every upstream record is normalized to
/// this shape before leaving a provider crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub published_at: Option<DateTime<Utc>>,
}

/// Result of a news lookup across providers. Absence of articles is explicit,
/// never an empty success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RetrievalOutcome {
    Found(Vec<NewsArticle>),
    NotFound,
}
