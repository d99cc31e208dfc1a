use async_trait::async_trait;

use crate::{DateWindow, MarketError, NewsArticle, PricePoint};

/// Trait for daily close history providers
#[async_trait]
pub trait PriceHistorySource: Send + Sync {
    /// Daily closes inside `window`, ascending by date. An empty result means
    /// the provider had no sessions intersecting the window; fetch failures
    /// surface as `UpstreamUnavailable`.
    async fn daily_closes(
        &self,
        symbol: &str,
        window: &DateWindow,
    ) -> Result<Vec<PricePoint>, MarketError>;
}

/// Trait for news article providers
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Provider name used in log lines
    fn name(&self) -> &'static str;

    async fn articles(
        &self,
        symbol: &str,
        window: &DateWindow,
    ) -> Result<Vec<NewsArticle>, MarketError>;
}
