use std::sync::Arc;

use market_core::{DateWindow, NewsSource, RetrievalOutcome};
use tracing::{info, warn};

/// Primary/fallback news lookup. The fallback provider is consulted only
/// after the primary comes back empty or fails; a non-empty primary answer
/// short-circuits. Provider errors never leave this type.
pub struct NewsRetriever {
    primary: Arc<dyn NewsSource>,
    fallback: Arc<dyn NewsSource>,
}

impl NewsRetriever {
    pub fn new(primary: Arc<dyn NewsSource>, fallback: Arc<dyn NewsSource>) -> Self {
        Self { primary, fallback }
    }

    pub async fn retrieve(&self, symbol: &str, window: &DateWindow) -> RetrievalOutcome {
        match self.primary.articles(symbol, window).await {
            Ok(articles) if !articles.is_empty() => return RetrievalOutcome::Found(articles),
            Ok(_) => info!(
                provider = self.primary.name(),
                symbol, "no articles from primary provider, trying fallback"
            ),
            Err(e) => warn!(
                provider = self.primary.name(),
                symbol,
                error = %e,
                "primary news provider failed, trying fallback"
            ),
        }

        match self.fallback.articles(symbol, window).await {
            Ok(articles) if !articles.is_empty() => RetrievalOutcome::Found(articles),
            Ok(_) => RetrievalOutcome::NotFound,
            Err(e) => {
                warn!(
                    provider = self.fallback.name(),
                    symbol,
                    error = %e,
                    "fallback news provider failed"
                );
                RetrievalOutcome::NotFound
            }
        }
    }
}
