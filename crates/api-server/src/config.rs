use std::env;
use std::time::Duration;

use alphavantage_client::OutputSize;
use anyhow::{Context, Result};

/// Process-wide configuration, loaded once at startup and immutable after.
/// Provider credentials are injected into the clients at construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub alphavantage_api_key: String,
    pub thenewsapi_token: String,
    /// Per-provider-call timeout
    pub provider_timeout: Duration,
    /// Minimum absolute day-over-day move, in percent
    pub anomaly_threshold: f64,
    /// Daily series depth requested from Alpha Vantage
    pub output_size: OutputSize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let provider_timeout_secs: u64 = env::var("PROVIDER_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("PROVIDER_TIMEOUT_SECONDS must be a whole number of seconds")?;

        Ok(Self {
            listen_addr: env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            alphavantage_api_key: env::var("ALPHAVANTAGE_API_KEY")
                .context("ALPHAVANTAGE_API_KEY must be set")?,
            thenewsapi_token: env::var("THENEWSAPI_TOKEN")
                .context("THENEWSAPI_TOKEN must be set")?,
            provider_timeout: Duration::from_secs(provider_timeout_secs),
            anomaly_threshold: env::var("ANOMALY_THRESHOLD")
                .unwrap_or_else(|_| spike_detection::DEFAULT_THRESHOLD.to_string())
                .parse()
                .context("ANOMALY_THRESHOLD must be a number")?,
            output_size: match env::var("ALPHAVANTAGE_OUTPUT_SIZE").as_deref() {
                Ok("full") => OutputSize::Full,
                _ => OutputSize::Compact,
            },
        })
    }
}
