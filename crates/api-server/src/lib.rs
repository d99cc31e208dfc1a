//! HTTP boundary for the stock spike/news correlation service.
//!
//! Parses query parameters, delegates to the price and news components,
//! and maps their outcomes to transport status codes. No business logic
//! lives here.

use std::sync::Arc;

use alphavantage_client::AlphaVantageClient;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use market_core::MarketError;
use news_retrieval::NewsRetriever;
use serde::Serialize;
use thenewsapi_client::TheNewsApiClient;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod news_routes;
mod stock_routes;

pub use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub price_history: Arc<AlphaVantageClient>,
    pub news: Arc<NewsRetriever>,
    pub anomaly_threshold: f64,
}

/// Uniform response envelope
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Errors leaving a handler, mapped to transport status codes. This mapping
/// is the entire boundary responsibility.
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Upstream(String),
    Internal(anyhow::Error),
}

impl From<MarketError> for AppError {
    fn from(err: MarketError) -> Self {
        match err {
            MarketError::InvalidInput(msg) => AppError::BadRequest(msg),
            MarketError::UpstreamUnavailable(msg) => AppError::Upstream(msg),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Upstream(msg) => {
                tracing::error!("upstream failure: {msg}");
                (StatusCode::BAD_GATEWAY, msg)
            }
            AppError::Internal(err) => {
                tracing::error!("internal error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(news_routes::get_news, stock_routes::detect_stock_changes),
    tags((name = "News"), (name = "Prices"))
)]
struct ApiDoc;

pub fn build_state(config: &Config) -> AppState {
    let alpha = Arc::new(AlphaVantageClient::new(
        config.alphavantage_api_key.clone(),
        config.provider_timeout,
        config.output_size,
    ));
    let the_news_api = Arc::new(TheNewsApiClient::new(
        config.thenewsapi_token.clone(),
        config.provider_timeout,
    ));

    AppState {
        price_history: alpha.clone(),
        news: Arc::new(NewsRetriever::new(alpha, the_news_api)),
        anomaly_threshold: config.anomaly_threshold,
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(news_routes::news_routes())
        .merge(stock_routes::stock_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    let state = build_state(&config);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("listening on {}", config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter()).init();
    }
}
