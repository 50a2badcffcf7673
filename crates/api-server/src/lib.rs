//! Analysis proxy
//!
//! Keeps the model API key on the server: clients post a ticker, the proxy
//! asks the hosted models for the analysis and chart, and returns the raw
//! report payload as JSON.

pub mod analysis_routes;
pub mod middleware;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use gemini_client::{GeminiClient, GeminiError};
use report_core::MarketAnalyst;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use analysis_routes::analysis_routes;

/// Shared handler state.
///
/// `analyst` is `None` when no API key was configured; the server still
/// starts and answers analysis requests with a configuration error.
#[derive(Clone, Default)]
pub struct AppState {
    pub analyst: Option<Arc<dyn MarketAnalyst>>,
}

impl AppState {
    pub fn new(analyst: Arc<dyn MarketAnalyst>) -> Self {
        Self {
            analyst: Some(analyst),
        }
    }

    /// Build state from the environment, logging instead of failing when the
    /// model API key is absent.
    pub fn from_env() -> Self {
        match GeminiClient::from_env() {
            Ok(client) => {
                tracing::info!("Gemini analyst configured");
                Self::new(Arc::new(client))
            }
            Err(GeminiError::MissingApiKey) => {
                tracing::warn!("API_KEY not set; analysis requests will fail until it is configured");
                Self::default()
            }
            Err(e) => {
                tracing::error!("Failed to configure Gemini analyst: {}", e);
                Self::default()
            }
        }
    }
}

/// Error returned from handlers, rendered as `{"error": "..."}`.
pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
}

impl AppError {
    pub fn with_status(status: StatusCode, error: impl Into<anyhow::Error>) -> Self {
        Self {
            status,
            error: error.into(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, anyhow::anyhow!(message.to_string()))
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("Request failed: {:#}", self.error);
        }
        (self.status, Json(json!({ "error": self.error.to_string() }))).into_response()
    }
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let backend = state
        .analyst
        .as_ref()
        .map(|a| a.backend_name())
        .unwrap_or("unconfigured");
    Json(json!({ "status": "ok", "backend": backend }))
}

/// Full application router with middleware applied.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .merge(analysis_routes())
        .layer(axum::middleware::from_fn(middleware::security_headers_middleware))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(middleware::make_request_span))
        .layer(cors)
        .with_state(state)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logging {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8888);
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    let state = AppState::from_env();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Analysis proxy listening on {}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
