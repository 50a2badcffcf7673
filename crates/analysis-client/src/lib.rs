//! Client side of the analysis proxy: fetches the raw report for a ticker
//! and turns it into a rendered [`AnalysisReport`].

use std::time::Duration;

use chrono::Local;
use report_core::{AnalysisReport, RawAnalysis, ReportError, ReportResult};
use report_render::build_report;
use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8888/api/gemini";

const UNKNOWN_SERVER_ERROR: &str = "An unknown server error occurred.";

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    ticker: &'a str,
}

#[derive(Clone)]
pub struct AnalysisServiceClient {
    client: reqwest::Client,
    endpoint: String,
}

impl AnalysisServiceClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// `ANALYSIS_API_URL` and `ANALYSIS_TIMEOUT_SECS` (default 180 s; grounded
    /// generation is slow).
    pub fn from_env() -> Self {
        let endpoint =
            std::env::var("ANALYSIS_API_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let timeout = std::env::var("ANALYSIS_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(180);

        Self::new(endpoint, Duration::from_secs(timeout))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask the proxy for the unrendered report payload.
    pub async fn fetch_raw(&self, ticker: &str) -> ReportResult<RawAnalysis> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&AnalyzeRequest { ticker })
            .send()
            .await
            .map_err(|e| ReportError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ReportError::Request(e.to_string()))?;

        if !status.is_success() {
            let message = server_error_message(status.as_u16(), &body);
            tracing::warn!(ticker, status = status.as_u16(), "Analysis request failed: {}", message);
            return Err(ReportError::Server {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| ReportError::InvalidResponse(e.to_string()))
    }

    /// Fetch and render the full report for `ticker`.
    pub async fn fetch_stock_analysis(&self, ticker: &str) -> ReportResult<AnalysisReport> {
        let raw = self.fetch_raw(ticker).await?;
        Ok(build_report(raw, Local::now().date_naive()))
    }
}

/// User-facing message for a failed proxy call: the body's `error` field when
/// present, a status line when the body is not JSON.
pub fn server_error_message(status: u16, body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => value
            .get("error")
            .and_then(Value::as_str)
            .filter(|e| !e.is_empty())
            .unwrap_or(UNKNOWN_SERVER_ERROR)
            .to_string(),
        Err(_) => format!("Server responded with status {status}"),
    }
}
