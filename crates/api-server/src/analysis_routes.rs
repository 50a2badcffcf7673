//! Analysis Routes
//!
//! `POST /api/gemini` runs the text analysis and chart generation for one
//! ticker and returns the model's JSON report with `sources` and
//! `technicalChartImage` merged in.

use axum::{body::Bytes, extract::State, http::StatusCode, routing::post, Json, Router};
use gemini_client::clean_json_string;
use report_core::{MarketAnalyst, ReportError};
use serde::Deserialize;
use serde_json::Value;

use crate::{AppError, AppState};

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub ticker: Option<String>,
}

pub fn analysis_routes() -> Router<AppState> {
    Router::new().route(
        "/api/gemini",
        post(analyze_ticker).fallback(method_not_allowed),
    )
}

async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

async fn analyze_ticker(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let ticker = serde_json::from_slice::<AnalyzeRequest>(&body)
        .ok()
        .and_then(|req| req.ticker)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::bad_request(&ReportError::MissingTicker.to_string()))?;

    let analyst = state.analyst.as_ref().ok_or(ReportError::MissingApiKey)?;

    tracing::info!(ticker = %ticker, backend = analyst.backend_name(), "Generating analysis");
    let payload = run_analysis(analyst.as_ref(), &ticker).await?;

    Ok(Json(payload))
}

/// Run text and chart generation concurrently and merge them into one payload.
///
/// A chart failure is logged and reported as `null`; a text failure or
/// output that does not hold a JSON object fails the whole request.
pub async fn run_analysis(analyst: &dyn MarketAnalyst, ticker: &str) -> Result<Value, ReportError> {
    let (analysis, chart) = tokio::join!(
        analyst.generate_analysis(ticker),
        analyst.generate_chart(ticker)
    );

    let chart = chart.unwrap_or_else(|e| {
        tracing::warn!(ticker = %ticker, "Could not generate technical chart: {}", e);
        None
    });
    let analysis = analysis?;

    let mut payload = match serde_json::from_str::<Value>(clean_json_string(&analysis.text))? {
        Value::Object(map) => map,
        _ => {
            return Err(ReportError::InvalidResponse(
                "model output is not a JSON object".to_string(),
            ))
        }
    };

    payload.insert("sources".to_string(), serde_json::to_value(&analysis.sources)?);
    payload.insert(
        "technicalChartImage".to_string(),
        chart.map(Value::String).unwrap_or(Value::Null),
    );

    tracing::info!(
        ticker = %ticker,
        sources = analysis.sources.len(),
        "Analysis ready"
    );

    Ok(Value::Object(payload))
}
