use async_trait::async_trait;

use crate::{GroundedAnalysis, ReportResult};

/// Backend that writes the analysis for a ticker.
///
/// The proxy runs both calls concurrently; a chart failure must not sink the
/// text analysis, so callers treat `generate_chart` errors as "no chart".
#[async_trait]
pub trait MarketAnalyst: Send + Sync {
    /// Grounded long-form analysis. The text is expected to hold a JSON object,
    /// possibly wrapped in a fenced block or surrounded by prose.
    async fn generate_analysis(&self, ticker: &str) -> ReportResult<GroundedAnalysis>;

    /// Base64-encoded PNG chart, or `None` when the model returned no image.
    async fn generate_chart(&self, ticker: &str) -> ReportResult<Option<String>>;

    fn backend_name(&self) -> &'static str;
}
