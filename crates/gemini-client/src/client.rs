use async_trait::async_trait;
use reqwest::Client;
use report_core::{GroundedAnalysis, MarketAnalyst, ReportResult};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{GeminiError, GeminiResult};
use crate::parse::extract_sources;
use crate::prompts::{analysis_prompt, chart_prompt};
use crate::types::{GenerateContentRequest, GenerateContentResponse, PredictRequest, PredictResponse};
use crate::GeminiConfig;

/// Client for the grounded text model and the image model.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    pub fn from_env() -> GeminiResult<Self> {
        Ok(Self::new(GeminiConfig::from_env()?))
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.base_url.trim_end_matches('/'),
            model,
            method
        )
    }

    async fn post<B, R>(&self, url: &str, body: &B) -> GeminiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<R>().await?)
    }

    /// Run a prompt with Google Search grounding and collect the cited sources.
    pub async fn generate_grounded_text(&self, prompt: &str) -> GeminiResult<GroundedAnalysis> {
        let url = self.model_url(&self.config.text_model, "generateContent");
        let response: GenerateContentResponse = self
            .post(&url, &GenerateContentRequest::grounded(prompt))
            .await?;

        let text = response
            .text()
            .ok_or_else(|| GeminiError::InvalidResponse("model returned no candidates".into()))?;
        let sources = extract_sources(response.grounding_chunks());

        tracing::debug!(
            model = %self.config.text_model,
            chars = text.len(),
            sources = sources.len(),
            "Grounded generation finished"
        );

        Ok(GroundedAnalysis { text, sources })
    }

    /// Generate one PNG image; `None` when the model produced nothing.
    pub async fn generate_image(&self, prompt: &str) -> GeminiResult<Option<String>> {
        let url = self.model_url(&self.config.image_model, "predict");
        let response: PredictResponse = self.post(&url, &PredictRequest::chart(prompt)).await?;
        Ok(response.first_image())
    }
}

#[async_trait]
impl MarketAnalyst for GeminiClient {
    async fn generate_analysis(&self, ticker: &str) -> ReportResult<GroundedAnalysis> {
        Ok(self.generate_grounded_text(&analysis_prompt(ticker)).await?)
    }

    async fn generate_chart(&self, ticker: &str) -> ReportResult<Option<String>> {
        Ok(self.generate_image(&chart_prompt(ticker)).await?)
    }

    fn backend_name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_urls() {
        let mut config = GeminiConfig::new("key");
        config.base_url = "http://localhost:9000/v1beta/".to_string();
        let client = GeminiClient::new(config);

        assert_eq!(
            client.model_url("gemini-2.5-flash", "generateContent"),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            client.model_url("imagen-4.0-generate-001", "predict"),
            "http://localhost:9000/v1beta/models/imagen-4.0-generate-001:predict"
        );
    }

    #[test]
    fn test_backend_name() {
        let client = GeminiClient::new(GeminiConfig::new("key"));
        assert_eq!(client.backend_name(), "gemini");
    }
}
