use report_core::ReportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Gemini returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("API key is not configured")]
    MissingApiKey,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type GeminiResult<T> = Result<T, GeminiError>;

impl From<GeminiError> for ReportError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::MissingApiKey => ReportError::MissingApiKey,
            GeminiError::InvalidResponse(msg) => ReportError::InvalidResponse(msg),
            GeminiError::Serialization(e) => ReportError::Serialization(e),
            other => ReportError::Upstream(other.to_string()),
        }
    }
}
