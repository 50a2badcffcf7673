use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Ticker symbol is required")]
    MissingTicker,

    #[error("API key is not configured on the server")]
    MissingApiKey,

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Non-success answer from the analysis proxy. `message` is shown to the user as-is.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
