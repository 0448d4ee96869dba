use thiserror::Error;

/// Errors raised while talking to the generative model
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("Gemini API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Gemini rate limited, retry after {retry_after:?}s")]
    RateLimited { retry_after: Option<u64> },

    #[error("Gemini API key is not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Model returned no usable content: {0}")]
    EmptyResponse(String),

    #[error("Model output did not match the expected shape: {0}")]
    MalformedOutput(String),

    #[error("Model kept calling tools after {0} rounds")]
    ToolLoopExhausted(usize),
}

/// Result type alias for advisor operations
pub type AdvisorResult<T> = Result<T, AdvisorError>;
