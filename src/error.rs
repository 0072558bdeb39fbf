use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
    #[error("request failed")]
    Request(#[source] reqwest::Error),
    #[error("response is not text (content-type: {0})")]
    NotText(String),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed")]
    Request(#[from] reqwest::Error),
    #[error("search provider answered with status {0}")]
    Status(u16),
    #[error("could not obtain a video search token")]
    MissingToken,
    #[error("unexpected search response")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("model request failed")]
    Request(#[from] reqwest::Error),
    #[error("model api error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("model returned no text")]
    EmptyResponse,
}

/// Why a model-produced quiz could not be used.
#[derive(Debug, Error)]
pub enum QuizParseError {
    #[error("quiz text is empty")]
    Empty,
    #[error("quiz is not a valid JSON question array: {0}")]
    Json(#[from] serde_json::Error),
}
