use thiserror::Error;

/// Errors returned by [crate::aptos::AptosClient].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RestError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("fullnode returned {status}: {message}")]
    Api {
        status: u16,
        message: String,
        error_code: Option<String>,
    },
    #[error("indexer query failed: {0}")]
    GraphQl(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl RestError {
    /// Whether the fullnode reported that the requested item does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RestError::Api { status: 404, .. })
    }
}

impl From<serde_json::Error> for RestError {
    fn from(e: serde_json::Error) -> Self {
        RestError::Decode(e.to_string())
    }
}
