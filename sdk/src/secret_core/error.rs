use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SecretStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored secret is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("stored secret is truncated")]
    Truncated,
    #[error("failed to encode secret: {0}")]
    Codec(String),
    #[error("cryptography failure: {0}")]
    Crypto(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("master key unavailable: {0}")]
    Provider(String),
}
