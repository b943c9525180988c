use thiserror::Error;

/// Failure of an AI studio submission
#[derive(Debug, Error)]
pub enum AiError {
    #[error("a reference image is required for this mode")]
    MissingReferenceImage,

    #[error("unsupported image: {0}")]
    UnsupportedImage(String),

    #[error("a request is already in progress")]
    Busy,

    #[error("API key not set (environment variable {0})")]
    MissingApiKey(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("operation failed: {0}")]
    Operation(String),

    #[error("{0}")]
    EmptyPayload(&'static str),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("background task ended without a result")]
    TaskDropped,

    #[error("malformed data URI")]
    InvalidDataUri,
}

impl AiError {
    /// Detected before any network call
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AiError::MissingReferenceImage | AiError::UnsupportedImage(_) | AiError::Busy
        )
    }
}
