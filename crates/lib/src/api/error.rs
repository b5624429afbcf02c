//! Errors returned by Bot API calls.

/// Failure of one Bot API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("telegram request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// `ok: false` envelope. Displays as the upstream description.
    #[error("{description}")]
    Api {
        code: Option<i64>,
        description: String,
    },
    #[error("telegram http status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("telegram response decode failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("telegram response has ok=true but no result")]
    MissingResult,
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    /// Upstream error code (e.g. 401, 409) for `ok: false` and HTTP status errors.
    pub fn code(&self) -> Option<i64> {
        match self {
            ApiError::Api { code, .. } => *code,
            ApiError::Status { status, .. } => Some(i64::from(*status)),
            _ => None,
        }
    }
}
