//! The `{ok, result, error_code, description}` envelope every Bot API method returns.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub(crate) struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.ok {
            return Err(ApiError::Api {
                code: self.error_code,
                description: self
                    .description
                    .unwrap_or_else(|| "telegram returned ok=false without description".to_string()),
            });
        }
        self.result.ok_or(ApiError::MissingResult)
    }
}

/// Decode a response body. The envelope is parsed regardless of HTTP status, since the Bot API
/// reports failures as `ok: false` with a 4xx status.
pub(crate) fn decode<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, ApiError> {
    match serde_json::from_slice::<ApiResponse<T>>(body) {
        Ok(envelope) => envelope.into_result(),
        Err(e) if (200..300).contains(&status) => Err(ApiError::Json(e)),
        Err(_) => Err(ApiError::Status {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        }),
    }
}
