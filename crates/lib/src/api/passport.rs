//! setPassportDataErrors.

use serde_json::json;

use super::error::ApiError;
use super::Api;
use crate::types::PassportElementError;

impl Api {
    /// Tell a user that some of the Passport elements they provided contain errors.
    pub async fn set_passport_data_errors(
        &self,
        user_id: i64,
        errors: &[PassportElementError],
    ) -> Result<bool, ApiError> {
        if errors.is_empty() {
            return Err(ApiError::InvalidInput("no passport errors given".into()));
        }
        let body = json!({ "user_id": user_id, "errors": errors });
        self.post("setPassportDataErrors", &body).await
    }
}
