//! answerInlineQuery.

use serde::Serialize;
use serde_json::json;

use super::error::ApiError;
use super::params::merge;
use super::Api;
use crate::types::InlineQueryResult;

/// Upstream limit on results per answer.
pub const MAX_INLINE_RESULTS: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnswerInlineQueryOptions {
    /// Seconds the result may be cached server-side (upstream default 300).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_personal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_pm_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_pm_parameter: Option<String>,
}

/// Reject answers the Bot API would refuse before spending a request on them.
pub(crate) fn validate_results(results: &[InlineQueryResult]) -> Result<(), ApiError> {
    if results.len() > MAX_INLINE_RESULTS {
        return Err(ApiError::InvalidInput(format!(
            "at most {} inline results allowed, got {}",
            MAX_INLINE_RESULTS,
            results.len()
        )));
    }
    if let Some(pos) = results.iter().position(|r| r.id().is_empty()) {
        return Err(ApiError::InvalidInput(format!(
            "inline result {} ({}) has an empty id",
            pos,
            results[pos].type_tag()
        )));
    }
    Ok(())
}

impl Api {
    pub async fn answer_inline_query(
        &self,
        inline_query_id: &str,
        results: &[InlineQueryResult],
        options: &AnswerInlineQueryOptions,
    ) -> Result<bool, ApiError> {
        validate_results(results)?;
        let mut body = json!({ "inline_query_id": inline_query_id, "results": results });
        merge(&mut body, options)?;
        self.post("answerInlineQuery", &body).await
    }
}
