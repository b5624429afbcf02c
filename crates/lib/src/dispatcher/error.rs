//! Errors that end a dispatcher run.

use crate::api::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// getMe failed at startup.
    #[error("check api call failed: {0}")]
    ApiCheck(#[source] ApiError),
    #[error(transparent)]
    Api(#[from] ApiError),
    /// getUpdates failed; the polling loop has stopped.
    #[error("polling failed: {0}")]
    Polling(#[source] ApiError),
    #[error("invalid webhook url {url:?}: {reason}")]
    InvalidWebhookUrl { url: String, reason: String },
    #[error("webhook server failed: {0}")]
    Webhook(#[source] std::io::Error),
    /// A passive handler returned an error.
    #[error("{handler} handler: {error:#}")]
    Handler {
        handler: String,
        error: anyhow::Error,
    },
    /// An active processor returned an error. `index` counts from 1 in registration order.
    #[error("active processor #{index}: {error:#}")]
    Processor { index: usize, error: anyhow::Error },
}
