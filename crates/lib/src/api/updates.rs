//! Identity, update retrieval and webhook registration.

use serde::Serialize;
use serde_json::json;

use super::error::ApiError;
use super::params::merge;
use super::Api;
use crate::types::{InputFile, Update, User, WebhookInfo};

/// getUpdates parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GetUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// 1-100, upstream default 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Long-poll timeout in seconds. 0 means short polling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_updates: Vec<String>,
}

/// setWebhook options. A certificate upload switches the request to multipart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SetWebhookOptions {
    #[serde(skip)]
    pub certificate: Option<InputFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// 1-100, upstream default 40.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_updates: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_pending_updates: Option<bool>,
    /// Sent back by Telegram in the `X-Telegram-Bot-Api-Secret-Token` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_token: Option<String>,
}

impl Api {
    /// getMe: the bot's own user. Also used as a credentials check.
    pub async fn get_me(&self) -> Result<User, ApiError> {
        self.get("getMe").await
    }

    /// logOut from the cloud Bot API server before moving to a local one.
    pub async fn log_out(&self) -> Result<bool, ApiError> {
        self.post("logOut", &json!({})).await
    }

    /// close the bot instance before moving it between local servers.
    pub async fn close(&self) -> Result<bool, ApiError> {
        self.post("close", &json!({})).await
    }

    pub async fn get_updates(&self, params: &GetUpdates) -> Result<Vec<Update>, ApiError> {
        let body = serde_json::to_value(params)?;
        self.post("getUpdates", &body).await
    }

    pub async fn set_webhook(&self, url: &str, options: &SetWebhookOptions) -> Result<bool, ApiError> {
        let mut body = json!({ "url": url });
        merge(&mut body, options)?;
        match &options.certificate {
            Some(cert) => {
                self.post_files("setWebhook", body, &[("certificate", cert)], &[])
                    .await
            }
            None => self.post("setWebhook", &body).await,
        }
    }

    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<bool, ApiError> {
        let mut body = json!({});
        if drop_pending_updates {
            body["drop_pending_updates"] = json!(true);
        }
        self.post("deleteWebhook", &body).await
    }

    pub async fn get_webhook_info(&self) -> Result<WebhookInfo, ApiError> {
        self.get("getWebhookInfo").await
    }
}
