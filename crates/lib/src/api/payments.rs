//! Invoices, shipping and pre-checkout answers.

use serde::Serialize;
use serde_json::json;

use super::error::ApiError;
use super::params::{merge, ChatId, SendOptions};
use super::Api;
use crate::types::{LabeledPrice, Message, ShippingOption};

/// Required invoice fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvoiceParams {
    pub title: String,
    pub description: String,
    /// Bot-defined payload, not shown to the user.
    pub payload: String,
    pub provider_token: String,
    pub start_parameter: String,
    /// ISO 4217 code.
    pub currency: String,
    pub prices: Vec<LabeledPrice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SendInvoiceOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_name: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_phone_number: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_email: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_shipping_address: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_phone_number_to_provider: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_email_to_provider: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_flexible: Option<bool>,
    #[serde(flatten)]
    pub send: SendOptions,
}

impl Api {
    pub async fn send_invoice(
        &self,
        chat_id: impl Into<ChatId>,
        invoice: &InvoiceParams,
        options: &SendInvoiceOptions,
    ) -> Result<Message, ApiError> {
        if invoice.prices.is_empty() {
            return Err(ApiError::InvalidInput("invoice needs at least one price".into()));
        }
        let mut body = json!({ "chat_id": chat_id.into() });
        merge(&mut body, invoice)?;
        merge(&mut body, options)?;
        self.post("sendInvoice", &body).await
    }

    /// Reply to a shipping query. `Err(message)` rejects the order with a reason shown to the user.
    pub async fn answer_shipping_query(
        &self,
        shipping_query_id: &str,
        answer: Result<&[ShippingOption], &str>,
    ) -> Result<bool, ApiError> {
        let body = match answer {
            Ok(options) => json!({
                "shipping_query_id": shipping_query_id,
                "ok": true,
                "shipping_options": options,
            }),
            Err(reason) => json!({
                "shipping_query_id": shipping_query_id,
                "ok": false,
                "error_message": reason,
            }),
        };
        self.post("answerShippingQuery", &body).await
    }

    /// Confirm a checkout with `Ok(())` or refuse it with `Err(reason)`.
    pub async fn answer_pre_checkout_query(
        &self,
        pre_checkout_query_id: &str,
        answer: Result<(), &str>,
    ) -> Result<bool, ApiError> {
        let body = match answer {
            Ok(()) => json!({ "pre_checkout_query_id": pre_checkout_query_id, "ok": true }),
            Err(reason) => json!({
                "pre_checkout_query_id": pre_checkout_query_id,
                "ok": false,
                "error_message": reason,
            }),
        };
        self.post("answerPreCheckoutQuery", &body).await
    }
}
