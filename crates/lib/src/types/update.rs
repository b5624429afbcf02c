//! Inbound updates.
//!
//! On the wire an update is an object with `update_id` and exactly one payload field. It is
//! decoded into [`Update`] whose [`UpdateKind`] names the payload that was present.

use serde::{Deserialize, Serialize};

use super::inline::{ChosenInlineResult, InlineQuery};
use super::keyboard::CallbackQuery;
use super::media::{Poll, PollAnswer};
use super::message::Message;
use super::payments::{PreCheckoutQuery, ShippingQuery};

/// One inbound event. `update_id` is the polling cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawUpdate", into = "RawUpdate")]
pub struct Update {
    pub update_id: i64,
    pub kind: UpdateKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateKind {
    Message(Message),
    EditedMessage(Message),
    ChannelPost(Message),
    EditedChannelPost(Message),
    InlineQuery(InlineQuery),
    ChosenInlineResult(ChosenInlineResult),
    CallbackQuery(CallbackQuery),
    ShippingQuery(ShippingQuery),
    PreCheckoutQuery(PreCheckoutQuery),
    Poll(Poll),
    PollAnswer(PollAnswer),
    /// No payload this library knows about.
    Unknown,
}

impl UpdateKind {
    pub fn name(&self) -> &'static str {
        match self {
            UpdateKind::Message(_) => "message",
            UpdateKind::EditedMessage(_) => "edited_message",
            UpdateKind::ChannelPost(_) => "channel_post",
            UpdateKind::EditedChannelPost(_) => "edited_channel_post",
            UpdateKind::InlineQuery(_) => "inline_query",
            UpdateKind::ChosenInlineResult(_) => "chosen_inline_result",
            UpdateKind::CallbackQuery(_) => "callback_query",
            UpdateKind::ShippingQuery(_) => "shipping_query",
            UpdateKind::PreCheckoutQuery(_) => "pre_checkout_query",
            UpdateKind::Poll(_) => "poll",
            UpdateKind::PollAnswer(_) => "poll_answer",
            UpdateKind::Unknown => "unknown",
        }
    }
}

impl Update {
    pub fn message(&self) -> Option<&Message> {
        match &self.kind {
            UpdateKind::Message(m) => Some(m),
            _ => None,
        }
    }

    pub fn inline_query(&self) -> Option<&InlineQuery> {
        match &self.kind {
            UpdateKind::InlineQuery(q) => Some(q),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawUpdate {
    #[serde(default)]
    update_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    edited_message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    channel_post: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    edited_channel_post: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_query: Option<InlineQuery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    chosen_inline_result: Option<ChosenInlineResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    callback_query: Option<CallbackQuery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shipping_query: Option<ShippingQuery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pre_checkout_query: Option<PreCheckoutQuery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    poll: Option<Poll>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    poll_answer: Option<PollAnswer>,
}

impl From<RawUpdate> for Update {
    fn from(raw: RawUpdate) -> Self {
        let kind = if let Some(m) = raw.message {
            UpdateKind::Message(m)
        } else if let Some(m) = raw.edited_message {
            UpdateKind::EditedMessage(m)
        } else if let Some(m) = raw.channel_post {
            UpdateKind::ChannelPost(m)
        } else if let Some(m) = raw.edited_channel_post {
            UpdateKind::EditedChannelPost(m)
        } else if let Some(q) = raw.inline_query {
            UpdateKind::InlineQuery(q)
        } else if let Some(r) = raw.chosen_inline_result {
            UpdateKind::ChosenInlineResult(r)
        } else if let Some(q) = raw.callback_query {
            UpdateKind::CallbackQuery(q)
        } else if let Some(q) = raw.shipping_query {
            UpdateKind::ShippingQuery(q)
        } else if let Some(q) = raw.pre_checkout_query {
            UpdateKind::PreCheckoutQuery(q)
        } else if let Some(p) = raw.poll {
            UpdateKind::Poll(p)
        } else if let Some(a) = raw.poll_answer {
            UpdateKind::PollAnswer(a)
        } else {
            UpdateKind::Unknown
        };
        Update {
            update_id: raw.update_id,
            kind,
        }
    }
}

impl From<Update> for RawUpdate {
    fn from(update: Update) -> Self {
        let mut raw = RawUpdate {
            update_id: update.update_id,
            ..Default::default()
        };
        match update.kind {
            UpdateKind::Message(m) => raw.message = Some(m),
            UpdateKind::EditedMessage(m) => raw.edited_message = Some(m),
            UpdateKind::ChannelPost(m) => raw.channel_post = Some(m),
            UpdateKind::EditedChannelPost(m) => raw.edited_channel_post = Some(m),
            UpdateKind::InlineQuery(q) => raw.inline_query = Some(q),
            UpdateKind::ChosenInlineResult(r) => raw.chosen_inline_result = Some(r),
            UpdateKind::CallbackQuery(q) => raw.callback_query = Some(q),
            UpdateKind::ShippingQuery(q) => raw.shipping_query = Some(q),
            UpdateKind::PreCheckoutQuery(q) => raw.pre_checkout_query = Some(q),
            UpdateKind::Poll(p) => raw.poll = Some(p),
            UpdateKind::PollAnswer(a) => raw.poll_answer = Some(a),
            UpdateKind::Unknown => {}
        }
        raw
    }
}

/// Current webhook status, from getWebhookInfo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookInfo {
    /// Empty when no webhook is set.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub has_custom_certificate: bool,
    #[serde(default)]
    pub pending_update_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_updates: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_update_decodes() {
        let u: Update = serde_json::from_value(json!({
            "update_id": 123,
            "message": { "message_id": 7, "date": 0, "chat": { "id": 1, "type": "private" }, "text": "hi" }
        }))
        .unwrap();
        assert_eq!(u.update_id, 123);
        assert_eq!(u.message().map(|m| m.text()), Some("hi"));
        assert_eq!(u.kind.name(), "message");
    }

    #[test]
    fn inline_query_update_decodes() {
        let u: Update = serde_json::from_value(json!({
            "update_id": 5,
            "inline_query": { "id": "q1", "from": { "id": 9, "is_bot": false, "first_name": "a" }, "query": "cats", "offset": "" }
        }))
        .unwrap();
        assert_eq!(u.inline_query().map(|q| q.query.as_str()), Some("cats"));
        assert!(u.message().is_none());
    }

    #[test]
    fn missing_payload_is_unknown_and_missing_id_is_zero() {
        let u: Update = serde_json::from_value(json!({ "my_chat_member": {} })).unwrap();
        assert_eq!(u.update_id, 0);
        assert_eq!(u.kind, UpdateKind::Unknown);
    }

    #[test]
    fn encodes_back_to_single_payload_field() {
        let u: Update = serde_json::from_value(json!({
            "update_id": 2,
            "callback_query": { "id": "c", "from": { "id": 1, "first_name": "a" }, "chat_instance": "x", "data": "go" }
        }))
        .unwrap();
        let v = serde_json::to_value(&u).unwrap();
        assert_eq!(v["update_id"], 2);
        assert_eq!(v["callback_query"]["data"], "go");
        assert!(v.get("message").is_none());
    }
}
