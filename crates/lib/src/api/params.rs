//! Parameter types shared by many Bot API methods.

use serde::Serialize;
use serde_json::Value;

use super::error::ApiError;
use crate::types::{
    ForceReply, InlineKeyboardMarkup, MessageEntity, ParseMode, ReplyKeyboardMarkup,
    ReplyKeyboardRemove,
};

/// Target chat: numeric id or `@channelusername`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        ChatId::Id(id)
    }
}

impl From<&str> for ChatId {
    fn from(s: &str) -> Self {
        match s.parse::<i64>() {
            Ok(id) => ChatId::Id(id),
            Err(_) => ChatId::Username(s.to_string()),
        }
    }
}

impl From<String> for ChatId {
    fn from(s: String) -> Self {
        ChatId::from(s.as_str())
    }
}

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatId::Id(id) => write!(f, "{}", id),
            ChatId::Username(name) => f.write_str(name),
        }
    }
}

/// Any of the keyboard markups a sent message may carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    InlineKeyboard(InlineKeyboardMarkup),
    ReplyKeyboard(ReplyKeyboardMarkup),
    Remove(ReplyKeyboardRemove),
    ForceReply(ForceReply),
}

impl From<InlineKeyboardMarkup> for ReplyMarkup {
    fn from(m: InlineKeyboardMarkup) -> Self {
        ReplyMarkup::InlineKeyboard(m)
    }
}

impl From<ReplyKeyboardMarkup> for ReplyMarkup {
    fn from(m: ReplyKeyboardMarkup) -> Self {
        ReplyMarkup::ReplyKeyboard(m)
    }
}

impl From<ReplyKeyboardRemove> for ReplyMarkup {
    fn from(m: ReplyKeyboardRemove) -> Self {
        ReplyMarkup::Remove(m)
    }
}

impl From<ForceReply> for ReplyMarkup {
    fn from(m: ForceReply) -> Self {
        ReplyMarkup::ForceReply(m)
    }
}

/// Delivery options common to every send method.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SendOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_sending_without_reply: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

impl SendOptions {
    pub fn reply_to(message_id: i64) -> Self {
        Self {
            reply_to_message_id: Some(message_id),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SendMessageOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<MessageEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_web_page_preview: Option<bool>,
    #[serde(flatten)]
    pub send: SendOptions,
}

/// Options for the file-bearing send methods. Fields a method does not accept are ignored upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SendMediaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub caption_entities: Vec<MessageEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    /// Video note diameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_streaming: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_content_type_detection: Option<bool>,
    #[serde(flatten)]
    pub send: SendOptions,
}

impl SendMediaOptions {
    pub fn caption(caption: impl Into<String>) -> Self {
        Self {
            caption: Some(caption.into()),
            ..Default::default()
        }
    }
}

/// Identifies an edited message: either a chat message or an inline message.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageTarget {
    Chat { chat_id: ChatId, message_id: i64 },
    Inline { inline_message_id: String },
}

impl MessageTarget {
    pub fn chat(chat_id: impl Into<ChatId>, message_id: i64) -> Self {
        MessageTarget::Chat {
            chat_id: chat_id.into(),
            message_id,
        }
    }

    pub fn inline(inline_message_id: impl Into<String>) -> Self {
        MessageTarget::Inline {
            inline_message_id: inline_message_id.into(),
        }
    }

    pub(crate) fn to_body(&self) -> Value {
        match self {
            MessageTarget::Chat {
                chat_id,
                message_id,
            } => serde_json::json!({ "chat_id": chat_id, "message_id": message_id }),
            MessageTarget::Inline { inline_message_id } => {
                serde_json::json!({ "inline_message_id": inline_message_id })
            }
        }
    }
}

/// Merge the fields of an options struct into a JSON request body.
pub(crate) fn merge<T: Serialize>(body: &mut Value, options: &T) -> Result<(), ApiError> {
    let Value::Object(extra) = serde_json::to_value(options)? else {
        return Ok(());
    };
    if let Value::Object(map) = body {
        for (k, v) in extra {
            if !v.is_null() {
                map.insert(k, v);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InlineKeyboardButton;
    use serde_json::json;

    #[test]
    fn chat_id_parses_numbers_and_usernames() {
        assert_eq!(ChatId::from("-100123"), ChatId::Id(-100123));
        assert_eq!(ChatId::from("@news"), ChatId::Username("@news".into()));
        assert_eq!(serde_json::to_value(ChatId::Id(5)).unwrap(), json!(5));
    }

    #[test]
    fn merge_flattens_send_options_and_skips_unset() {
        let mut body = json!({ "chat_id": 1, "text": "hi" });
        let opts = SendMessageOptions {
            parse_mode: Some(ParseMode::Html),
            send: SendOptions {
                reply_to_message_id: Some(9),
                reply_markup: Some(
                    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback("a", "b")]])
                        .into(),
                ),
                ..Default::default()
            },
            ..Default::default()
        };
        merge(&mut body, &opts).unwrap();
        assert_eq!(body["parse_mode"], "HTML");
        assert_eq!(body["reply_to_message_id"], 9);
        assert_eq!(body["reply_markup"]["inline_keyboard"][0][0]["callback_data"], "b");
        assert!(body.get("disable_notification").is_none());
        assert!(body.get("entities").is_none());
    }

    #[test]
    fn target_bodies() {
        assert_eq!(
            MessageTarget::chat(3, 4).to_body(),
            json!({ "chat_id": 3, "message_id": 4 })
        );
        assert_eq!(
            MessageTarget::inline("abc").to_body(),
            json!({ "inline_message_id": "abc" })
        );
    }
}
