//! Editing and deleting messages.

use serde::Deserialize;
use serde_json::json;

use super::error::ApiError;
use super::params::{merge, ChatId, MessageTarget, ReplyMarkup};
use super::Api;
use crate::types::{InlineKeyboardMarkup, InputMedia, Message, MessageEntity, ParseMode, Poll};

/// Edits of chat messages return the message; edits of inline messages return `true`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EditedMessage {
    Message(Box<Message>),
    Inline(bool),
}

impl EditedMessage {
    pub fn message(&self) -> Option<&Message> {
        match self {
            EditedMessage::Message(m) => Some(m),
            EditedMessage::Inline(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct EditTextOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<MessageEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_web_page_preview: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl Api {
    pub async fn edit_message_text(
        &self,
        target: &MessageTarget,
        text: &str,
        options: &EditTextOptions,
    ) -> Result<EditedMessage, ApiError> {
        let mut body = target.to_body();
        body["text"] = json!(text);
        merge(&mut body, options)?;
        self.post("editMessageText", &body).await
    }

    pub async fn edit_message_caption(
        &self,
        target: &MessageTarget,
        caption: Option<&str>,
        parse_mode: Option<ParseMode>,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<EditedMessage, ApiError> {
        let mut body = target.to_body();
        if let Some(c) = caption {
            body["caption"] = json!(c);
        }
        if let Some(p) = parse_mode {
            body["parse_mode"] = serde_json::to_value(p)?;
        }
        if let Some(m) = reply_markup {
            body["reply_markup"] = serde_json::to_value(m)?;
        }
        self.post("editMessageCaption", &body).await
    }

    /// Replace the media of a message; uploads are sent as multipart parts.
    pub async fn edit_message_media(
        &self,
        target: &MessageTarget,
        media: &InputMedia,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<EditedMessage, ApiError> {
        let mut body = target.to_body();
        body["media"] = serde_json::to_value(media)?;
        if let Some(m) = reply_markup {
            body["reply_markup"] = serde_json::to_value(m)?;
        }
        let uploads = media.uploads();
        self.post_files("editMessageMedia", body, &[], &uploads).await
    }

    pub async fn edit_message_reply_markup(
        &self,
        target: &MessageTarget,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<EditedMessage, ApiError> {
        let mut body = target.to_body();
        if let Some(m) = reply_markup {
            body["reply_markup"] = serde_json::to_value(m)?;
        }
        self.post("editMessageReplyMarkup", &body).await
    }

    pub async fn stop_poll(
        &self,
        chat_id: impl Into<ChatId>,
        message_id: i64,
        reply_markup: Option<&ReplyMarkup>,
    ) -> Result<Poll, ApiError> {
        let mut body = json!({ "chat_id": chat_id.into(), "message_id": message_id });
        if let Some(m) = reply_markup {
            body["reply_markup"] = serde_json::to_value(m)?;
        }
        self.post("stopPoll", &body).await
    }

    pub async fn delete_message(
        &self,
        chat_id: impl Into<ChatId>,
        message_id: i64,
    ) -> Result<bool, ApiError> {
        let body = json!({ "chat_id": chat_id.into(), "message_id": message_id });
        self.post("deleteMessage", &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_result_shapes() {
        let inline: EditedMessage = serde_json::from_str("true").unwrap();
        assert_eq!(inline, EditedMessage::Inline(true));
        let msg: EditedMessage = serde_json::from_str(
            r#"{"message_id":3,"date":0,"chat":{"id":1,"type":"private"},"text":"x"}"#,
        )
        .unwrap();
        assert_eq!(msg.message().map(|m| m.message_id), Some(3));
    }
}
