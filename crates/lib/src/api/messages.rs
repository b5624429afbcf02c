//! Sending messages and files.

use serde::Serialize;
use serde_json::{json, Value};

use super::error::ApiError;
use super::params::{merge, ChatId, MessageTarget, ReplyMarkup, SendMediaOptions, SendMessageOptions, SendOptions};
use super::editing::EditedMessage;
use super::Api;
use crate::types::{
    File, InputFile, InputMedia, Message, MessageEntity, ParseMode, PollType, UserProfilePhotos,
};

/// Chat action shown while the bot is working ("typing", "upload_photo", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    RecordVideo,
    UploadVideo,
    RecordVoice,
    UploadVoice,
    UploadDocument,
    FindLocation,
    RecordVideoNote,
    UploadVideoNote,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SendLocationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_accuracy: Option<f64>,
    /// Seconds the location will be updated (live location), 60-86400.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximity_alert_radius: Option<i64>,
    #[serde(flatten)]
    pub send: SendOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SendVenueOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foursquare_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foursquare_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_place_type: Option<String>,
    #[serde(flatten)]
    pub send: SendOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SendContactOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcard: Option<String>,
    #[serde(flatten)]
    pub send: SendOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SendPollOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_anonymous: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<PollType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allows_multiple_answers: Option<bool>,
    /// Required for quizzes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_option_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation_parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explanation_entities: Vec<MessageEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_closed: Option<bool>,
    #[serde(flatten)]
    pub send: SendOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CopyMessageOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub caption_entities: Vec<MessageEntity>,
    #[serde(flatten)]
    pub send: SendOptions,
}

/// Result of copyMessage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct MessageId {
    pub message_id: i64,
}

impl Api {
    pub async fn send_message(
        &self,
        chat_id: impl Into<ChatId>,
        text: &str,
        options: &SendMessageOptions,
    ) -> Result<Message, ApiError> {
        let mut body = json!({ "chat_id": chat_id.into(), "text": text });
        merge(&mut body, options)?;
        self.post("sendMessage", &body).await
    }

    pub async fn forward_message(
        &self,
        chat_id: impl Into<ChatId>,
        from_chat_id: impl Into<ChatId>,
        message_id: i64,
        disable_notification: bool,
    ) -> Result<Message, ApiError> {
        let mut body = json!({
            "chat_id": chat_id.into(),
            "from_chat_id": from_chat_id.into(),
            "message_id": message_id,
        });
        if disable_notification {
            body["disable_notification"] = json!(true);
        }
        self.post("forwardMessage", &body).await
    }

    /// Copy a message without a link to the original.
    pub async fn copy_message(
        &self,
        chat_id: impl Into<ChatId>,
        from_chat_id: impl Into<ChatId>,
        message_id: i64,
        options: &CopyMessageOptions,
    ) -> Result<MessageId, ApiError> {
        let mut body = json!({
            "chat_id": chat_id.into(),
            "from_chat_id": from_chat_id.into(),
            "message_id": message_id,
        });
        merge(&mut body, options)?;
        self.post("copyMessage", &body).await
    }

    async fn send_file(
        &self,
        method: &str,
        field: &str,
        chat_id: ChatId,
        file: &InputFile,
        options: &SendMediaOptions,
    ) -> Result<Message, ApiError> {
        let mut body = json!({ "chat_id": chat_id });
        merge(&mut body, options)?;
        self.post_files(method, body, &[(field, file)], &[]).await
    }

    pub async fn send_photo(
        &self,
        chat_id: impl Into<ChatId>,
        photo: &InputFile,
        options: &SendMediaOptions,
    ) -> Result<Message, ApiError> {
        self.send_file("sendPhoto", "photo", chat_id.into(), photo, options)
            .await
    }

    pub async fn send_audio(
        &self,
        chat_id: impl Into<ChatId>,
        audio: &InputFile,
        options: &SendMediaOptions,
    ) -> Result<Message, ApiError> {
        self.send_file("sendAudio", "audio", chat_id.into(), audio, options)
            .await
    }

    pub async fn send_document(
        &self,
        chat_id: impl Into<ChatId>,
        document: &InputFile,
        options: &SendMediaOptions,
    ) -> Result<Message, ApiError> {
        self.send_file("sendDocument", "document", chat_id.into(), document, options)
            .await
    }

    pub async fn send_video(
        &self,
        chat_id: impl Into<ChatId>,
        video: &InputFile,
        options: &SendMediaOptions,
    ) -> Result<Message, ApiError> {
        self.send_file("sendVideo", "video", chat_id.into(), video, options)
            .await
    }

    pub async fn send_animation(
        &self,
        chat_id: impl Into<ChatId>,
        animation: &InputFile,
        options: &SendMediaOptions,
    ) -> Result<Message, ApiError> {
        self.send_file("sendAnimation", "animation", chat_id.into(), animation, options)
            .await
    }

    pub async fn send_voice(
        &self,
        chat_id: impl Into<ChatId>,
        voice: &InputFile,
        options: &SendMediaOptions,
    ) -> Result<Message, ApiError> {
        self.send_file("sendVoice", "voice", chat_id.into(), voice, options)
            .await
    }

    pub async fn send_video_note(
        &self,
        chat_id: impl Into<ChatId>,
        video_note: &InputFile,
        options: &SendMediaOptions,
    ) -> Result<Message, ApiError> {
        self.send_file("sendVideoNote", "video_note", chat_id.into(), video_note, options)
            .await
    }

    pub async fn send_sticker(
        &self,
        chat_id: impl Into<ChatId>,
        sticker: &InputFile,
        options: &SendOptions,
    ) -> Result<Message, ApiError> {
        let mut body = json!({ "chat_id": chat_id.into() });
        merge(&mut body, options)?;
        self.post_files("sendSticker", body, &[("sticker", sticker)], &[])
            .await
    }

    /// Send 2-10 photos/videos (or documents/audios) as an album.
    pub async fn send_media_group(
        &self,
        chat_id: impl Into<ChatId>,
        media: &[InputMedia],
        options: &SendOptions,
    ) -> Result<Vec<Message>, ApiError> {
        if !(2..=10).contains(&media.len()) {
            return Err(ApiError::InvalidInput(format!(
                "media group must hold 2-10 items, got {}",
                media.len()
            )));
        }
        let mut body = json!({ "chat_id": chat_id.into(), "media": media });
        merge(&mut body, options)?;
        if let Value::Object(map) = &mut body {
            map.remove("reply_markup");
        }
        let uploads: Vec<&InputFile> = media.iter().flat_map(InputMedia::uploads).collect();
        self.post_files("sendMediaGroup", body, &[], &uploads).await
    }

    pub async fn send_location(
        &self,
        chat_id: impl Into<ChatId>,
        latitude: f64,
        longitude: f64,
        options: &SendLocationOptions,
    ) -> Result<Message, ApiError> {
        let mut body = json!({
            "chat_id": chat_id.into(),
            "latitude": latitude,
            "longitude": longitude,
        });
        merge(&mut body, options)?;
        self.post("sendLocation", &body).await
    }

    pub async fn edit_message_live_location(
        &self,
        target: &MessageTarget,
        latitude: f64,
        longitude: f64,
        options: &SendLocationOptions,
    ) -> Result<EditedMessage, ApiError> {
        let mut body = target.to_body();
        body["latitude"] = json!(latitude);
        body["longitude"] = json!(longitude);
        merge(&mut body, options)?;
        self.post("editMessageLiveLocation", &body).await
    }

    pub async fn stop_message_live_location(
        &self,
        target: &MessageTarget,
        reply_markup: Option<&ReplyMarkup>,
    ) -> Result<EditedMessage, ApiError> {
        let mut body = target.to_body();
        if let Some(markup) = reply_markup {
            body["reply_markup"] = serde_json::to_value(markup)?;
        }
        self.post("stopMessageLiveLocation", &body).await
    }

    pub async fn send_venue(
        &self,
        chat_id: impl Into<ChatId>,
        latitude: f64,
        longitude: f64,
        title: &str,
        address: &str,
        options: &SendVenueOptions,
    ) -> Result<Message, ApiError> {
        let mut body = json!({
            "chat_id": chat_id.into(),
            "latitude": latitude,
            "longitude": longitude,
            "title": title,
            "address": address,
        });
        merge(&mut body, options)?;
        self.post("sendVenue", &body).await
    }

    pub async fn send_contact(
        &self,
        chat_id: impl Into<ChatId>,
        phone_number: &str,
        first_name: &str,
        options: &SendContactOptions,
    ) -> Result<Message, ApiError> {
        let mut body = json!({
            "chat_id": chat_id.into(),
            "phone_number": phone_number,
            "first_name": first_name,
        });
        merge(&mut body, options)?;
        self.post("sendContact", &body).await
    }

    pub async fn send_poll(
        &self,
        chat_id: impl Into<ChatId>,
        question: &str,
        poll_options: &[&str],
        options: &SendPollOptions,
    ) -> Result<Message, ApiError> {
        if poll_options.len() < 2 || poll_options.len() > 10 {
            return Err(ApiError::InvalidInput(format!(
                "poll must have 2-10 options, got {}",
                poll_options.len()
            )));
        }
        let mut body = json!({
            "chat_id": chat_id.into(),
            "question": question,
            "options": poll_options,
        });
        merge(&mut body, options)?;
        self.post("sendPoll", &body).await
    }

    /// `emoji` is one of "🎲", "🎯", "🏀", ...; None uses the upstream default die.
    pub async fn send_dice(
        &self,
        chat_id: impl Into<ChatId>,
        emoji: Option<&str>,
        options: &SendOptions,
    ) -> Result<Message, ApiError> {
        let mut body = json!({ "chat_id": chat_id.into() });
        if let Some(e) = emoji {
            body["emoji"] = json!(e);
        }
        merge(&mut body, options)?;
        self.post("sendDice", &body).await
    }

    pub async fn send_chat_action(
        &self,
        chat_id: impl Into<ChatId>,
        action: ChatAction,
    ) -> Result<bool, ApiError> {
        let body = json!({ "chat_id": chat_id.into(), "action": action });
        self.post("sendChatAction", &body).await
    }

    pub async fn get_user_profile_photos(
        &self,
        user_id: i64,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<UserProfilePhotos, ApiError> {
        let mut body = json!({ "user_id": user_id });
        if let Some(o) = offset {
            body["offset"] = json!(o);
        }
        if let Some(l) = limit {
            body["limit"] = json!(l);
        }
        self.post("getUserProfilePhotos", &body).await
    }

    /// Prepare a file for download; use the returned `file_path` with [`Api::file_url`].
    pub async fn get_file(&self, file_id: &str) -> Result<File, ApiError> {
        self.post("getFile", &json!({ "file_id": file_id })).await
    }
}
