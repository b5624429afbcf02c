//! Per-invocation contexts handed to handlers.
//!
//! Every context carries the [`Api`] so a handler can make further calls. Message contexts share
//! a [`MessageContextBase`] built from the source message; the per-kind contexts add that kind's
//! payload. Kinds that carry a downloadable file implement [`FileContext`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{
    AnswerCallbackQueryOptions, AnswerInlineQueryOptions, Api, ApiError, SendMessageOptions,
    SendOptions,
};
use crate::types::{
    Animation, Audio, CallbackQuery, Chat, Contact, Dice, Document, Game, InlineQuery,
    InlineQueryResult, Location, Message, MessageKind, PhotoSize, Poll, Sticker, User, Venue,
    Video, VideoNote, Voice,
};

/// Generic context for command handlers and the default message handler.
#[derive(Debug, Clone)]
pub struct Context {
    pub api: Api,
    /// Classified kind, None for unclassified messages.
    pub kind: Option<MessageKind>,
    pub message: Arc<Message>,
}

impl Context {
    pub fn new(api: Api, message: Arc<Message>) -> Self {
        Self {
            api,
            kind: message.kind(),
            message,
        }
    }

    pub fn chat_id(&self) -> i64 {
        self.message.chat.id
    }

    /// First bot command in the message, if any.
    pub fn command(&self) -> Option<&str> {
        self.message.commands().into_iter().next()
    }

    /// Text after the first command, trimmed.
    pub fn command_args(&self) -> &str {
        let text = self.message.text();
        match self.command() {
            Some(cmd) => text
                .find(cmd)
                .map(|i| text[i + cmd.len()..].trim())
                .unwrap_or(""),
            None => text.trim(),
        }
    }

    pub fn download_url(&self, file_path: &str) -> String {
        self.api.file_url(file_path)
    }

    pub async fn download_file(&self, file_path: &str) -> Result<reqwest::Response, ApiError> {
        self.api.download_file(file_path).await
    }

    /// Send `text` to the chat the message came from.
    pub async fn send_text(&self, text: &str) -> Result<Message, ApiError> {
        self.api
            .send_message(self.chat_id(), text, &SendMessageOptions::default())
            .await
    }

    /// Send `text` as a reply to the message.
    pub async fn reply(&self, text: &str) -> Result<Message, ApiError> {
        let options = SendMessageOptions {
            send: SendOptions::reply_to(self.message.message_id),
            ..Default::default()
        };
        self.api.send_message(self.chat_id(), text, &options).await
    }
}

/// Fields common to every kind-specific message context.
#[derive(Debug, Clone)]
pub struct MessageContextBase {
    pub api: Api,
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub forward_from: Option<User>,
    pub forward_from_chat: Option<Chat>,
    pub forward_from_message_id: Option<i64>,
    pub forward_signature: Option<String>,
    pub forward_sender_name: Option<String>,
    pub forward_date: Option<i64>,
    pub via_bot: Option<User>,
}

impl MessageContextBase {
    pub fn new(api: Api, message: &Message) -> Self {
        Self {
            api,
            message_id: message.message_id,
            from: message.from.clone(),
            chat: message.chat.clone(),
            forward_from: message.forward_from.clone(),
            forward_from_chat: message.forward_from_chat.clone(),
            forward_from_message_id: message.forward_from_message_id,
            forward_signature: message.forward_signature.clone(),
            forward_sender_name: message.forward_sender_name.clone(),
            forward_date: message.forward_date,
            via_bot: message.via_bot.clone(),
        }
    }
}

/// Access to the shared base of a kind-specific context.
pub trait MessageContext {
    fn base(&self) -> &MessageContextBase;

    fn api(&self) -> &Api {
        &self.base().api
    }

    fn chat_id(&self) -> i64 {
        self.base().chat.id
    }

    fn message_id(&self) -> i64 {
        self.base().message_id
    }
}

/// Contexts whose payload is a downloadable file.
#[async_trait]
pub trait FileContext: MessageContext + Sync {
    /// File id of the payload; for photos the largest size.
    fn file_id(&self) -> Option<&str>;

    fn download_url(&self, file_path: &str) -> String {
        self.api().file_url(file_path)
    }

    /// GET a file path; a status other than 200 is an error.
    async fn download_file(&self, file_path: &str) -> Result<reqwest::Response, ApiError> {
        self.api().download_file(file_path).await
    }

    /// Resolve the payload's file with getFile and download it into memory.
    async fn fetch(&self) -> Result<Vec<u8>, ApiError> {
        let file_id = self
            .file_id()
            .ok_or_else(|| ApiError::InvalidInput("message carries no file".into()))?;
        let file = self.api().get_file(file_id).await?;
        let path = file
            .file_path
            .ok_or_else(|| ApiError::InvalidInput(format!("file {} has no download path", file_id)))?;
        self.api().download_bytes(&path).await
    }
}

macro_rules! message_context {
    ($(#[$doc:meta])* $name:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            pub base: MessageContextBase,
            $(pub $field: $ty,)*
        }

        impl MessageContext for $name {
            fn base(&self) -> &MessageContextBase {
                &self.base
            }
        }
    };
}

message_context!(TextContext {
    reply_to_message: Option<Box<Message>>,
    text: String,
});
message_context!(PhotoContext {
    photo: Vec<PhotoSize>,
    caption: Option<String>,
});
message_context!(VoiceContext { voice: Voice });
message_context!(AudioContext {
    audio: Audio,
    caption: Option<String>,
});
message_context!(VideoContext {
    video: Video,
    caption: Option<String>,
});
message_context!(
    /// `document` is the backward-compatible copy Telegram sends alongside animations.
    AnimationContext {
        animation: Animation,
        document: Option<Document>,
    }
);
message_context!(DocumentContext {
    document: Document,
    caption: Option<String>,
});
message_context!(StickerContext { sticker: Sticker });
message_context!(VideoNoteContext { video_note: VideoNote });
message_context!(ContactContext { contact: Contact });
message_context!(DiceContext { dice: Dice });
message_context!(GameContext { game: Game });
message_context!(PollContext { poll: Poll });
message_context!(VenueContext { venue: Venue });
message_context!(LocationContext { location: Location });

impl TextContext {
    pub async fn reply(&self, text: &str) -> Result<Message, ApiError> {
        let options = SendMessageOptions {
            send: SendOptions::reply_to(self.base.message_id),
            ..Default::default()
        };
        self.base
            .api
            .send_message(self.base.chat.id, text, &options)
            .await
    }
}

impl FileContext for PhotoContext {
    fn file_id(&self) -> Option<&str> {
        self.photo.last().map(|p| p.file_id.as_str())
    }
}

impl FileContext for VoiceContext {
    fn file_id(&self) -> Option<&str> {
        Some(&self.voice.file_id)
    }
}

impl FileContext for AudioContext {
    fn file_id(&self) -> Option<&str> {
        Some(&self.audio.file_id)
    }
}

impl FileContext for VideoContext {
    fn file_id(&self) -> Option<&str> {
        Some(&self.video.file_id)
    }
}

impl FileContext for AnimationContext {
    fn file_id(&self) -> Option<&str> {
        Some(&self.animation.file_id)
    }
}

impl FileContext for DocumentContext {
    fn file_id(&self) -> Option<&str> {
        Some(&self.document.file_id)
    }
}

impl FileContext for StickerContext {
    fn file_id(&self) -> Option<&str> {
        Some(&self.sticker.file_id)
    }
}

impl FileContext for VideoNoteContext {
    fn file_id(&self) -> Option<&str> {
        Some(&self.video_note.file_id)
    }
}

impl FileContext for GameContext {
    fn file_id(&self) -> Option<&str> {
        self.game
            .animation
            .as_ref()
            .map(|a| a.file_id.as_str())
            .or_else(|| self.game.photo.last().map(|p| p.file_id.as_str()))
    }
}

/// Context for the inline query handler.
#[derive(Debug, Clone)]
pub struct InlineQueryContext {
    pub api: Api,
    pub query: InlineQuery,
}

impl InlineQueryContext {
    pub async fn answer(
        &self,
        results: &[InlineQueryResult],
        options: &AnswerInlineQueryOptions,
    ) -> Result<bool, ApiError> {
        self.api
            .answer_inline_query(&self.query.id, results, options)
            .await
    }
}

/// Context for the callback query handler.
#[derive(Debug, Clone)]
pub struct CallbackQueryContext {
    pub api: Api,
    pub query: CallbackQuery,
}

impl CallbackQueryContext {
    pub fn data(&self) -> Option<&str> {
        self.query.data.as_deref()
    }

    /// Acknowledge the button press, optionally showing `text` to the user.
    pub async fn answer(&self, text: Option<&str>) -> Result<bool, ApiError> {
        let options = match text {
            Some(t) => AnswerCallbackQueryOptions::text(t),
            None => AnswerCallbackQueryOptions::default(),
        };
        self.api.answer_callback_query(&self.query.id, &options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiOptions;
    use serde_json::json;

    fn forwarded() -> Message {
        serde_json::from_value(json!({
            "message_id": 77,
            "date": 1,
            "from": { "id": 10, "is_bot": false, "first_name": "Ann" },
            "chat": { "id": -500, "type": "group", "title": "g" },
            "forward_from": { "id": 11, "is_bot": false, "first_name": "Bob" },
            "forward_from_chat": { "id": -600, "type": "channel", "title": "c" },
            "forward_from_message_id": 12,
            "forward_signature": "sig",
            "forward_sender_name": "Hidden",
            "forward_date": 99,
            "via_bot": { "id": 13, "is_bot": true, "first_name": "helper" },
            "text": "/start now",
            "entities": [{ "type": "bot_command", "offset": 0, "length": 6 }]
        }))
        .unwrap()
    }

    #[test]
    fn base_fields_mirror_the_message() {
        let m = forwarded();
        let base = MessageContextBase::new(Api::new(1, "t", ApiOptions::default()), &m);
        assert_eq!(base.message_id, m.message_id);
        assert_eq!(base.from, m.from);
        assert_eq!(base.chat, m.chat);
        assert_eq!(base.forward_from, m.forward_from);
        assert_eq!(base.forward_from_chat, m.forward_from_chat);
        assert_eq!(base.forward_from_message_id, m.forward_from_message_id);
        assert_eq!(base.forward_signature, m.forward_signature);
        assert_eq!(base.forward_sender_name, m.forward_sender_name);
        assert_eq!(base.forward_date, m.forward_date);
        assert_eq!(base.via_bot, m.via_bot);
    }

    #[test]
    fn generic_context_exposes_command_and_args() {
        let ctx = Context::new(Api::new(1, "t", ApiOptions::default()), Arc::new(forwarded()));
        assert_eq!(ctx.kind, Some(MessageKind::Text));
        assert_eq!(ctx.chat_id(), -500);
        assert_eq!(ctx.command(), Some("/start"));
        assert_eq!(ctx.command_args(), "now");
        assert_eq!(ctx.download_url("a/b"), "https://api.telegram.org/file/bot1:t/a/b");
    }

    #[test]
    fn photo_file_id_is_largest_size() {
        let m = forwarded();
        let ctx = PhotoContext {
            base: MessageContextBase::new(Api::new(1, "t", ApiOptions::default()), &m),
            photo: vec![
                PhotoSize { file_id: "small".into(), ..Default::default() },
                PhotoSize { file_id: "big".into(), ..Default::default() },
            ],
            caption: None,
        };
        assert_eq!(ctx.file_id(), Some("big"));
        assert_eq!(ctx.chat_id(), -500);
        assert_eq!(ctx.message_id(), 77);
    }
}
