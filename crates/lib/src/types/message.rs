//! Messages and their classification into content kinds.
//!
//! A message carries at most one content payload (text, photo, voice, ...). [`Message::kind`]
//! inspects the payload fields in a fixed priority order and returns the first one present;
//! [`Message::content`] returns the same classification together with the payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::keyboard::InlineKeyboardMarkup;
use super::media::{
    Animation, Audio, Contact, Dice, Document, Game, Location, PhotoSize, Poll,
    ProximityAlertTriggered, Sticker, Venue, Video, VideoNote, Voice,
};
use super::passport::PassportData;
use super::payments::{Invoice, SuccessfulPayment};
use super::user::{Chat, User};

/// Entity type tag used for `/command` spans.
pub const BOT_COMMAND_ENTITY: &str = "bot_command";

/// Text formatting mode for message text and captions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    #[serde(rename = "MarkdownV2")]
    MarkdownV2,
    #[serde(rename = "Markdown")]
    Markdown,
    #[serde(rename = "HTML")]
    Html,
}

/// A special span in a message text (mention, hashtag, bot command, url, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: String,
    /// Offset in UTF-16 code units.
    pub offset: i64,
    /// Length in UTF-16 code units.
    pub length: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl MessageEntity {
    pub fn is_bot_command(&self) -> bool {
        self.kind == BOT_COMMAND_ENTITY
    }

    /// The slice of `text` covered by this entity, or None when offsets fall outside it.
    pub fn extract<'a>(&self, text: &'a str) -> Option<&'a str> {
        let start = usize::try_from(self.offset).ok()?;
        let end = usize::try_from(self.offset.checked_add(self.length)?).ok()?;
        if end < start {
            return None;
        }
        text.get(utf16_to_byte(text, start)?..utf16_to_byte(text, end)?)
    }
}

fn utf16_to_byte(text: &str, units: usize) -> Option<usize> {
    let mut seen = 0usize;
    for (idx, ch) in text.char_indices() {
        if seen == units {
            return Some(idx);
        }
        seen += ch.len_utf16();
        if seen > units {
            return None;
        }
    }
    (seen == units).then_some(text.len())
}

/// A chat message. Every content field is optional; see [`Message::kind`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_chat: Option<Chat>,
    /// Unix time the message was sent.
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub chat: Chat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_from: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_from_chat: Option<Chat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_from_message_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_sender_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_message: Option<Box<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via_bot: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_signature: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<MessageEntity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<Audio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Vec<PhotoSize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker: Option<Sticker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_note: Option<VideoNote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<Voice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption_entities: Vec<MessageEntity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dice: Option<Dice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<Game>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll: Option<Poll>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    // Service fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub new_chat_members: Vec<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_chat_member: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_chat_title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub new_chat_photo: Vec<PhotoSize>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub delete_chat_photo: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub group_chat_created: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub supergroup_chat_created: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub channel_chat_created: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_to_chat_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_from_chat_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_message: Option<Box<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice: Option<Invoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful_payment: Option<SuccessfulPayment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_data: Option<PassportData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proximity_alert_triggered: Option<ProximityAlertTriggered>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// Content classification of a message. Variants are listed in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Text,
    Photo,
    Voice,
    Audio,
    Video,
    Animation,
    Document,
    Sticker,
    VideoNote,
    Contact,
    Dice,
    Game,
    Poll,
    Venue,
    Location,
}

impl MessageKind {
    pub const ALL: [MessageKind; 15] = [
        MessageKind::Text,
        MessageKind::Photo,
        MessageKind::Voice,
        MessageKind::Audio,
        MessageKind::Video,
        MessageKind::Animation,
        MessageKind::Document,
        MessageKind::Sticker,
        MessageKind::VideoNote,
        MessageKind::Contact,
        MessageKind::Dice,
        MessageKind::Game,
        MessageKind::Poll,
        MessageKind::Venue,
        MessageKind::Location,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Photo => "photo",
            MessageKind::Voice => "voice",
            MessageKind::Audio => "audio",
            MessageKind::Video => "video",
            MessageKind::Animation => "animation",
            MessageKind::Document => "document",
            MessageKind::Sticker => "sticker",
            MessageKind::VideoNote => "videoNote",
            MessageKind::Contact => "contact",
            MessageKind::Dice => "dice",
            MessageKind::Game => "game",
            MessageKind::Poll => "poll",
            MessageKind::Venue => "venue",
            MessageKind::Location => "location",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed view of the classified payload of a message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageContent<'a> {
    Text {
        text: &'a str,
        reply_to_message: Option<&'a Message>,
    },
    Photo {
        photo: &'a [PhotoSize],
        caption: Option<&'a str>,
    },
    Voice(&'a Voice),
    Audio {
        audio: &'a Audio,
        caption: Option<&'a str>,
    },
    Video {
        video: &'a Video,
        caption: Option<&'a str>,
    },
    /// Animations always come with a backward-compatible `document` copy.
    Animation {
        animation: &'a Animation,
        document: Option<&'a Document>,
    },
    Document {
        document: &'a Document,
        caption: Option<&'a str>,
    },
    Sticker(&'a Sticker),
    VideoNote(&'a VideoNote),
    Contact(&'a Contact),
    Dice(&'a Dice),
    Game(&'a Game),
    Poll(&'a Poll),
    Venue(&'a Venue),
    Location(&'a Location),
}

impl MessageContent<'_> {
    pub fn kind(&self) -> MessageKind {
        match self {
            MessageContent::Text { .. } => MessageKind::Text,
            MessageContent::Photo { .. } => MessageKind::Photo,
            MessageContent::Voice(_) => MessageKind::Voice,
            MessageContent::Audio { .. } => MessageKind::Audio,
            MessageContent::Video { .. } => MessageKind::Video,
            MessageContent::Animation { .. } => MessageKind::Animation,
            MessageContent::Document { .. } => MessageKind::Document,
            MessageContent::Sticker(_) => MessageKind::Sticker,
            MessageContent::VideoNote(_) => MessageKind::VideoNote,
            MessageContent::Contact(_) => MessageKind::Contact,
            MessageContent::Dice(_) => MessageKind::Dice,
            MessageContent::Game(_) => MessageKind::Game,
            MessageContent::Poll(_) => MessageKind::Poll,
            MessageContent::Venue(_) => MessageKind::Venue,
            MessageContent::Location(_) => MessageKind::Location,
        }
    }
}

impl Message {
    /// The first populated payload, checked as text (non-empty), photo, voice, audio, video,
    /// animation, document, sticker, video note, contact, dice, game, poll, venue, location.
    /// Text wins over everything else; animation wins over its document copy and venue over its location.
    pub fn content(&self) -> Option<MessageContent<'_>> {
        let caption = self.caption.as_deref();
        if let Some(text) = self.text.as_deref().filter(|t| !t.is_empty()) {
            return Some(MessageContent::Text {
                text,
                reply_to_message: self.reply_to_message.as_deref(),
            });
        }
        if let Some(photo) = &self.photo {
            return Some(MessageContent::Photo { photo, caption });
        }
        if let Some(voice) = &self.voice {
            return Some(MessageContent::Voice(voice));
        }
        if let Some(audio) = &self.audio {
            return Some(MessageContent::Audio { audio, caption });
        }
        if let Some(video) = &self.video {
            return Some(MessageContent::Video { video, caption });
        }
        if let Some(animation) = &self.animation {
            return Some(MessageContent::Animation {
                animation,
                document: self.document.as_ref(),
            });
        }
        if let Some(document) = &self.document {
            return Some(MessageContent::Document { document, caption });
        }
        if let Some(sticker) = &self.sticker {
            return Some(MessageContent::Sticker(sticker));
        }
        if let Some(note) = &self.video_note {
            return Some(MessageContent::VideoNote(note));
        }
        if let Some(contact) = &self.contact {
            return Some(MessageContent::Contact(contact));
        }
        if let Some(dice) = &self.dice {
            return Some(MessageContent::Dice(dice));
        }
        if let Some(game) = &self.game {
            return Some(MessageContent::Game(game));
        }
        if let Some(poll) = &self.poll {
            return Some(MessageContent::Poll(poll));
        }
        if let Some(venue) = &self.venue {
            return Some(MessageContent::Venue(venue));
        }
        self.location.as_ref().map(MessageContent::Location)
    }

    /// Classified kind, or None for service messages and unknown payloads.
    pub fn kind(&self) -> Option<MessageKind> {
        self.content().map(|c| c.kind())
    }

    pub fn chat_id(&self) -> i64 {
        self.chat.id
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// True when any entity in the text is a bot command.
    pub fn has_command(&self) -> bool {
        self.entities.iter().any(MessageEntity::is_bot_command)
    }

    /// Text of every bot-command entity, in entity order (e.g. "/start", "/help@my_bot").
    pub fn commands(&self) -> Vec<&str> {
        let text = self.text();
        self.entities
            .iter()
            .filter(|e| e.is_bot_command())
            .filter_map(|e| e.extract(text))
            .collect()
    }

    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.date, 0)
    }

    pub fn forward_date_time(&self) -> Option<DateTime<Utc>> {
        self.forward_date.and_then(|d| DateTime::from_timestamp(d, 0))
    }

    pub fn edit_date_time(&self) -> Option<DateTime<Utc>> {
        self.edit_date.and_then(|d| DateTime::from_timestamp(d, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(payload: serde_json::Value) -> Message {
        let mut base = json!({
            "message_id": 1,
            "date": 1_600_000_000,
            "chat": { "id": 42, "type": "private" }
        });
        for (k, v) in payload.as_object().unwrap() {
            base[k] = v.clone();
        }
        serde_json::from_value(base).unwrap()
    }

    fn file(extra: serde_json::Value) -> serde_json::Value {
        let mut v = json!({ "file_id": "f", "file_unique_id": "u" });
        for (k, x) in extra.as_object().unwrap() {
            v[k] = x.clone();
        }
        v
    }

    #[test]
    fn classifies_each_single_payload() {
        let cases = vec![
            (json!({ "text": "hi" }), MessageKind::Text),
            (
                json!({ "photo": [file(json!({ "width": 1, "height": 1 }))] }),
                MessageKind::Photo,
            ),
            (json!({ "voice": file(json!({ "duration": 3 })) }), MessageKind::Voice),
            (json!({ "audio": file(json!({ "duration": 3 })) }), MessageKind::Audio),
            (
                json!({ "video": file(json!({ "width": 1, "height": 1, "duration": 3 })) }),
                MessageKind::Video,
            ),
            (
                json!({ "animation": file(json!({ "width": 1, "height": 1, "duration": 3 })) }),
                MessageKind::Animation,
            ),
            (json!({ "document": file(json!({})) }), MessageKind::Document),
            (
                json!({ "sticker": file(json!({ "width": 1, "height": 1 })) }),
                MessageKind::Sticker,
            ),
            (
                json!({ "video_note": file(json!({ "length": 1, "duration": 3 })) }),
                MessageKind::VideoNote,
            ),
            (
                json!({ "contact": { "phone_number": "1", "first_name": "a" } }),
                MessageKind::Contact,
            ),
            (json!({ "dice": { "emoji": "🎲", "value": 4 } }), MessageKind::Dice),
            (
                json!({ "game": { "title": "t", "description": "d", "photo": [] } }),
                MessageKind::Game,
            ),
            (
                json!({ "poll": {
                    "id": "p", "question": "q", "options": [], "total_voter_count": 0,
                    "is_closed": false, "is_anonymous": true, "type": "regular",
                    "allows_multiple_answers": false
                } }),
                MessageKind::Poll,
            ),
            (
                json!({ "venue": {
                    "location": { "longitude": 1.0, "latitude": 2.0 },
                    "title": "t", "address": "a"
                } }),
                MessageKind::Venue,
            ),
            (
                json!({ "location": { "longitude": 1.0, "latitude": 2.0 } }),
                MessageKind::Location,
            ),
        ];
        assert_eq!(cases.len(), MessageKind::ALL.len());
        for (payload, expected) in cases {
            let m = message(payload.clone());
            assert_eq!(m.kind(), Some(expected), "payload {}", payload);
        }
    }

    #[test]
    fn text_wins_over_media() {
        let m = message(json!({
            "text": "hello",
            "photo": [file(json!({ "width": 1, "height": 1 }))],
            "location": { "longitude": 1.0, "latitude": 2.0 }
        }));
        assert_eq!(m.kind(), Some(MessageKind::Text));
    }

    #[test]
    fn empty_text_is_not_text() {
        let m = message(json!({ "text": "", "dice": { "emoji": "🎲", "value": 1 } }));
        assert_eq!(m.kind(), Some(MessageKind::Dice));
    }

    #[test]
    fn animation_wins_over_document_copy() {
        let m = message(json!({
            "animation": file(json!({ "width": 1, "height": 1, "duration": 3 })),
            "document": file(json!({ "file_name": "a.gif" }))
        }));
        match m.content() {
            Some(MessageContent::Animation { document, .. }) => {
                assert_eq!(document.and_then(|d| d.file_name.as_deref()), Some("a.gif"));
            }
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[test]
    fn venue_wins_over_location() {
        let m = message(json!({
            "venue": {
                "location": { "longitude": 1.0, "latitude": 2.0 },
                "title": "t", "address": "a"
            },
            "location": { "longitude": 1.0, "latitude": 2.0 }
        }));
        assert_eq!(m.kind(), Some(MessageKind::Venue));
    }

    #[test]
    fn service_message_has_no_kind() {
        let m = message(json!({ "new_chat_title": "renamed" }));
        assert_eq!(m.kind(), None);
        assert!(m.content().is_none());
    }

    #[test]
    fn photo_caption_is_carried() {
        let m = message(json!({
            "photo": [file(json!({ "width": 1, "height": 1 }))],
            "caption": "look"
        }));
        match m.content() {
            Some(MessageContent::Photo { photo, caption }) => {
                assert_eq!(photo.len(), 1);
                assert_eq!(caption, Some("look"));
            }
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[test]
    fn commands_honour_utf16_offsets() {
        let m = message(json!({
            "text": "😀 /start now /help@bot",
            "entities": [
                { "type": "bot_command", "offset": 3, "length": 6 },
                { "type": "bold", "offset": 10, "length": 3 },
                { "type": "bot_command", "offset": 14, "length": 9 }
            ]
        }));
        assert!(m.has_command());
        assert_eq!(m.commands(), vec!["/start", "/help@bot"]);
    }

    #[test]
    fn entity_out_of_range_is_skipped() {
        let e = MessageEntity {
            kind: BOT_COMMAND_ENTITY.to_string(),
            offset: 2,
            length: 10,
            ..Default::default()
        };
        assert_eq!(e.extract("/a"), None);
    }

    #[test]
    fn entity_with_overflowing_length_is_skipped() {
        let m = message(json!({
            "text": "/start",
            "entities": [{ "type": "bot_command", "offset": 1, "length": i64::MAX }]
        }));
        assert!(m.commands().is_empty());

        let negative = MessageEntity {
            kind: BOT_COMMAND_ENTITY.to_string(),
            offset: 3,
            length: -2,
            ..Default::default()
        };
        assert_eq!(negative.extract("/start"), None);
    }

    #[test]
    fn date_time_from_unix() {
        let m = message(json!({ "text": "x" }));
        let dt = m.date_time().unwrap();
        assert_eq!(dt.timestamp(), 1_600_000_000);
        assert!(m.forward_date_time().is_none());
    }
}
