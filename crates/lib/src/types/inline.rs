//! Inline mode: incoming queries, chosen results, and the result variants sent back.
//!
//! `InlineQueryResult` is a closed enum of the twenty result shapes the Bot API accepts.
//! Each variant serializes as its payload struct plus a `type` tag, so the wire object is
//! selected by the variant alone and a result with no shape set cannot be built.

use serde::ser::{Error as _, SerializeMap};
use serde::{Deserialize, Serialize, Serializer};

use super::keyboard::InlineKeyboardMarkup;
use super::media::Location;
use super::message::{MessageEntity, ParseMode};
use super::user::User;

/// Incoming inline query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineQuery {
    pub id: String,
    pub from: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub offset: String,
}

/// A result the user picked from an inline query (requires inline feedback).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChosenInlineResult {
    pub result_id: String,
    pub from: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,
    #[serde(default)]
    pub query: String,
}

/// Caption fields shared by every media result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Caption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub caption_entities: Vec<MessageEntity>,
}

/// Thumbnail fields for article, document, location, venue and contact results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Thumb {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_height: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineQueryResultArticle {
    pub id: String,
    pub title: String,
    pub input_message_content: InputMessageContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_url: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub thumb: Thumb,
}

impl InlineQueryResultArticle {
    /// Article that sends `text` when picked.
    pub fn text(id: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            input_message_content: InputMessageContent::text(text),
            reply_markup: None,
            url: None,
            hide_url: None,
            description: None,
            thumb: Thumb::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultPhoto {
    pub id: String,
    pub photo_url: String,
    pub thumb_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub caption: Caption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultGif {
    pub id: String,
    pub gif_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gif_width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gif_height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gif_duration: Option<i64>,
    pub thumb_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub caption: Caption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

/// Animation without sound (H.264/MPEG-4 AVC).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultMpeg4Gif {
    pub id: String,
    pub mpeg4_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mpeg4_width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mpeg4_height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mpeg4_duration: Option<i64>,
    pub thumb_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub caption: Caption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultVideo {
    pub id: String,
    pub video_url: String,
    /// "text/html" or "video/mp4".
    pub mime_type: String,
    pub thumb_url: String,
    pub title: String,
    #[serde(flatten)]
    pub caption: Caption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultAudio {
    pub id: String,
    pub audio_url: String,
    pub title: String,
    #[serde(flatten)]
    pub caption: Caption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultVoice {
    pub id: String,
    pub voice_url: String,
    pub title: String,
    #[serde(flatten)]
    pub caption: Caption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultDocument {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub caption: Caption,
    pub document_url: String,
    /// "application/pdf" or "application/zip".
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
    #[serde(flatten)]
    pub thumb: Thumb,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultLocation {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximity_alert_radius: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
    #[serde(flatten)]
    pub thumb: Thumb,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultVenue {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foursquare_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foursquare_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_place_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
    #[serde(flatten)]
    pub thumb: Thumb,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultContact {
    pub id: String,
    pub phone_number: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcard: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
    #[serde(flatten)]
    pub thumb: Thumb,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultGame {
    pub id: String,
    pub game_short_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultCachedPhoto {
    pub id: String,
    pub photo_file_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub caption: Caption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultCachedGif {
    pub id: String,
    pub gif_file_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub caption: Caption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultCachedMpeg4Gif {
    pub id: String,
    pub mpeg4_file_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub caption: Caption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultCachedSticker {
    pub id: String,
    pub sticker_file_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultCachedDocument {
    pub id: String,
    pub title: String,
    pub document_file_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub caption: Caption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultCachedVideo {
    pub id: String,
    pub video_file_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub caption: Caption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultCachedVoice {
    pub id: String,
    pub voice_file_id: String,
    pub title: String,
    #[serde(flatten)]
    pub caption: Caption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultCachedAudio {
    pub id: String,
    pub audio_file_id: String,
    #[serde(flatten)]
    pub caption: Caption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

/// One result of an inline query answer.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineQueryResult {
    CachedAudio(InlineQueryResultCachedAudio),
    CachedDocument(InlineQueryResultCachedDocument),
    CachedGif(InlineQueryResultCachedGif),
    CachedMpeg4Gif(InlineQueryResultCachedMpeg4Gif),
    CachedPhoto(InlineQueryResultCachedPhoto),
    CachedSticker(InlineQueryResultCachedSticker),
    CachedVideo(InlineQueryResultCachedVideo),
    CachedVoice(InlineQueryResultCachedVoice),
    Article(InlineQueryResultArticle),
    Audio(InlineQueryResultAudio),
    Contact(InlineQueryResultContact),
    Game(InlineQueryResultGame),
    Document(InlineQueryResultDocument),
    Gif(InlineQueryResultGif),
    Location(InlineQueryResultLocation),
    Mpeg4Gif(InlineQueryResultMpeg4Gif),
    Photo(InlineQueryResultPhoto),
    Venue(InlineQueryResultVenue),
    Video(InlineQueryResultVideo),
    Voice(InlineQueryResultVoice),
}

impl InlineQueryResult {
    /// Value of the wire `type` field. Cached and fresh variants of a media type share a tag.
    pub fn type_tag(&self) -> &'static str {
        match self {
            InlineQueryResult::CachedAudio(_) | InlineQueryResult::Audio(_) => "audio",
            InlineQueryResult::CachedDocument(_) | InlineQueryResult::Document(_) => "document",
            InlineQueryResult::CachedGif(_) | InlineQueryResult::Gif(_) => "gif",
            InlineQueryResult::CachedMpeg4Gif(_) | InlineQueryResult::Mpeg4Gif(_) => "mpeg4_gif",
            InlineQueryResult::CachedPhoto(_) | InlineQueryResult::Photo(_) => "photo",
            InlineQueryResult::CachedSticker(_) => "sticker",
            InlineQueryResult::CachedVideo(_) | InlineQueryResult::Video(_) => "video",
            InlineQueryResult::CachedVoice(_) | InlineQueryResult::Voice(_) => "voice",
            InlineQueryResult::Article(_) => "article",
            InlineQueryResult::Contact(_) => "contact",
            InlineQueryResult::Game(_) => "game",
            InlineQueryResult::Location(_) => "location",
            InlineQueryResult::Venue(_) => "venue",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            InlineQueryResult::CachedAudio(r) => &r.id,
            InlineQueryResult::CachedDocument(r) => &r.id,
            InlineQueryResult::CachedGif(r) => &r.id,
            InlineQueryResult::CachedMpeg4Gif(r) => &r.id,
            InlineQueryResult::CachedPhoto(r) => &r.id,
            InlineQueryResult::CachedSticker(r) => &r.id,
            InlineQueryResult::CachedVideo(r) => &r.id,
            InlineQueryResult::CachedVoice(r) => &r.id,
            InlineQueryResult::Article(r) => &r.id,
            InlineQueryResult::Audio(r) => &r.id,
            InlineQueryResult::Contact(r) => &r.id,
            InlineQueryResult::Game(r) => &r.id,
            InlineQueryResult::Document(r) => &r.id,
            InlineQueryResult::Gif(r) => &r.id,
            InlineQueryResult::Location(r) => &r.id,
            InlineQueryResult::Mpeg4Gif(r) => &r.id,
            InlineQueryResult::Photo(r) => &r.id,
            InlineQueryResult::Venue(r) => &r.id,
            InlineQueryResult::Video(r) => &r.id,
            InlineQueryResult::Voice(r) => &r.id,
        }
    }

    fn payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            InlineQueryResult::CachedAudio(r) => serde_json::to_value(r),
            InlineQueryResult::CachedDocument(r) => serde_json::to_value(r),
            InlineQueryResult::CachedGif(r) => serde_json::to_value(r),
            InlineQueryResult::CachedMpeg4Gif(r) => serde_json::to_value(r),
            InlineQueryResult::CachedPhoto(r) => serde_json::to_value(r),
            InlineQueryResult::CachedSticker(r) => serde_json::to_value(r),
            InlineQueryResult::CachedVideo(r) => serde_json::to_value(r),
            InlineQueryResult::CachedVoice(r) => serde_json::to_value(r),
            InlineQueryResult::Article(r) => serde_json::to_value(r),
            InlineQueryResult::Audio(r) => serde_json::to_value(r),
            InlineQueryResult::Contact(r) => serde_json::to_value(r),
            InlineQueryResult::Game(r) => serde_json::to_value(r),
            InlineQueryResult::Document(r) => serde_json::to_value(r),
            InlineQueryResult::Gif(r) => serde_json::to_value(r),
            InlineQueryResult::Location(r) => serde_json::to_value(r),
            InlineQueryResult::Mpeg4Gif(r) => serde_json::to_value(r),
            InlineQueryResult::Photo(r) => serde_json::to_value(r),
            InlineQueryResult::Venue(r) => serde_json::to_value(r),
            InlineQueryResult::Video(r) => serde_json::to_value(r),
            InlineQueryResult::Voice(r) => serde_json::to_value(r),
        }
    }
}

impl Serialize for InlineQueryResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let payload = self.payload().map_err(S::Error::custom)?;
        let serde_json::Value::Object(fields) = payload else {
            return Err(S::Error::custom("inline query result is not an object"));
        };
        let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
        map.serialize_entry("type", self.type_tag())?;
        for (k, v) in &fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

macro_rules! impl_from_result {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for InlineQueryResult {
            fn from(r: $ty) -> Self {
                InlineQueryResult::$variant(r)
            }
        })*
    };
}

impl_from_result! {
    InlineQueryResultCachedAudio => CachedAudio,
    InlineQueryResultCachedDocument => CachedDocument,
    InlineQueryResultCachedGif => CachedGif,
    InlineQueryResultCachedMpeg4Gif => CachedMpeg4Gif,
    InlineQueryResultCachedPhoto => CachedPhoto,
    InlineQueryResultCachedSticker => CachedSticker,
    InlineQueryResultCachedVideo => CachedVideo,
    InlineQueryResultCachedVoice => CachedVoice,
    InlineQueryResultArticle => Article,
    InlineQueryResultAudio => Audio,
    InlineQueryResultContact => Contact,
    InlineQueryResultGame => Game,
    InlineQueryResultDocument => Document,
    InlineQueryResultGif => Gif,
    InlineQueryResultLocation => Location,
    InlineQueryResultMpeg4Gif => Mpeg4Gif,
    InlineQueryResultPhoto => Photo,
    InlineQueryResultVenue => Venue,
    InlineQueryResultVideo => Video,
    InlineQueryResultVoice => Voice,
}

/// Message sent when an inline result is chosen. The wire shape is told apart by its fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InputMessageContent {
    Text(InputTextMessageContent),
    Venue(InputVenueMessageContent),
    Location(InputLocationMessageContent),
    Contact(InputContactMessageContent),
}

impl InputMessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        InputMessageContent::Text(InputTextMessageContent {
            message_text: text.into(),
            ..Default::default()
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputTextMessageContent {
    pub message_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<MessageEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_web_page_preview: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputLocationMessageContent {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximity_alert_radius: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputVenueMessageContent {
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foursquare_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foursquare_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_place_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputContactMessageContent {
    pub phone_number: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcard: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn article_carries_type_tag_and_content() {
        let r: InlineQueryResult = InlineQueryResultArticle::text("1", "Echo", "hello").into();
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(
            v,
            json!({
                "type": "article",
                "id": "1",
                "title": "Echo",
                "input_message_content": { "message_text": "hello" }
            })
        );
    }

    #[test]
    fn cached_and_fresh_share_tag() {
        let cached: InlineQueryResult = InlineQueryResultCachedGif {
            id: "c".into(),
            gif_file_id: "file".into(),
            ..Default::default()
        }
        .into();
        let fresh: InlineQueryResult = InlineQueryResultGif {
            id: "f".into(),
            gif_url: "https://x/y.gif".into(),
            thumb_url: "https://x/t.jpg".into(),
            ..Default::default()
        }
        .into();
        let cached = serde_json::to_value(&cached).unwrap();
        let fresh = serde_json::to_value(&fresh).unwrap();
        assert_eq!(cached["type"], "gif");
        assert_eq!(fresh["type"], "gif");
        assert_eq!(cached["gif_file_id"], "file");
        assert!(fresh.get("gif_file_id").is_none());
    }

    #[test]
    fn caption_fields_are_flattened() {
        let r: InlineQueryResult = InlineQueryResultCachedPhoto {
            id: "p".into(),
            photo_file_id: "file".into(),
            caption: Caption {
                caption: Some("*hi*".into()),
                parse_mode: Some(ParseMode::MarkdownV2),
                caption_entities: vec![],
            },
            ..Default::default()
        }
        .into();
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["type"], "photo");
        assert_eq!(v["caption"], "*hi*");
        assert_eq!(v["parse_mode"], "MarkdownV2");
        assert!(v.get("caption_entities").is_none());
    }

    #[test]
    fn input_content_variants_have_no_tag() {
        let venue = InputMessageContent::Venue(InputVenueMessageContent {
            latitude: 1.5,
            longitude: 2.5,
            title: "t".into(),
            address: "a".into(),
            ..Default::default()
        });
        let v = serde_json::to_value(&venue).unwrap();
        assert_eq!(
            v,
            json!({ "latitude": 1.5, "longitude": 2.5, "title": "t", "address": "a" })
        );
    }

    #[test]
    fn id_and_tag_for_every_variant_kind() {
        let sticker: InlineQueryResult = InlineQueryResultCachedSticker {
            id: "s".into(),
            sticker_file_id: "f".into(),
            ..Default::default()
        }
        .into();
        assert_eq!(sticker.id(), "s");
        assert_eq!(sticker.type_tag(), "sticker");
        let mp4: InlineQueryResult = InlineQueryResultCachedMpeg4Gif::default().into();
        assert_eq!(mp4.type_tag(), "mpeg4_gif");
    }
}
