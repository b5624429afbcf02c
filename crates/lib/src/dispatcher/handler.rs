//! Handler storage. One strongly-typed slot per message kind, so a handler always receives the
//! context shape it was registered for.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use super::context::{
    AnimationContext, AudioContext, CallbackQueryContext, ContactContext, Context, DiceContext,
    DocumentContext, GameContext, InlineQueryContext, LocationContext, PhotoContext, PollContext,
    StickerContext, TextContext, VenueContext, VideoContext, VideoNoteContext, VoiceContext,
};
use crate::api::Api;
use crate::types::MessageKind;

/// A registered passive handler taking context `C`.
pub type Handler<C> = Arc<dyn Fn(C) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// A background task started once per run.
pub type ActiveProcessor = Box<dyn FnOnce(Api) -> BoxFuture<'static, anyhow::Result<()>> + Send>;

pub(crate) fn handler<C, F, Fut>(f: F) -> Handler<C>
where
    C: Send + 'static,
    F: Fn(C) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(move |ctx| guarded(f(ctx)))
}

pub(crate) fn processor<F, Fut>(f: F) -> ActiveProcessor
where
    F: FnOnce(Api) -> Fut + Send + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Box::new(move |api| guarded(f(api)))
}

/// Box `fut`, turning a panic inside it into an error so it reaches the run loop.
fn guarded<Fut>(fut: Fut) -> BoxFuture<'static, anyhow::Result<()>>
where
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    AssertUnwindSafe(fut)
        .catch_unwind()
        .map(|res| res.unwrap_or_else(|payload| Err(panic_error(payload))))
        .boxed()
}

fn panic_error(payload: Box<dyn Any + Send>) -> anyhow::Error {
    let msg = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    anyhow::anyhow!("panicked: {}", msg)
}

#[derive(Default, Clone)]
pub(crate) struct HandlerRegistry {
    pub commands: HashMap<String, Handler<Context>>,
    pub default_command: Option<Handler<Context>>,
    pub default_message: Option<Handler<Context>>,
    pub text: Option<Handler<TextContext>>,
    pub photo: Option<Handler<PhotoContext>>,
    pub voice: Option<Handler<VoiceContext>>,
    pub audio: Option<Handler<AudioContext>>,
    pub video: Option<Handler<VideoContext>>,
    pub animation: Option<Handler<AnimationContext>>,
    pub document: Option<Handler<DocumentContext>>,
    pub sticker: Option<Handler<StickerContext>>,
    pub video_note: Option<Handler<VideoNoteContext>>,
    pub contact: Option<Handler<ContactContext>>,
    pub dice: Option<Handler<DiceContext>>,
    pub game: Option<Handler<GameContext>>,
    pub poll: Option<Handler<PollContext>>,
    pub venue: Option<Handler<VenueContext>>,
    pub location: Option<Handler<LocationContext>>,
    pub inline_query: Option<Handler<InlineQueryContext>>,
    pub callback_query: Option<Handler<CallbackQueryContext>>,
}

impl HandlerRegistry {
    pub fn has_typed(&self, kind: MessageKind) -> bool {
        match kind {
            MessageKind::Text => self.text.is_some(),
            MessageKind::Photo => self.photo.is_some(),
            MessageKind::Voice => self.voice.is_some(),
            MessageKind::Audio => self.audio.is_some(),
            MessageKind::Video => self.video.is_some(),
            MessageKind::Animation => self.animation.is_some(),
            MessageKind::Document => self.document.is_some(),
            MessageKind::Sticker => self.sticker.is_some(),
            MessageKind::VideoNote => self.video_note.is_some(),
            MessageKind::Contact => self.contact.is_some(),
            MessageKind::Dice => self.dice.is_some(),
            MessageKind::Game => self.game.is_some(),
            MessageKind::Poll => self.poll.is_some(),
            MessageKind::Venue => self.venue.is_some(),
            MessageKind::Location => self.location.is_some(),
        }
    }

    /// True when any update-driven handler is registered.
    pub fn has_passive(&self) -> bool {
        !self.commands.is_empty()
            || self.default_command.is_some()
            || self.default_message.is_some()
            || MessageKind::ALL.iter().any(|k| self.has_typed(*k))
            || self.inline_query.is_some()
            || self.callback_query.is_some()
    }
}
