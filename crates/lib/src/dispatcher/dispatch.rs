//! Routing of one update to its handlers.
//!
//! Every update is handled on its own spawned task, so ingestion never waits for a handler.
//! Handler errors are sent to the run loop's error channel.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::context::{
    AnimationContext, AudioContext, CallbackQueryContext, ContactContext, Context, DiceContext,
    DocumentContext, GameContext, InlineQueryContext, LocationContext, MessageContextBase,
    PhotoContext, PollContext, StickerContext, TextContext, VenueContext, VideoContext,
    VideoNoteContext, VoiceContext,
};
use super::error::BotError;
use super::handler::{Handler, HandlerRegistry};
use crate::api::Api;
use crate::types::{Message, MessageContent, Update, UpdateKind};

/// State shared by the ingestion source and every handler task. Read-only once a run starts.
pub(crate) struct Shared {
    pub api: Api,
    pub registry: HandlerRegistry,
    pub errors: mpsc::UnboundedSender<BotError>,
}

impl Shared {
    fn report(&self, err: BotError) {
        log::debug!("dispatcher: handler error: {}", err);
        if self.errors.send(err).is_err() {
            log::debug!("dispatcher: run loop gone, dropping handler error");
        }
    }

    async fn call<C>(&self, handler: &Handler<C>, ctx: C, name: &str) -> bool {
        match handler(ctx).await {
            Ok(()) => true,
            Err(error) => {
                self.report(BotError::Handler {
                    handler: name.to_string(),
                    error,
                });
                false
            }
        }
    }
}

/// Spawn handling of one update and return immediately.
pub(crate) fn dispatch_update(shared: &Arc<Shared>, update: Update) {
    let update_id = update.update_id;
    match update.kind {
        UpdateKind::InlineQuery(query) => {
            let Some(handler) = shared.registry.inline_query.clone() else {
                log::debug!("dispatcher: no inline handler for update {}", update_id);
                return;
            };
            let shared = Arc::clone(shared);
            tokio::spawn(async move {
                let ctx = InlineQueryContext {
                    api: shared.api.clone(),
                    query,
                };
                shared.call(&handler, ctx, "inline query").await;
            });
        }
        UpdateKind::CallbackQuery(query) => {
            let Some(handler) = shared.registry.callback_query.clone() else {
                log::debug!("dispatcher: no callback handler for update {}", update_id);
                return;
            };
            let shared = Arc::clone(shared);
            tokio::spawn(async move {
                let ctx = CallbackQueryContext {
                    api: shared.api.clone(),
                    query,
                };
                shared.call(&handler, ctx, "callback query").await;
            });
        }
        UpdateKind::Message(message) => {
            let shared = Arc::clone(shared);
            tokio::spawn(async move {
                process_message(&shared, Arc::new(message)).await;
            });
        }
        other => {
            log::debug!(
                "dispatcher: ignoring {} update {}",
                other.name(),
                update_id
            );
        }
    }
}

/// Command scan, then kind-based dispatch, for one message.
pub(crate) async fn process_message(shared: &Shared, message: Arc<Message>) {
    let registry = &shared.registry;
    let ctx = Context::new(shared.api.clone(), Arc::clone(&message));

    // Each command entity looks up the whole text. A miss runs the default command handler at
    // most once and ends the scan; kind-based dispatch runs either way.
    for _ in message.entities.iter().filter(|e| e.is_bot_command()) {
        match registry.commands.get(message.text()) {
            Some(handler) => {
                shared
                    .call(handler, ctx.clone(), &format!("command {}", message.text()))
                    .await;
            }
            None => {
                if let Some(handler) = &registry.default_command {
                    shared.call(handler, ctx.clone(), "default command").await;
                }
                break;
            }
        }
    }

    let typed = match message.content() {
        Some(content) if registry.has_typed(content.kind()) => content,
        _ => {
            if let Some(handler) = &registry.default_message {
                shared.call(handler, ctx, "default message").await;
            }
            return;
        }
    };

    let base = MessageContextBase::new(shared.api.clone(), &message);
    // has_typed guarantees the slot matching `typed` is filled.
    match typed {
        MessageContent::Text {
            text,
            reply_to_message,
        } => {
            if let Some(h) = &registry.text {
                let ctx = TextContext {
                    base,
                    reply_to_message: reply_to_message.cloned().map(Box::new),
                    text: text.to_string(),
                };
                shared.call(h, ctx, "text").await;
            }
        }
        MessageContent::Photo { photo, caption } => {
            if let Some(h) = &registry.photo {
                let ctx = PhotoContext {
                    base,
                    photo: photo.to_vec(),
                    caption: caption.map(str::to_string),
                };
                shared.call(h, ctx, "photo").await;
            }
        }
        MessageContent::Voice(voice) => {
            if let Some(h) = &registry.voice {
                let ctx = VoiceContext {
                    base,
                    voice: voice.clone(),
                };
                shared.call(h, ctx, "voice").await;
            }
        }
        MessageContent::Audio { audio, caption } => {
            if let Some(h) = &registry.audio {
                let ctx = AudioContext {
                    base,
                    audio: audio.clone(),
                    caption: caption.map(str::to_string),
                };
                shared.call(h, ctx, "audio").await;
            }
        }
        MessageContent::Video { video, caption } => {
            if let Some(h) = &registry.video {
                let ctx = VideoContext {
                    base,
                    video: video.clone(),
                    caption: caption.map(str::to_string),
                };
                shared.call(h, ctx, "video").await;
            }
        }
        MessageContent::Animation {
            animation,
            document,
        } => {
            if let Some(h) = &registry.animation {
                let ctx = AnimationContext {
                    base,
                    animation: animation.clone(),
                    document: document.cloned(),
                };
                shared.call(h, ctx, "animation").await;
            }
        }
        MessageContent::Document { document, caption } => {
            if let Some(h) = &registry.document {
                let ctx = DocumentContext {
                    base,
                    document: document.clone(),
                    caption: caption.map(str::to_string),
                };
                shared.call(h, ctx, "document").await;
            }
        }
        MessageContent::Sticker(sticker) => {
            if let Some(h) = &registry.sticker {
                let ctx = StickerContext {
                    base,
                    sticker: sticker.clone(),
                };
                shared.call(h, ctx, "sticker").await;
            }
        }
        MessageContent::VideoNote(note) => {
            if let Some(h) = &registry.video_note {
                let ctx = VideoNoteContext {
                    base,
                    video_note: note.clone(),
                };
                shared.call(h, ctx, "video note").await;
            }
        }
        MessageContent::Contact(contact) => {
            if let Some(h) = &registry.contact {
                let ctx = ContactContext {
                    base,
                    contact: contact.clone(),
                };
                shared.call(h, ctx, "contact").await;
            }
        }
        MessageContent::Dice(dice) => {
            if let Some(h) = &registry.dice {
                let ctx = DiceContext {
                    base,
                    dice: dice.clone(),
                };
                shared.call(h, ctx, "dice").await;
            }
        }
        MessageContent::Game(game) => {
            if let Some(h) = &registry.game {
                let ctx = GameContext {
                    base,
                    game: game.clone(),
                };
                shared.call(h, ctx, "game").await;
            }
        }
        MessageContent::Poll(poll) => {
            if let Some(h) = &registry.poll {
                let ctx = PollContext {
                    base,
                    poll: poll.clone(),
                };
                shared.call(h, ctx, "poll").await;
            }
        }
        MessageContent::Venue(venue) => {
            if let Some(h) = &registry.venue {
                let ctx = VenueContext {
                    base,
                    venue: venue.clone(),
                };
                shared.call(h, ctx, "venue").await;
            }
        }
        MessageContent::Location(location) => {
            if let Some(h) = &registry.location {
                let ctx = LocationContext {
                    base,
                    location: location.clone(),
                };
                shared.call(h, ctx, "location").await;
            }
        }
    }
}
