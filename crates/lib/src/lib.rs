//! Telegram Bot API client and update dispatcher.
//!
//! [`Api`] wraps the Bot API methods over one shared HTTP client. [`Dispatcher`] receives updates
//! by long polling or webhook, classifies each message and hands it to the handler registered for
//! its kind.

pub mod api;
pub mod config;
pub mod dispatcher;
pub mod types;

pub use api::{Api, ApiError, ApiOptions};
pub use dispatcher::{
    AnimationContext, AudioContext, BotError, CallbackQueryContext, ContactContext, Context,
    DiceContext, Dispatcher, DocumentContext, FileContext, GameContext, InlineQueryContext,
    LocationContext, MessageContext, MessageContextBase, PhotoContext, PollContext, RunPhase,
    ShutdownHandle, StickerContext, TextContext, VenueContext, VideoContext, VideoNoteContext,
    VoiceContext,
};
