//! Update dispatcher: handler registry, ingestion (long polling or webhook) and run lifetime.
//!
//! Register handlers on a [`Dispatcher`], then call [`Dispatcher::run`]. Each update is handled
//! on its own task. The first handler or processor error ends the run; otherwise the run ends
//! once every active processor has returned and, when any passive handler is registered, the
//! ingestion source has been stopped through a [`ShutdownHandle`].

mod context;
mod dispatch;
mod error;
mod handler;
mod polling;
mod supervisor;
mod webhook;

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::api::{Api, SetWebhookOptions};
use crate::types::WebhookInfo;
use dispatch::Shared;
use handler::HandlerRegistry;
use supervisor::Unit;
use webhook::WebhookEngine;

pub use context::{
    AnimationContext, AudioContext, CallbackQueryContext, ContactContext, Context, DiceContext,
    DocumentContext, FileContext, GameContext, InlineQueryContext, LocationContext,
    MessageContext, MessageContextBase, PhotoContext, PollContext, StickerContext, TextContext,
    VenueContext, VideoContext, VideoNoteContext, VoiceContext,
};
pub use error::BotError;
pub use handler::{ActiveProcessor, Handler};

/// Default long-poll timeout in seconds.
pub const DEFAULT_POLL_TIMEOUT: u64 = 15;

/// Lifecycle of a run as seen through a [`ShutdownHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running,
    /// Shutdown requested; waiting for ingestion and processors to finish.
    Draining,
    Terminated,
}

struct ShutdownInner {
    stop: watch::Sender<bool>,
    phase: watch::Sender<RunPhase>,
}

/// Cloneable handle that stops a dispatcher's ingestion source and observes its phase.
#[derive(Clone)]
pub struct ShutdownHandle {
    inner: Arc<ShutdownInner>,
}

impl ShutdownHandle {
    fn new() -> Self {
        let (stop, _) = watch::channel(false);
        let (phase, _) = watch::channel(RunPhase::Idle);
        Self {
            inner: Arc::new(ShutdownInner { stop, phase }),
        }
    }

    /// Stop ingestion. Active processors are not interrupted.
    pub fn shutdown(&self) {
        if !self.inner.stop.send_replace(true) {
            log::info!("dispatcher: shutdown requested");
        }
        self.inner.phase.send_if_modified(|phase| {
            if *phase == RunPhase::Running {
                *phase = RunPhase::Draining;
                true
            } else {
                false
            }
        });
    }

    pub fn is_shutdown(&self) -> bool {
        *self.inner.stop.borrow()
    }

    pub fn phase(&self) -> RunPhase {
        *self.inner.phase.borrow()
    }

    /// Resolves once the run has returned.
    pub async fn terminated(&self) {
        let mut rx = self.inner.phase.subscribe();
        let _ = rx.wait_for(|p| *p == RunPhase::Terminated).await;
    }

    fn stop_signal(&self) -> watch::Receiver<bool> {
        self.inner.stop.subscribe()
    }

    fn set_phase(&self, phase: RunPhase) {
        self.inner.phase.send_replace(phase);
    }
}

impl std::fmt::Debug for ShutdownHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShutdownHandle")
            .field("stop", &self.is_shutdown())
            .field("phase", &self.phase())
            .finish()
    }
}

/// Bot dispatcher. Configure, then consume with [`run`](Self::run).
pub struct Dispatcher {
    api: Api,
    poll_timeout: u64,
    registry: HandlerRegistry,
    processors: Vec<ActiveProcessor>,
    webhook: Option<WebhookEngine>,
    state: ShutdownHandle,
}

impl Dispatcher {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            registry: HandlerRegistry::default(),
            processors: Vec::new(),
            webhook: None,
            state: ShutdownHandle::new(),
        }
    }

    /// Long-poll timeout in seconds. 0 polls without waiting.
    pub fn with_poll_timeout(mut self, seconds: u64) -> Self {
        self.poll_timeout = seconds;
        self
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.state.clone()
    }

    /// True once [`set_webhook`](Self::set_webhook) has switched ingestion to webhook mode.
    pub fn is_webhook(&self) -> bool {
        self.webhook.is_some()
    }

    /// Register `url` with the Bot API and serve deliveries on `listen` at the URL's path.
    ///
    /// A `secret_token` in `options` is also required on every inbound request.
    pub async fn set_webhook(
        &mut self,
        url: &str,
        listen: &str,
        options: SetWebhookOptions,
    ) -> Result<(), BotError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| BotError::InvalidWebhookUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        self.api.set_webhook(url, &options).await?;
        let path = match parsed.path() {
            "" => "/".to_string(),
            p => p.to_string(),
        };
        log::info!("dispatcher: webhook set, serving {} on {}", path, listen);
        self.webhook = Some(WebhookEngine {
            path,
            listen: listen.to_string(),
            secret: options.secret_token,
        });
        Ok(())
    }

    /// Remove the remote webhook and go back to long polling.
    pub async fn delete_webhook(&mut self, drop_pending_updates: bool) -> Result<(), BotError> {
        self.webhook = None;
        self.api.delete_webhook(drop_pending_updates).await?;
        Ok(())
    }

    pub async fn get_webhook_info(&self) -> Result<WebhookInfo, BotError> {
        Ok(self.api.get_webhook_info().await?)
    }

    /// Handler for messages whose whole text equals `command`, e.g. "/start".
    pub fn add_command_processor<F, Fut>(&mut self, command: impl Into<String>, f: F)
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry
            .commands
            .insert(command.into(), handler::handler(f));
    }

    /// Handler for command messages with no exact match.
    pub fn set_default_command_processor<F, Fut>(&mut self, f: F)
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry.default_command = Some(handler::handler(f));
    }

    /// Handler for messages with no typed handler for their kind, including unclassified ones.
    pub fn set_message_processor<F, Fut>(&mut self, f: F)
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry.default_message = Some(handler::handler(f));
    }

    pub fn set_text_processor<F, Fut>(&mut self, f: F)
    where
        F: Fn(TextContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry.text = Some(handler::handler(f));
    }

    pub fn set_photo_processor<F, Fut>(&mut self, f: F)
    where
        F: Fn(PhotoContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry.photo = Some(handler::handler(f));
    }

    pub fn set_voice_processor<F, Fut>(&mut self, f: F)
    where
        F: Fn(VoiceContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry.voice = Some(handler::handler(f));
    }

    pub fn set_audio_processor<F, Fut>(&mut self, f: F)
    where
        F: Fn(AudioContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry.audio = Some(handler::handler(f));
    }

    pub fn set_video_processor<F, Fut>(&mut self, f: F)
    where
        F: Fn(VideoContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry.video = Some(handler::handler(f));
    }

    pub fn set_animation_processor<F, Fut>(&mut self, f: F)
    where
        F: Fn(AnimationContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry.animation = Some(handler::handler(f));
    }

    pub fn set_document_processor<F, Fut>(&mut self, f: F)
    where
        F: Fn(DocumentContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry.document = Some(handler::handler(f));
    }

    pub fn set_sticker_processor<F, Fut>(&mut self, f: F)
    where
        F: Fn(StickerContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry.sticker = Some(handler::handler(f));
    }

    pub fn set_video_note_processor<F, Fut>(&mut self, f: F)
    where
        F: Fn(VideoNoteContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry.video_note = Some(handler::handler(f));
    }

    pub fn set_contact_processor<F, Fut>(&mut self, f: F)
    where
        F: Fn(ContactContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry.contact = Some(handler::handler(f));
    }

    pub fn set_dice_processor<F, Fut>(&mut self, f: F)
    where
        F: Fn(DiceContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry.dice = Some(handler::handler(f));
    }

    pub fn set_game_processor<F, Fut>(&mut self, f: F)
    where
        F: Fn(GameContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry.game = Some(handler::handler(f));
    }

    pub fn set_poll_processor<F, Fut>(&mut self, f: F)
    where
        F: Fn(PollContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry.poll = Some(handler::handler(f));
    }

    pub fn set_venue_processor<F, Fut>(&mut self, f: F)
    where
        F: Fn(VenueContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry.venue = Some(handler::handler(f));
    }

    pub fn set_location_processor<F, Fut>(&mut self, f: F)
    where
        F: Fn(LocationContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry.location = Some(handler::handler(f));
    }

    /// Inline queries go only to this handler; message classification is skipped.
    pub fn set_inline_query_processor<F, Fut>(&mut self, f: F)
    where
        F: Fn(InlineQueryContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry.inline_query = Some(handler::handler(f));
    }

    pub fn set_callback_query_processor<F, Fut>(&mut self, f: F)
    where
        F: Fn(CallbackQueryContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.registry.callback_query = Some(handler::handler(f));
    }

    /// Background task started once when the run begins. Its error ends the run.
    pub fn add_active_processor<F, Fut>(&mut self, f: F)
    where
        F: FnOnce(Api) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.processors.push(handler::processor(f));
    }

    /// Verify the API, start processors and ingestion, and wait for completion or the first error.
    ///
    /// Handler tasks still in flight when this returns keep running detached.
    pub async fn run(self) -> Result<(), BotError> {
        let Dispatcher {
            api,
            poll_timeout,
            registry,
            processors,
            webhook,
            state,
        } = self;

        let me = api.get_me().await.map_err(BotError::ApiCheck)?;
        log::info!(
            "dispatcher: running as @{}",
            me.username.as_deref().unwrap_or(&me.first_name)
        );
        if webhook.is_none() {
            api.delete_webhook(false).await?;
        }

        let passive = registry.has_passive();
        let total = processors.len() + usize::from(passive);
        if total == 0 {
            log::warn!("dispatcher: no handlers or active processors registered, nothing to run");
            state.set_phase(RunPhase::Terminated);
            return Ok(());
        }

        let (err_tx, mut err_rx) = mpsc::unbounded_channel();
        let (unit_tx, done_rx) = supervisor::spawn(total);
        state.set_phase(if state.is_shutdown() {
            RunPhase::Draining
        } else {
            RunPhase::Running
        });

        for (i, processor) in processors.into_iter().enumerate() {
            let index = i + 1;
            let api = api.clone();
            let errors = err_tx.clone();
            let units = unit_tx.clone();
            tokio::spawn(async move {
                if let Err(error) = processor(api).await {
                    log::warn!("dispatcher: active processor #{} failed: {:#}", index, error);
                    let _ = errors.send(BotError::Processor { index, error });
                }
                let _ = units.send(Unit::Processor(index));
            });
        }

        let shared = Arc::new(Shared {
            api,
            registry,
            errors: err_tx.clone(),
        });
        let stop = state.stop_signal();
        tokio::spawn(async move {
            let result = match webhook {
                Some(engine) => webhook::serve(engine, shared, stop).await,
                None => polling::run(shared, poll_timeout, stop)
                    .await
                    .map_err(BotError::Polling),
            };
            match result {
                Ok(()) if passive => {
                    let _ = unit_tx.send(Unit::Passive);
                }
                Ok(()) => {}
                Err(e) => {
                    log::warn!("dispatcher: ingestion failed: {}", e);
                    let _ = err_tx.send(e);
                }
            }
        });

        let outcome = tokio::select! {
            biased;
            Some(err) = err_rx.recv() => Err(err),
            done = done_rx => match done {
                Ok(()) => Ok(()),
                // Completion senders only go away early after an error was queued.
                Err(_) => err_rx.recv().await.map_or(Ok(()), Err),
            },
        };

        state.shutdown();
        state.set_phase(RunPhase::Terminated);
        match &outcome {
            Ok(()) => log::info!("dispatcher: run finished"),
            Err(e) => log::warn!("dispatcher: run ended with error: {}", e),
        }
        outcome
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("api", &self.api)
            .field("poll_timeout", &self.poll_timeout)
            .field("processors", &self.processors.len())
            .field("webhook", &self.webhook)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shutdown_moves_running_to_draining_only() {
        let handle = ShutdownHandle::new();
        handle.shutdown();
        assert_eq!(handle.phase(), RunPhase::Idle);
        assert!(handle.is_shutdown());

        let handle = ShutdownHandle::new();
        handle.set_phase(RunPhase::Running);
        handle.shutdown();
        assert_eq!(handle.phase(), RunPhase::Draining);
    }

    #[tokio::test]
    async fn terminated_resolves_after_the_phase_flips() {
        let handle = ShutdownHandle::new();
        let waiter = {
            let handle = handle.clone();
            tokio::spawn(async move { handle.terminated().await })
        };
        handle.set_phase(RunPhase::Terminated);
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn set_webhook_rejects_a_bad_url_before_calling_the_api() {
        let api = Api::new(1, "t", crate::api::ApiOptions {
            client: None,
            base_url: Some("http://127.0.0.1:9".into()),
        });
        let mut dispatcher = Dispatcher::new(api);
        let err = dispatcher
            .set_webhook("not a url", "127.0.0.1:0", SetWebhookOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BotError::InvalidWebhookUrl { .. }));
        assert!(!dispatcher.is_webhook());
    }
}
