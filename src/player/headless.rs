//! Provider used by the command-line driver.
//!
//! There is no page to embed into, so players only log what a real player
//! would be asked to do. Each embed reports ready right away through the
//! channel handed to [`HeadlessProvider::new`].

use super::{EmbedProvider, EmbedRequest, PlayerError, ReadyToken, TwitchPlayer, YouTubePlayer};
use tokio::sync::mpsc;

pub struct HeadlessProvider {
    ready_tx: Option<mpsc::UnboundedSender<ReadyToken>>,
    embedded: usize,
}

impl HeadlessProvider {
    pub fn new(ready_tx: mpsc::UnboundedSender<ReadyToken>) -> Self {
        Self {
            ready_tx: Some(ready_tx),
            embedded: 0,
        }
    }

    /// Provider whose players never become ready (one-shot rendering).
    pub fn detached() -> Self {
        Self {
            ready_tx: None,
            embedded: 0,
        }
    }

    /// Players created so far.
    pub fn embedded(&self) -> usize {
        self.embedded
    }

    fn register(&mut self, request: &EmbedRequest) -> HeadlessPlayer {
        self.embedded += 1;
        log::info!(
            "Embedding {} into #{} (muted={}, parent={})",
            request.source.value(),
            request.container_id,
            request.start_muted,
            request.parent
        );
        if let Some(tx) = &self.ready_tx
            && tx.send(request.ready).is_err()
        {
            log::debug!("Ready listener gone for #{}", request.container_id);
        }
        HeadlessPlayer {
            container_id: request.container_id.clone(),
            muted: request.start_muted,
        }
    }
}

struct HeadlessPlayer {
    container_id: String,
    muted: bool,
}

impl HeadlessPlayer {
    fn update(&mut self, muted: bool) {
        if self.muted != muted {
            log::info!(
                "#{} {}",
                self.container_id,
                if muted { "muted" } else { "unmuted" }
            );
        }
        self.muted = muted;
    }
}

impl TwitchPlayer for HeadlessPlayer {
    fn set_muted(&mut self, muted: bool) -> Result<(), PlayerError> {
        self.update(muted);
        Ok(())
    }
}

impl YouTubePlayer for HeadlessPlayer {
    fn mute(&mut self) -> Result<(), PlayerError> {
        self.update(true);
        Ok(())
    }

    fn unmute(&mut self) -> Result<(), PlayerError> {
        self.update(false);
        Ok(())
    }
}

impl EmbedProvider for HeadlessProvider {
    fn embed_twitch(
        &mut self,
        request: &EmbedRequest,
    ) -> Result<Box<dyn TwitchPlayer>, PlayerError> {
        Ok(Box::new(self.register(request)))
    }

    fn embed_youtube(
        &mut self,
        request: &EmbedRequest,
    ) -> Result<Box<dyn YouTubePlayer>, PlayerError> {
        Ok(Box::new(self.register(request)))
    }
}
