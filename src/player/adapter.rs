use super::{
    EmbedProvider, EmbedRequest, Placeholder, PlayerHandle, PlayerSlot, ReadyToken, SlotContent,
};
use crate::channels::{StreamDescriptor, StreamSource};
use crate::layout::SlotId;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Owns the player of every mounted slot.
///
/// Mute requests are recorded per slot and applied as soon as the slot's
/// player is ready; a request made before that is re-applied on the ready
/// event. Provider failures never escape: they turn into placeholders or log
/// lines.
pub struct PlayerAdapter<P: EmbedProvider> {
    provider: P,
    parent: String,
    slots: BTreeMap<SlotId, PlayerSlot>,
    /// Survives teardown so a late ready event can never match a new mount
    generations: HashMap<SlotId, u64>,
}

impl<P: EmbedProvider> PlayerAdapter<P> {
    pub fn new(provider: P, parent: impl Into<String>) -> Self {
        Self {
            provider,
            parent: parent.into(),
            slots: BTreeMap::new(),
            generations: HashMap::new(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn slot(&self, id: SlotId) -> Option<&PlayerSlot> {
        self.slots.get(&id)
    }

    pub fn slots(&self) -> impl Iterator<Item = &PlayerSlot> {
        self.slots.values()
    }

    pub fn mounted_slots(&self) -> Vec<SlotId> {
        self.slots.keys().copied().collect()
    }

    /// Replace whatever `slot` holds with a player for `descriptor`.
    ///
    /// Returns the token the provider will report readiness with.
    pub fn mount(
        &mut self,
        slot: SlotId,
        descriptor: Option<&StreamDescriptor>,
        start_muted: bool,
    ) -> ReadyToken {
        self.teardown(slot);

        let generation = self
            .generations
            .entry(slot)
            .and_modify(|g| *g += 1)
            .or_insert(1);
        let token = ReadyToken {
            slot,
            generation: *generation,
        };

        let content = match descriptor {
            Some(descriptor) => self.embed(descriptor, token, start_muted),
            None => SlotContent::Placeholder(Placeholder::NoChannel),
        };
        log::debug!(
            "Mounted {} (generation {}): {}",
            slot,
            token.generation,
            descriptor.map_or_else(|| "empty".to_string(), |d| d.to_string())
        );

        self.slots.insert(
            slot,
            PlayerSlot {
                id: slot,
                descriptor: descriptor.cloned(),
                content,
                desired_muted: start_muted,
                generation: token.generation,
            },
        );
        token
    }

    fn embed(
        &mut self,
        descriptor: &StreamDescriptor,
        token: ReadyToken,
        start_muted: bool,
    ) -> SlotContent {
        let container_id = format!(
            "{}-{}-{}",
            descriptor.kind().provider(),
            token.slot,
            Uuid::new_v4()
        );
        let request = EmbedRequest {
            container_id: container_id.clone(),
            source: descriptor.source().clone(),
            autoplay: true,
            start_muted,
            parent: self.parent.clone(),
            ready: token,
        };

        let handle = match descriptor.source() {
            StreamSource::TwitchChannel(_) => self
                .provider
                .embed_twitch(&request)
                .map(PlayerHandle::Twitch),
            StreamSource::YouTubeChannel(_) | StreamSource::YouTubeVideo(_) => self
                .provider
                .embed_youtube(&request)
                .map(PlayerHandle::YouTube),
            StreamSource::RawUrl(url) => {
                return SlotContent::Frame {
                    container_id,
                    url: url.clone(),
                };
            }
        };

        match handle {
            Ok(handle) => SlotContent::Player {
                container_id,
                handle,
                ready: false,
            },
            Err(e) => {
                log::warn!("Could not embed {} in {}: {}", descriptor, token.slot, e);
                SlotContent::Placeholder(Placeholder::Unsupported)
            }
        }
    }

    /// Record the desired mute state and apply it if the player is ready.
    pub fn set_muted(&mut self, slot: SlotId, muted: bool) {
        let Some(entry) = self.slots.get_mut(&slot) else {
            log::debug!("set_muted({}) on unmounted {}", muted, slot);
            return;
        };
        entry.desired_muted = muted;
        if let SlotContent::Player {
            handle,
            ready: true,
            ..
        } = &mut entry.content
        {
            apply_muted(slot, handle, muted);
        }
    }

    /// Handle a provider's ready event.
    ///
    /// Returns `false` for tokens of players that were replaced or torn down.
    pub fn player_ready(&mut self, token: ReadyToken) -> bool {
        let Some(entry) = self.slots.get_mut(&token.slot) else {
            log::debug!("Ready event for unmounted {}", token.slot);
            return false;
        };
        if entry.generation != token.generation {
            log::debug!(
                "Ignoring stale ready event for {} (generation {}, current {})",
                token.slot,
                token.generation,
                entry.generation
            );
            return false;
        }
        let desired = entry.desired_muted;
        match &mut entry.content {
            SlotContent::Player { handle, ready, .. } => {
                *ready = true;
                apply_muted(token.slot, handle, desired);
                true
            }
            _ => false,
        }
    }

    /// Drop the slot's player. Unmounted slots are ignored.
    pub fn teardown(&mut self, slot: SlotId) {
        if let Some(entry) = self.slots.remove(&slot) {
            log::debug!("Tore down {} (generation {})", slot, entry.generation);
        }
    }

    pub fn teardown_all(&mut self) {
        for slot in self.mounted_slots() {
            self.teardown(slot);
        }
    }
}

fn apply_muted(slot: SlotId, handle: &mut PlayerHandle, muted: bool) {
    if let Err(e) = handle.apply_muted(muted) {
        // Desired state stays recorded; the next request or ready event retries
        log::warn!(
            "Failed to set muted={} on {} player in {}: {}",
            muted,
            handle.provider(),
            slot,
            e
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::parse;
    use crate::player::{PlayerError, TwitchPlayer, YouTubePlayer};
    use parking_lot::Mutex;
    use std::sync::Arc;

    type CallLog = Arc<Mutex<Vec<String>>>;

    struct LoggingPlayer {
        name: String,
        log: CallLog,
        fail: bool,
    }

    impl LoggingPlayer {
        fn record(&self, call: &str) -> Result<(), PlayerError> {
            self.log.lock().push(format!("{}:{}", self.name, call));
            if self.fail {
                return Err(PlayerError::Control("player gone".to_string()));
            }
            Ok(())
        }
    }

    impl TwitchPlayer for LoggingPlayer {
        fn set_muted(&mut self, muted: bool) -> Result<(), PlayerError> {
            self.record(&format!("set_muted({muted})"))
        }
    }

    impl YouTubePlayer for LoggingPlayer {
        fn mute(&mut self) -> Result<(), PlayerError> {
            self.record("mute")
        }

        fn unmute(&mut self) -> Result<(), PlayerError> {
            self.record("unmute")
        }
    }

    #[derive(Default)]
    struct LoggingProvider {
        log: CallLog,
        requests: Vec<EmbedRequest>,
        reject_youtube: bool,
        failing_players: bool,
    }

    impl LoggingProvider {
        fn player(&self, request: &EmbedRequest) -> LoggingPlayer {
            LoggingPlayer {
                name: request.source.value().to_string(),
                log: Arc::clone(&self.log),
                fail: self.failing_players,
            }
        }
    }

    impl EmbedProvider for LoggingProvider {
        fn embed_twitch(
            &mut self,
            request: &EmbedRequest,
        ) -> Result<Box<dyn TwitchPlayer>, PlayerError> {
            self.requests.push(request.clone());
            Ok(Box::new(self.player(request)))
        }

        fn embed_youtube(
            &mut self,
            request: &EmbedRequest,
        ) -> Result<Box<dyn YouTubePlayer>, PlayerError> {
            self.requests.push(request.clone());
            if self.reject_youtube {
                return Err(PlayerError::Unavailable {
                    provider: "youtube",
                    reason: "iframe API not loaded".to_string(),
                });
            }
            Ok(Box::new(self.player(request)))
        }
    }

    fn calls(adapter: &PlayerAdapter<LoggingProvider>) -> Vec<String> {
        adapter.provider().log.lock().clone()
    }

    #[test]
    fn test_mount_builds_request() {
        let streams = parse("twitch:foo");
        let mut adapter = PlayerAdapter::new(LoggingProvider::default(), "example.com");
        let token = adapter.mount(SlotId::LEFT, streams.first(), true);

        let request = &adapter.provider().requests[0];
        assert!(request.container_id.starts_with("twitch-tile0-"));
        assert_eq!(request.parent, "example.com");
        assert!(request.autoplay);
        assert!(request.start_muted);
        assert_eq!(request.ready, token);
        assert!(!adapter.slot(SlotId::LEFT).unwrap().is_ready());
    }

    #[test]
    fn test_mute_before_ready_applied_on_ready() {
        let streams = parse("twitch:foo");
        let mut adapter = PlayerAdapter::new(LoggingProvider::default(), "localhost");
        let token = adapter.mount(SlotId::LEFT, streams.first(), false);

        adapter.set_muted(SlotId::LEFT, true);
        assert!(calls(&adapter).is_empty());

        assert!(adapter.player_ready(token));
        assert_eq!(calls(&adapter), vec!["foo:set_muted(true)"]);
        assert!(adapter.slot(SlotId::LEFT).unwrap().desired_muted());
    }

    #[test]
    fn test_youtube_uses_mute_unmute() {
        let streams = parse("youtube:video:abc");
        let mut adapter = PlayerAdapter::new(LoggingProvider::default(), "localhost");
        let token = adapter.mount(SlotId::Focus, streams.first(), true);
        adapter.player_ready(token);
        adapter.set_muted(SlotId::Focus, false);
        assert_eq!(calls(&adapter), vec!["abc:mute", "abc:unmute"]);
    }

    #[test]
    fn test_stale_ready_ignored() {
        let streams = parse("twitch:a,twitch:b");
        let mut adapter = PlayerAdapter::new(LoggingProvider::default(), "localhost");
        let old = adapter.mount(SlotId::Focus, streams.first(), true);
        let new = adapter.mount(SlotId::Focus, streams.get(1), true);

        assert!(!adapter.player_ready(old));
        assert!(!adapter.slot(SlotId::Focus).unwrap().is_ready());
        assert!(adapter.player_ready(new));
        assert_eq!(calls(&adapter), vec!["b:set_muted(true)"]);
    }

    #[test]
    fn test_ready_after_teardown_and_remount_is_stale() {
        let streams = parse("twitch:a");
        let mut adapter = PlayerAdapter::new(LoggingProvider::default(), "localhost");
        let old = adapter.mount(SlotId::LEFT, streams.first(), true);
        adapter.teardown(SlotId::LEFT);
        assert!(!adapter.player_ready(old));
        adapter.mount(SlotId::LEFT, streams.first(), true);
        assert!(!adapter.player_ready(old));
    }

    #[test]
    fn test_placeholders() {
        let streams = parse("youtube:channel:UC123");
        let provider = LoggingProvider {
            reject_youtube: true,
            ..LoggingProvider::default()
        };
        let mut adapter = PlayerAdapter::new(provider, "localhost");
        adapter.mount(SlotId::LEFT, streams.first(), true);
        adapter.mount(SlotId::RIGHT, None, true);

        let left = adapter.slot(SlotId::LEFT).unwrap();
        assert_eq!(left.placeholder(), Some(Placeholder::Unsupported));
        assert!(left.descriptor().is_some());
        let right = adapter.slot(SlotId::RIGHT).unwrap();
        assert_eq!(right.placeholder(), Some(Placeholder::NoChannel));
        assert_eq!(right.placeholder().map(Placeholder::text), Some("No channel"));
    }

    #[test]
    fn test_raw_url_is_plain_frame() {
        let streams = parse("url:https://x.example/embed");
        let mut adapter = PlayerAdapter::new(LoggingProvider::default(), "localhost");
        let token = adapter.mount(SlotId::LEFT, streams.first(), true);
        adapter.set_muted(SlotId::LEFT, false);

        assert!(adapter.provider().requests.is_empty());
        assert!(!adapter.player_ready(token));
        match adapter.slot(SlotId::LEFT).unwrap().content() {
            SlotContent::Frame { url, container_id } => {
                assert_eq!(url, "https://x.example/embed");
                assert!(container_id.starts_with("url-tile0-"));
            }
            other => panic!("expected frame, got {other:?}"),
        }
    }

    #[test]
    fn test_control_errors_suppressed_intent_kept() {
        let streams = parse("twitch:foo");
        let provider = LoggingProvider {
            failing_players: true,
            ..LoggingProvider::default()
        };
        let mut adapter = PlayerAdapter::new(provider, "localhost");
        let token = adapter.mount(SlotId::LEFT, streams.first(), true);
        adapter.player_ready(token);
        adapter.set_muted(SlotId::LEFT, false);

        assert_eq!(calls(&adapter).len(), 2);
        assert!(!adapter.slot(SlotId::LEFT).unwrap().desired_muted());
    }

    #[test]
    fn test_set_muted_on_unmounted_slot_is_ignored() {
        let mut adapter = PlayerAdapter::new(LoggingProvider::default(), "localhost");
        adapter.set_muted(SlotId::Focus, false);
        assert!(adapter.slot(SlotId::Focus).is_none());
    }
}
