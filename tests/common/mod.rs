//! Shared integration test helpers for spectate.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#[allow(dead_code)]` keeps files that use only some helpers quiet.

#![allow(dead_code)]

use parking_lot::Mutex;
use spectate::controller::Controller;
use spectate::player::{
    EmbedProvider, EmbedRequest, PlayerError, ReadyToken, TwitchPlayer, YouTubePlayer,
};
use spectate::scheduler::{Scheduler, TimerFired, TimerId, TimerTask};
use spectate::SlotId;
use spectate_config::Config;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

/// A scheduled timer in [`ManualScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualTimer {
    pub task: TimerTask,
    pub period: Duration,
    pub repeating: bool,
}

/// Scheduler whose timers only fire when a test says so.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pub live: BTreeMap<TimerId, ManualTimer>,
    pub cancelled: Vec<TimerId>,
}

impl ManualScheduler {
    pub fn live_count(&self, task: TimerTask) -> usize {
        self.live.values().filter(|t| t.task == task).count()
    }

    /// Fire the oldest live timer for `task`. One-shot timers are removed.
    pub fn fire(&mut self, task: TimerTask) -> Option<TimerFired> {
        let (id, repeating) = self
            .live
            .iter()
            .find(|(_, t)| t.task == task)
            .map(|(id, t)| (*id, t.repeating))?;
        if !repeating {
            self.live.remove(&id);
        }
        Some(TimerFired { id, task })
    }

    fn insert(&mut self, timer: ManualTimer) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.live.insert(id, timer);
        id
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, every: Duration, task: TimerTask) -> TimerId {
        self.insert(ManualTimer {
            task,
            period: every,
            repeating: true,
        })
    }

    fn schedule_once(&mut self, after: Duration, task: TimerTask) -> TimerId {
        self.insert(ManualTimer {
            task,
            period: after,
            repeating: false,
        })
    }

    fn cancel(&mut self, id: TimerId) {
        if self.live.remove(&id).is_some() {
            self.cancelled.push(id);
        }
    }
}

/// Mute state each player was last told to have, keyed by container id.
pub type PlayerStates = Arc<Mutex<HashMap<String, Option<bool>>>>;

struct RecordingPlayer {
    container_id: String,
    states: PlayerStates,
}

impl RecordingPlayer {
    fn set(&self, muted: bool) -> Result<(), PlayerError> {
        self.states
            .lock()
            .insert(self.container_id.clone(), Some(muted));
        Ok(())
    }
}

impl TwitchPlayer for RecordingPlayer {
    fn set_muted(&mut self, muted: bool) -> Result<(), PlayerError> {
        self.set(muted)
    }
}

impl YouTubePlayer for RecordingPlayer {
    fn mute(&mut self) -> Result<(), PlayerError> {
        self.set(true)
    }

    fn unmute(&mut self) -> Result<(), PlayerError> {
        self.set(false)
    }
}

/// Provider that records requests and the mute calls its players receive.
/// Readiness is delivered by the test through [`RecordingProvider::pending`].
#[derive(Default)]
pub struct RecordingProvider {
    pub requests: Vec<EmbedRequest>,
    pub states: PlayerStates,
}

impl RecordingProvider {
    fn player(&mut self, request: &EmbedRequest) -> RecordingPlayer {
        self.requests.push(request.clone());
        self.states
            .lock()
            .insert(request.container_id.clone(), None);
        RecordingPlayer {
            container_id: request.container_id.clone(),
            states: Arc::clone(&self.states),
        }
    }

    /// Ready tokens of every player created so far, oldest first.
    pub fn pending(&self) -> Vec<ReadyToken> {
        self.requests.iter().map(|r| r.ready).collect()
    }
}

impl EmbedProvider for RecordingProvider {
    fn embed_twitch(
        &mut self,
        request: &EmbedRequest,
    ) -> Result<Box<dyn TwitchPlayer>, PlayerError> {
        Ok(Box::new(self.player(request)))
    }

    fn embed_youtube(
        &mut self,
        request: &EmbedRequest,
    ) -> Result<Box<dyn YouTubePlayer>, PlayerError> {
        Ok(Box::new(self.player(request)))
    }
}

pub type TestController = Controller<RecordingProvider, ManualScheduler>;

/// Started controller for `config`.
pub fn started(config: &Config) -> TestController {
    let mut controller = Controller::new(
        config,
        RecordingProvider::default(),
        ManualScheduler::default(),
    );
    controller.start();
    controller
}

/// Deliver the ready event of every player created so far.
pub fn ready_all(controller: &mut TestController) {
    for token in controller.players().provider().pending() {
        controller.player_ready(token);
    }
}

/// Mute state the player in `slot` was last told to have.
pub fn applied_muted(controller: &TestController, slot: SlotId) -> Option<bool> {
    let container = controller.players().slot(slot)?.container_id()?.to_string();
    let states = controller.players().provider().states.lock();
    states.get(&container).copied().flatten()
}

/// Slots whose player was last told to play audio.
pub fn audible_slots(controller: &TestController) -> Vec<SlotId> {
    controller
        .players()
        .mounted_slots()
        .into_iter()
        .filter(|slot| applied_muted(controller, *slot) == Some(false))
        .collect()
}

/// Fire the deferred default-audio timer.
pub fn resolve_default_audio(controller: &mut TestController) {
    if let Some(fired) = controller
        .scheduler_mut()
        .fire(TimerTask::ResolveDefaultAudio)
    {
        controller.timer_fired(fired);
    }
}
