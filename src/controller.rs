//! Ties the state machine to players, timers and the rendered view.
//!
//! Every input (key, control message, timer, player ready) goes through
//! [`Controller`], one at a time. Transitions are computed by
//! [`LayoutState::apply`]; the controller only carries out their effects.

use crate::channels::{self, StreamDescriptor};
use crate::input::{InputRouter, KeyOutcome};
use crate::layout::{Action, Effect, LayoutState, SlotId};
use crate::player::{EmbedProvider, PlayerAdapter, ReadyToken};
use crate::render::{self, PageView};
use crate::scheduler::{Scheduler, TimerFired, TimerId, TimerTask};
use spectate_config::Config;
use spectate_control::ControlMessage;
use spectate_keybindings::KeyInput;
use std::time::Duration;

pub struct Controller<P: EmbedProvider, S: Scheduler> {
    streams: Vec<StreamDescriptor>,
    state: LayoutState,
    players: PlayerAdapter<P>,
    scheduler: S,
    router: InputRouter,
    /// Players start muted unless this is off and they carry the audio
    muted_default: bool,
    parent: String,
    audio_delay: Duration,
    /// The only live auto-cycle timer, if any
    cycle_timer: Option<TimerId>,
    audio_timer: Option<TimerId>,
    view: PageView,
}

impl<P: EmbedProvider, S: Scheduler> Controller<P, S> {
    /// Controller for the configured channels. Nothing is mounted until
    /// [`Controller::start`].
    pub fn new(config: &Config, provider: P, scheduler: S) -> Self {
        let streams = channels::parse(&config.channels);
        Self::with_streams(config, streams, provider, scheduler)
    }

    pub fn with_streams(
        config: &Config,
        streams: Vec<StreamDescriptor>,
        provider: P,
        scheduler: S,
    ) -> Self {
        let state = LayoutState::from_config(config, streams.len());
        let parent = config.effective_parent().to_string();
        let players = PlayerAdapter::new(provider, parent.clone());
        let view = render::project(&state, &streams, &players, &parent);
        log::info!(
            "Viewer: {} stream(s), {} layout in {} mode, focus {}",
            streams.len(),
            state.family(),
            state.mode(),
            state.focus()
        );

        Self {
            streams,
            state,
            players,
            scheduler,
            router: InputRouter::from_config(config),
            muted_default: config.muted,
            parent,
            audio_delay: config.audio_delay(),
            cycle_timer: None,
            audio_timer: None,
            view,
        }
    }

    /// Mount the initial players, start auto-cycle if configured and
    /// schedule the deferred default audio.
    pub fn start(&mut self) {
        let effects = self.state.initial_effects();
        self.apply_effects(&effects);
        self.audio_timer = Some(
            self.scheduler
                .schedule_once(self.audio_delay, TimerTask::ResolveDefaultAudio),
        );
    }

    /// Apply an action. Returns whether anything changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let transition = self.state.apply(action);
        if transition.is_noop() {
            crate::debug_trace!("CONTROLLER", "{:?} changed nothing", action);
            return false;
        }
        crate::debug_log!(
            "CONTROLLER",
            "{:?} -> mode={} focus={} audio={:?}",
            action,
            transition.next.mode(),
            transition.next.focus(),
            transition.next.audio()
        );
        self.state = transition.next;
        self.apply_effects(&transition.effects);
        true
    }

    pub fn handle_key(&mut self, event: &KeyInput) -> KeyOutcome {
        let outcome = self.router.route_key(event);
        if let Some(action) = outcome.action {
            self.dispatch(action);
        }
        outcome
    }

    pub fn handle_control(&mut self, message: &ControlMessage) -> bool {
        match self.router.route_control(message) {
            Some(action) => {
                log::debug!("Control message {:?} -> {:?}", message.cmd, action);
                self.dispatch(action)
            }
            None => false,
        }
    }

    /// Handle a timer firing. Firings from cancelled timers are dropped.
    pub fn timer_fired(&mut self, fired: TimerFired) -> bool {
        match fired.task {
            TimerTask::CycleTick => {
                if self.cycle_timer != Some(fired.id) {
                    log::debug!("Dropping tick from cancelled timer {:?}", fired.id);
                    return false;
                }
                self.dispatch(Action::CycleTick)
            }
            TimerTask::ResolveDefaultAudio => {
                if self.audio_timer != Some(fired.id) {
                    return false;
                }
                self.audio_timer = None;
                self.dispatch(Action::ResolveDefaultAudio)
            }
        }
    }

    pub fn player_ready(&mut self, token: ReadyToken) -> bool {
        if !self.players.player_ready(token) {
            return false;
        }
        self.refresh_view();
        true
    }

    /// Cancel timers and drop every player.
    pub fn shutdown(&mut self) {
        self.stop_cycle();
        if let Some(id) = self.audio_timer.take() {
            self.scheduler.cancel(id);
        }
        self.players.teardown_all();
    }

    fn apply_effects(&mut self, effects: &[Effect]) {
        for effect in effects {
            match *effect {
                Effect::Unmount(slot) => self.players.teardown(slot),
                Effect::Mount(slot) => self.mount(slot),
                Effect::ApplyAudio => self.apply_audio(),
                Effect::StartCycle(interval) => {
                    self.stop_cycle();
                    let id = self
                        .scheduler
                        .schedule_repeating(interval, TimerTask::CycleTick);
                    self.cycle_timer = Some(id);
                    log::info!("Auto-cycle every {:?}", interval);
                }
                Effect::StopCycle => {
                    self.stop_cycle();
                    log::info!("Auto-cycle stopped");
                }
                Effect::Render => self.refresh_view(),
            }
        }
    }

    fn mount(&mut self, slot: SlotId) {
        let descriptor = self
            .state
            .slot_stream(slot)
            .and_then(|index| self.streams.get(index));
        let start_muted = self.muted_default || self.state.audio() != Some(slot);
        self.players.mount(slot, descriptor, start_muted);
    }

    /// Unmute the audio target, mute everything else.
    fn apply_audio(&mut self) {
        let audio = self.state.audio();
        for slot in self.players.mounted_slots() {
            self.players.set_muted(slot, audio != Some(slot));
        }
    }

    fn stop_cycle(&mut self) {
        if let Some(id) = self.cycle_timer.take() {
            self.scheduler.cancel(id);
        }
    }

    fn refresh_view(&mut self) {
        self.view = render::project(&self.state, &self.streams, &self.players, &self.parent);
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    pub fn streams(&self) -> &[StreamDescriptor] {
        &self.streams
    }

    pub fn players(&self) -> &PlayerAdapter<P> {
        &self.players
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn cycle_timer(&self) -> Option<TimerId> {
        self.cycle_timer
    }

    pub fn view(&self) -> &PageView {
        &self.view
    }

    pub fn render_html(&self) -> String {
        render::html::render_page(&self.view, "spectate")
    }
}
