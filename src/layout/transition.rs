use super::{Action, AudioSelector, LayoutState, SlotId};
use spectate_config::{LayoutFamily, LayoutMode};
use std::time::Duration;

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// (Re)mount the slot with whatever stream the new state puts in it
    Unmount(SlotId),
    Mount(SlotId),
    /// Mute every mounted slot except the audio target
    ApplyAudio,
    /// Cancel any running cycle timer, then start a new one
    StartCycle(Duration),
    StopCycle,
    /// Re-project the view (classes, badges, audio ring)
    Render,
}

/// Result of applying an action: the next state and what to do about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: LayoutState,
    pub effects: Vec<Effect>,
}

impl Transition {
    pub fn is_noop(&self) -> bool {
        self.effects.is_empty()
    }
}

impl LayoutState {
    /// Compute the state that follows `action`.
    ///
    /// Actions that make no sense in the current state (swap in the grid
    /// family, next with a single stream, a mode the family lacks) produce a
    /// transition without effects.
    pub fn apply(&self, action: Action) -> Transition {
        let mut builder = Builder::new(self);
        match action {
            Action::SetMode(mode) => builder.set_mode(mode),
            Action::ToggleMode => builder.set_mode(self.family.other_mode(self.mode)),
            Action::SetFocus(index) => builder.set_focus(index),
            Action::Swap => builder.swap(),
            Action::Next => builder.step(true),
            Action::Prev => builder.step(false),
            Action::SetAudio(selector) => builder.set_audio(selector),
            Action::MuteAll => builder.set_audio(AudioSelector::None),
            Action::ToggleCycle => builder.toggle_cycle(),
            Action::CycleTick => {
                if self.cycle_enabled && self.mode.supports_cycle() {
                    builder.step(true);
                }
            }
            Action::ResolveDefaultAudio => {
                if !self.audio_settled {
                    builder.set_audio(AudioSelector::Focused);
                }
            }
        }
        builder.finish(self)
    }
}

/// Accumulates a transition. Effects are emitted in a fixed order: slot
/// changes, audio, timer, render.
struct Builder {
    next: LayoutState,
    slot_effects: Vec<Effect>,
    apply_audio: bool,
    cycle: Option<Effect>,
}

impl Builder {
    fn new(state: &LayoutState) -> Self {
        Self {
            next: state.clone(),
            slot_effects: Vec::new(),
            apply_audio: false,
            cycle: None,
        }
    }

    fn set_mode(&mut self, mode: LayoutMode) {
        let state = &mut self.next;
        if !state.family.supports(mode) {
            log::debug!("Layout {} has no {} mode", state.family, mode);
            return;
        }
        if state.mode == mode {
            return;
        }
        let before = state.mounted_slots();
        state.mode = mode;
        state.focus = state.clamp_focus(state.focus);

        if state.family == LayoutFamily::Grid {
            state.audio = match (mode, state.audio) {
                (LayoutMode::Focus, Some(SlotId::Tile(_))) => Some(SlotId::Focus),
                (LayoutMode::Grid, Some(SlotId::Focus)) => Some(SlotId::Tile(state.focus)),
                (_, audio) => audio,
            };
            let after = state.mounted_slots();
            self.slot_effects
                .extend(before.into_iter().map(Effect::Unmount));
            self.slot_effects.extend(after.into_iter().map(Effect::Mount));
            self.apply_audio = true;
        }

        if self.next.cycle_enabled && !mode.supports_cycle() {
            self.next.cycle_enabled = false;
            self.cycle = Some(Effect::StopCycle);
        }
    }

    fn set_focus(&mut self, index: usize) {
        if self.next.focusable() == 0 {
            return;
        }
        let target = self.next.clamp_focus(index);
        // Picking a pane in the two-pane family always zooms into it
        if self.next.family == LayoutFamily::Duo {
            self.set_mode(LayoutMode::Focus);
        }
        self.move_focus(target);
    }

    fn move_focus(&mut self, target: usize) {
        if self.next.focus == target {
            return;
        }
        self.next.focus = target;
        if self.next.family == LayoutFamily::Grid && self.next.mode == LayoutMode::Focus {
            self.slot_effects.push(Effect::Unmount(SlotId::Focus));
            self.slot_effects.push(Effect::Mount(SlotId::Focus));
            self.apply_audio = true;
        }
    }

    fn swap(&mut self) {
        if self.next.family != LayoutFamily::Duo {
            log::debug!("Swap ignored in {} layout", self.next.family);
            return;
        }
        let count = self.next.focusable();
        if count == 0 {
            return;
        }
        let other = if self.next.focus == 0 { 1 } else { 0 };
        self.set_focus(other.min(count - 1));
        self.next.audio = Some(SlotId::Tile(self.next.focus));
        self.next.audio_settled = true;
        self.apply_audio = true;
    }

    fn step(&mut self, forward: bool) {
        let count = self.next.focusable();
        if count <= 1 {
            return;
        }
        let focus = self.next.focus;
        let target = if forward {
            (focus + 1) % count
        } else {
            (focus + count - 1) % count
        };
        self.move_focus(target);
    }

    fn set_audio(&mut self, selector: AudioSelector) {
        let target = match selector {
            AudioSelector::None => None,
            AudioSelector::Focused => self.next.focused_slot(),
            AudioSelector::Stream(index) => match self.next.slot_for_stream(index) {
                Some(slot) => Some(slot),
                None => {
                    log::debug!("Audio target stream {} is not on screen", index + 1);
                    return;
                }
            },
        };
        self.next.audio = target;
        self.next.audio_settled = true;
        self.apply_audio = true;
    }

    fn toggle_cycle(&mut self) {
        if self.next.cycle_enabled {
            self.next.cycle_enabled = false;
            self.cycle = Some(Effect::StopCycle);
            return;
        }
        match self.next.cycle_interval {
            Some(interval) if self.next.mode.supports_cycle() => {
                self.next.cycle_enabled = true;
                self.cycle = Some(Effect::StartCycle(interval));
            }
            Some(_) => log::debug!("Auto-cycle needs focus mode (now {})", self.next.mode),
            None => log::debug!("Auto-cycle interval not configured"),
        }
    }

    fn finish(self, previous: &LayoutState) -> Transition {
        let mut effects = self.slot_effects;
        if self.apply_audio {
            effects.push(Effect::ApplyAudio);
        }
        if let Some(cycle) = self.cycle {
            effects.push(cycle);
        }
        if self.next != *previous || !effects.is_empty() {
            effects.push(Effect::Render);
        }
        Transition {
            next: self.next,
            effects,
        }
    }
}
