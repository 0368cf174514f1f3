use super::SlotId;
use spectate_config::{Config, LayoutFamily, LayoutMode};
use std::time::Duration;

/// The viewer's layout, focus and audio state.
///
/// Only [`LayoutState::apply`] produces new values, so the invariants hold by
/// construction: `focus` is within the focusable range, `mode` belongs to the
/// family, and `audio` names at most one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutState {
    pub(super) family: LayoutFamily,
    pub(super) mode: LayoutMode,
    pub(super) focus: usize,
    pub(super) audio: Option<SlotId>,
    /// Set once the audio target was chosen, either by the user or by the
    /// deferred default
    pub(super) audio_settled: bool,
    pub(super) cycle_enabled: bool,
    pub(super) cycle_interval: Option<Duration>,
    pub(super) stream_count: usize,
}

impl LayoutState {
    /// Default state for a family: default mode, first stream focused, muted.
    pub fn new(family: LayoutFamily, stream_count: usize) -> Self {
        Self {
            family,
            mode: family.default_mode(),
            focus: 0,
            audio: None,
            audio_settled: false,
            cycle_enabled: false,
            cycle_interval: None,
            stream_count,
        }
    }

    /// Initial state from configuration.
    pub fn from_config(config: &Config, stream_count: usize) -> Self {
        Self::new(config.family, stream_count)
            .with_mode(config.initial_mode())
            .with_focus(config.start)
            .with_cycle(config.cycle_interval())
    }

    /// Start in `mode`; ignored when the family does not have it.
    pub fn with_mode(mut self, mode: LayoutMode) -> Self {
        if self.family.supports(mode) {
            self.mode = mode;
        }
        self.cycle_enabled = self.cycle_interval.is_some() && self.mode.supports_cycle();
        self
    }

    /// Start focused on `index`, clamped to the focusable range.
    pub fn with_focus(mut self, index: usize) -> Self {
        self.focus = self.clamp_focus(index);
        self
    }

    /// Auto-cycle interval. Cycling starts enabled when the mode allows it.
    pub fn with_cycle(mut self, interval: Option<Duration>) -> Self {
        self.cycle_interval = interval.filter(|i| !i.is_zero());
        self.cycle_enabled = self.cycle_interval.is_some() && self.mode.supports_cycle();
        self
    }

    pub fn family(&self) -> LayoutFamily {
        self.family
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn audio(&self) -> Option<SlotId> {
        self.audio
    }

    pub fn cycle_enabled(&self) -> bool {
        self.cycle_enabled
    }

    pub fn cycle_interval(&self) -> Option<Duration> {
        self.cycle_interval
    }

    pub fn stream_count(&self) -> usize {
        self.stream_count
    }

    /// Number of streams focus can move between. The two-pane family only
    /// ever shows the first two.
    pub fn focusable(&self) -> usize {
        match self.family.pane_limit() {
            Some(limit) => self.stream_count.min(limit),
            None => self.stream_count,
        }
    }

    pub(super) fn clamp_focus(&self, index: usize) -> usize {
        index.min(self.focusable().saturating_sub(1))
    }

    /// Slots that hold a player (or placeholder) in the current mode.
    pub fn mounted_slots(&self) -> Vec<SlotId> {
        match (self.family, self.mode) {
            (LayoutFamily::Duo, _) => vec![SlotId::LEFT, SlotId::RIGHT],
            (LayoutFamily::Grid, LayoutMode::Focus) => vec![SlotId::Focus],
            (LayoutFamily::Grid, _) => (0..self.stream_count).map(SlotId::Tile).collect(),
        }
    }

    /// Index of the stream a slot shows, `None` for an empty or hidden slot.
    pub fn slot_stream(&self, slot: SlotId) -> Option<usize> {
        match (self.family, self.mode, slot) {
            (LayoutFamily::Duo, _, SlotId::Tile(index)) => {
                (index < self.focusable()).then_some(index)
            }
            (LayoutFamily::Grid, LayoutMode::Focus, SlotId::Focus) => {
                (self.stream_count > 0).then_some(self.focus)
            }
            (LayoutFamily::Grid, LayoutMode::Grid, SlotId::Tile(index)) => {
                (index < self.stream_count).then_some(index)
            }
            _ => None,
        }
    }

    /// Slot currently showing the stream at `index`, if it is visible.
    pub fn slot_for_stream(&self, index: usize) -> Option<SlotId> {
        match (self.family, self.mode) {
            (LayoutFamily::Grid, LayoutMode::Focus) => {
                (self.stream_count > 0 && index == self.focus).then_some(SlotId::Focus)
            }
            _ => (index < self.focusable()).then_some(SlotId::Tile(index)),
        }
    }

    /// Slot showing the focused stream.
    pub fn focused_slot(&self) -> Option<SlotId> {
        if self.focusable() == 0 {
            return None;
        }
        self.slot_for_stream(self.focus)
    }

    /// Effects that bring a freshly created page in line with this state.
    pub fn initial_effects(&self) -> Vec<super::Effect> {
        let mut effects: Vec<_> = self
            .mounted_slots()
            .into_iter()
            .map(super::Effect::Mount)
            .collect();
        if self.cycle_enabled
            && let Some(interval) = self.cycle_interval
        {
            effects.push(super::Effect::StartCycle(interval));
        }
        effects.push(super::Effect::Render);
        effects
    }
}
