use super::embed_url;
use crate::channels::StreamDescriptor;
use crate::layout::{LayoutState, SlotId};
use crate::player::{EmbedProvider, PlayerAdapter, SlotContent};
use serde::Serialize;
use spectate_config::{LayoutFamily, LayoutMode};

/// What one slot shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaneContent {
    /// Provider player, rendered as its embed iframe
    Player {
        provider: &'static str,
        container_id: String,
        src: String,
    },
    /// Plain iframe without a control API
    Frame { container_id: String, src: String },
    Placeholder { text: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaneView {
    pub slot: SlotId,
    /// Index of the stream shown, if any
    pub stream: Option<usize>,
    pub badge: Option<String>,
    pub focused: bool,
    pub audio_active: bool,
    pub ready: bool,
    pub content: PaneContent,
}

impl PaneView {
    pub fn classes(&self) -> String {
        let mut classes = vec!["frame".to_string(), self.slot.to_string()];
        if self.focused {
            classes.push("focused".to_string());
        }
        if self.audio_active {
            classes.push("audio-active".to_string());
        }
        classes.join(" ")
    }
}

/// Everything the page needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub family: LayoutFamily,
    pub mode: LayoutMode,
    pub focus: usize,
    pub audio: Option<SlotId>,
    pub cycle_enabled: bool,
    pub panes: Vec<PaneView>,
}

impl PageView {
    /// Classes on the layout container, as the stylesheet expects them.
    pub fn layout_classes(&self) -> String {
        let mut classes = vec![
            self.family.to_string(),
            format!("layout-{}", self.mode.as_str()),
        ];
        if self.family == LayoutFamily::Duo && self.mode == LayoutMode::Focus {
            classes.push(if self.focus == 0 { "focus-left" } else { "focus-right" }.to_string());
        }
        if self.cycle_enabled {
            classes.push("cycling".to_string());
        }
        classes.join(" ")
    }

    pub fn pane(&self, slot: SlotId) -> Option<&PaneView> {
        self.panes.iter().find(|pane| pane.slot == slot)
    }
}

/// Build the view from the state, the stream list and the mounted players.
pub fn project<P: EmbedProvider>(
    state: &LayoutState,
    streams: &[StreamDescriptor],
    players: &PlayerAdapter<P>,
    parent: &str,
) -> PageView {
    let panes = state
        .mounted_slots()
        .into_iter()
        .map(|slot| project_pane(state, streams, players, parent, slot))
        .collect();

    PageView {
        family: state.family(),
        mode: state.mode(),
        focus: state.focus(),
        audio: state.audio(),
        cycle_enabled: state.cycle_enabled(),
        panes,
    }
}

fn project_pane<P: EmbedProvider>(
    state: &LayoutState,
    streams: &[StreamDescriptor],
    players: &PlayerAdapter<P>,
    parent: &str,
    slot: SlotId,
) -> PaneView {
    let stream = state.slot_stream(slot);
    let descriptor = stream.and_then(|index| streams.get(index));
    let mounted = players.slot(slot);
    let muted = mounted.is_none_or(|s| s.desired_muted());

    let content = match (mounted.map(|s| s.content()), descriptor) {
        (Some(SlotContent::Player { container_id, handle, .. }), Some(d)) => PaneContent::Player {
            provider: handle.provider(),
            container_id: container_id.clone(),
            src: embed_url(d.source(), parent, muted),
        },
        (Some(SlotContent::Frame { container_id, url }), _) => PaneContent::Frame {
            container_id: container_id.clone(),
            src: url.clone(),
        },
        (Some(SlotContent::Placeholder(placeholder)), _) => PaneContent::Placeholder {
            text: placeholder.text(),
        },
        // Not mounted yet, or mounted with a stream the state no longer maps
        _ => PaneContent::Placeholder {
            text: crate::player::Placeholder::NoChannel.text(),
        },
    };

    PaneView {
        slot,
        stream,
        badge: descriptor.map(|d| d.label().to_string()),
        focused: stream.is_some() && stream == Some(state.focus()),
        audio_active: state.audio() == Some(slot),
        ready: mounted.is_some_and(|s| s.is_ready()),
        content,
    }
}
