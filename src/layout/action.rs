use spectate_config::LayoutMode;

/// Which slot should carry audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioSelector {
    /// Mute everything
    None,
    /// The slot currently showing the stream at this index
    Stream(usize),
    /// The slot showing the focused stream
    Focused,
}

/// Everything that can change the layout state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SetMode(LayoutMode),
    /// Flip between the family's two modes
    ToggleMode,
    /// Focus the stream at this index (clamped)
    SetFocus(usize),
    /// Two-pane only: focus the other pane and give it the audio
    Swap,
    Next,
    Prev,
    SetAudio(AudioSelector),
    MuteAll,
    ToggleCycle,
    /// Fired by the auto-cycle timer
    CycleTick,
    /// Fired once by the deferred audio timer after start-up
    ResolveDefaultAudio,
}

impl Action {
    /// Parse an action name from a keybinding.
    ///
    /// Positions in names are 1-based (`focus_1` is the first stream);
    /// `left` and `right` name the first and second positions.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let action = match name.as_str() {
            "swap" => Self::Swap,
            "next" => Self::Next,
            "prev" | "previous" => Self::Prev,
            "toggle_mode" => Self::ToggleMode,
            "toggle_cycle" | "cycle" => Self::ToggleCycle,
            "mute_all" | "audio_none" => Self::MuteAll,
            "audio_focus" => Self::SetAudio(AudioSelector::Focused),
            _ => {
                if let Some(mode) = name.strip_prefix("mode_") {
                    return LayoutMode::parse(mode).map(Self::SetMode);
                }
                if let Some(position) = name.strip_prefix("focus_") {
                    return parse_position(position).map(Self::SetFocus);
                }
                if let Some(position) = name.strip_prefix("audio_") {
                    return parse_position(position)
                        .map(|index| Self::SetAudio(AudioSelector::Stream(index)));
                }
                return None;
            }
        };
        Some(action)
    }
}

/// `left`, `right` or a 1-based number, as a 0-based index.
pub(crate) fn parse_position(raw: &str) -> Option<usize> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "left" => Some(0),
        "right" => Some(1),
        other => other
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1)),
    }
}
