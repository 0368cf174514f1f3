use serde::Serialize;
use std::fmt;

/// A place on the page that hosts at most one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotId {
    /// Pane or grid cell at this index. In the two-pane family `Tile(0)` is
    /// the left pane and `Tile(1)` the right one.
    Tile(usize),
    /// Dedicated focus pane of the grid family
    Focus,
}

impl SlotId {
    pub const LEFT: SlotId = SlotId::Tile(0);
    pub const RIGHT: SlotId = SlotId::Tile(1);

    pub fn tile_index(self) -> Option<usize> {
        match self {
            Self::Tile(index) => Some(index),
            Self::Focus => None,
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tile(index) => write!(f, "tile{index}"),
            Self::Focus => f.write_str("focus"),
        }
    }
}
