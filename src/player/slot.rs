use super::PlayerHandle;
use crate::channels::StreamDescriptor;
use crate::layout::SlotId;

/// Stand-in shown instead of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// No stream configured for this slot
    NoChannel,
    /// The provider could not create a player
    Unsupported,
}

impl Placeholder {
    pub fn text(self) -> &'static str {
        match self {
            Self::NoChannel => "No channel",
            Self::Unsupported => "Unsupported",
        }
    }
}

/// What a mounted slot holds.
#[derive(Debug)]
pub enum SlotContent {
    Placeholder(Placeholder),
    Player {
        container_id: String,
        handle: PlayerHandle,
        ready: bool,
    },
    /// Plain iframe without a control API
    Frame { container_id: String, url: String },
}

/// One mounted slot and the mute state it should have.
#[derive(Debug)]
pub struct PlayerSlot {
    pub(super) id: SlotId,
    pub(super) descriptor: Option<StreamDescriptor>,
    pub(super) content: SlotContent,
    pub(super) desired_muted: bool,
    pub(super) generation: u64,
}

impl PlayerSlot {
    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn descriptor(&self) -> Option<&StreamDescriptor> {
        self.descriptor.as_ref()
    }

    pub fn content(&self) -> &SlotContent {
        &self.content
    }

    /// Mute state last requested for this slot, applied or not.
    pub fn desired_muted(&self) -> bool {
        self.desired_muted
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.content, SlotContent::Player { ready: true, .. })
    }

    pub fn container_id(&self) -> Option<&str> {
        match &self.content {
            SlotContent::Player { container_id, .. } | SlotContent::Frame { container_id, .. } => {
                Some(container_id)
            }
            SlotContent::Placeholder(_) => None,
        }
    }

    pub fn placeholder(&self) -> Option<Placeholder> {
        match self.content {
            SlotContent::Placeholder(placeholder) => Some(placeholder),
            _ => None,
        }
    }
}
