use serde::Serialize;
use std::fmt;

/// Provider/shape of a stream source, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    TwitchChannel,
    #[serde(rename = "youtube_channel")]
    YouTubeChannel,
    #[serde(rename = "youtube_video")]
    YouTubeVideo,
    RawUrl,
}

impl StreamKind {
    /// Short provider name used for container ids and CSS hooks.
    pub fn provider(self) -> &'static str {
        match self {
            Self::TwitchChannel => "twitch",
            Self::YouTubeChannel | Self::YouTubeVideo => "youtube",
            Self::RawUrl => "url",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TwitchChannel => "twitch:channel",
            Self::YouTubeChannel => "youtube:channel",
            Self::YouTubeVideo => "youtube:video",
            Self::RawUrl => "url",
        };
        f.write_str(name)
    }
}

/// Where a stream comes from. The payload is what the embed needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StreamSource {
    /// Twitch channel name
    TwitchChannel(String),
    /// YouTube channel id (embedded as its current live stream)
    #[serde(rename = "youtube_channel")]
    YouTubeChannel(String),
    /// YouTube video id
    #[serde(rename = "youtube_video")]
    YouTubeVideo(String),
    /// Any embeddable URL, kept verbatim
    RawUrl(String),
}

impl StreamSource {
    pub fn kind(&self) -> StreamKind {
        match self {
            Self::TwitchChannel(_) => StreamKind::TwitchChannel,
            Self::YouTubeChannel(_) => StreamKind::YouTubeChannel,
            Self::YouTubeVideo(_) => StreamKind::YouTubeVideo,
            Self::RawUrl(_) => StreamKind::RawUrl,
        }
    }

    /// Channel name, video id or URL, depending on the kind.
    pub fn value(&self) -> &str {
        match self {
            Self::TwitchChannel(v)
            | Self::YouTubeChannel(v)
            | Self::YouTubeVideo(v)
            | Self::RawUrl(v) => v,
        }
    }

    /// Human-readable label derived from kind and value.
    pub fn default_label(&self) -> String {
        match self {
            Self::TwitchChannel(channel) => format!("Twitch/{channel}"),
            Self::YouTubeChannel(id) => format!("YouTube/{}", super::shorten_id(id)),
            Self::YouTubeVideo(id) => format!("YouTube Video/{}", super::shorten_id(id)),
            Self::RawUrl(url) => super::hostname_of(url).unwrap_or_else(|| "URL".to_string()),
        }
    }
}

/// One configured stream. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StreamDescriptor {
    #[serde(flatten)]
    source: StreamSource,
    label: String,
}

impl StreamDescriptor {
    /// Descriptor with the derived label.
    pub fn new(source: StreamSource) -> Self {
        let label = source.default_label();
        Self { source, label }
    }

    /// Same source, custom display label.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        Self {
            source: self.source,
            label: label.into(),
        }
    }

    pub fn source(&self) -> &StreamSource {
        &self.source
    }

    pub fn kind(&self) -> StreamKind {
        self.source.kind()
    }

    pub fn value(&self) -> &str {
        self.source.value()
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for StreamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.source.kind())
    }
}
