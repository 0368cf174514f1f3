//! Channel token parsing.
//!
//! The `channels` option is a comma-separated list of tokens:
//!
//! - `twitch:<channel>` or a bare `<channel>`
//! - `youtube:channel:<id>`
//! - `youtube:video:<id>`
//! - `url:<embeddable url>` (the url may contain colons)

use super::{StreamDescriptor, StreamSource};
use thiserror::Error;

/// Why a single token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token '{token}' has no value after its prefix")]
    MissingValue { token: String },

    #[error("token '{token}' is not a valid Twitch channel name")]
    InvalidChannel { token: String },

    #[error("token '{token}' uses unknown YouTube kind '{kind}' (expected channel or video)")]
    UnknownYouTubeKind { token: String, kind: String },

    #[error("token '{token}' has unrecognized prefix '{prefix}'")]
    UnknownPrefix { token: String, prefix: String },
}

impl TokenError {
    /// The offending token as it appeared in the input (trimmed).
    pub fn token(&self) -> &str {
        match self {
            Self::MissingValue { token }
            | Self::InvalidChannel { token }
            | Self::UnknownYouTubeKind { token, .. }
            | Self::UnknownPrefix { token, .. } => token,
        }
    }
}

/// Result of parsing a full `channels` value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Accepted descriptors in input order
    pub descriptors: Vec<StreamDescriptor>,
    /// Rejected tokens in input order
    pub rejected: Vec<TokenError>,
}

/// Parse a `channels` value, logging and dropping bad tokens.
pub fn parse(raw: &str) -> Vec<StreamDescriptor> {
    let outcome = parse_with_diagnostics(raw);
    for err in &outcome.rejected {
        log::warn!("Skipping channel token: {}", err);
    }
    outcome.descriptors
}

/// Parse a `channels` value and report rejected tokens instead of logging them.
pub fn parse_with_diagnostics(raw: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match parse_token(token) {
            Ok(descriptor) => outcome.descriptors.push(descriptor),
            Err(err) => outcome.rejected.push(err),
        }
    }
    outcome
}

/// Parse one trimmed, non-empty token.
pub fn parse_token(token: &str) -> Result<StreamDescriptor, TokenError> {
    let Some((prefix, rest)) = token.split_once(':') else {
        // Bare names are Twitch channels
        return twitch_channel(token, token);
    };

    match prefix {
        "url" => {
            if rest.is_empty() {
                return Err(TokenError::MissingValue {
                    token: token.to_string(),
                });
            }
            Ok(StreamDescriptor::new(StreamSource::RawUrl(rest.to_string())))
        }
        "twitch" => twitch_channel(token, first_segment(rest)),
        "youtube" => {
            let (kind, id) = rest.split_once(':').unwrap_or((rest, ""));
            let id = first_segment(id);
            let source = match kind {
                "channel" => StreamSource::YouTubeChannel(id.to_string()),
                "video" => StreamSource::YouTubeVideo(id.to_string()),
                _ => {
                    return Err(TokenError::UnknownYouTubeKind {
                        token: token.to_string(),
                        kind: kind.to_string(),
                    });
                }
            };
            if id.is_empty() {
                return Err(TokenError::MissingValue {
                    token: token.to_string(),
                });
            }
            Ok(StreamDescriptor::new(source))
        }
        _ => Err(TokenError::UnknownPrefix {
            token: token.to_string(),
            prefix: prefix.to_string(),
        }),
    }
}

/// Segments past the expected ones are ignored (`twitch:foo:extra` is `foo`).
fn first_segment(value: &str) -> &str {
    value.split(':').next().unwrap_or_default()
}

fn twitch_channel(token: &str, channel: &str) -> Result<StreamDescriptor, TokenError> {
    if channel.is_empty() {
        return Err(TokenError::MissingValue {
            token: token.to_string(),
        });
    }
    if !channel.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(TokenError::InvalidChannel {
            token: token.to_string(),
        });
    }
    Ok(StreamDescriptor::new(StreamSource::TwitchChannel(
        channel.to_string(),
    )))
}
