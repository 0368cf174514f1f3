//! Embed URLs for providers rendered as plain iframes.

use crate::channels::StreamSource;
use url::Url;

const TWITCH_PLAYER: &str = "https://player.twitch.tv/";
const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed/";

/// iframe `src` for a stream.
///
/// Raw URLs are returned verbatim; Twitch requires the embedding `parent`.
pub fn embed_url(source: &StreamSource, parent: &str, muted: bool) -> String {
    match source {
        StreamSource::RawUrl(url) => url.clone(),
        StreamSource::TwitchChannel(channel) => with_query(
            TWITCH_PLAYER,
            &[
                ("channel", channel.as_str()),
                ("parent", parent),
                ("autoplay", "true"),
                ("muted", if muted { "true" } else { "false" }),
            ],
        ),
        StreamSource::YouTubeVideo(id) => with_query(
            &format!("{YOUTUBE_EMBED}{}", encode_segment(id)),
            &youtube_params(None, muted),
        ),
        StreamSource::YouTubeChannel(id) => with_query(
            &format!("{YOUTUBE_EMBED}live_stream"),
            &youtube_params(Some(id), muted),
        ),
    }
}

fn youtube_params(channel: Option<&str>, muted: bool) -> Vec<(&str, &str)> {
    let mut params = Vec::with_capacity(4);
    if let Some(channel) = channel {
        params.push(("channel", channel));
    }
    params.push(("autoplay", "1"));
    params.push(("mute", if muted { "1" } else { "0" }));
    params.push(("playsinline", "1"));
    params
}

fn with_query(base: &str, params: &[(&str, &str)]) -> String {
    match Url::parse(base) {
        Ok(mut url) => {
            url.query_pairs_mut().extend_pairs(params);
            url.into()
        }
        Err(e) => {
            log::warn!("Bad embed base URL {}: {}", base, e);
            base.to_string()
        }
    }
}

/// Video ids go into the path; keep them from escaping it.
fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twitch_url_carries_parent() {
        let url = embed_url(
            &StreamSource::TwitchChannel("foo".to_string()),
            "obs.example",
            true,
        );
        assert_eq!(
            url,
            "https://player.twitch.tv/?channel=foo&parent=obs.example&autoplay=true&muted=true"
        );
    }

    #[test]
    fn test_youtube_video_url() {
        let url = embed_url(&StreamSource::YouTubeVideo("abc123".to_string()), "x", false);
        assert_eq!(
            url,
            "https://www.youtube.com/embed/abc123?autoplay=1&mute=0&playsinline=1"
        );
    }

    #[test]
    fn test_youtube_channel_url() {
        let url = embed_url(&StreamSource::YouTubeChannel("UC42".to_string()), "x", true);
        assert_eq!(
            url,
            "https://www.youtube.com/embed/live_stream?channel=UC42&autoplay=1&mute=1&playsinline=1"
        );
    }

    #[test]
    fn test_video_id_cannot_escape_path() {
        let url = embed_url(&StreamSource::YouTubeVideo("a/../b?x".to_string()), "x", true);
        assert!(url.starts_with("https://www.youtube.com/embed/a%2F..%2Fb%3Fx?"));
    }

    #[test]
    fn test_raw_url_verbatim() {
        let raw = "https://x.example/p?a=1";
        assert_eq!(embed_url(&StreamSource::RawUrl(raw.to_string()), "x", true), raw);
    }
}
