//! Display-label helpers. Purely cosmetic: nothing here feeds an embed.

/// Ids longer than this are shortened for display.
const SHORTEN_THRESHOLD: usize = 10;

/// Shorten a long id to its first 6 and last 3 characters.
///
/// `"UCabcdefghijklmnop"` becomes `"UCabcd…nop"`; ids of 10 characters or
/// fewer are returned unchanged.
pub fn shorten_id(id: &str) -> String {
    let len = id.chars().count();
    if len <= SHORTEN_THRESHOLD {
        return id.to_string();
    }
    let head: String = id.chars().take(6).collect();
    let tail: String = id.chars().skip(len - 3).collect();
    format!("{head}…{tail}")
}

/// Host name of a URL, if it parses and has one.
pub fn hostname_of(raw: &str) -> Option<String> {
    let parsed = url::Url::parse(raw).ok()?;
    parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_ids_unchanged() {
        assert_eq!(shorten_id("abc123XYZ"), "abc123XYZ");
        assert_eq!(shorten_id("0123456789"), "0123456789");
        assert_eq!(shorten_id(""), "");
    }

    #[test]
    fn test_long_id_shortened() {
        assert_eq!(shorten_id("01234567890"), "012345…890");
        assert_eq!(shorten_id("UCabcdefghijklmnop"), "UCabcd…nop");
    }

    #[test]
    fn test_shorten_counts_characters_not_bytes() {
        assert_eq!(shorten_id("ééééééééééé"), "éééééé…ééé");
    }

    #[test]
    fn test_hostname() {
        assert_eq!(
            hostname_of("https://x.example/p").as_deref(),
            Some("x.example")
        );
        assert_eq!(
            hostname_of("https://player.example:8443/embed?a=b").as_deref(),
            Some("player.example")
        );
        assert_eq!(hostname_of("not a url"), None);
        assert_eq!(hostname_of("data:text/html,hi"), None);
    }
}
