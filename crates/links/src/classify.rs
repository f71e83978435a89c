//! URL detection and platform classification.
//!
//! Classification is a pure, data-driven lookup: an ordered table of
//! anchored patterns, first match wins. Adding a platform means adding
//! table rows, not control flow.

use {
    once_cell::sync::Lazy,
    regex::Regex,
    serde::{Deserialize, Serialize},
    url::Url,
};

/// Platform a video link belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
    Unknown,
}

impl Platform {
    /// Short tag used to prefix hash-derived video ids.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Facebook => "fb",
            Self::Instagram => "ig",
            Self::Unknown => "vid",
        }
    }
}

/// A recognized video link, normalized and tagged with its platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoLink {
    /// The URL exactly as it appeared in the message text.
    pub raw_url: String,
    /// Tracking parameters and fragment stripped; used for all further
    /// processing, including path derivation.
    pub normalized_url: String,
    pub platform: Platform,
}

struct PlatformPattern {
    platform: Platform,
    matcher: Regex,
}

#[allow(clippy::expect_used)]
fn compile(re: &str) -> Regex {
    Regex::new(re).expect("static pattern")
}

fn pattern(platform: Platform, re: &str) -> PlatformPattern {
    PlatformPattern {
        platform,
        matcher: compile(re),
    }
}

/// Ordered platform patterns, anchored at the start of the URL and
/// tolerant of host variants (`www.`, short domains) and case.
static PATTERNS: Lazy<Vec<PlatformPattern>> = Lazy::new(|| {
    vec![
        pattern(
            Platform::Facebook,
            r"(?i)^https?://(?:www\.)?(?:facebook\.com|fb\.watch)/reel/.+",
        ),
        pattern(
            Platform::Facebook,
            r"(?i)^https?://(?:www\.)?facebook\.com/.+/videos/.+",
        ),
        pattern(
            Platform::Facebook,
            r"(?i)^https?://(?:www\.)?facebook\.com/watch/\?v=.+",
        ),
        pattern(
            Platform::Facebook,
            r"(?i)^https?://(?:www\.)?facebook\.com/share/[rv]/.+",
        ),
        pattern(
            Platform::Instagram,
            r"(?i)^https?://(?:www\.)?instagram\.com/reels?/.+",
        ),
    ]
});

static URL_GRAMMAR: Lazy<Regex> = Lazy::new(|| compile(r"https?://\S+"));

/// Query parameters that survive normalization. Everything else is treated
/// as tracking noise (`fbclid`, `rdid`, `mibextid`, `igsh`, `utm_*`, ...).
const KEPT_QUERY_PARAMS: &[&str] = &["v"];

/// Extract every URL-shaped substring from free-form text, in order of
/// appearance. Duplicates are kept; each occurrence is processed on its own.
pub fn find_candidate_links(text: &str) -> Vec<&str> {
    URL_GRAMMAR.find_iter(text).map(|m| m.as_str()).collect()
}

/// Strip the fragment and tracking query parameters from a URL.
///
/// Returns `None` for strings that fail basic URL parsing; callers treat
/// those as "not a link" rather than an error. Stable under repeated
/// application.
pub fn normalize(url: &str) -> Option<String> {
    let mut parsed = Url::parse(url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    parsed.set_fragment(None);

    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(k, _)| KEPT_QUERY_PARAMS.contains(&k.as_ref()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        parsed
            .query_pairs_mut()
            .clear()
            .extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    Some(parsed.into())
}

/// Classify a single URL against the platform pattern table.
///
/// Returns `None` for unsupported or malformed URLs — silently, since "no
/// supported link" is the normal case for most messages.
pub fn classify(url: &str) -> Option<VideoLink> {
    let entry = PATTERNS.iter().find(|p| p.matcher.is_match(url))?;
    let normalized = normalize(url)?;
    Some(VideoLink {
        raw_url: url.to_string(),
        normalized_url: normalized,
        platform: entry.platform,
    })
}

/// Best-effort platform guess from the host alone, used for tagging
/// hash-derived ids when no structural pattern matched.
#[must_use]
pub fn platform_of_host(url: &str) -> Platform {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
        .unwrap_or_default();
    if host.ends_with("instagram.com") {
        Platform::Instagram
    } else if host.ends_with("facebook.com") || host.ends_with("fb.watch") {
        Platform::Facebook
    } else {
        Platform::Unknown
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("https://www.facebook.com/reel/123456789/", Platform::Facebook)]
    #[case("https://fb.watch/reel/abc123", Platform::Facebook)]
    #[case(
        "https://www.facebook.com/watch/?v=987654321&rdid=xyz",
        Platform::Facebook
    )]
    #[case("https://www.facebook.com/share/r/1C2fk5RPaQ/", Platform::Facebook)]
    #[case("https://www.facebook.com/share/v/16Tvh9Ltti/", Platform::Facebook)]
    #[case("https://www.facebook.com/somepage/videos/456789123/", Platform::Facebook)]
    #[case("https://facebook.com/reel/42", Platform::Facebook)]
    #[case("HTTPS://WWW.FACEBOOK.COM/REEL/42", Platform::Facebook)]
    #[case("https://www.instagram.com/reel/XXXXXXXXXXX/", Platform::Instagram)]
    #[case("https://instagram.com/reels/AbCdEf12345/", Platform::Instagram)]
    fn supported_urls_classify(#[case] url: &str, #[case] platform: Platform) {
        let link = classify(url).unwrap_or_else(|| panic!("{url} should classify"));
        assert_eq!(link.platform, platform);
        assert_eq!(link.raw_url, url);
    }

    #[rstest]
    #[case("https://example.com/video/1")]
    #[case("https://www.facebook.com/somepage/about")]
    #[case("https://youtube.com/watch?v=abc")]
    #[case("not a url at all")]
    #[case("https://")]
    fn unsupported_urls_rejected(#[case] url: &str) {
        assert!(classify(url).is_none());
    }

    #[test]
    fn candidate_links_in_order_with_duplicates() {
        let text = "look https://a.example/one and https://b.example/two \
                    then https://a.example/one again";
        assert_eq!(
            find_candidate_links(text),
            vec![
                "https://a.example/one",
                "https://b.example/two",
                "https://a.example/one",
            ]
        );
    }

    #[test]
    fn candidate_links_empty_text() {
        assert!(find_candidate_links("no links here").is_empty());
    }

    #[test]
    fn normalize_strips_tracking_and_fragment() {
        let url = "https://www.facebook.com/reel/123?fbclid=XYZ&mibextid=abc#frag";
        assert_eq!(
            normalize(url).as_deref(),
            Some("https://www.facebook.com/reel/123")
        );
    }

    #[test]
    fn normalize_keeps_watch_video_id() {
        let url = "https://www.facebook.com/watch/?v=987654321&rdid=xyz";
        assert_eq!(
            normalize(url).as_deref(),
            Some("https://www.facebook.com/watch/?v=987654321")
        );
    }

    #[test]
    fn normalize_is_idempotent() {
        let urls = [
            "https://www.facebook.com/watch/?v=987654321&rdid=xyz",
            "https://www.instagram.com/reel/XXXXXXXXXXX/?igsh=q#top",
            "https://fb.watch/reel/abc123",
        ];
        for url in urls {
            let once = normalize(url).unwrap_or_else(|| panic!("{url} should parse"));
            assert_eq!(normalize(&once).as_deref(), Some(once.as_str()));
        }
    }

    #[test]
    fn normalize_rejects_unparseable() {
        assert!(normalize("ftp://example.com/x").is_none());
        assert!(normalize("https://[broken").is_none());
    }

    #[test]
    fn classified_link_is_normalized() {
        let link = classify("https://www.facebook.com/reel/123?fbclid=track#c")
            .unwrap_or_else(|| panic!("should classify"));
        assert_eq!(link.normalized_url, "https://www.facebook.com/reel/123");
    }

    #[rstest]
    #[case("https://www.instagram.com/p/short/", Platform::Instagram)]
    #[case("https://fb.watch/x/", Platform::Facebook)]
    #[case("https://example.com/", Platform::Unknown)]
    fn host_platform_guess(#[case] url: &str, #[case] platform: Platform) {
        assert_eq!(platform_of_host(url), platform);
    }
}
