//! URL classification.
//!
//! Decides whether an input string points at a YouTube video, a YouTube
//! Short (unsupported), a trusted medical/academic site, or anything else.
//! Classification is pure: no network access happens here.

use std::fmt;
use url::Url;

/// Host marker for YouTube short links (`youtu.be/<id>`)
const SHORT_LINK_MARKER: &str = "youtu.be";

/// Host marker for the canonical video site
const VIDEO_SITE_MARKER: &str = "youtube.com";

/// Exact host on which `/shorts` paths are recognised
const VIDEO_SITE_HOST: &str = "www.youtube.com";

/// Host fragments that mark a site as trusted
pub const TRUSTED_DOMAINS: [&str; 3] = ["nih.gov", ".gov", ".edu"];

/// What kind of content a URL refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    YouTubeVideo,
    YouTubeShort,
    TrustedSite,
    Untrusted,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetKind::YouTubeVideo => "YouTube video",
            TargetKind::YouTubeShort => "YouTube Short",
            TargetKind::TrustedSite => "trusted site",
            TargetKind::Untrusted => "untrusted site",
        };
        f.write_str(name)
    }
}

/// A URL after classification.
///
/// `identifier` holds the video id for [`TargetKind::YouTubeVideo`], the raw
/// URL for [`TargetKind::TrustedSite`] and is empty otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedTarget {
    pub kind: TargetKind,
    pub identifier: String,
}

impl ClassifiedTarget {
    fn new(kind: TargetKind, identifier: impl Into<String>) -> Self {
        Self {
            kind,
            identifier: identifier.into(),
        }
    }

    /// Canonical watch URL for a video target
    pub fn watch_url(&self) -> Option<String> {
        match self.kind {
            TargetKind::YouTubeVideo => Some(format!(
                "https://{}/watch?v={}",
                VIDEO_SITE_HOST, self.identifier
            )),
            _ => None,
        }
    }
}

/// Classify a raw URL string
pub fn classify(raw_url: &str) -> ClassifiedTarget {
    let raw_url = raw_url.trim();

    if raw_url.contains(SHORT_LINK_MARKER) {
        let video_id = strip_query(raw_url.rsplit('/').next().unwrap_or_default());
        return ClassifiedTarget::new(TargetKind::YouTubeVideo, video_id);
    }

    let parsed = Url::parse(raw_url).ok();

    if let Some(url) = &parsed {
        if url.host_str() == Some(VIDEO_SITE_HOST) && url.path().starts_with("/shorts") {
            return ClassifiedTarget::new(TargetKind::YouTubeShort, "");
        }
    }

    if raw_url.contains(VIDEO_SITE_MARKER) {
        let video_id = raw_url
            .rsplit_once("v=")
            .map(|(_, id)| strip_query(id))
            .unwrap_or_default();
        return ClassifiedTarget::new(TargetKind::YouTubeVideo, video_id);
    }

    let trusted = parsed
        .as_ref()
        .and_then(Url::host_str)
        .is_some_and(is_trusted_host);

    if trusted {
        ClassifiedTarget::new(TargetKind::TrustedSite, raw_url)
    } else {
        ClassifiedTarget::new(TargetKind::Untrusted, "")
    }
}

/// Canonical watch URL for any YouTube link; `None` for Shorts and non-video URLs
pub fn normalize_youtube_url(raw_url: &str) -> Option<String> {
    classify(raw_url).watch_url()
}

/// Check a host against the trusted domain list
pub fn is_trusted_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    TRUSTED_DOMAINS.iter().any(|domain| host.contains(domain))
}

/// Cut a path segment or parameter value at the first `&`, `?` or `#`
fn strip_query(segment: &str) -> &str {
    segment
        .split(['&', '?', '#'])
        .next()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_link_yields_trailing_segment() {
        let target = classify("https://youtu.be/abc123");
        assert_eq!(target.kind, TargetKind::YouTubeVideo);
        assert_eq!(target.identifier, "abc123");
    }

    #[test]
    fn short_link_drops_query_string() {
        let target = classify("https://youtu.be/dQw4w9WgXcQ?si=tracking&t=42");
        assert_eq!(target.identifier, "dQw4w9WgXcQ");
    }

    #[test]
    fn short_link_marker_anywhere_is_a_video() {
        for input in ["youtu.be/abc", "http://youtu.be/a/b/c", "see youtu.be/xyz"] {
            let target = classify(input);
            assert_eq!(target.kind, TargetKind::YouTubeVideo, "{input}");
            let expected = input.rsplit('/').next().unwrap();
            assert_eq!(target.identifier, expected, "{input}");
        }
    }

    #[test]
    fn shorts_are_rejected_regardless_of_query() {
        for input in [
            "https://www.youtube.com/shorts/xyz",
            "https://www.youtube.com/shorts/xyz?v=abc",
            "https://www.youtube.com/shorts",
            "https://www.youtube.com/shortsomething?feature=share",
        ] {
            let target = classify(input);
            assert_eq!(target.kind, TargetKind::YouTubeShort, "{input}");
            assert!(target.identifier.is_empty());
        }
    }

    #[test]
    fn watch_url_extracts_v_parameter() {
        let target = classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10s");
        assert_eq!(target.kind, TargetKind::YouTubeVideo);
        assert_eq!(target.identifier, "dQw4w9WgXcQ");

        let target = classify("https://m.youtube.com/watch?feature=share&v=abc");
        assert_eq!(target.identifier, "abc");
    }

    #[test]
    fn shorts_on_other_youtube_hosts_fall_through_to_video() {
        let target = classify("https://m.youtube.com/shorts/xyz");
        assert_eq!(target.kind, TargetKind::YouTubeVideo);
    }

    #[test]
    fn trusted_sites_keep_raw_url() {
        for input in [
            "https://www.nih.gov/health/topic",
            "https://medlineplus.gov/diabetes.html",
            "https://med.stanford.edu/news.html",
            "https://pubmed.ncbi.nlm.nih.gov/12345/",
        ] {
            let target = classify(input);
            assert_eq!(target.kind, TargetKind::TrustedSite, "{input}");
            assert_eq!(target.identifier, input);
        }
    }

    #[test]
    fn other_hosts_are_untrusted() {
        for input in [
            "https://www.webmd.com/diabetes",
            "https://example.com/?q=.gov",
            "https://wikipedia.org/wiki/Education",
        ] {
            assert_eq!(classify(input).kind, TargetKind::Untrusted, "{input}");
        }
    }

    #[test]
    fn malformed_input_degrades_to_untrusted() {
        for input in ["", "not a url", "www.nih.gov/health", "http://", "://.edu"] {
            assert_eq!(classify(input).kind, TargetKind::Untrusted, "{input:?}");
        }
    }

    #[test]
    fn classify_is_idempotent() {
        for input in [
            "https://youtu.be/abc123",
            "https://www.youtube.com/shorts/xyz",
            "https://www.nih.gov/health",
            "garbage",
        ] {
            assert_eq!(classify(input), classify(input));
        }
    }

    #[test]
    fn normalize_builds_watch_url() {
        assert_eq!(
            normalize_youtube_url("https://youtu.be/abc123").as_deref(),
            Some("https://www.youtube.com/watch?v=abc123")
        );
        assert_eq!(normalize_youtube_url("https://www.youtube.com/shorts/xyz"), None);
        assert_eq!(normalize_youtube_url("https://www.nih.gov"), None);
    }
}
