use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Facebook,
    Twitter,
    Linkedin,
    Youtube,
    Tiktok,
}

/// Checked in order; the first substring found wins.
const PLATFORM_DOMAINS: [(&str, Platform); 7] = [
    ("instagram.com", Platform::Instagram),
    ("facebook.com", Platform::Facebook),
    ("twitter.com", Platform::Twitter),
    ("x.com", Platform::Twitter),
    ("linkedin.com", Platform::Linkedin),
    ("youtube.com", Platform::Youtube),
    ("tiktok.com", Platform::Tiktok),
];

/// Domains accepted when cleaning a model's list of links. `t.co` is Twitter's
/// shortener and has no profile label of its own.
const SOCIAL_DOMAINS: [&str; 8] = [
    "instagram.com",
    "twitter.com",
    "x.com",
    "facebook.com",
    "linkedin.com",
    "youtube.com",
    "tiktok.com",
    "t.co",
];

static URL_IN_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s,]+").expect("url pattern"));

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
        }
    }

    /// Classify a URL by substring match on its lowercase form.
    pub fn classify(url: &str) -> Option<Platform> {
        let lower = url.to_lowercase();
        PLATFORM_DOMAINS
            .iter()
            .find(|(domain, _)| lower.contains(domain))
            .map(|(_, platform)| *platform)
    }

    /// Handles are shown with an `@` on Instagram and Twitter.
    fn uses_at_handle(&self) -> bool {
        matches!(self, Platform::Instagram | Platform::Twitter)
    }

    /// Label for a profile URL: its last non-empty path segment. Empty when the path is
    /// empty or the URL does not parse.
    pub fn label_for(&self, url: &str) -> String {
        let Ok(parsed) = Url::parse(url) else {
            return String::new();
        };

        match parsed.path().split('/').filter(|s| !s.is_empty()).last() {
            Some(segment) if self.uses_at_handle() => format!("@{}", segment),
            Some(segment) => segment.to_string(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized `{network, label}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLabel {
    pub network: Platform,
    pub label: String,
}

pub fn is_social_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    SOCIAL_DOMAINS.iter().any(|domain| lower.contains(domain))
}

/// Turn a model's free-text answer into a comma-joined list of social URLs.
///
/// A bare "none" answer, or one containing no social URLs, becomes the empty string.
pub fn clean_social_reply(reply: &str) -> String {
    let trimmed = reply
        .trim()
        .trim_matches(|c: char| c == '\'' || c == '"' || c == '.');
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return String::new();
    }

    URL_IN_TEXT
        .find_iter(reply)
        .map(|m| m.as_str())
        .filter(|url| is_social_url(url))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Split a comma-joined link string into trimmed, non-empty URLs, keeping only the first
/// occurrence of each.
pub fn split_unique_links(raw: &str) -> Vec<&str> {
    let mut seen = Vec::new();
    for url in raw.split(',').map(str::trim).filter(|u| !u.is_empty()) {
        if !seen.contains(&url) {
            seen.push(url);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_table() {
        let cases = [
            ("https://www.instagram.com/foo", Some(Platform::Instagram)),
            ("https://www.facebook.com/AgeOldOrganics", Some(Platform::Facebook)),
            ("https://twitter.com/ageoldorganics", Some(Platform::Twitter)),
            ("https://x.com/ageoldorganics", Some(Platform::Twitter)),
            ("https://www01.linkedin.com/company/advanced-nutrients-ltd-", Some(Platform::Linkedin)),
            ("https://www.youtube.com/user/advancednutrientsco", Some(Platform::Youtube)),
            ("https://www.TikTok.com/@grower", Some(Platform::Tiktok)),
            ("https://example.com/bar", None),
        ];

        for (url, expected) in cases {
            assert_eq!(Platform::classify(url), expected, "{url}");
        }
    }

    #[test]
    fn test_first_matching_domain_wins() {
        let url = "https://www.facebook.com/sharer?u=instagram.com";
        assert_eq!(Platform::classify(url), Some(Platform::Instagram));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Platform::Instagram.label_for("https://www.instagram.com/foo/"), "@foo");
        assert_eq!(Platform::Twitter.label_for("https://twitter.com/ageoldorganics"), "@ageoldorganics");
        assert_eq!(
            Platform::Youtube.label_for("https://www.youtube.com/user/advancednutrientsco"),
            "advancednutrientsco"
        );
        assert_eq!(Platform::Facebook.label_for("https://facebook.com"), "");
        assert_eq!(Platform::Instagram.label_for("instagram.com/foo"), "");
    }

    #[test]
    fn test_clean_reply_keeps_social_urls_only() {
        let reply = "Here you go: https://www.instagram.com/plantmoreseeds, https://bodhiseeds.com, https://t.co/abc";
        assert_eq!(
            clean_social_reply(reply),
            "https://www.instagram.com/plantmoreseeds, https://t.co/abc"
        );
    }

    #[test]
    fn test_clean_reply_none() {
        assert_eq!(clean_social_reply("none"), "");
        assert_eq!(clean_social_reply("  'None'. "), "");
        assert_eq!(clean_social_reply(""), "");
    }

    #[test]
    fn test_split_unique_links() {
        let raw = "https://www.facebook.com/A, https://twitter.com/a, https://www.facebook.com/A, ,";
        assert_eq!(
            split_unique_links(raw),
            vec!["https://www.facebook.com/A", "https://twitter.com/a"]
        );
    }
}
