use regex::Regex;
use std::sync::LazyLock;

/// Upper bound on the social excerpt handed to the model.
pub const SOCIAL_EXCERPT_CHARS: usize = 3000;

/// How much context to keep on each side of a social keyword.
const WINDOW_CHARS: usize = 100;

const SOCIAL_KEYWORDS: [&str; 9] = [
    "instagram",
    "twitter",
    "facebook",
    "linkedin",
    "youtube",
    "tiktok",
    "follow us",
    "social media",
    "@",
];

static SOCIAL_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)https?://[^\s"'<>]*(?:instagram|twitter|x\.com|facebook|linkedin|youtube|tiktok|t\.co)[^\s"'<>]*"#,
    )
    .expect("social url pattern")
});

static KEYWORD_WINDOWS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SOCIAL_KEYWORDS
        .iter()
        .map(|keyword| {
            Regex::new(&format!(
                "(?i).{{0,{w}}}{}.{{0,{w}}}",
                regex::escape(keyword),
                w = WINDOW_CHARS
            ))
            .expect("keyword window pattern")
        })
        .collect()
});

/// Cut `text` to at most `max_chars` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Pull the parts of a page that talk about social media.
///
/// Every social profile URL found in the page comes first, followed by the text
/// surrounding each social keyword. The result is capped at [`SOCIAL_EXCERPT_CHARS`].
pub fn social_excerpt(html: &str) -> String {
    let mut parts: Vec<&str> = SOCIAL_URL.find_iter(html).map(|m| m.as_str()).collect();

    let mut relevant = String::new();
    for window in KEYWORD_WINDOWS.iter() {
        let matches: Vec<&str> = window.find_iter(html).map(|m| m.as_str()).collect();
        relevant.push_str(&matches.join(" "));
        relevant.push(' ');
    }
    parts.push(&relevant);

    let combined = parts.join(" ");
    truncate_chars(&combined, SOCIAL_EXCERPT_CHARS).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 50), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_excerpt_leads_with_profile_urls() {
        let html = r#"<footer><a href="https://www.instagram.com/plantmoreseeds">Follow us</a>
<a href="https://example.com/shop">Shop</a></footer>"#;

        let excerpt = social_excerpt(html);
        assert!(excerpt.starts_with("https://www.instagram.com/plantmoreseeds"));
        assert!(!excerpt.starts_with("https://example.com"));
        assert!(excerpt.to_lowercase().contains("follow us"));
    }

    #[test]
    fn test_excerpt_is_capped() {
        let filler = "instagram ".repeat(2000);
        let excerpt = social_excerpt(&filler);
        assert_eq!(excerpt.chars().count(), SOCIAL_EXCERPT_CHARS);
    }

    #[test]
    fn test_page_without_social_content_is_blank() {
        let excerpt = social_excerpt("<p>Seeds and genetics since 1999</p>");
        assert!(excerpt.trim().is_empty());
    }
}
