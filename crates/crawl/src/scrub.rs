use regex::Regex;
use std::sync::LazyLock;

// Non-greedy, case-insensitive, and `.` spans newlines so multi-line blocks go too.
static SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").expect("script pattern"));
static STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style>").expect("style pattern"));
static SVG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<svg\b[^>]*>.*?</svg>").expect("svg pattern"));
static STYLESHEET_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<link\b[^>]*\brel\s*=\s*["']?stylesheet["']?[^>]*/>"#)
        .expect("stylesheet link pattern")
});
static INPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<input\b[^>]*/>").expect("input pattern"));

/// Replace non-content markup with a single space.
///
/// Removes `<script>`, `<style>` and `<svg>` elements with their bodies, self-closing
/// stylesheet `<link/>` tags and self-closing `<input/>` tags. This is a textual pass,
/// not a parse: malformed or nested markup may survive.
pub fn scrub_html(html: &str) -> String {
    let mut text = html.to_string();
    for pattern in [&*SCRIPT, &*STYLE, &*SVG, &*STYLESHEET_LINK, &*INPUT] {
        text = pattern.replace_all(&text, " ").into_owned();
    }
    text
}
