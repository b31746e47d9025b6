use crawl::SearchResult;

/// Keyword-based relevance of a search result to one kind of entity.
#[derive(Debug, Clone, Copy)]
pub struct KeywordProfile {
    pub keywords: &'static [&'static str],
    /// Substrings of the link that suggest an on-topic domain
    pub domain_hints: &'static [&'static str],
    /// Phrases anywhere in the result that earn an extra bonus
    pub phrases: &'static [&'static str],
    pub max_score: u32,
}

const KEYWORD_POINTS: u32 = 2;
const KEYWORD_CAP: u32 = 10;
const DOMAIN_BONUS: u32 = 5;
const PHRASE_BONUS: u32 = 3;

pub const BREEDER_PROFILE: KeywordProfile = KeywordProfile {
    keywords: &[
        "cannabis", "seed", "strain", "genetics", "breeder", "cultivation", "hemp", "marijuana",
        "weed", "grow", "dispensary", "thc", "cbd",
    ],
    domain_hints: &["seed", "cannabis", "strain"],
    phrases: &[],
    max_score: 15,
};

pub const BRAND_PROFILE: KeywordProfile = KeywordProfile {
    keywords: &[
        "cannabis", "cultivation", "grow", "growing", "hydroponic", "hydroponics", "nutrients",
        "fertilizer", "soil", "indoor", "outdoor", "greenhouse", "led", "lighting", "ventilation",
        "ph", "ec", "ppm", "bloom", "veg", "organic", "feed", "supplement", "additive", "yield",
        "harvest",
    ],
    domain_hints: &["grow", "hydro", "nutrients", "cultivation"],
    phrases: &["cannabis grow", "cannabis cultivation", "cannabis nutrients"],
    max_score: 18,
};

impl KeywordProfile {
    /// Score the top result only; an empty list scores 0.
    pub fn score(&self, results: &[SearchResult]) -> u32 {
        let Some(top) = results.first() else {
            return 0;
        };

        let link = top.link.as_deref().unwrap_or_default().to_lowercase();
        let text = [
            top.title.as_deref().unwrap_or_default(),
            top.link.as_deref().unwrap_or_default(),
            top.snippet.as_deref().unwrap_or_default(),
        ]
        .join(" ")
        .to_lowercase();

        let matches = self.keywords.iter().filter(|k| text.contains(*k)).count() as u32;
        let mut score = (matches * KEYWORD_POINTS).min(KEYWORD_CAP);

        if self.domain_hints.iter().any(|hint| link.contains(hint)) {
            score += DOMAIN_BONUS;
        }
        if self.phrases.iter().any(|phrase| text.contains(phrase)) {
            score += PHRASE_BONUS;
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str, link: &str, snippet: &str) -> SearchResult {
        SearchResult {
            title: Some(title.to_string()),
            link: Some(link.to_string()),
            snippet: Some(snippet.to_string()),
        }
    }

    #[test]
    fn test_empty_results_score_zero() {
        assert_eq!(BREEDER_PROFILE.score(&[]), 0);
        assert_eq!(BRAND_PROFILE.score(&[]), 0);
    }

    #[test]
    fn test_breeder_domain_bonus() {
        // "cannabis", "seed", "genetics" match: 6 points, plus the domain bonus
        let results = [result(
            "Bodhi Seeds",
            "https://bodhiseeds.com",
            "Rare cannabis genetics",
        )];
        assert_eq!(BREEDER_PROFILE.score(&results), 11);
    }

    #[test]
    fn test_keyword_points_are_capped() {
        let results = [result(
            "cannabis seed strain genetics breeder cultivation hemp",
            "https://example.org",
            "",
        )];
        assert_eq!(BREEDER_PROFILE.score(&results), 10);
    }

    #[test]
    fn test_only_top_result_counts() {
        let results = [
            result("Cookies", "https://cookies.co", "Clothing"),
            result("Cannabis seeds", "https://cannabisseeds.com", "Seed bank"),
        ];
        assert_eq!(BREEDER_PROFILE.score(&results), 0);
    }

    #[test]
    fn test_brand_phrase_bonus_reaches_max() {
        let results = [result(
            "Advanced Nutrients cannabis nutrients",
            "https://advancednutrients.com",
            "Hydroponics bloom grow feed",
        )];
        assert_eq!(BRAND_PROFILE.score(&results), BRAND_PROFILE.max_score);
    }
}
