//! Keyword heuristics over free text (bio and captions).
//!
//! Matching is on whole words: text is lowercased and every run of
//! non-alphanumeric characters becomes a single space, so `"high-end"` in a
//! caption matches the keyword `"high end"` and `"fun"` does not fire inside
//! `"refund"`.

use std::sync::LazyLock;

use regex::Regex;
use sitesmith_core::HashtagCount;

static HASHTAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w&])#([A-Za-z0-9_]*[A-Za-z][A-Za-z0-9_]*)").expect("valid regex")
});

pub const DEFAULT_TONE: &str = "professional";
pub const DEFAULT_AESTHETIC: &str = "clean and modern";
pub const DEFAULT_POSTING_STYLE: &str = "mixed";

/// Reported when no color words are found, so the palette is never empty.
pub const NEUTRAL_PALETTE: [&str; 2] = ["#2d3748", "#f7fafc"];

const MAX_HASHTAGS: usize = 10;

/// Tone families, checked in order; the first family with a hit wins.
const TONE_FAMILIES: &[(&str, &[&str])] = &[
    (
        "luxurious",
        &[
            "luxury", "luxurious", "elegant", "elegance", "premium", "exclusive", "upscale",
            "refined", "bespoke", "high end", "opulent",
        ],
    ),
    (
        "fun",
        &[
            "fun", "playful", "exciting", "party", "lol", "haha", "yay", "silly", "awesome",
        ],
    ),
    (
        "minimal",
        &["minimal", "minimalist", "simple", "simplicity", "less is more", "clean lines"],
    ),
    (
        "warm",
        &[
            "warm", "cozy", "cosy", "welcoming", "family", "community", "friendly", "heartfelt",
            "homemade",
        ],
    ),
    (
        "casual",
        &["casual", "chill", "laid back", "relaxed", "easygoing", "hey", "y all"],
    ),
];

const AESTHETIC_BAG: &[(&str, &[&str])] = &[
    ("bright", &["bright", "sunny", "vibrant", "airy", "sunshine"]),
    ("moody", &["moody", "dark", "dramatic", "noir", "shadow"]),
    ("colorful", &["colorful", "colourful", "rainbow", "pop of color", "neon"]),
    ("natural", &["natural", "organic", "earthy", "botanical", "plants", "garden"]),
    ("urban", &["urban", "city", "street", "downtown", "industrial"]),
    ("vintage", &["vintage", "retro", "antique", "nostalgic", "throwback"]),
    ("modern", &["modern", "sleek", "contemporary", "minimalist", "futuristic"]),
];

/// Color name to hex, in reporting order.
const COLOR_WORDS: &[(&str, &str)] = &[
    ("navy", "#1e3a5f"),
    ("blue", "#2563eb"),
    ("teal", "#0d9488"),
    ("turquoise", "#14b8a6"),
    ("green", "#16a34a"),
    ("sage", "#87a96b"),
    ("olive", "#708238"),
    ("mint", "#98d8c8"),
    ("red", "#dc2626"),
    ("burgundy", "#800020"),
    ("pink", "#ec4899"),
    ("blush", "#f4c2c2"),
    ("coral", "#ff7f50"),
    ("orange", "#ea580c"),
    ("peach", "#ffcba4"),
    ("yellow", "#eab308"),
    ("gold", "#d4af37"),
    ("golden", "#d4af37"),
    ("purple", "#7c3aed"),
    ("lavender", "#b57edc"),
    ("brown", "#8b5a2b"),
    ("beige", "#e8dcc4"),
    ("cream", "#fffdd0"),
    ("charcoal", "#36454f"),
];

const THEME_BAGS: &[(&str, &[&str])] = &[
    (
        "food",
        &[
            "food", "menu", "recipe", "delicious", "dinner", "lunch", "brunch", "coffee",
            "chef", "tasty", "foodie",
        ],
    ),
    (
        "fitness",
        &[
            "fitness", "workout", "gym", "training", "yoga", "strength", "cardio", "wellness",
        ],
    ),
    (
        "beauty",
        &[
            "beauty", "hair", "nails", "makeup", "skincare", "salon", "spa", "glow", "lashes",
        ],
    ),
    (
        "service",
        &[
            "service", "repair", "install", "installation", "project", "job", "booking",
            "appointment", "estimate",
        ],
    ),
    (
        "local",
        &[
            "local", "neighborhood", "neighbourhood", "community", "hometown", "shop local",
            "small business",
        ],
    ),
    (
        "sustainability",
        &[
            "sustainable", "sustainability", "eco", "eco friendly", "recycled", "zero waste",
            "organic", "green living",
        ],
    ),
];

const PRODUCT_WORDS: &[&str] = &[
    "product", "products", "shop", "buy", "sale", "order", "price", "discount", "in stock",
    "new arrival", "link in bio",
];
const LIFESTYLE_WORDS: &[&str] = &[
    "lifestyle", "weekend", "adventure", "travel", "vibes", "everyday", "inspiration",
    "mood", "sunday",
];
const BEHIND_THE_SCENES_WORDS: &[&str] = &[
    "behind the scenes", "bts", "process", "making of", "our team", "workshop", "sneak peek",
    "meet the team", "day in the life",
];

/// Lowercased text with every non-alphanumeric run collapsed to one space,
/// padded so a keyword can be matched as `" word "`.
fn word_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(' ');
    let mut last_space = true;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            last_space = false;
        } else if !last_space {
            out.push(' ');
            last_space = true;
        }
    }
    if !last_space {
        out.push(' ');
    }
    out
}

fn contains_word(padded: &str, keyword: &str) -> bool {
    padded.contains(&format!(" {keyword} "))
}

fn contains_any(padded: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| contains_word(padded, k))
}

/// First tone family present in `text`, or `None` when nothing matched.
#[must_use]
pub fn detect_tone(text: &str) -> Option<&'static str> {
    let padded = word_text(text);
    TONE_FAMILIES
        .iter()
        .find(|(_, keywords)| contains_any(&padded, keywords))
        .map(|(label, _)| *label)
}

/// Every aesthetic label with a hit, joined into a short description.
#[must_use]
pub fn detect_aesthetic(text: &str) -> String {
    let padded = word_text(text);
    let labels: Vec<&str> = AESTHETIC_BAG
        .iter()
        .filter(|(_, keywords)| contains_any(&padded, keywords))
        .map(|(label, _)| *label)
        .collect();
    if labels.is_empty() {
        DEFAULT_AESTHETIC.to_string()
    } else {
        labels.join(", ")
    }
}

/// Hex values for color names mentioned in `text`, deduplicated, in
/// dictionary order. Empty when nothing matched.
#[must_use]
pub fn detect_color_words(text: &str) -> Vec<String> {
    let padded = word_text(text);
    let mut hits: Vec<String> = Vec::new();
    for (word, hex) in COLOR_WORDS {
        if contains_word(&padded, word) && !hits.iter().any(|h| h == hex) {
            hits.push((*hex).to_string());
        }
    }
    hits
}

/// Theme labels whose keyword bag appears in `text`, in a fixed order.
#[must_use]
pub fn detect_themes(text: &str) -> Vec<String> {
    let padded = word_text(text);
    THEME_BAGS
        .iter()
        .filter(|(_, keywords)| contains_any(&padded, keywords))
        .map(|(label, _)| (*label).to_string())
        .collect()
}

#[must_use]
pub fn detect_posting_style(text: &str) -> &'static str {
    let padded = word_text(text);
    if contains_any(&padded, PRODUCT_WORDS) {
        "product-focused"
    } else if contains_any(&padded, LIFESTYLE_WORDS) {
        "lifestyle"
    } else if contains_any(&padded, BEHIND_THE_SCENES_WORDS) {
        "behind-the-scenes"
    } else {
        DEFAULT_POSTING_STYLE
    }
}

/// Hashtags across `captions`, most frequent first (ties in first-seen
/// order), lowercased, top ten.
#[must_use]
pub fn rank_hashtags<'a>(captions: impl IntoIterator<Item = &'a str>) -> Vec<HashtagCount> {
    let mut counts: Vec<HashtagCount> = Vec::new();
    for caption in captions {
        for caps in HASHTAG_RE.captures_iter(caption) {
            let tag = caps[1].to_lowercase();
            match counts.iter_mut().find(|c| c.tag == tag) {
                Some(existing) => existing.count += 1,
                None => counts.push(HashtagCount { tag, count: 1 }),
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(MAX_HASHTAGS);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_families_are_checked_in_order() {
        assert_eq!(detect_tone("Elegant and fun events"), Some("luxurious"));
        assert_eq!(detect_tone("So much fun! Cozy vibes"), Some("fun"));
        assert_eq!(detect_tone("Cozy family bakery"), Some("warm"));
        assert_eq!(detect_tone("Just chill, laid-back tunes"), Some("casual"));
        assert_eq!(detect_tone("Less is more."), Some("minimal"));
        assert_eq!(detect_tone("Licensed plumbing contractor"), None);
    }

    #[test]
    fn keywords_match_whole_words_only() {
        assert_eq!(detect_tone("Full refund policy"), None);
        assert!(detect_color_words("Bluetooth speakers, redesigned").is_empty());
    }

    #[test]
    fn aesthetic_joins_every_hit() {
        assert_eq!(
            detect_aesthetic("Bright, botanical spaces with a retro twist"),
            "bright, natural, vintage"
        );
        assert_eq!(detect_aesthetic("We fix pipes"), DEFAULT_AESTHETIC);
    }

    #[test]
    fn color_words_map_to_hex_and_dedupe() {
        assert_eq!(
            detect_color_words("Gold and navy accents, golden hour, NAVY again"),
            vec!["#1e3a5f", "#d4af37"]
        );
    }

    #[test]
    fn themes_follow_bag_order() {
        assert_eq!(
            detect_themes("Shop local! Fresh brunch menu and a yoga class"),
            vec!["food", "fitness", "local"]
        );
        assert!(detect_themes("").is_empty());
    }

    #[test]
    fn posting_style_precedence() {
        assert_eq!(detect_posting_style("New arrival, link in bio"), "product-focused");
        assert_eq!(detect_posting_style("Weekend adventure"), "lifestyle");
        assert_eq!(
            detect_posting_style("Behind the scenes at the workshop"),
            "behind-the-scenes"
        );
        assert_eq!(detect_posting_style("Hello"), DEFAULT_POSTING_STYLE);
    }

    #[test]
    fn hashtags_ranked_by_frequency_then_first_seen() {
        let captions = [
            "Fresh loaves #bakery #Local",
            "#local love and #sourdough",
            "Another #bakery day, shade #fff",
            "&#39; entity is ignored #local",
        ];
        let ranked = rank_hashtags(captions);
        let tags: Vec<(&str, usize)> = ranked.iter().map(|h| (h.tag.as_str(), h.count)).collect();
        assert_eq!(
            tags,
            vec![("local", 3), ("bakery", 2), ("sourdough", 1), ("fff", 1)]
        );
    }

    #[test]
    fn hashtags_are_capped() {
        let caption: String = (0..15).map(|i| format!("#tag{i} ")).collect();
        assert_eq!(rank_hashtags([caption.as_str()]).len(), MAX_HASHTAGS);
    }
}
