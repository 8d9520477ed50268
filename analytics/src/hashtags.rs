//! Hashtag extraction from video titles and descriptions.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

// ASCII word characters plus the Hebrew block.
static HASHTAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#[A-Za-z0-9_\x{0590}-\x{05FF}]+").expect("hashtag pattern is valid")
});

/// Collect the distinct hashtags mentioned in a title and description.
///
/// Tags are lower-cased, so `#Foo` and `#foo` count as the same tag.
pub fn extract_hashtags(title: &str, description: &str) -> BTreeSet<String> {
    [title, description]
        .into_iter()
        .flat_map(|text| HASHTAG.find_iter(text))
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn case_folds_and_deduplicates() {
        let tags = extract_hashtags("Check #Foo out", "Also #foo and #bar");
        let expected: BTreeSet<String> = ["#foo", "#bar"].map(String::from).into();
        assert_eq!(tags, expected);
    }

    #[test]
    fn no_hashtags_is_empty() {
        assert!(extract_hashtags("", "").is_empty());
        assert!(extract_hashtags("no tags here", "just # a lonely hash").is_empty());
    }

    #[test]
    fn stops_at_non_word_characters() {
        let tags = extract_hashtags("#rust-lang #tokio!", "#under_score,#42");
        let expected: BTreeSet<String> =
            ["#rust", "#tokio", "#under_score", "#42"].map(String::from).into();
        assert_eq!(tags, expected);
    }

    #[test]
    fn accepts_hebrew_tags() {
        let tags = extract_hashtags("מתכון #בישול קל", "");
        assert!(tags.contains("#בישול"), "{tags:?}");
    }
}
