//! Academic score. A labeled score (CGPA / GPA and dotted variants) wins;
//! otherwise the first bare `d.dd` / `d.ddd` number in the text is taken.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::extraction::sections::Document;

static LABELED_SCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:c\.?\s?g\.?\s?p\.?\s?a|g\.?\s?p\.?\s?a)\.?[^\d\n]{0,10}(\d\.\d{2,3})\b")
        .expect("valid labeled cgpa regex")
});

static BARE_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d\.\d{2,3})\b").expect("valid bare cgpa regex"));

pub fn extract_cgpa(doc: &Document<'_>) -> Option<String> {
    let labeled = doc
        .lines()
        .iter()
        .find_map(|line| LABELED_SCORE.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());
    if labeled.is_some() {
        debug!("cgpa resolved from labeled score");
        return labeled;
    }

    let bare = BARE_SCORE
        .captures(doc.text())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());
    if bare.is_some() {
        debug!("cgpa resolved from bare decimal fallback");
    }
    bare
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cgpa_of(text: &str) -> Option<String> {
        extract_cgpa(&Document::parse(text))
    }

    #[test]
    fn test_labeled_cgpa() {
        assert_eq!(cgpa_of("CGPA: 8.75/10").as_deref(), Some("8.75"));
        assert_eq!(cgpa_of("GPA - 3.912").as_deref(), Some("3.912"));
        assert_eq!(cgpa_of("C.G.P.A. 9.10").as_deref(), Some("9.10"));
    }

    #[test]
    fn test_label_is_case_insensitive() {
        assert_eq!(cgpa_of("cgpa of 7.25").as_deref(), Some("7.25"));
    }

    #[test]
    fn test_labeled_wins_over_earlier_bare_number() {
        let text = "Version 1.25 of tool\nB.Tech, CGPA: 8.40";
        assert_eq!(cgpa_of(text).as_deref(), Some("8.40"));
    }

    #[test]
    fn test_bare_fallback_without_label() {
        let text = "B.Tech Computer Science\nScored 8.75 overall";
        assert_eq!(cgpa_of(text).as_deref(), Some("8.75"));
    }

    #[test]
    fn test_one_fractional_digit_is_ignored() {
        assert_eq!(cgpa_of("CGPA: 9.1"), None);
    }

    #[test]
    fn test_longer_decimals_do_not_match() {
        assert_eq!(cgpa_of("ratio 3.14159"), None);
        assert_eq!(cgpa_of("value 12.50"), None);
    }

    #[test]
    fn test_no_score() {
        assert_eq!(cgpa_of(""), None);
    }
}
