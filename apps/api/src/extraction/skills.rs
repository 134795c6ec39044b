//! Skill extraction: literal parsing of the skills section, unioned with
//! vocabulary matches over the whole document, then normalised and
//! de-duplicated case-insensitively.
//!
//! When the skills section yields nothing, every vocabulary term found
//! literally in the text is added as well.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::extraction::models::SectionKind;
use crate::extraction::sections::Document;
use crate::extraction::vocabulary::{SkillMatcher, SkillVocabulary};

static DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;|/\t•●▪·]").expect("valid skill delimiter regex"));

static LEADING_DECORATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s\-–•●▪◦*>·]+").expect("valid bullet regex"));

static YEAR_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}").expect("valid year prefix regex"));

const CONNECTOR_WORDS: &[&str] = &[
    "and", "or", "in", "with", "using", "etc", "including", "of", "the", "to", "for", "on",
    "like", "such as", "others",
];

/// Rendered fully upper-case whatever their source casing.
const UPPERCASE_TERMS: &[&str] = &[
    "ios", "macos", "sql", "aws", "gcp", "html", "css", "nlp", "oop", "jwt", "xml", "json",
    "php", "api", "ci/cd",
];

const ACRONYM_MAX_LEN: usize = 6;

/// Case-insensitive skill set keyed by the lower-cased normalised form.
/// The first spelling inserted for a key is kept.
#[derive(Debug, Default)]
struct SkillSet {
    by_key: BTreeMap<String, String>,
}

impl SkillSet {
    fn insert(&mut self, raw: &str) {
        if let Some(skill) = normalize_skill(raw) {
            self.by_key.entry(skill.to_lowercase()).or_insert(skill);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.by_key.into_values().collect()
    }
}

pub fn extract_skills(
    doc: &Document<'_>,
    vocabulary: &SkillVocabulary,
    matcher: &dyn SkillMatcher,
) -> Vec<String> {
    let mut skills = SkillSet::default();

    let literal = section_literal_skills(doc);
    debug!(count = literal.len(), "skills parsed from skills section");
    for token in &literal {
        skills.insert(token);
    }

    let matched = matcher.find_matches(doc.text(), vocabulary);
    debug!(count = matched.len(), "skills matched against vocabulary");
    for term in &matched {
        skills.insert(term);
    }

    if literal.is_empty() {
        let scanned = literal_vocabulary_scan(doc.text(), vocabulary);
        debug!(count = scanned.len(), "skills found by literal vocabulary scan");
        for term in scanned {
            skills.insert(term);
        }
    }

    skills.into_vec()
}

/// Tokens listed on the non-blank lines right after the skills header.
fn section_literal_skills(doc: &Document<'_>) -> Vec<String> {
    let Some(span) = doc.first_section(SectionKind::Skills) else {
        return Vec::new();
    };
    doc.section_lines(span)
        .iter()
        .skip_while(|line| line.trim().is_empty())
        .take_while(|line| !line.trim().is_empty())
        .flat_map(|line| DELIMITERS.split(line))
        .filter_map(clean_token)
        .collect()
}

fn clean_token(token: &str) -> Option<String> {
    // "Languages: Python" -> "Python"
    let token = token.rsplit(':').next().unwrap_or(token);
    let token = LEADING_DECORATION.replace(token, "");
    let token = token
        .trim()
        .trim_end_matches(|c: char| matches!(c, '.' | ':' | ';' | ',') || c.is_whitespace());

    if token.chars().count() < 2
        || token.chars().all(|c| c.is_ascii_digit())
        || YEAR_PREFIX.is_match(token)
        || CONNECTOR_WORDS.contains(&token.to_lowercase().as_str())
    {
        return None;
    }
    Some(token.to_string())
}

/// Vocabulary terms occurring in `text` as whole words, case-insensitively.
fn literal_vocabulary_scan<'v>(text: &str, vocabulary: &'v SkillVocabulary) -> Vec<&'v str> {
    let lowered = text.to_lowercase();
    vocabulary
        .terms()
        .iter()
        .filter(|term| contains_word(&lowered, term))
        .map(String::as_str)
        .collect()
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, matched)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Canonical rendering of a skill token, or `None` when nothing is left
/// after trimming.
pub fn normalize_skill(raw: &str) -> Option<String> {
    let skill = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if skill.is_empty() {
        return None;
    }

    let lower = skill.to_lowercase();
    if UPPERCASE_TERMS.contains(&lower.as_str()) {
        return Some(skill.to_uppercase());
    }
    if is_acronym(&skill) {
        return Some(skill);
    }
    if skill.contains(' ') {
        let words: Vec<String> = skill
            .split(' ')
            .map(|w| if is_acronym(w) { w.to_string() } else { capitalize(w) })
            .collect();
        return Some(words.join(" "));
    }
    if skill.contains('.') {
        let segments: Vec<String> = skill.split('.').map(capitalize).collect();
        return Some(segments.join("."));
    }
    Some(capitalize(&skill))
}

fn is_acronym(word: &str) -> bool {
    word.chars().count() <= ACRONYM_MAX_LEN
        && word.chars().any(char::is_uppercase)
        && !word.chars().any(char::is_lowercase)
}

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::extraction::vocabulary::PhraseSkillMatcher;

    fn skills_of(text: &str, terms: &[&str]) -> Vec<String> {
        let vocabulary = SkillVocabulary::new(terms);
        extract_skills(&Document::parse(text), &vocabulary, &PhraseSkillMatcher)
    }

    /// Matcher that reports a fixed set regardless of input.
    struct FixedMatcher(Vec<&'static str>);

    impl SkillMatcher for FixedMatcher {
        fn find_matches(&self, _text: &str, _vocabulary: &SkillVocabulary) -> BTreeSet<String> {
            self.0.iter().map(|s| s.to_string()).collect()
        }
    }

    #[test]
    fn test_section_tokens_are_split_and_cleaned() {
        let text = "Jane Doe\nTechnical Skills:\nPython, Rust; Docker | • Kubernetes, and, 2021, 42, x\n\nOther text";
        let skills = skills_of(text, &[]);
        assert_eq!(skills, vec!["Docker", "Kubernetes", "Python", "Rust"]);
    }

    #[test]
    fn test_label_prefix_inside_section_is_dropped() {
        let text = "SKILLS\nLanguages: Python, Go\nTools: Git\nEXPERIENCE\n";
        let skills = skills_of(text, &[]);
        assert_eq!(skills, vec!["Git", "Go", "Python"]);
    }

    #[test]
    fn test_acronyms_and_special_terms() {
        assert_eq!(normalize_skill("AWS").as_deref(), Some("AWS"));
        assert_eq!(normalize_skill("ios").as_deref(), Some("IOS"));
        assert_eq!(normalize_skill("sql").as_deref(), Some("SQL"));
        assert_eq!(normalize_skill("TENSORFLOW").as_deref(), Some("Tensorflow"));
    }

    #[test]
    fn test_multi_word_and_dotted_terms() {
        assert_eq!(
            normalize_skill("machine  learning").as_deref(),
            Some("Machine Learning")
        );
        assert_eq!(
            normalize_skill("microsoft SQL server").as_deref(),
            Some("Microsoft SQL Server")
        );
        assert_eq!(normalize_skill("node.js").as_deref(), Some("Node.Js"));
        assert_eq!(normalize_skill("  ").as_deref(), None);
    }

    #[test]
    fn test_vocabulary_hits_are_added() {
        let text = "Skills\nLeadership\n\nBuilt models with machine learning and Docker";
        let skills = skills_of(text, &["machine learning", "docker"]);
        assert_eq!(skills, vec!["Docker", "Leadership", "Machine Learning"]);
    }

    #[test]
    fn test_dedup_is_case_insensitive_and_keeps_section_spelling() {
        let text = "Skills\nDOCKER, python\n";
        let matcher = FixedMatcher(vec!["docker", "python", "Python "]);
        let skills = extract_skills(
            &Document::parse(text),
            &SkillVocabulary::new(["docker", "python"]),
            &matcher,
        );
        assert_eq!(skills, vec!["DOCKER", "Python"]);
    }

    #[test]
    fn test_literal_scan_used_without_skills_section() {
        // The matcher reports nothing; the literal scan still finds "c++".
        let text = "Wrote firmware in C++ for embedded boards";
        let skills = extract_skills(
            &Document::parse(text),
            &SkillVocabulary::new(["c++", "java"]),
            &FixedMatcher(vec![]),
        );
        assert_eq!(skills, vec!["C++"]);
    }

    #[test]
    fn test_literal_scan_skipped_when_section_has_tokens() {
        let text = "Skills\nRust\n\nAlso some C++ work";
        let skills = extract_skills(
            &Document::parse(text),
            &SkillVocabulary::new(["c++"]),
            &FixedMatcher(vec![]),
        );
        assert_eq!(skills, vec!["Rust"]);
    }

    #[test]
    fn test_contains_word_checks_boundaries() {
        assert!(contains_word("used java daily", "java"));
        assert!(!contains_word("used javascript daily", "java"));
        assert!(contains_word("c++, rust", "c++"));
    }

    #[test]
    fn test_empty_text_has_no_skills() {
        assert!(skills_of("", &["python"]).is_empty());
    }

    #[test]
    fn test_no_duplicates_under_case_insensitive_comparison() {
        let text = "Skills\nPython, PYTHON, python , Docker\nUses python and docker";
        let skills = skills_of(text, &["python", "docker"]);
        let keys: BTreeSet<String> = skills.iter().map(|s| s.trim().to_lowercase()).collect();
        assert_eq!(keys.len(), skills.len());
    }
}
