//! Candidate name: a priority chain over the top of the document.
//!
//! 1. `Name:` / `Name -` label within the first 12 lines.
//! 2. A line of capitalised alphabetic words within the first 6 lines.
//! 3. A strict `Capitalized Capitalized` line within the first 6 lines.
//!
//! Heuristics 2 and 3 skip lines carrying non-name keywords or a courtesy
//! title. When nothing matches the name stays empty.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::extraction::sections::Document;

const LABEL_WINDOW: usize = 12;
const HEURISTIC_WINDOW: usize = 6;

/// Substrings that mark a line as something other than a name.
const NON_NAME_KEYWORDS: &[&str] = &[
    "curriculum vitae",
    "resume",
    "résumé",
    "email",
    "e-mail",
    "phone",
    "mobile",
    "contact",
    "address",
    "dob",
    "date of birth",
    "cgpa",
    "gpa",
    "linkedin",
    "github",
    "india",
    "bengaluru",
    "bangalore",
    "delhi",
    "mumbai",
    "pune",
    "hyderabad",
    "chennai",
    "summary",
    "profile",
    "objective",
    "skills",
    "education",
    "career",
    "professional",
    "experience",
    "title",
    "course",
    "specialisation",
    "specialization",
    "department",
    "branch",
    "stream",
    "bachelor",
    "master",
    "b.tech",
    "m.tech",
    "university",
    "institute",
    "college",
];

const COURTESY_TITLES: &[&str] = &[
    "mr", "ms", "mrs", "dr", "prof", "sir", "madam", "miss", "shri", "smt",
];

static TWO_CAPITALIZED_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-zA-Z]+ [A-Z][a-zA-Z]+$").expect("valid two-word name regex")
});

pub fn extract_name(doc: &Document<'_>) -> String {
    if let Some(name) = labeled_name(doc.head(LABEL_WINDOW)) {
        debug!("name resolved from labeled line");
        return name;
    }
    if let Some(name) = capitalized_line(doc.head(HEURISTIC_WINDOW)) {
        debug!("name resolved from capitalisation heuristic");
        return name;
    }
    if let Some(name) = strict_two_words(doc.head(HEURISTIC_WINDOW)) {
        debug!("name resolved from two-word pattern");
        return name;
    }
    String::new()
}

fn labeled_name(lines: &[&str]) -> Option<String> {
    lines.iter().find_map(|line| {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();
        if !(lower.starts_with("name:") || lower.starts_with("name -")) {
            return None;
        }
        let rest = match trimmed.split_once(':') {
            Some((_, rest)) => rest,
            None => trimmed.split_once('-').map(|(_, rest)| rest)?,
        };
        let candidate = rest.trim();
        let words: Vec<&str> = candidate.split_whitespace().collect();
        let capitalised = words.iter().all(|w| match w.chars().next() {
            Some(c) if c.is_alphabetic() => c.is_uppercase(),
            _ => true,
        });
        (words.len() >= 2 && capitalised).then(|| words.join(" "))
    })
}

/// Lines eligible for the unlabeled heuristics, trimmed.
fn candidate_lines<'a>(lines: &'a [&'a str]) -> impl Iterator<Item = &'a str> {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .filter(|line| {
            let lower = line.to_lowercase();
            !NON_NAME_KEYWORDS.iter().any(|k| lower.contains(k))
                && !COURTESY_TITLES
                    .iter()
                    .any(|t| lower.starts_with(&format!("{t} ")) || lower.starts_with(&format!("{t}. ")))
        })
}

fn capitalized_line(lines: &[&str]) -> Option<String> {
    candidate_lines(lines).find_map(|line| {
        let words: Vec<&str> = line.split_whitespace().collect();
        let well_formed = words.len() >= 2
            && words.iter().all(|w| {
                w.chars().all(char::is_alphabetic)
                    && w.chars().next().is_some_and(char::is_uppercase)
            });
        well_formed.then(|| words.iter().map(|w| name_case(w)).collect::<Vec<_>>().join(" "))
    })
}

fn strict_two_words(lines: &[&str]) -> Option<String> {
    candidate_lines(lines)
        .find(|line| TWO_CAPITALIZED_WORDS.is_match(line))
        .map(str::to_string)
}

/// "SMITH" -> "Smith"; mixed-case words are left alone.
fn name_case(word: &str) -> String {
    if word.chars().any(char::is_lowercase) {
        return word.to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
