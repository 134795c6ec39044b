//! Skill vocabulary and the phrase-matching capability run against it.
//!
//! The vocabulary is loaded once at startup and never mutated. Matching is
//! behind the `SkillMatcher` trait so the extraction engine does not depend
//! on one matching strategy; `PhraseSkillMatcher` is the default.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

/// Known technical skill terms, lower-cased.
const BUILTIN_SKILLS: &[&str] = &[
    // Programming languages
    "python", "java", "javascript", "typescript", "c++", "c#", "ruby", "php", "swift",
    "kotlin", "golang", "rust", "scala", "perl", "matlab", "sql", "bash", "powershell",
    "dart", "objective-c", "haskell", "lua", "julia", "groovy", "fortran",
    // Web
    "html", "css", "sass", "bootstrap", "tailwind", "react", "angular", "vue", "svelte",
    "jquery", "node.js", "express.js", "django", "flask", "spring boot", "asp.net",
    "laravel", "ruby on rails", "next.js", "nuxt.js", "webpack", "graphql", "rest api",
    "xml", "json", "ajax", "websocket",
    // Databases
    "mysql", "postgresql", "mongodb", "sqlite", "redis", "cassandra", "dynamodb",
    "mariadb", "elasticsearch", "neo4j", "firebase", "microsoft sql server",
    // Cloud and DevOps
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "git", "ci/cd", "terraform",
    "ansible", "nginx", "linux", "unix", "heroku", "aws lambda", "serverless",
    // Data science and AI
    "machine learning", "deep learning", "artificial intelligence", "neural networks",
    "data science", "data analysis", "tensorflow", "pytorch", "keras", "scikit-learn",
    "pandas", "numpy", "scipy", "matplotlib", "tableau", "power bi", "opencv", "nltk",
    "spacy", "hadoop", "spark", "kafka", "airflow", "mlops", "computer vision", "nlp",
    // Mobile
    "android", "ios", "react native", "flutter", "xamarin", "ionic", "xcode",
    // Testing
    "junit", "selenium", "cypress", "jest", "mocha", "pytest", "testng", "postman",
    "jmeter", "appium",
    // Tools and practices
    "agile", "scrum", "kanban", "jira", "confluence", "github", "gitlab", "bitbucket",
    "microservices", "design patterns", "oop", "blockchain", "solidity", "excel",
    // Security
    "cybersecurity", "penetration testing", "cryptography", "oauth", "jwt",
];

/// Immutable, de-duplicated, lower-cased skill terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    terms: Vec<String>,
}

impl SkillVocabulary {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms: BTreeSet<String> = terms
            .into_iter()
            .map(|t| t.as_ref().split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self {
            terms: terms.into_iter().collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_SKILLS)
    }

    /// One term per line; blank lines and `#` comments are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut terms = Vec::new();
        for line in reader.lines() {
            let line = line.context("Failed to read skill vocabulary line")?;
            let term = line.trim();
            if term.is_empty() || term.starts_with('#') {
                continue;
            }
            terms.push(term.to_string());
        }
        Ok(Self::new(terms))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open skill vocabulary '{}'", path.display()))?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Finds which vocabulary terms occur in a text. Implement this to swap the
/// matching strategy without touching the skill extractor.
pub trait SkillMatcher: Send + Sync {
    /// Vocabulary terms (as stored in the vocabulary) that occur in `text`.
    fn find_matches(&self, text: &str, vocabulary: &SkillVocabulary) -> BTreeSet<String>;
}

/// Case-insensitive, multi-word token-sequence matcher.
///
/// Tokens are runs of letters, digits and the symbols `+ # .` (so `c++`,
/// `c#` and `node.js` survive as single tokens); a trailing `.` is treated
/// as sentence punctuation. A term matches when its tokens appear
/// contiguously in the text's tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhraseSkillMatcher;

impl SkillMatcher for PhraseSkillMatcher {
    fn find_matches(&self, text: &str, vocabulary: &SkillVocabulary) -> BTreeSet<String> {
        let lowered = text.to_lowercase();
        let tokens = tokenize(&lowered);
        vocabulary
            .terms()
            .iter()
            .filter(|term| {
                let needle = tokenize(term);
                !needle.is_empty() && tokens.windows(needle.len()).any(|w| w == needle.as_slice())
            })
            .cloned()
            .collect()
    }
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '+' | '#' | '.')
}

fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !is_token_char(c))
        .map(|t| t.trim_end_matches('.'))
        .filter(|t| !t.is_empty())
        .collect()
}
