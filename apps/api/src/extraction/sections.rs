//! Line/Section model: splits raw text into lines and tags spans of lines
//! with the résumé section they belong to.
//!
//! Section detection is a walk over the lines with an explicit state. A
//! header line opens its section; the section stays open until a header of a
//! different kind appears or the document ends. A repeated header of the
//! same kind does not split the span.

use crate::extraction::models::{SectionKind, SectionSpan};

/// Header aliases per section kind. Matched against the whole line after
/// trimming, lower-casing and stripping trailing punctuation.
const SECTION_HEADERS: &[(SectionKind, &[&str])] = &[
    (
        SectionKind::Skills,
        &[
            "skills",
            "technical skills",
            "key skills",
            "core skills",
            "skill set",
            "skillset",
            "expertise",
            "areas of expertise",
            "competencies",
            "core competencies",
            "technical competencies",
        ],
    ),
    (
        SectionKind::Experience,
        &[
            "experience",
            "work experience",
            "professional experience",
            "employment",
            "employment history",
            "work history",
            "career history",
            "internships",
            "internship experience",
        ],
    ),
    (
        SectionKind::Education,
        &[
            "education",
            "academic background",
            "academic details",
            "academics",
            "educational qualifications",
            "qualifications",
        ],
    ),
    (
        SectionKind::Projects,
        &[
            "projects",
            "academic projects",
            "personal projects",
            "key projects",
        ],
    ),
    (
        SectionKind::Achievements,
        &[
            "achievements",
            "awards",
            "honors",
            "honours",
            "accomplishments",
            "awards and achievements",
            "certifications",
        ],
    ),
    (
        SectionKind::Other,
        &[
            "summary",
            "profile",
            "objective",
            "career objective",
            "position of responsibility",
            "positions of responsibility",
            "entrepreneurship",
            "extra curriculars",
            "extracurricular activities",
            "interests",
            "hobbies",
            "languages",
            "references",
            "declaration",
            "personal details",
        ],
    ),
];

/// Returns the section kind when `line` is a header line.
pub fn classify_header(line: &str) -> Option<SectionKind> {
    let normalized = normalize_header(line);
    if normalized.is_empty() {
        return None;
    }
    SECTION_HEADERS
        .iter()
        .find(|(_, aliases)| aliases.contains(&normalized.as_str()))
        .map(|(kind, _)| *kind)
}

fn normalize_header(line: &str) -> String {
    let trimmed = line
        .trim()
        .trim_end_matches(|c: char| c == ':' || c == '-' || c == '.' || c == '–' || c.is_whitespace());
    trimmed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

enum WalkState {
    Outside,
    Inside { kind: SectionKind, start_line: usize },
}

/// Tags every header-delimited span of `lines`, in document order.
pub fn detect_sections(lines: &[&str]) -> Vec<SectionSpan> {
    let mut spans = Vec::new();
    let mut state = WalkState::Outside;

    for (idx, line) in lines.iter().enumerate() {
        let Some(kind) = classify_header(line) else {
            continue;
        };
        state = match state {
            WalkState::Inside {
                kind: open,
                start_line,
            } if open == kind => WalkState::Inside {
                kind: open,
                start_line,
            },
            WalkState::Inside {
                kind: open,
                start_line,
            } => {
                spans.push(SectionSpan {
                    kind: open,
                    start_line,
                    end_line: idx,
                });
                WalkState::Inside {
                    kind,
                    start_line: idx + 1,
                }
            }
            WalkState::Outside => WalkState::Inside {
                kind,
                start_line: idx + 1,
            },
        };
    }

    if let WalkState::Inside { kind, start_line } = state {
        spans.push(SectionSpan {
            kind,
            start_line,
            end_line: lines.len(),
        });
    }

    spans
}

/// Raw text split into lines, with its section spans precomputed.
/// Empty lines are kept so line positions match the source.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    text: &'a str,
    lines: Vec<&'a str>,
    sections: Vec<SectionSpan>,
}

impl<'a> Document<'a> {
    pub fn parse(text: &'a str) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        let sections = detect_sections(&lines);
        Self {
            text,
            lines,
            sections,
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// The first `n` lines (fewer if the document is shorter).
    pub fn head(&self, n: usize) -> &[&'a str] {
        &self.lines[..n.min(self.lines.len())]
    }

    pub fn sections(&self) -> &[SectionSpan] {
        &self.sections
    }

    /// First span of the given kind, if the document has one.
    pub fn first_section(&self, kind: SectionKind) -> Option<SectionSpan> {
        self.sections.iter().find(|s| s.kind == kind).copied()
    }

    /// Lines covered by `span`.
    pub fn section_lines(&self, span: SectionSpan) -> &[&'a str] {
        let end = span.end_line.min(self.lines.len());
        let start = span.start_line.min(end);
        &self.lines[start..end]
    }
}
