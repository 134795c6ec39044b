//! Work history: entries segmented out of the experience section, plus a
//! document-wide estimate of total years of experience.
//!
//! Inside the experience section a line opens an entry when it is either a
//! `Position, Organization ... [date range]` line or an all-caps line. The
//! bullet lines that follow are joined into the entry's description. Other
//! lines are kept as raw entries.
//!
//! The years estimate is crude: current year minus the earliest
//! year mentioned anywhere in the document, education dates included. It is
//! not reconciled with the parsed entries.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::extraction::models::{SectionKind, WorkEntry};
use crate::extraction::sections::{classify_header, Document};

static ENTRY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Za-z][A-Za-z\s\-&/]*),\s*([A-Za-z0-9\s\-&/()]+).*?((?:\w{3,9}\.? \d{4}\s*(?:-|–|—|to)\s*(?:\w{3,9}\.? \d{4}|[Pp]resent|[Cc]urrent))|[Pp]resent)?$",
    )
    .expect("valid work entry header regex")
});

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid digit run regex"));

const BULLET_MARKERS: &[char] = &['-', '•', '*', '●', '▪', '◦', '–'];
const CAPS_HEADER_MIN_LEN: usize = 5;
const EARLIEST_PLAUSIBLE_YEAR: i32 = 1950;

pub fn extract_work_history(doc: &Document<'_>) -> Vec<WorkEntry> {
    let Some(span) = doc.first_section(SectionKind::Experience) else {
        debug!("no experience section found");
        return Vec::new();
    };
    let lines: Vec<&str> = doc
        .section_lines(span)
        .iter()
        .map(|line| line.trim())
        .collect();

    let mut entries = Vec::new();
    let mut idx = 0;
    while idx < lines.len() {
        let line = lines[idx];
        idx += 1;
        // A repeated experience header stays inside the span.
        if line.is_empty() || classify_header(line).is_some() {
            continue;
        }

        let Some((position, organization, duration)) = parse_entry_header(line) else {
            entries.push(WorkEntry::Raw {
                raw: line.to_string(),
            });
            continue;
        };

        let mut description = Vec::new();
        while idx < lines.len() && is_bullet(lines[idx]) {
            let text = lines[idx].trim_start_matches(BULLET_MARKERS).trim();
            if !text.is_empty() {
                description.push(text);
            }
            idx += 1;
        }

        entries.push(WorkEntry::Structured {
            position,
            organization,
            duration,
            description: description.join(" "),
        });
    }

    debug!(count = entries.len(), "work entries parsed");
    entries
}

/// `(position, organization, duration)` when `line` opens an entry.
fn parse_entry_header(line: &str) -> Option<(String, String, String)> {
    if is_bullet(line) {
        return None;
    }
    if let Some(caps) = ENTRY_HEADER.captures(line) {
        let group = |i: usize| {
            caps.get(i)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default()
        };
        return Some((group(1), group(2), group(3)));
    }
    if is_caps_header(line) {
        return Some((line.to_string(), String::new(), String::new()));
    }
    None
}

fn is_caps_header(line: &str) -> bool {
    line.chars().count() >= CAPS_HEADER_MIN_LEN
        && line.chars().any(char::is_uppercase)
        && !line.chars().any(char::is_lowercase)
        && classify_header(line).is_none()
}

fn is_bullet(line: &str) -> bool {
    line.starts_with(BULLET_MARKERS)
}

/// Years between the earliest plausible year in `text` and `current_year`,
/// or 0 when the text mentions no year in range.
pub fn estimate_total_experience(text: &str, current_year: i32) -> u32 {
    let earliest = DIGIT_RUN
        .find_iter(text)
        .filter(|m| m.as_str().len() == 4)
        .filter_map(|m| m.as_str().parse::<i32>().ok())
        .filter(|year| (EARLIEST_PLAUSIBLE_YEAR..=current_year).contains(year))
        .min();
    match earliest {
        Some(year) => u32::try_from(current_year - year).unwrap_or(0),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries_of(text: &str) -> Vec<WorkEntry> {
        extract_work_history(&Document::parse(text))
    }

    fn structured(position: &str, organization: &str, duration: &str, description: &str) -> WorkEntry {
        WorkEntry::Structured {
            position: position.to_string(),
            organization: organization.to_string(),
            duration: duration.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_single_entry_with_bullets_excludes_next_section() {
        let text = "EXPERIENCE\n\
                    Software Engineer, Acme Corp, Jan 2020 - Dec 2022\n\
                    - Built payment pipeline\n\
                    - Led a team of 3\n\
                    EDUCATION\n\
                    B.Tech, Example University, 2016 - 2020\n";
        assert_eq!(
            entries_of(text),
            vec![structured(
                "Software Engineer",
                "Acme Corp",
                "Jan 2020 - Dec 2022",
                "Built payment pipeline Led a team of 3"
            )]
        );
    }

    #[test]
    fn test_entry_without_date_has_empty_duration() {
        let entries = entries_of("Work Experience\nData Analyst, Beta Labs\n");
        assert_eq!(entries, vec![structured("Data Analyst", "Beta Labs", "", "")]);
    }

    #[test]
    fn test_present_end_date() {
        let entries = entries_of("Experience\nBackend Developer, Gamma Inc, Mar 2021 - Present\n");
        assert_eq!(
            entries,
            vec![structured("Backend Developer", "Gamma Inc", "Mar 2021 - Present", "")]
        );
    }

    #[test]
    fn test_caps_line_is_an_entry_header() {
        let text = "EXPERIENCE\nGOOGLE INDIA\n• Worked on search ranking\n";
        assert_eq!(
            entries_of(text),
            vec![structured("GOOGLE INDIA", "", "", "Worked on search ranking")]
        );
    }

    #[test]
    fn test_unparseable_lines_become_raw_entries() {
        let text = "Experience\nFreelance consulting for local shops\n\nResearch Intern, IISc, May 2019 - Jul 2019\n";
        let entries = entries_of(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0],
            WorkEntry::Raw {
                raw: "Freelance consulting for local shops".to_string()
            }
        );
        assert_eq!(
            entries[1],
            structured("Research Intern", "IISc", "May 2019 - Jul 2019", "")
        );
    }

    #[test]
    fn test_stray_bullet_is_raw() {
        let entries = entries_of("Experience\n- orphan bullet, no header\n");
        assert_eq!(
            entries,
            vec![WorkEntry::Raw {
                raw: "- orphan bullet, no header".to_string()
            }]
        );
    }

    #[test]
    fn test_entries_keep_document_order() {
        let text = "EXPERIENCE\nEngineer, First Co\nAnalyst, Second Co\nIntern, Third Co\n";
        let positions: Vec<String> = entries_of(text)
            .into_iter()
            .filter_map(|e| match e {
                WorkEntry::Structured { position, .. } => Some(position),
                WorkEntry::Raw { .. } => None,
            })
            .collect();
        assert_eq!(positions, vec!["Engineer", "Analyst", "Intern"]);
    }

    #[test]
    fn test_repeated_header_is_not_an_entry() {
        let text = "Experience\nEngineer, First Co\nWORK EXPERIENCE\nAnalyst, Second Co\n";
        assert_eq!(entries_of(text).len(), 2);
    }

    #[test]
    fn test_no_experience_section() {
        assert!(entries_of("Jane Doe\nSkills\nRust\n").is_empty());
    }

    #[test]
    fn test_oldest_year_estimate() {
        let text = "Joined in 2015\nPromoted 2023";
        assert_eq!(estimate_total_experience(text, 2024), 9);
    }

    #[test]
    fn test_estimate_counts_education_years_too() {
        // Known crude heuristic: the 2012 school year wins over job dates.
        let text = "EXPERIENCE\nEngineer, Acme, Jan 2020 - Dec 2022\nEDUCATION\nSchool, 2012";
        assert_eq!(estimate_total_experience(text, 2024), 12);
    }

    #[test]
    fn test_estimate_ignores_out_of_range_and_embedded_years() {
        let text = "Phone 9876520101\nBorn 1949\nPlan for 2099\nID 12019";
        assert_eq!(estimate_total_experience(text, 2024), 0);
    }

    #[test]
    fn test_estimate_defaults_to_zero() {
        assert_eq!(estimate_total_experience("", 2024), 0);
    }
}
