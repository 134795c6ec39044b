use serde::{Deserialize, Serialize};

/// Topic of a contiguous span of résumé lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Skills,
    Experience,
    Education,
    Projects,
    Achievements,
    Other,
}

/// A section located in the line sequence. `start_line` is the first line
/// after the header, `end_line` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub kind: SectionKind,
    pub start_line: usize,
    pub end_line: usize,
}

/// One work-history record. An entry whose header could not be parsed is
/// kept as `Raw` with the original line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkEntry {
    Structured {
        position: String,
        organization: String,
        duration: String,
        description: String,
    },
    Raw {
        raw: String,
    },
}

impl WorkEntry {
    pub fn is_raw(&self) -> bool {
        matches!(self, WorkEntry::Raw { .. })
    }
}

/// Structured output of one extraction call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub cgpa: Option<String>,
    /// Normalised, case-insensitively unique, sorted by lower-cased form.
    pub skills: Vec<String>,
    pub work_experience: Vec<WorkEntry>,
    /// Earliest year mentioned anywhere in the document subtracted from the
    /// current year. Not derived from `work_experience`.
    pub total_experience_years: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_entry_serializes_flat() {
        let entry = WorkEntry::Structured {
            position: "Software Engineer".to_string(),
            organization: "Acme Corp".to_string(),
            duration: "Jan 2020 - Dec 2022".to_string(),
            description: String::new(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["position"], "Software Engineer");
        assert_eq!(value["organization"], "Acme Corp");
        assert!(value.get("raw").is_none());
    }

    #[test]
    fn test_raw_entry_round_trips_as_raw() {
        let entry: WorkEntry = serde_json::from_value(json!({"raw": "Freelance work"})).unwrap();
        assert!(entry.is_raw());
    }

    #[test]
    fn test_section_kind_snake_case() {
        let kind: SectionKind = serde_json::from_str(r#""achievements""#).unwrap();
        assert_eq!(kind, SectionKind::Achievements);
    }

    #[test]
    fn test_default_record_is_empty() {
        let record = ResumeRecord::default();
        assert!(record.name.is_empty());
        assert!(record.email.is_none());
        assert!(record.skills.is_empty());
        assert_eq!(record.total_experience_years, 0);
    }
}
