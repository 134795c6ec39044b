use std::sync::Arc;

use chrono::{Datelike, Utc};
use tracing::info;

use crate::extraction::cgpa::extract_cgpa;
use crate::extraction::contact::extract_contact;
use crate::extraction::models::ResumeRecord;
use crate::extraction::name::extract_name;
use crate::extraction::sections::Document;
use crate::extraction::skills::extract_skills;
use crate::extraction::vocabulary::{PhraseSkillMatcher, SkillMatcher, SkillVocabulary};
use crate::extraction::work_history::{estimate_total_experience, extract_work_history};

/// Runs every field extractor over one document and assembles the record.
///
/// Holds only immutable configuration (the vocabulary and the matcher), so a
/// single instance can be shared across threads behind an `Arc`.
pub struct ResumeExtractor {
    vocabulary: SkillVocabulary,
    matcher: Arc<dyn SkillMatcher>,
}

impl ResumeExtractor {
    pub fn new(vocabulary: SkillVocabulary, matcher: Arc<dyn SkillMatcher>) -> Self {
        Self {
            vocabulary,
            matcher,
        }
    }

    /// Built-in vocabulary with the default phrase matcher.
    pub fn with_builtin_vocabulary() -> Self {
        Self::new(SkillVocabulary::builtin(), Arc::new(PhraseSkillMatcher))
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn extract(&self, text: &str) -> ResumeRecord {
        self.extract_as_of(text, Utc::now().year())
    }

    /// Same as `extract`, with the year used for the experience estimate
    /// pinned by the caller.
    pub fn extract_as_of(&self, text: &str, current_year: i32) -> ResumeRecord {
        let doc = Document::parse(text);
        let contact = extract_contact(&doc);

        let record = ResumeRecord {
            name: extract_name(&doc),
            email: contact.email,
            phone: contact.phone,
            cgpa: extract_cgpa(&doc),
            skills: extract_skills(&doc, &self.vocabulary, self.matcher.as_ref()),
            work_experience: extract_work_history(&doc),
            total_experience_years: estimate_total_experience(text, current_year),
        };

        info!(
            lines = doc.lines().len(),
            sections = doc.sections().len(),
            has_name = !record.name.is_empty(),
            has_email = record.email.is_some(),
            has_phone = record.phone.is_some(),
            has_cgpa = record.cgpa.is_some(),
            skills = record.skills.len(),
            work_entries = record.work_experience.len(),
            raw_work_entries = record.work_experience.iter().filter(|e| e.is_raw()).count(),
            total_experience_years = record.total_experience_years,
            "resume extracted"
        );
        record
    }
}
