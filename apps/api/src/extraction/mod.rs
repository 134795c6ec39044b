//! Field-extraction engine: raw résumé text in, structured record out.
//! Pure and synchronous; no persistence, HTTP or document conversion here.
//!
//! Flow: sections -> {name, contact, cgpa, skills, work_history} -> aggregator.

pub mod aggregator;
pub mod cgpa;
pub mod contact;
pub mod models;
pub mod name;
pub mod sections;
pub mod skills;
pub mod vocabulary;
pub mod work_history;

pub use aggregator::ResumeExtractor;
pub use models::ResumeRecord;
pub use vocabulary::SkillVocabulary;
