//! Email and phone extraction.
//!
//! Email: every full-text match of the strict pattern is collected and an
//! academic address (`.edu` / `.ac.in` domain) is preferred over the first
//! match. Phone: the first 10-12 digit run found scanning line by line. The
//! same line scan also tries a looser email pattern when the full-text pass
//! found nothing, and stops as soon as both fields are resolved.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::extraction::sections::Document;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z0-9._%+-]+@[a-z0-9-]+(?:\.[a-z0-9-]+)*\.[a-z]{2,}")
        .expect("valid email regex")
});

static LOOSE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+").expect("valid loose email regex"));

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:(\d{1,3})[- ])?(\d{10,12})\b").expect("valid phone regex")
});

/// Whole domain labels, dot-delimited on both sides.
const ACADEMIC_LABELS: &[&str] = &[".edu.", ".ac.in."];
const MAX_PHONE_DIGITS: usize = 12;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub fn extract_contact(doc: &Document<'_>) -> ContactDetails {
    let mut contact = ContactDetails {
        email: preferred_email(doc.text()),
        phone: None,
    };
    if contact.email.is_some() {
        debug!("email resolved from full-text scan");
    }

    for line in doc.lines() {
        if contact.email.is_none() {
            if let Some(m) = LOOSE_EMAIL.find(line) {
                debug!("email resolved from line scan");
                contact.email = Some(m.as_str().to_string());
            }
        }
        if contact.phone.is_none() {
            contact.phone = phone_in(line);
        }
        if contact.email.is_some() && contact.phone.is_some() {
            break;
        }
    }

    contact
}

fn preferred_email(text: &str) -> Option<String> {
    let emails: Vec<&str> = EMAIL.find_iter(text).map(|m| m.as_str()).collect();
    emails
        .iter()
        .find(|email| is_academic(email))
        .or_else(|| emails.first())
        .map(|email| email.to_string())
}

fn is_academic(email: &str) -> bool {
    let domain = email
        .rsplit_once('@')
        .map(|(_, domain)| domain.to_lowercase())
        .unwrap_or_default();
    let dotted = format!(".{domain}.");
    ACADEMIC_LABELS.iter().any(|labels| dotted.contains(labels))
}

/// Digits of the first phone number on `line`. The country code is kept
/// as a prefix only while the result stays within 12 digits.
fn phone_in(line: &str) -> Option<String> {
    let caps = PHONE.captures(line)?;
    let number = caps.get(2)?.as_str();
    match caps.get(1) {
        Some(code) if code.len() + number.len() <= MAX_PHONE_DIGITS => {
            Some(format!("{}{number}", code.as_str()))
        }
        _ => Some(number.to_string()),
    }
}
