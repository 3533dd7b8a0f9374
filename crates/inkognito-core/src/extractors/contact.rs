//! Strict pattern extractors for emails, phone numbers and URLs.
//!
//! Patterns are deliberately tight; looser heuristic matching would trade
//! precision for recall, and precision wins here. Phone candidates are
//! additionally gated through `phonelib` after normalization to E.164.

use super::{has_clean_boundaries, Extractor};
use crate::error::ExtractionError;
use crate::types::{Candidate, ExtractorKind, PiiType};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)*\.[a-z]{2,}\b")
        .expect("email pattern")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:https?://[^\s<>]+|www\.[a-z0-9-]+(?:\.[a-z0-9-]+)+(?:/[^\s<>]*)?)")
        .expect("url pattern")
});

// German subscriber numbers: +49/0049 international or 0-prefixed national
// form, with the usual space, dash or slash group separators.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+49|0049|0)[1-9][0-9]{1,4}[ \-/]?[0-9]{3,10}(?:[ \-/]?[0-9]{1,6})?")
        .expect("phone pattern")
});

const EMAIL_CONFIDENCE: f32 = 0.95;
const PHONE_CONFIDENCE: f32 = 0.90;
const URL_CONFIDENCE: f32 = 0.90;

#[derive(Debug, Default)]
pub struct ContactExtractor;

impl ContactExtractor {
    pub fn new() -> Self {
        Self
    }
}

/// Normalize a German phone match to E.164 for validation.
fn to_e164(raw: &str) -> String {
    let compact: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    if let Some(rest) = compact.strip_prefix("0049") {
        format!("+49{rest}")
    } else if compact.starts_with("+") {
        compact
    } else if let Some(rest) = compact.strip_prefix('0') {
        format!("+49{rest}")
    } else {
        compact
    }
}

/// Trailing sentence punctuation a greedy URL match may have swallowed.
fn trim_trailing_punct(text: &str, start: usize, mut end: usize) -> usize {
    while end > start {
        let Some(c) = text[start..end].chars().next_back() else {
            break;
        };
        if matches!(c, '.' | ',' | ';' | ':' | ')' | '!' | '?') {
            end -= c.len_utf8();
        } else {
            break;
        }
    }
    end
}

impl Extractor for ContactExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Pattern
    }

    fn extract(&self, text: &str) -> Result<Vec<Candidate>, ExtractionError> {
        let mut candidates = Vec::new();

        for m in EMAIL_RE.find_iter(text) {
            if let Some(c) = Candidate::new(
                text,
                PiiType::Email,
                m.start(),
                m.end(),
                EMAIL_CONFIDENCE,
                ExtractorKind::Pattern,
            ) {
                candidates.push(c);
            }
        }

        for m in URL_RE.find_iter(text) {
            let end = trim_trailing_punct(text, m.start(), m.end());
            if let Some(c) = Candidate::new(
                text,
                PiiType::Url,
                m.start(),
                end,
                URL_CONFIDENCE,
                ExtractorKind::Pattern,
            ) {
                candidates.push(c);
            }
        }

        for m in PHONE_RE.find_iter(text) {
            if !has_clean_boundaries(text, m.start(), m.end()) {
                continue;
            }
            let normalized = to_e164(m.as_str());
            let digit_count = normalized.chars().filter(|c| c.is_ascii_digit()).count();
            if !(9..=15).contains(&digit_count) {
                continue;
            }
            if !phonelib::is_valid_phone_number(&normalized) {
                continue;
            }
            let number_type = if normalized.starts_with("+491") {
                "mobile"
            } else {
                "landline"
            };
            if let Some(c) = Candidate::new(
                text,
                PiiType::Phone,
                m.start(),
                m.end(),
                PHONE_CONFIDENCE,
                ExtractorKind::Pattern,
            ) {
                candidates.push(
                    c.with_meta("country", "DE")
                        .with_meta("number_type", number_type),
                );
            }
        }

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<Candidate> {
        ContactExtractor::new().extract(text).unwrap()
    }

    #[test]
    fn test_email_basic() {
        let text = "Erreichen Sie mich unter ojaswini@gmail.com oder später.";
        let candidates = extract(text);
        let emails: Vec<&Candidate> = candidates
            .iter()
            .filter(|c| c.pii_type == PiiType::Email)
            .collect();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].text, "ojaswini@gmail.com");
        assert_eq!(emails[0].confidence, 0.95);
    }

    #[test]
    fn test_url_without_swallowing_sentence_period() {
        let text = "Besuchen Sie www.hamburg.de/service für Termine.";
        let candidates = extract(text);
        let urls: Vec<&Candidate> = candidates
            .iter()
            .filter(|c| c.pii_type == PiiType::Url)
            .collect();
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].text, "www.hamburg.de/service");
    }

    #[test]
    fn test_url_scheme_form_trailing_punct_trimmed() {
        let text = "Siehe https://example.de/pfad.";
        let candidates = extract(text);
        let url = candidates
            .iter()
            .find(|c| c.pii_type == PiiType::Url)
            .unwrap();
        assert_eq!(url.text, "https://example.de/pfad");
    }

    #[test]
    fn test_phone_e164_normalization() {
        assert_eq!(to_e164("040-12345678"), "+494012345678");
        assert_eq!(to_e164("0049 40 12345678"), "+494012345678");
        assert_eq!(to_e164("+49 171 2345678"), "+491712345678");
    }

    #[test]
    fn test_phone_rejects_short_digit_runs() {
        // "ab 9 Uhr" style times and short numbers must not match
        let candidates = extract("Das Büro ist ab 9 Uhr besetzt, Zimmer 0815.");
        assert!(candidates.iter().all(|c| c.pii_type != PiiType::Phone));
    }

    #[test]
    fn test_phone_not_matched_inside_longer_digit_run() {
        // Part of a tax-ID-shaped digit run, boundary check must drop it
        let candidates = extract("Nummer: 9901712345678901");
        assert!(candidates.iter().all(|c| c.pii_type != PiiType::Phone));
    }

    #[test]
    fn test_no_candidates_in_clean_text() {
        assert!(extract("Nur ein ganz normaler Satz.").is_empty());
    }
}
