//! Government identifier extraction: tax IDs, passport/identity document
//! serials and driving licence numbers.
//!
//! Every pattern is paired with its validator from `validators`; context
//! keywords near the match are recorded in metadata but never required, so
//! a bare valid identifier is still caught.

use super::{has_clean_boundaries, Extractor};
use crate::error::ExtractionError;
use crate::types::{Candidate, ExtractorKind, PiiType};
use crate::validators;
use regex::Regex;
use std::sync::LazyLock;

static TAX_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]{11}\b").expect("tax id pattern"));

static PASSPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[CFGHJKLMNPRTVWXYZ][CFGHJKLMNPRTVWXYZ0-9]{8}\b").expect("passport pattern")
});

static LICENSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z0-9]{11}\b").expect("licence pattern"));

const GOV_ID_CONFIDENCE: f32 = 0.95;
const PASSPORT_CONFIDENCE: f32 = 0.90;

/// (keyword, metadata context value) pairs scanned in the 24 bytes before a
/// match, lower-cased.
const CONTEXT_CUES: &[(&str, &str)] = &[
    ("steuer", "tax"),
    ("ausweis", "identity_document"),
    ("reisepass", "passport"),
    ("führerschein", "driver_license"),
];

#[derive(Debug, Default)]
pub struct GovIdExtractor;

impl GovIdExtractor {
    pub fn new() -> Self {
        Self
    }
}

fn context_cue(text: &str, start: usize) -> Option<&'static str> {
    let mut window_start = start.saturating_sub(24);
    while !text.is_char_boundary(window_start) {
        window_start -= 1;
    }
    let window = text[window_start..start].to_lowercase();
    CONTEXT_CUES
        .iter()
        .find(|(cue, _)| window.contains(cue))
        .map(|&(_, label)| label)
}

impl Extractor for GovIdExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::GovId
    }

    fn extract(&self, text: &str) -> Result<Vec<Candidate>, ExtractionError> {
        let mut candidates = Vec::new();

        let mut push = |pii_type: PiiType, start: usize, end: usize, confidence: f32| {
            if let Some(c) =
                Candidate::new(text, pii_type, start, end, confidence, ExtractorKind::GovId)
            {
                let c = match context_cue(text, start) {
                    Some(cue) => c.with_meta("context", cue),
                    None => c,
                };
                candidates.push(c);
            }
        };

        for m in TAX_ID_RE.find_iter(text) {
            if has_clean_boundaries(text, m.start(), m.end())
                && validators::steuer_id(m.as_str())
            {
                push(PiiType::TaxId, m.start(), m.end(), GOV_ID_CONFIDENCE);
            }
        }

        for m in PASSPORT_RE.find_iter(text) {
            if has_clean_boundaries(text, m.start(), m.end())
                && validators::passport_number(m.as_str())
            {
                push(PiiType::Passport, m.start(), m.end(), PASSPORT_CONFIDENCE);
            }
        }

        for m in LICENSE_RE.find_iter(text) {
            if has_clean_boundaries(text, m.start(), m.end())
                && validators::driver_license(m.as_str())
            {
                push(PiiType::DriverLicense, m.start(), m.end(), GOV_ID_CONFIDENCE);
            }
        }

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<Candidate> {
        GovIdExtractor::new().extract(text).unwrap()
    }

    #[test]
    fn test_tax_id_with_context_cue() {
        let candidates = extract("Steuer-ID: 81872495633.");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].pii_type, PiiType::TaxId);
        assert_eq!(candidates[0].text, "81872495633");
        assert_eq!(candidates[0].metadata["context"], "tax");
    }

    #[test]
    fn test_tax_id_without_cue_still_caught() {
        let candidates = extract("Bitte 81872495633 notieren.");
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].metadata.is_empty());
    }

    #[test]
    fn test_eleven_digits_failing_checksum_ignored() {
        assert!(extract("Steuer-ID: 12345678901.").is_empty());
    }

    #[test]
    fn test_passport_serial() {
        let candidates = extract("hier ist mein Ausweis: L01X00T47.");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].pii_type, PiiType::Passport);
        assert_eq!(candidates[0].text, "L01X00T47");
        assert_eq!(candidates[0].metadata["context"], "identity_document");
    }

    #[test]
    fn test_driver_license_checksum_gate() {
        let valid = extract("Führerschein-Nr: B072R6U5199.");
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].pii_type, PiiType::DriverLicense);
        assert_eq!(valid[0].metadata["context"], "driver_license");

        // Demo-style serial with a wrong check digit in position nine
        assert!(extract("Führerschein-Nr: B072R6U5359.").is_empty());
    }

    #[test]
    fn test_plain_words_do_not_match() {
        assert!(extract("Die Hauptversammlung beginnt um elf.").is_empty());
    }
}
