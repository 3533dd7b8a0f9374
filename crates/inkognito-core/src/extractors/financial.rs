//! Financial identifier extraction: IBANs and payment card numbers.
//!
//! Pattern match first, checksum immediately after; a match that fails its
//! checksum is discarded, never downgraded. This is the cheap pre-filter
//! that keeps lucky digit runs ("Glückszahlen") out of the detection set.

use super::{has_clean_boundaries, Extractor};
use crate::error::ExtractionError;
use crate::types::{Candidate, ExtractorKind, PiiType};
use crate::validators;
use regex::Regex;
use std::sync::LazyLock;

static IBAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z]{2}[0-9]{2}(?: ?[A-Z0-9]){11,30}\b").expect("iban pattern")
});

static CARD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:[0-9][ -]?){12,18}[0-9]\b").expect("card pattern"));

const IBAN_CONFIDENCE: f32 = 0.99;
const CARD_CONFIDENCE: f32 = 0.97;

#[derive(Debug, Default)]
pub struct FinancialExtractor;

impl FinancialExtractor {
    pub fn new() -> Self {
        Self
    }
}

/// The IBAN pattern is greedy and may run past the true account number into
/// a following digit group. Given the match and the country's expected
/// length, return the byte offset just after the last IBAN character.
fn clip_to_expected(text: &str, start: usize, end: usize, expected: usize) -> usize {
    let mut seen = 0;
    for (offset, c) in text[start..end].char_indices() {
        if !c.is_whitespace() {
            seen += 1;
            if seen == expected {
                return start + offset + c.len_utf8();
            }
        }
    }
    end
}

fn card_brand(digits: &str) -> &'static str {
    match digits.chars().next() {
        Some('3') => "amex",
        Some('4') => "visa",
        Some('5') => "mastercard",
        Some('6') => "discover",
        _ => "card",
    }
}

impl Extractor for FinancialExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Financial
    }

    fn extract(&self, text: &str) -> Result<Vec<Candidate>, ExtractionError> {
        let mut candidates = Vec::new();

        for m in IBAN_RE.find_iter(text) {
            let country = &m.as_str()[..2];
            let Some(expected) = validators::iban_expected_len(country) else {
                continue;
            };
            let end = clip_to_expected(text, m.start(), m.end(), expected);
            if !has_clean_boundaries(text, m.start(), end) {
                continue;
            }
            let span_text = &text[m.start()..end];
            if !validators::iban_mod97(span_text) {
                continue;
            }
            if let Some(c) = Candidate::new(
                text,
                PiiType::Iban,
                m.start(),
                end,
                IBAN_CONFIDENCE,
                ExtractorKind::Financial,
            ) {
                candidates.push(c.with_meta("country", country));
            }
        }

        for m in CARD_RE.find_iter(text) {
            if !has_clean_boundaries(text, m.start(), m.end()) {
                continue;
            }
            if !validators::luhn(m.as_str()) {
                continue;
            }
            let digits: String = m.as_str().chars().filter(|c| c.is_ascii_digit()).collect();
            if let Some(c) = Candidate::new(
                text,
                PiiType::CreditCard,
                m.start(),
                m.end(),
                CARD_CONFIDENCE,
                ExtractorKind::Financial,
            ) {
                candidates.push(c.with_meta("number_type", card_brand(&digits)));
            }
        }

        Ok(candidates)
    }
}
