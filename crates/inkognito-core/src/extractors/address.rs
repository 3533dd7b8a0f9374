//! Rule-based street address extraction.
//!
//! Matches street name + house number, optionally extending over a directly
//! adjacent postal code + city. Standalone city names are intentionally
//! never matched: for locations the pipeline trades recall for precision,
//! and bare city mentions stay readable in the output.

use super::Extractor;
use crate::error::ExtractionError;
use crate::types::{Candidate, ExtractorKind, PiiType};
use regex::Regex;
use std::sync::LazyLock;

// Two shapes: fused compounds ("Hauptstraße 15", "Lindenweg 3a") and
// separated or hyphenated compounds ("Berliner Straße 12",
// "Willy-Brandt-Platz 1").
static STREET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:[A-ZÄÖÜ][a-zäöüß]+(?:straße|strasse|str\.|weg|allee|platz|gasse|ring|damm|ufer)|[A-ZÄÖÜ][a-zäöüß]+(?:-[A-ZÄÖÜ][a-zäöüß]+)*[ \-](?:Straße|Strasse|Str\.|Weg|Allee|Platz|Gasse|Ring|Damm|Ufer)) [0-9]{1,4}[a-z]?\b",
    )
    .expect("street pattern")
});

// Postal code + city immediately after the house number, e.g.
// ", 20095 Hamburg".
static PLZ_CITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^,? [0-9]{5} [A-ZÄÖÜ][A-Za-zäöüß-]+").expect("postal pattern")
});

const ADDRESS_CONFIDENCE: f32 = 0.85;

#[derive(Debug, Default)]
pub struct AddressExtractor;

impl AddressExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for AddressExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Address
    }

    fn extract(&self, text: &str) -> Result<Vec<Candidate>, ExtractionError> {
        let mut candidates = Vec::new();

        for m in STREET_RE.find_iter(text) {
            let mut end = m.end();
            let mut city = None;
            if let Some(ext) = PLZ_CITY_RE.find(&text[end..]) {
                end += ext.end();
                city = text[m.end()..end].split_whitespace().last();
            }
            if let Some(c) = Candidate::new(
                text,
                PiiType::Address,
                m.start(),
                end,
                ADDRESS_CONFIDENCE,
                ExtractorKind::Address,
            ) {
                let c = match city {
                    Some(city) => c.with_meta("region", city),
                    None => c,
                };
                candidates.push(c);
            }
        }

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<Candidate> {
        AddressExtractor::new().extract(text).unwrap()
    }

    #[test]
    fn test_fused_compound_street() {
        let candidates = extract("Ich wohne aus Musterstraße 12.");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].pii_type, PiiType::Address);
        assert_eq!(candidates[0].text, "Musterstraße 12");
    }

    #[test]
    fn test_street_with_postal_and_city_extension() {
        let candidates = extract("Mein Büro in der Hauptstraße 15, 20095 Hamburg ist offen.");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "Hauptstraße 15, 20095 Hamburg");
        assert_eq!(candidates[0].metadata["region"], "Hamburg");
    }

    #[test]
    fn test_separated_street_word() {
        let candidates = extract("Treffen in der Berliner Straße 12 heute.");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "Berliner Straße 12");
    }

    #[test]
    fn test_hyphenated_street() {
        let candidates = extract("Willy-Brandt-Straße 1 bitte.");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "Willy-Brandt-Straße 1");
    }

    #[test]
    fn test_house_number_letter_suffix() {
        let candidates = extract("Lindenweg 3a ist nebenan.");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "Lindenweg 3a");
    }

    #[test]
    fn test_standalone_city_never_matches() {
        assert!(extract("Olaf war heute in Berlin und Hamburg.").is_empty());
    }

    #[test]
    fn test_street_without_number_not_matched() {
        assert!(extract("Die Hauptstraße ist gesperrt.").is_empty());
    }
}
