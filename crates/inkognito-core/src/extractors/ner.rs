//! Adapter over the external entity-recognition provider.
//!
//! The provider is a black box returning (span, label, score) triples in
//! its own vocabulary. This adapter maps labels onto the internal taxonomy,
//! drops location labels (standalone city mentions must survive redaction;
//! addresses are owned by the rule-based extractor), applies the configured
//! blocklist and confidence floor, and forwards the provider's own score as
//! the candidate confidence.

use super::Extractor;
use crate::config::PipelineConfig;
use crate::error::ExtractionError;
use crate::provider::EntityRecognizer;
use crate::types::{Candidate, ExtractorKind, PiiType};
use std::sync::Arc;

pub struct NerExtractor {
    config: Arc<PipelineConfig>,
    recognizer: Arc<dyn EntityRecognizer>,
}

impl NerExtractor {
    pub fn new(config: Arc<PipelineConfig>, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self { config, recognizer }
    }
}

/// Provider label → taxonomy. Unknown labels and all location labels map
/// to nothing.
fn map_label(label: &str) -> Option<PiiType> {
    match label {
        "PER" | "PERSON" => Some(PiiType::Person),
        "MED_COND" | "CONDITION" => Some(PiiType::MedicalCondition),
        "MED_DRUG" | "MEDICATION" => Some(PiiType::MedicalMedication),
        "MED_PROC" | "PROCEDURE" => Some(PiiType::MedicalProcedure),
        _ => None,
    }
}

impl Extractor for NerExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Ner
    }

    fn extract(&self, text: &str) -> Result<Vec<Candidate>, ExtractionError> {
        let entities = self.recognizer.recognize(text)?;

        let mut candidates = Vec::new();
        for entity in entities {
            let Some(pii_type) = map_label(&entity.label) else {
                continue;
            };
            if entity.score < self.config.ner_confidence_floor() {
                continue;
            }
            let Some(candidate) = Candidate::new(
                text,
                pii_type,
                entity.start,
                entity.end,
                entity.score,
                ExtractorKind::Ner,
            ) else {
                // Provider returned an unusable span; skip it rather than
                // poison the whole string.
                continue;
            };
            if self.config.is_ner_blocked(&candidate.text) {
                continue;
            }
            candidates.push(candidate.with_meta("provider_label", entity.label.as_str()));
        }

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecognizerError;
    use crate::provider::RecognizedEntity;

    struct StubRecognizer(Vec<RecognizedEntity>);

    impl EntityRecognizer for StubRecognizer {
        fn recognize(&self, _text: &str) -> Result<Vec<RecognizedEntity>, RecognizerError> {
            Ok(self.0.clone())
        }
    }

    fn entity(start: usize, end: usize, label: &str, score: f32) -> RecognizedEntity {
        RecognizedEntity {
            start,
            end,
            label: label.to_string(),
            score,
        }
    }

    fn extract(text: &str, entities: Vec<RecognizedEntity>) -> Vec<Candidate> {
        NerExtractor::new(
            Arc::new(PipelineConfig::default()),
            Arc::new(StubRecognizer(entities)),
        )
        .extract(text)
        .unwrap()
    }

    #[test]
    fn test_person_label_mapped_with_provider_score() {
        let text = "Max Mustermann war hier.";
        let candidates = extract(text, vec![entity(0, 14, "PER", 0.92)]);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].pii_type, PiiType::Person);
        assert_eq!(candidates[0].confidence, 0.92);
        assert_eq!(candidates[0].metadata["provider_label"], "PER");
    }

    #[test]
    fn test_location_labels_dropped() {
        let text = "Olaf war in Berlin.";
        let candidates = extract(text, vec![entity(12, 18, "LOC", 0.99)]);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_confidence_floor() {
        let text = "Max Mustermann war hier.";
        let candidates = extract(text, vec![entity(0, 14, "PER", 0.45)]);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_blocklist_filters_candidate() {
        let text = "Frau kommt morgen.";
        // Recognizer mistakes the bare honorific for a name
        let candidates = extract(text, vec![entity(0, 4, "PER", 0.9)]);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_unusable_span_skipped_not_fatal() {
        let text = "kurz";
        let candidates = extract(
            text,
            vec![entity(2, 99, "PER", 0.9), entity(0, 4, "PER", 0.9)],
        );
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "kurz");
    }

    #[test]
    fn test_recognizer_error_propagates_as_extraction_error() {
        struct Failing;
        impl EntityRecognizer for Failing {
            fn recognize(&self, _: &str) -> Result<Vec<RecognizedEntity>, RecognizerError> {
                Err(RecognizerError("model crashed".into()))
            }
        }
        let extractor = NerExtractor::new(
            Arc::new(PipelineConfig::default()),
            Arc::new(Failing),
        );
        let err = extractor.extract("text").unwrap_err();
        assert!(matches!(err, ExtractionError::Recognizer(_)));
    }
}
