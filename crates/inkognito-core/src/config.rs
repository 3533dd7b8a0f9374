use crate::types::ExtractorKind;
use std::collections::HashSet;

/// Immutable pipeline configuration, fixed at construction time.
///
/// Extractors hold this by `Arc` and only ever read it; there is no
/// post-construction mutation path.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Candidate sources that participate in extraction.
    enabled: HashSet<ExtractorKind>,

    /// Inclusive acceptance threshold for the age context gate:
    /// a similarity score of exactly this value accepts.
    age_similarity_threshold: f32,

    /// Bytes of context taken on each side of a numeric token before
    /// scoring it against the age reference corpus.
    age_context_window: usize,

    /// German phrases the age context window is compared against.
    age_reference_phrases: Vec<String>,

    /// Minimum provider confidence for model-derived entities.
    ner_confidence_floor: f32,

    /// Lower-cased terms the recognizer is known to flag spuriously;
    /// matching candidates are dropped before resolution.
    ner_blocklist: HashSet<String>,
}

const DEFAULT_AGE_PHRASES: &[&str] = &[
    "jahre alt",
    "ich bin jahre alt",
    "jahre alt geworden",
    "im alter von jahren",
    "wird jahre alt",
    "jährig",
];

/// Capitalized German nouns and form terms the statistical recognizer
/// tends to misread as names.
const DEFAULT_NER_BLOCKLIST: &[&str] = &[
    "herr", "frau", "patient", "patientin", "termin", "meeting", "vertrag",
    "montag", "dienstag", "mittwoch", "donnerstag", "freitag", "samstag",
    "sonntag", "gmbh",
];

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            enabled: [
                ExtractorKind::Pattern,
                ExtractorKind::Financial,
                ExtractorKind::GovId,
                ExtractorKind::Address,
                ExtractorKind::Age,
                ExtractorKind::Ner,
            ]
            .into_iter()
            .collect(),
            age_similarity_threshold: 0.60,
            age_context_window: 20,
            age_reference_phrases: DEFAULT_AGE_PHRASES.iter().map(|s| s.to_string()).collect(),
            ner_confidence_floor: 0.5,
            ner_blocklist: DEFAULT_NER_BLOCKLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn is_enabled(&self, kind: ExtractorKind) -> bool {
        self.enabled.contains(&kind)
    }

    pub fn age_similarity_threshold(&self) -> f32 {
        self.age_similarity_threshold
    }

    pub fn age_context_window(&self) -> usize {
        self.age_context_window
    }

    pub fn age_reference_phrases(&self) -> &[String] {
        &self.age_reference_phrases
    }

    pub fn ner_confidence_floor(&self) -> f32 {
        self.ner_confidence_floor
    }

    pub fn is_ner_blocked(&self, text: &str) -> bool {
        self.ner_blocklist.contains(&text.trim().to_lowercase())
    }
}

/// Fluent construction for `PipelineConfig`.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: PipelineConfig,
}

impl ConfigBuilder {
    pub fn enable(mut self, kind: ExtractorKind) -> Self {
        self.config.enabled.insert(kind);
        self
    }

    pub fn disable(mut self, kind: ExtractorKind) -> Self {
        self.config.enabled.remove(&kind);
        self
    }

    pub fn age_similarity_threshold(mut self, threshold: f32) -> Self {
        self.config.age_similarity_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn age_context_window(mut self, bytes: usize) -> Self {
        self.config.age_context_window = bytes;
        self
    }

    pub fn ner_confidence_floor(mut self, floor: f32) -> Self {
        self.config.ner_confidence_floor = floor.clamp(0.0, 1.0);
        self
    }

    pub fn block_term(mut self, term: &str) -> Self {
        self.config.ner_blocklist.insert(term.to_lowercase());
        self
    }

    pub fn age_reference_phrase(mut self, phrase: &str) -> Self {
        self.config.age_reference_phrases.push(phrase.to_lowercase());
        self
    }

    pub fn build(self) -> PipelineConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_all_sources() {
        let config = PipelineConfig::default();
        for kind in [
            ExtractorKind::Pattern,
            ExtractorKind::Financial,
            ExtractorKind::GovId,
            ExtractorKind::Address,
            ExtractorKind::Age,
            ExtractorKind::Ner,
        ] {
            assert!(config.is_enabled(kind));
        }
        assert_eq!(config.age_similarity_threshold(), 0.60);
    }

    #[test]
    fn test_builder_disable_source() {
        let config = PipelineConfig::builder()
            .disable(ExtractorKind::Age)
            .build();
        assert!(!config.is_enabled(ExtractorKind::Age));
        assert!(config.is_enabled(ExtractorKind::Financial));
    }

    #[test]
    fn test_blocklist_is_case_insensitive() {
        let config = PipelineConfig::builder().block_term("Lieferando").build();
        assert!(config.is_ner_blocked("LIEFERANDO"));
        assert!(config.is_ner_blocked(" lieferando "));
        assert!(config.is_ner_blocked("Frau")); // default list
        assert!(!config.is_ner_blocked("Müller"));
    }

    #[test]
    fn test_threshold_clamped() {
        let config = PipelineConfig::builder().age_similarity_threshold(1.4).build();
        assert_eq!(config.age_similarity_threshold(), 1.0);
    }
}
