//! Pipeline orchestration: extract → resolve → tokenize → redact.
//!
//! The orchestrator is the only component aware of batching. Strings are
//! processed independently; the sole shared pieces are the pure tokenizer
//! function and the read-only provider handles, so distinct strings can be
//! processed from distinct threads without coordination.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::extractors::{
    AddressExtractor, AgeExtractor, ContactExtractor, Extractor, FinancialExtractor,
    GovIdExtractor, NerExtractor,
};
use crate::provider::{CosineScorer, EntityRecognizer, LexiconRecognizer, SimilarityScorer};
use crate::types::{AnonymizationResult, Detection, ExtractorKind};
use crate::{redactor, resolver, token};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

pub struct Pipeline {
    config: Arc<PipelineConfig>,
    extractors: Vec<Box<dyn Extractor>>,
}

impl Pipeline {
    /// Build a pipeline over the given providers.
    ///
    /// Probes the recognizer once so a provider that cannot initialize
    /// fails construction instead of degrading every string at runtime.
    pub fn new(
        config: PipelineConfig,
        recognizer: Arc<dyn EntityRecognizer>,
        scorer: Arc<dyn SimilarityScorer>,
    ) -> Result<Self, PipelineError> {
        recognizer
            .recognize("")
            .map_err(|e| PipelineError::ProviderUnavailable(e.to_string()))?;

        let config = Arc::new(config);
        let mut extractors: Vec<Box<dyn Extractor>> = Vec::new();
        if config.is_enabled(ExtractorKind::Pattern) {
            extractors.push(Box::new(ContactExtractor::new()));
        }
        if config.is_enabled(ExtractorKind::Financial) {
            extractors.push(Box::new(FinancialExtractor::new()));
        }
        if config.is_enabled(ExtractorKind::GovId) {
            extractors.push(Box::new(GovIdExtractor::new()));
        }
        if config.is_enabled(ExtractorKind::Address) {
            extractors.push(Box::new(AddressExtractor::new()));
        }
        if config.is_enabled(ExtractorKind::Age) {
            extractors.push(Box::new(AgeExtractor::new(config.clone(), scorer)));
        }
        if config.is_enabled(ExtractorKind::Ner) {
            extractors.push(Box::new(NerExtractor::new(config.clone(), recognizer)));
        }

        Ok(Self { config, extractors })
    }

    /// Pipeline with the built-in gazetteer recognizer and cosine scorer.
    pub fn with_defaults() -> Result<Self, PipelineError> {
        Self::new(
            PipelineConfig::default(),
            Arc::new(LexiconRecognizer::new()),
            Arc::new(CosineScorer),
        )
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process a batch of input strings, one result per input, input order
    /// preserved. An empty batch is a client error; a failing extractor on
    /// one string degrades that string's result instead of aborting the
    /// batch.
    pub fn process_batch<S: AsRef<str>>(
        &self,
        inputs: &[S],
    ) -> Result<Vec<AnonymizationResult>, PipelineError> {
        if inputs.is_empty() {
            return Err(PipelineError::EmptyInput);
        }
        Ok(inputs.iter().map(|s| self.process(s.as_ref())).collect())
    }

    /// Process one string: every enabled extractor contributes candidates,
    /// the resolver reduces them, each survivor gets its token, and the
    /// redactor renders the anonymized text.
    pub fn process(&self, text: &str) -> AnonymizationResult {
        let started = Instant::now();

        let mut candidates = Vec::new();
        for extractor in &self.extractors {
            match extractor.extract(text) {
                Ok(mut found) => candidates.append(&mut found),
                Err(error) => {
                    warn!(
                        source = extractor.kind().as_str(),
                        %error,
                        "extractor failed for this string, continuing without its candidates"
                    );
                }
            }
        }

        let proposed = candidates.len();
        let accepted = resolver::resolve(candidates);
        debug!(proposed, accepted = accepted.len(), "resolved candidate set");

        let detections: Vec<Detection> = accepted
            .iter()
            .map(|c| Detection::from_candidate(c, token::token_for(c.pii_type, &c.text)))
            .collect();
        let anonymized_text = redactor::redact(text, &detections).into_owned();

        AnonymizationResult {
            has_pii: !detections.is_empty(),
            anonymized_text,
            detections,
            processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecognizerError;
    use crate::provider::RecognizedEntity;

    struct NeverReady;

    impl EntityRecognizer for NeverReady {
        fn recognize(&self, _: &str) -> Result<Vec<RecognizedEntity>, RecognizerError> {
            Err(RecognizerError("weights missing".into()))
        }
    }

    #[test]
    fn test_construction_fails_fast_without_provider() {
        let result = Pipeline::new(
            PipelineConfig::default(),
            Arc::new(NeverReady),
            Arc::new(CosineScorer),
        );
        assert!(matches!(
            result,
            Err(PipelineError::ProviderUnavailable(_))
        ));
    }

    #[test]
    fn test_empty_batch_rejected() {
        let pipeline = Pipeline::with_defaults().unwrap();
        let inputs: Vec<&str> = Vec::new();
        assert!(matches!(
            pipeline.process_batch(&inputs),
            Err(PipelineError::EmptyInput)
        ));
    }

    #[test]
    fn test_clean_string_has_no_pii() {
        let pipeline = Pipeline::with_defaults().unwrap();
        let result = pipeline.process("Morgen scheint die Sonne.");
        assert!(!result.has_pii);
        assert!(result.detections.is_empty());
        assert_eq!(result.anonymized_text, "Morgen scheint die Sonne.");
        assert!(result.processing_time_ms >= 0.0);
    }

    #[test]
    fn test_disabled_source_contributes_nothing() {
        let config = PipelineConfig::builder()
            .disable(ExtractorKind::Financial)
            .build();
        let pipeline = Pipeline::new(
            config,
            Arc::new(LexiconRecognizer::new()),
            Arc::new(CosineScorer),
        )
        .unwrap();
        let result = pipeline.process("Meine IBAN ist DE89370400440532013000");
        assert!(!result.has_pii);
    }
}
