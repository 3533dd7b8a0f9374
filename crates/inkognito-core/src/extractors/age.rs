//! Age extraction with a contextual similarity gate.
//!
//! A bare number is only an age if its surroundings say so. Each numeric
//! token in the plausible range is scored by comparing its context window
//! against a reference corpus of German age phrases; the candidate is kept
//! only when the similarity clears the configured threshold. The span
//! covers the number itself, bucketed into a coarse range type.

use super::{has_clean_boundaries, Extractor};
use crate::config::PipelineConfig;
use crate::error::ExtractionError;
use crate::provider::SimilarityScorer;
use crate::types::{AgeBucket, Candidate, ExtractorKind, PiiType};
use regex::Regex;
use std::sync::{Arc, LazyLock};

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]{1,3}\b").expect("number pattern"));

const MAX_PLAUSIBLE_AGE: u32 = 120;

pub struct AgeExtractor {
    config: Arc<PipelineConfig>,
    scorer: Arc<dyn SimilarityScorer>,
}

impl AgeExtractor {
    pub fn new(config: Arc<PipelineConfig>, scorer: Arc<dyn SimilarityScorer>) -> Self {
        Self { config, scorer }
    }

    /// Context window around `[start, end)`, clamped to char boundaries.
    fn window<'a>(&self, text: &'a str, start: usize, end: usize) -> &'a str {
        let mut from = start.saturating_sub(self.config.age_context_window());
        while !text.is_char_boundary(from) {
            from -= 1;
        }
        let mut to = (end + self.config.age_context_window()).min(text.len());
        while !text.is_char_boundary(to) {
            to += 1;
        }
        &text[from..to]
    }

    /// Acceptance is inclusive: a score of exactly the threshold passes.
    fn accepts(&self, score: f32) -> bool {
        score >= self.config.age_similarity_threshold()
    }
}

impl Extractor for AgeExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Age
    }

    fn extract(&self, text: &str) -> Result<Vec<Candidate>, ExtractionError> {
        let mut candidates = Vec::new();

        for m in NUMBER_RE.find_iter(text) {
            if !has_clean_boundaries(text, m.start(), m.end()) {
                continue;
            }
            let Ok(value) = m.as_str().parse::<u32>() else {
                continue;
            };
            if value > MAX_PLAUSIBLE_AGE {
                continue;
            }
            let window = self.window(text, m.start(), m.end());
            let score = self
                .scorer
                .similarity(window, self.config.age_reference_phrases());
            if !self.accepts(score) {
                continue;
            }
            let bucket = AgeBucket::from_age(value);
            if let Some(c) = Candidate::new(
                text,
                PiiType::Age(bucket),
                m.start(),
                m.end(),
                score,
                ExtractorKind::Age,
            ) {
                candidates.push(c.with_meta("calculated_age", value));
            }
        }

        Ok(candidates)
    }
}
