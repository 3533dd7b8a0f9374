//! # inkognito-core
//!
//! PII detection and redaction for German free text. A batch of raw
//! strings goes in; structured detections plus a deterministic anonymized
//! rendering come out.
//!
//! The heart of the crate is the detection-merging engine: independent
//! candidate sources (strict regex patterns, checksum validators, an
//! injected entity-recognition provider, a context-gated age heuristic)
//! propose overlapping spans, and the resolver reduces them to one
//! non-overlapping, confidence-ranked, deterministically tokenized set.
//!
//! ## Modules
//!
//! * `types`: taxonomy, candidates, detections and the result object.
//! * `validators`: pure checksum/format rules (Luhn, IBAN Mod-97, German
//!   ID subtypes).
//! * `extractors`: the candidate sources.
//! * `provider`: external recognizer/scorer contracts plus built-ins.
//! * `resolver`: conflict resolution over an occupation map.
//! * `token`: deterministic `[PII:{TYPE}_ID_{digest8}]` placeholders.
//! * `redactor`: anonymized rendering.
//! * `pipeline`: the batch orchestrator.
//!
//! ## Usage
//!
//! ```rust
//! use inkognito_core::Pipeline;
//!
//! let pipeline = Pipeline::with_defaults().expect("provider available");
//! let results = pipeline
//!     .process_batch(&["Meine IBAN ist DE89370400440532013000"])
//!     .expect("non-empty batch");
//! assert!(results[0].has_pii);
//! assert!(results[0].anonymized_text.starts_with("Meine IBAN ist [PII:FINANCIAL:IBAN_ID_"));
//! ```

pub mod config;
pub mod error;
pub mod extractors;
pub mod pipeline;
pub mod provider;
pub mod redactor;
pub mod resolver;
pub mod token;
pub mod types;
pub mod validators;

pub use config::{ConfigBuilder, PipelineConfig};
pub use error::{ExtractionError, PipelineError, RecognizerError};
pub use pipeline::Pipeline;
pub use provider::{
    CosineScorer, EntityRecognizer, LexiconRecognizer, RecognizedEntity, SimilarityScorer,
};
pub use token::token_for;
pub use types::{
    AgeBucket, AnonymizationResult, Candidate, Detection, ExtractorKind, PiiType,
};
