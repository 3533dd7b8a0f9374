use thiserror::Error;

/// Client-facing pipeline errors.
///
/// Display strings never contain input text or detected values; a string
/// that fails mid-extraction degrades to fewer detections instead of
/// surfacing here (see `ExtractionError`).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The batch contained no input strings at all.
    #[error("input batch is empty")]
    EmptyInput,

    /// The entity-recognition provider could not be initialized. Raised by
    /// pipeline construction only; runtime recognizer failures are handled
    /// per string.
    #[error("entity recognition provider unavailable: {0}")]
    ProviderUnavailable(String),
}

/// A single extractor failed on one input string.
///
/// Recoverable by design: the orchestrator logs it, treats the source's
/// candidates as empty and keeps the batch alive.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("recognizer call failed: {0}")]
    Recognizer(#[from] RecognizerError),

    #[error("{0}")]
    Other(String),
}

/// Failure reported by an external entity-recognition provider.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct RecognizerError(pub String);
