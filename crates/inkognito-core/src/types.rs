use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use zeroize::Zeroize;

/// Age ranges used instead of the literal age value.
///
/// The redacted output never carries the exact number, only the bucket;
/// the numeric value survives in `metadata.calculated_age` of the detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBucket {
    Child,
    Teen,
    Adult,
    Senior,
}

impl AgeBucket {
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=12 => Self::Child,
            13..=17 => Self::Teen,
            18..=64 => Self::Adult,
            _ => Self::Senior,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Child => "CHILD",
            Self::Teen => "TEEN",
            Self::Adult => "ADULT",
            Self::Senior => "SENIOR",
        }
    }
}

/// Closed PII taxonomy, hierarchical on the wire (`category:subtype`).
///
/// Design principles:
/// - Checksum-validated types carry near-certain precision, heuristic types
///   carry the lowest priority (see `priority`)
/// - No heap allocations in the enum (all variants are `Copy`)
/// - `as_str()` output is a durable wire contract: downstream consumers
///   parse both the detection `type` field and the redaction token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PiiType {
    Person,
    Address,
    Email,
    Phone,
    Url,
    Iban,
    CreditCard,
    TaxId,
    Passport,
    DriverLicense,
    MedicalCondition,
    MedicalMedication,
    MedicalProcedure,
    Age(AgeBucket),
}

impl PiiType {
    /// Wire representation, also embedded in redaction tokens.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Address => "LOCATION:ADDRESS",
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Url => "URL",
            Self::Iban => "FINANCIAL:IBAN",
            Self::CreditCard => "FINANCIAL:CREDIT_CARD",
            Self::TaxId => "GOV_ID:TAX_ID",
            Self::Passport => "GOV_ID:PASSPORT",
            Self::DriverLicense => "GOV_ID:DRIVER_LICENSE",
            Self::MedicalCondition => "MEDICAL:CONDITION",
            Self::MedicalMedication => "MEDICAL:MEDICATION",
            Self::MedicalProcedure => "MEDICAL:PROCEDURE",
            Self::Age(AgeBucket::Child) => "AGE:CHILD",
            Self::Age(AgeBucket::Teen) => "AGE:TEEN",
            Self::Age(AgeBucket::Adult) => "AGE:ADULT",
            Self::Age(AgeBucket::Senior) => "AGE:SENIOR",
        }
    }

    /// Total conflict-resolution order across the taxonomy. Higher wins.
    ///
    /// The order encodes false-positive risk: checksum-validated financial
    /// and government identifiers outrank strict patterns, which outrank
    /// model-derived entities, which outrank the heuristic age gate. All age
    /// buckets share one rank; two age candidates never produce the same
    /// span with different buckets.
    pub fn priority(&self) -> u8 {
        match self {
            Self::Iban => 100,
            Self::CreditCard => 95,
            Self::TaxId => 90,
            Self::Passport => 85,
            Self::DriverLicense => 80,
            Self::Email => 75,
            Self::Phone => 70,
            Self::Url => 65,
            Self::Address => 60,
            Self::Person => 50,
            Self::MedicalMedication => 45,
            Self::MedicalCondition => 44,
            Self::MedicalProcedure => 43,
            Self::Age(_) => 20,
        }
    }
}

impl std::fmt::Display for PiiType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PiiType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Which candidate source produced a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorKind {
    Pattern,
    Financial,
    GovId,
    Address,
    Age,
    Ner,
}

impl ExtractorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Financial => "financial",
            Self::GovId => "gov_id",
            Self::Address => "address",
            Self::Age => "age",
            Self::Ner => "ner",
        }
    }
}

/// An unresolved, possibly-overlapping proposed detection span.
///
/// Offsets are UTF-8 byte offsets into the original string (NOT char
/// indices), half-open `[start, end)`. Construction enforces the span
/// invariants; a `Candidate` that exists is always addressable in the
/// string it was built from.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub pii_type: PiiType,
    pub start: usize,
    pub end: usize,
    /// Matched text - zeroized on drop.
    pub text: String,
    pub confidence: f32,
    pub source: ExtractorKind,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Candidate {
    /// Build a candidate over `input[start..end]`.
    ///
    /// Returns `None` for empty or inverted spans, out-of-bounds offsets,
    /// or offsets that do not fall on UTF-8 character boundaries. Rejecting
    /// zero-length spans here keeps the resolver free of that case.
    pub fn new(
        input: &str,
        pii_type: PiiType,
        start: usize,
        end: usize,
        confidence: f32,
        source: ExtractorKind,
    ) -> Option<Self> {
        if start >= end || end > input.len() {
            return None;
        }
        if !input.is_char_boundary(start) || !input.is_char_boundary(end) {
            return None;
        }
        Some(Self {
            pii_type,
            start,
            end,
            text: input[start..end].to_string(),
            confidence: confidence.clamp(0.0, 1.0),
            source,
            metadata: BTreeMap::new(),
        })
    }

    pub fn with_meta(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Span length in bytes; never zero (`new` rejects empty spans).
    pub fn span_len(&self) -> usize {
        self.end - self.start
    }
}

impl Zeroize for Candidate {
    fn zeroize(&mut self) {
        self.text.zeroize();
    }
}

impl Drop for Candidate {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// A candidate that survived conflict resolution and received its token.
///
/// Serialized field names are the wire contract of the anonymize API
/// (`type`, `token`, `text`, `start`, `end`, `confidence`, `metadata`).
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    #[serde(rename = "type")]
    pub pii_type: PiiType,
    pub token: String,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub confidence: f32,
    pub source: ExtractorKind,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Detection {
    pub fn from_candidate(candidate: &Candidate, token: String) -> Self {
        Self {
            pii_type: candidate.pii_type,
            token,
            text: candidate.text.clone(),
            start: candidate.start,
            end: candidate.end,
            confidence: candidate.confidence,
            source: candidate.source,
            metadata: candidate.metadata.clone(),
        }
    }
}

impl Zeroize for Detection {
    fn zeroize(&mut self) {
        self.text.zeroize();
    }
}

impl Drop for Detection {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Per-input-string outcome of the pipeline, immutable once returned.
#[derive(Debug, Clone, Serialize)]
pub struct AnonymizationResult {
    pub has_pii: bool,
    pub anonymized_text: String,
    /// Non-overlapping, sorted ascending by `start`.
    pub detections: Vec<Detection>,
    pub processing_time_ms: f64,
}
