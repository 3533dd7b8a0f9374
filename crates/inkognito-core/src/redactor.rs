//! Builds the anonymized rendering from a resolved detection set.

use crate::types::Detection;
use std::borrow::Cow;

/// Substitute each detection span with its token in a single left-to-right
/// pass, copying every non-PII byte verbatim.
///
/// Requires `detections` sorted ascending by start and pairwise
/// non-overlapping, which is exactly what the resolver emits. Returns a
/// borrowed string when there is nothing to redact.
pub fn redact<'a>(text: &'a str, detections: &[Detection]) -> Cow<'a, str> {
    if detections.is_empty() {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for detection in detections {
        debug_assert!(detection.start >= last, "detections must be sorted and disjoint");
        out.push_str(&text[last..detection.start]);
        out.push_str(&detection.token);
        last = detection.end;
    }
    out.push_str(&text[last..]);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Candidate, ExtractorKind, PiiType};

    fn detection(input: &str, pii_type: PiiType, start: usize, end: usize) -> Detection {
        let c = Candidate::new(input, pii_type, start, end, 0.9, ExtractorKind::Pattern)
            .expect("valid test span");
        Detection::from_candidate(&c, crate::token::token_for(pii_type, &c.text))
    }

    #[test]
    fn test_zero_copy_when_nothing_detected() {
        let text = "Nur harmloser Text.";
        let result = redact(text, &[]);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, text);
    }

    #[test]
    fn test_non_pii_bytes_preserved_exactly() {
        let text = "Meine IBAN ist DE89370400440532013000, danke!";
        let d = detection(text, PiiType::Iban, 15, 37);
        let redacted = redact(text, &[d.clone()]);
        assert!(redacted.starts_with("Meine IBAN ist [PII:FINANCIAL:IBAN_ID_"));
        assert!(redacted.ends_with(", danke!"));
        assert!(!redacted.contains("DE89370400440532013000"));
        // Reconstruction: the segments around the span are byte-identical
        let prefix = &text[..15];
        let suffix = &text[37..];
        assert_eq!(&redacted[..15], prefix);
        assert_eq!(&redacted[redacted.len() - suffix.len()..], suffix);
    }

    #[test]
    fn test_multiple_spans_left_to_right() {
        let text = "A max@example.de B 0401234567 C";
        let email = detection(text, PiiType::Email, 2, 16);
        let phone = detection(text, PiiType::Phone, 19, 29);
        let redacted = redact(text, &[email, phone]);
        assert!(redacted.starts_with("A [PII:EMAIL_ID_"));
        assert!(redacted.contains("] B [PII:PHONE_ID_"));
        assert!(redacted.ends_with("] C"));
    }

    #[test]
    fn test_adjacent_spans() {
        let text = "xxyy";
        let a = detection(text, PiiType::Person, 0, 2);
        let b = detection(text, PiiType::Person, 2, 4);
        let redacted = redact(text, &[a, b]);
        assert!(!redacted.contains("xx"));
        assert!(!redacted.contains("yy"));
    }

    #[test]
    fn test_span_at_string_end() {
        let text = "IBAN: DE89370400440532013000";
        let d = detection(text, PiiType::Iban, 6, text.len());
        let redacted = redact(text, &[d]);
        assert!(redacted.starts_with("IBAN: [PII:"));
        assert!(redacted.ends_with("]"));
    }
}
