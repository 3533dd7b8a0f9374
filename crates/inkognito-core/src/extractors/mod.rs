//! Independent candidate producers.
//!
//! Each extractor scans one input string and proposes spans; nothing here
//! resolves overlaps or assigns tokens. Pattern-backed extractors pair a
//! strict matcher with the corresponding validator and discard non-passing
//! matches outright instead of downgrading them.

mod address;
mod age;
mod contact;
mod financial;
mod gov_id;
mod ner;

pub use address::AddressExtractor;
pub use age::AgeExtractor;
pub use contact::ContactExtractor;
pub use financial::FinancialExtractor;
pub use gov_id::GovIdExtractor;
pub use ner::NerExtractor;

use crate::error::ExtractionError;
use crate::types::{Candidate, ExtractorKind};

/// A single candidate source over one input string.
///
/// Implementations hold no per-call mutable state; `extract` may be called
/// concurrently for distinct strings.
pub trait Extractor: Send + Sync {
    fn kind(&self) -> ExtractorKind;

    /// Propose candidate spans for `text`. A failure here is per-string and
    /// recoverable: the orchestrator treats the source as empty for this
    /// string and keeps going.
    fn extract(&self, text: &str) -> Result<Vec<Candidate>, ExtractionError>;
}

/// True iff the bytes adjacent to `[start, end)` are not alphanumeric,
/// i.e. the match is not a fragment of a longer token. The regex crate has
/// no lookaround, so extractors post-check their boundaries with this.
pub(crate) fn has_clean_boundaries(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric());
    before_ok && after_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_check() {
        let text = "ab 1234 cd";
        assert!(has_clean_boundaries(text, 3, 7));
        assert!(!has_clean_boundaries(text, 4, 7)); // preceded by digit
        assert!(!has_clean_boundaries(text, 3, 6)); // followed by digit
        assert!(has_clean_boundaries(text, 0, 2));
        assert!(has_clean_boundaries(text, 8, 10));
    }
}
