//! Conflict resolution: reduces the overlapping multi-source candidate set
//! to one non-overlapping, deterministically ordered detection set.

use crate::types::Candidate;
use std::cmp::Ordering;

/// Tracks which byte ranges of one input string are already claimed.
///
/// A sorted list of disjoint intervals is enough at sentence scale; the
/// `is_free`/`claim` surface keeps the structure swappable for very long
/// documents. One instance lives for exactly one resolution pass.
#[derive(Debug, Default)]
pub struct OccupationMap {
    /// Sorted by start, pairwise disjoint.
    intervals: Vec<(usize, usize)>,
}

impl OccupationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff no claimed interval intersects `[start, end)`.
    pub fn is_free(&self, start: usize, end: usize) -> bool {
        let idx = self.intervals.partition_point(|&(_, e)| e <= start);
        match self.intervals.get(idx) {
            Some(&(s, _)) => s >= end,
            None => true,
        }
    }

    /// Claim `[start, end)`. Caller must have checked `is_free`; claims are
    /// whole-range or nothing, there is no partial acceptance.
    pub fn claim(&mut self, start: usize, end: usize) {
        debug_assert!(self.is_free(start, end));
        let idx = self.intervals.partition_point(|&(s, _)| s < start);
        self.intervals.insert(idx, (start, end));
    }
}

/// Composite sort key: type priority, confidence, span length, position.
///
/// Longer spans rank before shorter ones at equal priority and confidence
/// so that a full address is not starved by a short match inside it; start
/// position is last and only makes the order total.
fn rank(a: &Candidate, b: &Candidate) -> Ordering {
    b.pii_type
        .priority()
        .cmp(&a.pii_type.priority())
        .then_with(|| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| b.span_len().cmp(&a.span_len()))
        .then_with(|| a.start.cmp(&b.start))
}

/// Accept the maximal candidate subset satisfying the non-overlap
/// invariant.
///
/// Candidates are walked in composite-key order with first-fit claiming:
/// a candidate whose whole range is free is accepted, anything touching a
/// claimed offset is dropped (never trimmed). Byte-identical duplicates
/// collapse to one accepted detection. The output is independent of input
/// order and sorted ascending by start.
pub fn resolve(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(rank);

    let mut occupied = OccupationMap::new();
    let mut accepted: Vec<Candidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if occupied.is_free(candidate.start, candidate.end) {
            occupied.claim(candidate.start, candidate.end);
            accepted.push(candidate);
        }
    }

    accepted.sort_by_key(|c| c.start);
    accepted
}
