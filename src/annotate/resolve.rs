//! Span resolution — one conflict-free, position-sorted sequence
//!
//! Resolution is by construction, not by a general interval merge: each
//! pattern pass already avoids internal overlap (scanners advance past
//! their own matches; the year cascade shadow-filters by priority), and
//! `detect` drops place candidates that overlap a year span, so era
//! markers that shape like capitalized words are claimed only once.
//! What remains is a stable sort by start offset. A new pattern kind
//! added to the cascade must uphold the same "no internal overlap"
//! contract.

use serde::{Deserialize, Serialize};

use super::span::Span;

/// An ordered sequence of non-overlapping spans sorted by start offset.
///
/// Invariant: for all adjacent spans `i`, `i + 1`:
/// `spans[i].end <= spans[i + 1].start`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSpans(Vec<Span>);

impl ResolvedSpans {
    pub fn iter(&self) -> impl Iterator<Item = &Span> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<Span> {
        self.0
    }
}

/// Merge candidate spans from the pattern passes into a resolved sequence.
///
/// Empty input yields an empty sequence, which downstream consumers read
/// as "no annotation needed".
pub fn resolve(mut candidates: Vec<Span>) -> ResolvedSpans {
    candidates.sort_by_key(|span| span.start);
    debug_assert!(
        candidates
            .windows(2)
            .all(|pair| pair[0].end <= pair[1].start),
        "pattern passes produced overlapping candidates"
    );
    ResolvedSpans(candidates)
}
