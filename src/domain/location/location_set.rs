// SPDX-License-Identifier: MPL-2.0
//! The set of locations known for one processed image.

use super::{CandidateLocation, CandidateRef, Coordinate};

/// Exact fix plus ranked candidates for a single image.
///
/// A set is never edited in place. When a new image is processed (or the
/// current one is removed) the owning session replaces it wholesale.
/// Candidate order is the producer's rank order and is kept verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationSet {
    exact: Option<Coordinate>,
    candidates: Vec<CandidateLocation>,
}

impl LocationSet {
    /// Creates a set from already validated parts.
    #[must_use]
    pub fn new(exact: Option<Coordinate>, candidates: Vec<CandidateLocation>) -> Self {
        Self { exact, candidates }
    }

    /// The displayable "nothing known" set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn exact(&self) -> Option<Coordinate> {
        self.exact
    }

    #[must_use]
    pub fn candidates(&self) -> &[CandidateLocation] {
        &self.candidates
    }

    /// The first-ranked candidate, if any.
    #[must_use]
    pub fn top_candidate(&self) -> Option<&CandidateLocation> {
        self.candidates.first()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exact.is_none() && self.candidates.is_empty()
    }

    /// Returns whether a candidate equal to `candidate` is in the set.
    #[must_use]
    pub fn contains(&self, candidate: &CandidateLocation) -> bool {
        self.candidates.iter().any(|c| c == candidate)
    }

    /// Looks up the first candidate matching a view-reported identity.
    #[must_use]
    pub fn find(&self, target: &CandidateRef) -> Option<&CandidateLocation> {
        self.candidates.iter().find(|c| c.matches(target))
    }

    /// Index of the first candidate equal to `candidate`.
    #[must_use]
    pub fn position(&self, candidate: &CandidateLocation) -> Option<usize> {
        self.candidates.iter().position(|c| c == candidate)
    }
}
