// SPDX-License-Identifier: MPL-2.0
//! Inferred candidate locations and their confidence scores.

use super::Coordinate;
use serde::Serialize;

/// Highest allowed confidence score.
pub const MAX_CONFIDENCE: u8 = 100;

/// Confidence at or above which a candidate is considered a strong match.
pub const HIGH_CONFIDENCE_THRESHOLD: u8 = 80;

/// Confidence at or above which a candidate is considered plausible.
pub const MEDIUM_CONFIDENCE_THRESHOLD: u8 = 60;

/// Coarse bucket of a confidence score, used by list and badge renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// Buckets a confidence percentage.
    #[must_use]
    pub fn from_confidence(confidence: u8) -> Self {
        if confidence >= HIGH_CONFIDENCE_THRESHOLD {
            ConfidenceTier::High
        } else if confidence >= MEDIUM_CONFIDENCE_THRESHOLD {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }
}

/// Identity of a candidate as reported by views: its name and coordinate.
///
/// Map widgets and list rows report clicks with this value, never with a
/// marker index, so a click can be matched against the current set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRef {
    pub name: String,
    pub coordinate: Coordinate,
}

impl CandidateRef {
    #[must_use]
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
        }
    }
}

/// A confidence-scored guess at where a photo was taken.
///
/// Two candidates are the same location when their name and coordinate
/// match; confidence and description do not take part in equality.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateLocation {
    name: String,
    coordinate: Coordinate,
    confidence: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl CandidateLocation {
    /// Creates a candidate.
    ///
    /// Returns `None` when the trimmed name is empty. Confidence is clamped
    /// to 0..=100.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        coordinate: Coordinate,
        confidence: u8,
        description: Option<String>,
    ) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return None;
        }
        Some(Self {
            name,
            coordinate,
            confidence: confidence.min(MAX_CONFIDENCE),
            description: description.filter(|d| !d.trim().is_empty()),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    #[must_use]
    pub fn confidence(&self) -> u8 {
        self.confidence
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_confidence(self.confidence)
    }

    /// Returns the identity used to match clicks against this candidate.
    #[must_use]
    pub fn to_ref(&self) -> CandidateRef {
        CandidateRef::new(self.name.clone(), self.coordinate)
    }

    /// Returns whether `other` names this candidate.
    #[must_use]
    pub fn matches(&self, other: &CandidateRef) -> bool {
        self.name == other.name && self.coordinate == other.coordinate
    }
}

impl PartialEq for CandidateLocation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.coordinate == other.coordinate
    }
}
