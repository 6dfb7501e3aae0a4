// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and shared fixtures.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

// Re-export approx macros for convenient use in tests
pub use approx::assert_abs_diff_eq;

use crate::domain::location::{CandidateLocation, Coordinate};
use crate::payload::UploadResult;
use serde_json::json;

/// Three ranked candidates around the Eiffel Tower (92%, 78%, 65%).
pub fn demo_candidates() -> Vec<CandidateLocation> {
    [
        ("Eiffel Tower, Paris", 48.8584, 2.2945, 92),
        ("Champ de Mars, Paris", 48.8556, 2.2986, 78),
        ("Trocadéro, Paris", 48.8619, 2.2889, 65),
    ]
    .into_iter()
    .filter_map(|(name, lat, lng, confidence)| {
        CandidateLocation::new(name, Coordinate::new(lat, lng), confidence, None)
    })
    .collect()
}

/// Backend payload listing [`demo_candidates`], optionally with an exact
/// fix at the Eiffel Tower.
pub fn demo_payload(with_exact: bool) -> UploadResult {
    let mut value = json!({
        "probableLocations": [
            { "name": "Eiffel Tower, Paris", "lat": 48.8584, "lng": 2.2945, "confidence": 92 },
            { "name": "Champ de Mars, Paris", "lat": 48.8556, "lng": 2.2986, "confidence": 78 },
            { "name": "Trocadéro, Paris", "lat": 48.8619, "lng": 2.2889, "confidence": 65 }
        ]
    });
    if with_exact {
        value["exifData"] = json!({ "coordinates": { "latitude": 48.8584, "longitude": 2.2945 } });
    }
    UploadResult::from_value(value).unwrap_or_default()
}
