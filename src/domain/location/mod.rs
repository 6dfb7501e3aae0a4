// SPDX-License-Identifier: MPL-2.0
//! Location domain types.
//!
//! Pure value types describing what is known about where an image was taken:
//! - [`Coordinate`]: a validated WGS84 position
//! - [`CandidateLocation`]: an inferred, confidence-scored guess
//! - [`LocationSet`]: the exact fix and ranked candidates for one image

mod candidate;
mod coordinate;
mod location_set;

pub use candidate::{
    CandidateLocation, CandidateRef, ConfidenceTier, HIGH_CONFIDENCE_THRESHOLD, MAX_CONFIDENCE,
    MEDIUM_CONFIDENCE_THRESHOLD,
};
pub use coordinate::{Coordinate, LATITUDE_RANGE, LONGITUDE_RANGE};
pub use location_set::LocationSet;
