// SPDX-License-Identifier: MPL-2.0
//! Upload-result payload model.
//!
//! The processing backend answers an upload with a JSON document such as:
//!
//! ```json
//! {
//!   "exifData": { "coordinates": { "latitude": 48.8584, "longitude": 2.2945 } },
//!   "probableLocations": [
//!     { "name": "Eiffel Tower, Paris", "lat": 48.8584, "lng": 2.2945, "confidence": 92 }
//!   ],
//!   "message": "Location inferred from image content"
//! }
//! ```
//!
//! Every field is optional. Missing or malformed values (wrong type,
//! out-of-range coordinates) are read as absent, never as zero, so a
//! partial document still yields a usable [`LocationSet`].
//!
//! The vision backend's own field names (`candidates`, `place`, `latitude`,
//! `longitude`, `confidence_pct`) are read as fallbacks when the primary
//! name is absent or malformed, and fractional confidences are rounded.

use crate::domain::location::{CandidateLocation, Coordinate, LocationSet, MAX_CONFIDENCE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Errors raised when the payload is not a JSON object at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("payload is not a JSON object")]
    NotAnObject,
}

/// Deserializes any JSON value, keeping it only if it fits `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// The full processing result for one uploaded image.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    #[serde(default, deserialize_with = "lenient")]
    pub exif_data: Option<ExifPayload>,

    /// Raw candidate entries; each is validated on its own.
    #[serde(default, deserialize_with = "lenient")]
    pub probable_locations: Option<Vec<Value>>,

    /// Vision-backend name for the candidate list, used when
    /// `probableLocations` is missing.
    #[serde(default, deserialize_with = "lenient")]
    pub candidates: Option<Vec<Value>>,

    /// Status line for the result banner.
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExifPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub coordinates: Option<CoordinatesPayload>,

    #[serde(default, deserialize_with = "lenient")]
    pub date_time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoordinatesPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub latitude: Option<f64>,

    #[serde(default, deserialize_with = "lenient")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CandidatePayload {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    place: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    latitude: Option<f64>,

    #[serde(default, deserialize_with = "lenient")]
    lng: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    longitude: Option<f64>,

    #[serde(default, deserialize_with = "lenient")]
    confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    confidence_pct: Option<f64>,

    #[serde(default, deserialize_with = "lenient")]
    description: Option<String>,
}

impl CandidatePayload {
    fn into_candidate(self) -> Option<CandidateLocation> {
        let name = self.name.filter(|n| !n.trim().is_empty()).or(self.place)?;
        let coordinate = Coordinate::checked(
            self.lat.or(self.latitude)?,
            self.lng.or(self.longitude)?,
        )?;
        let confidence = confidence_percent(self.confidence.or(self.confidence_pct)?)?;
        CandidateLocation::new(name, coordinate, confidence, self.description)
    }
}

/// Rounds a confidence value into `0..=100`.
fn confidence_percent(value: f64) -> Option<u8> {
    if !value.is_finite() {
        return None;
    }
    Some(value.round().clamp(0.0, f64::from(MAX_CONFIDENCE)) as u8)
}

impl UploadResult {
    /// Parses a payload from JSON text.
    ///
    /// # Errors
    ///
    /// Fails only when the text is not JSON or not a JSON object; missing
    /// and malformed fields inside an object are tolerated.
    pub fn from_json(text: &str) -> Result<Self, PayloadError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| PayloadError::InvalidJson(e.to_string()))?;
        Self::from_value(value)
    }

    /// Same as [`UploadResult::from_json`] for an already parsed value.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::NotAnObject`] for arrays, strings, numbers,
    /// booleans and null.
    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        if !value.is_object() {
            return Err(PayloadError::NotAnObject);
        }
        Self::deserialize(value).map_err(|e| PayloadError::InvalidJson(e.to_string()))
    }

    /// The exact fix, if both components are present and in range.
    #[must_use]
    pub fn exact(&self) -> Option<Coordinate> {
        let coordinates = self.exif_data.as_ref()?.coordinates.as_ref()?;
        Coordinate::checked(coordinates.latitude?, coordinates.longitude?)
    }

    /// Builds the location set, keeping candidate order verbatim.
    ///
    /// Entries without a usable name, coordinate or confidence are dropped.
    #[must_use]
    pub fn to_location_set(&self) -> LocationSet {
        let raw = self
            .probable_locations
            .as_deref()
            .or(self.candidates.as_deref())
            .unwrap_or_default();
        let mut candidates = Vec::with_capacity(raw.len());
        for (index, entry) in raw.iter().enumerate() {
            let parsed = CandidatePayload::deserialize(entry)
                .ok()
                .and_then(CandidatePayload::into_candidate);
            match parsed {
                Some(candidate) => candidates.push(candidate),
                None => tracing::debug!(index, "dropping malformed candidate entry"),
            }
        }
        LocationSet::new(self.exact(), candidates)
    }
}
