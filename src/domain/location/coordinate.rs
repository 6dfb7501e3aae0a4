// SPDX-License-Identifier: MPL-2.0
//! Geographic coordinate value type.

use serde::Serialize;

/// Valid latitude range in decimal degrees.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in decimal degrees.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A WGS84 position in decimal degrees.
///
/// # Example
///
/// ```
/// use geolens::domain::location::Coordinate;
///
/// let eiffel = Coordinate::new(48.8584, 2.2945);
/// assert_eq!(eiffel.format(), "48.858400° N, 2.294500° E");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees (-90.0 to 90.0)
    latitude: f64,
    /// Longitude in decimal degrees (-180.0 to 180.0)
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, clamping out-of-range values:
    /// - Latitude: -90.0 to 90.0
    /// - Longitude: -180.0 to 180.0
    ///
    /// Use [`Coordinate::checked`] for untrusted input.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: latitude.clamp(*LATITUDE_RANGE.start(), *LATITUDE_RANGE.end()),
            longitude: longitude.clamp(*LONGITUDE_RANGE.start(), *LONGITUDE_RANGE.end()),
        }
    }

    /// Creates a coordinate only if both components are finite and in range.
    ///
    /// Returns `None` for NaN, infinities, or values outside the WGS84 bounds.
    #[must_use]
    pub fn checked(latitude: f64, longitude: f64) -> Option<Self> {
        if LATITUDE_RANGE.contains(&latitude) && LONGITUDE_RANGE.contains(&longitude) {
            Some(Self {
                latitude,
                longitude,
            })
        } else {
            None
        }
    }

    /// Returns the latitude in decimal degrees.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in decimal degrees.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Formats the coordinate as a human-readable string.
    ///
    /// Format: "48.858400° N, 2.294500° E"
    #[must_use]
    pub fn format(&self) -> String {
        let lat_dir = if self.latitude >= 0.0 { "N" } else { "S" };
        let lon_dir = if self.longitude >= 0.0 { "E" } else { "W" };
        format!(
            "{:.6}° {}, {:.6}° {}",
            self.latitude.abs(),
            lat_dir,
            self.longitude.abs(),
            lon_dir
        )
    }

    /// Generates an OpenStreetMap URL centered on this coordinate.
    #[must_use]
    pub fn map_url(&self, zoom: u8) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={}&mlon={}#map={}/{}/{}",
            self.latitude, self.longitude, zoom, self.latitude, self.longitude
        )
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}
