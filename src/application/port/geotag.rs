// SPDX-License-Identifier: MPL-2.0
//! Geotag write-back port.
//!
//! The tagging collaborator turns a [`TaggingRequest`] and the original
//! image bytes into a tagged copy (typically GPS EXIF tags written as
//! degrees/minutes/seconds rationals with N/S and E/W references). The
//! byte-level work lives entirely behind this trait.

use crate::domain::tagging::{TaggingRequest, UploadedImage};
use thiserror::Error;

// =============================================================================
// GeotagError
// =============================================================================

/// Errors a tagging collaborator can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeotagError {
    /// The image format cannot carry GPS tags.
    #[error("Format does not support GPS tags")]
    UnsupportedFormat,

    /// The image data or its existing metadata is corrupted.
    #[error("Corrupted image metadata: {0}")]
    CorruptedMetadata(String),

    /// Writing the tags failed.
    #[error("Failed to write GPS tags: {0}")]
    WriteFailed(String),
}

// =============================================================================
// GeotagWriter Trait
// =============================================================================

/// Port for writing a geotag into image bytes.
///
/// # Example
///
/// ```ignore
/// use geolens::application::port::GeotagWriter;
///
/// fn tag(writer: &mut impl GeotagWriter, image: &UploadedImage, request: &TaggingRequest) {
///     match writer.write_geotag(image, request) {
///         Ok(bytes) => save(&request.output_name, &bytes),
///         Err(e) => tracing::warn!("geotag failed: {e}"),
///     }
/// }
/// ```
pub trait GeotagWriter {
    /// Returns a copy of `image` carrying the coordinate from `request`.
    ///
    /// Existing metadata other than the GPS fields should be preserved.
    ///
    /// # Errors
    ///
    /// Returns a [`GeotagError`] if the tags cannot be written.
    fn write_geotag(
        &mut self,
        image: &UploadedImage,
        request: &TaggingRequest,
    ) -> Result<Vec<u8>, GeotagError>;
}
