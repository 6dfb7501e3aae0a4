// SPDX-License-Identifier: MPL-2.0
//! Geotagging instructions for the write-back step.
//!
//! A [`TaggingRequest`] captures what should be written into the image:
//! the selected coordinate, where it came from and when the request was
//! made. Producing the tagged bytes is the job of a
//! [`GeotagWriter`](crate::application::port::GeotagWriter).

use crate::domain::location::Coordinate;
use crate::domain::selection::Selection;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Suffix inserted before the extension of tagged output files.
pub const GEOTAGGED_SUFFIX: &str = "_geotagged";

/// Errors raised when building or submitting a tagging request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaggingError {
    /// No location is selected, so there is nothing to tag.
    #[error("no location is selected")]
    NoSelection,

    /// No image was uploaded in this session.
    #[error("no image is loaded")]
    NoImage,

    /// The request was built for a selection that has since changed.
    #[error(
        "tagging request is stale (built for selection {request_revision}, current is {current_revision})"
    )]
    StaleRequest {
        request_revision: u64,
        current_revision: u64,
    },
}

/// An uploaded image as handed to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Instruction for the tagging collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggingRequest {
    pub coordinate: Coordinate,
    /// Name of the selected location, recorded as the geolocation source.
    pub source_label: String,
    pub timestamp: DateTime<Utc>,
    /// File name the tagged output should be saved under.
    pub output_name: String,
    /// Selection revision the request was built from.
    pub selection_revision: u64,
}

impl TaggingRequest {
    /// Builds a request for the current selection, stamped with the
    /// current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaggingError::NoSelection`] when nothing is selected.
    pub fn build(
        selection: &Selection,
        selection_revision: u64,
        image: &UploadedImage,
    ) -> Result<Self, TaggingError> {
        Self::build_at(selection, selection_revision, image, Utc::now())
    }

    /// Same as [`TaggingRequest::build`] with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaggingError::NoSelection`] when nothing is selected.
    pub fn build_at(
        selection: &Selection,
        selection_revision: u64,
        image: &UploadedImage,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, TaggingError> {
        let location = selection.location().ok_or(TaggingError::NoSelection)?;
        Ok(Self {
            coordinate: location.coordinate(),
            source_label: location.name().to_string(),
            timestamp,
            output_name: geotagged_file_name(&image.file_name),
            selection_revision,
        })
    }
}

/// Extensions whose names get the [`GEOTAGGED_SUFFIX`], matched
/// case-insensitively.
const TAGGABLE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Derives the output name for a tagged copy of `file_name`.
///
/// `photo.jpg` becomes `photo_geotagged.jpg`, keeping the extension's case.
/// Names without a jpg/jpeg/png extension are returned unchanged.
#[must_use]
pub fn geotagged_file_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext))
            if TAGGABLE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known)) =>
        {
            format!("{stem}{GEOTAGGED_SUFFIX}.{ext}")
        }
        _ => file_name.to_string(),
    }
}
