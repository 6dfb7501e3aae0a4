// SPDX-License-Identifier: MPL-2.0
//! Map rendering port.
//!
//! A map widget paints [`RenderFrame`]s and reports marker clicks back as
//! [`CandidateRef`]s (name + coordinate), never as pixel positions or
//! widget-internal marker ids.

use crate::domain::location::CandidateRef;
use crate::domain::map_view::{MapMarker, RenderFrame};

/// Port for the interactive map widget.
///
/// The widget owns drawing, icon assets, popups and animation easing. It
/// must not derive centering or emphasis itself; everything it needs is in
/// the frame.
pub trait MapRenderer {
    /// Paints `frame`, moving the camera as `frame.transition` says.
    fn render(&mut self, frame: &RenderFrame);
}

/// Translates a clicked marker into the identity the session matches on.
///
/// Returns `None` for the exact-fix marker, which is not selectable.
#[must_use]
pub fn click_target(marker: &MapMarker) -> Option<CandidateRef> {
    match marker {
        MapMarker::Candidate { location, .. } => Some(location.to_ref()),
        MapMarker::Exact { .. } => None,
    }
}
