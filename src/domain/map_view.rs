// SPDX-License-Identifier: MPL-2.0
//! Map view derivation.
//!
//! [`derive_view`] is the one place that decides where the map looks and
//! which marker is emphasized. Renderers receive the resulting [`MapView`]
//! and never compute centering or emphasis on their own.
//!
//! Center/zoom precedence, highest first:
//!
//! 1. user selection: selected coordinate, close zoom
//! 2. exact fix from metadata: exact coordinate, focus zoom
//! 3. automatic selection: first-ranked candidate, focus zoom
//! 4. nothing known: configured fallback point, wide zoom

use crate::config::defaults::{
    DEFAULT_FALLBACK_LATITUDE, DEFAULT_FALLBACK_LONGITUDE, DEFAULT_FALLBACK_ZOOM,
    DEFAULT_FLY_DURATION_MS, DEFAULT_FOCUS_ZOOM, DEFAULT_SELECTED_ZOOM,
};
use crate::domain::location::{CandidateLocation, Coordinate, LocationSet};
use crate::domain::selection::Selection;
use serde::Serialize;

/// Resolved map parameters consumed by [`derive_view`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapSettings {
    /// Center used when nothing is known about the image.
    pub fallback_center: Coordinate,
    /// Zoom used with the fallback center (world/country scale).
    pub fallback_zoom: u8,
    /// Zoom used when centering on the exact fix or an automatic pick.
    pub focus_zoom: u8,
    /// Zoom used when centering on a user-selected candidate.
    pub selected_zoom: u8,
    /// Duration of the animated re-centering within one location set.
    pub fly_duration_ms: u32,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            fallback_center: Coordinate::new(DEFAULT_FALLBACK_LATITUDE, DEFAULT_FALLBACK_LONGITUDE),
            fallback_zoom: DEFAULT_FALLBACK_ZOOM,
            focus_zoom: DEFAULT_FOCUS_ZOOM,
            selected_zoom: DEFAULT_SELECTED_ZOOM,
            fly_duration_ms: DEFAULT_FLY_DURATION_MS,
        }
    }
}

/// Which precedence rule produced a view's center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewFocus {
    Selected,
    Exact,
    Auto,
    Fallback,
}

/// Marker kind as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerKind {
    /// Ground-truth fix from metadata; never emphasized.
    Exact,
    Candidate { emphasized: bool },
}

/// One marker to paint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "marker", rename_all = "snake_case")]
pub enum MapMarker {
    Exact {
        coordinate: Coordinate,
    },
    Candidate {
        location: CandidateLocation,
        /// 1-based producer rank, drawn as the pin number.
        rank: usize,
        emphasized: bool,
    },
}

impl MapMarker {
    #[must_use]
    pub fn kind(&self) -> MarkerKind {
        match self {
            MapMarker::Exact { .. } => MarkerKind::Exact,
            MapMarker::Candidate { emphasized, .. } => MarkerKind::Candidate {
                emphasized: *emphasized,
            },
        }
    }

    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        match self {
            MapMarker::Exact { coordinate } => *coordinate,
            MapMarker::Candidate { location, .. } => location.coordinate(),
        }
    }

    #[must_use]
    pub fn is_emphasized(&self) -> bool {
        matches!(self, MapMarker::Candidate { emphasized: true, .. })
    }
}

/// Everything a renderer needs to paint the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    pub focus: ViewFocus,
    /// Exact marker first (if any), then candidates in producer order.
    pub markers: Vec<MapMarker>,
}

impl MapView {
    /// Returns the emphasized candidate, if any.
    #[must_use]
    pub fn emphasized(&self) -> Option<&CandidateLocation> {
        self.markers.iter().find_map(|marker| match marker {
            MapMarker::Candidate {
                location,
                emphasized: true,
                ..
            } => Some(location),
            _ => None,
        })
    }

    /// Iterates over the candidate markers only.
    pub fn candidate_markers(&self) -> impl Iterator<Item = &MapMarker> {
        self.markers
            .iter()
            .filter(|marker| matches!(marker, MapMarker::Candidate { .. }))
    }

    /// Returns the exact-fix marker coordinate, if one is shown.
    #[must_use]
    pub fn exact_marker(&self) -> Option<Coordinate> {
        self.markers.iter().find_map(|marker| match marker {
            MapMarker::Exact { coordinate } => Some(*coordinate),
            MapMarker::Candidate { .. } => None,
        })
    }
}

/// How the camera should move to a new view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum CameraTransition {
    /// Hard cut, used after the location set was replaced.
    Jump,
    /// Animated flight, used while the same location set stays active.
    FlyTo { duration_ms: u32 },
}

impl CameraTransition {
    /// Picks the transition for a frame of location set `current`, given the
    /// set revision that was last painted (if any).
    #[must_use]
    pub fn for_revisions(last_painted: Option<u64>, current: u64, settings: &MapSettings) -> Self {
        match last_painted {
            Some(painted) if painted == current => CameraTransition::FlyTo {
                duration_ms: settings.fly_duration_ms,
            },
            _ => CameraTransition::Jump,
        }
    }
}

/// A view plus the camera transition to reach it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub view: MapView,
    pub transition: CameraTransition,
}

/// Derives the map view for `set` under `selection`.
///
/// Pure and deterministic: same inputs, same view.
#[must_use]
pub fn derive_view(set: &LocationSet, selection: &Selection, settings: &MapSettings) -> MapView {
    let (center, zoom, focus) = match (selection, set.exact()) {
        (Selection::User(location), _) => {
            (location.coordinate(), settings.selected_zoom, ViewFocus::Selected)
        }
        (_, Some(exact)) => (exact, settings.focus_zoom, ViewFocus::Exact),
        (Selection::Auto(location), None) => {
            (location.coordinate(), settings.focus_zoom, ViewFocus::Auto)
        }
        (Selection::None, None) => (
            settings.fallback_center,
            settings.fallback_zoom,
            ViewFocus::Fallback,
        ),
    };

    // Only the first equal candidate is emphasized, so identical duplicates
    // cannot light up together.
    let emphasized_index = selection
        .location()
        .and_then(|selected| set.position(selected));

    let mut markers = Vec::with_capacity(set.candidates().len() + 1);
    if let Some(exact) = set.exact() {
        markers.push(MapMarker::Exact { coordinate: exact });
    }
    markers.extend(
        set.candidates()
            .iter()
            .enumerate()
            .map(|(index, location)| MapMarker::Candidate {
                location: location.clone(),
                rank: index + 1,
                emphasized: emphasized_index == Some(index),
            }),
    );

    MapView {
        center,
        zoom,
        focus,
        markers,
    }
}
