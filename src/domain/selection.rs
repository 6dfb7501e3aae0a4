// SPDX-License-Identifier: MPL-2.0
//! Selection state: which candidate is "the one in focus".
//!
//! The [`SelectionStore`] is the single source of truth read by the info
//! panel, the candidate list, the map and the tagging step. It changes only
//! through two doors:
//!
//! - [`SelectionStore::reconcile`] after the location set was replaced
//! - [`SelectionStore::select`] when the user clicks a marker or a list row
//!
//! There is no "deselect" action.

use crate::domain::location::{CandidateLocation, CandidateRef, LocationSet};
use serde::Serialize;
use thiserror::Error;

/// Where the current selection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    None,
    Auto,
    User,
}

/// The location currently in focus.
///
/// A user selection always carries a location, so the "USER without a
/// location" state cannot be built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "source", content = "location", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    None,
    /// Picked automatically as the first-ranked candidate.
    Auto(CandidateLocation),
    /// Picked by the user.
    User(CandidateLocation),
}

impl Selection {
    #[must_use]
    pub fn source(&self) -> SelectionSource {
        match self {
            Selection::None => SelectionSource::None,
            Selection::Auto(_) => SelectionSource::Auto,
            Selection::User(_) => SelectionSource::User,
        }
    }

    #[must_use]
    pub fn location(&self) -> Option<&CandidateLocation> {
        match self {
            Selection::None => None,
            Selection::Auto(location) | Selection::User(location) => Some(location),
        }
    }

    #[must_use]
    pub fn is_user(&self) -> bool {
        matches!(self, Selection::User(_))
    }

    /// The automatic selection for a freshly installed set.
    ///
    /// An exact fix is authoritative and needs no selected candidate;
    /// otherwise the first-ranked candidate is picked.
    #[must_use]
    pub fn auto_for(set: &LocationSet) -> Self {
        if set.exact().is_some() {
            return Selection::None;
        }
        set.top_candidate()
            .cloned()
            .map_or(Selection::None, Selection::Auto)
    }
}

/// Errors raised by selection changes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    /// The clicked candidate is not part of the current location set.
    #[error("candidate '{name}' is not part of the current location set")]
    UnknownCandidate { name: String },
}

/// Owns the current [`Selection`] and enforces its transition rules.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    selection: Selection,
    /// Bumped every time the selection value changes.
    revision: u64,
}

impl SelectionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> &Selection {
        &self.selection
    }

    /// Monotonic counter identifying the current selection value.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Re-derives the selection after `set` replaced the previous set.
    ///
    /// Every replacement starts over from [`Selection::auto_for`]; a user
    /// pick made on the previous set never carries over.
    pub fn reconcile(&mut self, set: &LocationSet) -> &Selection {
        if let Selection::User(location) = &self.selection {
            tracing::debug!(
                name = location.name(),
                "location set replaced, dropping user selection"
            );
        }
        self.replace(Selection::auto_for(set));
        &self.selection
    }

    /// Applies a user click on `target`.
    ///
    /// Overrides any previous selection, including a re-click on the
    /// already selected candidate (which leaves the state unchanged).
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownCandidate`] if `target` does not
    /// match a candidate of `set`; the selection is left untouched.
    pub fn select(
        &mut self,
        set: &LocationSet,
        target: &CandidateRef,
    ) -> Result<&Selection, SelectionError> {
        let Some(location) = set.find(target) else {
            tracing::debug!(name = %target.name, "click on unknown candidate rejected");
            return Err(SelectionError::UnknownCandidate {
                name: target.name.clone(),
            });
        };
        self.replace(Selection::User(location.clone()));
        Ok(&self.selection)
    }

    /// Drops everything, as when the session is reset.
    pub fn clear(&mut self) {
        self.replace(Selection::None);
    }

    fn replace(&mut self, next: Selection) {
        if next != self.selection {
            tracing::debug!(
                source = ?next.source(),
                name = ?next.location().map(CandidateLocation::name),
                "selection changed"
            );
            self.revision += 1;
        }
        self.selection = next;
    }
}
