// SPDX-License-Identifier: MPL-2.0
//! Invariants of selection and view derivation, checked over a grid of
//! location sets.

use geolens::domain::location::{CandidateLocation, Coordinate, LocationSet};
use geolens::domain::map_view::{derive_view, MapMarker, MapSettings, ViewFocus};
use geolens::domain::selection::{Selection, SelectionStore};

fn candidate(index: usize) -> CandidateLocation {
    let offset = index as f64;
    CandidateLocation::new(
        format!("Place {index}"),
        Coordinate::new(10.0 + offset, 20.0 - offset),
        90u8.saturating_sub(index as u8 * 10),
        None,
    )
    .expect("non-empty name")
}

/// Every combination of exact/no exact and zero to four candidates.
fn sets() -> Vec<LocationSet> {
    let mut sets = Vec::new();
    for count in 0..=4 {
        let candidates: Vec<_> = (0..count).map(candidate).collect();
        sets.push(LocationSet::new(None, candidates.clone()));
        sets.push(LocationSet::new(
            Some(Coordinate::new(-1.5, 3.25)),
            candidates,
        ));
    }
    sets
}

#[test]
fn exact_precedes_auto() {
    let settings = MapSettings::default();
    for set in sets() {
        let mut store = SelectionStore::new();
        store.reconcile(&set);
        let view = derive_view(&set, store.current(), &settings);
        if let Some(exact) = set.exact() {
            assert_eq!(view.center, exact);
            assert_eq!(view.focus, ViewFocus::Exact);
        }
    }
}

#[test]
fn first_candidate_is_auto_selected() {
    for set in sets() {
        let mut store = SelectionStore::new();
        let selection = store.reconcile(&set).clone();
        match (set.exact(), set.top_candidate()) {
            (None, Some(top)) => assert_eq!(selection, Selection::Auto(top.clone())),
            _ => assert_eq!(selection, Selection::None),
        }
    }
}

#[test]
fn user_selection_dominates_center() {
    let settings = MapSettings::default();
    for set in sets() {
        for target in set.candidates() {
            let mut store = SelectionStore::new();
            store.reconcile(&set);
            store.select(&set, &target.to_ref()).expect("member of set");

            let view = derive_view(&set, store.current(), &settings);
            assert_eq!(view.center, target.coordinate());
            assert_eq!(view.zoom, settings.selected_zoom);
        }
    }
}

#[test]
fn at_most_one_marker_emphasized() {
    let settings = MapSettings::default();
    for set in sets() {
        let mut selections = vec![Selection::None, Selection::auto_for(&set)];
        selections.extend(set.candidates().iter().cloned().map(Selection::User));

        for selection in selections {
            let view = derive_view(&set, &selection, &settings);
            let emphasized: Vec<_> = view.markers.iter().filter(|m| m.is_emphasized()).collect();
            assert!(emphasized.len() <= 1);
            if let Some(location) = selection.location() {
                assert_eq!(view.emphasized(), Some(location));
            }
            assert!(view
                .markers
                .iter()
                .filter(|m| matches!(m, MapMarker::Exact { .. }))
                .all(|m| !m.is_emphasized()));
        }
    }
}

#[test]
fn no_stale_selection_after_replacement() {
    let all = sets();
    for before in &all {
        for target in before.candidates() {
            for after in &all {
                let mut store = SelectionStore::new();
                store.reconcile(before);
                store.select(before, &target.to_ref()).expect("member of set");
                store.reconcile(after);

                if let Some(location) = store.current().location() {
                    assert!(after.contains(location), "selection must come from the new set");
                }
            }
        }
    }
}

#[test]
fn derivation_is_deterministic() {
    let settings = MapSettings::default();
    for set in sets() {
        let selection = Selection::auto_for(&set);
        assert_eq!(
            derive_view(&set, &selection, &settings),
            derive_view(&set, &selection, &settings)
        );
    }
}

#[test]
fn empty_set_shows_fallback() {
    let settings = MapSettings::default();
    let view = derive_view(&LocationSet::empty(), &Selection::None, &settings);
    assert_eq!(view.center, settings.fallback_center);
    assert_eq!(view.zoom, settings.fallback_zoom);
    assert!(view.markers.is_empty());
}
