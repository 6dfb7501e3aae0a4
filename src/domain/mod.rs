// SPDX-License-Identifier: MPL-2.0
//! Domain layer - location resolution and map synchronization rules.
//!
//! This module contains pure value types and business rules. Nothing here
//! performs I/O; collaborators are reached through
//! [`application::port`](crate::application::port).
//!
//! # Modules
//!
//! - [`location`]: [`Coordinate`](location::Coordinate),
//!   [`CandidateLocation`](location::CandidateLocation),
//!   [`LocationSet`](location::LocationSet)
//! - [`selection`]: [`Selection`](selection::Selection) and its
//!   [`SelectionStore`](selection::SelectionStore)
//! - [`map_view`]: [`derive_view`](map_view::derive_view) and the
//!   [`MapView`](map_view::MapView) it produces
//! - [`tagging`]: [`TaggingRequest`](tagging::TaggingRequest) for the
//!   write-back step

pub mod location;
pub mod map_view;
pub mod selection;
pub mod tagging;
