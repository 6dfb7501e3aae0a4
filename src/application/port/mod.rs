// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for the external collaborators.
//!
//! These traits use only domain types, so the session logic stays
//! independent of any concrete map widget or image library.
//!
//! # Available Ports
//!
//! - [`map`]: the interactive map widget
//! - [`geotag`]: writing the chosen coordinate into the image
//!
//! # Design Notes
//!
//! - Traits take `&mut self`: a session drives its collaborators from a
//!   single thread, one event at a time
//! - Methods return `Result` with port-specific error types
//! - No `async fn`; collaborators that block do so outside the session

pub mod geotag;
pub mod map;

pub use geotag::{GeotagError, GeotagWriter};
pub use map::{click_target, MapRenderer};
