// SPDX-License-Identifier: MPL-2.0
//! `geolens` resolves where a photo was taken and keeps a map in sync with it.
//!
//! It reconciles an exact GPS fix from image metadata with ranked,
//! AI-inferred candidate locations, tracks which location is in focus, derives
//! what the map should show, and produces geotagging instructions for the
//! chosen location.

#![doc(html_root_url = "https://docs.rs/geolens/0.1.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod payload;

#[cfg(test)]
pub(crate) mod test_utils;
