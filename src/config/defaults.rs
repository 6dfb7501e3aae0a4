// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Fallback View**: where the map looks when nothing is known
//! - **Zoom**: zoom levels per focus and their bounds
//! - **Camera**: animated re-centering duration
//! - **Logging**: default log level

// ==========================================================================
// Fallback View Defaults
// ==========================================================================

/// Latitude of the fallback map center (Rome).
pub const DEFAULT_FALLBACK_LATITUDE: f64 = 41.9028;

/// Longitude of the fallback map center (Rome).
pub const DEFAULT_FALLBACK_LONGITUDE: f64 = 12.4964;

/// Zoom used with the fallback center (world scale).
pub const DEFAULT_FALLBACK_ZOOM: u8 = 2;

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Zoom when centering on the exact fix or an automatic pick.
pub const DEFAULT_FOCUS_ZOOM: u8 = 14;

/// Zoom when centering on a user-selected candidate.
pub const DEFAULT_SELECTED_ZOOM: u8 = 15;

/// Minimum zoom level accepted from configuration.
pub const MIN_ZOOM: u8 = 0;

/// Maximum zoom level accepted from configuration (slippy-map tile limit).
pub const MAX_ZOOM: u8 = 22;

// ==========================================================================
// Camera Defaults
// ==========================================================================

/// Duration of the animated flight between candidates (milliseconds).
pub const DEFAULT_FLY_DURATION_MS: u32 = 1000;

/// Maximum fly duration accepted from configuration (milliseconds).
pub const MAX_FLY_DURATION_MS: u32 = 10_000;

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// Default log level for the binary's subscriber.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Fallback center validation
    assert!(DEFAULT_FALLBACK_LATITUDE >= -90.0 && DEFAULT_FALLBACK_LATITUDE <= 90.0);
    assert!(DEFAULT_FALLBACK_LONGITUDE >= -180.0 && DEFAULT_FALLBACK_LONGITUDE <= 180.0);

    // Zoom validation
    assert!(MAX_ZOOM > MIN_ZOOM);
    assert!(DEFAULT_FALLBACK_ZOOM <= MAX_ZOOM);
    assert!(DEFAULT_FOCUS_ZOOM <= MAX_ZOOM);
    assert!(DEFAULT_SELECTED_ZOOM <= MAX_ZOOM);
    assert!(DEFAULT_FALLBACK_ZOOM < DEFAULT_FOCUS_ZOOM);
    assert!(DEFAULT_FOCUS_ZOOM < DEFAULT_SELECTED_ZOOM);

    // Camera validation
    assert!(DEFAULT_FLY_DURATION_MS <= MAX_FLY_DURATION_MS);
};
