// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions for the map widget and the geotag writer
//! - [`session`]: The per-image [`Session`](session::Session) driving
//!   selection, map sync and tagging
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Concrete map widgets and image writers implement the ports
//! - Presentation layers feed [`SessionEvent`](session::SessionEvent)s in
//!   and paint what the session hands back
//!
//! # Example
//!
//! ```ignore
//! use geolens::application::session::Session;
//!
//! let mut session = Session::default();
//! let token = session.begin_upload(image);
//! session.apply_result(token, &result);
//! session.sync_map(&mut map_widget);
//! ```

pub mod port;
pub mod session;
