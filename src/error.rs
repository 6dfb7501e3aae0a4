// SPDX-License-Identifier: MPL-2.0
//! Crate-level error type.
//!
//! Each concern has its own error enum next to the code that raises it;
//! [`Error`] gathers them for callers that only need one type.

use crate::application::port::GeotagError;
use crate::domain::selection::SelectionError;
use crate::domain::tagging::TaggingError;
use crate::payload::PayloadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Payload Error: {0}")]
    Payload(#[from] PayloadError),

    #[error("Selection Error: {0}")]
    Selection(#[from] SelectionError),

    #[error("Tagging Error: {0}")]
    Tagging(#[from] TaggingError),

    #[error("Geotag Error: {0}")]
    Geotag(#[from] GeotagError),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
