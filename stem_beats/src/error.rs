//! Error types
//!
//! None of these are fatal: asset and device failures downgrade to silence,
//! and catalog errors only surface when a matcher is built from bad data.

use std::io;
use thiserror::Error;

/// Audio failures. The application keeps running without the affected sound.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("could not read sound asset {name}: {source}")]
    AssetRead {
        name: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("could not decode sound asset {name}: {source}")]
    AssetDecode {
        name: &'static str,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("audio output device unavailable: {0}")]
    Device(#[from] rodio::StreamError),
    #[error("audio playback failed: {0}")]
    Playback(#[from] rodio::PlayError),
}

/// Violations of the catalog's unique-spelling invariant
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("spelling {spelling:?} of {second:?} collides with {first:?}")]
    DuplicateSpelling {
        spelling: String,
        first: &'static str,
        second: &'static str,
    },
}
