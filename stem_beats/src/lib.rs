//! StemBeats
//!
//! Type physics formulas to unlock looping visualizations with sound:
//!
//! - **Catalog & matching**: canonical formulas and their accepted spellings
//! - **Progress**: the formulas discovered during this session
//! - **Animation**: six closed-form visualizations stepped on a fixed tick,
//!   with edge-triggered sound events
//! - **Sound loops**: per-formula repetition driven by the tempo slider
//! - **Audio**: clip playback and a continuous tone for the wave view

pub mod animation;
pub mod audio;
pub mod catalog;
pub mod config;
pub mod error;
pub mod matcher;
pub mod progress;
pub mod scheduler;
pub mod session;
pub mod sound_loop;

pub use catalog::{FormulaDefinition, FormulaKey, SoundId, VisualKind};
pub use config::AppConfig;
pub use error::{AudioError, CatalogError};
pub use session::{AudioCommand, Notice, Session, SubmitOutcome};

/// Constants shared by the simulations and the schedulers
pub mod constants {
    /// Gravitational acceleration (m/s²)
    pub const G: f64 = 9.8;

    /// Animation tick length in milliseconds
    pub const TICK_MS: u64 = 50;

    /// Animation tick length in seconds
    pub const TICK_SECONDS: f64 = TICK_MS as f64 / 1000.0;

    /// How late a timer may fire before missed time is dropped
    pub const MAX_TIMER_LAG_MS: u64 = TICK_MS;

    /// Side length of the square logical canvas
    pub const CANVAS_SIZE: f32 = 600.0;

    /// Tempo slider offset: slider 0..=100 maps to 50..=150 BPM
    pub const TEMPO_OFFSET_BPM: f64 = 50.0;

    /// Sample rate of the continuous tone
    pub const TONE_SAMPLE_RATE: u32 = 44_100;

    /// Factor lifting the wave frequency into the audible range
    pub const TONE_FREQUENCY_SCALE: f64 = 300.0;
}
