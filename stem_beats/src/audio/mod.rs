//! Audio output
//!
//! The session only ever emits [`AudioCommand`]s; [`AudioContext`] owns the
//! output device and carries them out. Without a device the commands are
//! simply not executed.

pub mod bank;
pub mod tone;

use std::path::Path;

use log::{info, warn};
use rodio::{OutputStream, OutputStreamHandle};

use crate::catalog::SoundId;
use crate::error::AudioError;

pub use bank::SoundBank;
pub use tone::{SineTone, ToneControl, ToneStream};

/// Share of the master gain given to the continuous tone
pub const TONE_GAIN_FACTOR: f32 = 0.5;

/// Something the session wants played
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCommand {
    /// One-shot clip at the current volume
    PlayOnce(SoundId),
    /// Replace any running tone with one at `frequency` Hz
    StartTone { frequency: u32 },
    StopTone,
    /// New master gain, 0.0..=1.0
    SetVolume(f32),
}

/// Map the 0..=100 volume slider to a gain
pub fn slider_gain(volume: f32) -> f32 {
    volume.clamp(0.0, 100.0) / 100.0
}

/// The output device, the loaded clips and at most one running tone
pub struct AudioContext {
    // Keeps the device open
    _stream: OutputStream,
    handle: OutputStreamHandle,
    bank: SoundBank,
    tone: Option<ToneStream>,
    gain: f32,
}

impl AudioContext {
    /// Open the default output device and load clips from `asset_dir`
    pub fn new(asset_dir: &Path, gain: f32) -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()?;
        let bank = SoundBank::load(asset_dir);
        info!("Audio output ready");
        Ok(Self {
            _stream: stream,
            handle,
            bank,
            tone: None,
            gain,
        })
    }

    pub fn bank(&self) -> &SoundBank {
        &self.bank
    }

    /// Carry out one command. Failures are logged and leave audio silent.
    pub fn execute(&mut self, command: AudioCommand) {
        match command {
            AudioCommand::PlayOnce(id) => {
                if let Err(err) = self.bank.play(&self.handle, id, self.gain) {
                    warn!("{err}");
                }
            }
            AudioCommand::StartTone { frequency } => self.start_tone(frequency as f32),
            AudioCommand::StopTone => self.stop_tone(),
            AudioCommand::SetVolume(gain) => {
                self.gain = gain;
                if let Some(tone) = &self.tone {
                    tone.set_gain(gain * TONE_GAIN_FACTOR);
                }
            }
        }
    }

    fn start_tone(&mut self, frequency: f32) {
        // Never two tones at once
        self.stop_tone();
        match ToneStream::start(&self.handle, frequency, self.gain * TONE_GAIN_FACTOR) {
            Ok(tone) => {
                info!("Tone started at {} Hz", tone.frequency());
                self.tone = Some(tone);
            }
            Err(err) => warn!("Could not start tone: {err}"),
        }
    }

    fn stop_tone(&mut self) {
        self.tone = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_maps_linearly() {
        assert_eq!(slider_gain(0.0), 0.0);
        assert_eq!(slider_gain(50.0), 0.5);
        assert_eq!(slider_gain(100.0), 1.0);
        assert_eq!(slider_gain(140.0), 1.0);
    }
}
