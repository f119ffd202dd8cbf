//! Continuous sine tone for the wave visualization

use std::f32::consts::TAU;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rodio::{OutputStreamHandle, Sink, Source};

use crate::constants::TONE_SAMPLE_RATE;
use crate::error::AudioError;

/// Frequency and gain shared with the audio thread
#[derive(Debug)]
pub struct ToneControl {
    frequency: AtomicU32,
    gain: AtomicU32,
}

impl ToneControl {
    pub fn new(frequency: f32, gain: f32) -> Self {
        Self {
            frequency: AtomicU32::new(frequency.to_bits()),
            gain: AtomicU32::new(gain.to_bits()),
        }
    }

    pub fn frequency(&self) -> f32 {
        f32::from_bits(self.frequency.load(Ordering::Relaxed))
    }

    pub fn gain(&self) -> f32 {
        f32::from_bits(self.gain.load(Ordering::Relaxed))
    }

    pub fn set_gain(&self, gain: f32) {
        self.gain.store(gain.to_bits(), Ordering::Relaxed);
    }
}

/// Endless mono sine wave that picks up control changes per sample
#[derive(Debug)]
pub struct SineTone {
    control: Arc<ToneControl>,
    // Fraction of a cycle, 0..1
    phase: f32,
}

impl SineTone {
    pub fn new(control: Arc<ToneControl>) -> Self {
        Self { control, phase: 0.0 }
    }
}

impl Iterator for SineTone {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let sample = (self.phase * TAU).sin() * self.control.gain();
        self.phase = (self.phase + self.control.frequency() / TONE_SAMPLE_RATE as f32).fract();
        Some(sample)
    }
}

impl Source for SineTone {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        TONE_SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// A playing tone. Dropping it stops the sound.
pub struct ToneStream {
    sink: Sink,
    control: Arc<ToneControl>,
}

impl ToneStream {
    pub fn start(handle: &OutputStreamHandle, frequency: f32, gain: f32) -> Result<Self, AudioError> {
        let control = Arc::new(ToneControl::new(frequency, gain));
        let sink = Sink::try_new(handle)?;
        sink.append(SineTone::new(control.clone()));
        sink.play();
        Ok(Self { sink, control })
    }

    pub fn frequency(&self) -> f32 {
        self.control.frequency()
    }

    pub fn set_gain(&self, gain: f32) {
        self.control.set_gain(gain);
    }
}

impl Drop for ToneStream {
    fn drop(&mut self) {
        self.sink.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_round_trips_through_atomics() {
        let control = ToneControl::new(300.0, 0.25);
        assert_eq!(control.frequency(), 300.0);
        control.set_gain(0.1);
        assert_eq!(control.gain(), 0.1);
    }

    #[test]
    fn sine_completes_a_cycle_per_period() {
        let control = Arc::new(ToneControl::new(441.0, 1.0));
        let samples: Vec<f32> = SineTone::new(control).take(101).collect();
        // 441 Hz at 44.1 kHz is exactly 100 samples per cycle
        assert_eq!(samples[0], 0.0);
        assert!((samples[25] - 1.0).abs() < 1e-3);
        assert!((samples[75] + 1.0).abs() < 1e-3);
        assert!(samples[100].abs() < 1e-3);
    }

    #[test]
    fn gain_changes_apply_to_the_next_sample() {
        let control = Arc::new(ToneControl::new(441.0, 1.0));
        let mut tone = SineTone::new(control.clone());
        tone.nth(24);
        control.set_gain(0.5);
        assert!((tone.next().unwrap_or_default() - 0.5).abs() < 1e-3);
    }
}
