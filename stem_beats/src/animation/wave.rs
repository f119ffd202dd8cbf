//! Simple harmonic motion: y = A sin(ωt + φ)
//!
//! A travelling sine wave. The session pairs it with a continuous tone whose
//! pitch follows the wave frequency.

use std::f64::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::render::{Color, Frame, RenderCommand, ACCENT, BLUE, RED};
use super::Visualization;
use crate::catalog::VisualKind;
use crate::constants::TONE_FREQUENCY_SCALE;

/// Vertical centre line of the wave
pub const AXIS_Y: f32 = 250.0;

const LEFT_X: f32 = 100.0;
const RIGHT_X: f32 = 600.0;
const SAMPLES: usize = 500;
const GRADIENT_STEP: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    /// Amplitude (px)
    pub amplitude: f64,
    /// Frequency (Hz)
    pub frequency: f64,
    pub elapsed: f64,
}

impl Wave {
    pub fn new(amplitude: f64, frequency: f64) -> Self {
        Self {
            amplitude,
            frequency,
            elapsed: 0.0,
        }
    }

    /// ω = 2πf
    pub fn angular_frequency(&self) -> f64 {
        TAU * self.frequency
    }

    /// Displacement `x` px along the wave from its left edge
    pub fn displacement(&self, x: f64) -> f64 {
        self.amplitude * (self.angular_frequency() * (self.elapsed + x / 100.0)).sin()
    }

    /// Pitch of the tone that accompanies this wave, in whole hertz
    pub fn tone_frequency(&self) -> u32 {
        (TONE_FREQUENCY_SCALE * self.frequency).floor() as u32
    }

    fn curve(&self) -> Vec<Vec2> {
        let span = RIGHT_X - LEFT_X;
        (0..SAMPLES)
            .map(|i| {
                let offset = span * i as f32 / (SAMPLES - 1) as f32;
                Vec2::new(LEFT_X + offset, AXIS_Y - self.displacement(f64::from(offset)) as f32)
            })
            .collect()
    }
}

impl Visualization for Wave {
    const KIND: VisualKind = VisualKind::Wave;

    fn initial() -> Self {
        Self::new(50.0, 1.0)
    }

    fn rerolled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let amplitude: u32 = rng.gen_range(30..70);
        let frequency = (rng.gen_range(0.5..2.0_f64) * 100.0).round() / 100.0;
        Self::new(f64::from(amplitude), frequency)
    }

    fn elapsed(&self) -> f64 {
        self.elapsed
    }

    fn advance(&self, dt: f64) -> Self {
        Self {
            elapsed: self.elapsed + dt,
            ..*self
        }
    }

    fn render(&self) -> Vec<RenderCommand> {
        let curve = self.curve();
        let amplitude = self.amplitude as f32;
        let point = Vec2::new(LEFT_X, AXIS_Y - self.displacement(0.0) as f32);

        let mut frame = Frame::new();
        frame
            .title("Simple Harmonic Motion: y = A sin(ωt + φ)")
            .line(Vec2::new(50.0, AXIS_Y), Vec2::new(550.0, AXIS_Y), BLUE, 1.0)
            .line(Vec2::new(LEFT_X, 100.0), Vec2::new(LEFT_X, 400.0), BLUE, 1.0);

        // Fill under the curve, fading from red at the crests
        for sample in curve.iter().step_by(GRADIENT_STEP) {
            let depth = ((sample.y - AXIS_Y).abs() / amplitude.max(1.0)).min(1.0);
            let alpha = (40.0 + 120.0 * depth) as u8;
            let shade: Color = [RED[0], RED[1], RED[2], alpha];
            frame.line(Vec2::new(sample.x, AXIS_Y), *sample, shade, 2.0);
        }

        frame
            .polyline(curve, ACCENT, 2.0)
            .dashed_line(Vec2::new(LEFT_X, AXIS_Y), point, RED)
            .disc(point, 8.0, RED)
            .info(
                420.0,
                format!(
                    "Amplitude: {:.1} px | Frequency: {:.2} Hz",
                    self.amplitude, self.frequency
                ),
            )
            .info(
                450.0,
                format!(
                    "Angular frequency: {:.2} rad/s | Time: {:.2} s",
                    self.angular_frequency(),
                    self.elapsed
                ),
            )
            .hint(
                480.0,
                format!("Sound: Continuous tone at {} Hz", self.tone_frequency()),
            )
            .hint(510.0, "Click to change amplitude and frequency");
        frame.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TICK_SECONDS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn displacement_is_a_travelling_sine() {
        let wave = Wave::initial();
        assert_eq!(wave.displacement(0.0), 0.0);
        // Quarter wavelength along (25 px at 1 Hz) is a crest
        assert!((wave.displacement(25.0) - 50.0).abs() < 1e-9);
        // A quarter period later the crest has moved to the origin
        let later = wave.advance(0.25);
        assert!((later.displacement(0.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn tone_follows_frequency() {
        assert_eq!(Wave::initial().tone_frequency(), 300);
        assert_eq!(Wave::new(40.0, 1.37).tone_frequency(), 411);
        assert_eq!(Wave::new(40.0, 0.5).tone_frequency(), 150);
    }

    #[test]
    fn curve_spans_the_canvas_within_amplitude() {
        let wave = Wave::new(60.0, 1.7).advance(0.3);
        let curve = wave.curve();
        assert_eq!(curve.len(), SAMPLES);
        assert_eq!(curve[0].x, LEFT_X);
        assert!((curve[SAMPLES - 1].x - RIGHT_X).abs() < 1e-3);
        assert!(curve.iter().all(|p| (p.y - AXIS_Y).abs() <= 60.0 + 1e-3));
    }

    #[test]
    fn never_emits_events() {
        let mut state = Wave::initial();
        for _ in 0..100 {
            let next = state.advance(TICK_SECONDS);
            assert!(Wave::events(&state, &next).is_empty());
            state = next;
        }
    }

    #[test]
    fn reroll_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(19);
        for _ in 0..200 {
            let w = Wave::rerolled(&mut rng);
            assert!((30.0..70.0).contains(&w.amplitude));
            assert!((0.5..=2.0).contains(&w.frequency));
            assert!(((w.frequency * 100.0).round() - w.frequency * 100.0).abs() < 1e-9);
        }
    }
}
