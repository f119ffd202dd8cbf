//! Simple pendulum: T = 2π√(L/g)
//!
//! Small-angle motion θ(t) = θmax·sin(2πt/T). A piano sample plays each time
//! the bob enters a turning point.

use std::f64::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::render::{Frame, RenderCommand, ACCENT, BLUE, RED};
use super::{AnimationEvent, Visualization};
use crate::catalog::{SoundId, VisualKind};
use crate::constants::G;

/// Swing amplitude in degrees
pub const AMPLITUDE_DEG: f64 = 30.0;

/// How close (radians) |θ| must get to θmax to count as a turning point
pub const EXTREME_TOLERANCE: f64 = 0.05;

const PIVOT: Vec2 = Vec2::new(300.0, 100.0);
const PIXELS_PER_METRE: f64 = 100.0;
const BOB_RADIUS: f32 = 15.0;

/// Piano sample for a pendulum length in metres.
///
/// Short pendulums get the "high" sample and long ones the "low" sample.
pub fn piano_sample(length: f64) -> SoundId {
    if length < 1.6 {
        SoundId::PianoHigh
    } else if length < 2.3 {
        SoundId::PianoMid
    } else {
        SoundId::PianoLow
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pendulum {
    /// String length (m)
    pub length: f64,
    /// θmax (rad)
    pub amplitude: f64,
    pub elapsed: f64,
    /// Whether the bob was inside a turning-point zone at `elapsed`
    pub at_extreme: bool,
}

impl Pendulum {
    pub fn with_length(length: f64) -> Self {
        Self {
            length,
            amplitude: AMPLITUDE_DEG.to_radians(),
            elapsed: 0.0,
            at_extreme: false,
        }
    }

    pub fn period(&self) -> f64 {
        TAU * (self.length / G).sqrt()
    }

    /// Angular displacement at `elapsed`
    pub fn angle(&self) -> f64 {
        self.amplitude * (TAU / self.period() * self.elapsed).sin()
    }

    fn in_extreme_zone(&self) -> bool {
        (self.angle().abs() - self.amplitude).abs() < EXTREME_TOLERANCE
    }

    pub fn bob_position(&self) -> Vec2 {
        let arm = (self.length * PIXELS_PER_METRE) as f32;
        let angle = self.angle() as f32;
        PIVOT + Vec2::new(arm * angle.sin(), arm * angle.cos())
    }
}

impl Visualization for Pendulum {
    const KIND: VisualKind = VisualKind::Pendulum;

    fn initial() -> Self {
        Self::with_length(2.0)
    }

    fn rerolled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        // Whole centimetres between 1.00 m and 2.99 m
        let centimetres: u32 = rng.gen_range(100..300);
        Self::with_length(f64::from(centimetres) / 100.0)
    }

    fn elapsed(&self) -> f64 {
        self.elapsed
    }

    fn advance(&self, dt: f64) -> Self {
        let mut next = Self {
            elapsed: self.elapsed + dt,
            ..*self
        };
        next.at_extreme = next.in_extreme_zone();
        next
    }

    fn events(prev: &Self, next: &Self) -> Vec<AnimationEvent> {
        if next.at_extreme && !prev.at_extreme {
            vec![AnimationEvent::SwingExtreme {
                sample: piano_sample(next.length),
            }]
        } else {
            Vec::new()
        }
    }

    fn render(&self) -> Vec<RenderCommand> {
        let bob = self.bob_position();
        let mut frame = Frame::new();
        frame
            .title("Pendulum Period: T = 2π√(L/g)")
            .line(PIVOT, bob, ACCENT, 3.0)
            .disc(bob, BOB_RADIUS, RED)
            .rect(PIVOT - Vec2::new(20.0, 5.0), PIVOT + Vec2::new(20.0, 5.0), BLUE)
            .info(
                450.0,
                format!(
                    "Period: {:.2} seconds | Time: {:.2} seconds",
                    self.period(),
                    self.elapsed
                ),
            )
            .info(470.0, format!("Length: {:.2} meters", self.length))
            .hint(490.0, "Sound: Piano at the extremes of each swing")
            .hint(520.0, "Click to change pendulum length");
        frame.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TICK_SECONDS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Run `periods` full periods tick by tick, returning (time, angle) of
    /// every event
    fn simulate(length: f64, periods: f64) -> Vec<(f64, f64, AnimationEvent)> {
        let mut state = Pendulum::with_length(length);
        let ticks = (periods * state.period() / TICK_SECONDS).floor() as usize;
        let mut fired = Vec::new();
        for _ in 0..ticks {
            let next = state.advance(TICK_SECONDS);
            for event in Pendulum::events(&state, &next) {
                fired.push((next.elapsed, next.angle(), event));
            }
            state = next;
        }
        fired
    }

    #[test]
    fn period_follows_length() {
        let p = Pendulum::with_length(G);
        assert!((p.period() - TAU).abs() < 1e-12);
        assert!((Pendulum::initial().period() - 2.8385).abs() < 1e-3);
    }

    #[test]
    fn fires_twice_per_period() {
        for length in [1.0, 1.55, 2.0, 2.45, 2.99] {
            let fired = simulate(length, 5.0);
            assert_eq!(fired.len(), 10, "length {length}");
        }
    }

    #[test]
    fn alternates_between_the_two_extremes() {
        let fired = simulate(1.8, 4.0);
        assert_eq!(fired.len(), 8);
        for pair in fired.windows(2) {
            let (t0, a0, _) = pair[0];
            let (t1, a1, _) = pair[1];
            assert!(a0.signum() != a1.signum(), "same extreme twice");
            let half_period = Pendulum::with_length(1.8).period() / 2.0;
            assert!((t1 - t0 - half_period).abs() < 2.0 * TICK_SECONDS);
        }
    }

    #[test]
    fn no_event_while_staying_in_the_zone() {
        let inside = Pendulum {
            at_extreme: true,
            ..Pendulum::initial()
        };
        assert!(Pendulum::events(&inside, &inside).is_empty());
    }

    #[test]
    fn sample_thresholds() {
        assert_eq!(piano_sample(1.0), SoundId::PianoHigh);
        assert_eq!(piano_sample(1.59), SoundId::PianoHigh);
        assert_eq!(piano_sample(1.6), SoundId::PianoMid);
        assert_eq!(piano_sample(2.29), SoundId::PianoMid);
        assert_eq!(piano_sample(2.3), SoundId::PianoLow);
        assert_eq!(piano_sample(2.99), SoundId::PianoLow);

        let fired = simulate(2.5, 1.0);
        assert!(fired.iter().all(|(_, _, e)| *e
            == AnimationEvent::SwingExtreme {
                sample: SoundId::PianoLow
            }));
    }

    #[test]
    fn reroll_stays_in_range_and_restarts() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = Pendulum::rerolled(&mut rng);
            assert!((1.0..3.0).contains(&p.length));
            assert_eq!(p.elapsed, 0.0);
            assert!(!p.at_extreme);
        }
    }

    #[test]
    fn bob_hangs_below_pivot_at_rest() {
        let p = Pendulum::initial();
        assert_eq!(p.bob_position(), Vec2::new(300.0, 300.0));
    }
}
