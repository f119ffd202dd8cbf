//! Newton's second law: F = ma
//!
//! A block is pushed by a constant force for five seconds, x = ½·(F/m)·t²,
//! then slides back to the start over the last second of the cycle.

use glam::Vec2;
use rand::Rng;

use super::render::{Frame, RenderCommand, BLUE, GREEN, RED};
use super::Visualization;
use crate::catalog::VisualKind;

pub const CYCLE_SECONDS: f64 = 6.0;
pub const PUSH_SECONDS: f64 = 5.0;

const GROUND_Y: f32 = 350.0;
const START_X: f64 = 100.0;
const MAX_TRAVEL: f64 = 400.0;
const PIXELS_PER_METRE: f64 = 10.0;
const RESET_SPEED: f64 = 800.0;

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantForce {
    /// Mass (kg)
    pub mass: f64,
    /// Applied force (N)
    pub force: f64,
    pub elapsed: f64,
}

impl ConstantForce {
    pub fn new(mass: f64, force: f64) -> Self {
        Self {
            mass,
            force,
            elapsed: 0.0,
        }
    }

    pub fn acceleration(&self) -> f64 {
        self.force / self.mass
    }

    pub fn cycle_position(&self) -> f64 {
        self.elapsed % CYCLE_SECONDS
    }

    pub fn is_resetting(&self) -> bool {
        self.cycle_position() > PUSH_SECONDS
    }

    /// Distance covered (m) after `t` seconds of pushing
    pub fn distance_at(&self, t: f64) -> f64 {
        0.5 * self.acceleration() * t * t
    }

    /// Horizontal position of the block on the canvas
    pub fn block_x(&self) -> f64 {
        let t = self.cycle_position();
        if t <= PUSH_SECONDS {
            START_X + (self.distance_at(t) * PIXELS_PER_METRE).min(MAX_TRAVEL)
        } else {
            let end = START_X + (self.distance_at(PUSH_SECONDS) * PIXELS_PER_METRE).min(MAX_TRAVEL);
            (end - (t - PUSH_SECONDS) * RESET_SPEED).max(START_X)
        }
    }
}

impl Visualization for ConstantForce {
    const KIND: VisualKind = VisualKind::Force;

    fn initial() -> Self {
        Self::new(2.0, 10.0)
    }

    fn rerolled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mass = round_tenth(rng.gen_range(1.0..5.0));
        let force = round_tenth(rng.gen_range(5.0..20.0));
        Self::new(mass, force)
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
        let x = self.block_x() as f32;
        let size = 30.0 + self.mass as f32 * 10.0;
        let arrow_y = GROUND_Y - size / 2.0;

        let mut frame = Frame::new();
        frame
            .title("Newton's Second Law: F = ma")
            .line(Vec2::new(100.0, GROUND_Y), Vec2::new(500.0, GROUND_Y), GREEN, 3.0)
            .rect(
                Vec2::new(x - size / 2.0, GROUND_Y - size),
                Vec2::new(x + size / 2.0, GROUND_Y),
                BLUE,
            )
            .arrow(
                Vec2::new(x, arrow_y),
                Vec2::new(x + self.force as f32 * 5.0, arrow_y),
                RED,
                3.0,
            )
            .info(
                400.0,
                format!(
                    "Mass: {:.1} kg | Force: {:.1} N | Acceleration: {:.2} m/s²",
                    self.mass,
                    self.force,
                    self.acceleration()
                ),
            );

        if self.is_resetting() {
            frame.info(430.0, "Resetting position...");
        } else {
            let t = self.cycle_position();
            frame.info(
                430.0,
                format!("Time: {:.2} s | Distance: {:.2} m", t, self.distance_at(t)),
            );
        }

        frame.hint(470.0, "Click to change force and mass");
        frame.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TICK_SECONDS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(elapsed: f64) -> ConstantForce {
        ConstantForce {
            elapsed,
            ..ConstantForce::initial()
        }
    }

    #[test]
    fn defaults() {
        let f = ConstantForce::initial();
        assert_eq!(f.mass, 2.0);
        assert_eq!(f.force, 10.0);
        assert_eq!(f.acceleration(), 5.0);
    }

    #[test]
    fn accelerates_then_resets() {
        assert_eq!(at(0.0).block_x(), 100.0);
        // 0.5 * 5 * 2² = 10 m → 100 px
        assert!((at(2.0).block_x() - 200.0).abs() < 1e-9);
        // Capped at the far end of the track
        assert_eq!(at(5.0).block_x(), 500.0);
        assert!(at(5.25).is_resetting());
        assert!((at(5.25).block_x() - 300.0).abs() < 1e-9);
        assert_eq!(at(5.9).block_x(), 100.0);
        // Next cycle starts from rest again
        assert!((at(6.0 + 2.0).block_x() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn never_emits_events() {
        let mut state = ConstantForce::initial();
        for _ in 0..400 {
            let next = state.advance(TICK_SECONDS);
            assert!(ConstantForce::events(&state, &next).is_empty());
            state = next;
        }
    }

    #[test]
    fn reroll_rounds_to_tenths() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let f = ConstantForce::rerolled(&mut rng);
            assert!((1.0..=5.0).contains(&f.mass));
            assert!((5.0..=20.0).contains(&f.force));
            assert!(((f.mass * 10.0).round() - f.mass * 10.0).abs() < 1e-9);
            assert!(((f.force * 10.0).round() - f.force * 10.0).abs() < 1e-9);
        }
    }
}
