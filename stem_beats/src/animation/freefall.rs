//! Free fall: t = √(2h/g)
//!
//! Each cycle drops the object from rest (drop = ½·g·t², clamped at the
//! ground) and then leaves it on the ground for a short reset phase. A drum
//! hit plays when it lands.

use glam::Vec2;
use rand::Rng;

use super::render::{Frame, RenderCommand, BLUE, GREEN, RED};
use super::{AnimationEvent, Visualization};
use crate::catalog::VisualKind;
use crate::constants::G;

/// Time spent on the ground before the next drop
pub const RESET_SECONDS: f64 = 0.5;

const TOP_Y: f32 = 80.0;
const PIXELS_PER_METRE: f64 = 100.0;
const BALL_X: f32 = 290.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeFall {
    /// Drop height (m)
    pub height: f64,
    pub elapsed: f64,
    /// Whether the object was on the ground at `elapsed`
    pub grounded: bool,
}

impl FreeFall {
    pub fn with_height(height: f64) -> Self {
        Self {
            height,
            elapsed: 0.0,
            grounded: false,
        }
    }

    /// Time to fall the full height
    pub fn fall_time(&self) -> f64 {
        (2.0 * self.height / G).sqrt()
    }

    /// Fall plus reset
    pub fn cycle_time(&self) -> f64 {
        self.fall_time() + RESET_SECONDS
    }

    /// Time since the current drop started
    pub fn cycle_position(&self) -> f64 {
        self.elapsed % self.cycle_time()
    }

    /// Distance fallen so far in this cycle, clamped at the ground
    pub fn drop_distance(&self) -> f64 {
        let t = self.cycle_position();
        if t < self.fall_time() {
            (0.5 * G * t * t).min(self.height)
        } else {
            self.height
        }
    }

    fn on_ground(&self) -> bool {
        self.drop_distance() >= self.height
    }
}

impl Visualization for FreeFall {
    const KIND: VisualKind = VisualKind::FreeFall;

    fn initial() -> Self {
        Self::with_height(4.0)
    }

    fn rerolled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let centimetres: u32 = rng.gen_range(200..400);
        Self::with_height(f64::from(centimetres) / 100.0)
    }

    fn elapsed(&self) -> f64 {
        self.elapsed
    }

    fn advance(&self, dt: f64) -> Self {
        let mut next = Self {
            elapsed: self.elapsed + dt,
            ..*self
        };
        next.grounded = next.on_ground();
        next
    }

    fn events(prev: &Self, next: &Self) -> Vec<AnimationEvent> {
        if next.grounded && !prev.grounded {
            vec![AnimationEvent::GroundContact]
        } else {
            Vec::new()
        }
    }

    fn render(&self) -> Vec<RenderCommand> {
        let ground_y = TOP_Y + (self.height * PIXELS_PER_METRE) as f32;
        let ball_y = TOP_Y + (self.drop_distance() * PIXELS_PER_METRE) as f32;

        let mut frame = Frame::new();
        frame
            .title("Free Fall Time: t = √(2h/g)")
            .outline(Vec2::new(160.0, TOP_Y), Vec2::new(440.0, ground_y), BLUE)
            .line(Vec2::new(100.0, ground_y), Vec2::new(500.0, ground_y), GREEN, 3.0)
            .disc(Vec2::new(BALL_X, ball_y), 10.0, RED)
            .info(
                500.0,
                format!(
                    "Fall time: {:.2} seconds | Current cycle: {:.2}/{:.2} seconds",
                    self.fall_time(),
                    self.cycle_position(),
                    self.cycle_time()
                ),
            )
            .info(520.0, format!("Height: {:.2} meters", self.height))
            .hint(540.0, "Sound: Drum when object hits ground")
            .hint(570.0, "Click to change drop height");
        frame.finish()
    }
}
