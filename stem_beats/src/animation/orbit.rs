//! Uniform circular motion: F = mv²/r
//!
//! The orbit is split into eight equal sectors and a snare plays every time
//! the body moves into the next one.

use std::f64::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::render::{Frame, RenderCommand, BLUE, RED, YELLOW};
use super::{AnimationEvent, Visualization};
use crate::catalog::VisualKind;

pub const SECTORS: u64 = 8;

const CENTER: Vec2 = Vec2::new(300.0, 250.0);
const BASE_VELOCITY: f64 = 50.0;
const MASS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    /// Orbit radius (px)
    pub radius: f64,
    /// Multiplier on the base velocity
    pub speed: f64,
    pub elapsed: f64,
    /// Sector boundaries crossed since time zero
    pub sectors_crossed: u64,
}

impl Orbit {
    pub fn new(radius: f64, speed: f64) -> Self {
        Self {
            radius,
            speed,
            elapsed: 0.0,
            sectors_crossed: 0,
        }
    }

    pub fn velocity(&self) -> f64 {
        BASE_VELOCITY * self.speed
    }

    /// T = 2πr/v
    pub fn period(&self) -> f64 {
        TAU * self.radius / self.velocity()
    }

    pub fn angle(&self) -> f64 {
        (self.elapsed % self.period()) / self.period() * TAU
    }

    pub fn centripetal_force(&self) -> f64 {
        MASS * self.velocity().powi(2) / self.radius
    }

    /// Index (0..8) of the sector the body is in
    pub fn sector(&self) -> u8 {
        (self.sectors_crossed % SECTORS) as u8
    }

    fn sector_count(&self) -> u64 {
        let sector_time = self.period() / SECTORS as f64;
        (self.elapsed / sector_time).floor() as u64
    }

    pub fn body_position(&self) -> Vec2 {
        let angle = self.angle() as f32;
        let radius = self.radius as f32;
        CENTER + Vec2::new(radius * angle.cos(), radius * angle.sin())
    }
}

impl Visualization for Orbit {
    const KIND: VisualKind = VisualKind::Orbit;

    fn initial() -> Self {
        Self::new(150.0, 1.0)
    }

    fn rerolled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let radius: u32 = rng.gen_range(80..200);
        let speed = (rng.gen_range(0.5..2.0_f64) * 10.0).round() / 10.0;
        Self::new(f64::from(radius), speed)
    }

    fn elapsed(&self) -> f64 {
        self.elapsed
    }

    fn advance(&self, dt: f64) -> Self {
        let mut next = Self {
            elapsed: self.elapsed + dt,
            ..*self
        };
        next.sectors_crossed = next.sector_count();
        next
    }

    fn events(prev: &Self, next: &Self) -> Vec<AnimationEvent> {
        (prev.sectors_crossed + 1..=next.sectors_crossed)
            .map(|crossed| AnimationEvent::SectorCrossed {
                sector: (crossed % SECTORS) as u8,
            })
            .collect()
    }

    fn render(&self) -> Vec<RenderCommand> {
        let body = self.body_position();
        let force = self.centripetal_force();
        let to_center = (CENTER - body).normalize_or_zero();
        let vector_end = body + to_center * force.min(30.0) as f32;

        let mut frame = Frame::new();
        frame
            .title("Centripetal Force: F = mv²/r")
            .disc(CENTER, 20.0, YELLOW)
            .ring(CENTER, self.radius as f32, BLUE, true)
            .disc(body, 10.0, BLUE)
            .arrow(body, vector_end, RED, 2.0)
            .info(
                420.0,
                format!(
                    "Mass: {:.1} kg | Velocity: {:.1} m/s | Radius: {:.1} m",
                    MASS,
                    self.velocity(),
                    self.radius / 100.0
                ),
            )
            .info(
                450.0,
                format!(
                    "Centripetal Force: {:.2} N | Period: {:.2} seconds",
                    force,
                    self.period()
                ),
            )
            .hint(
                480.0,
                format!(
                    "Sound: Snare beat on each 1/8 of the orbit (sector {})",
                    self.sector() + 1
                ),
            )
            .hint(510.0, "Click to change orbit radius and speed");
        frame.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TICK_SECONDS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sectors_over(orbit: Orbit, revolutions: f64) -> Vec<u8> {
        let mut state = orbit;
        let ticks = (revolutions * orbit.period() / TICK_SECONDS).ceil() as usize;
        let mut sectors = Vec::new();
        for _ in 0..ticks {
            let next = state.advance(TICK_SECONDS);
            for event in Orbit::events(&state, &next) {
                match event {
                    AnimationEvent::SectorCrossed { sector } => sectors.push(sector),
                    other => panic!("unexpected {other:?}"),
                }
            }
            state = next;
        }
        sectors
    }

    #[test]
    fn eight_events_per_revolution_for_any_orbit() {
        for (radius, speed) in [(80.0, 0.5), (150.0, 1.0), (199.0, 2.0), (123.0, 1.3)] {
            let sectors = sectors_over(Orbit::new(radius, speed), 3.0);
            assert_eq!(sectors.len(), 24, "radius {radius} speed {speed}");
        }
    }

    #[test]
    fn sectors_come_in_order() {
        let sectors = sectors_over(Orbit::initial(), 2.0);
        let expected: Vec<u8> = (1..=16).map(|n| (n % 8) as u8).collect();
        assert_eq!(sectors, expected);
    }

    #[test]
    fn large_step_reports_every_boundary() {
        let start = Orbit::initial();
        let next = start.advance(start.period() / 2.0 + 0.01);
        assert_eq!(Orbit::events(&start, &next).len(), 4);
    }

    #[test]
    fn centripetal_force_and_period() {
        let orbit = Orbit::initial();
        assert!((orbit.centripetal_force() - 2500.0 / 150.0).abs() < 1e-12);
        assert!((orbit.period() - TAU * 3.0).abs() < 1e-12);
    }

    #[test]
    fn reroll_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..200 {
            let o = Orbit::rerolled(&mut rng);
            assert!((80.0..200.0).contains(&o.radius));
            assert!((0.5..=2.0).contains(&o.speed));
            assert_eq!(o.sectors_crossed, 0);
        }
    }
}
