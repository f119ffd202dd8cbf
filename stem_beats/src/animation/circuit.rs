//! Ohm's law: V = IR
//!
//! A battery, a resistor and a lamp on one loop of wire. Current markers
//! travel around the loop; the lamp and the markers brighten with I = V/R.

use glam::Vec2;
use rand::Rng;

use super::render::{Color, Frame, RenderCommand, ACCENT, BLUE, GRAY, TEXT, WHITE, YELLOW};
use super::Visualization;
use crate::catalog::VisualKind;

/// Markers drawn along the wire
pub const MARKERS: usize = 12;

/// Trips around the loop per second
pub const FLOW_RATE: f64 = 0.4;

const BATTERY: Vec2 = Vec2::new(150.0, 250.0);
const BATTERY_SIZE: Vec2 = Vec2::new(40.0, 80.0);
const RESISTOR: Vec2 = Vec2::new(300.0, 150.0);
const RESISTOR_SIZE: Vec2 = Vec2::new(60.0, 30.0);
const LAMP: Vec2 = Vec2::new(450.0, 250.0);
const LAMP_RADIUS: f32 = 30.0;
const RETURN_DROP: f32 = 20.0;

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Point on the wire loop for a cycle fraction. Fractions wrap, so 1.25 is
/// the same point as 0.25.
pub fn marker_position(fraction: f64) -> Vec2 {
    let fraction = fraction.rem_euclid(1.0);
    let segment = (fraction * 4.0).floor().min(3.0);
    let progress = (fraction * 4.0 - segment) as f32;

    let resistor_left = RESISTOR.x - RESISTOR_SIZE.x / 2.0;
    let resistor_right = RESISTOR.x + RESISTOR_SIZE.x / 2.0;
    let return_y = LAMP.y + LAMP_RADIUS + RETURN_DROP;

    match segment as u8 {
        // Battery up to the resistor
        0 => Vec2::new(BATTERY.x + progress * (resistor_left - BATTERY.x), RESISTOR.y),
        // Resistor over to the lamp
        1 => Vec2::new(resistor_right + progress * (LAMP.x - resistor_right), RESISTOR.y),
        // Down from the lamp
        2 => Vec2::new(LAMP.x, LAMP.y + LAMP_RADIUS + progress * RETURN_DROP),
        // Back along the bottom to the battery
        _ => Vec2::new(LAMP.x - progress * (LAMP.x - BATTERY.x), return_y),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circuit {
    /// Battery voltage (V)
    pub voltage: f64,
    /// Resistance (Ω)
    pub resistance: f64,
    pub elapsed: f64,
}

impl Circuit {
    pub fn new(voltage: f64, resistance: f64) -> Self {
        Self {
            voltage,
            resistance,
            elapsed: 0.0,
        }
    }

    /// I = V/R
    pub fn current(&self) -> f64 {
        self.voltage / self.resistance
    }

    /// Lamp and marker intensity, 0..=255
    pub fn brightness(&self) -> u8 {
        (self.current() * 25.0).min(255.0) as u8
    }

    /// Position of the whole marker train along the loop
    pub fn flow_phase(&self) -> f64 {
        self.elapsed * FLOW_RATE
    }

    pub fn marker_positions(&self) -> Vec<Vec2> {
        (0..MARKERS)
            .map(|i| marker_position(self.flow_phase() + i as f64 / MARKERS as f64))
            .collect()
    }
}

impl Visualization for Circuit {
    const KIND: VisualKind = VisualKind::Circuit;

    fn initial() -> Self {
        Self::new(10.0, 5.0)
    }

    fn rerolled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let voltage = round_tenth(rng.gen_range(5.0..15.0));
        let resistance = round_tenth(rng.gen_range(1.0..10.0));
        Self::new(voltage, resistance)
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
        let brightness = self.brightness();
        let lamp: Color = [brightness, brightness, brightness, 255];
        let filament = if brightness > 100 { YELLOW } else { GRAY };
        let marker: Color = [brightness, 255, brightness, 255];
        let marker_size = 3.0 + self.current() as f32 / 3.0;

        let battery_top = BATTERY.y - BATTERY_SIZE.y / 2.0;
        let battery_bottom = BATTERY.y + BATTERY_SIZE.y / 2.0;
        let return_y = LAMP.y + LAMP_RADIUS + RETURN_DROP;
        let wire = TEXT;

        let mut frame = Frame::new();
        frame
            .title("Ohm's Law: V = IR")
            // Battery with its terminals
            .rect(BATTERY - BATTERY_SIZE / 2.0, BATTERY + BATTERY_SIZE / 2.0, BLUE)
            .line(
                Vec2::new(BATTERY.x, battery_top - 10.0),
                Vec2::new(BATTERY.x, battery_top),
                WHITE,
                3.0,
            )
            .line(
                Vec2::new(BATTERY.x - 10.0, battery_bottom),
                Vec2::new(BATTERY.x + 10.0, battery_bottom),
                WHITE,
                3.0,
            )
            .text(BATTERY.x, BATTERY.y, format!("{:.1}V", self.voltage), WHITE, 12.0)
            .rect(RESISTOR - RESISTOR_SIZE / 2.0, RESISTOR + RESISTOR_SIZE / 2.0, ACCENT)
            .text(RESISTOR.x, RESISTOR.y, format!("{:.1}Ω", self.resistance), WHITE, 12.0)
            .outlined_disc(LAMP, LAMP_RADIUS, lamp, WHITE)
            .line(
                Vec2::new(LAMP.x - LAMP_RADIUS / 2.0, LAMP.y),
                Vec2::new(LAMP.x + LAMP_RADIUS / 2.0, LAMP.y),
                filament,
                2.0,
            )
            .polyline(
                vec![
                    Vec2::new(BATTERY.x, battery_top),
                    Vec2::new(BATTERY.x, RESISTOR.y),
                    Vec2::new(RESISTOR.x - RESISTOR_SIZE.x / 2.0, RESISTOR.y),
                ],
                wire,
                2.0,
            )
            .polyline(
                vec![
                    Vec2::new(RESISTOR.x + RESISTOR_SIZE.x / 2.0, RESISTOR.y),
                    Vec2::new(LAMP.x, RESISTOR.y),
                    Vec2::new(LAMP.x, LAMP.y - LAMP_RADIUS),
                ],
                wire,
                2.0,
            )
            .polyline(
                vec![
                    Vec2::new(LAMP.x, LAMP.y + LAMP_RADIUS),
                    Vec2::new(LAMP.x, return_y),
                    Vec2::new(BATTERY.x, return_y),
                    Vec2::new(BATTERY.x, battery_bottom),
                ],
                wire,
                2.0,
            );

        for position in self.marker_positions() {
            frame.disc(position, marker_size, marker);
        }

        frame
            .info(
                420.0,
                format!(
                    "Voltage: {:.1} V | Resistance: {:.1} Ω | Current: {:.2} A",
                    self.voltage,
                    self.resistance,
                    self.current()
                ),
            )
            .hint(450.0, "No sound for this visualization")
            .hint(480.0, "Click to change voltage and resistance");
        frame.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn current_from_ohms_law() {
        let c = Circuit::initial();
        assert_eq!(c.current(), 2.0);
        assert_eq!(c.brightness(), 50);
        assert_eq!(Circuit::new(15.0, 1.0).brightness(), 255);
    }

    #[test]
    fn markers_follow_the_wire() {
        assert_eq!(marker_position(0.0), Vec2::new(150.0, 150.0));
        assert_eq!(marker_position(0.25), Vec2::new(330.0, 150.0));
        assert_eq!(marker_position(0.5), Vec2::new(450.0, 280.0));
        assert_eq!(marker_position(0.75), Vec2::new(450.0, 300.0));
        assert_eq!(marker_position(1.25), marker_position(0.25));
    }

    #[test]
    fn marker_train_moves_with_time() {
        let start = Circuit::initial();
        let later = start.advance(0.5);
        assert_eq!(start.marker_positions().len(), MARKERS);
        assert_ne!(start.marker_positions(), later.marker_positions());
        // A full trip brings every marker back
        let offset = start.advance(0.1);
        let full_trip = offset.advance(1.0 / FLOW_RATE);
        for (a, b) in offset.marker_positions().iter().zip(full_trip.marker_positions()) {
            assert!(a.distance(b) < 1e-3);
        }
    }

    #[test]
    fn frame_draws_every_marker() {
        let markers = Circuit::initial()
            .render()
            .iter()
            .filter(|c| matches!(c, RenderCommand::Circle { fill: Some(color), .. } if color[1] == 255 && color[0] == 50))
            .count();
        assert_eq!(markers, MARKERS);
    }

    #[test]
    fn reroll_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..200 {
            let c = Circuit::rerolled(&mut rng);
            assert!((5.0..=15.0).contains(&c.voltage));
            assert!((1.0..=10.0).contains(&c.resistance));
        }
    }
}
