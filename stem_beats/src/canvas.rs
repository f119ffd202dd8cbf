//! Paints the session's render commands into the central egui panel

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Shape, Stroke};
use stem_beats::animation::render::{Color, RenderCommand, BACKGROUND};
use stem_beats::constants::CANVAS_SIZE;
use stem_beats::Session;

const DASH: f32 = 6.0;
const GAP: f32 = 4.0;
const CIRCLE_SEGMENTS: usize = 72;

fn color32(color: Color) -> Color32 {
    let [r, g, b, a] = color;
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Maps the square logical canvas onto a screen rect
struct Viewport {
    origin: Pos2,
    scale: f32,
}

impl Viewport {
    fn fit(rect: Rect) -> Self {
        let side = rect.width().min(rect.height());
        let origin = rect.center() - egui::vec2(side, side) / 2.0;
        Self {
            origin,
            scale: side / CANVAS_SIZE,
        }
    }

    fn pos(&self, point: glam::Vec2) -> Pos2 {
        self.origin + egui::vec2(point.x, point.y) * self.scale
    }

    fn rect(&self) -> Rect {
        Rect::from_min_size(self.origin, egui::Vec2::splat(CANVAS_SIZE * self.scale))
    }
}

/// Central panel with the visualization. A click rerolls it.
pub fn draw_canvas(ctx: &egui::Context, session: &mut Session) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(color32(BACKGROUND)))
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click());
            let view = Viewport::fit(response.rect);
            painter.rect_filled(view.rect(), 0.0, color32(BACKGROUND));

            for command in session.frame() {
                paint(&painter, &view, command);
            }

            if response.clicked() {
                session.reroll();
            }
        });
}

fn paint(painter: &Painter, view: &Viewport, command: &RenderCommand) {
    match command {
        RenderCommand::Line {
            from,
            to,
            color,
            width,
            dashed,
        } => {
            let points = [view.pos(*from), view.pos(*to)];
            let stroke = Stroke::new(width * view.scale, color32(*color));
            if *dashed {
                painter.extend(Shape::dashed_line(&points, stroke, DASH, GAP));
            } else {
                painter.line_segment(points, stroke);
            }
        }
        RenderCommand::Polyline {
            points,
            color,
            width,
        } => {
            let points = points.iter().map(|p| view.pos(*p)).collect();
            painter.add(Shape::line(points, Stroke::new(width * view.scale, color32(*color))));
        }
        RenderCommand::Circle {
            center,
            radius,
            fill,
            stroke,
            dashed,
        } => {
            let center = view.pos(*center);
            let radius = radius * view.scale;
            if let Some(fill) = fill {
                painter.circle_filled(center, radius, color32(*fill));
            }
            if let Some(stroke) = stroke {
                let stroke = Stroke::new(1.5, color32(*stroke));
                if *dashed {
                    let outline: Vec<Pos2> = (0..=CIRCLE_SEGMENTS)
                        .map(|i| {
                            let angle = std::f32::consts::TAU * i as f32 / CIRCLE_SEGMENTS as f32;
                            center + egui::vec2(angle.cos(), angle.sin()) * radius
                        })
                        .collect();
                    painter.extend(Shape::dashed_line(&outline, stroke, DASH, GAP));
                } else {
                    painter.circle_stroke(center, radius, stroke);
                }
            }
        }
        RenderCommand::Rect {
            min,
            max,
            fill,
            stroke,
        } => {
            let rect = Rect::from_min_max(view.pos(*min), view.pos(*max));
            if let Some(fill) = fill {
                painter.rect_filled(rect, 0.0, color32(*fill));
            }
            if let Some(stroke) = stroke {
                painter.rect_stroke(rect, 0.0, Stroke::new(2.0, color32(*stroke)));
            }
        }
        RenderCommand::Arrow {
            from,
            to,
            color,
            width,
        } => {
            let start = view.pos(*from);
            painter.arrow(
                start,
                view.pos(*to) - start,
                Stroke::new(width * view.scale, color32(*color)),
            );
        }
        RenderCommand::Text {
            position,
            text,
            color,
            size,
        } => {
            painter.text(
                view.pos(*position),
                Align2::CENTER_CENTER,
                text,
                FontId::proportional(size * view.scale),
                color32(*color),
            );
        }
    }
}
