//! Backend-agnostic drawing commands
//!
//! Visualizations describe each frame as a list of commands in a square
//! logical canvas (`CANVAS_SIZE` per side, y pointing down). The front end
//! scales them onto whatever surface it paints.

use glam::Vec2;

/// Opaque-by-default RGBA color
pub type Color = [u8; 4];

/// Build an opaque color from a 0xRRGGBB literal
pub const fn rgb(hex: u32) -> Color {
    [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255]
}

pub const BACKGROUND: Color = rgb(0x0f0c29);
pub const TEXT: Color = rgb(0xe2e2e2);
pub const ACCENT: Color = rgb(0x9b59b6);
pub const RED: Color = rgb(0xe74c3c);
pub const BLUE: Color = rgb(0x3498db);
pub const GREEN: Color = rgb(0x2ecc71);
pub const YELLOW: Color = rgb(0xf1c40f);
pub const WHITE: Color = rgb(0xffffff);
pub const GRAY: Color = rgb(0x808080);

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
        dashed: bool,
    },
    Polyline {
        points: Vec<Vec2>,
        color: Color,
        width: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Color>,
        dashed: bool,
    },
    Rect {
        min: Vec2,
        max: Vec2,
        fill: Option<Color>,
        stroke: Option<Color>,
    },
    Arrow {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    Text {
        position: Vec2,
        text: String,
        color: Color,
        size: f32,
    },
}

/// Small builder so the visualizations read like a sequence of draw calls
#[derive(Debug, Default)]
pub struct Frame {
    commands: Vec<RenderCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) -> &mut Self {
        self.commands.push(RenderCommand::Line {
            from,
            to,
            color,
            width,
            dashed: false,
        });
        self
    }

    pub fn dashed_line(&mut self, from: Vec2, to: Vec2, color: Color) -> &mut Self {
        self.commands.push(RenderCommand::Line {
            from,
            to,
            color,
            width: 1.0,
            dashed: true,
        });
        self
    }

    pub fn polyline(&mut self, points: Vec<Vec2>, color: Color, width: f32) -> &mut Self {
        self.commands.push(RenderCommand::Polyline {
            points,
            color,
            width,
        });
        self
    }

    pub fn disc(&mut self, center: Vec2, radius: f32, fill: Color) -> &mut Self {
        self.commands.push(RenderCommand::Circle {
            center,
            radius,
            fill: Some(fill),
            stroke: None,
            dashed: false,
        });
        self
    }

    pub fn outlined_disc(&mut self, center: Vec2, radius: f32, fill: Color, stroke: Color) -> &mut Self {
        self.commands.push(RenderCommand::Circle {
            center,
            radius,
            fill: Some(fill),
            stroke: Some(stroke),
            dashed: false,
        });
        self
    }

    pub fn ring(&mut self, center: Vec2, radius: f32, stroke: Color, dashed: bool) -> &mut Self {
        self.commands.push(RenderCommand::Circle {
            center,
            radius,
            fill: None,
            stroke: Some(stroke),
            dashed,
        });
        self
    }

    pub fn rect(&mut self, min: Vec2, max: Vec2, fill: Color) -> &mut Self {
        self.commands.push(RenderCommand::Rect {
            min,
            max,
            fill: Some(fill),
            stroke: None,
        });
        self
    }

    pub fn outline(&mut self, min: Vec2, max: Vec2, stroke: Color) -> &mut Self {
        self.commands.push(RenderCommand::Rect {
            min,
            max,
            fill: None,
            stroke: Some(stroke),
        });
        self
    }

    pub fn arrow(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) -> &mut Self {
        self.commands.push(RenderCommand::Arrow {
            from,
            to,
            color,
            width,
        });
        self
    }

    pub fn text(&mut self, x: f32, y: f32, text: impl Into<String>, color: Color, size: f32) -> &mut Self {
        self.commands.push(RenderCommand::Text {
            position: Vec2::new(x, y),
            text: text.into(),
            color,
            size,
        });
        self
    }

    /// Bold heading centered at the top of the canvas
    pub fn title(&mut self, text: impl Into<String>) -> &mut Self {
        self.text(300.0, 30.0, text, TEXT, 16.0)
    }

    /// Informational line
    pub fn info(&mut self, y: f32, text: impl Into<String>) -> &mut Self {
        self.text(300.0, y, text, TEXT, 12.0)
    }

    /// Hint line in the accent color
    pub fn hint(&mut self, y: f32, text: impl Into<String>) -> &mut Self {
        self.text(300.0, y, text, ACCENT, 12.0)
    }

    pub fn finish(self) -> Vec<RenderCommand> {
        self.commands
    }
}

/// Frame shown before any formula has been discovered
pub fn placeholder() -> Vec<RenderCommand> {
    let mut frame = Frame::new();
    frame
        .text(300.0, 250.0, "Enter a physics formula to see visualization", TEXT, 16.0)
        .text(300.0, 300.0, "Check the Help button for formula hints", ACCENT, 14.0);
    frame.finish()
}
