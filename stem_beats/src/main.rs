//! StemBeats - physics formula discovery with sound
//!
//! Type a formula into the sidebar to unlock its visualization:
//! - Pendulum period, free fall, Newton's second law
//! - Centripetal force, Ohm's law, simple harmonic motion
//!
//! Controls:
//! - Enter / Submit: check the typed formula
//! - Click the canvas: new random parameters
//! - Visualize / Play Sound: replay a discovered formula or loop its sound
//! - Volume and tempo sliders
//!
//! Sound clips are read from `assets/` or from `STEMBEATS_ASSET_DIR`.

mod canvas;
mod formula_panel;

use std::time::Instant;

use common::{EguiLayer, GraphicsContext};
use formula_panel::FormulaPanel;
use log::{error, info, warn};
use stem_beats::animation::render::BACKGROUND;
use stem_beats::audio::{slider_gain, AudioContext};
use stem_beats::{AppConfig, Session};
use winit::{
    event::{Event, WindowEvent},
    event_loop::ControlFlow,
};

struct App {
    ctx: GraphicsContext,
    egui: EguiLayer,
    session: Session,
    audio: Option<AudioContext>,
    panel: FormulaPanel,
    started: Instant,
}

impl App {
    fn new(ctx: GraphicsContext, config: &AppConfig) -> Result<Self, stem_beats::CatalogError> {
        let egui = EguiLayer::new(&ctx);

        let audio = match AudioContext::new(&config.asset_dir, slider_gain(config.volume)) {
            Ok(audio) => Some(audio),
            Err(err) => {
                warn!("Running without sound: {err}");
                None
            }
        };
        let available = audio
            .as_ref()
            .map(|audio| audio.bank().available())
            .unwrap_or_default();

        let session = Session::new(available, config)?;

        Ok(Self {
            ctx,
            egui,
            session,
            audio,
            panel: FormulaPanel::new(),
            started: Instant::now(),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
    }

    fn update(&mut self) {
        let now_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.session.advance(now_ms);
    }

    fn flush_audio(&mut self) {
        let commands = self.session.take_audio_commands();
        if let Some(audio) = &mut self.audio {
            for command in commands {
                audio.execute(command);
            }
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let Self {
            ctx,
            egui,
            session,
            panel,
            ..
        } = self;
        let [r, g, b, _] = BACKGROUND;
        let clear = wgpu::Color {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
            a: 1.0,
        };

        egui.frame(ctx, clear, |ui_ctx| {
            panel.show(ui_ctx, session);
            canvas::draw_canvas(ui_ctx, session);
        })
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.egui.on_window_event(&self.ctx, event)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    info!("StemBeats starting (assets in {})", config.asset_dir.display());

    let (ctx, event_loop) = match pollster::block_on(GraphicsContext::new(
        &config.title,
        config.window_width,
        config.window_height,
    )) {
        Ok(setup) => setup,
        Err(err) => {
            error!("Could not set up graphics: {err}");
            std::process::exit(1);
        }
    };

    let mut app = match App::new(ctx, &config) {
        Ok(app) => app,
        Err(err) => {
            error!("Formula catalog is invalid: {err}");
            std::process::exit(1);
        }
    };

    let result = event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { ref event, .. } => {
                let consumed = app.handle_window_event(event);

                if !consumed {
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Resized(size) => app.resize(*size),
                        WindowEvent::RedrawRequested => {
                            app.update();
                            match app.render() {
                                Ok(_) => {}
                                Err(wgpu::SurfaceError::Lost) => app.resize(app.ctx.size),
                                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                                Err(e) => warn!("Render error: {:?}", e),
                            }
                            app.flush_audio();
                        }
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                app.ctx.window.request_redraw();
            }
            _ => {}
        }
    });

    if let Err(err) = result {
        error!("Event loop error: {err}");
    }
}
