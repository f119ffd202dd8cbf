//! egui overlay drawn straight onto the window surface

use crate::GraphicsContext;
use winit::event::WindowEvent;

/// egui context plus its winit input state and wgpu renderer
pub struct EguiLayer {
    pub ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl EguiLayer {
    pub fn new(gfx: &GraphicsContext) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            &gfx.window,
            Some(gfx.window.scale_factor() as f32),
            None,
        );
        let renderer = egui_wgpu::Renderer::new(&gfx.device, gfx.config.format, None, 1);

        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Feed a window event to egui. Returns true when egui consumed it.
    pub fn on_window_event(&mut self, gfx: &GraphicsContext, event: &WindowEvent) -> bool {
        self.state.on_window_event(&gfx.window, event).consumed
    }

    /// Build the UI with `build_ui` and paint it over a cleared frame
    pub fn frame<F>(
        &mut self,
        gfx: &GraphicsContext,
        clear: wgpu::Color,
        build_ui: F,
    ) -> Result<(), wgpu::SurfaceError>
    where
        F: FnMut(&egui::Context),
    {
        let output = gfx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = self.state.take_egui_input(&gfx.window);
        let full_output = self.ctx.run(raw_input, build_ui);

        self.state
            .handle_platform_output(&gfx.window, full_output.platform_output);
        let tris = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(&gfx.device, &gfx.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gfx.size.width, gfx.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Egui Encoder"),
            });

        self.renderer.update_buffers(
            &gfx.device,
            &gfx.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }

        gfx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
