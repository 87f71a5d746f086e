use std::sync::Arc;

use egui::{Context as EguiContext, viewport::ViewportId};
use egui_wgpu::{
    Renderer as EguiWgpuRenderer, ScreenDescriptor,
    wgpu::{
        Color, CommandEncoderDescriptor, Device, DeviceDescriptor, Features, Instance,
        InstanceDescriptor, Limits, LoadOp, MemoryHints, Operations, PowerPreference, PresentMode,
        Queue, RenderPassColorAttachment, RenderPassDescriptor, RequestAdapterOptions, StoreOp,
        Surface, SurfaceConfiguration, SurfaceError, TextureUsages, TextureViewDescriptor, Trace,
    },
};
use egui_winit::State as EguiWinitState;
use winit::{dpi::PhysicalSize, event::WindowEvent, window::Window};

pub mod ui;

#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("failed to create drawing surface: {0}")]
    Surface(String),
    #[error("no suitable graphics adapter: {0}")]
    Adapter(String),
    #[error("failed to open graphics device: {0}")]
    Device(String),
    #[error("surface reports no supported formats")]
    NoFormat,
}

/// egui on top of a wgpu swapchain for one winit window.
pub struct Renderer {
    egui_context: EguiContext,
    egui_state: EguiWinitState,
    egui_renderer: EguiWgpuRenderer,
    surface: Surface<'static>,
    device: Device,
    queue: Queue,
    surface_config: SurfaceConfiguration,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, RendererError> {
        let egui_context = EguiContext::default();

        let egui_state = EguiWinitState::new(
            egui_context.clone(),
            ViewportId::ROOT,
            &*window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let instance = Instance::new(&InstanceDescriptor::default());

        let size = window.inner_size();
        let surface = instance
            .create_surface(window)
            .map_err(|e| RendererError::Surface(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&RequestAdapterOptions {
            power_preference: PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .map_err(|e| RendererError::Adapter(e.to_string()))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&DeviceDescriptor {
            label: Some("device"),
            required_features: Features::empty(),
            required_limits: Limits::default(),
            memory_hints: MemoryHints::Performance,
            trace: Trace::default(),
        }))
        .map_err(|e| RendererError::Device(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(RendererError::NoFormat)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .ok_or(RendererError::NoFormat)?;

        let config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 0,
        };
        surface.configure(&device, &config);
        log::debug!(
            "renderer ready: {}x{} {:?}",
            config.width,
            config.height,
            format
        );

        let egui_renderer = EguiWgpuRenderer::new(&device, format, None, 1, true);

        Ok(Self {
            egui_context,
            egui_state,
            egui_renderer,
            surface,
            device,
            queue,
            surface_config: config,
        })
    }

    /// Feeds a window event to egui; returns whether it wants a redraw.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.egui_state.on_window_event(window, event).repaint
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.surface_config.width = new_size.width.max(1);
        self.surface_config.height = new_size.height.max(1);
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Runs one egui pass and presents it. Returns `true` when egui asks
    /// for another frame right away (animations, popups opening).
    pub fn render<F: FnOnce(&EguiContext)>(&mut self, window: &Window, build_ui: F) -> bool {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(x) => x,
            Err(SurfaceError::Lost) => {
                // Reconfigure (common after display changes)
                self.surface.configure(&self.device, &self.surface_config);
                return true;
            }
            Err(SurfaceError::Outdated) => return false, // minimized / moved
            Err(e) => {
                log::error!("surface error: {e:?}");
                return false;
            }
        };
        let surface_view = surface_texture
            .texture
            .create_view(&TextureViewDescriptor::default());

        let raw_input = self.egui_state.take_egui_input(window);
        self.egui_context.begin_pass(raw_input);

        build_ui(&self.egui_context);

        let full_output = self.egui_context.end_pass();
        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let wants_repaint = full_output
            .viewport_output
            .get(&ViewportId::ROOT)
            .is_some_and(|v| v.repaint_delay.is_zero());

        let clipped = self
            .egui_context
            .tessellate(full_output.shapes, self.egui_context.pixels_per_point());

        for (id, delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("gfx encoder"),
            });

        let screen = ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: self.egui_context.pixels_per_point(),
        };

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &clipped,
            &screen,
        );

        {
            let render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("egui render_pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(Color::BLACK),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.egui_renderer
                .render(&mut render_pass.forget_lifetime(), &clipped, &screen);
        }

        for id in full_output.textures_delta.free {
            self.egui_renderer.free_texture(&id);
        }

        self.queue.submit(Some(encoder.finish()));
        surface_texture.present();

        wants_repaint
    }
}
