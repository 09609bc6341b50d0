use std::sync::Arc;

use winit::window::Window;

use crate::error::{Error, Result};
use crate::quad::QuadRenderer;
use crate::surface::Surface;
use crate::tile::rgb;

/// Convert sRGB component (0-1) to linear for use as wgpu clear color.
fn srgb_to_linear(s: f64) -> f64 {
    if s <= 0.04045 {
        s / 12.92
    } else {
        ((s + 0.055) / 1.055).powf(2.4)
    }
}

/// RGBA for a `0x??RRGGBB` color as written to the target. sRGB targets
/// encode on store, so their inputs are linearized first; other targets take
/// the channel bytes unchanged.
fn target_rgba(color: u32, srgb_target: bool) -> [f64; 4] {
    let channel = |c: u8| {
        let s = c as f64 / 255.0;
        if srgb_target { srgb_to_linear(s) } else { s }
    };
    let [r, g, b] = rgb(color);
    [channel(r), channel(g), channel(b), 1.0]
}

/// Window surface backed by wgpu. `clear` and `fill_rect` only record; the
/// frame is drawn in one render pass on `present`.
pub struct GpuSurface {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    window: Arc<Window>,
    quads: QuadRenderer,
    clear_color: wgpu::Color,
    srgb_target: bool,
}

impl GpuSurface {
    pub fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| Error::Platform(format!("create surface: {e}")))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| Error::Platform("no suitable GPU adapter".into()))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("tileview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            },
            None,
        ))
        .map_err(|e| Error::Platform(format!("request device: {e}")))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| Error::Platform("surface reports no formats".into()))?;
        let srgb_target = surface_format.is_srgb();
        if !srgb_target {
            log::warn!("no sRGB surface format, using {surface_format:?} without conversion");
        }
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let quads = QuadRenderer::new(&device, surface_format);
        log::info!(
            "gpu surface {}x{} format {:?}",
            config.width,
            config.height,
            surface_format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            window,
            quads,
            clear_color: wgpu::Color::BLACK,
            srgb_target,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }
}

impl Surface for GpuSurface {
    fn clear(&mut self, color: u32) {
        let [r, g, b, a] = target_rgba(color, self.srgb_target);
        self.clear_color = wgpu::Color { r, g, b, a };
        self.quads
            .begin_frame(&self.queue, self.config.width, self.config.height);
    }

    fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: u32) -> Result<()> {
        if w == 0 || h == 0 {
            return Err(Error::Draw {
                x,
                y,
                w,
                h,
                reason: "zero-area rectangle".into(),
            });
        }
        let c = target_rgba(color, self.srgb_target).map(|v| v as f32);
        self.quads
            .add_quad(x as f32, y as f32, w as f32, h as f32, c);
        Ok(())
    }

    fn present(&mut self) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory");
                return;
            }
            Err(e) => {
                log::warn!("surface error: {e:?}");
                return;
            }
        };

        let vertex_count = self.quads.flush(&self.queue, &self.device);

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tile_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            self.quads.render(&mut render_pass, vertex_count);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        output.present();
        log::trace!("presented {} quads", vertex_count / 6);
    }
}
