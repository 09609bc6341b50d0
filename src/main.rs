use std::cell::RefCell;
use std::process::ExitCode;
use std::sync::Arc;

use rand::rngs::StdRng;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use tileview::config::{Config, DEFAULT_CONFIG_PATH, load_config};
use tileview::error::Error;
use tileview::gpu::GpuSurface;
use tileview::input::{InputEvent, InputHandler, KeyBindings, Outcome};
use tileview::rng::{clock_seed, create_rng};
use tileview::surface::Surface;
use tileview::view::View;
use tileview::world::World;

struct App<'w> {
    gpu: Option<GpuSurface>,
    view: View<'w>,
    handler: InputHandler,
    rng: StdRng,
    config: Config,
    fatal: Option<Error>,
}

impl App<'_> {
    /// Feed one event through the input handler. Returns false on quit.
    fn dispatch(&mut self, event: InputEvent) -> bool {
        let Some(gpu) = self.gpu.as_mut() else {
            return true;
        };
        match self
            .handler
            .handle(&event, &mut self.view, gpu, &mut self.rng)
        {
            Ok(Outcome::Rendered(stats)) => {
                if stats.failed > 0 {
                    log::warn!("{} tiles failed to draw", stats.failed);
                }
                true
            }
            Ok(Outcome::Quit) => false,
            Err(e) => {
                log::warn!("{e}");
                true
            }
        }
    }

    fn redraw(&mut self) {
        if let Some(gpu) = self.gpu.as_mut() {
            let stats = self.view.render(gpu);
            gpu.present();
            log::trace!("redraw: {} tiles", stats.drawn);
        }
    }
}

impl ApplicationHandler for App<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_resizable(false)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.viewport_width,
                self.config.viewport_height,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fatal = Some(Error::Platform(format!("create window: {e}")));
                event_loop.exit();
                return;
            }
        };

        match GpuSurface::new(window) {
            Ok(gpu) => {
                gpu.window().request_redraw();
                self.gpu = Some(gpu);
            }
            Err(e) => {
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            other => {
                if let Some(input) = InputEvent::from_window_event(&other) {
                    if !self.dispatch(input) {
                        event_loop.exit();
                    }
                }
            }
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.into());
    let config = load_config(&path);

    let seed = config.seed.unwrap_or_else(clock_seed);
    log::info!("seed {seed}");
    let mut rng = create_rng(seed);

    let world = match World::init(config.world_width, config.world_height, &mut rng) {
        Ok(w) => RefCell::new(w),
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let view = View::attach(
        &world,
        config.viewport_width,
        config.viewport_height,
        config.edge,
        config.start_x,
        config.start_y,
    )
    .with_background(config.background)
    .with_render_mode(config.render_mode());
    log::info!(
        "view {}x{} edge {} at ({}, {})",
        config.viewport_width,
        config.viewport_height,
        view.edge(),
        config.start_x,
        config.start_y
    );

    let event_loop = match EventLoop::new() {
        Ok(l) => l,
        Err(e) => {
            log::error!("create event loop: {e}");
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App {
        gpu: None,
        view,
        handler: InputHandler::new(KeyBindings::defaults(), config.pan_step),
        rng,
        config,
        fatal: None,
    };

    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("event loop: {e}");
        return ExitCode::FAILURE;
    }
    if let Some(e) = app.fatal.take() {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
