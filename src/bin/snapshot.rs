//! Headless render to PNG, for visual regression checks of the tile layout.
//!
//! Usage: cargo run --bin snapshot [CONFIG] [OUTPUT_PNG] [KEY...]
//! Defaults: config "data/tileview.ron", output "snapshot.png". KEY tokens are
//! replayed in order before the frame is captured, e.g. `left left + r`.
//! Without a seed in the config the world is seeded with 0.

use std::cell::RefCell;
use std::process::ExitCode;

use tileview::config::{DEFAULT_CONFIG_PATH, load_config};
use tileview::control::{self, ScriptedEvents};
use tileview::input::{InputEvent, InputHandler, Key, KeyBindings};
use tileview::rng::create_rng;
use tileview::surface::FrameBuffer;
use tileview::view::View;
use tileview::world::World;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    let config_path = args.get(1).map_or(DEFAULT_CONFIG_PATH, String::as_str);
    let output_path = args.get(2).map_or("snapshot.png", String::as_str);
    let keys: Vec<InputEvent> = args
        .iter()
        .skip(3)
        .map(|t| InputEvent::KeyDown(Key::from_name(t)))
        .collect();

    let config = load_config(config_path);
    let mut rng = create_rng(config.seed.unwrap_or(0));

    let world = match World::init(config.world_width, config.world_height, &mut rng) {
        Ok(w) => RefCell::new(w),
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let mut view = View::attach(
        &world,
        config.viewport_width,
        config.viewport_height,
        config.edge,
        config.start_x,
        config.start_y,
    )
    .with_background(config.background)
    .with_render_mode(config.render_mode());

    let mut fb = FrameBuffer::new(config.viewport_width, config.viewport_height);
    let handler = InputHandler::new(KeyBindings::defaults(), config.pan_step);
    let mut events = ScriptedEvents::new(keys);
    let summary = control::run(&mut events, &handler, &mut view, &mut fb, &mut rng);

    let Some(image) = image::RgbImage::from_raw(fb.width(), fb.height(), fb.to_rgb_bytes()) else {
        log::error!("frame buffer size mismatch");
        return ExitCode::FAILURE;
    };
    if let Err(e) = image.save(output_path) {
        log::error!("failed to write {output_path}: {e}");
        return ExitCode::FAILURE;
    }

    println!(
        "Wrote {output_path} ({}x{}, edge {}, offset {:?}, {} renders, {} diagnostics)",
        fb.width(),
        fb.height(),
        view.edge(),
        view.offset(),
        summary.renders,
        summary.diagnostics
    );
    ExitCode::SUCCESS
}
