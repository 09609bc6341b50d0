use crate::surface::Surface;
use crate::view::View;

/// Which tiles a render pass draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Every tile of the world, every frame.
    #[default]
    Full,
    /// Skip tiles whose rectangle misses the viewport entirely.
    Culled,
}

/// Per-pass counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub drawn: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Pixel rectangle of the tile at `(x, y)`: origin `(x*edge + off_x, y*edge + off_y)`.
fn tile_origin(x: usize, y: usize, edge: u32, (off_x, off_y): (i64, i64)) -> (i64, i64) {
    let edge = edge as i64;
    (x as i64 * edge + off_x, y as i64 * edge + off_y)
}

fn misses_viewport(px: i64, py: i64, edge: u32, (vw, vh): (u32, u32)) -> bool {
    let edge = edge as i64;
    px + edge <= 0 || py + edge <= 0 || px >= vw as i64 || py >= vh as i64
}

/// Clear to the view's background, then draw the attached world row-major.
///
/// A rejected `fill_rect` is logged and counted; the pass carries on with the
/// remaining tiles. The visible window and its bounds checks are only logged.
/// They never change which tiles get drawn.
pub fn render_view<S: Surface + ?Sized>(view: &View<'_>, surface: &mut S) -> RenderStats {
    let world = view.world().borrow();
    let edge = view.edge();
    let offset = view.offset();
    let viewport = view.viewport();
    let mode = view.render_mode();

    let window = view.compute_visible_window();
    log::debug!(
        "window x {}..={} y {}..={}, corners in world: {} {}",
        window.left,
        window.right,
        window.top,
        window.bottom,
        world.contains(window.left, window.top),
        world.contains(window.right, window.bottom),
    );

    surface.clear(view.background());

    let mut stats = RenderStats::default();
    for (tile, x, y) in world.iter() {
        let (px, py) = tile_origin(x, y, edge, offset);
        if mode == RenderMode::Culled && misses_viewport(px, py, edge, viewport) {
            stats.skipped += 1;
            continue;
        }
        match surface.fill_rect(px, py, edge, edge, tile.color) {
            Ok(()) => stats.drawn += 1,
            Err(e) => {
                log::warn!("tile ({x}, {y}): {e}");
                stats.failed += 1;
            }
        }
    }

    log::trace!(
        "render: {} drawn, {} skipped, {} failed",
        stats.drawn,
        stats.skipped,
        stats.failed
    );
    stats
}
