use std::cell::RefCell;

use crate::location::{Location, ceil_div};
use crate::render::{self, RenderMode, RenderStats};
use crate::surface::Surface;
use crate::world::World;

/// Default clear color, #282828.
pub const BACKGROUND: u32 = 0x0028_2828;

/// Tile range the camera nominally covers: `loc ± half extents`, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleWindow {
    pub tiles_left_right: i64,
    pub tiles_up_down: i64,
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
}

/// A camera into one world: centering location, pixel viewport, tile edge
/// length (zoom) and an accumulated pixel scroll offset.
#[derive(Debug)]
pub struct View<'w> {
    loc: Location<'w>,
    viewport_w: u32,
    viewport_h: u32,
    edge: u32,
    off_x: i64,
    off_y: i64,
    background: u32,
    mode: RenderMode,
}

impl<'w> View<'w> {
    /// Bind a view to `world`. The start location is taken as given, without
    /// any bounds check. An `edge` of zero is raised to one.
    pub fn attach(
        world: &'w RefCell<World>,
        viewport_w: u32,
        viewport_h: u32,
        edge: u32,
        start_x: i64,
        start_y: i64,
    ) -> Self {
        Self {
            loc: Location::new(world, start_x, start_y),
            viewport_w,
            viewport_h,
            edge: edge.max(1),
            off_x: 0,
            off_y: 0,
            background: BACKGROUND,
            mode: RenderMode::Full,
        }
    }

    pub fn with_background(mut self, color: u32) -> Self {
        self.background = color;
        self
    }

    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn world(&self) -> &'w RefCell<World> {
        self.loc.world()
    }

    pub fn location(&self) -> &Location<'w> {
        &self.loc
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.viewport_w, self.viewport_h)
    }

    pub fn edge(&self) -> u32 {
        self.edge
    }

    pub fn offset(&self) -> (i64, i64) {
        (self.off_x, self.off_y)
    }

    pub fn background(&self) -> u32 {
        self.background
    }

    pub fn render_mode(&self) -> RenderMode {
        self.mode
    }

    /// Shift the scroll offset by a pixel delta. Unbounded.
    pub fn pan(&mut self, dx_px: i64, dy_px: i64) {
        self.off_x += dx_px;
        self.off_y += dy_px;
        log::debug!("pan ({dx_px}, {dy_px}) -> offset ({}, {})", self.off_x, self.off_y);
    }

    /// Double the edge length while it is smaller than both viewport sides.
    /// Returns whether the zoom was applied.
    pub fn zoom_in(&mut self) -> bool {
        if self.edge < self.viewport_h && self.edge < self.viewport_w {
            self.edge = self.edge.saturating_mul(2);
            log::debug!("zoom in -> edge {}", self.edge);
            true
        } else {
            log::debug!("zoom in refused at edge {}", self.edge);
            false
        }
    }

    /// Halve the edge length while it is above one.
    /// Returns whether the zoom was applied.
    pub fn zoom_out(&mut self) -> bool {
        if self.edge > 1 {
            self.edge /= 2;
            log::debug!("zoom out -> edge {}", self.edge);
            true
        } else {
            log::debug!("zoom out refused at edge {}", self.edge);
            false
        }
    }

    pub fn compute_visible_window(&self) -> VisibleWindow {
        let edge = self.edge as i64;
        let tiles_left_right = ceil_div(ceil_div(self.viewport_w as i64, 2) - edge, edge);
        let tiles_up_down = ceil_div(ceil_div(self.viewport_h as i64, 2) - edge, edge);
        VisibleWindow {
            tiles_left_right,
            tiles_up_down,
            left: self.loc.x - tiles_left_right,
            right: self.loc.x + tiles_left_right,
            top: self.loc.y - tiles_up_down,
            bottom: self.loc.y + tiles_up_down,
        }
    }

    /// Whether `(x, y)` lies inside the attached world's origin-centered
    /// bounds. See [`World::contains`].
    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.world().borrow().contains(x, y)
    }

    /// Clear `surface` and draw the attached world at the current zoom and
    /// offset. Does not present.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> RenderStats {
        render::render_view(self, surface)
    }
}
