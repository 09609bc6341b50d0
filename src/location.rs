use std::cell::RefCell;
use std::fmt;

use crate::world::World;

/// Integer division that rounds up for positive dividends and truncates
/// toward zero otherwise. `b` must be positive.
pub fn ceil_div(a: i64, b: i64) -> i64 {
    if a > 0 { (a + b - 1) / b } else { a / b }
}

/// A signed tile coordinate in the world it addresses. The world is borrowed,
/// never owned.
#[derive(Clone, Copy)]
pub struct Location<'w> {
    pub x: i64,
    pub y: i64,
    world: &'w RefCell<World>,
}

impl<'w> Location<'w> {
    pub fn new(world: &'w RefCell<World>, x: i64, y: i64) -> Self {
        Self { x, y, world }
    }

    pub fn world(&self) -> &'w RefCell<World> {
        self.world
    }
}

impl fmt::Debug for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Location")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil_div_rounds_positive_up() {
        assert_eq!(ceil_div(840, 2), 420);
        assert_eq!(ceil_div(395, 25), 16);
        assert_eq!(ceil_div(295, 25), 12);
        assert_eq!(ceil_div(400, 25), 16);
        assert_eq!(ceil_div(1, 25), 1);
    }

    #[test]
    fn ceil_div_truncates_non_positive() {
        assert_eq!(ceil_div(0, 25), 0);
        assert_eq!(ceil_div(-1, 25), 0);
        assert_eq!(ceil_div(-26, 25), -1);
        assert_eq!(ceil_div(-50, 25), -2);
    }
}
