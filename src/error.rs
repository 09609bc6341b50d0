use thiserror::Error;

/// Everything that can go wrong between the world, the view and the surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Tile storage for a `width` x `height` world could not be obtained.
    #[error("cannot allocate {width}x{height} world")]
    Allocation { width: usize, height: usize },

    /// The output surface refused a rectangle fill.
    #[error("fill_rect({x}, {y}, {w}, {h}) rejected: {reason}")]
    Draw {
        x: i64,
        y: i64,
        w: u32,
        h: u32,
        reason: String,
    },

    /// Key or event with no binding.
    #[error("unhandled input: {0}")]
    UnhandledInput(String),

    /// Window or GPU setup failed.
    #[error("platform error: {0}")]
    Platform(String),
}

pub type Result<T> = std::result::Result<T, Error>;
