use crate::error::{Error, Result};
use crate::tile::rgb;

/// Pixel sink the view renders into.
pub trait Surface {
    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: u32);

    /// Fill a `w` x `h` rectangle whose top-left corner is `(x, y)`.
    /// Rectangles may lie partly or fully outside the surface.
    fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: u32) -> Result<()>;

    /// Make the finished frame visible.
    fn present(&mut self);
}

fn reject_empty(x: i64, y: i64, w: u32, h: u32) -> Result<()> {
    if w == 0 || h == 0 {
        return Err(Error::Draw {
            x,
            y,
            w,
            h,
            reason: "zero-area rectangle".into(),
        });
    }
    Ok(())
}

/// Software surface of `0x00RRGGBB` pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    presented: u64,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
            presented: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Number of completed `present` calls.
    pub fn frames_presented(&self) -> u64 {
        self.presented
    }

    /// Packed RGB bytes, three per pixel, for image export.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&p| rgb(p)).collect()
    }
}

impl Surface for FrameBuffer {
    fn clear(&mut self, color: u32) {
        self.pixels.fill(color & 0x00FF_FFFF);
    }

    fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: u32) -> Result<()> {
        reject_empty(x, y, w, h)?;

        let x0 = x.clamp(0, self.width as i64);
        let y0 = y.clamp(0, self.height as i64);
        let x1 = x.saturating_add(w as i64).clamp(0, self.width as i64);
        let y1 = y.saturating_add(h as i64).clamp(0, self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return Ok(());
        }

        let stride = self.width as usize;
        let color = color & 0x00FF_FFFF;
        for row in y0 as usize..y1 as usize {
            let start = row * stride;
            self.pixels[start + x0 as usize..start + x1 as usize].fill(color);
        }
        Ok(())
    }

    fn present(&mut self) {
        self.presented += 1;
    }
}
