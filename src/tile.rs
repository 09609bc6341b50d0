/// One colored grid cell. Colors are `0x??RRGGBB`; the top byte is ignored
/// when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    pub color: u32,
}

impl Tile {
    pub fn new(color: u32) -> Self {
        Self { color }
    }

    /// Initial color for the tile at `(x, y)`: row in the high bits, column in
    /// the middle, `noise` in the lowest two bits.
    pub fn seeded_color(x: usize, y: usize, noise: u32) -> u32 {
        ((y as u32) << 18) | (((x as u32) & 0xFFFF) << 2) | (noise & 0b11)
    }
}

/// Split a color into 8-bit red, green, blue channels.
pub fn rgb(color: u32) -> [u8; 3] {
    [(color >> 16) as u8, (color >> 8) as u8, color as u8]
}
