use crate::error::{Error, Result};
use crate::location::ceil_div;
use crate::rng::RandomSource;
use crate::tile::Tile;

/// Fixed-size rectangular grid of tiles stored row-major, `index = y * w + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl World {
    /// Allocate a `width` x `height` world and seed every tile from its
    /// coordinates plus two low bits of noise from `rng`.
    ///
    /// Fails with [`Error::Allocation`] when the tile count overflows or the
    /// allocator cannot provide the storage.
    pub fn init<R: RandomSource + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Self> {
        let alloc_err = || Error::Allocation { width, height };
        let len = width.checked_mul(height).ok_or_else(alloc_err)?;

        let mut tiles = Vec::new();
        tiles.try_reserve_exact(len).map_err(|_| alloc_err())?;
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile::new(Tile::seeded_color(x, y, rng.next_u32())));
            }
        }

        log::info!("world {}x{} ({} tiles)", width, height, len);
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Storage index of `(x, y)`, or None outside `[0, w) x [0, h)`.
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    pub fn tile_mut(&mut self, x: usize, y: usize) -> Option<&mut Tile> {
        self.index(x, y).map(move |i| &mut self.tiles[i])
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Row-major walk over `(tile, x, y)`. Each call starts a fresh pass.
    pub fn iter(&self) -> Tiles<'_> {
        Tiles {
            tiles: &self.tiles,
            width: self.width,
            pos: 0,
        }
    }

    /// Visit every tile row-major, stopping at the first callback error.
    pub fn try_for_each_tile<E, F>(&self, mut f: F) -> std::result::Result<(), E>
    where
        F: FnMut(&Tile, usize, usize) -> std::result::Result<(), E>,
    {
        self.iter().try_for_each(|(tile, x, y)| f(tile, x, y))
    }

    /// Overwrite every tile with a fresh random color. The coordinate layout
    /// used by [`World::init`] is not reapplied.
    pub fn recolor_all<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        for tile in &mut self.tiles {
            tile.color = rng.next_u32();
        }
        log::debug!("recolored {} tiles", self.tiles.len());
    }

    /// Bounds test in the origin-centered frame
    /// `[-(w/2), ceil(w/2)) x [-(h/2), ceil(h/2))`.
    ///
    /// Each axis spans exactly `w` (or `h`) cells, and the odd cell goes on
    /// the positive side so `(0, 0)` is inside any non-empty world, 1-wide
    /// and 1-tall ones included. Note this frame differs from the
    /// `[0, w) x [0, h)` storage frame used by [`World::index`].
    pub fn contains(&self, x: i64, y: i64) -> bool {
        let w = self.width as i64;
        let h = self.height as i64;
        x >= -(w / 2) && x < ceil_div(w, 2) && y >= -(h / 2) && y < ceil_div(h, 2)
    }
}

/// Iterator returned by [`World::iter`].
#[derive(Debug, Clone)]
pub struct Tiles<'a> {
    tiles: &'a [Tile],
    width: usize,
    pos: usize,
}

impl<'a> Iterator for Tiles<'a> {
    type Item = (&'a Tile, usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let tile = self.tiles.get(self.pos)?;
        let item = (tile, self.pos % self.width, self.pos / self.width);
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.tiles.len() - self.pos;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Tiles<'_> {}
