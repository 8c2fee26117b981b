use glam::Vec2;
use thiserror::Error;

/// Tile variant stored in each cell. `0` is empty floor, anything else is
/// a wall whose id doubles as its texture slot in the atlas.
pub type TileId = u16;

/// Passable cell.
pub const EMPTY: TileId = 0;

/// Construction-time problems with map data.
#[derive(Error, Debug, PartialEq)]
pub enum MapError {
    /// `data.len()` disagrees with the declared dimensions.
    #[error("map data holds {actual} tiles but {width}×{height} needs {expected}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// Width or height is zero.
    #[error("map dimensions must be non-zero (got {width}×{height})")]
    EmptyMap { width: usize, height: usize },

    /// `width * height` does not fit in memory addressing.
    #[error("map dimensions {width}×{height} are too large")]
    TooLarge { width: usize, height: usize },

    /// World units per cell must be a positive, finite number.
    #[error("invalid tile size {0}")]
    BadTileSize(f32),

    /// Edit addressed a cell outside the grid.
    #[error("cell ({x}, {y}) lies outside the {width}×{height} map")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// Text map could not be read.
    #[error("I/O error: {0}")]
    Io(String),

    /// Text map contained a token or header we could not understand.
    #[error("line {line}: {msg}")]
    Parse { line: usize, msg: String },
}

impl From<std::io::Error> for MapError {
    fn from(e: std::io::Error) -> Self {
        MapError::Io(e.to_string())
    }
}

/// Rectangular tile map, row-major.
///
/// * Every interior query is `0 ≤ x < width`, `0 ≤ y < height`.
/// * Anything outside the rectangle counts as solid for [`Grid::is_wall`].
/// * The grid is read-only while a frame is cast; [`Grid::set_tile`] is for
///   editing between frames.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    tile_size: f32,
    tiles: Vec<TileId>,
}

/// The 8×8 test room the engine ships with (tile size 32).
#[rustfmt::skip]
const DEMO_TILES: [TileId; 64] = [
    1, 1, 1, 1, 1, 1, 1, 1,
    1, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 1, 1, 1,
    1, 0, 0, 0, 0, 1, 0, 1,
    1, 0, 0, 0, 2, 1, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 1,
    1, 0, 0, 0, 0, 0, 0, 1,
    1, 2, 2, 1, 1, 1, 1, 1,
];

impl Grid {
    // ---------------------------------------------------------------------
    // Constructors
    // ---------------------------------------------------------------------

    /// Build a grid from row-major `tiles`.
    ///
    /// Fails fast instead of truncating or padding when the data does not
    /// match `width * height`.
    pub fn new(
        width: usize,
        height: usize,
        tile_size: f32,
        tiles: Vec<TileId>,
    ) -> Result<Self, MapError> {
        let expected = area(width, height)?;
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(MapError::BadTileSize(tile_size));
        }
        if tiles.len() != expected {
            return Err(MapError::DimensionMismatch {
                width,
                height,
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tile_size,
            tiles,
        })
    }

    /// Empty `width × height` room surrounded by a one-cell border of `wall`.
    pub fn bordered(
        width: usize,
        height: usize,
        tile_size: f32,
        wall: TileId,
    ) -> Result<Self, MapError> {
        let mut tiles = vec![EMPTY; area(width, height)?];
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                    tiles[y * width + x] = wall;
                }
            }
        }
        Self::new(width, height, tile_size, tiles)
    }

    /// Built-in 8×8 demo map.
    pub fn demo() -> Self {
        Self {
            width: 8,
            height: 8,
            tile_size: 32.0,
            tiles: DEMO_TILES.to_vec(),
        }
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// World units per cell edge.
    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Row-major view of all tile ids.
    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Tile id of an interior cell; `None` outside the grid.
    #[inline]
    pub fn tile_at(&self, x: i32, y: i32) -> Option<TileId> {
        if self.in_bounds(x, y) {
            Some(self.tiles[y as usize * self.width + x as usize])
        } else {
            None
        }
    }

    /// `true` for occupied cells and for everything outside the grid.
    #[inline]
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y).is_none_or(|id| id != EMPTY)
    }

    /// Cell containing world point `p` (may be outside the grid).
    #[inline]
    pub fn cell_of(&self, p: Vec2) -> (i32, i32) {
        (
            (p.x / self.tile_size).floor() as i32,
            (p.y / self.tile_size).floor() as i32,
        )
    }

    /// [`Grid::is_wall`] for the cell under world point `p`.
    #[inline]
    pub fn is_wall_at(&self, p: Vec2) -> bool {
        let (x, y) = self.cell_of(p);
        self.is_wall(x, y)
    }

    /// World-space centre of the first empty cell in row-major order.
    pub fn spawn_point(&self) -> Option<Vec2> {
        let i = self.tiles.iter().position(|&t| t == EMPTY)?;
        let (x, y) = (i % self.width, i / self.width);
        Some(Vec2::new(
            (x as f32 + 0.5) * self.tile_size,
            (y as f32 + 0.5) * self.tile_size,
        ))
    }

    /// `true` when every border cell is a wall, i.e. no ray can leave the map.
    pub fn is_enclosed(&self) -> bool {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..w).all(|x| self.is_wall(x, 0) && self.is_wall(x, h - 1))
            && (0..h).all(|y| self.is_wall(0, y) && self.is_wall(w - 1, y))
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Replace one interior tile. Only call between frames.
    pub fn set_tile(&mut self, x: i32, y: i32, id: TileId) -> Result<(), MapError> {
        if !self.in_bounds(x, y) {
            return Err(MapError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.tiles[y as usize * self.width + x as usize] = id;
        Ok(())
    }
}

/// Cell count of a `width × height` map, rejecting empty and overflowing
/// shapes. Cell indices must also fit in `i32` for [`Grid::tile_at`].
fn area(width: usize, height: usize) -> Result<usize, MapError> {
    if width == 0 || height == 0 {
        return Err(MapError::EmptyMap { width, height });
    }
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(MapError::TooLarge { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(MapError::TooLarge { width, height })
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
