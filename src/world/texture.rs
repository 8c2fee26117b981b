// Flat texture atlas: every wall variant shares one texel size and lives in
// a single pixel vector. The renderer only ever talks to it through
// `TileId` + texel coordinates.

use thiserror::Error;

use super::grid::TileId;

/// Packed `0x00RRGGBB` colour, the frame-buffer's pixel format.
pub type Rgb = u32;

/// Atlas slot whose pixels are the checkerboard fallback.
/// Always 0: `TextureAtlas::new` puts it first.
pub const MISSING_SLOT: usize = 0;

/// Texel edge length of the built-in procedural textures.
pub const DEFAULT_TEXEL_SIZE: usize = 32;

#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[inline]
pub const fn channels(c: Rgb) -> (u8, u8, u8) {
    ((c >> 16) as u8, (c >> 8) as u8, c as u8)
}

/// Scale every channel of `c` by `factor` (clamped to `[0, 1]`).
///
/// NaN factors render black rather than garbage.
#[inline]
pub fn shade(c: Rgb, factor: f32) -> Rgb {
    let f = if factor.is_nan() { 0.0 } else { factor.clamp(0.0, 1.0) };
    let (r, g, b) = channels(c);
    let s = |v: u8| (v as f32 * f) as u8;
    rgb(s(r), s(g), s(b))
}

/// Things that can go wrong when assembling an atlas.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextureError {
    /// Texel width or height is zero.
    #[error("texture size {w}×{h} is invalid")]
    BadSize { w: usize, h: usize },

    /// A variant's pixel slice does not match the atlas texel size.
    #[error("texture has {got} pixels, expected {expected}")]
    PixelCount { expected: usize, got: usize },
}

/// All wall textures, back to back, indexed by `(slot, ty * w + tx)`.
///
/// * Slot **0** is the checkerboard used for unknown tile ids.
/// * Slot **n** (n ≥ 1) belongs to tile id `n`.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureAtlas {
    w: usize,
    h: usize,
    pixels: Vec<Rgb>,
}

impl TextureAtlas {
    // ---------------------------------------------------------------------
    // Constructors
    // ---------------------------------------------------------------------

    /// Empty atlas of `w × h` texels holding only the fallback checker.
    pub fn new(w: usize, h: usize) -> Result<Self, TextureError> {
        if w == 0 || h == 0 {
            return Err(TextureError::BadSize { w, h });
        }
        let mut atlas = Self {
            w,
            h,
            pixels: Vec::with_capacity(w * h),
        };
        atlas.pixels.extend(pattern_pixels(w, h, checker));
        Ok(atlas)
    }

    /// Build straight from a flat pixel array, as read from disk.
    /// `pixels` must hold whole textures; slot 0 is taken from the data.
    pub fn from_flat(w: usize, h: usize, pixels: Vec<Rgb>) -> Result<Self, TextureError> {
        if w == 0 || h == 0 {
            return Err(TextureError::BadSize { w, h });
        }
        let per = w * h;
        if pixels.is_empty() || pixels.len() % per != 0 {
            return Err(TextureError::PixelCount {
                expected: per * (pixels.len() / per).max(1),
                got: pixels.len(),
            });
        }
        Ok(Self { w, h, pixels })
    }

    /// Built-in 32×32 set: checker, brick, stone, wood, metal.
    pub fn procedural() -> Self {
        let n = DEFAULT_TEXEL_SIZE;
        let mut pixels = Vec::with_capacity(n * n * 5);
        for pattern in [checker, brick, stone, wood, metal] {
            pixels.extend(pattern_pixels(n, n, pattern));
        }
        Self { w: n, h: n, pixels }
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    #[inline]
    pub fn texel_width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn texel_height(&self) -> usize {
        self.h
    }

    /// Number of slots, fallback included.
    pub fn len(&self) -> usize {
        self.pixels.len() / (self.w * self.h)
    }

    /// Only the fallback checker is present.
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }

    /// Slot used for `tile`; unknown ids resolve to the checker.
    #[inline]
    pub fn slot_for(&self, tile: TileId) -> usize {
        let slot = tile as usize;
        if slot < self.len() { slot } else { MISSING_SLOT }
    }

    /// Colour of texel `(tx, ty)` of the texture for `tile`.
    /// Coordinates wrap modulo the texel size; no filtering.
    #[inline]
    pub fn sample(&self, tile: TileId, tx: i32, ty: i32) -> Rgb {
        let slot = self.slot_for(tile);
        let x = tx.rem_euclid(self.w as i32) as usize;
        let y = ty.rem_euclid(self.h as i32) as usize;
        self.pixels[slot * self.w * self.h + y * self.w + x]
    }

    /// Raw pixels of one slot (row-major).
    pub fn slot_pixels(&self, slot: usize) -> Option<&[Rgb]> {
        let per = self.w * self.h;
        self.pixels.get(slot * per..(slot + 1) * per)
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Append one texture; returns the slot (= tile id) it landed in.
    pub fn push(&mut self, pixels: &[Rgb]) -> Result<usize, TextureError> {
        let expected = self.w * self.h;
        if pixels.len() != expected {
            return Err(TextureError::PixelCount {
                expected,
                got: pixels.len(),
            });
        }
        let slot = self.len();
        self.pixels.extend_from_slice(pixels);
        Ok(slot)
    }
}

impl Default for TextureAtlas {
    fn default() -> Self {
        Self::procedural()
    }
}

/*──────────────────────── procedural patterns ────────────────────────*/

fn pattern_pixels(w: usize, h: usize, f: fn(usize, usize, usize, usize) -> Rgb) -> Vec<Rgb> {
    let mut out = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            out.push(f(x, y, w, h));
        }
    }
    out
}

/// Magenta/black 4×4 checker, the classic "missing texture" look.
fn checker(x: usize, y: usize, w: usize, h: usize) -> Rgb {
    let cx = x * 8 / w;
    let cy = y * 8 / h;
    if (cx ^ cy) & 1 == 0 {
        rgb(200, 0, 200)
    } else {
        rgb(20, 20, 20)
    }
}

fn brick(x: usize, y: usize, w: usize, h: usize) -> Rgb {
    let row_h = (h / 4).max(1);
    let row = y / row_h;
    let shift = if row % 2 == 0 { 0 } else { w / 4 };
    let mortar_row = y % row_h == 0;
    let mortar_col = (x + shift) % (w / 2).max(1) == 0;
    if mortar_row || mortar_col {
        rgb(170, 170, 160)
    } else {
        rgb(150 + ((x * 7 + y * 3) % 20) as u8, 50, 40)
    }
}

fn stone(x: usize, y: usize, _w: usize, _h: usize) -> Rgb {
    let n = ((x * 31) ^ (y * 17) ^ (x * y)) % 48;
    let v = 96 + n as u8;
    rgb(v, v, v + 8)
}

fn wood(x: usize, y: usize, w: usize, _h: usize) -> Rgb {
    let plank_w = (w / 4).max(1);
    if x % plank_w == 0 {
        return rgb(60, 35, 15);
    }
    let grain = ((y + x * 3) % 6) as u8 * 6;
    rgb(130 + grain, 80 + grain / 2, 40)
}

fn metal(x: usize, y: usize, w: usize, h: usize) -> Rgb {
    let edge = x == 0 || y == 0 || x + 1 == w || y + 1 == h;
    let rivet = (x % (w / 4).max(1) == 2) && (y % (h / 4).max(1) == 2);
    if edge || rivet {
        rgb(60, 70, 80)
    } else {
        rgb(120, 140, 160)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
