//! Binary texture atlas loader.
//!
//! ### Layout (little endian)
//! * `RCTX` magic
//! * `u16` texture count (slot 0 is the fallback shown for unknown tiles)
//! * `u16` texel width, `u16` texel height
//! * `count * width * height` × `u32` pixels, `0x00RRGGBB`, row-major per
//!   texture

use std::{
    fs::File,
    io::{self, Read, Write},
    path::Path,
};

use byteorder::{LittleEndian as LE, ReadBytesExt, WriteBytesExt};
use thiserror::Error;

use crate::world::{TextureAtlas, TextureError};

const MAGIC: &[u8; 4] = b"RCTX";

/// Pixels reserved up front; the header is untrusted until the data
/// actually arrives, so larger atlases grow as they are read.
const PREALLOC_PIXELS: usize = 1 << 20;

/// Errors that can be encountered while reading an atlas file.
#[derive(Error, Debug)]
pub enum AtlasError {
    /// Underlying I/O failure – propagated unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Header magic wasn't `RCTX`.
    #[error("not a texture atlas (bad magic)")]
    BadMagic,

    /// Header declares no textures or zero-sized texels.
    #[error("atlas header declares {count} textures of {w}×{h}")]
    EmptyAtlas { count: u16, w: u16, h: u16 },

    /// File ends before all declared pixels were read.
    #[error("atlas truncated: expected {expected} pixels, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// Load an atlas from disk. The whole file is read up front.
pub fn load_atlas<P: AsRef<Path>>(path: P) -> Result<TextureAtlas, AtlasError> {
    let path = path.as_ref();
    let mut bytes = Vec::new();
    File::open(path)?.read_to_end(&mut bytes)?;
    let atlas = read_atlas(&mut bytes.as_slice())?;
    log::info!(
        "atlas {}: {} textures of {}×{}",
        path.display(),
        atlas.len(),
        atlas.texel_width(),
        atlas.texel_height()
    );
    Ok(atlas)
}

/// Decode an atlas from any reader.
pub fn read_atlas<R: Read>(r: &mut R) -> Result<TextureAtlas, AtlasError> {
    /*----------- 1. read and validate header ------------------------*/
    let mut id = [0u8; 4];
    r.read_exact(&mut id)?;
    if &id != MAGIC {
        return Err(AtlasError::BadMagic);
    }
    let count = r.read_u16::<LE>()?;
    let w = r.read_u16::<LE>()?;
    let h = r.read_u16::<LE>()?;
    if count == 0 || w == 0 || h == 0 {
        return Err(AtlasError::EmptyAtlas { count, w, h });
    }

    /*----------- 2. pixels ------------------------------------------*/
    let expected = (count as usize)
        .saturating_mul(w as usize)
        .saturating_mul(h as usize);
    let mut pixels = Vec::with_capacity(expected.min(PREALLOC_PIXELS));
    for _ in 0..expected {
        match r.read_u32::<LE>() {
            Ok(px) => pixels.push(px & 0x00FF_FFFF),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(AtlasError::Truncated {
                    expected,
                    found: pixels.len(),
                });
            }
            Err(e) => return Err(e.into()),
        }
    }
    log::debug!("decoded {expected} atlas pixels");

    Ok(TextureAtlas::from_flat(w as usize, h as usize, pixels)?)
}

/// Encode `atlas` in the on-disk layout.
pub fn write_atlas<W: Write>(w: &mut W, atlas: &TextureAtlas) -> Result<(), AtlasError> {
    let tw = u16::try_from(atlas.texel_width()).map_err(io::Error::other)?;
    let th = u16::try_from(atlas.texel_height()).map_err(io::Error::other)?;
    let count = u16::try_from(atlas.len()).map_err(io::Error::other)?;
    w.write_all(MAGIC)?;
    w.write_u16::<LE>(count)?;
    w.write_u16::<LE>(tw)?;
    w.write_u16::<LE>(th)?;
    for slot in 0..atlas.len() {
        for &px in atlas.slot_pixels(slot).unwrap_or_default() {
            w.write_u32::<LE>(px)?;
        }
    }
    Ok(())
}

/*====================================================================*/
/*                               Tests                                */
/*====================================================================*/
