mod camera;
mod grid;
mod helpers;
mod texture;

pub use camera::Camera;

pub use grid::{EMPTY, Grid, MapError, TileId};

pub use helpers::normalize_angle;

pub use texture::{
    DEFAULT_TEXEL_SIZE, MISSING_SLOT, Rgb, TextureAtlas, TextureError, channels, rgb, shade,
};
