use glam::Vec2;

use crate::world::{Rgb, TileId, rgb};

/// Widest usable field of view in degrees. At 180° the edge rays run
/// parallel to the view plane and fish-eye correction collapses to zero.
pub const MAX_FOV_DEGREES: f32 = 179.0;

/// [`MAX_FOV_DEGREES`] in radians.
pub const MAX_FOV: f32 = MAX_FOV_DEGREES * std::f32::consts::PI / 180.0;

/// Which kind of grid line the ray struck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    /// Boundary `x = k * tile_size`; texture axis is world Y.
    Vertical,
    /// Boundary `y = k * tile_size`; texture axis is world X.
    Horizontal,
}

/// Nearest wall along one ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitRecord {
    pub point: Vec2,
    /// Euclidean distance from the ray origin, world units.
    pub distance: f32,
    pub tile: TileId,
    pub face: Face,
}

/// One projected screen column, ready to paint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnStrip {
    /// Visible wall height in pixels (≤ screen height).
    pub height: f32,
    /// Unclamped projected height; > `height` when the wall is cropped.
    pub full_height: f32,
    /// First screen row of the strip.
    pub top: f32,
    pub tile: TileId,
    pub tex_x: i32,
    /// Texel row at `top`.
    pub tex_y_start: f32,
    /// Texel rows per screen pixel.
    pub tex_y_step: f32,
    /// Brightness multiplier in `[0, 1]`.
    pub shade: f32,
}

/// Ceiling / floor fill painted before any wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Background {
    pub ceiling: Rgb,
    pub floor: Rgb,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            ceiling: rgb(64, 64, 64),
            floor: rgb(40, 40, 40),
        }
    }
}

/// Two-level faux lighting plus inverse-distance fog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shading {
    /// Multiplier for vertical-face hits; horizontal faces are always 1.0.
    pub vertical_face: f32,
    /// Corrected distance up to which walls stay at full brightness;
    /// beyond it brightness falls off as `fog_distance / d`.
    pub fog_distance: f32,
}

impl Default for Shading {
    fn default() -> Self {
        Self {
            vertical_face: 0.7,
            fog_distance: 128.0,
        }
    }
}

/// Everything the frame renderer needs that does not come from the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    pub width: usize,
    pub height: usize,
    /// Logical rays per frame; each covers `width / num_rays` pixel columns.
    pub num_rays: usize,
    /// Horizontal field of view, radians. The renderer clamps it to
    /// `[0, MAX_FOV]`.
    pub fov: f32,
    /// Grid steps per sweep; `None` = `max(map width, map height)`.
    pub max_depth: Option<usize>,
    pub shading: Shading,
    pub background: Background,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 512,
            num_rays: 256,
            fov: 60_f32.to_radians(),
            max_depth: None,
            shading: Shading::default(),
            background: Background::default(),
        }
    }
}
