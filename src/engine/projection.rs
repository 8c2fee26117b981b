use crate::{
    engine::types::{ColumnStrip, Face, HitRecord, Shading},
    world::{Camera, TextureAtlas},
};

/// Smallest corrected distance used for projection; a camera touching a
/// wall would otherwise divide by zero.
pub const MIN_DISTANCE: f32 = 1e-3;

/// Remove the fish-eye curvature: project the ray length onto the camera's
/// forward axis. Never returns less than [`MIN_DISTANCE`].
#[inline]
pub fn corrected_distance(distance: f32, camera_angle: f32, cast_angle: f32) -> f32 {
    let d = distance * (camera_angle - cast_angle).cos();
    if d.is_nan() { MIN_DISTANCE } else { d.max(MIN_DISTANCE) }
}

/// Unclamped on-screen height of a wall `tile_size` tall at `corrected`.
#[inline]
pub fn wall_height(tile_size: f32, screen_height: usize, corrected: f32) -> f32 {
    tile_size * screen_height as f32 / corrected.max(MIN_DISTANCE)
}

/// Turns hit records into paintable column strips.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
    screen_height: usize,
    tile_size: f32,
    tex_w: usize,
    tex_h: usize,
    shading: Shading,
}

impl Projector {
    pub fn new(
        screen_height: usize,
        tile_size: f32,
        tex_w: usize,
        tex_h: usize,
        shading: Shading,
    ) -> Self {
        Self {
            screen_height,
            tile_size,
            tex_w: tex_w.max(1),
            tex_h: tex_h.max(1),
            shading,
        }
    }

    /// Projector matching the texel size of `atlas`.
    pub fn for_atlas(
        screen_height: usize,
        tile_size: f32,
        atlas: &TextureAtlas,
        shading: Shading,
    ) -> Self {
        Self::new(
            screen_height,
            tile_size,
            atlas.texel_width(),
            atlas.texel_height(),
            shading,
        )
    }

    pub fn project(&self, hit: &HitRecord, camera: &Camera, cast_angle: f32) -> ColumnStrip {
        let screen_h = self.screen_height as f32;
        let corrected = corrected_distance(hit.distance, camera.angle(), cast_angle);
        let full_height = wall_height(self.tile_size, self.screen_height, corrected);
        let tex_y_step = self.tex_h as f32 / full_height;

        // Oversized walls are cropped evenly top and bottom.
        let (height, top, tex_y_start) = if full_height > screen_h {
            let hidden = (full_height - screen_h) * 0.5;
            (screen_h, 0.0, hidden * tex_y_step)
        } else {
            (full_height, (screen_h - full_height) * 0.5, 0.0)
        };

        ColumnStrip {
            height,
            full_height,
            top,
            tile: hit.tile,
            tex_x: self.texel_column(hit, cast_angle),
            tex_y_start,
            tex_y_step,
            shade: self.shade(hit.face, corrected),
        }
    }

    /// Texel column from the hit's offset along the struck edge, mirrored so
    /// that u grows left-to-right on screen whichever side the wall is seen
    /// from.
    fn texel_column(&self, hit: &HitRecord, cast_angle: f32) -> i32 {
        let (sin, cos) = cast_angle.sin_cos();
        let (along, mirror) = match hit.face {
            Face::Vertical => (hit.point.y, cos < 0.0),
            Face::Horizontal => (hit.point.x, sin > 0.0),
        };
        let frac = along.rem_euclid(self.tile_size) / self.tile_size;
        let max = self.tex_w as i32 - 1;
        let tx = ((frac * self.tex_w as f32) as i32).clamp(0, max);
        if mirror { max - tx } else { tx }
    }

    fn shade(&self, face: Face, corrected: f32) -> f32 {
        let face_factor = match face {
            Face::Horizontal => 1.0,
            Face::Vertical => self.shading.vertical_face,
        };
        let fog = (self.shading.fog_distance / corrected).min(1.0);
        (face_factor * fog).clamp(0.0, 1.0)
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
