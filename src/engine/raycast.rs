//! Grid DDA ray caster.
//!
//! Every ray is resolved by two independent sweeps:
//!
//! * **vertical-line sweep** – visits the boundaries `x = k * tile_size`
//!   the ray crosses, stepping `±tile_size` in X and `tile_size * dy/dx`
//!   in Y;
//! * **horizontal-line sweep** – same for `y = k * tile_size`.
//!
//! Each sweep stops at the first non-empty tile, after `max_depth` steps, or
//! as soon as the next cell lies outside the grid. The nearer candidate wins;
//! an exact tie goes to the vertical face.
//!
//! Grid-line convention: the origin belongs to cell `floor(p / tile_size)`
//! and each sweep first tests the boundary of that cell in the direction of
//! travel. An origin sitting exactly on a line therefore sees that line
//! (distance 0) when heading toward smaller coordinates, and the next one
//! when heading toward larger coordinates.

use glam::Vec2;

use crate::{
    engine::types::{Face, HitRecord},
    world::{Camera, EMPTY, Grid},
};

/// Direction components smaller than this are treated as parallel to the
/// grid lines of a sweep, which then misses without dividing.
const PARALLEL_EPS: f32 = 1e-6;

pub struct Raycaster<'a> {
    grid: &'a Grid,
    max_depth: usize,
}

impl<'a> Raycaster<'a> {
    /// Caster whose step budget spans the whole map, so any enclosed map
    /// always produces a hit.
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            max_depth: grid.width().max(grid.height()),
        }
    }

    /// Caster with an explicit per-sweep step budget ("depth of field").
    pub fn with_depth(grid: &'a Grid, max_depth: usize) -> Self {
        Self { grid, max_depth }
    }

    /// Nearest wall along world angle `angle` from the camera position.
    /// `None` means both sweeps ran out (open map or depth budget).
    pub fn cast_ray(&self, camera: &Camera, angle: f32) -> Option<HitRecord> {
        self.cast_dir(camera.pos(), Vec2::from_angle(angle))
    }

    /// [`Raycaster::cast_ray`] with an explicit origin and direction.
    /// `dir` does not have to be normalised. Non-finite input never hits.
    pub fn cast_dir(&self, origin: Vec2, dir: Vec2) -> Option<HitRecord> {
        if !(origin.is_finite() && dir.is_finite()) {
            return None;
        }
        let v = self.sweep(origin, dir, Face::Vertical);
        let h = self.sweep(origin, dir, Face::Horizontal);
        nearest(v, h)
    }

    fn sweep(&self, origin: Vec2, dir: Vec2, face: Face) -> Option<HitRecord> {
        // `a`: axis the grid lines cut across, `b`: axis we slide along.
        let (oa, ob, da, db) = match face {
            Face::Vertical => (origin.x, origin.y, dir.x, dir.y),
            Face::Horizontal => (origin.y, origin.x, dir.y, dir.x),
        };
        if da.abs() < PARALLEL_EPS {
            return None;
        }

        let ts = self.grid.tile_size();
        let cell = (oa / ts).floor() as i32;
        let forward = da > 0.0;
        let step: i32 = if forward { 1 } else { -1 };
        let mut line = if forward { cell.saturating_add(1) } else { cell };

        let slope = db / da;
        let mut a = line as f32 * ts;
        let mut b = ob + (a - oa) * slope;
        let a_step = step as f32 * ts;
        let b_step = a_step * slope;

        for _ in 0..self.max_depth {
            let cell_a = if forward { line } else { line.saturating_sub(1) };
            let cell_b = (b / ts).floor() as i32;
            let (tx, ty, point) = match face {
                Face::Vertical => (cell_a, cell_b, Vec2::new(a, b)),
                Face::Horizontal => (cell_b, cell_a, Vec2::new(b, a)),
            };

            match self.grid.tile_at(tx, ty) {
                // Ray left the map: nothing further along this sweep.
                None => return None,
                Some(EMPTY) => {}
                Some(tile) => {
                    return Some(HitRecord {
                        point,
                        distance: (point - origin).length(),
                        tile,
                        face,
                    });
                }
            }

            line = line.saturating_add(step);
            a += a_step;
            b += b_step;
        }
        None
    }
}

/// Pick the closer of the two sweep results; ties favour the vertical face.
#[inline]
pub fn nearest(vertical: Option<HitRecord>, horizontal: Option<HitRecord>) -> Option<HitRecord> {
    match (vertical, horizontal) {
        (Some(v), Some(h)) => Some(if v.distance <= h.distance { v } else { h }),
        (v, h) => v.or(h),
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
