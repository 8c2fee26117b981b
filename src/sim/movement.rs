//! Turning and walking with grid collision.
//!
//! The camera itself never checks walls; this module proposes a move,
//! validates the destination against the grid and commits it, sliding along
//! the free axis when the direct path is blocked.

use glam::Vec2;
use std::f32::consts::FRAC_1_SQRT_2;

use crate::{
    sim::InputCmd,
    world::{Camera, Grid},
};

pub const MOVE_SPEED: f32 = 120.0; // map-units / second
pub const TURN_RATE: f32 = std::f32::consts::PI; // rad / second (180°/s)

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveParams {
    pub move_speed: f32,
    pub turn_rate: f32,
    /// Player footprint; no wall may come closer than this.
    pub radius: f32,
}

impl MoveParams {
    /// Default speeds with a radius of a quarter tile.
    pub fn for_grid(grid: &Grid) -> Self {
        Self {
            move_speed: MOVE_SPEED,
            turn_rate: TURN_RATE,
            radius: grid.tile_size() * 0.25,
        }
    }
}

/// Outcome of one [`apply_input`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveResult {
    /// A wall stopped at least one axis of the requested move.
    pub blocked: bool,
}

/// `true` when a circle of `radius` around `p` touches no wall.
/// Nine samples: centre, the four axes and the four diagonals.
pub fn is_free(grid: &Grid, p: Vec2, radius: f32) -> bool {
    let d = radius * FRAC_1_SQRT_2;
    let samples = [
        Vec2::ZERO,
        Vec2::new(radius, 0.0),
        Vec2::new(-radius, 0.0),
        Vec2::new(0.0, radius),
        Vec2::new(0.0, -radius),
        Vec2::new(d, d),
        Vec2::new(-d, d),
        Vec2::new(d, -d),
        Vec2::new(-d, -d),
    ];
    samples.iter().all(|&o| !grid.is_wall_at(p + o))
}

/// Apply one tick of player intents, scaled by the measured `dt` (seconds)
/// so speed does not depend on frame rate.
pub fn apply_input(
    camera: &mut Camera,
    grid: &Grid,
    cmd: &InputCmd,
    dt: f32,
    params: &MoveParams,
) -> MoveResult {
    let turn = cmd.turn_axis();
    if turn != 0.0 {
        camera.rotate(turn * params.turn_rate * dt);
    }

    let dist = cmd.move_axis() * params.move_speed * dt;
    if dist == 0.0 {
        return MoveResult::default();
    }

    let mut probe = *camera;
    if dist > 0.0 {
        probe.move_forward(dist);
    } else {
        probe.move_backward(-dist);
    }

    let from = camera.pos();
    let delta = probe.pos() - from;
    let candidates = [delta, Vec2::new(delta.x, 0.0), Vec2::new(0.0, delta.y)];

    for (i, step) in candidates.into_iter().enumerate() {
        if is_free(grid, from + step, params.radius) {
            camera.set_pos(from + step);
            return MoveResult { blocked: i > 0 };
        }
    }
    MoveResult { blocked: true }
}
