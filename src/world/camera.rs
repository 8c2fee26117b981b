use glam::Vec2;

use super::helpers::normalize_angle;

/// Player view-point in world space.
///
/// * `angle` is kept in `[0, 2π)`; 0 = +X, increasing toward +Y (map rows
///   grow downward, so positive turns are clockwise on screen).
/// * `dir` is recomputed on every heading write and never drifts from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pos: Vec2,
    angle: f32,
    dir: Vec2,
}

impl Camera {
    /// Create a camera at `pos` facing `angle` (any value; it is normalised).
    pub fn new(pos: Vec2, angle: f32) -> Self {
        let angle = normalize_angle(angle);
        Self {
            pos,
            angle,
            dir: Self::dir_of(angle),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Heading in radians, `[0, 2π)`.
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Unit vector `(cos angle, sin angle)`.
    #[inline]
    pub fn dir(&self) -> Vec2 {
        self.dir
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = normalize_angle(angle);
        self.dir = Self::dir_of(self.angle);
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Turn by `delta` radians, wrapping (not clamping) into `[0, 2π)`.
    pub fn rotate(&mut self, delta: f32) {
        if delta == 0.0 {
            return;
        }
        self.set_angle(self.angle + delta);
    }

    /// Advance along the heading. Collision is the caller's business.
    pub fn move_forward(&mut self, distance: f32) {
        self.pos += self.dir * distance;
    }

    /// Retreat against the heading. Collision is the caller's business.
    pub fn move_backward(&mut self, distance: f32) {
        self.pos -= self.dir * distance;
    }

    #[inline]
    fn dir_of(angle: f32) -> Vec2 {
        let (s, c) = angle.sin_cos();
        Vec2::new(c, s)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn direction_tracks_angle() {
        let mut cam = Camera::new(Vec2::ZERO, 0.0);
        assert!((cam.dir() - Vec2::X).length() < 1e-6);
        cam.rotate(FRAC_PI_2);
        assert!((cam.dir() - Vec2::Y).length() < 1e-6);
        assert!((cam.dir().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rotate_wraps_instead_of_clamping() {
        let mut cam = Camera::new(Vec2::ZERO, 0.1);
        cam.rotate(-0.3);
        assert!((cam.angle() - (TAU - 0.2)).abs() < 1e-5);
        cam.rotate(0.4);
        assert!((cam.angle() - 0.2).abs() < 1e-5);
    }

    #[test]
    fn full_turns_return_home() {
        let start = 1.234;
        let mut cam = Camera::new(Vec2::ZERO, start);
        for _ in 0..100 {
            cam.rotate(TAU);
        }
        cam.rotate(4.0 * TAU);
        assert!((cam.angle() - start).abs() < 1e-3);
        assert!((0.0..TAU).contains(&cam.angle()));
    }

    #[test]
    fn zero_inputs_are_noops() {
        let mut cam = Camera::new(Vec2::new(5.0, 6.0), PI / 3.0);
        let before = cam;
        cam.rotate(0.0);
        cam.move_forward(0.0);
        cam.move_backward(0.0);
        assert_eq!(cam, before);
    }

    #[test]
    fn forward_then_backward_cancels() {
        let mut cam = Camera::new(Vec2::new(10.0, 10.0), PI / 4.0);
        cam.move_forward(8.0);
        assert!(cam.pos().x > 10.0 && cam.pos().y > 10.0);
        cam.move_backward(8.0);
        assert!((cam.pos() - Vec2::new(10.0, 10.0)).length() < 1e-4);
    }
}
