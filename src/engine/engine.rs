use crate::{
    engine::{
        projection::Projector,
        raycast::Raycaster,
        types::{MAX_FOV, ViewConfig},
    },
    renderer::{FrameBuffer, MinimapLayout, Renderer, Software, draw_minimap},
    world::{Camera, Grid, Rgb, TextureAtlas, normalize_angle},
};

/// What happened while casting one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameSummary {
    pub rays: usize,
    /// Rays that found no wall and were left as background.
    pub misses: usize,
}

/// Drives the caster and projector over every screen column and feeds the
/// strips to a [`Renderer`].
pub struct Engine<R: Renderer> {
    pub renderer: R,
    pub view: ViewConfig,
    pub show_minimap: bool,
}

impl<R: Renderer> Engine<R> {
    pub fn new(renderer: R, view: ViewConfig) -> Self {
        Self {
            renderer,
            view,
            show_minimap: false,
        }
    }

    /// Cast, project and paint one complete frame, then loan it to `submit`.
    ///
    /// The camera is copied up front; nothing the caller does to its own
    /// camera can be observed half-way through the frame.
    pub fn render_frame(
        &mut self,
        camera: &Camera,
        grid: &Grid,
        atlas: &TextureAtlas,
        submit: impl FnOnce(&[Rgb], usize, usize),
    ) -> FrameSummary {
        let cam = *camera;
        let view = self.view;

        self.renderer
            .begin_frame(view.width, view.height, &view.background);

        let summary = self.cast_columns(&cam, grid, atlas);
        if summary.misses > 0 {
            log::debug!("{} of {} rays hit nothing", summary.misses, summary.rays);
        }

        if self.show_minimap {
            let layout = MinimapLayout::fit(grid, view.width, view.height);
            draw_minimap(&mut self.renderer, grid, &cam, &layout);
        }

        self.renderer.end_frame(submit);
        summary
    }

    fn cast_columns(&mut self, cam: &Camera, grid: &Grid, atlas: &TextureAtlas) -> FrameSummary {
        let view = &self.view;
        let n = view.num_rays;
        let mut summary = FrameSummary {
            rays: n,
            misses: 0,
        };
        if n == 0 || view.width == 0 || view.height == 0 {
            return summary;
        }

        let caster = match view.max_depth {
            Some(depth) => Raycaster::with_depth(grid, depth),
            None => Raycaster::new(grid),
        };
        let projector = Projector::for_atlas(view.height, grid.tile_size(), atlas, view.shading);

        let fov = if view.fov.is_nan() { 0.0 } else { view.fov.clamp(0.0, MAX_FOV) };
        let step = fov / n as f32;
        let mut angle = normalize_angle(cam.angle() - fov * 0.5);

        for i in 0..n {
            // integer partition so every pixel column belongs to exactly one ray
            let x_start = i * view.width / n;
            let x_end = (i + 1) * view.width / n;

            match caster.cast_ray(cam, angle) {
                Some(hit) => {
                    let strip = projector.project(&hit, cam, angle);
                    self.renderer.draw_strip(x_start, x_end, &strip, atlas);
                }
                None => summary.misses += 1,
            }

            angle = normalize_angle(angle + step);
        }
        summary
    }
}

/// One-shot convenience: render a frame with a fresh software back-end and
/// hand back the buffer.
pub fn render_frame(
    camera: &Camera,
    grid: &Grid,
    atlas: &TextureAtlas,
    view: &ViewConfig,
) -> FrameBuffer {
    let mut engine = Engine::new(Software::default(), *view);
    engine.render_frame(camera, grid, atlas, |_, _, _| {});
    engine.renderer.into_frame()
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{Background, Shading};
    use crate::world::rgb;
    use glam::Vec2;

    const TS: f32 = 64.0;

    fn flat_atlas() -> TextureAtlas {
        let mut atlas = TextureAtlas::new(8, 8).unwrap();
        atlas.push(&[rgb(200, 40, 40); 64]).unwrap();
        atlas
    }

    fn view(width: usize, height: usize, num_rays: usize, fov_deg: f32) -> ViewConfig {
        ViewConfig {
            width,
            height,
            num_rays,
            fov: fov_deg.to_radians(),
            max_depth: None,
            shading: Shading {
                vertical_face: 0.7,
                fog_distance: 1_000.0,
            },
            background: Background::default(),
        }
    }

    fn is_background(fb: &FrameBuffer, x: usize, y: usize) -> bool {
        let bg = Background::default();
        let px = fb.pixel(x, y).unwrap();
        px == bg.ceiling || px == bg.floor
    }

    #[test]
    fn single_straight_ray_matches_axis_distance() {
        let g = Grid::bordered(8, 8, TS, 1).unwrap();
        let cam = Camera::new(Vec2::splat(4.5 * TS), 0.0);
        let fb = render_frame(&cam, &g, &flat_atlas(), &view(16, 320, 1, 0.0));

        // distance 2.5 tiles → 64 * 320 / 160 = 128 px, rows 96..224
        for x in 0..16 {
            assert!(is_background(&fb, x, 95));
            assert!(!is_background(&fb, x, 96));
            assert!(!is_background(&fb, x, 223));
            assert!(is_background(&fb, x, 224));
        }
    }

    #[test]
    fn every_column_covered_in_closed_room() {
        let g = Grid::demo();
        for angle in [0.0, 0.05, 3.0, 6.2] {
            let cam = Camera::new(Vec2::splat(2.5 * 32.0), angle);
            let mut engine = Engine::new(Software::default(), view(10, 40, 3, 60.0));
            let summary = engine.render_frame(&cam, &g, &flat_atlas(), |_, _, _| {});
            assert_eq!(summary, FrameSummary { rays: 3, misses: 0 });

            let fb = engine.renderer.frame();
            assert!((0..10).all(|x| !is_background(fb, x, 20)), "angle {angle}");
        }
    }

    #[test]
    fn missed_rays_leave_background() {
        let open = Grid::new(4, 4, TS, vec![0; 16]).unwrap();
        let cam = Camera::new(Vec2::splat(2.0 * TS), 1.0);
        let mut engine = Engine::new(Software::default(), view(8, 8, 8, 60.0));
        let summary = engine.render_frame(&cam, &open, &flat_atlas(), |_, _, _| {});
        assert_eq!(summary.misses, 8);
        let fb = engine.renderer.frame();
        assert!((0..8).all(|y| (0..8).all(|x| is_background(fb, x, y))));
    }

    #[test]
    fn frame_is_fully_overwritten() {
        let g = Grid::bordered(8, 8, TS, 1).unwrap();
        let atlas = flat_atlas();
        let mut engine = Engine::new(Software::default(), view(32, 64, 32, 60.0));

        let near = Camera::new(Vec2::new(6.5 * TS, 4.5 * TS), 0.0);
        let far = Camera::new(Vec2::new(1.5 * TS, 4.5 * TS), 0.0);
        engine.render_frame(&near, &g, &atlas, |_, _, _| {});
        engine.render_frame(&far, &g, &atlas, |_, _, _| {});

        let fresh = render_frame(&far, &g, &atlas, &engine.view);
        assert_eq!(engine.renderer.frame(), &fresh);
    }

    #[test]
    fn oversized_fov_is_clamped() {
        let g = Grid::bordered(8, 8, TS, 1).unwrap();
        let cam = Camera::new(Vec2::splat(4.5 * TS), 0.0);
        let atlas = flat_atlas();
        let mut wide = view(64, 64, 64, 0.0);
        wide.fov = MAX_FOV;
        let mut too_wide = wide;
        too_wide.fov = 270_f32.to_radians();

        let clamped = render_frame(&cam, &g, &atlas, &wide);
        assert_eq!(render_frame(&cam, &g, &atlas, &too_wide), clamped);
        // centre ray still sees the east wall 2.5 tiles away
        assert!(is_background(&clamped, 32, 0));
        assert!(!is_background(&clamped, 32, 32));

        let mut nan = wide;
        nan.fov = f32::NAN;
        let mut zero = wide;
        zero.fov = 0.0;
        assert_eq!(render_frame(&cam, &g, &atlas, &nan), render_frame(&cam, &g, &atlas, &zero));
    }

    #[test]
    fn submit_sees_configured_resolution() {
        let g = Grid::demo();
        let cam = Camera::new(Vec2::splat(48.0), 0.0);
        let mut engine = Engine::new(Software::default(), view(20, 10, 5, 66.0));
        engine.show_minimap = true;
        let mut got = (0, 0, 0);
        engine.render_frame(&cam, &g, &flat_atlas(), |px, w, h| got = (px.len(), w, h));
        assert_eq!(got, (200, 20, 10));
    }
}
