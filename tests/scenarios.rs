//! End-to-end frames through the public API.

use std::f32::consts::{PI, TAU};
use std::io::Write;

use glam::Vec2;
use grid_caster::{
    assets::{format_map, load_atlas, load_map, write_atlas},
    engine::{Engine, Face, Projector, Raycaster, Shading, ViewConfig, render_frame},
    renderer::Software,
    world::{Camera, EMPTY, Grid, TextureAtlas, normalize_angle},
};

const TS: f32 = 64.0;

fn room() -> Grid {
    Grid::bordered(8, 8, TS, 1).unwrap()
}

fn view(width: usize, height: usize, num_rays: usize, fov_deg: f32) -> ViewConfig {
    ViewConfig {
        width,
        height,
        num_rays,
        fov: fov_deg.to_radians(),
        ..ViewConfig::default()
    }
}

fn empty_cell_centres(g: &Grid) -> Vec<Vec2> {
    let mut out = Vec::new();
    for y in 0..g.height() as i32 {
        for x in 0..g.width() as i32 {
            if g.tile_at(x, y) == Some(EMPTY) {
                out.push(Vec2::new(x as f32 + 0.5, y as f32 + 0.5) * g.tile_size());
            }
        }
    }
    out
}

#[test]
fn facing_east_in_square_room() {
    let g = room();
    let cam = Camera::new(Vec2::splat(4.5 * TS), 0.0);
    let hit = Raycaster::new(&g).cast_ray(&cam, cam.angle()).unwrap();

    // inner face of the east wall is x = 7 * TS
    assert_eq!(hit.face, Face::Vertical);
    assert_eq!(hit.tile, 1);
    assert!((hit.distance - 2.5 * TS).abs() < 1e-3);
    assert!((hit.point - Vec2::new(7.0 * TS, 4.5 * TS)).length() < 1e-3);

    let atlas = TextureAtlas::procedural();
    let proj = Projector::for_atlas(512, TS, &atlas, Shading::default());
    let strip = proj.project(&hit, &cam, cam.angle());
    assert!((strip.height - TS * 512.0 / (2.5 * TS)).abs() < 1e-2);
    assert!((strip.top + strip.height * 0.5 - 256.0).abs() < 1e-2);
}

#[test]
fn every_direction_hits_in_enclosed_maps() {
    for g in [room(), Grid::demo()] {
        assert!(g.is_enclosed());
        let rc = Raycaster::new(&g);
        for origin in empty_cell_centres(&g) {
            for i in 0..720 {
                let angle = i as f32 * TAU / 720.0;
                let cam = Camera::new(origin, angle);
                let hit = rc.cast_ray(&cam, angle);
                assert!(hit.is_some(), "miss from {origin:?} at {angle}");
                assert!(hit.unwrap().distance > 0.0);
            }
        }
    }
}

#[test]
fn camera_on_grid_line_is_repeatable() {
    let g = room();
    let rc = Raycaster::new(&g);
    let cam = Camera::new(Vec2::new(3.0 * TS, 3.0 * TS), 0.3);
    for angle in [0.0, 0.3, PI * 0.5, PI, 4.0] {
        assert_eq!(rc.cast_ray(&cam, angle), rc.cast_ray(&cam, angle));
    }
    let a = render_frame(&cam, &g, &TextureAtlas::procedural(), &view(64, 32, 64, 60.0));
    let b = render_frame(&cam, &g, &TextureAtlas::procedural(), &view(64, 32, 64, 60.0));
    assert_eq!(a, b);
}

#[test]
fn zero_fov_single_ray_paints_uniform_columns() {
    let g = room();
    let cam = Camera::new(Vec2::new(2.5 * TS, 4.5 * TS), 0.0);
    let fb = render_frame(&cam, &g, &TextureAtlas::procedural(), &view(40, 100, 1, 0.0));
    for y in 0..100 {
        let first = fb.pixel(0, y);
        assert!((1..40).all(|x| fb.pixel(x, y) == first), "row {y}");
    }
}

#[test]
fn full_turn_in_steps_returns_home() {
    let mut cam = Camera::new(Vec2::splat(100.0), 1.0);
    let n = 360;
    for _ in 0..n {
        cam.rotate(TAU / n as f32);
    }
    assert!((0.0..TAU).contains(&cam.angle()));
    let diff = normalize_angle(cam.angle() - 1.0);
    assert!(diff < 1e-3 || TAU - diff < 1e-3);
}

#[test]
fn closer_walls_draw_taller() {
    let g = room();
    let atlas = TextureAtlas::procedural();
    let v = view(8, 400, 1, 0.0);
    let wall_rows = |x: f32| {
        let cam = Camera::new(Vec2::new(x, 4.5 * TS), 0.0);
        let fb = render_frame(&cam, &g, &atlas, &v);
        let bg = v.background;
        (0..400)
            .filter(|&y| {
                let p = fb.pixel(4, y).unwrap();
                p != bg.ceiling && p != bg.floor
            })
            .count()
    };
    assert!(wall_rows(5.5 * TS) > wall_rows(2.5 * TS));
}

#[test]
fn files_on_disk_render_like_built_ins() {
    let grid = Grid::demo();
    let atlas = TextureAtlas::procedural();

    let mut map_file = tempfile::NamedTempFile::new().unwrap();
    map_file.write_all(format_map(&grid).as_bytes()).unwrap();
    let mut atlas_file = tempfile::NamedTempFile::new().unwrap();
    write_atlas(&mut atlas_file, &atlas).unwrap();
    atlas_file.flush().unwrap();

    let loaded_grid = load_map(map_file.path()).unwrap();
    let loaded_atlas = load_atlas(atlas_file.path()).unwrap();
    assert_eq!(loaded_grid, grid);

    let cam = Camera::new(grid.spawn_point().unwrap(), 0.7);
    let v = view(96, 48, 48, 66.0);
    assert_eq!(
        render_frame(&cam, &loaded_grid, &loaded_atlas, &v),
        render_frame(&cam, &grid, &atlas, &v)
    );
}

#[test]
fn engine_reuses_buffer_across_resolutions() {
    let g = Grid::demo();
    let atlas = TextureAtlas::procedural();
    let cam = Camera::new(g.spawn_point().unwrap(), 0.0);
    let mut engine = Engine::new(Software::default(), view(64, 32, 16, 60.0));

    engine.render_frame(&cam, &g, &atlas, |px, w, h| assert_eq!(px.len(), w * h));
    engine.view = view(32, 16, 8, 60.0);
    let mut dims = (0, 0);
    engine.render_frame(&cam, &g, &atlas, |_, w, h| dims = (w, h));
    assert_eq!(dims, (32, 16));
    assert_eq!(engine.renderer.frame(), &render_frame(&cam, &g, &atlas, &engine.view));
}
