//! First-person grid ray-caster.
//!
//! ```bash
//! cargo run --release -- [--map room.map] [--atlas walls.rctx] [--minimap]
//! ```

use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use grid_caster::{
    assets::{load_atlas, load_map},
    config::Args,
    engine::Engine,
    renderer::Software,
    sim::{FrameClock, FrameStats, InputCmd, Intents, MoveParams, apply_input},
    world::{Camera, Grid, TextureAtlas},
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // ─────────── parse CLI ────────────
    let args = Args::parse();
    let view = args.view_config()?;
    let (move_speed, turn_rate) = args.speeds()?;

    // ─────────── load map & textures ───────
    let grid = match &args.map {
        Some(path) => load_map(path).with_context(|| format!("loading map {}", path.display()))?,
        None => Grid::demo(),
    };
    let atlas = match &args.atlas {
        Some(path) => {
            load_atlas(path).with_context(|| format!("loading atlas {}", path.display()))?
        }
        None => TextureAtlas::procedural(),
    };
    if !grid.is_enclosed() {
        log::warn!("map border is open; columns looking outside render as background");
    }

    let spawn = grid
        .spawn_point()
        .context("map has no empty cell to start in")?;
    let mut camera = Camera::new(spawn, 0.0);
    let params = MoveParams {
        move_speed,
        turn_rate,
        ..MoveParams::for_grid(&grid)
    };

    let mut engine = Engine::new(Software::default(), view);
    engine.show_minimap = args.minimap;

    // ─────────── show window ────────────
    let mut win = Window::new("Grid Caster", view.width, view.height, WindowOptions::default())?;

    let mut clock = FrameClock::new(args.fps);
    let mut stats = FrameStats::new(Duration::from_secs(3));
    log::info!(
        "{}×{} window, {} rays, fov {:.0}°",
        view.width,
        view.height,
        view.num_rays,
        view.fov.to_degrees()
    );

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let dt = clock.tick();

        /* --------------- one InputCmd per tick ----------------------- */
        let cmd = read_input(&win);
        if cmd.toggle_minimap {
            engine.show_minimap = !engine.show_minimap;
        }
        apply_input(&mut camera, &grid, &cmd, dt, &params);

        /* draw */
        let t0 = Instant::now();
        let mut presented = Ok(());
        engine.render_frame(&camera, &grid, &atlas, |fb, w, h| {
            presented = win.update_with_buffer(fb, w, h);
        });
        presented?;

        // ─────────── report every ~3 s ────────────────────
        if let Some((avg_ms, fps)) = stats.record(t0.elapsed()) {
            log::info!("avg render: {avg_ms:.2} ms ({fps:.1} FPS)");
        }

        clock.pace();
    }
    Ok(())
}

fn read_input(win: &Window) -> InputCmd {
    let mut intents = Intents::empty();
    if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
        intents |= Intents::MOVE_FORWARD;
    }
    if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
        intents |= Intents::MOVE_BACKWARD;
    }
    if win.is_key_down(Key::Left) || win.is_key_down(Key::A) {
        intents |= Intents::ROTATE_LEFT;
    }
    if win.is_key_down(Key::Right) || win.is_key_down(Key::D) {
        intents |= Intents::ROTATE_RIGHT;
    }
    InputCmd {
        intents,
        toggle_minimap: win.is_key_pressed(Key::M, KeyRepeat::No), // edge-trigger
    }
}
