//! Top-down 2-D map viewer.
//!
//! ```bash
//! cargo run --release --bin map_view -- [room.map]
//! ```
//!
//! W/S/A/D or arrows walk the player marker around; Esc quits.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use minifb::{Key, Window, WindowOptions};

use grid_caster::{
    assets::load_map,
    engine::Background,
    renderer::{MinimapLayout, Renderer, Software, draw_minimap},
    sim::{FrameClock, InputCmd, Intents, MoveParams, apply_input},
    world::{Camera, Grid},
};

const WIDTH: usize = 768;
const HEIGHT: usize = 768;

#[derive(Parser, Debug)]
#[command(about = "Top-down view of a tile map")]
struct Cli {
    /// Tile map text file; the built-in room when omitted.
    map: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let grid = match &cli.map {
        Some(p) => load_map(p).with_context(|| format!("loading map {}", p.display()))?,
        None => Grid::demo(),
    };

    // ─────────── map‑space → screen‑space transform ────────────
    let cell_px = (WIDTH / grid.width()).min(HEIGHT / grid.height()).max(2) as i32;
    let layout = MinimapLayout {
        origin_x: (WIDTH as i32 - cell_px * grid.width() as i32) / 2,
        origin_y: (HEIGHT as i32 - cell_px * grid.height() as i32) / 2,
        cell_px,
    };

    let spawn = grid.spawn_point().context("map has no empty cell")?;
    let mut camera = Camera::new(spawn, 0.0);
    let params = MoveParams::for_grid(&grid);
    let background = Background {
        ceiling: 0x00_404040,
        floor: 0x00_404040,
    };

    let mut sw = Software::default();
    let mut clock = FrameClock::new(60);
    let mut win = Window::new("Tile map", WIDTH, HEIGHT, WindowOptions::default())?;

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let dt = clock.tick();
        let mut intents = Intents::empty();
        for (keys, intent) in [
            ([Key::W, Key::Up], Intents::MOVE_FORWARD),
            ([Key::S, Key::Down], Intents::MOVE_BACKWARD),
            ([Key::A, Key::Left], Intents::ROTATE_LEFT),
            ([Key::D, Key::Right], Intents::ROTATE_RIGHT),
        ] {
            if keys.iter().any(|&k| win.is_key_down(k)) {
                intents |= intent;
            }
        }
        let cmd = InputCmd {
            intents,
            ..Default::default()
        };
        apply_input(&mut camera, &grid, &cmd, dt, &params);

        sw.begin_frame(WIDTH, HEIGHT, &background);
        draw_minimap(&mut sw, &grid, &camera, &layout);
        let mut presented = Ok(());
        sw.end_frame(|fb, w, h| presented = win.update_with_buffer(fb, w, h));
        presented?;

        clock.pace();
    }
    Ok(())
}
