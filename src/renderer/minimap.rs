//! Top-down overlay: tile grid, player marker and heading line.

use crate::{
    renderer::Renderer,
    world::{Camera, EMPTY, Grid, Rgb, rgb},
};

const WALL: Rgb = rgb(255, 255, 255);
const FLOOR: Rgb = rgb(0, 0, 0);
const PLAYER: Rgb = rgb(255, 200, 0);
const HEADING: Rgb = rgb(255, 0, 0);

/// Where and how large the overlay is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinimapLayout {
    pub origin_x: i32,
    pub origin_y: i32,
    /// Screen pixels per map cell.
    pub cell_px: i32,
}

impl MinimapLayout {
    /// Fit the map into the top-left quarter-width corner of the frame.
    pub fn fit(grid: &Grid, frame_w: usize, frame_h: usize) -> Self {
        let by_w = frame_w / 4 / grid.width().max(1);
        let by_h = frame_h / 2 / grid.height().max(1);
        Self {
            origin_x: 0,
            origin_y: 0,
            cell_px: by_w.min(by_h).max(2) as i32,
        }
    }

    /// World coordinates → overlay pixel.
    pub fn to_screen(&self, grid: &Grid, x: f32, y: f32) -> (i32, i32) {
        let k = self.cell_px as f32 / grid.tile_size();
        (
            self.origin_x + (x * k) as i32,
            self.origin_y + (y * k) as i32,
        )
    }
}

/// Paint the map and the player on top of whatever the frame holds.
///
/// Cells leave a one-pixel gap so the grid lines show through.
pub fn draw_minimap<R: Renderer>(r: &mut R, grid: &Grid, camera: &Camera, layout: &MinimapLayout) {
    let c = layout.cell_px;
    for (i, &tile) in grid.tiles().iter().enumerate() {
        let x = (i % grid.width()) as i32;
        let y = (i / grid.width()) as i32;
        let colour = if tile == EMPTY { FLOOR } else { WALL };
        r.fill_rect(
            layout.origin_x + x * c + 1,
            layout.origin_y + y * c + 1,
            c - 1,
            c - 1,
            colour,
        );
    }

    let p = camera.pos();
    let (px, py) = layout.to_screen(grid, p.x, p.y);
    let half = (c / 4).max(1);
    r.fill_rect(px - half, py - half, half * 2, half * 2, PLAYER);

    let tip = p + camera.dir() * grid.tile_size() * 1.5;
    let (tx, ty) = layout.to_screen(grid, tip.x, tip.y);
    r.draw_line(px, py, tx, ty, HEADING);
}

/*──────────────────────────────── Tests ───────────────────────────────*/
