//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::{
    engine::{Background, MAX_FOV_DEGREES, Shading, ViewConfig},
    sim::{MOVE_SPEED, TARGET_FPS, TURN_RATE},
};

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("screen size must be non-zero (got {width}×{height})")]
    ZeroScreen { width: usize, height: usize },

    #[error("ray count must be between 1 and the screen width {width} (got {rays})")]
    BadRayCount { rays: usize, width: usize },

    #[error("field of view must lie in [0, 179] degrees (got {0})")]
    BadFov(f32),

    #[error("depth must be at least 1")]
    ZeroDepth,

    #[error("{what} must be a finite, non-negative number (got {value})")]
    BadNumber { what: &'static str, value: f32 },
}

/// Grid ray-caster.
///
/// Controls: W/S or ↑/↓ move, A/D or ←/→ turn, M toggles the minimap,
/// Esc quits.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Args {
    /// Tile map text file; the built-in 8×8 room when omitted.
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Binary texture atlas; the built-in procedural set when omitted.
    #[arg(long)]
    pub atlas: Option<PathBuf>,

    /// Window width in pixels.
    #[arg(long, default_value_t = 1024)]
    pub width: usize,

    /// Window height in pixels.
    #[arg(long, default_value_t = 512)]
    pub height: usize,

    /// Rays per frame; each covers width / rays pixel columns.
    #[arg(long, default_value_t = 256)]
    pub rays: usize,

    /// Horizontal field of view in degrees.
    #[arg(long, default_value_t = 60.0)]
    pub fov: f32,

    /// Grid steps per sweep (default: largest map dimension).
    #[arg(long)]
    pub depth: Option<usize>,

    /// Target frame rate.
    #[arg(long, default_value_t = TARGET_FPS)]
    pub fps: u32,

    /// Walking speed, map units per second.
    #[arg(long, default_value_t = MOVE_SPEED)]
    pub move_speed: f32,

    /// Turning speed, degrees per second.
    #[arg(long, default_value_t = TURN_RATE.to_degrees())]
    pub turn_speed: f32,

    /// Brightness of vertical-face walls relative to horizontal ones.
    #[arg(long, default_value_t = 0.7)]
    pub vertical_shade: f32,

    /// Distance up to which walls stay fully lit.
    #[arg(long, default_value_t = 128.0)]
    pub fog: f32,

    /// Start with the minimap overlay visible.
    #[arg(long)]
    pub minimap: bool,
}

impl Args {
    /// Validate the rendering options.
    pub fn view_config(&self) -> Result<ViewConfig, ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroScreen {
                width: self.width,
                height: self.height,
            });
        }
        if self.rays == 0 || self.rays > self.width {
            return Err(ConfigError::BadRayCount {
                rays: self.rays,
                width: self.width,
            });
        }
        if !(self.fov.is_finite() && (0.0..=MAX_FOV_DEGREES).contains(&self.fov)) {
            return Err(ConfigError::BadFov(self.fov));
        }
        if self.depth == Some(0) {
            return Err(ConfigError::ZeroDepth);
        }
        non_negative("vertical shade", self.vertical_shade)?;
        non_negative("fog distance", self.fog)?;

        Ok(ViewConfig {
            width: self.width,
            height: self.height,
            num_rays: self.rays,
            fov: self.fov.to_radians(),
            max_depth: self.depth,
            shading: Shading {
                vertical_face: self.vertical_shade.min(1.0),
                fog_distance: self.fog,
            },
            background: Background::default(),
        })
    }

    /// Movement speeds in simulation units (turn rate in rad/s).
    pub fn speeds(&self) -> Result<(f32, f32), ConfigError> {
        non_negative("move speed", self.move_speed)?;
        non_negative("turn speed", self.turn_speed)?;
        Ok((self.move_speed, self.turn_speed.to_radians()))
    }
}

fn non_negative(what: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::BadNumber { what, value })
    }
}
