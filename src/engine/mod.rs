mod engine;
mod projection;
mod raycast;
mod types;

pub use engine::{Engine, FrameSummary, render_frame};

pub use projection::{MIN_DISTANCE, Projector, corrected_distance, wall_height};

pub use raycast::{Raycaster, nearest};

pub use types::{Background, ColumnStrip, Face, HitRecord, MAX_FOV, MAX_FOV_DEGREES, Shading, ViewConfig};
