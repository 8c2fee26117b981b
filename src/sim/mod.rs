mod input;
mod movement;
mod tic;

pub use input::{InputCmd, Intents};
pub use movement::{MOVE_SPEED, MoveParams, MoveResult, TURN_RATE, apply_input, is_free};
pub use tic::{FrameClock, FrameStats, MAX_DT, TARGET_FPS};
