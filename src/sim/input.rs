use bitflags::bitflags;

bitflags! {
    /// Discrete player intents collected once per tick, before rendering.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Intents: u8 {
        const ROTATE_LEFT   = 0b0001;
        const ROTATE_RIGHT  = 0b0010;
        const MOVE_FORWARD  = 0b0100;
        const MOVE_BACKWARD = 0b1000;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputCmd {
    pub intents: Intents,
    /// Edge-triggered: flip the minimap overlay this tick.
    pub toggle_minimap: bool,
}

impl InputCmd {
    /// `+1` turn right (clockwise on screen), `-1` left, `0` none or both.
    pub fn turn_axis(&self) -> f32 {
        axis(
            self.intents.contains(Intents::ROTATE_RIGHT),
            self.intents.contains(Intents::ROTATE_LEFT),
        )
    }

    /// `+1` forward, `-1` backward, `0` none or both.
    pub fn move_axis(&self) -> f32 {
        axis(
            self.intents.contains(Intents::MOVE_FORWARD),
            self.intents.contains(Intents::MOVE_BACKWARD),
        )
    }
}

#[inline]
fn axis(pos: bool, neg: bool) -> f32 {
    pos as i8 as f32 - neg as i8 as f32
}
