/// Normalized input, as the host sees it at the start of a frame.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire button currently held.  Edges are detected by the weapon
    /// controller, not here.
    pub fire: bool,
    /// One-shot: true only on the frame the use-item key was pressed.
    pub use_item: bool,
}

impl InputState {
    pub fn firing() -> Self {
        Self {
            fire: true,
            ..Self::default()
        }
    }

    /// Horizontal and vertical direction in `-1..=1`.
    pub fn axis(&self) -> (f32, f32) {
        let x = match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        let y = match (self.up, self.down) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        (x, y)
    }
}
