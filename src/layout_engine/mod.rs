pub mod engine;
pub mod registry;
pub mod zones;

use serde::{Deserialize, Serialize};

pub use engine::{Effect, EventResponse, LayoutCommand, LayoutEngine, LayoutError, LayoutEvent};
pub use registry::{ManagedWindow, ZoneRegistry, ZoneSlot};
pub use zones::{LogicalZone, partition};

/// Direction of travel through a cyclic sequence of zones or windows.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn step(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// `(index + step) mod len`, wrapping both ways. `len` must be non-zero.
pub(crate) fn wrapping_step(index: usize, step: isize, len: usize) -> usize {
    (index as isize + step).rem_euclid(len as isize) as usize
}
