use serde::{Deserialize, Serialize};

use super::geometry::Rect;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ScreenId(u32);

impl ScreenId {
    pub const fn new(id: u32) -> Self { ScreenId(id) }
}

/// A physical monitor as reported by the display server's enumeration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScreenInfo {
    pub id: ScreenId,
    pub frame: Rect,
}

impl ScreenInfo {
    pub fn new(id: u32, frame: Rect) -> Self {
        ScreenInfo { id: ScreenId::new(id), frame }
    }

    /// Builds a list from bare frames, numbering the screens in order.
    pub fn from_frames(frames: impl IntoIterator<Item = Rect>) -> Vec<ScreenInfo> {
        frames
            .into_iter()
            .enumerate()
            .map(|(idx, frame)| ScreenInfo::new(idx as u32, frame))
            .collect()
    }
}
