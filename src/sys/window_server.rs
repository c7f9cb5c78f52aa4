use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle of a top-level window, as issued by the display server.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct WindowId(u64);

impl WindowId {
    pub const fn new(id: u64) -> Self { WindowId(id) }
}

impl fmt::Debug for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "WindowId({:#x})", self.0) }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:#x}", self.0) }
}

/// What the display server tells us about a window when it asks to be mapped.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowInfo {
    /// `WM_CLASS` class part, used for placement rules.
    pub class: Option<String>,
    pub title: Option<String>,
}
