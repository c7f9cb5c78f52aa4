use serde::{Deserialize, Serialize};

use crate::layout_engine::LayoutEngine;
use crate::sys::geometry::Rect;
use crate::sys::window_server::WindowId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneData {
    pub index: usize,
    pub monitor: usize,
    pub sub_zone: u8,
    pub frame: Rect,
    pub is_active: bool,
    /// Front to back.
    pub windows: Vec<WindowId>,
    pub current: Option<WindowId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowData {
    pub id: WindowId,
    pub zone: usize,
    pub frame: Rect,
    pub is_focused: bool,
}

impl ZoneData {
    pub fn collect(engine: &LayoutEngine) -> Vec<ZoneData> {
        let registry = engine.registry();
        engine
            .zones()
            .iter()
            .enumerate()
            .map(|(index, zone)| ZoneData {
                index,
                monitor: zone.monitor,
                sub_zone: zone.sub_zone,
                frame: zone.frame,
                is_active: index == engine.active_zone(),
                windows: registry.slot(index).map(|s| s.windows().collect()).unwrap_or_default(),
                current: registry.current(index).map(|w| w.id),
            })
            .collect()
    }
}

impl WindowData {
    pub fn collect(engine: &LayoutEngine) -> Vec<WindowData> {
        let focused = engine.focused_window();
        engine
            .registry()
            .windows()
            .filter_map(|window| {
                Some(WindowData {
                    id: window.id,
                    zone: window.zone,
                    frame: engine.zone_frame(window.zone)?,
                    is_focused: focused == Some(window.id),
                })
            })
            .collect()
    }
}
