//! Partitioning of physical monitors into zones.

use serde::{Deserialize, Serialize};

use crate::common::config::ZoneSettings;
use crate::sys::geometry::Rect;
use crate::sys::screen::ScreenInfo;

/// A placement region carved out of one physical monitor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalZone {
    pub frame: Rect,
    /// Position of the source monitor in the list handed to [`partition`].
    pub monitor: usize,
    /// 0 for an unsplit monitor; 0, 1, 2 for left, center, right of a split one.
    pub sub_zone: u8,
}

/// Computes the zones for `screens`, in screen order.
///
/// A screen strictly wider than the threshold becomes three zones (left,
/// center, right); anything else becomes one. Each split width is truncated
/// independently, so a few pixels can be left over at the right edge.
pub fn partition(screens: &[ScreenInfo], settings: &ZoneSettings) -> Vec<LogicalZone> {
    let mut zones = Vec::with_capacity(zone_count(screens, settings));
    for (monitor, screen) in screens.iter().enumerate() {
        let frame = screen.frame;
        if !is_ultrawide(frame, settings) {
            zones.push(LogicalZone { frame, monitor, sub_zone: 0 });
            continue;
        }

        let left = scaled(frame.width, settings.left_ratio);
        let center = scaled(frame.width, settings.center_ratio);
        let right = scaled(frame.width, settings.right_ratio);
        let splits = [(0, left), (left, center), (left + center, right)];
        for (sub_zone, (offset, width)) in splits.into_iter().enumerate() {
            zones.push(LogicalZone {
                frame: Rect::new(
                    frame.x.saturating_add_unsigned(offset),
                    frame.y,
                    width,
                    frame.height,
                ),
                monitor,
                sub_zone: sub_zone as u8,
            });
        }
    }
    zones
}

pub fn zone_count(screens: &[ScreenInfo], settings: &ZoneSettings) -> usize {
    screens
        .iter()
        .map(|screen| if is_ultrawide(screen.frame, settings) { 3 } else { 1 })
        .sum()
}

fn is_ultrawide(frame: Rect, settings: &ZoneSettings) -> bool {
    frame.width > settings.ultrawide_threshold
}

fn scaled(width: u32, ratio: f64) -> u32 { (width as f64 * ratio) as u32 }
