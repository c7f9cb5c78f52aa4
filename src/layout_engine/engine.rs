use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace, warn};

use super::registry::ZoneRegistry;
use super::zones::{LogicalZone, partition};
use super::{Direction, wrapping_step};
use crate::common::config::{AppRule, Config, RuleTarget, ZoneSettings};
use crate::sys::geometry::Rect;
use crate::sys::screen::ScreenInfo;
use crate::sys::window_server::{WindowId, WindowInfo};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("no zones: the monitor list is empty")]
    NoZones,
}

#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LayoutCommand {
    NextWindow,
    PrevWindow,
    FocusZone(Direction),
    MoveWindow(Direction),
    CloseWindow,
}

#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum LayoutEvent {
    ScreensChanged(Vec<ScreenInfo>),
    /// A new top-level window asked to be managed. `zone` is the caller's
    /// choice of zone, if it has one.
    WindowAdded {
        wid: WindowId,
        info: WindowInfo,
        zone: Option<usize>,
    },
    WindowRemoved(WindowId),
    /// The pointer entered the window. Focus follows it.
    WindowEntered(WindowId),
}

/// Something the display server has to do on our behalf.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Unfocus(WindowId),
    /// Raise, give input focus and highlight.
    Focus(WindowId),
    Place(WindowId, Rect),
    /// Ask the window to close; the display server picks polite or forced.
    Close(WindowId),
}

/// Effects of one event or command, in the order they must be applied.
#[must_use]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventResponse {
    pub effects: Vec<Effect>,
}

impl EventResponse {
    pub fn is_empty(&self) -> bool { self.effects.is_empty() }

    fn push(&mut self, effect: Effect) { self.effects.push(effect) }
}

/// Zones, their windows, and which zone the user is working in.
///
/// Every method runs to completion and reports what the display server has to
/// do in the returned [`EventResponse`]. Nothing here is shared; the reactor
/// owns the only instance and serializes access to it.
#[derive(Debug)]
pub struct LayoutEngine {
    settings: ZoneSettings,
    rules: Vec<AppRule>,
    screens: Vec<ScreenInfo>,
    zones: Vec<LogicalZone>,
    registry: ZoneRegistry,
    active_zone: usize,
}

impl LayoutEngine {
    /// Builds the engine for the initial monitor list. Fails with
    /// [`LayoutError::NoZones`] if the list yields no zones.
    pub fn new(screens: Vec<ScreenInfo>, config: &Config) -> Result<LayoutEngine, LayoutError> {
        let zones = partition(&screens, &config.settings.zones);
        if zones.is_empty() {
            return Err(LayoutError::NoZones);
        }
        debug!(zones = zones.len(), screens = screens.len(), "Layout engine created");
        Ok(LayoutEngine {
            settings: config.settings.zones,
            rules: config.rules.clone(),
            registry: ZoneRegistry::new(zones.len()),
            screens,
            zones,
            active_zone: 0,
        })
    }

    pub fn zones(&self) -> &[LogicalZone] { &self.zones }

    pub fn zone_count(&self) -> usize { self.zones.len() }

    pub fn screens(&self) -> &[ScreenInfo] { &self.screens }

    pub fn registry(&self) -> &ZoneRegistry { &self.registry }

    pub fn active_zone(&self) -> usize { self.active_zone }

    /// The current window of the active zone, i.e. the one holding focus.
    pub fn focused_window(&self) -> Option<WindowId> {
        self.registry.current(self.active_zone).map(|w| w.id)
    }

    pub fn zone_frame(&self, zone: usize) -> Option<Rect> { self.zones.get(zone).map(|z| z.frame) }

    /// Applies new zone settings and rules. Changed zone settings re-partition
    /// the current monitors as if they had been reconnected.
    pub fn update_config(&mut self, config: &Config) -> EventResponse {
        self.rules = config.rules.clone();
        if self.settings == config.settings.zones {
            return EventResponse::default();
        }
        self.settings = config.settings.zones;
        let screens = self.screens.clone();
        self.screens_changed(screens)
    }

    pub fn handle_event(&mut self, event: LayoutEvent) -> EventResponse {
        debug!(?event);
        match event {
            LayoutEvent::ScreensChanged(screens) => self.screens_changed(screens),
            LayoutEvent::WindowAdded { wid, info, zone } => self.window_added(wid, &info, zone),
            LayoutEvent::WindowRemoved(wid) => self.window_removed(wid),
            LayoutEvent::WindowEntered(wid) => self.window_entered(wid),
        }
    }

    pub fn handle_command(&mut self, command: LayoutCommand) -> EventResponse {
        debug!(?command, active_zone = self.active_zone, focused = ?self.focused_window());
        match command {
            LayoutCommand::NextWindow => self.cycle_focus(1),
            LayoutCommand::PrevWindow => self.cycle_focus(-1),
            LayoutCommand::FocusZone(direction) => self.cycle_zone(direction.step()),
            LayoutCommand::MoveWindow(direction) => self.move_window(direction.step()),
            LayoutCommand::CloseWindow => self.close_window(),
        }
    }

    fn cycle_focus(&mut self, step: isize) -> EventResponse {
        let zone = self.active_zone;
        let mut response = EventResponse::default();
        if self.registry.count(zone) <= 1 {
            trace!(zone, "Nothing to cycle to");
            return response;
        }
        if let Some(current) = self.registry.current(zone) {
            response.push(Effect::Unfocus(current.id));
        }
        if let Some(next) = self.registry.rotate_current(zone, step) {
            response.push(Effect::Focus(next.id));
        }
        response
    }

    fn cycle_zone(&mut self, step: isize) -> EventResponse {
        let mut response = EventResponse::default();
        if self.zone_count() <= 1 {
            return response;
        }
        if let Some(current) = self.registry.current(self.active_zone) {
            response.push(Effect::Unfocus(current.id));
        }
        self.active_zone = wrapping_step(self.active_zone, step, self.zone_count());
        debug!(active_zone = self.active_zone, "Active zone changed");
        if let Some(current) = self.registry.current(self.active_zone) {
            response.push(Effect::Focus(current.id));
        }
        response
    }

    fn move_window(&mut self, step: isize) -> EventResponse {
        let mut response = EventResponse::default();
        if self.zone_count() <= 1 {
            return response;
        }
        let source = self.active_zone;
        let Some(window) = self.registry.current(source) else {
            return response;
        };
        let target = wrapping_step(source, step, self.zone_count());

        self.registry.remove(source, window.id);
        self.registry.add(target, window.id);
        self.active_zone = target;
        debug!(wid = ?window.id, source, target, "Moved window");

        response.push(Effect::Place(window.id, self.zones[target].frame));
        response.push(Effect::Focus(window.id));
        response
    }

    /// Termination is asynchronous: the window stays managed until the
    /// display server reports it gone.
    fn close_window(&mut self) -> EventResponse {
        let mut response = EventResponse::default();
        if let Some(window) = self.registry.current(self.active_zone) {
            response.push(Effect::Close(window.id));
        }
        response
    }

    fn window_added(
        &mut self,
        wid: WindowId,
        info: &WindowInfo,
        requested: Option<usize>,
    ) -> EventResponse {
        let mut response = EventResponse::default();
        if self.registry.contains(wid) {
            warn!(?wid, "Window is already managed; ignoring");
            return response;
        }
        let zone = self.zone_for_new_window(info, requested);
        let focused = self.focused_window();
        self.registry.add(zone, wid);
        debug!(?wid, zone, class = ?info.class, "Window added");

        response.push(Effect::Place(wid, self.zones[zone].frame));
        // Front insertion can move a non-zero index onto another window.
        self.push_focus_change(&mut response, focused);
        response
    }

    fn window_entered(&mut self, wid: WindowId) -> EventResponse {
        let mut response = EventResponse::default();
        let Some(zone) = self.registry.zone_for_window(wid) else {
            trace!(?wid, "Pointer entered an unmanaged window");
            return response;
        };
        let focused = self.focused_window();
        if focused == Some(wid) {
            return response;
        }
        self.registry.select(wid);
        self.active_zone = zone;
        debug!(?wid, zone, "Focus follows pointer");
        self.push_focus_change(&mut response, focused);
        response
    }

    /// Unfocuses `before` and focuses the current window if the focused
    /// window is no longer `before`.
    fn push_focus_change(&self, response: &mut EventResponse, before: Option<WindowId>) {
        let after = self.focused_window();
        if after == before {
            return;
        }
        if let Some(before) = before {
            response.push(Effect::Unfocus(before));
        }
        if let Some(after) = after {
            response.push(Effect::Focus(after));
        }
    }

    fn window_removed(&mut self, wid: WindowId) -> EventResponse {
        let mut response = EventResponse::default();
        let Some(zone) = self.registry.zone_for_window(wid) else {
            trace!(?wid, "Untracked window removed; ignoring");
            return response;
        };
        let was_focused = zone == self.active_zone && self.focused_window() == Some(wid);
        self.registry.remove_window(wid);
        debug!(?wid, zone, "Window removed");

        if was_focused {
            if let Some(next) = self.registry.current(zone) {
                response.push(Effect::Focus(next.id));
            }
        }
        response
    }

    fn screens_changed(&mut self, screens: Vec<ScreenInfo>) -> EventResponse {
        let zones = partition(&screens, &self.settings);
        if zones.is_empty() {
            error!("Monitor list became empty; keeping the previous zones");
            return EventResponse::default();
        }
        debug!(old = self.zones.len(), new = zones.len(), "Rebuilding zones");
        let focused = self.focused_window();
        self.screens = screens;
        self.zones = zones;

        let orphans = self.registry.resize(self.zones.len());
        self.active_zone = self.active_zone.min(self.zones.len() - 1);
        if !orphans.is_empty() {
            debug!(?orphans, zone = self.active_zone, "Moving windows off removed zones");
        }
        for wid in orphans {
            self.registry.add(self.active_zone, wid);
        }

        let mut response = EventResponse::default();
        for window in self.registry.windows() {
            response.push(Effect::Place(window.id, self.zones[window.zone].frame));
        }
        match self.focused_window() {
            // Placing may have dropped the highlight; restore it.
            Some(current) if Some(current) == focused => response.push(Effect::Focus(current)),
            _ => self.push_focus_change(&mut response, focused),
        }
        response
    }

    /// Zone for a newly appeared window: an explicit valid request wins, then
    /// the first rule matching the window class, then the active zone.
    fn zone_for_new_window(&self, info: &WindowInfo, requested: Option<usize>) -> usize {
        if let Some(zone) = requested {
            if zone < self.zone_count() {
                return zone;
            }
            warn!(zone, "Requested zone does not exist; using rules");
        }
        let Some(class) = info.class.as_deref() else {
            return self.active_zone;
        };
        let Some(rule) = self.rules.iter().find(|rule| rule.matches(class)) else {
            return self.active_zone;
        };
        match rule.target().and_then(|target| self.resolve_rule_target(target)) {
            Some(zone) => {
                trace!(class, zone, "Placement rule matched");
                zone
            }
            None => {
                warn!(class, ?rule, "Placement rule target does not exist; using active zone");
                self.active_zone
            }
        }
    }

    /// A monitor target means the monitor's center zone when it is split and
    /// its only zone otherwise.
    fn resolve_rule_target(&self, target: RuleTarget) -> Option<usize> {
        match target {
            RuleTarget::Zone(zone) => (zone < self.zone_count()).then_some(zone),
            RuleTarget::Monitor(monitor) => {
                let mut on_monitor = self
                    .zones
                    .iter()
                    .enumerate()
                    .filter(|(_, zone)| zone.monitor == monitor)
                    .map(|(idx, _)| idx);
                let first = on_monitor.next()?;
                Some(on_monitor.next().unwrap_or(first))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::common::config::AppRule;

    fn w(id: u64) -> WindowId { WindowId::new(id) }

    fn screens(widths: &[u32]) -> Vec<ScreenInfo> {
        let mut x = 0;
        let frames = widths.iter().map(|&width| {
            let frame = Rect::new(x, 0, width, 1440);
            x += width as i32;
            frame
        });
        ScreenInfo::from_frames(frames)
    }

    /// Monitor widths giving 1, 2, 3 and 5 zones.
    fn layouts() -> Vec<Vec<u32>> {
        vec![vec![1920], vec![1920, 1920], vec![5120], vec![1920, 5120, 1920]]
    }

    fn engine(widths: &[u32]) -> LayoutEngine {
        LayoutEngine::new(screens(widths), &Config::default()).expect("engine")
    }

    fn add(engine: &mut LayoutEngine, id: u64, zone: usize) -> EventResponse {
        engine.handle_event(LayoutEvent::WindowAdded {
            wid: w(id),
            info: WindowInfo::default(),
            zone: Some(zone),
        })
    }

    fn members(engine: &LayoutEngine, zone: usize) -> Vec<WindowId> {
        engine.registry().slot(zone).map(|s| s.windows().collect()).unwrap_or_default()
    }

    #[test]
    fn no_monitors_is_fatal() {
        assert_eq!(
            LayoutEngine::new(vec![], &Config::default()).unwrap_err(),
            LayoutError::NoZones
        );
    }

    #[test]
    fn cycling_windows_in_zone_with_zero_or_one_members_is_a_no_op() {
        let mut engine = engine(&[1920, 1920]);
        assert!(engine.handle_command(LayoutCommand::NextWindow).is_empty());
        let _ = add(&mut engine, 1, 0);
        for _ in 0..3 {
            assert!(engine.handle_command(LayoutCommand::NextWindow).is_empty());
            assert!(engine.handle_command(LayoutCommand::PrevWindow).is_empty());
            assert_eq!(engine.focused_window(), Some(w(1)));
        }
    }

    #[test]
    fn cycling_windows_emits_unfocus_then_focus() {
        let mut engine = engine(&[1920]);
        let _ = add(&mut engine, 1, 0);
        let _ = add(&mut engine, 2, 0);
        let response = engine.handle_command(LayoutCommand::NextWindow);
        assert_eq!(response.effects, vec![Effect::Unfocus(w(2)), Effect::Focus(w(1))]);
        assert_eq!(engine.focused_window(), Some(w(1)));
    }

    #[test]
    fn cycling_windows_visits_every_member_once_per_round() {
        for count in [1u64, 2, 3, 5] {
            for command in [LayoutCommand::NextWindow, LayoutCommand::PrevWindow] {
                let mut engine = engine(&[1920]);
                for id in 1..=count {
                    let _ = add(&mut engine, id, 0);
                }
                let start = engine.focused_window();
                let mut seen = Vec::new();
                for _ in 0..count {
                    let _ = engine.handle_command(command);
                    seen.push(engine.focused_window().expect("focused"));
                }
                assert_eq!(engine.focused_window(), start, "{count} windows, {command:?}");
                seen.sort();
                seen.dedup();
                assert_eq!(seen.len() as u64, count);
            }
        }
    }

    #[test]
    fn cycling_zones_visits_every_zone_once_per_round() {
        for widths in layouts() {
            for direction in [Direction::Left, Direction::Right] {
                let mut engine = engine(&widths);
                let count = engine.zone_count();
                let mut seen = Vec::new();
                for _ in 0..count {
                    let _ = engine.handle_command(LayoutCommand::FocusZone(direction));
                    seen.push(engine.active_zone());
                }
                assert_eq!(engine.active_zone(), 0, "{count} zones, {direction:?}");
                seen.sort();
                seen.dedup();
                assert_eq!(seen.len(), count);
            }
        }
    }

    #[test]
    fn cycling_zones_wraps_left() {
        let mut engine = engine(&[1920, 5120, 1920]);
        let _ = engine.handle_command(LayoutCommand::FocusZone(Direction::Left));
        assert_eq!(engine.active_zone(), 4);
        let _ = engine.handle_command(LayoutCommand::FocusZone(Direction::Left));
        assert_eq!(engine.active_zone(), 3);
    }

    #[test]
    fn cycling_into_an_empty_zone_emits_no_focus() {
        let mut engine = engine(&[1920, 1920]);
        let _ = add(&mut engine, 1, 0);
        let response = engine.handle_command(LayoutCommand::FocusZone(Direction::Right));
        assert_eq!(response.effects, vec![Effect::Unfocus(w(1))]);
        assert_eq!(engine.active_zone(), 1);
        assert_eq!(engine.focused_window(), None);

        let response = engine.handle_command(LayoutCommand::FocusZone(Direction::Right));
        assert_eq!(response.effects, vec![Effect::Focus(w(1))]);
    }

    #[test]
    fn single_zone_ignores_zone_commands() {
        let mut engine = engine(&[1920]);
        let _ = add(&mut engine, 1, 0);
        for direction in [Direction::Left, Direction::Right] {
            assert!(engine.handle_command(LayoutCommand::FocusZone(direction)).is_empty());
            assert!(engine.handle_command(LayoutCommand::MoveWindow(direction)).is_empty());
        }
        assert_eq!(members(&engine, 0), vec![w(1)]);
    }

    #[test]
    fn moving_a_window_transfers_ownership_and_focus() {
        let mut engine = engine(&[1920, 5120]);
        let _ = add(&mut engine, 1, 0);
        let _ = add(&mut engine, 2, 0);

        let response = engine.handle_command(LayoutCommand::MoveWindow(Direction::Right));
        assert_eq!(
            response.effects,
            vec![Effect::Place(w(2), Rect::new(1920, 0, 1280, 1440)), Effect::Focus(w(2))]
        );
        assert_eq!(members(&engine, 0), vec![w(1)]);
        assert_eq!(members(&engine, 1), vec![w(2)]);
        assert_eq!(engine.active_zone(), 1);
        assert_eq!(engine.registry().zone_for_window(w(2)), Some(1));
        assert_eq!(engine.focused_window(), Some(w(2)));
        assert_eq!(engine.registry().current(0).map(|m| m.id), Some(w(1)));
    }

    #[test]
    fn moving_left_from_first_zone_wraps() {
        let mut engine = engine(&[1920, 1920, 1920]);
        let _ = add(&mut engine, 1, 0);
        let _ = engine.handle_command(LayoutCommand::MoveWindow(Direction::Left));
        assert_eq!(members(&engine, 2), vec![w(1)]);
        assert_eq!(engine.active_zone(), 2);
    }

    #[test]
    fn moving_into_occupied_zone_uses_front_insertion() {
        let mut engine = engine(&[1920, 1920]);
        let _ = add(&mut engine, 10, 1);
        let _ = add(&mut engine, 11, 1);
        // zone 1 is [11, 10]; select 10 so its index is 1
        let _ = engine.handle_command(LayoutCommand::FocusZone(Direction::Right));
        let _ = engine.handle_command(LayoutCommand::NextWindow);
        assert_eq!(engine.focused_window(), Some(w(10)));
        let _ = engine.handle_command(LayoutCommand::FocusZone(Direction::Left));

        let _ = add(&mut engine, 1, 0);
        let _ = engine.handle_command(LayoutCommand::MoveWindow(Direction::Right));
        assert_eq!(members(&engine, 1), vec![w(1), w(11), w(10)]);
        // index 1 stayed put and now designates 11
        assert_eq!(engine.focused_window(), Some(w(11)));
    }

    #[test]
    fn moving_with_no_window_is_a_no_op() {
        let mut engine = engine(&[1920, 1920]);
        assert!(engine.handle_command(LayoutCommand::MoveWindow(Direction::Right)).is_empty());
        assert_eq!(engine.active_zone(), 0);
    }

    #[test]
    fn close_requests_but_keeps_window() {
        let mut engine = engine(&[1920]);
        assert!(engine.handle_command(LayoutCommand::CloseWindow).is_empty());
        let _ = add(&mut engine, 1, 0);
        let response = engine.handle_command(LayoutCommand::CloseWindow);
        assert_eq!(response.effects, vec![Effect::Close(w(1))]);
        assert!(engine.registry().contains(w(1)));

        let response = engine.handle_event(LayoutEvent::WindowRemoved(w(1)));
        assert!(response.is_empty());
        assert!(!engine.registry().contains(w(1)));
    }

    #[test]
    fn added_window_is_placed_and_focused_in_active_zone() {
        let mut engine = engine(&[1920, 1920]);
        let response = add(&mut engine, 1, 0);
        assert_eq!(
            response.effects,
            vec![Effect::Place(w(1), Rect::new(0, 0, 1920, 1440)), Effect::Focus(w(1))]
        );
        let response = add(&mut engine, 2, 0);
        assert_eq!(
            response.effects,
            vec![
                Effect::Place(w(2), Rect::new(0, 0, 1920, 1440)),
                Effect::Unfocus(w(1)),
                Effect::Focus(w(2)),
            ]
        );
    }

    #[test]
    fn added_window_in_inactive_zone_is_only_placed() {
        let mut engine = engine(&[1920, 1920]);
        let response = add(&mut engine, 1, 1);
        assert_eq!(response.effects, vec![Effect::Place(w(1), Rect::new(1920, 0, 1920, 1440))]);
        assert_eq!(engine.focused_window(), None);
    }

    #[test]
    fn added_window_defaults_to_active_zone() {
        let mut engine = engine(&[1920, 1920]);
        let _ = engine.handle_command(LayoutCommand::FocusZone(Direction::Right));
        let _ = engine.handle_event(LayoutEvent::WindowAdded {
            wid: w(1),
            info: WindowInfo::default(),
            zone: None,
        });
        assert_eq!(engine.registry().zone_for_window(w(1)), Some(1));

        let _ = engine.handle_event(LayoutEvent::WindowAdded {
            wid: w(2),
            info: WindowInfo::default(),
            zone: Some(9),
        });
        assert_eq!(engine.registry().zone_for_window(w(2)), Some(1));
    }

    #[test]
    fn duplicate_add_is_ignored() {
        let mut engine = engine(&[1920, 1920]);
        let _ = add(&mut engine, 1, 0);
        assert!(add(&mut engine, 1, 1).is_empty());
        assert_eq!(engine.registry().zone_for_window(w(1)), Some(0));
    }

    #[test]
    fn added_window_that_shifts_selection_moves_focus() {
        let mut engine = engine(&[1920]);
        let _ = add(&mut engine, 1, 0);
        let _ = add(&mut engine, 2, 0);
        // [2, 1] with 1 selected
        let _ = engine.handle_command(LayoutCommand::NextWindow);
        assert_eq!(engine.focused_window(), Some(w(1)));

        // [3, 2, 1]: the selected index now holds 2
        let response = add(&mut engine, 3, 0);
        assert_eq!(
            response.effects,
            vec![
                Effect::Place(w(3), Rect::new(0, 0, 1920, 1440)),
                Effect::Unfocus(w(1)),
                Effect::Focus(w(2)),
            ]
        );
        assert_eq!(
            engine.handle_command(LayoutCommand::CloseWindow).effects,
            vec![Effect::Close(w(2))]
        );
    }

    #[test]
    fn pointer_entering_a_window_focuses_it_and_its_zone() {
        let mut engine = engine(&[1920, 1920]);
        let _ = add(&mut engine, 1, 0);
        let _ = add(&mut engine, 2, 0);
        let _ = add(&mut engine, 3, 1);
        let _ = add(&mut engine, 4, 1);
        assert_eq!(engine.focused_window(), Some(w(2)));

        let response = engine.handle_event(LayoutEvent::WindowEntered(w(3)));
        assert_eq!(response.effects, vec![Effect::Unfocus(w(2)), Effect::Focus(w(3))]);
        assert_eq!(engine.active_zone(), 1);
        assert_eq!(engine.registry().slot(1).unwrap().current_index(), Some(1));
        // zone 0 keeps its own selection
        assert_eq!(engine.registry().current(0).map(|m| m.id), Some(w(2)));

        let response = engine.handle_command(LayoutCommand::NextWindow);
        assert_eq!(response.effects, vec![Effect::Unfocus(w(3)), Effect::Focus(w(4))]);
        assert_eq!(
            engine.handle_command(LayoutCommand::CloseWindow).effects,
            vec![Effect::Close(w(4))]
        );
    }

    #[test]
    fn pointer_entering_focused_or_unmanaged_window_is_ignored() {
        let mut engine = engine(&[1920, 1920]);
        let _ = add(&mut engine, 1, 0);
        assert!(engine.handle_event(LayoutEvent::WindowEntered(w(1))).is_empty());
        assert!(engine.handle_event(LayoutEvent::WindowEntered(w(99))).is_empty());
        assert_eq!(engine.active_zone(), 0);
        assert_eq!(engine.focused_window(), Some(w(1)));
    }

    #[test]
    fn pointer_entering_from_an_empty_zone_only_focuses() {
        let mut engine = engine(&[1920, 1920]);
        let _ = add(&mut engine, 1, 1);
        assert_eq!(engine.focused_window(), None);
        let response = engine.handle_event(LayoutEvent::WindowEntered(w(1)));
        assert_eq!(response.effects, vec![Effect::Focus(w(1))]);
        assert_eq!(engine.active_zone(), 1);
    }

    #[test]
    fn class_rules_pick_zone_first_match_wins() {
        let mut config = Config::default();
        config.rules = vec![
            AppRule {
                class: "discord".into(),
                zone: None,
                monitor: Some(1),
            },
            AppRule {
                class: "discord".into(),
                zone: Some(0),
                monitor: None,
            },
            AppRule {
                class: "firefox".into(),
                zone: Some(4),
                monitor: None,
            },
            AppRule {
                class: "ghost".into(),
                zone: None,
                monitor: Some(7),
            },
        ];
        let mut engine = LayoutEngine::new(screens(&[1920, 5120, 1920]), &config).expect("engine");
        let mut add_class = |id: u64, class: &str| {
            let _ = engine.handle_event(LayoutEvent::WindowAdded {
                wid: w(id),
                info: WindowInfo {
                    class: Some(class.into()),
                    title: None,
                },
                zone: None,
            });
        };
        add_class(1, "discord");
        add_class(2, "firefox");
        add_class(3, "ghost");
        add_class(4, "xterm");

        // monitor 1 is split, so its center zone
        assert_eq!(engine.registry().zone_for_window(w(1)), Some(2));
        assert_eq!(engine.registry().zone_for_window(w(2)), Some(4));
        assert_eq!(engine.registry().zone_for_window(w(3)), Some(0));
        assert_eq!(engine.registry().zone_for_window(w(4)), Some(0));
    }

    #[test]
    fn monitor_rule_on_unsplit_monitor_uses_its_zone() {
        let mut config = Config::default();
        config.rules = vec![AppRule {
            class: "discord".into(),
            zone: None,
            monitor: Some(2),
        }];
        let mut engine = LayoutEngine::new(screens(&[1920, 5120, 1920]), &config).expect("engine");
        let _ = engine.handle_event(LayoutEvent::WindowAdded {
            wid: w(1),
            info: WindowInfo {
                class: Some("discord".into()),
                title: None,
            },
            zone: None,
        });
        assert_eq!(engine.registry().zone_for_window(w(1)), Some(4));
    }

    #[test]
    fn removing_focused_window_focuses_next() {
        let mut engine = engine(&[1920]);
        let _ = add(&mut engine, 1, 0);
        let _ = add(&mut engine, 2, 0);
        let response = engine.handle_event(LayoutEvent::WindowRemoved(w(2)));
        assert_eq!(response.effects, vec![Effect::Focus(w(1))]);
    }

    #[test]
    fn removing_unfocused_or_unknown_window_emits_nothing() {
        let mut engine = engine(&[1920, 1920]);
        let _ = add(&mut engine, 1, 0);
        let _ = add(&mut engine, 2, 0);
        let _ = add(&mut engine, 3, 1);
        assert!(engine.handle_event(LayoutEvent::WindowRemoved(w(1))).is_empty());
        assert!(engine.handle_event(LayoutEvent::WindowRemoved(w(3))).is_empty());
        assert!(engine.handle_event(LayoutEvent::WindowRemoved(w(99))).is_empty());
        assert_eq!(engine.focused_window(), Some(w(2)));
    }

    #[test]
    fn unplugging_a_monitor_moves_orphans_to_active_zone() {
        let mut engine = engine(&[1920, 5120]);
        let _ = add(&mut engine, 1, 0);
        let _ = add(&mut engine, 2, 2);
        let _ = add(&mut engine, 3, 3);
        let _ = add(&mut engine, 4, 3);

        let response = engine.handle_event(LayoutEvent::ScreensChanged(screens(&[1920, 1920])));
        assert_eq!(engine.zone_count(), 2);
        // zone 1 survives (it was the empty left third); zones 2 and 3 are gone
        assert_eq!(members(&engine, 0), vec![w(4), w(3), w(2), w(1)]);
        assert!(members(&engine, 1).is_empty());
        let home = Rect::new(0, 0, 1920, 1440);
        assert_eq!(
            response.effects,
            vec![
                Effect::Place(w(4), home),
                Effect::Place(w(3), home),
                Effect::Place(w(2), home),
                Effect::Place(w(1), home),
                Effect::Unfocus(w(1)),
                Effect::Focus(w(4)),
            ]
        );
        assert_eq!(engine.registry().zone_for_window(w(2)), Some(0));
    }

    #[test]
    fn orphans_that_shift_selection_move_focus() {
        let mut engine = engine(&[1920, 1920]);
        let _ = add(&mut engine, 1, 0);
        let _ = add(&mut engine, 2, 0);
        let _ = engine.handle_command(LayoutCommand::NextWindow);
        let _ = add(&mut engine, 3, 1);
        assert_eq!(engine.focused_window(), Some(w(1)));

        let response = engine.handle_event(LayoutEvent::ScreensChanged(screens(&[1920])));
        // [3, 2, 1] keeps index 1, which now holds 2
        assert_eq!(members(&engine, 0), vec![w(3), w(2), w(1)]);
        let home = Rect::new(0, 0, 1920, 1440);
        assert_eq!(
            response.effects,
            vec![
                Effect::Place(w(3), home),
                Effect::Place(w(2), home),
                Effect::Place(w(1), home),
                Effect::Unfocus(w(1)),
                Effect::Focus(w(2)),
            ]
        );
        assert_eq!(
            engine.handle_command(LayoutCommand::CloseWindow).effects,
            vec![Effect::Close(w(2))]
        );
    }

    #[test]
    fn active_zone_is_clamped_when_zones_disappear() {
        let mut engine = engine(&[1920, 5120]);
        let _ = engine.handle_command(LayoutCommand::FocusZone(Direction::Left));
        assert_eq!(engine.active_zone(), 3);
        let _ = engine.handle_event(LayoutEvent::ScreensChanged(screens(&[1920])));
        assert_eq!(engine.active_zone(), 0);
    }

    #[test]
    fn empty_monitor_list_at_runtime_is_ignored() {
        let mut engine = engine(&[1920, 1920]);
        let _ = add(&mut engine, 1, 1);
        assert!(engine.handle_event(LayoutEvent::ScreensChanged(vec![])).is_empty());
        assert_eq!(engine.zone_count(), 2);
        assert_eq!(engine.registry().zone_for_window(w(1)), Some(1));
    }

    #[test]
    fn changed_zone_settings_repartition() {
        let mut engine = engine(&[3440]);
        assert_eq!(engine.zone_count(), 1);
        let _ = add(&mut engine, 1, 0);

        let mut config = Config::default();
        config.settings.zones.ultrawide_threshold = 3000;
        let response = engine.update_config(&config);
        assert_eq!(engine.zone_count(), 3);
        assert_eq!(
            response.effects,
            vec![Effect::Place(w(1), Rect::new(0, 0, 860, 1440)), Effect::Focus(w(1))]
        );
        assert!(engine.update_config(&config).is_empty());
    }
}
