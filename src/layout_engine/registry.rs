//! Per-zone window membership and selection.
//!
//! Each zone keeps its windows newest-first together with the index of its
//! current window. The index is never recomputed from window identity: adding
//! to a non-empty zone leaves the index where it was, so whatever window now
//! sits at that position becomes current. With the index at 0 this makes the
//! newest window current; with a larger index it selects an older one.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::common::collections::{HashMap, VecDeque};
use crate::sys::window_server::WindowId;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagedWindow {
    pub id: WindowId,
    pub zone: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneSlot {
    members: VecDeque<ManagedWindow>,
    current: Option<usize>,
}

impl ZoneSlot {
    pub fn len(&self) -> usize { self.members.len() }

    pub fn is_empty(&self) -> bool { self.members.is_empty() }

    pub fn current_index(&self) -> Option<usize> { self.current }

    pub fn current(&self) -> Option<&ManagedWindow> { self.members.get(self.current?) }

    /// Windows in zone order, newest first.
    pub fn windows(&self) -> impl DoubleEndedIterator<Item = WindowId> + '_ {
        self.members.iter().map(|w| w.id)
    }

    fn position(&self, wid: WindowId) -> Option<usize> {
        self.members.iter().position(|w| w.id == wid)
    }

    fn push_front(&mut self, window: ManagedWindow) {
        self.members.push_front(window);
        if self.current.is_none() {
            self.current = Some(0);
        }
    }

    fn remove_at(&mut self, pos: usize) -> Option<ManagedWindow> {
        let removed = self.members.remove(pos)?;
        let Some(current) = self.current else {
            return Some(removed);
        };
        if pos == current {
            if pos < self.members.len() {
                // The next window slid into the current position.
            } else if pos > 0 {
                self.current = Some(pos - 1);
            } else {
                self.current = None;
            }
        } else if pos < current {
            self.current = Some(current - 1);
        }
        Some(removed)
    }

    /// Moves the selection `step` positions, wrapping in both directions.
    /// Returns the new index, or `None` if the zone is empty.
    fn rotate_current(&mut self, step: isize) -> Option<usize> {
        let next = super::wrapping_step(self.current?, step, self.members.len());
        self.current = Some(next);
        Some(next)
    }

    fn check_invariants(&self, zone: usize) {
        debug_assert_eq!(self.current.is_none(), self.members.is_empty());
        debug_assert!(self.current.is_none_or(|idx| idx < self.members.len()));
        debug_assert!(self.members.iter().all(|w| w.zone == zone));
    }
}

/// Membership of every managed window, indexed by zone.
#[derive(Debug, Clone, Default)]
pub struct ZoneRegistry {
    slots: Vec<ZoneSlot>,
    zone_of: HashMap<WindowId, usize>,
}

impl ZoneRegistry {
    pub fn new(zone_count: usize) -> Self {
        ZoneRegistry {
            slots: vec![ZoneSlot::default(); zone_count],
            zone_of: HashMap::default(),
        }
    }

    pub fn zone_count(&self) -> usize { self.slots.len() }

    pub fn slot(&self, zone: usize) -> Option<&ZoneSlot> { self.slots.get(zone) }

    pub fn slots(&self) -> impl Iterator<Item = (usize, &ZoneSlot)> { self.slots.iter().enumerate() }

    pub fn count(&self, zone: usize) -> usize { self.slot(zone).map_or(0, ZoneSlot::len) }

    pub fn current(&self, zone: usize) -> Option<ManagedWindow> {
        self.slot(zone)?.current().copied()
    }

    pub fn zone_for_window(&self, wid: WindowId) -> Option<usize> { self.zone_of.get(&wid).copied() }

    pub fn contains(&self, wid: WindowId) -> bool { self.zone_of.contains_key(&wid) }

    pub fn len(&self) -> usize { self.zone_of.len() }

    pub fn is_empty(&self) -> bool { self.zone_of.is_empty() }

    /// Inserts `wid` at the head of `zone`. Returns false if `zone` is out of
    /// range.
    ///
    /// A window must be added at most once; adding a tracked window is a
    /// caller bug.
    pub fn add(&mut self, zone: usize, wid: WindowId) -> bool {
        debug_assert!(!self.contains(wid), "{wid:?} is already managed");
        let Some(slot) = self.slots.get_mut(zone) else {
            trace!(zone, ?wid, "add to invalid zone ignored");
            return false;
        };
        slot.push_front(ManagedWindow { id: wid, zone });
        slot.check_invariants(zone);
        self.zone_of.insert(wid, zone);
        true
    }

    /// Removes `wid` from `zone`. Returns the removed record, or `None` if the
    /// window was not a member of that zone.
    pub fn remove(&mut self, zone: usize, wid: WindowId) -> Option<ManagedWindow> {
        let slot = self.slots.get_mut(zone)?;
        let pos = slot.position(wid)?;
        let removed = slot.remove_at(pos);
        slot.check_invariants(zone);
        self.zone_of.remove(&wid);
        removed
    }

    /// Removes `wid` from whichever zone holds it.
    pub fn remove_window(&mut self, wid: WindowId) -> Option<ManagedWindow> {
        let zone = self.zone_for_window(wid)?;
        self.remove(zone, wid)
    }

    pub(super) fn rotate_current(&mut self, zone: usize, step: isize) -> Option<ManagedWindow> {
        let slot = self.slots.get_mut(zone)?;
        slot.rotate_current(step)?;
        slot.current().copied()
    }

    /// Makes `wid` the current window of the zone that holds it.
    pub(super) fn select(&mut self, wid: WindowId) -> Option<ManagedWindow> {
        let zone = self.zone_for_window(wid)?;
        let slot = self.slots.get_mut(zone)?;
        slot.current = Some(slot.position(wid)?);
        slot.check_invariants(zone);
        slot.current().copied()
    }

    /// Resizes to `zone_count` slots. Slots that still exist are kept as they
    /// are; the windows of dropped slots are returned oldest first.
    pub(super) fn resize(&mut self, zone_count: usize) -> Vec<WindowId> {
        let mut orphans = Vec::new();
        if zone_count < self.slots.len() {
            for slot in self.slots.drain(zone_count..) {
                orphans.extend(slot.windows().rev());
            }
            for wid in &orphans {
                self.zone_of.remove(wid);
            }
        }
        self.slots.resize_with(zone_count, ZoneSlot::default);
        orphans
    }

    pub fn windows(&self) -> impl Iterator<Item = ManagedWindow> + '_ {
        self.slots.iter().flat_map(|slot| slot.members.iter().copied())
    }
}
