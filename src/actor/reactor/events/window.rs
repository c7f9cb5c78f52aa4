use tracing::trace;

use crate::actor::reactor::Reactor;
use crate::layout_engine::LayoutEvent;
use crate::sys::window_server::{WindowId, WindowInfo};

pub struct WindowEventHandler;

impl WindowEventHandler {
    pub fn handle_window_created(
        reactor: &mut Reactor,
        wid: WindowId,
        info: WindowInfo,
        zone: Option<usize>,
    ) {
        reactor.send_layout_event(LayoutEvent::WindowAdded { wid, info, zone });
    }

    pub fn handle_window_destroyed(reactor: &mut Reactor, wid: WindowId) {
        if !reactor.layout_engine.registry().contains(wid) {
            trace!(?wid, "Destroyed window was never managed");
            return;
        }
        reactor.send_layout_event(LayoutEvent::WindowRemoved(wid));
    }

    pub fn handle_window_entered(reactor: &mut Reactor, wid: WindowId) {
        reactor.send_layout_event(LayoutEvent::WindowEntered(wid));
    }
}
