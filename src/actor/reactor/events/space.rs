use tracing::info;

use crate::actor::reactor::Reactor;
use crate::layout_engine::LayoutEvent;
use crate::sys::screen::ScreenInfo;

pub struct SpaceEventHandler;

impl SpaceEventHandler {
    pub fn handle_screen_parameters_changed(reactor: &mut Reactor, screens: Vec<ScreenInfo>) {
        if screens == reactor.layout_engine.screens() {
            info!("Screen parameters unchanged; re-placing windows");
        } else {
            info!(
                old = reactor.layout_engine.screens().len(),
                new = screens.len(),
                "Screens changed"
            );
        }
        reactor.send_layout_event(LayoutEvent::ScreensChanged(screens));
    }
}
