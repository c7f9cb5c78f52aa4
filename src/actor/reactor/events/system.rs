use tracing::{debug, info};

use crate::actor::reactor::Reactor;
use crate::common::config::Config;

pub struct SystemEventHandler;

impl SystemEventHandler {
    /// New border settings apply to the next request; new zone settings
    /// re-partition the current monitors right away.
    pub fn handle_config_updated(reactor: &mut Reactor, config: Config) {
        if config == reactor.config {
            debug!("Config unchanged");
            return;
        }
        info!("Applying updated config");
        let response = reactor.layout_engine.update_config(&config);
        reactor.config = config;
        reactor.handle_layout_response(response);
    }
}
