use tracing::{info, warn};

use crate::actor::reactor::Reactor;
use crate::model::command::{self, Dispatch, UnknownCommand};

pub struct CommandEventHandler;

impl CommandEventHandler {
    pub fn handle_command(reactor: &mut Reactor, id: u32) {
        Self::dispatch(reactor, command::dispatch(id));
    }

    pub fn handle_named_command(reactor: &mut Reactor, name: &str) {
        Self::dispatch(reactor, command::dispatch_name(name));
    }

    fn dispatch(reactor: &mut Reactor, dispatch: Result<Dispatch, UnknownCommand>) {
        match dispatch {
            Ok(Dispatch::Layout(command)) => reactor.send_layout_command(command),
            Ok(Dispatch::Quit) => {
                info!("Quit requested");
                reactor.quit_requested = true;
            }
            Err(err) => warn!(%err, "Ignoring command"),
        }
    }
}
