//! The Reactor owns the layout and is the only place it changes.
//!
//! It takes events from the display server and from command sources one at a
//! time, hands them to the layout engine, and forwards the resulting effects
//! to the display server in order.

mod events;
mod query;
mod replay;


use std::thread;

use events::command::CommandEventHandler;
use events::space::SpaceEventHandler;
use events::system::SystemEventHandler;
use events::window::WindowEventHandler;
pub use query::{QueryRequest, ReactorQueryHandle};
pub use replay::{Record, ReplayError, replay};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace};

use crate::actor::{self, display_server};
use crate::common::config::Config;
use crate::layout_engine::{EventResponse, LayoutCommand, LayoutEngine, LayoutError, LayoutEvent};
use crate::sys::screen::ScreenInfo;
use crate::sys::window_server::{WindowId, WindowInfo};

pub type Sender = actor::Sender<Event>;
pub type Receiver = actor::Receiver<Event>;

#[derive(Clone)]
pub struct ReactorHandle {
    sender: Sender,
    queries: ReactorQueryHandle,
}

impl ReactorHandle {
    pub fn new(sender: Sender, queries: ReactorQueryHandle) -> Self { Self { sender, queries } }

    pub fn send(&self, event: Event) { self.sender.send(event) }
}

impl std::ops::Deref for ReactorHandle {
    type Target = ReactorQueryHandle;

    fn deref(&self) -> &Self::Target { &self.queries }
}

#[derive(Serialize, Deserialize, Debug)]
pub enum Event {
    /// The monitor set or a monitor's geometry changed. Monitors are listed in
    /// the order zones are numbered in.
    ScreenParametersChanged(Vec<ScreenInfo>),

    /// A top-level window asked to be mapped. `zone` is set when the sender
    /// already knows where the window belongs.
    WindowCreated {
        wid: WindowId,
        info: WindowInfo,
        zone: Option<usize>,
    },
    /// The window was destroyed or unmapped. Sent for every window that goes
    /// away, whether or not we asked it to close.
    WindowDestroyed(WindowId),
    /// The pointer moved into the window.
    WindowEntered(WindowId),

    /// A numeric command identifier, as sent by a key binding or a client.
    Command(u32),
    /// A command by name, e.g. `focus_mon_left`.
    NamedCommand(String),

    ConfigUpdated(Config),

    #[serde(skip)]
    Query(QueryRequest),
}

pub struct Reactor {
    config: Config,
    layout_engine: LayoutEngine,
    record: Record,
    display_tx: display_server::Sender,
    quit_requested: bool,
}

impl Reactor {
    /// Creates the reactor for the monitors present at startup. Fails if they
    /// give no zones to place windows in.
    pub fn new(
        config: Config,
        screens: Vec<ScreenInfo>,
        mut record: Record,
        display_tx: display_server::Sender,
    ) -> Result<Reactor, LayoutError> {
        record.start(&config, &screens);
        let layout_engine = LayoutEngine::new(screens, &config)?;
        info!(zones = layout_engine.zone_count(), "Reactor created");
        Ok(Reactor {
            config,
            layout_engine,
            record,
            display_tx,
            quit_requested: false,
        })
    }

    /// Runs the reactor on its own thread until it is told to quit or every
    /// sender is dropped.
    pub fn spawn(self) -> std::io::Result<(ReactorHandle, thread::JoinHandle<()>)> {
        let (events_tx, events) = actor::channel();
        let query_handle = ReactorQueryHandle::new(events_tx.clone());
        let runtime = tokio::runtime::Builder::new_current_thread().build()?;
        let thread = thread::Builder::new()
            .name("reactor".to_string())
            .spawn(move || runtime.block_on(self.run(events)))?;
        Ok((ReactorHandle::new(events_tx, query_handle), thread))
    }

    pub fn config(&self) -> &Config { &self.config }

    pub fn layout_engine(&self) -> &LayoutEngine { &self.layout_engine }

    pub fn quit_requested(&self) -> bool { self.quit_requested }

    pub async fn run(mut self, mut events: Receiver) {
        while let Some((span, event)) = events.recv().await {
            let _guard = span.enter();
            self.handle_loop_event(event);
            if self.quit_requested {
                break;
            }
        }
        info!("Reactor stopped");
    }

    fn handle_loop_event(&mut self, event: Event) {
        if let Event::Query(req) = event {
            self.handle_query_request(req);
            return;
        }
        self.handle_event(event);
    }

    fn log_event(&self, event: &Event) {
        match event {
            Event::Command(..) | Event::NamedCommand(..) | Event::WindowEntered(..) => {
                trace!(?event, "Event")
            }
            _ => debug!(?event, "Event"),
        }
    }

    #[instrument(name = "reactor::handle_event", skip(self), fields(event=?event))]
    pub fn handle_event(&mut self, event: Event) {
        self.log_event(&event);
        self.record.on_event(&event);

        match event {
            Event::ScreenParametersChanged(screens) => {
                SpaceEventHandler::handle_screen_parameters_changed(self, screens)
            }
            Event::WindowCreated { wid, info, zone } => {
                WindowEventHandler::handle_window_created(self, wid, info, zone)
            }
            Event::WindowDestroyed(wid) => WindowEventHandler::handle_window_destroyed(self, wid),
            Event::WindowEntered(wid) => WindowEventHandler::handle_window_entered(self, wid),
            Event::Command(id) => CommandEventHandler::handle_command(self, id),
            Event::NamedCommand(name) => CommandEventHandler::handle_named_command(self, &name),
            Event::ConfigUpdated(config) => SystemEventHandler::handle_config_updated(self, config),
            Event::Query(req) => self.handle_query_request(req),
        }
    }

    fn send_layout_event(&mut self, event: LayoutEvent) {
        let response = self.layout_engine.handle_event(event);
        self.handle_layout_response(response);
    }

    fn send_layout_command(&mut self, command: LayoutCommand) {
        let response = self.layout_engine.handle_command(command);
        self.handle_layout_response(response);
    }

    fn handle_layout_response(&mut self, response: EventResponse) {
        for effect in response.effects {
            let request = display_server::Request::from_effect(effect, &self.config.settings);
            if self.display_tx.try_send(request).is_err() {
                error!(?request, "Display server is gone; dropping request");
            }
        }
    }
}
