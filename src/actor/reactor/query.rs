use std::sync::mpsc::{RecvError, SyncSender, sync_channel};

use crate::actor::reactor::{Event, Reactor, Sender};
use crate::model::server::{WindowData, ZoneData};

/// Blocking access to the reactor's state from other threads.
///
/// Must not be used from the reactor's own thread: the request is answered by
/// the same loop that would be waiting for it.
#[derive(Clone)]
pub struct ReactorQueryHandle {
    tx: Sender,
}

impl ReactorQueryHandle {
    pub(super) fn new(tx: Sender) -> Self { Self { tx } }

    fn send_query<T>(
        &self,
        build: impl FnOnce(SyncSender<T>) -> QueryRequest,
    ) -> Result<T, RecvError> {
        let (tx, rx) = sync_channel(1);
        if self.tx.try_send(Event::Query(build(tx))).is_err() {
            return Err(RecvError);
        }
        rx.recv()
    }

    pub fn query_zones(&self) -> Vec<ZoneData> {
        self.send_query(QueryRequest::Zones).unwrap_or_default()
    }

    pub fn query_windows(&self, zone: Option<usize>) -> Vec<WindowData> {
        self.send_query(|resp| QueryRequest::Windows { zone, resp }).unwrap_or_default()
    }

    /// `None` once the reactor has stopped.
    pub fn query_active_zone(&self) -> Option<usize> {
        self.send_query(QueryRequest::ActiveZone).ok()
    }
}

#[derive(Debug)]
pub enum QueryRequest {
    Zones(SyncSender<Vec<ZoneData>>),
    Windows {
        zone: Option<usize>,
        resp: SyncSender<Vec<WindowData>>,
    },
    ActiveZone(SyncSender<usize>),
}

impl Reactor {
    pub(super) fn handle_query_request(&mut self, req: QueryRequest) {
        match req {
            QueryRequest::Zones(resp) => {
                let _ = resp.send(ZoneData::collect(&self.layout_engine));
            }
            QueryRequest::Windows { zone, resp } => {
                let _ = resp.send(self.query_windows(zone));
            }
            QueryRequest::ActiveZone(resp) => {
                let _ = resp.send(self.layout_engine.active_zone());
            }
        }
    }

    fn query_windows(&self, zone: Option<usize>) -> Vec<WindowData> {
        let mut windows = WindowData::collect(&self.layout_engine);
        if let Some(zone) = zone {
            windows.retain(|w| w.zone == zone);
        }
        windows
    }
}
