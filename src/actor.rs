//! Actors are the units the window manager is split into. Each one owns its
//! state and is driven by a channel of events; nothing is shared between them.

pub mod display_server;
pub mod reactor;

use tokio::sync::mpsc;
use tracing::Span;

/// Sending half of an actor channel. Every event carries the span it was sent
/// from so the receiver can handle it in the sender's context.
#[derive(Debug)]
pub struct Sender<Event>(mpsc::UnboundedSender<(Span, Event)>);

pub type Receiver<Event> = mpsc::UnboundedReceiver<(Span, Event)>;

pub fn channel<Event>() -> (Sender<Event>, Receiver<Event>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Sender(tx), rx)
}

impl<Event> Sender<Event> {
    /// Sends an event, dropping it if the receiving actor has exited.
    pub fn send(&self, event: Event) { _ = self.try_send(event) }

    pub fn try_send(&self, event: Event) -> Result<(), mpsc::error::SendError<(Span, Event)>> {
        self.0.send((Span::current(), event))
    }

    pub fn is_closed(&self) -> bool { self.0.is_closed() }
}

impl<Event> Clone for Sender<Event> {
    fn clone(&self) -> Self { Sender(self.0.clone()) }
}
