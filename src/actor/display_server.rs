//! The boundary to the display server.
//!
//! The reactor turns every layout effect into a [`Request`] and sends it here.
//! A real backend would talk to X11; [`HeadlessDisplayServer`] only logs the
//! requests and can write them out as JSON lines, which is what the replay
//! tool and the tests use.

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::actor;
use crate::common::config::{Color, Settings};
use crate::layout_engine::Effect;
use crate::sys::geometry::Rect;
use crate::sys::window_server::WindowId;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "request")]
pub enum Request {
    /// Raise, take input focus and paint the focused border.
    Focus { wid: WindowId, border: Color },
    /// Paint the unfocused border.
    Unfocus { wid: WindowId, border: Color },
    /// Move and resize to the zone frame, keeping the border inside it.
    Place {
        wid: WindowId,
        frame: Rect,
        border_width: u32,
    },
    /// Politely if the window supports it, otherwise by force.
    Close { wid: WindowId },
}

impl Request {
    pub fn from_effect(effect: Effect, settings: &Settings) -> Request {
        match effect {
            Effect::Focus(wid) => Request::Focus {
                wid,
                border: settings.focused_border_color,
            },
            Effect::Unfocus(wid) => Request::Unfocus {
                wid,
                border: settings.unfocused_border_color,
            },
            Effect::Place(wid, frame) => Request::Place {
                wid,
                frame,
                border_width: settings.border_width,
            },
            Effect::Close(wid) => Request::Close { wid },
        }
    }

    /// The window's outer size with the border taken out of the zone frame,
    /// as it would be passed to a configure request.
    pub fn inner_frame(frame: Rect, border_width: u32) -> Rect {
        let inset = border_width.saturating_mul(2);
        Rect::new(
            frame.x,
            frame.y,
            frame.width.saturating_sub(inset).max(1),
            frame.height.saturating_sub(inset).max(1),
        )
    }
}

pub type Sender = actor::Sender<Request>;
pub type Receiver = actor::Receiver<Request>;

pub struct HeadlessDisplayServer {
    rx: Receiver,
    out: Option<Box<dyn Write + Send>>,
    handled: usize,
}

impl HeadlessDisplayServer {
    pub fn new(rx: Receiver) -> Self { HeadlessDisplayServer { rx, out: None, handled: 0 } }

    /// Writes every request to `out` as one JSON object per line.
    pub fn with_output(mut self, out: impl Write + Send + 'static) -> Self {
        self.out = Some(Box::new(out));
        self
    }

    /// Runs until every sender is gone. Returns how many requests were handled.
    pub async fn run(mut self) -> usize {
        while let Some((span, request)) = self.rx.recv().await {
            let _guard = span.enter();
            self.handle_request(request);
        }
        if let Some(out) = self.out.as_mut() {
            if let Err(err) = out.flush() {
                warn!(%err, "Failed to flush request log");
            }
        }
        info!(requests = self.handled, "Display server stopped");
        self.handled
    }

    fn handle_request(&mut self, request: Request) {
        self.handled += 1;
        match request {
            Request::Place { wid, frame, border_width } => {
                let inner = Request::inner_frame(frame, border_width);
                debug!(?wid, %frame, %inner, "Place");
            }
            Request::Focus { wid, border } => {
                debug!(?wid, %border, pixel = border.to_pixel(), "Focus")
            }
            Request::Unfocus { wid, border } => {
                debug!(?wid, %border, pixel = border.to_pixel(), "Unfocus")
            }
            Request::Close { wid } => debug!(?wid, "Close"),
        }
        let Some(out) = self.out.as_mut() else {
            return;
        };
        let written = serde_json::to_writer(&mut *out, &request)
            .map_err(std::io::Error::from)
            .and_then(|()| out.write_all(b"\n"));
        if let Err(err) = written {
            warn!(%err, ?request, "Failed to write request; disabling output");
            self.out = None;
        }
    }
}
