//! Recording reactor events to a file and playing them back.
//!
//! A recording is one RON-encoded [`Event`] per line. It starts with the
//! screens the reactor was created with and the config it was running, so a
//! recording is self-contained.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::Event;
use crate::common::config::Config;
use crate::sys::screen::ScreenInfo;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to open recording {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read recording")]
    Read(#[from] std::io::Error),
    #[error("line {line}: malformed event")]
    Decode {
        line: usize,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Default)]
pub struct Record {
    file: Option<File>,
}

impl Record {
    /// Creates (truncating) the recording at `path`. `None` records nothing.
    pub fn new(path: Option<&Path>) -> Result<Record, ReplayError> {
        let Some(path) = path else {
            return Ok(Record::default());
        };
        let file = File::create(path).map_err(|source| ReplayError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Record { file: Some(file) })
    }

    pub(super) fn start(&mut self, config: &Config, screens: &[ScreenInfo]) {
        if self.file.is_none() {
            return;
        }
        self.on_event(&Event::ScreenParametersChanged(screens.to_vec()));
        self.on_event(&Event::ConfigUpdated(config.clone()));
    }

    pub(super) fn on_event(&mut self, event: &Event) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        if matches!(event, Event::Query(_)) {
            return;
        }
        let written = ron::to_string(event)
            .map_err(std::io::Error::other)
            .and_then(|line| writeln!(file, "{line}"));
        if let Err(err) = written {
            warn!(%err, "Failed to record event; recording stopped");
            self.file = None;
        }
    }
}

/// Reads the recording at `path` and passes each event to `f` in order.
/// Blank lines are skipped.
pub fn replay(path: &Path, mut f: impl FnMut(Event)) -> Result<(), ReplayError> {
    let file = File::open(path).map_err(|source| ReplayError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut count = 0;
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event = ron::from_str(&line).map_err(|source| ReplayError::Decode { line: idx + 1, source })?;
        f(event);
        count += 1;
    }
    debug!(count, ?path, "Replayed recording");
    Ok(())
}
