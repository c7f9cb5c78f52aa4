//! Command identifiers accepted from the outside world and the table mapping
//! each one to a layout command.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use crate::layout_engine::{Direction, LayoutCommand};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnknownCommand {
    #[error("unknown command id {0}")]
    Id(u32),
    #[error("unknown command {0:?}")]
    Name(String),
}

/// Stable command identifiers. The numeric values and the snake_case names
/// are both part of the external interface.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    IntoStaticStr,
    EnumIter
)]
#[repr(u32)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CommandId {
    /// Same as `Next`.
    CycleWindow = 0,
    Next = 1,
    Prev = 2,
    /// Same as `FocusMonRight`.
    CycleMonitor = 3,
    FocusMonLeft = 4,
    FocusMonRight = 5,
    KillFocused = 6,
    Quit = 7,
    MoveWindowLeft = 8,
    MoveWindowRight = 9,
}

/// What a command turns into once looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Layout(LayoutCommand),
    /// Stop the event loop.
    Quit,
}

impl CommandId {
    pub fn name(self) -> &'static str { self.into() }

    pub fn dispatch(self) -> Dispatch {
        use CommandId::*;
        use Direction::*;
        let command = match self {
            CycleWindow | Next => LayoutCommand::NextWindow,
            Prev => LayoutCommand::PrevWindow,
            CycleMonitor | FocusMonRight => LayoutCommand::FocusZone(Right),
            FocusMonLeft => LayoutCommand::FocusZone(Left),
            KillFocused => LayoutCommand::CloseWindow,
            MoveWindowLeft => LayoutCommand::MoveWindow(Left),
            MoveWindowRight => LayoutCommand::MoveWindow(Right),
            Quit => return Dispatch::Quit,
        };
        Dispatch::Layout(command)
    }
}

pub fn dispatch(id: u32) -> Result<Dispatch, UnknownCommand> {
    CommandId::try_from(id)
        .map(CommandId::dispatch)
        .map_err(|err| UnknownCommand::Id(err.number))
}

pub fn dispatch_name(name: &str) -> Result<Dispatch, UnknownCommand> {
    name.trim()
        .parse::<CommandId>()
        .map(CommandId::dispatch)
        .map_err(|_| UnknownCommand::Name(name.to_owned()))
}
