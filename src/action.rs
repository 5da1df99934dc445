//! Menu items and the actions they trigger.
//!
//! Every entry of the fly-out carries an [`Action`].  Actions are plain data;
//! executing them is the job of an
//! [`ActionDispatcher`](crate::traits::ActionDispatcher).

use crate::traits::ActionDispatcher;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::process::Command;

/// Everything a menu entry can do.
///
/// On the wire (config file) this uses serde's externally tagged form:
///
/// ```json
/// "SwitchLeft"
/// {"SwitchTo": 2}
/// {"Run": "notepad.exe C:\\notes.txt"}
/// {"Shortcut": "ctrl+win+d"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Go back to the desktop that was active before the last switch.
    SwitchBefore,
    /// Switch to the desktop with the given 0-based index.
    SwitchTo(u32),
    /// Switch one desktop to the left.
    SwitchLeft,
    /// Switch one desktop to the right.
    SwitchRight,
    /// Launch a program.  The first word is the executable, the rest are
    /// passed as arguments.
    Run(String),
    /// Fire a keyboard shortcut such as `"ctrl+alt+t"`.
    Shortcut(String),
    /// Terminate edgeflyout.
    Exit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SwitchBefore => write!(f, "switch-before"),
            Action::SwitchTo(id) => write!(f, "switch-to {}", id),
            Action::SwitchLeft => write!(f, "switch-left"),
            Action::SwitchRight => write!(f, "switch-right"),
            Action::Run(cmd) => write!(f, "run {}", cmd),
            Action::Shortcut(keys) => write!(f, "shortcut {}", keys),
            Action::Exit => write!(f, "exit"),
        }
    }
}

/// One row of the fly-out menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Text shown in the menu; also the token that triggers the item over
    /// the control channel.
    pub label: String,
    pub action: Action,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Errors produced while executing an action.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The dispatcher has no backend for this kind of action.
    #[error("unsupported action: {0}")]
    Unsupported(String),
    /// `Run` was given an empty command line.
    #[error("empty command line")]
    EmptyCommand,
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Dispatcher that launches programs directly.
///
/// Desktop switching and shortcut injection need platform backends that live
/// outside this crate, so those actions are reported as
/// [`DispatchError::Unsupported`].
#[derive(Debug, Default)]
pub struct SystemDispatcher;

impl SystemDispatcher {
    pub fn new() -> Self {
        Self
    }
}

/// Split a command line into program and arguments on whitespace.
fn split_command_line(cmd: &str) -> Option<(&str, Vec<&str>)> {
    let mut words = cmd.split_whitespace();
    let program = words.next()?;
    Some((program, words.collect()))
}

impl ActionDispatcher for SystemDispatcher {
    type Error = DispatchError;

    fn dispatch(&mut self, action: &Action) -> Result<(), DispatchError> {
        match action {
            Action::Run(cmd) => {
                let (program, args) = split_command_line(cmd).ok_or(DispatchError::EmptyCommand)?;
                info!("launching {} {:?}", program, args);
                Command::new(program)
                    .args(&args)
                    .spawn()
                    .map_err(|source| DispatchError::Spawn {
                        program: program.to_string(),
                        source,
                    })?;
                Ok(())
            }
            other => Err(DispatchError::Unsupported(other.to_string())),
        }
    }
}
