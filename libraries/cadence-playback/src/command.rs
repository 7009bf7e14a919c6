//! Command records consumed by the registry

use crate::source::Source;
use crate::types::{Seconds, Status};
use serde::{Deserialize, Serialize};

/// One timestamped command from one listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub username: String,

    /// Absolute time of the command, in seconds
    pub timestamp: Seconds,

    #[serde(flatten)]
    pub kind: CommandKind,
}

/// What a command asks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum CommandKind {
    /// Load the source the listener selected beforehand
    Load {
        #[serde(default)]
        source: Option<Source>,
    },
    PlayPause,
    Repeat,
    Shuffle {
        seed: i64,
    },
    Forward,
    Backward,
    Next,
    Prev,
    Status,

    /// Unload, e.g. because the listener started a new search
    Clear,
}

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    /// Listener-facing message, success or failure alike
    Message(String),

    /// Answer to a status command
    Status(Status),

    /// The session was unloaded; nothing to report
    Cleared,
}

impl Command {
    pub fn new(username: impl Into<String>, timestamp: Seconds, kind: CommandKind) -> Self {
        Self {
            username: username.into(),
            timestamp,
            kind,
        }
    }
}

impl CommandKind {
    /// Wire name of the command, as found in the `command` field
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Load { .. } => "load",
            CommandKind::PlayPause => "playPause",
            CommandKind::Repeat => "repeat",
            CommandKind::Shuffle { .. } => "shuffle",
            CommandKind::Forward => "forward",
            CommandKind::Backward => "backward",
            CommandKind::Next => "next",
            CommandKind::Prev => "prev",
            CommandKind::Status => "status",
            CommandKind::Clear => "clear",
        }
    }
}
