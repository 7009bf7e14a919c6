/// Command replay
use crate::error::Result;
use cadence_playback::{Command, Outcome, PlaybackRegistry, Seconds, Status};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// What one command answered
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReplayOutput {
    pub command: String,
    pub user: String,
    pub timestamp: Seconds,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Status>,
}

/// Parse a JSON array of command records
pub fn read_commands<R: Read>(reader: R) -> Result<Vec<Command>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Run `commands` in order against `registry`
///
/// Commands that produce nothing to report (such as `clear`) have no
/// output entry.
pub fn replay(registry: &mut PlaybackRegistry, commands: Vec<Command>) -> Vec<ReplayOutput> {
    let mut outputs = Vec::with_capacity(commands.len());

    for command in commands {
        let name = command.kind.name();
        let user = command.username.clone();
        let timestamp = command.timestamp;

        let (message, stats) = match registry.execute(command) {
            Outcome::Message(message) => (Some(message), None),
            Outcome::Status(status) => (None, Some(status)),
            Outcome::Cleared => {
                tracing::debug!(user = %user, timestamp, "Session cleared");
                continue;
            }
        };

        outputs.push(ReplayOutput {
            command: name.to_string(),
            user,
            timestamp,
            message,
            stats,
        });
    }

    tracing::info!(
        commands = outputs.len(),
        users = registry.len(),
        "Replay finished"
    );
    outputs
}

/// Write results as a JSON array
pub fn write_results<W: Write>(writer: W, outputs: &[ReplayOutput], pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, outputs)?;
    } else {
        serde_json::to_writer(writer, outputs)?;
    }
    Ok(())
}
