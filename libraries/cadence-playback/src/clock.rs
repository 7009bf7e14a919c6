//! Elapsed time between a listener's commands

use crate::types::Seconds;
use std::collections::HashMap;

/// Last command timestamp per listener
///
/// Timestamps are taken as given: a command that arrives with an earlier
/// timestamp than the previous one yields a negative delta, which rewinds
/// the session when applied as a tick.
#[derive(Debug, Clone, Default)]
pub struct CommandClock {
    last_seen: HashMap<String, Seconds>,
}

impl CommandClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since `user`'s previous command, recording `timestamp`
    ///
    /// Zero on a user's first command.
    pub fn elapsed(&mut self, user: &str, timestamp: Seconds) -> Seconds {
        let previous = self.last_seen.insert(user.to_string(), timestamp);
        let delta = previous.map_or(0, |previous| timestamp.saturating_sub(previous));

        if delta < 0 {
            tracing::warn!(user, timestamp, delta, "Command timestamp went backwards");
        }

        delta
    }

    /// Timestamp of `user`'s most recent command
    pub fn last_seen(&self, user: &str) -> Option<Seconds> {
        self.last_seen.get(user).copied()
    }
}
