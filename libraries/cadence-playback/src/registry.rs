//! Sessions of every listener, driven by command records
//!
//! The registry owns one [`PlaybackSession`] per listener and one
//! [`CommandClock`] shared by all of them. Executing a command first lets
//! the time since the listener's previous command pass, then applies the
//! command itself.

use crate::{
    clock::CommandClock,
    command::{Command, CommandKind, Outcome},
    error::{PlaybackError, Result},
    feedback::Feedback,
    session::PlaybackSession,
    types::PlaybackConfig,
};
use std::collections::HashMap;

/// Per-listener playback sessions
#[derive(Debug, Clone, Default)]
pub struct PlaybackRegistry {
    config: PlaybackConfig,
    sessions: HashMap<String, PlaybackSession>,
    clock: CommandClock,
}

impl PlaybackRegistry {
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            config,
            sessions: HashMap::new(),
            clock: CommandClock::new(),
        }
    }

    /// Session of `user`, if they have issued any command
    pub fn session(&self, user: &str) -> Option<&PlaybackSession> {
        self.sessions.get(user)
    }

    /// Session of `user`, created empty on first use
    pub fn session_mut(&mut self, user: &str) -> &mut PlaybackSession {
        self.sessions
            .entry(user.to_string())
            .or_insert_with(|| PlaybackSession::new(user, &self.config))
    }

    /// Number of listeners with a session
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Run one command and describe what happened
    ///
    /// Every command other than `prev` is preceded by a tick of the time
    /// since the listener's previous command. `prev` instead ticks that
    /// time *backwards* and then passes it on, so that `prev` can tell
    /// whether any time passed since the previous command.
    pub fn execute(&mut self, command: Command) -> Outcome {
        let Command {
            username,
            timestamp,
            kind,
        } = command;

        let delta = self.clock.elapsed(&username, timestamp);
        let session = self.session_mut(&username);

        tracing::debug!(user = %username, timestamp, delta, command = ?kind, "Executing command");

        if matches!(kind, CommandKind::Prev) {
            session.tick(delta.saturating_neg());
        } else {
            session.tick(delta);
        }

        match kind {
            CommandKind::Status => Outcome::Status(session.status()),
            CommandKind::Load { source: None } => {
                Self::message(Err(PlaybackError::NothingSelected))
            }
            CommandKind::Load {
                source: Some(source),
            } => Self::message(session.load(source)),
            CommandKind::PlayPause => Self::message(session.toggle_pause()),
            CommandKind::Repeat => Self::message(session.cycle_repeat()),
            CommandKind::Shuffle { seed } => Self::message(session.toggle_shuffle(seed)),
            CommandKind::Forward => Self::message(session.skip_forward()),
            CommandKind::Backward => Self::message(session.skip_backward()),
            CommandKind::Next => Self::message(session.next()),
            CommandKind::Prev => Self::message(session.prev(delta)),
            CommandKind::Clear => {
                session.clear();
                Outcome::Cleared
            }
        }
    }

    fn message(result: Result<Feedback>) -> Outcome {
        Outcome::Message(match result {
            Ok(feedback) => feedback.to_string(),
            Err(error) => error.to_string(),
        })
    }
}
