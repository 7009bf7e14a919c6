//! Error types for playback sessions
//!
//! Every failure is a precondition that was not met. The `Display` text of
//! each variant is the exact message shown to the listener.

use std::fmt;
use thiserror::Error;

/// Operation that was attempted on a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    PlayPause,
    Repeat,
    Shuffle,
    Forward,
    Backward,
    Next,
    Prev,
}

impl fmt::Display for Action {
    /// Prompt shown when the action is attempted with nothing loaded
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prompt = match self {
            Action::PlayPause => {
                "Please load a source before attempting to pause or resume playback."
            }
            Action::Repeat => "Please load a source before setting the repeat status.",
            Action::Shuffle => "Please load a source before using the shuffle function.",
            Action::Forward => "Please load a source before attempting to forward.",
            Action::Backward => "Please select a source before rewinding.",
            Action::Next => "Please load a source before skipping to the next track.",
            Action::Prev => "Please load a source before returning to the previous track.",
        };
        f.write_str(prompt)
    }
}

/// Playback errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Nothing is loaded
    #[error("{0}")]
    NoSource(Action),

    /// Load was issued without a prior selection
    #[error("Please select a source before attempting to load.")]
    NothingSelected,

    /// Load was given a collection without tracks
    #[error("You can't load an empty audio collection!")]
    EmptyCollection,

    /// Forward/backward on something other than a podcast
    #[error("The loaded source is not a podcast.")]
    NotAPodcast,

    /// Shuffle on something other than a playlist or album
    #[error("The loaded source is not a playlist or an album.")]
    NotASongList,

    /// Podcast skip interval that is zero or negative
    #[error("Skip interval must be positive, got {0}")]
    InvalidSkipInterval(i64),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
