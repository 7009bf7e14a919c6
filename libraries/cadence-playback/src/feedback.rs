//! Successful outcomes of session operations

use std::fmt;

/// What a session operation did, rendered as the listener-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Loaded,
    Paused,
    Resumed,
    RepeatChanged { label: &'static str },
    ShuffleActivated,
    ShuffleDeactivated,
    SkippedForward,
    Rewound,
    SkippedToNext { track: String },
    ReturnedToPrevious { track: String },

    /// `next` ran off the end of the source and unloaded it
    EndOfSource,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Loaded => f.write_str("Playback loaded successfully."),
            Feedback::Paused => f.write_str("Playback paused successfully."),
            Feedback::Resumed => f.write_str("Playback resumed successfully."),
            Feedback::RepeatChanged { label } => {
                write!(f, "Repeat mode changed to {}.", label.to_lowercase())
            }
            Feedback::ShuffleActivated => f.write_str("Shuffle function activated successfully."),
            Feedback::ShuffleDeactivated => {
                f.write_str("Shuffle function deactivated successfully.")
            }
            Feedback::SkippedForward => f.write_str("Skipped forward successfully."),
            Feedback::Rewound => f.write_str("Rewound successfully."),
            Feedback::SkippedToNext { track } => write!(
                f,
                "Skipped to next track successfully. The current track is {}.",
                track
            ),
            Feedback::ReturnedToPrevious { track } => write!(
                f,
                "Returned to previous track successfully. The current track is {}.",
                track
            ),
            Feedback::EndOfSource => {
                f.write_str("Please load a source before skipping to the next track.")
            }
        }
    }
}
