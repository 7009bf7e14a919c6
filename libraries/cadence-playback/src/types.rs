//! Core types for playback sessions

use crate::source::SourceKind;
use serde::{Deserialize, Serialize};

/// Signed number of seconds
///
/// Signed because a rewind is applied as a negative tick and the remaining
/// time may dip below zero while a tick crosses track boundaries.
pub type Seconds = i64;

/// A single song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Song title, reported by status
    pub name: String,

    /// Length in seconds
    pub duration: u32,
}

/// A single podcast episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Episode title, also the key for resume positions
    pub name: String,

    /// Length in seconds
    pub duration: u32,
}

/// Playlist visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// User-curated list of songs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub name: String,
    pub owner: String,
    #[serde(default)]
    pub visibility: Visibility,
    pub songs: Vec<Song>,
}

/// Ordered list of episodes published by a host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Podcast {
    pub name: String,
    pub owner: String,
    pub episodes: Vec<Episode>,
}

/// Artist release; plays exactly like a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub name: String,
    pub artist: String,
    pub songs: Vec<Song>,
}

/// Repeat mode
///
/// Cycles `Off -> Once -> All -> Off`. What `Once` and `All` mean depends on
/// the kind of source that is loaded, see [`RepeatMode::label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Stop when the source runs out
    #[default]
    Off,

    /// Song/podcast: replay once more. Playlist/album: loop the whole list
    Once,

    /// Song/podcast: loop forever. Playlist/album: loop the current song
    All,
}

impl RepeatMode {
    /// Next mode in the cycle
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::Once,
            RepeatMode::Once => RepeatMode::All,
            RepeatMode::All => RepeatMode::Off,
        }
    }

    /// Label reported by status for this mode on a source of `kind`
    pub fn label(self, kind: SourceKind) -> &'static str {
        match (self, kind) {
            (RepeatMode::Off, _) => "No Repeat",
            (RepeatMode::Once, SourceKind::Song | SourceKind::Podcast) => "Repeat Once",
            (RepeatMode::All, SourceKind::Song | SourceKind::Podcast) => "Repeat Infinite",
            (RepeatMode::Once, SourceKind::Playlist | SourceKind::Album) => "Repeat All",
            (RepeatMode::All, SourceKind::Playlist | SourceKind::Album) => "Repeat Current Song",
        }
    }
}

/// Snapshot reported by the `status` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    /// Current track name, empty when nothing is loaded
    pub name: String,

    /// Seconds left in the current track
    pub remained_time: Seconds,

    /// Repeat label, e.g. "Repeat Current Song"
    pub repeat: String,

    /// Whether shuffle is enabled
    pub shuffle: bool,

    /// Whether playback is paused
    pub paused: bool,
}

impl Status {
    /// Status of a session with nothing loaded
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            remained_time: 0,
            repeat: RepeatMode::Off.label(SourceKind::Song).to_string(),
            shuffle: false,
            paused: true,
        }
    }
}

/// Configuration for playback sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Seconds moved by podcast forward/backward (default: 90)
    pub skip_interval_secs: Seconds,
}

impl PlaybackConfig {
    /// Validate configuration
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.skip_interval_secs <= 0 {
            return Err(crate::error::PlaybackError::InvalidSkipInterval(
                self.skip_interval_secs,
            ));
        }

        Ok(())
    }

    /// Skip interval, or the default one when the configured value is invalid
    pub fn effective_skip_interval(&self) -> Seconds {
        if self.validate().is_ok() {
            self.skip_interval_secs
        } else {
            let fallback = Self::default().skip_interval_secs;
            tracing::warn!(
                configured = self.skip_interval_secs,
                fallback,
                "Ignoring non-positive skip interval"
            );
            fallback
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            skip_interval_secs: 90,
        }
    }
}
