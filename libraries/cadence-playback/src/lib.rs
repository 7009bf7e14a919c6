//! Cadence - Playback Sessions
//!
//! Per-listener playback state for Cadence, driven by timestamped commands.
//!
//! This crate provides:
//! - Sessions that load a song, playlist, podcast or album
//! - Time-driven playback across track boundaries
//! - Repeat modes whose meaning depends on what is loaded
//! - Seeded, reproducible shuffle for playlists and albums
//! - Podcast resume positions per listener and episode
//! - A registry that turns command records into messages and status
//!
//! # Architecture
//!
//! `cadence-playback` does no I/O:
//! - No audio decoding or output; time only moves when a command says so
//! - No JSON; records derive `serde` traits and callers pick the format
//! - No log subscriber; events go through `tracing` and the binary installs one
//!
//! All boundary crossing goes through [`timeline::advance`], a pure function
//! over a [`timeline::Timeline`], so ticks, `next` and podcast skips share
//! one set of wrap-around rules.
//!
//! # Example: Driving a Session
//!
//! ```rust
//! use cadence_playback::{PlaybackConfig, PlaybackSession, Source};
//! use cadence_playback::types::{Playlist, Song, Visibility};
//!
//! let mut session = PlaybackSession::new("alice", &PlaybackConfig::default());
//!
//! let playlist = Source::Playlist(Playlist {
//!     name: "Road".to_string(),
//!     owner: "alice".to_string(),
//!     visibility: Visibility::Public,
//!     songs: vec![
//!         Song { name: "SongA".to_string(), duration: 200 },
//!         Song { name: "SongB".to_string(), duration: 150 },
//!     ],
//! });
//!
//! session.load(playlist).unwrap();
//! session.tick(200);
//!
//! let status = session.status();
//! assert_eq!(status.name, "SongB");
//! assert_eq!(status.remained_time, 150);
//! ```
//!
//! # Example: Command Records
//!
//! ```rust
//! use cadence_playback::{Command, CommandKind, Outcome, PlaybackRegistry};
//!
//! let mut registry = PlaybackRegistry::default();
//! let outcome = registry.execute(Command::new("bob", 10, CommandKind::PlayPause));
//!
//! assert_eq!(
//!     outcome,
//!     Outcome::Message(
//!         "Please load a source before attempting to pause or resume playback.".to_string()
//!     )
//! );
//! ```

mod clock;
mod command;
mod error;
mod feedback;
mod registry;
mod resume;
mod session;
mod shuffle;
mod source;
pub mod timeline;
pub mod types;

// Public exports
pub use clock::CommandClock;
pub use command::{Command, CommandKind, Outcome};
pub use error::{Action, PlaybackError, Result};
pub use feedback::Feedback;
pub use registry::PlaybackRegistry;
pub use resume::ResumePositionStore;
pub use session::PlaybackSession;
pub use shuffle::{Lcg48, ShufflePermutation};
pub use source::{Source, SourceKind, Track};
pub use types::{PlaybackConfig, RepeatMode, Seconds, Status};
