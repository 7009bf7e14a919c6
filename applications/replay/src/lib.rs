//! Cadence Replay
//!
//! Feeds a recorded list of playback commands through a
//! [`PlaybackRegistry`](cadence_playback::PlaybackRegistry) and collects
//! what each command answered.

pub mod config;
pub mod error;
pub mod replay;

pub use crate::config::{OutputSettings, ReplayConfig};
pub use crate::error::{ReplayError, Result};
pub use crate::replay::{read_commands, replay, write_results, ReplayOutput};
