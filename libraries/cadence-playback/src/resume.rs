//! Podcast resume positions
//!
//! Remembers how much of an episode was left when a listener moved away
//! from it part-way, so that coming back continues from the same spot.
//! Songs, playlists and albums never store positions.

use crate::types::Seconds;
use std::collections::HashMap;

/// Identifies one episode of one podcast for one listener
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ResumeKey {
    user: String,
    podcast: String,
    episode: String,
}

impl ResumeKey {
    fn new(user: &str, podcast: &str, episode: &str) -> Self {
        Self {
            user: user.to_string(),
            podcast: podcast.to_string(),
            episode: episode.to_string(),
        }
    }
}

/// Saved position of one episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ResumeEntry {
    remaining: Seconds,

    /// Save order; higher was saved later
    sequence: u64,
}

/// Map of `(user, podcast, episode)` to remaining seconds
///
/// An entry is consumed by [`take`](Self::take) when its episode is entered
/// again, so the episode that is currently playing never has one. Entries
/// remember their save order so that [`last_left`](Self::last_left) can
/// tell which episode of a podcast the listener was on most recently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumePositionStore {
    positions: HashMap<ResumeKey, ResumeEntry>,
    next_sequence: u64,
}

impl ResumePositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the position for an episode
    pub fn save(&mut self, user: &str, podcast: &str, episode: &str, remaining: Seconds) {
        tracing::debug!(user, podcast, episode, remaining, "Saving resume position");
        let entry = ResumeEntry {
            remaining,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.positions
            .insert(ResumeKey::new(user, podcast, episode), entry);
    }

    /// Remove and return the position for an episode
    pub fn take(&mut self, user: &str, podcast: &str, episode: &str) -> Option<Seconds> {
        let remaining = self
            .positions
            .remove(&ResumeKey::new(user, podcast, episode))
            .map(|entry| entry.remaining);
        if let Some(remaining) = remaining {
            tracing::debug!(user, podcast, episode, remaining, "Resuming episode");
        }
        remaining
    }

    /// Position for an episode, without consuming it
    pub fn get(&self, user: &str, podcast: &str, episode: &str) -> Option<Seconds> {
        self.positions
            .get(&ResumeKey::new(user, podcast, episode))
            .map(|entry| entry.remaining)
    }

    /// Episode of `podcast` that `user` left most recently
    pub fn last_left(&self, user: &str, podcast: &str) -> Option<&str> {
        self.positions
            .iter()
            .filter(|(key, _)| key.user == user && key.podcast == podcast)
            .max_by_key(|(_, entry)| entry.sequence)
            .map(|(key, _)| key.episode.as_str())
    }

    /// Drop the position for an episode that was played to its end
    ///
    /// Returns whether an entry existed.
    pub fn forget(&mut self, user: &str, podcast: &str, episode: &str) -> bool {
        self.positions
            .remove(&ResumeKey::new(user, podcast, episode))
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
