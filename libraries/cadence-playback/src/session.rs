//! Per-user playback session
//!
//! The state machine behind every playback command: what is loaded, how
//! much of the current track is left, pause/repeat/shuffle state and the
//! listener's podcast resume positions.
//!
//! Positions are kept in *play order*. With shuffle off, play order and the
//! source's own order coincide; with shuffle on, the permutation maps a play
//! position to the track index it plays.

use crate::{
    error::{Action, PlaybackError, Result},
    feedback::Feedback,
    resume::ResumePositionStore,
    shuffle::ShufflePermutation,
    source::{Source, SourceKind, Track},
    timeline::{advance, Advance, Cursor, Timeline},
    types::{PlaybackConfig, RepeatMode, Seconds, Status},
};

/// Playback state of one listener
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    /// Listener this session belongs to, part of every resume key
    owner: String,

    /// Loaded source; `None` means the session is empty
    source: Option<Source>,

    /// Seconds left in the current track
    remaining: Seconds,

    paused: bool,
    repeat: RepeatMode,

    /// Present while shuffle is enabled
    shuffle: Option<ShufflePermutation>,

    /// Play-order position of the current track
    position: usize,

    resume: ResumePositionStore,

    /// Seconds moved by podcast forward/backward
    skip_interval: Seconds,
}

/// A podcast episode left before its end
#[derive(Debug)]
struct PartialEpisode {
    podcast: String,
    episode: String,
    remaining: Seconds,
}

/// The session's source seen as a [`Timeline`]
///
/// Borrows the session field by field so that entering and finishing
/// episodes can update the resume store while the source is borrowed.
struct SessionTimeline<'a> {
    owner: &'a str,
    source: &'a Source,
    shuffle: Option<&'a ShufflePermutation>,
    resume: &'a mut ResumePositionStore,
}

impl SessionTimeline<'_> {
    fn logical(&self, position: usize) -> usize {
        self.shuffle
            .map_or(position, |permutation| permutation.map_backward(position))
    }
}

impl Timeline for SessionTimeline<'_> {
    fn len(&self) -> usize {
        self.source.track_count()
    }

    fn duration(&self, position: usize) -> Seconds {
        self.source.duration_of(self.logical(position))
    }

    fn enter(&mut self, position: usize) -> Seconds {
        let index = self.logical(position);
        if let Source::Podcast(podcast) = self.source {
            if let Some(episode) = podcast.episodes.get(index) {
                if let Some(remaining) = self.resume.take(self.owner, &podcast.name, &episode.name)
                {
                    return remaining;
                }
            }
        }
        self.source.duration_of(index)
    }

    fn finish(&mut self, position: usize) {
        let index = self.logical(position);
        if let Source::Podcast(podcast) = self.source {
            if let Some(episode) = podcast.episodes.get(index) {
                self.resume.forget(self.owner, &podcast.name, &episode.name);
            }
        }
    }
}

impl PlaybackSession {
    /// Create an empty, paused session for `owner`
    ///
    /// A non-positive skip interval in `config` is replaced by the default.
    pub fn new(owner: impl Into<String>, config: &PlaybackConfig) -> Self {
        Self {
            owner: owner.into(),
            source: None,
            remaining: 0,
            paused: true,
            repeat: RepeatMode::Off,
            shuffle: None,
            position: 0,
            resume: ResumePositionStore::new(),
            skip_interval: config.effective_skip_interval(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    /// Seconds left in the current track
    pub fn remaining(&self) -> Seconds {
        self.remaining
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffle.is_some()
    }

    pub fn permutation(&self) -> Option<&ShufflePermutation> {
        self.shuffle.as_ref()
    }

    /// Play-order position of the current track
    pub fn position(&self) -> usize {
        self.position
    }

    /// Index of the current track in the source's own order
    pub fn track_index(&self) -> Option<usize> {
        self.source.as_ref()?;
        Some(
            self.shuffle
                .as_ref()
                .map_or(self.position, |permutation| permutation.map_backward(self.position)),
        )
    }

    pub fn current_track(&self) -> Option<Track<'_>> {
        self.source.as_ref()?.track(self.track_index()?)
    }

    /// Saved podcast positions of this listener
    pub fn resume_positions(&self) -> &ResumePositionStore {
        &self.resume
    }

    /// Snapshot reported by the `status` command
    pub fn status(&self) -> Status {
        let (Some(source), Some(track)) = (self.source.as_ref(), self.current_track()) else {
            return Status::empty();
        };

        Status {
            name: track.name.to_string(),
            remained_time: self.remaining,
            repeat: self.repeat.label(source.kind()).to_string(),
            shuffle: self.shuffle.is_some(),
            paused: self.paused,
        }
    }

    /// Replace whatever is loaded with `source` and start playing it
    ///
    /// A podcast starts at the episode the listener most recently left
    /// part-way, from the saved position, or at its first episode.
    ///
    /// # Errors
    ///
    /// [`PlaybackError::EmptyCollection`] if `source` has no tracks. The
    /// session is left untouched in that case.
    pub fn load(&mut self, source: Source) -> Result<Feedback> {
        if source.is_empty() {
            return Err(PlaybackError::EmptyCollection);
        }

        let partial = self.partial_episode();
        self.remember(partial);

        tracing::debug!(
            user = %self.owner,
            kind = %source.kind(),
            source = source.name(),
            "Loading source"
        );

        let start = match &source {
            Source::Podcast(podcast) => self
                .resume
                .last_left(&self.owner, &podcast.name)
                .and_then(|left| podcast.episodes.iter().position(|e| e.name == left))
                .unwrap_or(0),
            Source::Song(_) | Source::Playlist(_) | Source::Album(_) => 0,
        };

        self.source = Some(source);
        self.paused = false;
        self.repeat = RepeatMode::Off;
        self.shuffle = None;
        self.position = start;
        self.remaining = self.enter(start);

        Ok(Feedback::Loaded)
    }

    /// Unload, keeping the listener's place in a podcast
    pub fn clear(&mut self) {
        let partial = self.partial_episode();
        self.remember(partial);
        self.unload();
    }

    /// Let `elapsed` seconds of playback pass
    ///
    /// Does nothing while empty or paused. A negative `elapsed` rewinds
    /// within the current track.
    pub fn tick(&mut self, elapsed: Seconds) {
        if self.paused || self.source.is_none() {
            return;
        }

        tracing::trace!(user = %self.owner, elapsed, remaining = self.remaining, "Tick");

        if !self.run_advance(elapsed) {
            tracing::debug!(user = %self.owner, "Source played to the end");
        }
    }

    pub fn toggle_pause(&mut self) -> Result<Feedback> {
        self.loaded_kind(Action::PlayPause)?;
        self.paused = !self.paused;

        Ok(if self.paused {
            Feedback::Paused
        } else {
            Feedback::Resumed
        })
    }

    /// Step the repeat mode `Off -> Once -> All -> Off`
    pub fn cycle_repeat(&mut self) -> Result<Feedback> {
        let kind = self.loaded_kind(Action::Repeat)?;
        self.repeat = self.repeat.cycle();

        tracing::debug!(user = %self.owner, repeat = ?self.repeat, "Repeat mode changed");

        Ok(Feedback::RepeatChanged {
            label: self.repeat.label(kind),
        })
    }

    /// Enable shuffle with a permutation derived from `seed`, or disable it
    ///
    /// The current track keeps playing either way; only its play position
    /// changes. `seed` is ignored when disabling.
    ///
    /// # Errors
    ///
    /// [`PlaybackError::NotASongList`] unless a playlist or album is loaded.
    pub fn toggle_shuffle(&mut self, seed: i64) -> Result<Feedback> {
        let kind = self.loaded_kind(Action::Shuffle)?;
        if !kind.is_song_list() {
            return Err(PlaybackError::NotASongList);
        }

        if let Some(permutation) = self.shuffle.take() {
            self.position = permutation.map_backward(self.position);
            tracing::debug!(user = %self.owner, "Shuffle disabled");
            return Ok(Feedback::ShuffleDeactivated);
        }

        let count = self.source.as_ref().map_or(0, Source::track_count);
        let permutation = ShufflePermutation::generate(count, seed);
        self.position = permutation.map_forward(self.position);
        self.shuffle = Some(permutation);

        tracing::debug!(user = %self.owner, seed, "Shuffle enabled");
        Ok(Feedback::ShuffleActivated)
    }

    /// Jump ahead in the current episode
    ///
    /// Running past the end finishes the episode and enters the next one
    /// from its start (or saved position), the same way a tick would.
    pub fn skip_forward(&mut self) -> Result<Feedback> {
        let kind = self.loaded_kind(Action::Forward)?;
        if kind != SourceKind::Podcast {
            return Err(PlaybackError::NotAPodcast);
        }

        self.remaining = self.remaining.saturating_sub(self.skip_interval);
        if self.remaining <= 0 {
            self.remaining = 0;
            self.run_advance(0);
        }

        Ok(Feedback::SkippedForward)
    }

    /// Jump back in the current episode
    ///
    /// Going back past the start moves to the previous episode; on the first
    /// episode it restarts instead.
    pub fn skip_backward(&mut self) -> Result<Feedback> {
        let kind = self.loaded_kind(Action::Backward)?;
        if kind != SourceKind::Podcast {
            return Err(PlaybackError::NotAPodcast);
        }

        let partial = self.partial_episode();
        let duration = self.current_duration();
        self.remaining = self.remaining.saturating_add(self.skip_interval);

        if self.remaining > duration {
            if self.position > 0 {
                self.remember(partial);
                self.position -= 1;
                self.remaining = self.enter(self.position);
            } else {
                self.remaining = duration;
            }
        }

        Ok(Feedback::Rewound)
    }

    /// Skip to the next track
    ///
    /// Under "Repeat Current Song" this restarts the current track. Running
    /// off the end of the source unloads it and is reported as
    /// [`Feedback::EndOfSource`], not as an error.
    pub fn next(&mut self) -> Result<Feedback> {
        self.loaded_kind(Action::Next)?;

        let partial = self.partial_episode();
        let from = self.position;

        self.remaining = 0;
        let playing = self.run_advance(0);

        if !playing || self.position != from {
            self.remember(partial);
        }

        match self.current_track() {
            Some(track) if playing => Ok(Feedback::SkippedToNext {
                track: track.name.to_string(),
            }),
            _ => Ok(Feedback::EndOfSource),
        }
    }

    /// Go back to the previous track, or restart the current one
    ///
    /// `elapsed` is the time since the previous command. Only when it is
    /// zero does a collection move one position back (never wrapping); any
    /// other value restarts the current track. Always resumes playback.
    pub fn prev(&mut self, elapsed: Seconds) -> Result<Feedback> {
        let kind = self.loaded_kind(Action::Prev)?;
        self.paused = false;

        if elapsed == 0 && kind != SourceKind::Song && self.position > 0 {
            let partial = self.partial_episode();
            self.remember(partial);
            self.position -= 1;
            self.remaining = self.enter(self.position);
        } else {
            self.remaining = self.current_duration();
        }

        let track = self
            .current_track()
            .map(|track| track.name.to_string())
            .unwrap_or_default();
        Ok(Feedback::ReturnedToPrevious { track })
    }

    /// Kind of the loaded source, or the empty-session error for `action`
    fn loaded_kind(&self, action: Action) -> Result<SourceKind> {
        self.source
            .as_ref()
            .map(Source::kind)
            .ok_or(PlaybackError::NoSource(action))
    }

    fn current_duration(&self) -> Seconds {
        match (self.source.as_ref(), self.track_index()) {
            (Some(source), Some(index)) => source.duration_of(index),
            _ => 0,
        }
    }

    /// Move the cursor by `elapsed` and apply the result
    ///
    /// Returns `false` if the source ran out and was unloaded.
    fn run_advance(&mut self, elapsed: Seconds) -> bool {
        let Some(source) = self.source.as_ref() else {
            return false;
        };

        let kind = source.kind();
        let cursor = Cursor {
            position: self.position,
            remaining: self.remaining,
            repeat: self.repeat,
        };
        let mut timeline = SessionTimeline {
            owner: &self.owner,
            source,
            shuffle: self.shuffle.as_ref(),
            resume: &mut self.resume,
        };

        match advance(&mut timeline, kind, cursor, elapsed) {
            Advance::Playing(cursor) => {
                self.position = cursor.position;
                self.remaining = cursor.remaining;
                self.repeat = cursor.repeat;
                true
            }
            Advance::Exhausted => {
                self.unload();
                false
            }
        }
    }

    /// Seconds available when entering `position`, consuming any saved one
    fn enter(&mut self, position: usize) -> Seconds {
        let Some(source) = self.source.as_ref() else {
            return 0;
        };

        let mut timeline = SessionTimeline {
            owner: &self.owner,
            source,
            shuffle: self.shuffle.as_ref(),
            resume: &mut self.resume,
        };
        timeline.enter(position)
    }

    /// The current episode, if a podcast is loaded and it is part-way through
    fn partial_episode(&self) -> Option<PartialEpisode> {
        let Some(Source::Podcast(podcast)) = self.source.as_ref() else {
            return None;
        };
        let episode = podcast.episodes.get(self.track_index()?)?;

        (self.remaining > 0 && self.remaining < Seconds::from(episode.duration)).then(|| {
            PartialEpisode {
                podcast: podcast.name.clone(),
                episode: episode.name.clone(),
                remaining: self.remaining,
            }
        })
    }

    fn remember(&mut self, partial: Option<PartialEpisode>) {
        if let Some(partial) = partial {
            self.resume.save(
                &self.owner,
                &partial.podcast,
                &partial.episode,
                partial.remaining,
            );
        }
    }

    fn unload(&mut self) {
        self.source = None;
        self.remaining = 0;
        self.paused = true;
        self.repeat = RepeatMode::Off;
        self.shuffle = None;
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Album, Episode, Playlist, Podcast, Song, Visibility};

    fn session() -> PlaybackSession {
        PlaybackSession::new("alice", &PlaybackConfig::default())
    }

    fn song(name: &str, duration: u32) -> Song {
        Song {
            name: name.to_string(),
            duration,
        }
    }

    fn playlist(songs: &[(&str, u32)]) -> Source {
        Source::Playlist(Playlist {
            name: "Road".to_string(),
            owner: "alice".to_string(),
            visibility: Visibility::Public,
            songs: songs.iter().map(|&(name, d)| song(name, d)).collect(),
        })
    }

    fn album(songs: &[(&str, u32)]) -> Source {
        Source::Album(Album {
            name: "Live".to_string(),
            artist: "Band".to_string(),
            songs: songs.iter().map(|&(name, d)| song(name, d)).collect(),
        })
    }

    fn podcast(episodes: &[(&str, u32)]) -> Source {
        Source::Podcast(Podcast {
            name: "Talks".to_string(),
            owner: "host".to_string(),
            episodes: episodes
                .iter()
                .map(|&(name, duration)| Episode {
                    name: name.to_string(),
                    duration,
                })
                .collect(),
        })
    }

    #[test]
    fn new_session_is_empty_and_paused() {
        let session = session();
        assert!(!session.is_loaded());
        assert_eq!(session.status(), Status::empty());
    }

    #[test]
    fn empty_session_rejects_every_command() {
        let mut session = session();
        assert_eq!(
            session.toggle_pause(),
            Err(PlaybackError::NoSource(Action::PlayPause))
        );
        assert_eq!(
            session.cycle_repeat(),
            Err(PlaybackError::NoSource(Action::Repeat))
        );
        assert_eq!(
            session.toggle_shuffle(1),
            Err(PlaybackError::NoSource(Action::Shuffle))
        );
        assert_eq!(
            session.skip_forward(),
            Err(PlaybackError::NoSource(Action::Forward))
        );
        assert_eq!(
            session.skip_backward(),
            Err(PlaybackError::NoSource(Action::Backward))
        );
        assert_eq!(session.next(), Err(PlaybackError::NoSource(Action::Next)));
        assert_eq!(session.prev(0), Err(PlaybackError::NoSource(Action::Prev)));
    }

    #[test]
    fn load_rejects_empty_collection() {
        let mut session = session();
        assert_eq!(
            session.load(playlist(&[])),
            Err(PlaybackError::EmptyCollection)
        );
        assert!(!session.is_loaded());
    }

    #[test]
    fn load_starts_playing_first_track() {
        let mut session = session();
        assert_eq!(
            session.load(playlist(&[("A", 200), ("B", 150)])),
            Ok(Feedback::Loaded)
        );

        let status = session.status();
        assert_eq!(status.name, "A");
        assert_eq!(status.remained_time, 200);
        assert!(!status.paused);
        assert_eq!(status.repeat, "No Repeat");
    }

    #[test]
    fn paused_session_ignores_ticks() {
        let mut session = session();
        session.load(playlist(&[("A", 200)])).unwrap();
        assert_eq!(session.toggle_pause(), Ok(Feedback::Paused));

        session.tick(500);
        assert_eq!(session.remaining(), 200);

        assert_eq!(session.toggle_pause(), Ok(Feedback::Resumed));
        session.tick(50);
        assert_eq!(session.remaining(), 150);
    }

    #[test]
    fn repeat_labels_follow_source_kind() {
        let mut session = session();
        session.load(playlist(&[("A", 200)])).unwrap();
        assert_eq!(
            session.cycle_repeat().unwrap().to_string(),
            "Repeat mode changed to repeat all."
        );
        assert_eq!(
            session.cycle_repeat().unwrap().to_string(),
            "Repeat mode changed to repeat current song."
        );
        assert_eq!(
            session.cycle_repeat().unwrap().to_string(),
            "Repeat mode changed to no repeat."
        );

        session.load(Source::Song(song("S", 60))).unwrap();
        assert_eq!(
            session.cycle_repeat().unwrap().to_string(),
            "Repeat mode changed to repeat once."
        );
        assert_eq!(session.status().repeat, "Repeat Once");
    }

    #[test]
    fn load_resets_repeat_and_shuffle() {
        let mut session = session();
        session.load(playlist(&[("A", 200), ("B", 100)])).unwrap();
        session.cycle_repeat().unwrap();
        session.toggle_shuffle(3).unwrap();

        session.load(album(&[("X", 10)])).unwrap();
        assert_eq!(session.repeat(), RepeatMode::Off);
        assert!(!session.is_shuffled());
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn shuffle_keeps_current_track() {
        let mut session = session();
        session
            .load(playlist(&[("A", 10), ("B", 20), ("C", 30), ("D", 40), ("E", 50)]))
            .unwrap();
        session.next().unwrap();
        assert_eq!(session.status().name, "B");

        assert_eq!(session.toggle_shuffle(42), Ok(Feedback::ShuffleActivated));
        // seed 42 over five tracks plays [1, 2, 3, 4, 0]
        assert_eq!(session.position(), 0);
        assert_eq!(session.status().name, "B");
        assert!(session.status().shuffle);

        session.next().unwrap();
        assert_eq!(session.status().name, "C");

        assert_eq!(session.toggle_shuffle(0), Ok(Feedback::ShuffleDeactivated));
        assert_eq!(session.position(), 2);
        assert_eq!(session.status().name, "C");
    }

    #[test]
    fn shuffled_playback_follows_permutation() {
        let mut session = session();
        session
            .load(playlist(&[("A", 10), ("B", 20), ("C", 30), ("D", 40), ("E", 50)]))
            .unwrap();
        session.toggle_shuffle(0).unwrap();
        // seed 0 plays [4, 2, 1, 3, 0]; A sits at the last position
        assert_eq!(session.position(), 4);

        session.tick(10);
        assert!(!session.is_loaded());
    }

    #[test]
    fn shuffle_rejected_for_song_and_podcast() {
        let mut session = session();
        session.load(Source::Song(song("S", 60))).unwrap();
        assert_eq!(session.toggle_shuffle(1), Err(PlaybackError::NotASongList));

        session.load(podcast(&[("E1", 60)])).unwrap();
        assert_eq!(session.toggle_shuffle(1), Err(PlaybackError::NotASongList));
        assert!(!session.is_shuffled());
    }

    #[test]
    fn skip_rejected_for_non_podcasts() {
        let mut session = session();
        session.load(album(&[("X", 300)])).unwrap();
        assert_eq!(session.skip_forward(), Err(PlaybackError::NotAPodcast));
        assert_eq!(session.skip_backward(), Err(PlaybackError::NotAPodcast));
        assert_eq!(session.remaining(), 300);
    }

    #[test]
    fn skip_forward_moves_within_episode() {
        let mut session = session();
        session.load(podcast(&[("E1", 300), ("E2", 200)])).unwrap();
        assert_eq!(session.skip_forward(), Ok(Feedback::SkippedForward));
        assert_eq!(session.remaining(), 210);
    }

    #[test]
    fn skip_forward_past_end_enters_next_episode_from_start() {
        let mut session = session();
        session.load(podcast(&[("E1", 300), ("E2", 200)])).unwrap();
        session.tick(250);

        session.skip_forward().unwrap();
        let status = session.status();
        assert_eq!(status.name, "E2");
        assert_eq!(status.remained_time, 200);
    }

    #[test]
    fn skip_forward_past_last_episode_unloads() {
        let mut session = session();
        session.load(podcast(&[("E1", 60)])).unwrap();
        session.skip_forward().unwrap();
        assert!(!session.is_loaded());
        assert!(session.is_paused());
    }

    #[test]
    fn skip_backward_clamps_at_first_episode() {
        let mut session = session();
        session.load(podcast(&[("E1", 300), ("E2", 200)])).unwrap();
        session.tick(30);

        assert_eq!(session.skip_backward(), Ok(Feedback::Rewound));
        assert_eq!(session.remaining(), 300);
        assert_eq!(session.status().name, "E1");
    }

    #[test]
    fn skip_backward_within_episode() {
        let mut session = session();
        session.load(podcast(&[("E1", 300)])).unwrap();
        session.tick(200);

        session.skip_backward().unwrap();
        assert_eq!(session.remaining(), 190);
    }

    #[test]
    fn skip_backward_past_start_moves_to_previous_episode() {
        let mut session = session();
        session.load(podcast(&[("E1", 100), ("E2", 200)])).unwrap();
        session.tick(110);
        assert_eq!(session.status().name, "E2");

        session.skip_backward().unwrap();
        let status = session.status();
        assert_eq!(status.name, "E1");
        assert_eq!(status.remained_time, 100);
    }

    #[test]
    fn next_walks_collection_then_reports_end() {
        let mut session = session();
        session.load(playlist(&[("A", 200), ("B", 150)])).unwrap();

        assert_eq!(
            session.next(),
            Ok(Feedback::SkippedToNext {
                track: "B".to_string()
            })
        );
        assert_eq!(session.remaining(), 150);

        assert_eq!(session.next(), Ok(Feedback::EndOfSource));
        assert!(!session.is_loaded());
        assert_eq!(session.status(), Status::empty());
    }

    #[test]
    fn next_wraps_under_repeat_all() {
        let mut session = session();
        session.load(playlist(&[("A", 200), ("B", 150)])).unwrap();
        session.cycle_repeat().unwrap();
        session.next().unwrap();

        assert_eq!(
            session.next(),
            Ok(Feedback::SkippedToNext {
                track: "A".to_string()
            })
        );
        assert_eq!(session.remaining(), 200);
    }

    #[test]
    fn next_restarts_under_repeat_current_song() {
        let mut session = session();
        session.load(album(&[("X", 100), ("Y", 80)])).unwrap();
        session.cycle_repeat().unwrap();
        session.cycle_repeat().unwrap();
        session.tick(40);

        session.next().unwrap();
        assert_eq!(session.status().name, "X");
        assert_eq!(session.remaining(), 100);
    }

    #[test]
    fn next_on_song_repeat_once_restarts_then_ends() {
        let mut session = session();
        session.load(Source::Song(song("S", 60))).unwrap();
        session.cycle_repeat().unwrap();

        assert_eq!(
            session.next(),
            Ok(Feedback::SkippedToNext {
                track: "S".to_string()
            })
        );
        assert_eq!(session.repeat(), RepeatMode::Off);
        assert_eq!(session.next(), Ok(Feedback::EndOfSource));
    }

    #[test]
    fn prev_without_elapsed_time_moves_back() {
        let mut session = session();
        session.load(playlist(&[("A", 200), ("B", 150)])).unwrap();
        session.next().unwrap();
        session.toggle_pause().unwrap();

        assert_eq!(
            session.prev(0),
            Ok(Feedback::ReturnedToPrevious {
                track: "A".to_string()
            })
        );
        assert_eq!(session.remaining(), 200);
        assert!(!session.is_paused());
    }

    #[test]
    fn prev_with_elapsed_time_restarts_current() {
        let mut session = session();
        session.load(playlist(&[("A", 200), ("B", 150)])).unwrap();
        session.next().unwrap();
        session.tick(50);

        session.prev(50).unwrap();
        assert_eq!(session.status().name, "B");
        assert_eq!(session.remaining(), 150);
    }

    #[test]
    fn prev_on_first_track_does_not_wrap() {
        let mut session = session();
        session.load(playlist(&[("A", 200), ("B", 150)])).unwrap();
        session.tick(20);

        session.prev(0).unwrap();
        assert_eq!(session.position(), 0);
        assert_eq!(session.remaining(), 200);
    }

    #[test]
    fn leaving_episode_part_way_saves_position() {
        let mut session = session();
        session.load(podcast(&[("E1", 300), ("E2", 200)])).unwrap();
        session.tick(120);

        session.load(Source::Song(song("S", 60))).unwrap();
        assert_eq!(
            session.resume_positions().get("alice", "Talks", "E1"),
            Some(180)
        );

        session.load(podcast(&[("E1", 300), ("E2", 200)])).unwrap();
        assert_eq!(session.status().name, "E1");
        assert_eq!(session.remaining(), 180);
        assert!(session.resume_positions().is_empty());
    }

    #[test]
    fn untouched_episode_is_not_saved() {
        let mut session = session();
        session.load(podcast(&[("E1", 300)])).unwrap();
        session.clear();
        assert!(session.resume_positions().is_empty());
    }

    #[test]
    fn clear_saves_position_and_empties_session() {
        let mut session = session();
        session.load(podcast(&[("E1", 300)])).unwrap();
        session.tick(100);

        session.clear();
        assert!(!session.is_loaded());
        assert!(session.is_paused());
        assert_eq!(
            session.resume_positions().get("alice", "Talks", "E1"),
            Some(200)
        );
    }

    #[test]
    fn finishing_episode_forgets_stale_position() {
        let mut session = session();
        let talks = podcast(&[("E1", 100), ("E2", 100)]);
        session.load(talks.clone()).unwrap();
        session.tick(150);
        session.clear();
        assert_eq!(session.resume_positions().get("alice", "Talks", "E2"), Some(50));

        session.load(talks).unwrap();
        assert_eq!(session.status().name, "E2");
        session.tick(50);
        assert!(!session.is_loaded());
        assert!(session.resume_positions().is_empty());
    }

    #[test]
    fn load_resumes_most_recently_left_episode() {
        let mut session = session();
        let talks = podcast(&[("E1", 100), ("E2", 100)]);
        session.load(talks.clone()).unwrap();
        session.tick(50);
        session.next().unwrap();
        session.tick(30);
        session.clear();

        assert_eq!(session.resume_positions().get("alice", "Talks", "E1"), Some(50));
        assert_eq!(session.resume_positions().get("alice", "Talks", "E2"), Some(70));

        session.load(talks).unwrap();
        let status = session.status();
        assert_eq!(status.name, "E2");
        assert_eq!(status.remained_time, 70);
        assert_eq!(session.resume_positions().get("alice", "Talks", "E1"), Some(50));
    }

    #[test]
    fn prev_into_saved_episode_resumes_it() {
        let mut session = session();
        session.load(podcast(&[("E1", 100), ("E2", 200)])).unwrap();
        session.tick(50);
        session.next().unwrap();
        assert_eq!(session.resume_positions().get("alice", "Talks", "E1"), Some(50));

        session.prev(0).unwrap();
        let status = session.status();
        assert_eq!(status.name, "E1");
        assert_eq!(status.remained_time, 50);
        assert!(session.resume_positions().is_empty());
    }

    #[test]
    fn prev_saves_episode_left_part_way() {
        let mut session = session();
        session.load(podcast(&[("E1", 100), ("E2", 200)])).unwrap();
        session.tick(110);

        session.prev(0).unwrap();
        assert_eq!(session.status().name, "E1");
        assert_eq!(session.remaining(), 100);
        assert_eq!(session.resume_positions().get("alice", "Talks", "E2"), Some(190));
    }

    #[test]
    fn skip_backward_saves_episode_left_part_way() {
        let mut session = session();
        session.load(podcast(&[("E1", 100), ("E2", 200)])).unwrap();
        session.tick(110);

        session.skip_backward().unwrap();
        assert_eq!(session.status().name, "E1");
        assert_eq!(session.remaining(), 100);
        assert_eq!(session.resume_positions().get("alice", "Talks", "E2"), Some(190));
    }

    #[test]
    fn skip_forward_into_saved_episode_resumes_it() {
        let mut session = session();
        session.load(podcast(&[("E1", 100), ("E2", 200)])).unwrap();
        session.tick(110);
        session.prev(0).unwrap();

        // 100 -> 10, then past the end of E1
        session.skip_forward().unwrap();
        session.skip_forward().unwrap();

        let status = session.status();
        assert_eq!(status.name, "E2");
        assert_eq!(status.remained_time, 190);
        assert!(session.resume_positions().is_empty());
    }

    #[test]
    fn tick_into_saved_episode_resumes_it() {
        let mut session = session();
        session.load(podcast(&[("E1", 100), ("E2", 200)])).unwrap();
        session.tick(110);
        session.prev(0).unwrap();

        session.tick(120);
        let status = session.status();
        assert_eq!(status.name, "E2");
        assert_eq!(status.remained_time, 170);
        assert!(session.resume_positions().is_empty());
    }

    #[test]
    fn non_positive_skip_interval_falls_back_to_default() {
        let config = PlaybackConfig {
            skip_interval_secs: -30,
        };
        let mut session = PlaybackSession::new("alice", &config);
        session.load(podcast(&[("E1", 300)])).unwrap();

        session.skip_forward().unwrap();
        assert_eq!(session.remaining(), 210);
    }
}
