//! Audio sources a session can load
//!
//! A closed union: every operation matches on all four kinds, so a new
//! kind cannot silently fall through.

use crate::types::{Album, Playlist, Podcast, Seconds, Song};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The audio entity loaded into a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Source {
    Song(Song),
    Playlist(Playlist),
    Podcast(Podcast),
    Album(Album),
}

/// Kind of a [`Source`], without its contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Song,
    Playlist,
    Podcast,
    Album,
}

impl SourceKind {
    /// Playlists and albums, the kinds that can be shuffled
    pub fn is_song_list(self) -> bool {
        matches!(self, SourceKind::Playlist | SourceKind::Album)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Song => "song",
            SourceKind::Playlist => "playlist",
            SourceKind::Podcast => "podcast",
            SourceKind::Album => "album",
        };
        f.write_str(name)
    }
}

/// Borrowed view of one playable item of a source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track<'a> {
    pub name: &'a str,
    pub duration: Seconds,
}

impl Source {
    pub fn kind(&self) -> SourceKind {
        match self {
            Source::Song(_) => SourceKind::Song,
            Source::Playlist(_) => SourceKind::Playlist,
            Source::Podcast(_) => SourceKind::Podcast,
            Source::Album(_) => SourceKind::Album,
        }
    }

    /// Name of the source itself (not of the current track)
    pub fn name(&self) -> &str {
        match self {
            Source::Song(song) => &song.name,
            Source::Playlist(playlist) => &playlist.name,
            Source::Podcast(podcast) => &podcast.name,
            Source::Album(album) => &album.name,
        }
    }

    /// Number of playable items; a song counts as one
    pub fn track_count(&self) -> usize {
        match self {
            Source::Song(_) => 1,
            Source::Playlist(playlist) => playlist.songs.len(),
            Source::Podcast(podcast) => podcast.episodes.len(),
            Source::Album(album) => album.songs.len(),
        }
    }

    /// Item at `index` in the source's own (unshuffled) order
    pub fn track(&self, index: usize) -> Option<Track<'_>> {
        match self {
            Source::Song(song) => (index == 0).then(|| Track {
                name: &song.name,
                duration: Seconds::from(song.duration),
            }),
            Source::Playlist(Playlist { songs, .. }) | Source::Album(Album { songs, .. }) => {
                songs.get(index).map(|song| Track {
                    name: &song.name,
                    duration: Seconds::from(song.duration),
                })
            }
            Source::Podcast(podcast) => podcast.episodes.get(index).map(|episode| Track {
                name: &episode.name,
                duration: Seconds::from(episode.duration),
            }),
        }
    }

    /// Duration of the item at `index`, zero when out of range
    pub fn duration_of(&self, index: usize) -> Seconds {
        self.track(index).map_or(0, |track| track.duration)
    }

    pub fn is_empty(&self) -> bool {
        self.track_count() == 0
    }
}
