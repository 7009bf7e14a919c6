//! Track-boundary crossing
//!
//! Moving time forward through a source is one pure function over a
//! [`Timeline`]: subtract the elapsed seconds, then keep stepping to the
//! next position while nothing is left of the current one. What happens at
//! the end of the source is decided by an [`EndPolicy`] derived from the
//! source kind and repeat mode.
//!
//! Ticks, `next` and a podcast forward that runs past an episode all go
//! through [`advance`] or [`settle`], so they share the same wrap-around
//! rules.

use crate::source::SourceKind;
use crate::types::{RepeatMode, Seconds};

/// Positions of a loaded source in play order
///
/// Positions are play order, not source order: while shuffle is enabled the
/// implementor maps them through the permutation.
pub trait Timeline {
    /// Number of positions
    fn len(&self) -> usize;

    /// Full length of the item at `position`
    fn duration(&self, position: usize) -> Seconds;

    /// Seconds available when playback enters `position`
    ///
    /// Defaults to the full duration; podcast timelines return a saved
    /// resume position instead when one exists.
    fn enter(&mut self, position: usize) -> Seconds {
        self.duration(position)
    }

    /// Called when the item at `position` has been played to its end
    fn finish(&mut self, _position: usize) {}

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What happens when the last position runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndPolicy {
    /// Unload
    Stop,

    /// Start over from the first position once, then behave like `Stop`
    WrapOnce,

    /// Start over from the first position, forever
    WrapForever,

    /// Never leave the current position
    LoopTrack,
}

impl EndPolicy {
    pub fn for_source(kind: SourceKind, repeat: RepeatMode) -> Self {
        match (repeat, kind.is_song_list()) {
            (RepeatMode::Off, _) => EndPolicy::Stop,
            (RepeatMode::Once, false) => EndPolicy::WrapOnce,
            (RepeatMode::All, false) | (RepeatMode::Once, true) => EndPolicy::WrapForever,
            (RepeatMode::All, true) => EndPolicy::LoopTrack,
        }
    }
}

/// Where playback is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Play-order position
    pub position: usize,

    /// Seconds left at `position`
    pub remaining: Seconds,

    /// Repeat mode; `WrapOnce` consumes it
    pub repeat: RepeatMode,
}

/// Result of moving a cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Playing(Cursor),
    Exhausted,
}

/// Move `cursor` forward by `elapsed` seconds
///
/// A negative `elapsed` rewinds within the current position and never
/// crosses a boundary.
pub fn advance<T: Timeline + ?Sized>(
    timeline: &mut T,
    kind: SourceKind,
    cursor: Cursor,
    elapsed: Seconds,
) -> Advance {
    let cursor = Cursor {
        remaining: cursor.remaining.saturating_sub(elapsed),
        ..cursor
    };
    settle(timeline, kind, cursor)
}

/// Cross boundaries until the cursor has time left, or the source runs out
///
/// Terminates on any input: zero-length items are stepped over, a lap of
/// zero total length or a looped zero-length track counts as exhausted, and
/// whole laps are skipped arithmetically instead of one item at a time.
pub fn settle<T: Timeline + ?Sized>(timeline: &mut T, kind: SourceKind, mut cursor: Cursor) -> Advance {
    let len = timeline.len();
    if len == 0 || cursor.position >= len {
        return Advance::Exhausted;
    }

    while cursor.remaining <= 0 {
        let policy = EndPolicy::for_source(kind, cursor.repeat);

        if policy == EndPolicy::LoopTrack {
            let duration = timeline.duration(cursor.position);
            if duration <= 0 {
                return Advance::Exhausted;
            }
            cursor.remaining = wrap_into(cursor.remaining, duration);
            break;
        }

        timeline.finish(cursor.position);

        if cursor.position + 1 < len {
            cursor.position += 1;
        } else {
            match policy {
                EndPolicy::Stop => return Advance::Exhausted,
                EndPolicy::WrapOnce => {
                    cursor.repeat = RepeatMode::Off;
                    cursor.position = 0;
                }
                EndPolicy::WrapForever | EndPolicy::LoopTrack => {
                    let lap = lap_duration(timeline);
                    if lap <= 0 {
                        return Advance::Exhausted;
                    }
                    cursor.position = 0;
                    cursor.remaining = skip_laps(cursor.remaining, lap);
                }
            }
        }

        cursor.remaining = cursor.remaining.saturating_add(timeline.enter(cursor.position));
    }

    Advance::Playing(cursor)
}

/// Total length of one pass over the timeline
fn lap_duration<T: Timeline + ?Sized>(timeline: &T) -> Seconds {
    (0..timeline.len())
        .map(|position| timeline.duration(position))
        .fold(0, Seconds::saturating_add)
}

/// Add whole laps to a non-positive `remaining` until it lies in `(-lap, 0]`
fn skip_laps(remaining: Seconds, lap: Seconds) -> Seconds {
    let laps = remaining.saturating_neg() / lap;
    remaining.saturating_add(laps.saturating_mul(lap))
}

/// Add whole `duration`s to a non-positive `remaining` until it is positive
fn wrap_into(remaining: Seconds, duration: Seconds) -> Seconds {
    let laps = remaining.saturating_neg() / duration + 1;
    remaining.saturating_add(laps.saturating_mul(duration))
}
