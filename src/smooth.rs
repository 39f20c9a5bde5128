//! Boundary smoothing
//!
//! Pulls every segment boundary a little into the surrounding silence so
//! playback does not start or stop abruptly. Bounds are in seconds: a
//! boundary moves by at most [`MAX_SHIFT_SECS`], never past the middle of
//! the gap to its neighbour, and always stays [`GUARD_SECS`] clear of it.

use crate::vad::{round_ms, SpeechTimestamps};

/// Largest distance a boundary is moved into the silence
pub const MAX_SHIFT_SECS: f64 = 1.0;

/// Minimum clearance kept from the neighbouring segment
pub const GUARD_SECS: f64 = 0.001;

/// Smooth segment boundaries, returning new timestamps rounded to the millisecond
///
/// The first segment's start is clamped at zero and the last segment's end
/// is left in place.
pub fn smooth(segments: &[SpeechTimestamps]) -> Vec<SpeechTimestamps> {
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let start = match i.checked_sub(1).map(|prev| segments[prev].end) {
                Some(prev_end) => (prev_end + GUARD_SECS)
                    .max(prev_end + (segment.start - prev_end) / 2.0 + GUARD_SECS)
                    .max(segment.start - MAX_SHIFT_SECS),
                None => (segment.start - MAX_SHIFT_SECS).max(0.0),
            };

            let end = match segments.get(i + 1).map(|next| next.start) {
                Some(next_start) => (segment.end + MAX_SHIFT_SECS)
                    .min(next_start - (next_start - segment.end) / 2.0 - GUARD_SECS)
                    .min(next_start - GUARD_SECS),
                None => segment.end,
            };

            SpeechTimestamps {
                start: round_ms(start),
                end: round_ms(end),
            }
        })
        .collect()
}
