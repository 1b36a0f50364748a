//! Playback position state.
//!
//! The clock is a pure mapping plus the current position: the media source
//! pushes time updates into it, scrub requests flow back out as seek
//! seconds. It performs no scheduling of its own; play/pause is a flag
//! toggled by the host.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::time::{clamp_percent, format_timecode, to_percent, to_seconds, DEFAULT_FRAME_RATE};

/// Playhead state synchronized with an external media source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackClock {
    /// Current position in percent-space.
    position: f64,
    /// Total project duration in seconds.
    total_duration_secs: f64,
    /// Whether playback is running (toggled externally).
    playing: bool,
}

impl PlaybackClock {
    /// Create a clock for a project of the given duration.
    pub fn new(total_duration_secs: f64) -> Self {
        Self {
            position: 0.0,
            total_duration_secs,
            playing: false,
        }
    }

    /// Current playhead position in percent-space.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current playhead position in seconds.
    pub fn current_seconds(&self) -> f64 {
        to_seconds(self.position, self.total_duration_secs)
    }

    /// Total project duration in seconds.
    pub fn total_duration_secs(&self) -> f64 {
        self.total_duration_secs
    }

    /// Update the total duration, e.g. after media metadata loads.
    pub fn set_total_duration_secs(&mut self, secs: f64) {
        self.total_duration_secs = secs.max(0.0);
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Play/pause is owned by the host; the clock only records it.
    pub fn set_playing(&mut self, playing: bool) {
        if self.playing != playing {
            debug!(playing, "play state changed");
        }
        self.playing = playing;
    }

    pub fn toggle_playing(&mut self) {
        self.set_playing(!self.playing);
    }

    /// Scrub to a new percent-space position.
    ///
    /// Clamps to `[0, 100]`, updates the position, and returns the seek
    /// request in seconds to be written back to the media source.
    pub fn scrub(&mut self, new_percent: f64) -> f64 {
        self.position = clamp_percent(new_percent);
        let seek_secs = self.current_seconds();
        trace!(position = self.position, seek_secs, "scrubbed");
        seek_secs
    }

    /// Time update from the media source (seconds), sampled at the host's
    /// display refresh rate while playing.
    pub fn set_time(&mut self, seconds: f64) {
        self.position = to_percent(seconds, self.total_duration_secs);
    }

    /// Format the current position as an `hh:mm:ss:ff` timecode.
    pub fn timecode(&self, frame_rate: u32) -> String {
        format_timecode(self.position, self.total_duration_secs, frame_rate)
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        // Matches the default project duration of 100 seconds.
        let mut clock = Self::new(100.0);
        clock.position = 0.0;
        clock
    }
}
