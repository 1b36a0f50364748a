//! Percent-space time mapping.
//!
//! Timeline positions and sizes are expressed in percent of the total
//! project duration (0-100). These helpers convert between percent-space
//! and wall-clock seconds and render `hh:mm:ss:ff` timecodes.

/// Frame rate assumed for timecode display when the host supplies none.
pub const DEFAULT_FRAME_RATE: u32 = 30;

/// Clamp a percent value to the valid `[0, 100]` range.
#[inline]
pub fn clamp_percent(percent: f64) -> f64 {
    percent.clamp(0.0, 100.0)
}

/// Convert a percent-space position to seconds.
#[inline]
pub fn to_seconds(percent: f64, total_duration_secs: f64) -> f64 {
    percent / 100.0 * total_duration_secs
}

/// Convert seconds to a percent-space position, clamped to `[0, 100]`.
///
/// A non-positive total duration maps everything to 0.
#[inline]
pub fn to_percent(seconds: f64, total_duration_secs: f64) -> f64 {
    if total_duration_secs <= 0.0 {
        return 0.0;
    }
    clamp_percent(seconds / total_duration_secs * 100.0)
}

/// Format a percent-space position as a zero-padded `hh:mm:ss:ff` timecode.
///
/// The frame field is `floor((seconds * rate) mod rate)`.
pub fn format_timecode(percent: f64, total_duration_secs: f64, frame_rate: u32) -> String {
    let secs = to_seconds(clamp_percent(percent), total_duration_secs.max(0.0));
    let hours = (secs / 3600.0).floor() as u64;
    let minutes = ((secs % 3600.0) / 60.0).floor() as u64;
    let seconds = (secs % 60.0).floor() as u64;
    let frames = ((secs * f64::from(frame_rate)) % f64::from(frame_rate)).floor() as u64;
    format!("{hours:02}:{minutes:02}:{seconds:02}:{frames:02}")
}
