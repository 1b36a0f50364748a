//! ReelKit Core - Foundation types for the editing engine
//!
//! This crate provides the fundamental types used throughout ReelKit:
//! - Percent-space time mapping and timecode formatting
//! - The playback clock (scrub/play state)
//! - The shared error type for edit operations

pub mod error;
pub mod playback;
pub mod time;

pub use error::{EditError, Result};
pub use playback::PlaybackClock;
pub use time::{clamp_percent, format_timecode, to_percent, to_seconds, DEFAULT_FRAME_RATE};
