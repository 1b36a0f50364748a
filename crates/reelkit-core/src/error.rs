//! Error types for ReelKit.
//!
//! Edit precondition failures are advisory: they are returned to the
//! caller for surfacing in the UI and guarantee zero model mutation.

use thiserror::Error;

/// Main error type for ReelKit operations.
#[derive(Error, Debug)]
pub enum EditError {
    /// Split point is not strictly inside a splittable segment.
    #[error("cannot split - position the playhead inside a video or audio segment")]
    OutOfBounds { at: f64 },

    /// Merge requires at least two segments.
    #[error("select at least 2 segments to merge")]
    TooFewSegments,

    /// Merge candidates span more than one track.
    #[error("can only merge segments from the same track")]
    CrossTrackMerge,

    /// Merge target track is neither video nor audio.
    #[error("only video and audio segments can be merged")]
    WrongTypeForMerge,

    /// A consecutive pair of merge candidates is separated by more than
    /// the adjacency tolerance.
    #[error("only adjacent segments can be merged")]
    NonAdjacentMerge,

    /// A split was requested with no explicit target and no video/audio
    /// segment spans the playhead.
    #[error("no splittable segment at the playhead")]
    NoSplittableSegmentAtPlayhead,

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ReelKit operations.
pub type Result<T> = std::result::Result<T, EditError>;
