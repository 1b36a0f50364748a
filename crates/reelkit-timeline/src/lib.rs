//! ReelKit Timeline - Segment model and editing engine
//!
//! Implements the timeline structure of the editor:
//! - Segments grouped into kind-keyed tracks
//! - The timeline model with atomic split/merge operations
//! - The gesture-driven segment editor (drag, resize, select, delete)
//! - Versioned project serialization

pub mod editor;
pub mod model;
pub mod segment;
pub mod selection;
pub mod serialization;
pub mod track;

pub use editor::{Cursor, CursorState, Gesture, PointerCapture, ResizeEdge, SegmentEditor};
pub use model::{TimelineModel, ADJACENCY_TOLERANCE, TRACK_GAP};
pub use segment::{
    AnchorPreset, ContentPatch, Placement, Segment, SegmentContent, SegmentKind,
    MIN_SEGMENT_WIDTH,
};
pub use selection::Selection;
pub use serialization::{ProjectData, ProjectFile};
pub use track::Track;
