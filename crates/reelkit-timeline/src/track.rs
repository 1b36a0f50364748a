//! Track types for the timeline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::segment::{Segment, SegmentKind};

/// A track holding every segment of one kind.
///
/// Segment membership is determined entirely by kind; segments never move
/// between tracks. Storage is unordered, keyed by segment id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Stable track ID
    pub id: String,
    /// Track name
    pub name: String,
    /// Kind of segment this track holds
    pub kind: SegmentKind,
    /// Segments keyed by id (unordered)
    pub segments: HashMap<Uuid, Segment>,
}

impl Track {
    /// Create the track for a segment kind.
    pub fn new(kind: SegmentKind) -> Self {
        Self {
            id: kind.track_id().to_string(),
            name: kind.track_name().to_string(),
            kind,
            segments: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.segments.contains_key(&id)
    }

    pub fn get(&self, id: Uuid) -> Option<&Segment> {
        self.segments.get(&id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Segment> {
        self.segments.get_mut(&id)
    }

    /// Insert a segment. The segment's kind must match the track.
    pub fn insert(&mut self, segment: Segment) {
        debug_assert_eq!(segment.kind, self.kind);
        self.segments.insert(segment.id, segment);
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Segment> {
        self.segments.remove(&id)
    }

    /// Percent-space end of the last segment on this track (0 if empty).
    pub fn span_end(&self) -> f64 {
        self.segments
            .values()
            .map(Segment::end)
            .fold(0.0, f64::max)
    }

    /// Segments ordered by start position.
    pub fn segments_sorted(&self) -> Vec<&Segment> {
        let mut all: Vec<&Segment> = self.segments.values().collect();
        all.sort_by(|a, b| a.start.total_cmp(&b.start));
        all
    }
}
