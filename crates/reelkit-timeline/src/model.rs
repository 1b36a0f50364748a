//! The timeline model: segment placement and atomic edit operations.
//!
//! Every mutation validates its preconditions before touching any track,
//! so a failed operation leaves the model untouched and a multi-step
//! operation (split, merge) is never observable half-done. Completed
//! mutations bump a revision counter; the persistence collaborator polls
//! the revision and reads the flattened segment list.

use tracing::debug;
use uuid::Uuid;

use reelkit_core::{EditError, Result};

use crate::segment::{
    base_name, ContentPatch, Segment, SegmentContent, SegmentKind, MIN_SEGMENT_WIDTH,
};
use crate::track::Track;

/// Gap inserted between an existing segment and a newly added one, percent.
pub const TRACK_GAP: f64 = 2.0;

/// Latest start position assigned to an auto-placed segment, percent.
pub const MAX_AUTO_START: f64 = 90.0;

/// Maximum gap between consecutive segments for them to be merge-eligible,
/// percent. The tolerance is inclusive: a gap of exactly this size merges.
pub const ADJACENCY_TOLERANCE: f64 = 0.5;

/// Default widths for segments with no intrinsic duration, percent.
const DEFAULT_MEDIA_WIDTH: f64 = 15.0;
const DEFAULT_TEXT_WIDTH: f64 = 15.0;
const DEFAULT_IMAGE_WIDTH: f64 = 20.0;

/// Segment/track data and structural invariants.
#[derive(Debug, Clone)]
pub struct TimelineModel {
    /// One track per segment kind, in display order.
    tracks: Vec<Track>,
    /// Total project duration in seconds.
    total_duration_secs: f64,
    /// Bumped on every completed mutation.
    revision: u64,
}

impl TimelineModel {
    /// Create an empty model for a project of the given duration.
    pub fn new(total_duration_secs: f64) -> Self {
        Self {
            tracks: SegmentKind::ALL.iter().map(|&k| Track::new(k)).collect(),
            total_duration_secs,
            revision: 0,
        }
    }

    pub fn total_duration_secs(&self) -> f64 {
        self.total_duration_secs
    }

    pub fn set_total_duration_secs(&mut self, secs: f64) {
        self.total_duration_secs = secs.max(0.0);
    }

    /// Revision counter; changes exactly when the segment set changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, kind: SegmentKind) -> &Track {
        self.tracks
            .iter()
            .find(|t| t.kind == kind)
            .expect("model always holds one track per kind")
    }

    fn track_mut(&mut self, kind: SegmentKind) -> &mut Track {
        self.tracks
            .iter_mut()
            .find(|t| t.kind == kind)
            .expect("model always holds one track per kind")
    }

    /// Look up a segment anywhere in the model.
    pub fn segment(&self, id: Uuid) -> Option<&Segment> {
        self.tracks.iter().find_map(|t| t.get(id))
    }

    /// The track a segment lives on.
    pub fn track_of(&self, id: Uuid) -> Option<&Track> {
        self.tracks.iter().find(|t| t.contains(id))
    }

    /// Full flattened segment list for the persistence collaborator,
    /// ordered by track then start position.
    pub fn flattened_segments(&self) -> Vec<Segment> {
        self.tracks
            .iter()
            .flat_map(|t| t.segments_sorted().into_iter().cloned())
            .collect()
    }

    /// Total number of segments across all tracks.
    pub fn segment_count(&self) -> usize {
        self.tracks.iter().map(Track::len).sum()
    }

    // ── Library interface ───────────────────────────────────────

    /// Add a segment of the content's kind, auto-placed on its track.
    ///
    /// Width comes from `requested_duration_secs` for video/audio
    /// (duration as a fraction of the project); text and image get fixed
    /// defaults. The segment starts right after the last segment of the
    /// same kind, with a small gap, clamped so it never starts past 90%.
    pub fn add_segment(
        &mut self,
        name: impl Into<String>,
        content: SegmentContent,
        requested_duration_secs: Option<f64>,
    ) -> &Segment {
        let kind = content.kind();
        let total = self.total_duration_secs;

        let width = match kind {
            SegmentKind::Video | SegmentKind::Audio => requested_duration_secs
                .map(|d| d / total * 100.0)
                .unwrap_or(DEFAULT_MEDIA_WIDTH),
            SegmentKind::Text => DEFAULT_TEXT_WIDTH,
            SegmentKind::Image => DEFAULT_IMAGE_WIDTH,
        };

        let track = self.track_mut(kind);
        let start = if track.is_empty() {
            0.0
        } else {
            (track.span_end() + TRACK_GAP).min(MAX_AUTO_START)
        };
        // Keep the new segment inside the project span.
        let width = width.min(100.0 - start);

        let mut segment = Segment::new(name, start, width, content);
        segment.duration = requested_duration_secs;
        let id = segment.id;

        debug!(name = %segment.name, ?kind, start, width, "segment added");
        track.insert(segment);
        self.bump();
        self.track(kind).get(id).expect("segment was just inserted")
    }

    // ── Property-editor interface ───────────────────────────────

    /// Merge a content patch into a segment, non-destructively.
    ///
    /// Unknown ids and kind-mismatched patches are ignored; returns
    /// whether anything changed.
    pub fn update_segment(&mut self, id: Uuid, patch: ContentPatch) -> bool {
        let applied = self
            .tracks
            .iter_mut()
            .find_map(|t| t.get_mut(id))
            .is_some_and(|segment| segment.content.apply(patch));
        if applied {
            self.bump();
        }
        applied
    }

    /// Set an overlay segment's placement directly. Returns the updated
    /// segment, or `None` for unknown ids and non-overlay segments.
    pub fn set_overlay_placement(
        &mut self,
        id: Uuid,
        placement: crate::segment::Placement,
    ) -> Option<Segment> {
        let segment = self.tracks.iter_mut().find_map(|t| t.get_mut(id))?;
        if !segment.content.set_placement(placement) {
            return None;
        }
        let updated = segment.clone();
        self.bump();
        Some(updated)
    }

    // ── Editing operations ──────────────────────────────────────

    /// Remove every listed segment; unknown ids are ignored.
    /// Returns the number of segments removed.
    pub fn remove_segments(&mut self, ids: &[Uuid]) -> usize {
        let mut removed = 0;
        for &id in ids {
            for track in &mut self.tracks {
                if track.remove(id).is_some() {
                    removed += 1;
                }
            }
        }
        if removed > 0 {
            debug!(removed, "segments removed");
            self.bump();
        }
        removed
    }

    /// Move every listed segment by the same percent-space delta.
    ///
    /// Starts are clamped so no segment leaves the `[0, 100]` span.
    /// Unknown ids are ignored.
    pub fn shift_segments(&mut self, ids: &[Uuid], delta: f64) {
        let mut moved = false;
        for &id in ids {
            if let Some(segment) = self.tracks.iter_mut().find_map(|t| t.get_mut(id)) {
                let max_start = (100.0 - segment.width).max(0.0);
                segment.start = (segment.start + delta).clamp(0.0, max_start);
                moved = true;
            }
        }
        if moved {
            self.bump();
        }
    }

    /// Set a segment's bounds from a resize gesture.
    ///
    /// The width is floored at the minimum visible width and the start
    /// pulled back so the segment never ends past the project span; all
    /// silent corrections, mirroring `shift_segments`.
    pub fn resize_segment(&mut self, id: Uuid, start: f64, width: f64) {
        if let Some(segment) = self.tracks.iter_mut().find_map(|t| t.get_mut(id)) {
            let width = width.max(MIN_SEGMENT_WIDTH).min(100.0);
            segment.start = start.clamp(0.0, 100.0 - width);
            segment.width = width;
            self.bump();
        }
    }

    /// Split a video/audio segment at a percent-space position.
    ///
    /// The position must fall strictly inside the segment. The original
    /// is replaced by two parts in one step; returns their ids
    /// (first keeps the original id).
    pub fn split_segment(&mut self, id: Uuid, at_percent: f64) -> Result<(Uuid, Uuid)> {
        let segment = self
            .segment(id)
            .ok_or(EditError::OutOfBounds { at: at_percent })?;
        if !segment.kind.is_splittable()
            || at_percent <= segment.start
            || at_percent >= segment.end()
        {
            return Err(EditError::OutOfBounds { at: at_percent });
        }

        let kind = segment.kind;
        let base = segment.base_name().to_string();
        let ratio = (at_percent - segment.start) / segment.width;
        let first_width = segment.width * ratio;
        let second_width = segment.width - first_width;

        let track = self.track_mut(kind);
        let mut first = track.remove(id).expect("split target exists");
        let mut second = first.clone();
        second.id = Uuid::new_v4();

        first.width = first_width;
        first.name = format!("{base} (part 1)");
        second.start = at_percent;
        second.width = second_width;
        second.name = format!("{base} (part 2)");

        let ids = (first.id, second.id);
        track.insert(first);
        track.insert(second);
        self.bump();
        debug!(at = at_percent, "segment split");
        Ok(ids)
    }

    /// Merge two or more adjacent segments on one video/audio track.
    ///
    /// The result spans from the first segment's start to the last
    /// segment's end, keeps the first (by start) segment's content, and
    /// gets a fresh id. Unknown ids are ignored when gathering
    /// candidates; any precondition failure leaves the model unchanged.
    pub fn merge_segments(&mut self, ids: &[Uuid]) -> Result<Uuid> {
        let mut candidates: Vec<&Segment> =
            ids.iter().filter_map(|&id| self.segment(id)).collect();
        if candidates.len() < 2 {
            return Err(EditError::TooFewSegments);
        }

        let kind = candidates[0].kind;
        if candidates.iter().any(|s| s.kind != kind) {
            return Err(EditError::CrossTrackMerge);
        }
        if !kind.is_splittable() {
            return Err(EditError::WrongTypeForMerge);
        }

        candidates.sort_by(|a, b| a.start.total_cmp(&b.start));
        for pair in candidates.windows(2) {
            let gap = pair[1].start - pair[0].end();
            if gap > ADJACENCY_TOLERANCE {
                return Err(EditError::NonAdjacentMerge);
            }
        }

        let first = candidates[0];
        let last = candidates[candidates.len() - 1];
        let mut merged = Segment::new(
            format!("{} (merged)", base_name(&first.name)),
            first.start,
            last.end() - first.start,
            first.content.clone(),
        );
        merged.duration = first.duration;
        let merged_id = merged.id;
        let consumed: Vec<Uuid> = candidates.iter().map(|s| s.id).collect();

        let track = self.track_mut(kind);
        for id in consumed {
            track.remove(id);
        }
        track.insert(merged);
        self.bump();
        debug!(count = ids.len(), "segments merged");
        Ok(merged_id)
    }

    /// Rebuild a model from a flattened segment list (project load).
    pub(crate) fn from_segments(total_duration_secs: f64, segments: Vec<Segment>) -> Self {
        let mut model = Self::new(total_duration_secs);
        for segment in segments {
            let kind = segment.kind;
            model.track_mut(kind).insert(segment);
        }
        model
    }
}

impl Default for TimelineModel {
    fn default() -> Self {
        Self::new(100.0)
    }
}
