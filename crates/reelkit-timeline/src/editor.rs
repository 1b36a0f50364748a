//! The gesture-driven segment editor.
//!
//! All transient interaction state lives in a single tagged `Gesture`
//! value, so a drag and a resize can never be active at the same time and
//! a stale gesture is replaced rather than stacked. The global cursor
//! override acquired at gesture start is a scoped `PointerCapture` guard,
//! released on pointer-up and on every other exit path, including
//! dropping the editor mid-gesture.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};
use uuid::Uuid;

use reelkit_core::{clamp_percent, EditError, Result};

use crate::model::TimelineModel;
use crate::segment::{Segment, SegmentKind, MIN_SEGMENT_WIDTH};
use crate::selection::Selection;

/// Which edge of a segment is being resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Start,
    End,
}

/// Cursor shown while a gesture holds the global override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Grabbing,
    ResizeWest,
    ResizeEast,
}

impl Cursor {
    fn for_edge(edge: ResizeEdge) -> Self {
        match edge {
            ResizeEdge::Start => Self::ResizeWest,
            ResizeEdge::End => Self::ResizeEast,
        }
    }
}

/// Cursor slot shared between the editor and its host view.
///
/// Single-threaded by design: every gesture transition happens inside a
/// pointer event handler on the one event loop.
#[derive(Debug, Clone, Default)]
pub struct CursorState(Rc<Cell<Cursor>>);

impl CursorState {
    pub fn current(&self) -> Cursor {
        self.0.get()
    }
}

/// Scoped cursor override + window-level pointer capture.
///
/// Acquired when a gesture starts; restores the default cursor when
/// dropped, whatever the exit path.
pub struct PointerCapture {
    state: CursorState,
}

impl PointerCapture {
    fn acquire(state: &CursorState, cursor: Cursor) -> Self {
        state.0.set(cursor);
        tracing::trace!(?cursor, "pointer capture acquired");
        Self {
            state: state.clone(),
        }
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        self.state.0.set(Cursor::Default);
        tracing::trace!("pointer capture released");
    }
}

impl fmt::Debug for PointerCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerCapture")
            .field("cursor", &self.state.current())
            .finish()
    }
}

/// The one active gesture (or none).
#[derive(Debug, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        /// Pointer position of the previous sample, percent-space.
        pivot: f64,
        _capture: PointerCapture,
    },
    Resizing {
        id: Uuid,
        edge: ResizeEdge,
        initial_width: f64,
        initial_start: f64,
        _capture: PointerCapture,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Gesture state machine driving drag/resize/split/merge/select/delete
/// on a [`TimelineModel`].
///
/// Precondition failures come back as advisory `Err` values; nothing
/// panics past this boundary and a failed operation never leaves partial
/// mutation behind.
#[derive(Debug, Default)]
pub struct SegmentEditor {
    selection: Selection,
    gesture: Gesture,
    cursor: CursorState,
}

impl SegmentEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &[Uuid] {
        self.selection.ids()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// The cursor slot the host view renders from.
    pub fn cursor_state(&self) -> CursorState {
        self.cursor.clone()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor.current()
    }

    /// The selected segment for the property-editor collaborator, when
    /// exactly one segment is selected.
    pub fn selected_segment<'m>(&self, model: &'m TimelineModel) -> Option<&'m Segment> {
        model.segment(self.selection.sole()?)
    }

    // ── Pointer events ──────────────────────────────────────────

    /// Pointer-down on a segment body: select it and start dragging.
    ///
    /// With the multi-select modifier, membership is toggled instead.
    /// Without it, an existing multi-selection that already contains the
    /// segment is kept, so the whole selection drags together.
    pub fn pointer_down_segment(
        &mut self,
        model: &TimelineModel,
        id: Uuid,
        percent: f64,
        multi_select: bool,
    ) {
        if model.segment(id).is_none() {
            return;
        }
        if multi_select {
            self.selection.toggle(id);
        } else if !self.selection.contains(id) {
            self.selection.replace(id);
        }

        // Drop any stale capture before acquiring the new one.
        self.gesture = Gesture::Idle;
        let capture = PointerCapture::acquire(&self.cursor, Cursor::Grabbing);
        self.gesture = Gesture::Dragging {
            pivot: clamp_percent(percent),
            _capture: capture,
        };
        debug!(%id, "drag started");
    }

    /// Pointer-down on a resize handle: selection collapses to the
    /// target and a resize gesture begins.
    pub fn pointer_down_resize(&mut self, model: &TimelineModel, id: Uuid, edge: ResizeEdge) {
        let Some(segment) = model.segment(id) else {
            return;
        };
        let (initial_start, initial_width) = (segment.start, segment.width);
        self.selection.replace(id);

        self.gesture = Gesture::Idle;
        let capture = PointerCapture::acquire(&self.cursor, Cursor::for_edge(edge));
        self.gesture = Gesture::Resizing {
            id,
            edge,
            initial_width,
            initial_start,
            _capture: capture,
        };
        debug!(%id, ?edge, "resize started");
    }

    /// Pointer-move: advances whichever gesture is active.
    pub fn pointer_move(&mut self, model: &mut TimelineModel, percent: f64) {
        let percent = clamp_percent(percent);
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Dragging { pivot, .. } => {
                let delta = percent - *pivot;
                model.shift_segments(self.selection.ids(), delta);
                // Re-pivot on every sample so deltas never accumulate.
                *pivot = percent;
            }
            Gesture::Resizing {
                id,
                edge,
                initial_width,
                initial_start,
                ..
            } => {
                let (new_start, new_width) = match edge {
                    ResizeEdge::Start => {
                        // The start edge may not cross within the minimum
                        // width of the far edge, nor go negative.
                        let far_edge = *initial_start + *initial_width;
                        let new_start = percent.min(far_edge - MIN_SEGMENT_WIDTH).max(0.0);
                        (new_start, far_edge - new_start)
                    }
                    ResizeEdge::End => {
                        (*initial_start, (percent - *initial_start).max(MIN_SEGMENT_WIDTH))
                    }
                };
                model.resize_segment(*id, new_start, new_width);
            }
        }
    }

    /// Pointer-up: the gesture ends and its capture is released.
    pub fn pointer_up(&mut self) {
        if !self.gesture.is_idle() {
            debug!("gesture finished");
        }
        self.gesture = Gesture::Idle;
    }

    /// Click on empty canvas: clear the selection, gesture unchanged.
    pub fn canvas_click(&mut self) {
        self.selection.clear();
    }

    // ── Commands ────────────────────────────────────────────────

    /// Delete a segment (button or keyboard on a specific target).
    ///
    /// If the target is part of a multi-selection the whole selection is
    /// removed; the selection is cleared afterward. Returns the number
    /// of removed segments.
    pub fn delete(&mut self, model: &mut TimelineModel, target: Uuid) -> usize {
        let removed = if self.selection.contains(target) && self.selection.is_multi() {
            let ids: Vec<Uuid> = self.selection.ids().to_vec();
            model.remove_segments(&ids)
        } else {
            model.remove_segments(&[target])
        };
        self.selection.clear();
        removed
    }

    /// Delete every selected segment (keyboard Delete/Backspace with no
    /// explicit target).
    pub fn delete_selection(&mut self, model: &mut TimelineModel) -> usize {
        let ids: Vec<Uuid> = self.selection.ids().to_vec();
        let removed = model.remove_segments(&ids);
        self.selection.clear();
        removed
    }

    /// Split a segment at the playhead.
    ///
    /// Without an explicit target, the target is the video/audio segment
    /// whose span contains the playhead; if none qualifies the request
    /// fails with no mutation. The two parts become the selection.
    pub fn split(
        &mut self,
        model: &mut TimelineModel,
        target: Option<Uuid>,
        playhead_percent: f64,
    ) -> Result<(Uuid, Uuid)> {
        let id = match target {
            Some(id) => id,
            None => self.splittable_at(model, playhead_percent).ok_or_else(|| {
                let err = EditError::NoSplittableSegmentAtPlayhead;
                warn!(%err, playhead_percent, "split rejected");
                err
            })?,
        };
        let parts = model.split_segment(id, playhead_percent).map_err(|err| {
            warn!(%err, %id, "split rejected");
            err
        })?;
        self.selection.replace_all([parts.0, parts.1]);
        Ok(parts)
    }

    /// Merge the current selection; the merged segment becomes the sole
    /// selection on success.
    pub fn merge_selection(&mut self, model: &mut TimelineModel) -> Result<Uuid> {
        let merged = model.merge_segments(self.selection.ids()).map_err(|err| {
            warn!(%err, "merge rejected");
            err
        })?;
        self.selection.replace(merged);
        Ok(merged)
    }

    /// The video/audio segment strictly containing the playhead, if any.
    fn splittable_at(&self, model: &TimelineModel, percent: f64) -> Option<Uuid> {
        [SegmentKind::Video, SegmentKind::Audio]
            .into_iter()
            .flat_map(|kind| model.track(kind).segments_sorted())
            .find(|s| percent > s.start && percent < s.end())
            .map(|s| s.id)
    }
}
