//! The overlay compositor.
//!
//! Derives the set of active overlays from the timeline model and the
//! playback clock, and runs the drag-to-reposition interaction. Per-frame
//! recomputation is gated by a scoped subscription guard so a stopped
//! playback or a torn-down view cannot keep recomputing forever.
//!
//! Activation uses a half-open interval: a segment is active from
//! exactly its start up to but excluding its end.

use std::cell::Cell;
use std::rc::Rc;

use glam::DVec2;
use tracing::{debug, trace};
use uuid::Uuid;

use reelkit_core::PlaybackClock;
use reelkit_timeline::{Placement, Segment, TimelineModel};

use crate::anchor::resolve_placement;

/// Scoped handle for per-frame overlay recomputation.
///
/// Held by whoever drives frames (the playing view); dropping it cancels
/// recomputation on the owning compositor.
pub struct FrameSubscription {
    active: Rc<Cell<bool>>,
}

impl Drop for FrameSubscription {
    fn drop(&mut self) {
        self.active.set(false);
        trace!("frame subscription cancelled");
    }
}

/// An overlay drag in progress.
#[derive(Debug, Clone, Copy)]
struct OverlayDrag {
    id: Uuid,
    /// Previous pointer sample, percent of the container.
    last_sample: DVec2,
    /// Running element center, percent of the container.
    center: DVec2,
}

/// Projects timeline state onto the media preview.
#[derive(Default)]
pub struct OverlayCompositor {
    /// Overlays active at the last evaluated playhead position.
    active: Vec<Segment>,
    /// At most one overlay drags at a time.
    drag: Option<OverlayDrag>,
    /// Shared with the outstanding [`FrameSubscription`], if any.
    subscription: Option<Rc<Cell<bool>>>,
}

impl OverlayCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin per-frame recomputation; cancelled when the returned guard
    /// drops. A new subscription displaces any previous one.
    pub fn subscribe(&mut self) -> FrameSubscription {
        let flag = Rc::new(Cell::new(true));
        self.subscription = Some(flag.clone());
        FrameSubscription { active: flag }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.as_ref().is_some_and(|f| f.get())
    }

    /// Per-frame tick while playback runs. Recomputes the active set only
    /// while a subscription is alive.
    pub fn on_frame(&mut self, model: &TimelineModel, clock: &PlaybackClock) {
        if self.is_subscribed() {
            self.recompute(model, clock.position());
        }
    }

    /// One-shot recomputation, used on scrub and on pause.
    pub fn refresh(&mut self, model: &TimelineModel, current_percent: f64) {
        self.recompute(model, current_percent);
    }

    /// Overlays active at the last evaluated position, ordered by start.
    pub fn active_overlays(&self) -> &[Segment] {
        &self.active
    }

    fn recompute(&mut self, model: &TimelineModel, current_percent: f64) {
        self.active = model
            .flattened_segments()
            .into_iter()
            .filter(|s| Self::is_active(s, current_percent))
            .collect();
    }

    /// The activation predicate: overlay kind and playhead inside the
    /// segment's half-open span.
    pub fn is_active(segment: &Segment, current_percent: f64) -> bool {
        segment.kind.is_overlay() && segment.contains(current_percent)
    }

    // ── Drag-to-reposition ──────────────────────────────────────

    /// The overlay currently being dragged, if any.
    pub fn dragging(&self) -> Option<Uuid> {
        self.drag.map(|d| d.id)
    }

    /// Pointer-down on an overlay. Starts a drag only for an active,
    /// currently selected overlay; a new drag implicitly ends any drag
    /// already in progress.
    pub fn begin_drag(
        &mut self,
        model: &TimelineModel,
        selection: &[Uuid],
        id: Uuid,
        pointer: DVec2,
    ) -> bool {
        if !selection.contains(&id) || !self.active.iter().any(|s| s.id == id) {
            return false;
        }
        let Some(placement) = model.segment(id).and_then(|s| s.content.placement()) else {
            return false;
        };

        let center = resolve_placement(placement).point;
        self.drag = Some(OverlayDrag {
            id,
            last_sample: pointer,
            center,
        });
        debug!(%id, "overlay drag started");
        true
    }

    /// Pointer-move during an overlay drag.
    ///
    /// Applies the delta from the previous sample to the running center,
    /// clamps both axes to the container, writes the custom placement
    /// into the model, and returns the updated segment immediately —
    /// every move, never deferred to release — so the timeline and the
    /// preview never disagree.
    pub fn drag_move(&mut self, model: &mut TimelineModel, pointer: DVec2) -> Option<Segment> {
        let drag = self.drag.as_mut()?;
        let delta = pointer - drag.last_sample;
        drag.last_sample = pointer;
        drag.center = (drag.center + delta).clamp(DVec2::ZERO, DVec2::splat(100.0));

        let (id, center) = (drag.id, drag.center);
        match model.set_overlay_placement(id, Placement::custom(center.x, center.y)) {
            Some(updated) => {
                // Keep the rendered active set in step with the model.
                if let Some(slot) = self.active.iter_mut().find(|s| s.id == id) {
                    *slot = updated.clone();
                }
                Some(updated)
            }
            None => {
                // Target vanished mid-drag (e.g. deleted); cancel.
                self.drag = None;
                None
            }
        }
    }

    /// Pointer-up: the drag ends, keeping the last written position.
    pub fn end_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }
}
