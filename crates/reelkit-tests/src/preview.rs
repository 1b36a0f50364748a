//! Integration tests for the media preview.
//!
//! Exercises the overlay compositor against the timeline model, the
//! segment editor's selection, and the playback clock.

use glam::DVec2;
use uuid::Uuid;

use reelkit_core::PlaybackClock;
use reelkit_preview::{resolve_placement, OverlayCompositor, PRESET_INSET};
use reelkit_timeline::{
    AnchorPreset, Placement, SegmentContent, SegmentEditor, TimelineModel,
};

// ── Helpers ────────────────────────────────────────────────────

fn model_with_overlay() -> (TimelineModel, Uuid) {
    let mut model = TimelineModel::new(100.0);
    model.add_segment("Intro", SegmentContent::video("media/test.mp4"), Some(30.0));
    let id = model
        .add_segment("Title", SegmentContent::text("Hello"), None)
        .id;
    // Overlay spans [20, 30) for the activation tests.
    model.resize_segment(id, 20.0, 10.0);
    (model, id)
}

// ── Activation during playback ─────────────────────────────────

#[test]
fn playback_activates_overlays_inside_their_span() {
    crate::init_tracing();
    let (model, id) = model_with_overlay();
    let mut clock = PlaybackClock::new(100.0);
    clock.set_playing(true);

    let mut compositor = OverlayCompositor::new();
    let _sub = compositor.subscribe();

    clock.scrub(25.0);
    compositor.on_frame(&model, &clock);
    assert_eq!(compositor.active_overlays().len(), 1);
    assert_eq!(compositor.active_overlays()[0].id, id);

    // The video clip underneath is never an overlay.
    clock.scrub(5.0);
    compositor.on_frame(&model, &clock);
    assert!(compositor.active_overlays().is_empty());
}

#[test]
fn view_teardown_cancels_frame_updates() {
    let (model, _) = model_with_overlay();
    let mut clock = PlaybackClock::new(100.0);
    clock.set_playing(true);
    clock.scrub(25.0);

    let mut compositor = OverlayCompositor::new();
    let sub = compositor.subscribe();
    compositor.on_frame(&model, &clock);
    assert_eq!(compositor.active_overlays().len(), 1);

    drop(sub);
    compositor.refresh(&model, 50.0);
    clock.scrub(25.0);
    compositor.on_frame(&model, &clock);
    // Ticks after teardown leave the last refreshed state alone.
    assert!(compositor.active_overlays().is_empty());
}

#[test]
fn scrubbing_while_paused_refreshes_once() {
    let (model, id) = model_with_overlay();
    let mut clock = PlaybackClock::new(100.0);

    let mut compositor = OverlayCompositor::new();
    // No subscription while paused; a scrub refreshes explicitly.
    clock.scrub(25.0);
    compositor.refresh(&model, clock.position());
    assert_eq!(compositor.active_overlays().len(), 1);
    assert_eq!(compositor.active_overlays()[0].id, id);
}

// ── Drag-to-reposition, driven by the editor selection ─────────

#[test]
fn selected_overlay_drag_writes_through_to_the_model() {
    let (mut model, id) = model_with_overlay();
    let mut editor = SegmentEditor::new();
    let mut compositor = OverlayCompositor::new();

    // Select the overlay on the timeline, then release the timeline
    // gesture; the preview drag is a separate interaction.
    editor.pointer_down_segment(&model, id, 25.0, false);
    editor.pointer_up();

    compositor.refresh(&model, 25.0);
    assert!(compositor.begin_drag(&model, editor.selection(), id, DVec2::new(50.0, 50.0)));

    let updated = compositor
        .drag_move(&mut model, DVec2::new(58.0, 42.0))
        .unwrap();
    assert_eq!(
        updated.content.placement(),
        Some(Placement::custom(58.0, 42.0))
    );
    assert!(compositor.end_drag());

    // The custom position survives a reload of the segment.
    assert_eq!(
        model.segment(id).unwrap().content.placement(),
        Some(Placement::custom(58.0, 42.0))
    );
}

#[test]
fn unselected_overlay_refuses_to_drag() {
    let (model, id) = model_with_overlay();
    let editor = SegmentEditor::new();
    let mut compositor = OverlayCompositor::new();

    compositor.refresh(&model, 25.0);
    assert!(!compositor.begin_drag(&model, editor.selection(), id, DVec2::new(50.0, 50.0)));
}

#[test]
fn custom_position_takes_precedence_over_presets() {
    let (mut model, id) = model_with_overlay();
    model.set_overlay_placement(id, Placement::preset(AnchorPreset::BottomRight));

    let preset = resolve_placement(Placement::preset(AnchorPreset::BottomRight));
    assert_eq!(preset.point, DVec2::splat(100.0 - PRESET_INSET));

    model.set_overlay_placement(id, Placement::custom(33.0, 66.0));
    let placement = model.segment(id).unwrap().content.placement().unwrap();
    assert_eq!(resolve_placement(placement).point, DVec2::new(33.0, 66.0));
}

#[test]
fn deleting_the_overlay_mid_drag_cancels_it() {
    let (mut model, id) = model_with_overlay();
    let mut editor = SegmentEditor::new();
    let mut compositor = OverlayCompositor::new();

    editor.pointer_down_segment(&model, id, 25.0, false);
    editor.pointer_up();
    compositor.refresh(&model, 25.0);
    compositor.begin_drag(&model, editor.selection(), id, DVec2::new(50.0, 50.0));

    editor.delete(&mut model, id);
    assert!(compositor
        .drag_move(&mut model, DVec2::new(55.0, 55.0))
        .is_none());
    assert_eq!(compositor.dragging(), None);
}
