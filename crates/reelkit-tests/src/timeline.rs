//! Integration tests for the timeline subsystem.
//!
//! Exercises cross-crate interactions between reelkit-core and
//! reelkit-timeline: auto-placement, gestures, split/merge, playback
//! and project persistence.

use reelkit_core::{EditError, PlaybackClock, DEFAULT_FRAME_RATE};
use reelkit_timeline::{
    Cursor, ProjectData, ProjectFile, ResizeEdge, SegmentContent, SegmentEditor, SegmentKind,
    TimelineModel, MIN_SEGMENT_WIDTH,
};
use uuid::Uuid;

// ── Helpers ────────────────────────────────────────────────────

fn project() -> TimelineModel {
    // 100-second project, so percent and seconds coincide.
    TimelineModel::new(100.0)
}

fn add_clip(model: &mut TimelineModel, name: &str, secs: f64) -> Uuid {
    model
        .add_segment(name, SegmentContent::video("media/test.mp4"), Some(secs))
        .id
}

// ── Auto-placement ─────────────────────────────────────────────

#[test]
fn first_clip_lands_at_track_start() {
    let mut model = project();
    let id = add_clip(&mut model, "Intro", 30.0);

    let seg = model.segment(id).unwrap();
    assert_eq!(seg.start, 0.0);
    assert_eq!(seg.width, 30.0);
}

#[test]
fn second_clip_follows_the_span_with_a_gap() {
    let mut model = project();
    add_clip(&mut model, "Intro", 30.0);
    let id = add_clip(&mut model, "Body", 15.0);

    let seg = model.segment(id).unwrap();
    assert_eq!(seg.start, 32.0);
    assert_eq!(seg.width, 15.0);
}

#[test]
fn tracks_place_independently() {
    let mut model = project();
    add_clip(&mut model, "Intro", 30.0);
    let text = model.add_segment("Title", SegmentContent::text("Hi"), None).id;
    let image = model
        .add_segment("Logo", SegmentContent::image("logo.png"), None)
        .id;

    // Overlays start their own tracks from zero with fixed widths.
    let text = model.segment(text).unwrap();
    assert_eq!((text.start, text.width), (0.0, 15.0));
    let image = model.segment(image).unwrap();
    assert_eq!((image.start, image.width), (0.0, 20.0));
}

// ── Split and merge ────────────────────────────────────────────

#[test]
fn split_then_merge_restores_the_span() {
    crate::init_tracing();
    let mut model = project();
    let mut editor = SegmentEditor::new();
    let id = add_clip(&mut model, "Intro", 30.0);

    // Playhead mid-clip; no explicit target needed.
    let mut clock = PlaybackClock::new(100.0);
    clock.scrub(15.0);

    let (first, second) = editor.split(&mut model, None, clock.position()).unwrap();
    assert_eq!(first, id);
    assert_eq!(model.segment(first).unwrap().name, "Intro (part 1)");
    assert_eq!(model.segment(second).unwrap().name, "Intro (part 2)");
    assert_eq!(model.segment(second).unwrap().start, 15.0);
    // Both parts are selected, ready to merge back.
    assert_eq!(editor.selection(), &[first, second]);

    let merged = editor.merge_selection(&mut model).unwrap();
    let seg = model.segment(merged).unwrap();
    assert_eq!(seg.name, "Intro (merged)");
    assert_eq!((seg.start, seg.width), (0.0, 30.0));
    assert_eq!(editor.selection(), &[merged]);
}

#[test]
fn split_fails_on_empty_playhead_position() {
    let mut model = project();
    let mut editor = SegmentEditor::new();
    add_clip(&mut model, "Intro", 30.0);

    let err = editor.split(&mut model, None, 50.0).unwrap_err();
    assert!(matches!(err, EditError::NoSplittableSegmentAtPlayhead));
    assert_eq!(model.segment_count(), 1);
}

#[test]
fn failed_merge_leaves_the_model_untouched() {
    let mut model = project();
    let mut editor = SegmentEditor::new();
    let a = add_clip(&mut model, "Intro", 30.0);
    let b = add_clip(&mut model, "Body", 15.0);

    // Auto-placement leaves a 2% gap, wider than the merge tolerance.
    editor.pointer_down_segment(&model, a, 10.0, false);
    editor.pointer_up();
    editor.pointer_down_segment(&model, b, 40.0, true);
    editor.pointer_up();

    let before = model.revision();
    let err = editor.merge_selection(&mut model).unwrap_err();
    assert!(matches!(err, EditError::NonAdjacentMerge));
    assert_eq!(model.revision(), before);
    assert_eq!(model.segment_count(), 2);
}

// ── Gestures ───────────────────────────────────────────────────

#[test]
fn drag_moves_the_whole_multi_selection() {
    let mut model = project();
    let mut editor = SegmentEditor::new();
    let a = add_clip(&mut model, "Intro", 30.0);
    let b = add_clip(&mut model, "Body", 15.0);

    editor.pointer_down_segment(&model, a, 10.0, false);
    editor.pointer_up();
    // Second pointer-down with the modifier grows the selection and
    // starts a drag of both segments.
    editor.pointer_down_segment(&model, b, 35.0, true);
    editor.pointer_move(&mut model, 40.0);
    editor.pointer_up();

    assert_eq!(model.segment(a).unwrap().start, 5.0);
    assert_eq!(model.segment(b).unwrap().start, 37.0);
}

#[test]
fn resize_respects_the_minimum_width() {
    let mut model = project();
    let mut editor = SegmentEditor::new();
    let id = add_clip(&mut model, "Intro", 30.0);

    editor.pointer_down_resize(&model, id, ResizeEdge::End);
    editor.pointer_move(&mut model, 2.0);
    editor.pointer_up();

    let seg = model.segment(id).unwrap();
    assert_eq!(seg.width, MIN_SEGMENT_WIDTH);
    assert_eq!(seg.start, 0.0);
}

#[test]
fn cursor_follows_the_gesture_lifecycle() {
    let mut model = project();
    let mut editor = SegmentEditor::new();
    let id = add_clip(&mut model, "Intro", 30.0);

    assert_eq!(editor.cursor(), Cursor::Default);
    editor.pointer_down_segment(&model, id, 10.0, false);
    assert_eq!(editor.cursor(), Cursor::Grabbing);
    editor.pointer_up();
    assert_eq!(editor.cursor(), Cursor::Default);

    editor.pointer_down_resize(&model, id, ResizeEdge::End);
    assert_eq!(editor.cursor(), Cursor::ResizeEast);
    editor.pointer_up();
    assert_eq!(editor.cursor(), Cursor::Default);
}

#[test]
fn deleting_a_multi_selection_member_removes_all_of_it() {
    let mut model = project();
    let mut editor = SegmentEditor::new();
    let a = add_clip(&mut model, "Intro", 30.0);
    let b = add_clip(&mut model, "Body", 15.0);

    editor.pointer_down_segment(&model, a, 10.0, false);
    editor.pointer_up();
    editor.pointer_down_segment(&model, b, 40.0, true);
    editor.pointer_up();

    assert_eq!(editor.delete(&mut model, b), 2);
    assert_eq!(model.segment_count(), 0);
    assert!(editor.selection().is_empty());
}

// ── Playback ───────────────────────────────────────────────────

#[test]
fn timecode_tracks_the_scrubbed_position() {
    let mut clock = PlaybackClock::new(181.0);
    clock.set_time(90.5);
    assert_eq!(clock.timecode(DEFAULT_FRAME_RATE), "00:01:30:15");

    clock.scrub(100.0);
    assert_eq!(clock.current_seconds(), 181.0);
    assert_eq!(clock.timecode(DEFAULT_FRAME_RATE), "00:03:01:00");
}

// ── Persistence ────────────────────────────────────────────────

#[test]
fn project_roundtrips_through_json() {
    let mut model = project();
    let clip = add_clip(&mut model, "Intro", 30.0);
    model.add_segment("Title", SegmentContent::text("Hello"), None);

    let mut clock = PlaybackClock::new(100.0);
    clock.scrub(40.0);

    let file = ProjectFile::new(ProjectData::capture("Demo", &model, clock.position()));
    let bytes = file.to_json().unwrap();
    let loaded = ProjectFile::from_json(&bytes).unwrap();

    assert_eq!(loaded.project.name, "Demo");
    assert_eq!(loaded.project.playhead, 40.0);

    let restored = loaded.project.restore();
    assert_eq!(restored.segment_count(), 2);
    let seg = restored.segment(clip).unwrap();
    assert_eq!(seg.name, "Intro");
    assert_eq!((seg.start, seg.width), (0.0, 30.0));
    assert_eq!(seg.kind, SegmentKind::Video);
}

#[test]
fn project_roundtrips_through_a_file() {
    let mut model = project();
    add_clip(&mut model, "Intro", 30.0);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("demo.rkproj");

    let file = ProjectFile::new(ProjectData::capture("Demo", &model, 0.0));
    file.save_to_file(&path).unwrap();
    let loaded = ProjectFile::load_from_file(&path).unwrap();

    assert_eq!(loaded.project.restore().segment_count(), 1);
}

#[test]
fn revision_bumps_on_every_mutation() {
    let mut model = project();
    let r0 = model.revision();
    let id = add_clip(&mut model, "Intro", 30.0);
    let r1 = model.revision();
    assert!(r1 > r0);

    model.shift_segments(&[id], 5.0);
    let r2 = model.revision();
    assert!(r2 > r1);

    model.remove_segments(&[id]);
    assert!(model.revision() > r2);
}
