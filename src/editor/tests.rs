//! Scenario tests for the editing state machine.

use std::time::Duration;

use web_time::Instant;

use super::*;
use crate::rename::SimulatedPersistence;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

/// Editor with a 1000x500 image shown 1000 px wide (scale 1).
fn editor() -> Editor {
    let mut editor = Editor::default();
    editor.load_image(1000, 500);
    editor.resize(1000.0);
    editor
}

fn polygon_editor() -> Editor {
    let mut editor = editor();
    editor.select_tool(AnnotationKind::Polygon);
    editor
}

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Draw and close a square polygon; leaves it active in Editing.
fn draw_square(editor: &mut Editor) -> AnnotationId {
    let id = editor.create_annotation();
    for point in [p(0.0, 0.0), p(100.0, 0.0), p(100.0, 100.0), p(0.0, 100.0)] {
        assert!(editor.add_point(point));
    }
    assert!(editor.add_point(p(2.0, 2.0)));
    assert_eq!(editor.mode(), EditMode::Editing);
    id
}

/// Draw a vector; leaves it active in Editing.
fn draw_vector(editor: &mut Editor, tail: Point, head: Point) -> AnnotationId {
    let id = editor.create_annotation();
    assert!(editor.add_point(tail));
    assert!(editor.add_point(head));
    id
}

// =============================================================================
// Creation and selection
// =============================================================================

#[test]
fn test_create_annotation_defaults() {
    let mut editor = editor();
    assert_eq!(editor.hint(), "Create an annotation to get started.");

    let id = editor.create_annotation();
    let ann = editor.active().unwrap();
    assert_eq!(ann.id, id);
    assert_eq!(ann.name, "Annotation 1");
    assert_eq!(ann.kind, AnnotationKind::Vector);
    assert!(ann.points.is_empty());
    assert!(!ann.is_complete);
    assert_eq!(editor.mode(), EditMode::Drawing);
    assert_eq!(editor.hint(), "Click to add points. Right click to remove a point.");

    editor.create_annotation();
    assert_eq!(editor.annotations()[1].name, "Annotation 2");
    assert_eq!(editor.annotations().iter().filter(|a| a.is_active).count(), 1);
    assert!(!editor.annotations()[0].is_active);
}

#[test]
fn test_duplicate_id_rejected() {
    let mut editor = editor();
    let id = editor.create_annotation();
    assert!(!editor.create_annotation_with_id(id));
    assert!(!editor.create_annotation_with_id(AnnotationId::NONE));
    assert_eq!(editor.annotations().len(), 1);
}

#[test]
fn test_clear_selection() {
    let mut editor = editor();
    let id = draw_vector(&mut editor, p(1.0, 1.0), p(5.0, 5.0));
    editor.save();
    assert!(editor.select_annotation(id));
    assert!(editor.update(Message::ClearSelection));
    assert!(editor.active().is_none());
    assert_eq!(editor.mode(), EditMode::Idle);
    assert!(editor.draft().is_empty());
    assert_eq!(editor.hint(), "Select an annotation to edit.");
}

// =============================================================================
// Vector rules
// =============================================================================

#[test]
fn test_vector_caps_at_two_points() {
    let mut editor = editor();
    draw_vector(&mut editor, p(10.0, 10.0), p(20.0, 20.0));

    assert_eq!(editor.mode(), EditMode::Editing);
    assert!(!editor.add_point(p(30.0, 30.0)));
    assert_eq!(editor.draft().len(), 2);
}

#[test]
fn test_vector_points_cannot_be_removed() {
    let mut editor = editor();
    draw_vector(&mut editor, p(10.0, 10.0), p(20.0, 20.0));
    assert!(!editor.remove_point(0));
    assert!(!editor.remove_point(1));
    assert_eq!(editor.draft().len(), 2);
}

#[test]
fn test_single_point_vector_saves_complete() {
    let mut editor = editor();
    let id = editor.create_annotation();
    editor.add_point(p(10.0, 10.0));
    assert!(editor.save());

    let ann = editor.store().get(&id).unwrap();
    assert_eq!(ann.points.len(), 1);
    assert!(ann.is_complete);
}

// =============================================================================
// Polygon rules
// =============================================================================

#[test]
fn test_polygon_closes_near_first_vertex() {
    let mut editor = polygon_editor();
    editor.create_annotation();
    for point in [p(0.0, 0.0), p(100.0, 0.0), p(100.0, 100.0)] {
        editor.add_point(point);
    }

    assert!(editor.add_point(p(3.0, 4.0)));
    assert_eq!(editor.mode(), EditMode::Editing);
    assert_eq!(editor.draft().len(), 3);
    // Closed: further clicks are not appended
    assert!(!editor.add_point(p(50.0, 50.0)));
}

#[test]
fn test_polygon_appends_at_close_radius() {
    let mut editor = polygon_editor();
    editor.create_annotation();
    for point in [p(0.0, 0.0), p(100.0, 0.0), p(100.0, 100.0)] {
        editor.add_point(point);
    }

    // Exactly on the radius is not strictly inside
    assert!(editor.add_point(p(6.0, 8.0)));
    assert_eq!(editor.mode(), EditMode::Drawing);
    assert_eq!(editor.draft().len(), 4);
}

#[test]
fn test_polygon_needs_three_points_to_close() {
    let mut editor = polygon_editor();
    editor.resize(500.0);
    editor.create_annotation();

    assert!(editor.add_point(p(100.0, 100.0)));
    assert!(approx_eq(editor.draft()[0], p(200.0, 200.0)));

    assert!(editor.add_point(p(100.0, 100.0)));
    assert_eq!(editor.draft().len(), 2);
    assert_eq!(editor.mode(), EditMode::Drawing);
}

#[test]
fn test_close_threshold_scales_with_viewport() {
    let mut editor = polygon_editor();
    editor.resize(500.0);
    assert!((editor.close_threshold() - 20.0).abs() < EPSILON);

    editor.create_annotation();
    for point in [p(10.0, 10.0), p(100.0, 10.0), p(100.0, 100.0)] {
        editor.add_point(point);
    }
    // 9 device px away from the first vertex closes at any scale
    assert!(editor.add_point(p(19.0, 10.0)));
    assert_eq!(editor.mode(), EditMode::Editing);
}

#[test]
fn test_remove_point_respects_minimum() {
    let mut editor = polygon_editor();
    draw_square(&mut editor);

    assert!(editor.remove_point(1));
    assert_eq!(editor.draft(), &[p(0.0, 0.0), p(100.0, 100.0), p(0.0, 100.0)]);
    assert!(!editor.remove_point(0));
    assert_eq!(editor.draft().len(), 3);
}

#[test]
fn test_remove_last_point_reopens_polygon() {
    let mut editor = polygon_editor();
    draw_square(&mut editor);

    assert!(editor.remove_point(3));
    assert_eq!(editor.mode(), EditMode::Drawing);
    assert!(editor.add_point(p(50.0, 150.0)));
    assert_eq!(editor.draft().len(), 4);
}

#[test]
fn test_incomplete_polygon_saves_incomplete() {
    let mut editor = polygon_editor();
    let id = editor.create_annotation();
    editor.add_point(p(0.0, 0.0));
    editor.add_point(p(10.0, 0.0));
    assert!(editor.save());
    assert!(!editor.store().get(&id).unwrap().is_complete);
}

// =============================================================================
// Drags
// =============================================================================

#[test]
fn test_point_drag_is_one_checkpoint() {
    let mut editor = polygon_editor();
    draw_square(&mut editor);
    let before = editor.history().len();

    assert!(editor.drag_point_start(2));
    for step in 1..=10 {
        editor.drag_point_move(2, p(100.0 + step as f64, 100.0 + step as f64));
    }
    assert_eq!(editor.history().len(), before);
    assert!(editor.drag_point_end());

    assert_eq!(editor.history().len(), before + 1);
    assert_eq!(editor.draft()[2], p(110.0, 110.0));
    assert_eq!(editor.mode(), EditMode::Editing);
}

#[test]
fn test_zero_distance_drag_adds_no_checkpoint() {
    let mut editor = polygon_editor();
    draw_square(&mut editor);
    let before = editor.history().len();

    editor.drag_point_start(0);
    editor.drag_point_move(0, p(0.0, 0.0));
    editor.drag_point_end();
    editor.drag_shape_start(p(50.0, 50.0));
    editor.drag_shape_end();

    assert_eq!(editor.history().len(), before);
}

#[test]
fn test_drag_move_requires_matching_index() {
    let mut editor = polygon_editor();
    draw_square(&mut editor);
    editor.drag_point_start(1);
    assert!(!editor.drag_point_move(2, p(5.0, 5.0)));
    assert_eq!(editor.draft()[2], p(100.0, 100.0));
}

#[test]
fn test_shape_drag_translates_on_end() {
    let mut editor = polygon_editor();
    editor.resize(500.0);
    draw_square(&mut editor);
    let original = editor.draft().to_vec();

    assert!(editor.drag_shape_start(p(10.0, 10.0)));
    editor.drag_shape_move(p(15.0, 12.0));
    editor.drag_shape_move(p(20.0, 15.0));

    // Points are untouched until the drag ends
    assert_eq!(editor.draft(), original.as_slice());
    assert_eq!(editor.shape_offset(), p(20.0, 10.0));

    assert!(editor.drag_shape_end());
    let moved: Vec<Point> = original.iter().map(|q| q.offset(20.0, 10.0)).collect();
    assert_eq!(editor.draft(), moved.as_slice());
    assert_eq!(editor.shape_offset(), Point::ZERO);

    assert!(editor.undo());
    assert_eq!(editor.draft(), original.as_slice());
}

#[test]
fn test_drags_rejected_while_drawing() {
    let mut editor = polygon_editor();
    editor.create_annotation();
    editor.add_point(p(0.0, 0.0));
    assert!(!editor.drag_point_start(0));
    assert!(!editor.drag_shape_start(p(0.0, 0.0)));
    assert!(!editor.remove_point(0));
}

// =============================================================================
// Undo / redo
// =============================================================================

#[test]
fn test_undo_redo_round_trip() {
    let mut editor = polygon_editor();
    editor.create_annotation();
    let clicks = [p(0.0, 0.0), p(100.0, 0.0), p(100.0, 100.0), p(0.0, 100.0)];
    for point in clicks {
        editor.add_point(point);
    }
    let drawn = editor.draft().to_vec();

    for _ in 0..clicks.len() {
        assert!(editor.undo());
    }
    assert!(editor.draft().is_empty());
    assert!(!editor.undo());

    for _ in 0..clicks.len() {
        assert!(editor.redo());
    }
    assert_eq!(editor.draft(), drawn.as_slice());
    assert!(!editor.redo());
}

#[test]
fn test_undo_reopens_closed_polygon() {
    let mut editor = polygon_editor();
    draw_square(&mut editor);

    assert!(editor.undo());
    assert_eq!(editor.mode(), EditMode::Drawing);
    assert_eq!(editor.draft().len(), 4);

    assert!(editor.redo());
    assert_eq!(editor.mode(), EditMode::Editing);
}

#[test]
fn test_new_edit_discards_redo() {
    let mut editor = polygon_editor();
    editor.create_annotation();
    editor.add_point(p(0.0, 0.0));
    editor.add_point(p(10.0, 0.0));
    editor.undo();
    assert!(editor.history().can_redo());

    editor.add_point(p(20.0, 20.0));
    assert!(!editor.history().can_redo());
    assert_eq!(editor.draft(), &[p(0.0, 0.0), p(20.0, 20.0)]);
}

#[test]
fn test_undo_blocked_during_drag() {
    let mut editor = polygon_editor();
    draw_square(&mut editor);
    editor.drag_point_start(0);
    assert!(!editor.undo());
    assert!(!editor.controls().undo);
}

#[test]
fn test_history_limit_from_config() {
    let mut config = EditorConfig::default();
    config.preferences.history_limit = 3;
    let mut editor = Editor::new(&config);
    editor.load_image(100, 100);
    editor.resize(100.0);
    editor.select_tool(AnnotationKind::Polygon);
    editor.create_annotation();
    for i in 0..6 {
        editor.add_point(p(10.0 * i as f64, 50.0));
    }

    assert_eq!(editor.history().len(), 3);
    assert!(editor.undo());
    assert!(editor.undo());
    assert!(!editor.undo());
    assert_eq!(editor.draft().len(), 4);
}

// =============================================================================
// Shadow edits
// =============================================================================

#[test]
fn test_shadow_edits_survive_switching() {
    let mut editor = editor();
    let a = draw_vector(&mut editor, p(10.0, 10.0), p(50.0, 50.0));
    editor.save();
    let b = draw_vector(&mut editor, p(200.0, 200.0), p(300.0, 300.0));
    editor.save();

    editor.select_annotation(a);
    editor.drag_point_start(1);
    editor.drag_point_move(1, p(70.0, 70.0));
    editor.drag_point_end();
    assert_eq!(editor.shadow_edits(&a), Some(&[p(10.0, 10.0), p(70.0, 70.0)][..]));

    editor.select_annotation(b);
    assert_eq!(editor.draft(), &[p(200.0, 200.0), p(300.0, 300.0)]);

    editor.select_annotation(a);
    assert_eq!(editor.draft(), &[p(10.0, 10.0), p(70.0, 70.0)]);
    // Saved points are unchanged until save
    assert_eq!(editor.store().get(&a).unwrap().points, vec![p(10.0, 10.0), p(50.0, 50.0)]);
}

#[test]
fn test_shape_drag_shadow_survives_switching() {
    let mut editor = editor();
    let a = draw_vector(&mut editor, p(10.0, 10.0), p(50.0, 50.0));
    editor.save();
    let b = draw_vector(&mut editor, p(200.0, 200.0), p(300.0, 300.0));
    editor.save();

    editor.select_annotation(a);
    assert!(editor.drag_shape_start(p(20.0, 20.0)));
    editor.drag_shape_move(p(25.0, 30.0));
    assert!(editor.drag_shape_end());
    let moved = [p(15.0, 20.0), p(55.0, 60.0)];
    assert_eq!(editor.shadow_edits(&a), Some(&moved[..]));

    editor.select_annotation(b);
    assert_eq!(editor.draft(), &[p(200.0, 200.0), p(300.0, 300.0)]);

    editor.select_annotation(a);
    assert_eq!(editor.draft(), &moved[..]);
    assert_eq!(editor.mode(), EditMode::Editing);
    assert_eq!(editor.store().get(&a).unwrap().points, vec![p(10.0, 10.0), p(50.0, 50.0)]);
}

#[test]
fn test_save_clears_shadow() {
    let mut editor = editor();
    let a = draw_vector(&mut editor, p(10.0, 10.0), p(50.0, 50.0));
    editor.drag_point_start(0);
    editor.drag_point_move(0, p(15.0, 15.0));
    editor.drag_point_end();
    assert!(editor.shadow_edits(&a).is_some());

    assert!(editor.save());
    assert!(editor.shadow_edits(&a).is_none());
    assert_eq!(editor.store().get(&a).unwrap().points, vec![p(15.0, 15.0), p(50.0, 50.0)]);
    assert_eq!(editor.mode(), EditMode::Idle);
    assert!(editor.active().is_none());
}

#[test]
fn test_cancel_discards_shadow() {
    let mut editor = editor();
    let a = draw_vector(&mut editor, p(10.0, 10.0), p(50.0, 50.0));
    editor.save();
    editor.select_annotation(a);
    editor.drag_point_start(0);
    editor.drag_point_move(0, p(15.0, 15.0));
    editor.drag_point_end();

    assert!(editor.cancel());
    assert!(editor.shadow_edits(&a).is_none());
    assert_eq!(editor.draft(), &[p(10.0, 10.0), p(50.0, 50.0)]);
    assert_eq!(editor.mode(), EditMode::Idle);

    editor.select_annotation(a);
    assert_eq!(editor.draft(), &[p(10.0, 10.0), p(50.0, 50.0)]);
}

#[test]
fn test_undo_updates_shadow() {
    let mut editor = editor();
    let a = draw_vector(&mut editor, p(10.0, 10.0), p(50.0, 50.0));
    editor.drag_point_start(1);
    editor.drag_point_move(1, p(60.0, 60.0));
    editor.drag_point_end();
    editor.undo();
    assert_eq!(editor.shadow_edits(&a), Some(editor.draft()));
}

// =============================================================================
// Save, cancel, remove
// =============================================================================

#[test]
fn test_save_empty_draft_is_noop() {
    let mut editor = editor();
    let id = editor.create_annotation();
    assert!(!editor.save());
    assert_eq!(editor.active_id(), Some(id));
    assert!(!editor.controls().save);
}

#[test]
fn test_save_without_active_is_noop() {
    let mut editor = editor();
    assert!(!editor.save());
    assert!(!editor.cancel());
}

#[test]
fn test_save_finishes_drag() {
    let mut editor = editor();
    let id = draw_vector(&mut editor, p(10.0, 10.0), p(50.0, 50.0));
    editor.drag_shape_start(p(0.0, 0.0));
    editor.drag_shape_move(p(5.0, 5.0));
    assert!(editor.save());
    assert_eq!(editor.store().get(&id).unwrap().points, vec![p(15.0, 15.0), p(55.0, 55.0)]);
}

#[test]
fn test_remove_active_annotation() {
    let mut editor = editor();
    let a = draw_vector(&mut editor, p(10.0, 10.0), p(50.0, 50.0));
    editor.drag_point_start(0);
    editor.drag_point_move(0, p(12.0, 12.0));
    editor.drag_point_end();
    editor.request_rename(a, "Gone", Instant::now()).unwrap();

    assert!(editor.remove_annotation(a));
    assert!(editor.annotations().is_empty());
    assert!(editor.draft().is_empty());
    assert!(editor.shadow_edits(&a).is_none());
    assert!(!editor.is_saving_name(&a));
    assert!(!editor.history().can_undo());
    assert_eq!(editor.mode(), EditMode::Idle);
    assert!(!editor.remove_annotation(a));
}

#[test]
fn test_remove_inactive_keeps_draft() {
    let mut editor = editor();
    let a = draw_vector(&mut editor, p(10.0, 10.0), p(50.0, 50.0));
    editor.save();
    draw_vector(&mut editor, p(1.0, 1.0), p(2.0, 2.0));

    assert!(editor.remove_annotation(a));
    assert_eq!(editor.draft().len(), 2);
    assert_eq!(editor.mode(), EditMode::Editing);
}

// =============================================================================
// Tools and controls
// =============================================================================

#[test]
fn test_tool_change_retags_empty_active() {
    let mut editor = editor();
    let id = editor.create_annotation();
    assert!(editor.controls().change_tool);
    assert!(editor.select_tool(AnnotationKind::Polygon));
    assert_eq!(editor.store().get(&id).unwrap().kind, AnnotationKind::Polygon);
    assert_eq!(editor.tool(), AnnotationKind::Polygon);
    assert!(!editor.select_tool(AnnotationKind::Polygon));
}

#[test]
fn test_tool_follows_reselected_annotation() {
    let mut editor = editor();
    let a = editor.create_annotation();
    assert!(editor.update(Message::ClearSelection));
    assert!(editor.select_tool(AnnotationKind::Polygon));
    editor.create_annotation();

    assert!(editor.select_annotation(a));
    assert_eq!(editor.tool(), AnnotationKind::Vector);
    assert!(editor.controls().change_tool);

    assert!(editor.select_tool(AnnotationKind::Polygon));
    assert_eq!(editor.store().get(&a).unwrap().kind, AnnotationKind::Polygon);
    assert_eq!(editor.tool(), AnnotationKind::Polygon);
    assert_eq!(editor.mode(), EditMode::Drawing);
}

#[test]
fn test_tool_change_blocked_with_points() {
    let mut editor = editor();
    let id = editor.create_annotation();
    editor.add_point(p(1.0, 1.0));
    assert!(!editor.controls().change_tool);
    assert!(!editor.select_tool(AnnotationKind::Polygon));
    assert_eq!(editor.store().get(&id).unwrap().kind, AnnotationKind::Vector);
}

#[test]
fn test_controls_require_image() {
    let mut editor = Editor::default();
    editor.create_annotation();
    editor.add_point(p(1.0, 1.0));
    assert_eq!(editor.controls(), Controls::default());

    editor.load_image(100, 100);
    let controls = editor.controls();
    assert!(controls.undo);
    assert!(!controls.redo);
    assert!(controls.save);
    assert!(controls.cancel);
    assert!(!controls.change_tool);
    assert!(controls.export);
}

// =============================================================================
// Viewport
// =============================================================================

#[test]
fn test_scale_scenario() {
    let mut editor = Editor::default();
    editor.load_image(1000, 500);
    editor.resize(500.0);
    assert!((editor.scale() - 0.5).abs() < EPSILON);
    assert_eq!(editor.viewport().stage_size(), (500.0, 250.0));

    editor.select_tool(AnnotationKind::Polygon);
    editor.create_annotation();
    editor.add_point(p(100.0, 100.0));
    assert!(approx_eq(editor.draft()[0], p(200.0, 200.0)));
}

#[test]
fn test_resize_keeps_canonical_draft() {
    let mut editor = editor();
    editor.create_annotation();
    editor.add_point(p(100.0, 100.0));
    assert!(editor.resize(250.0));
    assert!(!editor.resize(250.0));
    assert_eq!(editor.draft(), &[p(100.0, 100.0)]);

    editor.add_point(p(100.0, 100.0));
    assert!(approx_eq(editor.draft()[1], p(400.0, 400.0)));
}

// =============================================================================
// Renames
// =============================================================================

#[test]
fn test_rename_saved_after_delay() {
    let mut editor = editor();
    let id = editor.create_annotation();
    let now = Instant::now();

    editor.request_rename(id, "  North gate ", now).unwrap();
    assert_eq!(editor.store().get(&id).unwrap().name, "North gate");
    assert!(editor.is_saving_name(&id));

    let mut backend = SimulatedPersistence::new();
    assert!(editor.poll_renames(now, &mut backend).is_empty());

    let outcomes = editor.poll_renames(now + Duration::from_millis(500), &mut backend);
    assert_eq!(
        outcomes,
        vec![RenameOutcome::Saved {
            id,
            name: "North gate".to_string()
        }]
    );
    assert!(!editor.is_saving_name(&id));
    assert_eq!(backend.saved(), &[(id, "North gate".to_string())]);
}

struct FailingPersistence;

impl NamePersistence for FailingPersistence {
    fn persist(&mut self, _id: AnnotationId, _name: &str) -> Result<(), RenameError> {
        Err(RenameError::Persistence("offline".to_string()))
    }
}

#[test]
fn test_rename_failure_reverts() {
    let mut editor = editor();
    let id = editor.create_annotation();
    let now = Instant::now();
    editor.request_rename(id, "Depot", now).unwrap();

    let outcomes = editor.poll_renames(now + Duration::from_secs(1), &mut FailingPersistence);
    assert!(matches!(
        &outcomes[..],
        [RenameOutcome::Failed { restored, .. }] if restored == "Annotation 1"
    ));
    assert_eq!(editor.store().get(&id).unwrap().name, "Annotation 1");
    assert_eq!(
        editor.take_rename_error(),
        Some(RenameError::Persistence("offline".to_string()))
    );
    assert_eq!(editor.take_rename_error(), None);
}

#[test]
fn test_rename_cancel_reverts() {
    let mut editor = editor();
    let id = editor.create_annotation();
    editor.request_rename(id, "Depot", Instant::now()).unwrap();

    let outcome = editor.cancel_rename(id).unwrap();
    assert_eq!(
        outcome,
        RenameOutcome::Cancelled {
            id,
            restored: "Annotation 1".to_string()
        }
    );
    assert_eq!(editor.store().get(&id).unwrap().name, "Annotation 1");
    assert_eq!(editor.cancel_rename(id), Err(RenameError::NotPending(id)));
}

#[test]
fn test_rename_rejections() {
    let mut editor = editor();
    let id = editor.create_annotation();
    let now = Instant::now();

    assert_eq!(editor.request_rename(id, "   ", now), Err(RenameError::EmptyName));
    let missing = AnnotationId::new_random();
    assert_eq!(
        editor.request_rename(missing, "X", now),
        Err(RenameError::UnknownAnnotation(missing))
    );

    editor.request_rename(id, "First", now).unwrap();
    assert_eq!(
        editor.request_rename(id, "Second", now),
        Err(RenameError::AlreadyPending(id))
    );
    assert_eq!(editor.store().get(&id).unwrap().name, "First");
}

// =============================================================================
// Message channel
// =============================================================================

#[test]
fn test_update_replays_session() {
    let mut editor = editor();
    let id = AnnotationId::new_random();
    let messages = vec![
        Message::SelectTool {
            kind: AnnotationKind::Polygon,
        },
        Message::CreateAnnotation { id },
        Message::Pointer(crate::input::PointerEvent::new(
            crate::input::PointerAction::Click,
            p(0.0, 0.0),
            crate::input::HitTarget::None,
        )),
        Message::Undo,
        Message::Redo,
        Message::Save,
    ];
    let changed: Vec<bool> = messages.into_iter().map(|m| editor.update(m)).collect();

    assert_eq!(changed, vec![true, true, true, true, true, true]);
    let ann = editor.store().get(&id).unwrap();
    assert_eq!(ann.points, vec![p(0.0, 0.0)]);
    assert!(!ann.is_complete);
}
