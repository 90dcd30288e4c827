use egui::{Color32, Modifiers, Pos2, Rect, Vec2};
use vecdraw::element::{Element, Geometry, Property, PropertyKind, factory};
use vecdraw::tools::{SelectionState, SelectionTool, Tool};
use vecdraw::{ActionKind, EditorModel, ElementError, SelectionMode, ShapeId};

// Helper to create a test model with three predefined elements
fn create_test_model() -> (EditorModel, Vec<ShapeId>) {
    let mut model = EditorModel::new();
    let rect = model.add_element(factory::create_rectangle(Rect::from_min_max(
        Pos2::new(0.0, 0.0),
        Pos2::new(100.0, 80.0),
    )));
    let circle = model.add_element(factory::create_circle(Pos2::new(200.0, 40.0), 40.0));
    let line = model.add_element(factory::create_line(
        Pos2::new(300.0, 50.0),
        Pos2::new(400.0, 50.0),
    ));
    (model, vec![rect, circle, line])
}

fn z_order(model: &EditorModel) -> Vec<ShapeId> {
    model.document().elements().iter().map(|e| e.id()).collect()
}

#[test]
fn test_add_element_is_undoable() {
    let (mut model, ids) = create_test_model();
    assert_eq!(model.history().undo_len(), 3);

    assert_eq!(model.undo().as_deref(), Some("Add line"));
    assert!(!model.document().contains(ids[2]));

    assert_eq!(model.redo().as_deref(), Some("Add line"));
    assert_eq!(z_order(&model), ids);
}

#[test]
fn test_clear_canvas_is_one_step() {
    let (mut model, ids) = create_test_model();
    let before = model.history().undo_len();

    assert_eq!(model.clear_canvas(), 3);
    assert!(model.document().is_empty());
    assert_eq!(model.history().undo_len(), before + 1);
    assert_eq!(model.history().undo_description(), Some("Clear canvas"));
    assert_eq!(model.history().history_summary(1)[0].kind, ActionKind::ClearCanvas);

    model.undo();
    assert_eq!(z_order(&model), ids);

    model.redo();
    assert!(model.document().is_empty());

    model.undo();
    assert_eq!(z_order(&model), ids);
}

#[test]
fn test_clear_empty_canvas_records_nothing() {
    let mut model = EditorModel::new();
    assert_eq!(model.clear_canvas(), 0);
    assert!(!model.history().can_undo());
}

#[test]
fn test_delete_selected() {
    let (mut model, ids) = create_test_model();
    model.select(&[ids[0], ids[2]], SelectionMode::Replace);

    assert_eq!(model.delete_selected(), 2);
    assert_eq!(z_order(&model), vec![ids[1]]);
    assert_eq!(model.selection().selection_count(), 0);
    assert_eq!(model.history().undo_description(), Some("Delete selection"));

    model.undo();
    assert_eq!(z_order(&model), ids);
    // Restored shapes come back unselected
    assert!(model.document().elements().iter().all(|e| !e.is_selected()));
}

#[test]
fn test_remove_element_leaves_selection_consistent() {
    let (mut model, ids) = create_test_model();
    model.select(&ids, SelectionMode::Replace);

    assert!(model.remove_element(ids[1]));
    assert_eq!(model.selection().current_selection(), vec![ids[0], ids[2]]);
    assert!(!model.remove_element(ids[1]));
}

#[test]
fn test_undo_drops_removed_shapes_from_selection() {
    let (mut model, ids) = create_test_model();
    model.select(&[ids[2]], SelectionMode::Replace);

    // Undoing the add of the selected line removes it
    model.undo();
    assert_eq!(model.selection().selection_count(), 0);

    model.redo();
    let line = model.document().find_element_by_id(ids[2]).unwrap();
    assert!(!line.is_selected());
    assert!(!model.selection().is_selected(ids[2]));
}

#[test]
fn test_move_selected_is_grouped() {
    let (mut model, ids) = create_test_model();
    model.select(&[ids[0], ids[1]], SelectionMode::Replace);
    let before = model.history().undo_len();

    assert!(model.move_selected(Vec2::new(10.0, -5.0)));
    assert_eq!(model.history().undo_len(), before + 1);
    let rect = model.document().find_element_by_id(ids[0]).unwrap();
    assert_eq!(rect.position(), Vec2::new(10.0, -5.0));

    model.undo();
    for id in &ids[..2] {
        let element = model.document().find_element_by_id(*id).unwrap();
        assert_eq!(element.position(), Vec2::ZERO);
    }

    assert!(!model.move_selected(Vec2::ZERO));
}

#[test]
fn test_resize_round_trip() {
    let (mut model, ids) = create_test_model();
    let circle = ids[1];

    model
        .resize_element(circle, Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(60.0, 100.0)))
        .unwrap();
    let resized = model.document().find_element_by_id(circle).unwrap();
    assert_eq!(
        resized.geometry(),
        Geometry::Circle {
            center: Pos2::new(30.0, 50.0),
            radius: 30.0
        }
    );

    model.undo();
    let restored = model.document().find_element_by_id(circle).unwrap();
    assert_eq!(
        restored.geometry(),
        Geometry::Circle {
            center: Pos2::new(200.0, 40.0),
            radius: 40.0
        }
    );
}

#[test]
fn test_resize_too_small_records_nothing() {
    let (mut model, ids) = create_test_model();
    let before = model.history().undo_len();

    let err = model
        .resize_element(ids[0], Rect::from_min_size(Pos2::ZERO, Vec2::new(1.0, 50.0)))
        .unwrap_err();
    assert!(matches!(err, ElementError::TooSmall { .. }));
    assert_eq!(model.history().undo_len(), before);
}

#[test]
fn test_set_property_and_undo() {
    let (mut model, ids) = create_test_model();

    model
        .set_property(ids[0], Property::StrokeColor(Color32::RED))
        .unwrap();
    let rect = model.document().find_element_by_id(ids[0]).unwrap();
    assert_eq!(rect.style().stroke_color, Color32::RED);

    model.undo();
    let rect = model.document().find_element_by_id(ids[0]).unwrap();
    assert_eq!(rect.property(PropertyKind::StrokeColor), Some(Property::StrokeColor(Color32::BLACK)));

    let err = model
        .set_property(ids[2], Property::Text("nope".into()))
        .unwrap_err();
    assert!(matches!(err, ElementError::UnsupportedProperty { .. }));
}

#[test]
fn test_set_property_on_selection_skips_unsupported() {
    let (mut model, ids) = create_test_model();
    model.select_all();

    let fill = Property::Fill(Some(Color32::LIGHT_BLUE));
    assert_eq!(model.set_property_on_selection(fill.clone()), 2);
    assert_eq!(model.history().undo_description(), Some("Change fill on selection"));

    model.undo();
    for id in &ids[..2] {
        let element = model.document().find_element_by_id(*id).unwrap();
        assert_eq!(element.style().fill, None);
    }
}

#[test]
fn test_reorder_and_undo() {
    let (mut model, ids) = create_test_model();

    assert!(model.bring_to_front(ids[0]));
    assert_eq!(z_order(&model), vec![ids[1], ids[2], ids[0]]);
    assert!(!model.bring_to_front(ids[0]));

    assert!(model.send_to_back(ids[2]));
    assert_eq!(z_order(&model), vec![ids[2], ids[1], ids[0]]);

    model.undo();
    model.undo();
    assert_eq!(z_order(&model), ids);
}

#[test]
fn test_set_background() {
    let mut model = EditorModel::new();
    assert!(model.set_background(Some("#ffffff".into())));
    assert!(!model.set_background(Some("#ffffff".into())));
    assert!(model.set_background(None));

    model.undo();
    assert_eq!(model.document().background(), Some("#ffffff"));
    model.undo();
    assert_eq!(model.document().background(), None);
}

#[test]
fn test_selection_tool_drag_moves_selection() {
    let (mut model, ids) = create_test_model();
    let mut tool = SelectionTool::new();
    let before = model.history().undo_len();

    // Press on the rectangle's top edge
    tool.on_pointer_down(Pos2::new(50.0, 0.0), Modifiers::NONE, &mut model);
    assert!(model.selection().is_selected(ids[0]));
    assert!(matches!(tool.state(), SelectionState::Dragging { .. }));

    tool.on_pointer_move(Pos2::new(55.0, 5.0), Modifiers::NONE, &mut model);
    assert_eq!(tool.drag_offset(), Some(Vec2::new(5.0, 5.0)));
    // Nothing moves before release
    let rect = model.document().find_element_by_id(ids[0]).unwrap();
    assert_eq!(rect.position(), Vec2::ZERO);

    tool.on_pointer_up(Pos2::new(60.0, 10.0), Modifiers::NONE, &mut model);
    let rect = model.document().find_element_by_id(ids[0]).unwrap();
    assert_eq!(rect.position(), Vec2::new(10.0, 10.0));
    assert_eq!(model.history().undo_len(), before + 1);
    assert_eq!(tool.state(), SelectionState::Idle);
}

#[test]
fn test_selection_tool_marquee_with_shift_adds() {
    let (mut model, ids) = create_test_model();
    let mut tool = SelectionTool::new();
    model.select(&[ids[2]], SelectionMode::Replace);

    let shift = Modifiers::SHIFT;
    tool.on_pointer_down(Pos2::new(-20.0, -20.0), shift, &mut model);
    assert!(matches!(tool.state(), SelectionState::Marquee { .. }));
    tool.on_pointer_move(Pos2::new(120.0, 120.0), shift, &mut model);
    tool.on_pointer_up(Pos2::new(120.0, 120.0), shift, &mut model);

    assert_eq!(model.selection().current_selection(), vec![ids[0], ids[2]]);
    assert_eq!(model.selection().selection_mode(), SelectionMode::Add);
}

#[test]
fn test_selection_tool_click_on_empty_canvas_clears() {
    let (mut model, ids) = create_test_model();
    let mut tool = SelectionTool::new();
    model.select(&ids, SelectionMode::Replace);

    tool.on_pointer_down(Pos2::new(250.0, 200.0), Modifiers::NONE, &mut model);
    tool.on_pointer_up(Pos2::new(250.0, 200.0), Modifiers::NONE, &mut model);
    assert_eq!(model.selection().selection_count(), 0);

    // Undoing the selection change brings it back
    assert!(model.undo_selection());
    assert_eq!(model.selection().selection_count(), 3);
}

#[test]
fn test_selection_tool_click_inside_shape_bounds_selects_it() {
    let (mut model, ids) = create_test_model();
    let mut tool = SelectionTool::new();

    // Inside the rectangle, away from its outline: not a shape press
    tool.on_pointer_down(Pos2::new(50.0, 40.0), Modifiers::NONE, &mut model);
    assert!(matches!(tool.state(), SelectionState::Marquee { .. }));
    tool.on_pointer_up(Pos2::new(50.0, 40.0), Modifiers::NONE, &mut model);

    assert_eq!(model.selection().current_selection(), vec![ids[0]]);
}
