use std::sync::mpsc;

use hexlevel::editor::*;
use hexlevel::hex::{grid_to_world, HexMetrics, OffsetCoordinate, WorldPosition};
use hexlevel::level::*;

fn at(col: i32, row: i32) -> WorldPosition {
    grid_to_world(col, row, &HexMetrics::default())
}

fn session(width: i32, height: i32) -> (mpsc::Sender<AssetPath>, LevelEditor) {
    let (tx, rx) = mpsc::channel();
    let model = LevelGridModel::new(width, height).unwrap();
    (tx, LevelEditor::new(model, HexMetrics::default(), rx))
}

/// Reopen the session's board with a tile offset on `(col, row)`.
fn with_offset(editor: LevelEditor, col: i32, row: i32, dx: f32, dz: f32) -> (mpsc::Sender<AssetPath>, LevelEditor) {
    let mode = editor.mode();
    let mut model = editor.into_model();
    model.set_offset(col, row, dx, dz).unwrap();
    let (tx, rx) = mpsc::channel();
    let mut editor = LevelEditor::new(model, HexMetrics::default(), rx);
    editor.set_mode(mode);
    (tx, editor)
}

/// Paint `asset` at `(col, row)` and register the spawned object as `id`.
fn paint(editor: &mut LevelEditor, col: i32, row: i32, id: u64) -> EditOutcome {
    let outcome = editor.handle_pointer(at(col, row), PointerButton::Primary).unwrap();
    if let EditOutcome::Spawn { col, row, asset, .. } = &outcome {
        editor.place(*col, *row, PieceRef::new(PieceHandle(id), asset.clone())).unwrap();
    }
    outcome
}

// ── Modes ─────────────────────────────────────────────────────────────────────

#[test]
fn mode_cursor_and_overlay() {
    assert_eq!(EditMode::View.cursor(), ToolCursor::Pan);
    for mode in [EditMode::Paint, EditMode::Edit, EditMode::Erase, EditMode::WalkArea] {
        assert_eq!(mode.cursor(), ToolCursor::None);
    }
    assert!(EditMode::WalkArea.shows_walk_area());
    assert!(!EditMode::Paint.shows_walk_area());
    assert_eq!(EditMode::ALL.len(), 5);
}

#[test]
fn every_mode_reachable_and_reselect_is_noop() {
    let (_tx, mut editor) = session(2, 2);
    assert_eq!(editor.mode(), EditMode::View);
    assert!(!editor.set_mode(EditMode::View));
    for from in EditMode::ALL {
        for to in EditMode::ALL {
            editor.set_mode(from);
            assert_eq!(editor.set_mode(to), from != to);
            assert_eq!(editor.mode(), to);
        }
    }
}

#[test]
fn view_mode_ignores_presses() {
    let (_tx, mut editor) = session(2, 2);
    let outcome = editor.handle_pointer(at(0, 0), PointerButton::Primary).unwrap();
    assert_eq!(outcome, EditOutcome::Ignored);
}

#[test]
fn presses_off_the_board_are_ignored() {
    let (_tx, mut editor) = session(2, 2);
    editor.set_mode(EditMode::WalkArea);
    let outcome = editor.handle_pointer(at(5, 5), PointerButton::Primary).unwrap();
    assert_eq!(outcome, EditOutcome::Ignored);
    assert!(editor.model().walk_area().iter().all(|&w| w == 0));
}

// ── Paint / erase ─────────────────────────────────────────────────────────────

#[test]
fn paint_needs_a_palette_selection() {
    let (tx, mut editor) = session(3, 2);
    editor.set_mode(EditMode::Paint);
    assert_eq!(paint(&mut editor, 1, 0, 1), EditOutcome::Ignored);

    tx.send(AssetPath::new("Grass", "Tuft")).unwrap();
    tx.send(AssetPath::new("Stone", "Rock1")).unwrap();
    let outcome = paint(&mut editor, 1, 0, 1);
    assert_eq!(
        outcome,
        EditOutcome::Spawn {
            col: 1,
            row: 0,
            asset: AssetPath::new("Stone", "Rock1"),
            position: at(1, 0),
            replaced: None,
        }
    );
    assert_eq!(editor.model().get_piece(1, 0).unwrap().map(|p| p.handle), Some(PieceHandle(1)));
    assert_eq!(editor.selection(), Some(&AssetPath::new("Stone", "Rock1")));
}

#[test]
fn painting_over_a_piece_hands_back_the_old_one() {
    let (tx, mut editor) = session(3, 2);
    editor.set_mode(EditMode::Paint);
    tx.send(AssetPath::new("Stone", "Rock1")).unwrap();
    paint(&mut editor, 2, 1, 1);

    match paint(&mut editor, 2, 1, 2) {
        EditOutcome::Spawn { replaced: Some(old), .. } => assert_eq!(old.handle, PieceHandle(1)),
        other => panic!("expected a replacing spawn, got {other:?}"),
    }
    assert_eq!(editor.model().get_piece(2, 1).unwrap().map(|p| p.handle), Some(PieceHandle(2)));
}

#[test]
fn selection_survives_a_closed_palette() {
    let (tx, mut editor) = session(2, 2);
    tx.send(AssetPath::new("Stone", "Rock1")).unwrap();
    drop(tx);
    editor.set_mode(EditMode::Paint);
    assert!(matches!(paint(&mut editor, 0, 0, 1), EditOutcome::Spawn { .. }));
    assert!(matches!(paint(&mut editor, 1, 1, 2), EditOutcome::Spawn { .. }));
}

#[test]
fn erase_despawns() {
    let (tx, mut editor) = session(2, 2);
    tx.send(AssetPath::new("Stone", "Rock1")).unwrap();
    editor.set_mode(EditMode::Paint);
    paint(&mut editor, 0, 1, 4);

    editor.set_mode(EditMode::Erase);
    match editor.handle_pointer(at(0, 1), PointerButton::Primary).unwrap() {
        EditOutcome::Despawn { col: 0, row: 1, piece } => assert_eq!(piece.handle, PieceHandle(4)),
        other => panic!("expected despawn, got {other:?}"),
    }
    assert_eq!(editor.handle_pointer(at(0, 1), PointerButton::Primary).unwrap(), EditOutcome::Ignored);
}

// ── Walk area ─────────────────────────────────────────────────────────────────

#[test]
fn walk_area_primary_marks_secondary_clears() {
    let (_tx, mut editor) = session(3, 2);
    editor.set_mode(EditMode::WalkArea);

    let outcome = editor.handle_pointer(at(2, 1), PointerButton::Primary).unwrap();
    assert_eq!(outcome, EditOutcome::WalkableChanged { col: 2, row: 1, walkable: true });
    assert!(editor.model().is_walkable(2, 1).unwrap());

    editor.handle_pointer(at(2, 1), PointerButton::Secondary).unwrap();
    assert!(!editor.model().is_walkable(2, 1).unwrap());
}

// ── Edit ──────────────────────────────────────────────────────────────────────

#[test]
fn edit_moves_piece_with_its_offset() {
    let (tx, mut editor) = session(3, 3);
    tx.send(AssetPath::new("Stone", "Rock1")).unwrap();
    editor.set_mode(EditMode::Paint);
    paint(&mut editor, 0, 0, 7);

    let mut model = editor.into_model();
    model.set_offset(0, 0, 0.25, 0.0).unwrap();
    let (_tx, rx) = mpsc::channel();
    let mut editor = LevelEditor::new(model, HexMetrics::default(), rx);
    editor.set_mode(EditMode::Edit);

    let picked = editor.handle_pointer(at(0, 0), PointerButton::Primary).unwrap();
    assert_eq!(picked, EditOutcome::PickedUp { col: 0, row: 0, handle: PieceHandle(7) });
    assert_eq!(editor.held(), Some(OffsetCoordinate::new(0, 0)));

    let moved = editor.handle_pointer(at(2, 1), PointerButton::Primary).unwrap();
    let target = at(2, 1);
    assert_eq!(
        moved,
        EditOutcome::Moved {
            from: OffsetCoordinate::new(0, 0),
            to: OffsetCoordinate::new(2, 1),
            handle: PieceHandle(7),
            position: WorldPosition::new(target.x + 0.25, target.z),
        }
    );
    assert_eq!(editor.held(), None);
    assert_eq!(editor.model().get_piece(0, 0).unwrap(), None);
    assert_eq!(editor.model().get_offset(0, 0).unwrap(), None);
    assert_eq!(editor.model().get_offset(2, 1).unwrap(), Some(TileOffset::new(0.25, 0.0)));
}

#[test]
fn edit_refuses_occupied_target_and_secondary_releases() {
    let (tx, mut editor) = session(3, 3);
    tx.send(AssetPath::new("Stone", "Rock1")).unwrap();
    editor.set_mode(EditMode::Paint);
    paint(&mut editor, 0, 0, 1);
    paint(&mut editor, 1, 0, 2);

    editor.set_mode(EditMode::Edit);
    assert_eq!(editor.handle_pointer(at(2, 2), PointerButton::Primary).unwrap(), EditOutcome::Ignored);
    editor.handle_pointer(at(0, 0), PointerButton::Primary).unwrap();
    assert_eq!(editor.handle_pointer(at(1, 0), PointerButton::Primary).unwrap(), EditOutcome::Ignored);
    assert_eq!(editor.held(), Some(OffsetCoordinate::new(0, 0)));

    let released = editor.handle_pointer(at(2, 2), PointerButton::Secondary).unwrap();
    assert_eq!(released, EditOutcome::Released { handle: PieceHandle(1) });
    assert_eq!(editor.held(), None);
}

#[test]
fn leaving_edit_mode_drops_the_held_piece() {
    let (tx, mut editor) = session(2, 2);
    tx.send(AssetPath::new("Stone", "Rock1")).unwrap();
    editor.set_mode(EditMode::Paint);
    paint(&mut editor, 1, 1, 1);
    editor.set_mode(EditMode::Edit);
    editor.handle_pointer(at(1, 1), PointerButton::Primary).unwrap();
    assert!(editor.held().is_some());

    editor.set_mode(EditMode::View);
    assert_eq!(editor.held(), None);
    assert!(editor.model().get_piece(1, 1).unwrap().is_some());
}

#[test]
fn resize_through_editor_reports_drops() {
    let (tx, mut editor) = session(3, 3);
    tx.send(AssetPath::new("Stone", "Rock1")).unwrap();
    editor.set_mode(EditMode::Paint);
    paint(&mut editor, 2, 2, 1);
    editor.set_mode(EditMode::Edit);
    editor.handle_pointer(at(2, 2), PointerButton::Primary).unwrap();

    let dropped = editor.resize(2, 2).unwrap();
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].piece.handle, PieceHandle(1));
    assert_eq!(editor.held(), None);
}

// ── Tile offsets ──────────────────────────────────────────────────────────────

#[test]
fn erase_clears_the_tile_offset() {
    let (tx, mut editor) = session(2, 2);
    tx.send(AssetPath::new("Stone", "Rock1")).unwrap();
    editor.set_mode(EditMode::Paint);
    paint(&mut editor, 1, 0, 1);
    let (_tx, mut editor) = with_offset(editor, 1, 0, 0.3, 0.1);

    editor.set_mode(EditMode::Erase);
    assert!(matches!(
        editor.handle_pointer(at(1, 0), PointerButton::Primary).unwrap(),
        EditOutcome::Despawn { .. }
    ));
    assert_eq!(editor.model().get_offset(1, 0).unwrap(), None);
}

#[test]
fn paint_starts_on_the_cell_centre() {
    let (_tx, editor) = session(2, 2);
    let (tx, mut editor) = with_offset(editor, 0, 1, 0.4, -0.2);
    tx.send(AssetPath::new("Grass", "Tuft")).unwrap();
    editor.set_mode(EditMode::Paint);

    match paint(&mut editor, 0, 1, 5) {
        EditOutcome::Spawn { position, .. } => assert_eq!(position, at(0, 1)),
        other => panic!("expected spawn, got {other:?}"),
    }
    assert_eq!(editor.model().get_offset(0, 1).unwrap(), None);
}

#[test]
fn move_overwrites_target_offset() {
    let (tx, mut editor) = session(3, 1);
    tx.send(AssetPath::new("Stone", "Rock1")).unwrap();
    editor.set_mode(EditMode::Paint);
    paint(&mut editor, 0, 0, 1);
    // Stale nudge on an empty cell.
    let (_tx, mut editor) = with_offset(editor, 2, 0, 0.5, 0.5);

    editor.set_mode(EditMode::Edit);
    editor.handle_pointer(at(0, 0), PointerButton::Primary).unwrap();
    let moved = editor.handle_pointer(at(2, 0), PointerButton::Primary).unwrap();
    match moved {
        EditOutcome::Moved { position, .. } => assert_eq!(position, at(2, 0)),
        other => panic!("expected move, got {other:?}"),
    }
    assert_eq!(editor.model().get_offset(2, 0).unwrap(), None);
}
