//! End-to-end editor tests driving the public API with a scripted grid.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use gridboard::{
    DashboardConfig, DashboardEditor, GridGeometry, Item, ItemControl, ItemKey, Key,
    KeyboardModifiers, Mode, Point, Rect,
};

/// Scripted grid: uniform 100x100 cells, populated explicitly.
struct ScriptedGrid {
    cols: usize,
    rows: usize,
    cells: HashMap<(usize, usize), ItemKey>,
    bounds: HashMap<ItemKey, Rect>,
}

impl ScriptedGrid {
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: HashMap::new(),
            bounds: HashMap::new(),
        }
    }

    fn place(&mut self, key: ItemKey, row: usize, col: usize) {
        self.cells.insert((row, col), key);
        self.bounds.insert(
            key,
            Rect::new(col as f32 * 100.0, row as f32 * 100.0, 100.0, 100.0),
        );
    }

    fn cell_center(row: usize, col: usize) -> Point {
        Point::new(col as f32 * 100.0 + 50.0, row as f32 * 100.0 + 50.0)
    }
}

impl GridGeometry for ScriptedGrid {
    fn column_tracks(&self) -> Vec<f32> {
        vec![100.0; self.cols]
    }

    fn row_tracks(&self) -> Vec<f32> {
        vec![100.0; self.rows]
    }

    fn item_at(&self, row: usize, col: usize) -> Option<ItemKey> {
        self.cells.get(&(row, col)).copied()
    }

    fn bounds_of(&self, key: ItemKey) -> Option<Rect> {
        self.bounds.get(&key).copied()
    }
}

fn key(raw: u64) -> ItemKey {
    ItemKey::new(raw)
}

/// `[{id:0}, {id:1}, section{id:10, items:[{id:2}, {id:3}]}]` rendered on a
/// 2x2 grid, with the section's children in the second row.
fn dashboard() -> DashboardEditor<ScriptedGrid> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut grid = ScriptedGrid::new(2, 2);
    grid.place(key(0), 0, 0);
    grid.place(key(1), 0, 1);
    grid.place(key(2), 1, 0);
    grid.place(key(3), 1, 1);

    let config = DashboardConfig::default().with_reorder_debounce(Duration::ZERO);
    let mut editor = DashboardEditor::with_config(grid, config);
    editor.set_items(vec![
        Item::new(key(0)),
        Item::new(key(1)),
        Item::section(key(10), vec![Item::new(key(2)), Item::new(key(3))]),
    ]);
    editor
}

fn root_keys(editor: &DashboardEditor<ScriptedGrid>) -> Vec<ItemKey> {
    editor.items().items().iter().map(Item::key).collect()
}

/// Records every gateway notification as a labelled entry.
fn record_all(editor: &DashboardEditor<ScriptedGrid>) -> Arc<Mutex<Vec<String>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let events = editor.events();

    let sink = log.clone();
    events.item_moved.connect(move |event| {
        sink.lock().push(format!("moved {}", event.item.key().raw()));
    });
    let sink = log.clone();
    events.item_resized.connect(move |event| {
        sink.lock().push(format!(
            "resized {} {}x{}",
            event.item.key().raw(),
            event.item.colspan(),
            event.item.rowspan()
        ));
    });
    let sink = log.clone();
    events.item_removed.connect(move |event| {
        sink.lock()
            .push(format!("removed {}", event.item.key().raw()));
    });
    let sink = log.clone();
    events.item_selected_changed.connect(move |event| {
        sink.lock()
            .push(format!("selected {} {}", event.item.key().raw(), event.value));
    });
    let sink = log.clone();
    events.item_move_mode_changed.connect(move |event| {
        sink.lock()
            .push(format!("move-mode {} {}", event.item.key().raw(), event.value));
    });
    let sink = log.clone();
    events.item_resize_mode_changed.connect(move |event| {
        sink.lock().push(format!(
            "resize-mode {} {}",
            event.item.key().raw(),
            event.value
        ));
    });
    log
}

#[test]
fn test_drag_past_trailing_edge_reorders_first_two() {
    let mut editor = dashboard();
    let log = record_all(&editor);

    editor.drag_start(key(0), ScriptedGrid::cell_center(0, 0));
    // Past item 1's center: crossing its trailing-edge midpoint.
    editor.drag_over(Point::new(160.0, 50.0));
    editor.drag_end();

    assert_eq!(root_keys(&editor), vec![key(1), key(0), key(10)]);
    assert_eq!(*log.lock(), vec!["moved 0".to_string()]);
}

#[test]
fn test_drag_without_crossing_emits_nothing() {
    let mut editor = dashboard();
    let log = record_all(&editor);

    editor.drag_start(key(0), ScriptedGrid::cell_center(0, 0));
    // Wanders within its own cell and just inside item 1's leading half.
    editor.drag_over(Point::new(80.0, 50.0));
    editor.drag_over(Point::new(120.0, 50.0));
    editor.drag_end();

    assert_eq!(root_keys(&editor), vec![key(0), key(1), key(10)]);
    assert!(log.lock().is_empty());
}

#[test]
fn test_keyboard_move_forward_matches_drag_result() {
    let mut editor = dashboard();
    let log = record_all(&editor);

    editor.focus_item(key(0));
    editor.select_item(key(0));
    editor.enter_move_mode(key(0));
    // Tab to the forward control inside the trap, then activate it.
    assert!(editor.handle_key(Key::Tab, KeyboardModifiers::NONE));
    assert!(editor.handle_key(Key::Tab, KeyboardModifiers::NONE));
    assert_eq!(editor.focused_control(), Some(ItemControl::MoveForward));
    assert!(editor.handle_key(Key::Enter, KeyboardModifiers::NONE));

    assert_eq!(root_keys(&editor), vec![key(1), key(0), key(10)]);
    assert_eq!(
        *log.lock(),
        vec![
            "selected 0 true".to_string(),
            "move-mode 0 true".to_string(),
            "moved 0".to_string(),
        ]
    );
}

#[test]
fn test_shift_arrow_down_requires_min_row_height() {
    let mut editor = dashboard();
    editor.select_item(key(0));

    // Row boundaries undefined: vertical resize is a no-op.
    editor.handle_key(Key::ArrowDown, KeyboardModifiers::SHIFT);
    assert_eq!(editor.items().get(key(0)).unwrap().rowspan(), 1);

    let config = editor.config().clone().with_min_row_height(100.0);
    editor.set_config(config);
    editor.handle_key(Key::ArrowDown, KeyboardModifiers::SHIFT);
    assert_eq!(editor.items().get(key(0)).unwrap().rowspan(), 2);
}

#[test]
fn test_escape_from_move_mode_returns_to_selected() {
    let mut editor = dashboard();
    editor.enter_move_mode(key(0));
    let log = record_all(&editor);

    assert!(editor.handle_key(Key::Escape, KeyboardModifiers::NONE));

    let state = editor.selection_state();
    assert_eq!(state.mode, Mode::Idle);
    assert_eq!(state.selected, Some(key(0)));
    assert_eq!(editor.focused_control(), Some(ItemControl::DragHandle));
    assert_eq!(*log.lock(), vec!["move-mode 0 false".to_string()]);

    // A second Escape leaves Selected.
    assert!(editor.handle_key(Key::Escape, KeyboardModifiers::NONE));
    assert_eq!(editor.selection_state().selected, None);
}

#[test]
fn test_delete_moves_focus_to_replacement_sibling() {
    let mut editor = dashboard();
    let log = record_all(&editor);

    editor.focus_item(key(0));
    assert!(editor.handle_key(Key::Delete, KeyboardModifiers::NONE));

    assert_eq!(root_keys(&editor), vec![key(1), key(10)]);
    assert_eq!(editor.selection_state().focused, Some(key(1)));
    assert_eq!(*log.lock(), vec!["removed 0".to_string()]);
}

#[test]
fn test_nested_delete_bubbles_focus_to_section() {
    let mut editor = dashboard();

    editor.focus_item(key(3));
    editor.handle_key(Key::Delete, KeyboardModifiers::NONE);
    // Sibling at index 1 is gone; index clamps to the remaining child.
    assert_eq!(editor.selection_state().focused, Some(key(2)));

    editor.handle_key(Key::Delete, KeyboardModifiers::NONE);
    assert_eq!(editor.selection_state().focused, Some(key(10)));
}

#[test]
fn test_deleting_every_item_leaves_nothing_focused() {
    let mut editor = dashboard();

    editor.focus_item(key(0));
    editor.handle_key(Key::Delete, KeyboardModifiers::NONE);
    assert_eq!(editor.selection_state().focused, Some(key(1)));

    editor.handle_key(Key::Delete, KeyboardModifiers::NONE);
    assert_eq!(editor.selection_state().focused, Some(key(10)));

    // Deleting the section takes its children with it; the board is empty
    // and there is no replacement to land on.
    editor.handle_key(Key::Delete, KeyboardModifiers::NONE);
    assert!(editor.items().is_empty());
    assert_eq!(editor.selection_state().focused, None);
}

#[test]
fn test_pointer_resize_emits_per_step() {
    let mut editor = dashboard();
    let log = record_all(&editor);

    editor.resize_start(key(0), Point::new(100.0, 50.0));
    editor.resize_update(Point::new(170.0, 50.0));
    editor.resize_end();

    assert_eq!(editor.items().get(key(0)).unwrap().colspan(), 2);
    assert_eq!(*log.lock(), vec!["resized 0 2x1".to_string()]);
}

#[test]
fn test_colspan_growth_clamped_to_grid() {
    let mut editor = dashboard();
    editor.select_item(key(1));
    for _ in 0..4 {
        editor.handle_key(Key::ArrowRight, KeyboardModifiers::SHIFT);
    }
    // Two visible columns on the scripted grid.
    assert_eq!(editor.items().get(key(1)).unwrap().colspan(), 2);
}

#[test]
fn test_host_replacement_rederives_focus_by_key() {
    let mut editor = dashboard();
    editor.focus_item(key(1));

    // Host reorders the list; the focused key survives and keeps focus.
    editor.set_items(vec![
        Item::new(key(1)),
        Item::new(key(0)),
        Item::section(key(10), vec![Item::new(key(2))]),
    ]);
    assert_eq!(editor.selection_state().focused, Some(key(1)));

    // Now the host drops it; focus falls back positionally.
    editor.set_items(vec![Item::new(key(0)), Item::new(key(4))]);
    assert_eq!(editor.selection_state().focused, Some(key(0)));
}

#[test]
fn test_disable_editing_clears_selection_synchronously() {
    let mut editor = dashboard();
    editor.enter_move_mode(key(0));
    let log = record_all(&editor);

    editor.set_editable(false);

    assert_eq!(editor.selection_state().selected, None);
    assert_eq!(editor.selection_state().mode, Mode::Idle);
    assert_eq!(
        *log.lock(),
        vec!["move-mode 0 false".to_string(), "selected 0 false".to_string()]
    );

    // Interactions are inert while disabled.
    editor.drag_start(key(0), ScriptedGrid::cell_center(0, 0));
    editor.drag_over(Point::new(160.0, 50.0));
    editor.drag_end();
    assert_eq!(root_keys(&editor), vec![key(0), key(1), key(10)]);
}

#[test]
fn test_leaf_dragged_across_section_boundary() {
    let mut editor = dashboard();

    editor.drag_start(key(0), ScriptedGrid::cell_center(0, 0));
    // Down past nested item 2's row midpoint: joins the section at 2's slot.
    editor.drag_over(Point::new(50.0, 170.0));
    editor.drag_end();

    assert_eq!(editor.items().section_of(key(0)), Some(key(10)));
    assert_eq!(editor.items().len(), 2);
}
