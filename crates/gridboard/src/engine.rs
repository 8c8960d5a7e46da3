//! The editor facade.
//!
//! [`DashboardEditor`] composes the item tree, the grid geometry adapter, the
//! reorder and resize engines, the selection state machine, and the event
//! gateway behind one narrow surface. The host feeds it pointer and keyboard
//! events plus item-list replacements; the editor answers with signals whose
//! payloads carry complete new trees. All transitions happen synchronously
//! inside the triggering call.
//!
//! Lookup failures (an interaction referencing an item the host has since
//! removed) are absorbed as no-ops with a warning, never surfaced as errors:
//! pointer interaction races host-driven list replacement by design.

use std::time::Instant;

use gridboard_core::logging::targets;

use crate::config::DashboardConfig;
use crate::events::EventGateway;
use crate::focus::{derive_focus_after_change, ItemControl};
use crate::geometry::{GridGeometry, Point, TextDirection};
use crate::keyboard::{Key, KeyboardModifiers, Mode, SelectionController, SelectionState, Transition};
use crate::model::{Item, ItemKey, ItemTree, MoveTarget};
use crate::reorder::ReorderEngine;
use crate::resize::ResizeEngine;

/// The interactive layout editor.
///
/// `G` is the host's rendered-grid adapter; tests inject a scripted fake.
///
/// # Example
///
/// ```ignore
/// let mut editor = DashboardEditor::new(grid);
/// editor.set_items(vec![Item::new(ItemKey::new(0))]);
/// editor.events().item_moved.connect(|event| { /* commit event.tree */ });
/// editor.drag_start(ItemKey::new(0), Point::new(50.0, 50.0));
/// ```
pub struct DashboardEditor<G: GridGeometry> {
    grid: G,
    tree: ItemTree,
    config: DashboardConfig,
    editable: bool,
    selection: SelectionController,
    reorder: ReorderEngine,
    resize: ResizeEngine,
    gateway: EventGateway,
    /// Tree snapshot at drag start, restored on native drag cancel.
    drag_origin: Option<ItemTree>,
}

impl<G: GridGeometry> DashboardEditor<G> {
    /// Creates an editor over a grid adapter with default configuration.
    pub fn new(grid: G) -> Self {
        Self::with_config(grid, DashboardConfig::default())
    }

    /// Creates an editor with an explicit configuration.
    pub fn with_config(grid: G, config: DashboardConfig) -> Self {
        Self {
            grid,
            tree: ItemTree::default(),
            config,
            editable: true,
            selection: SelectionController::new(),
            reorder: ReorderEngine::new(),
            resize: ResizeEngine::new(),
            gateway: EventGateway::new(),
            drag_origin: None,
        }
    }

    /// The current item tree.
    pub fn items(&self) -> &ItemTree {
        &self.tree
    }

    /// The event gateway; hosts connect slots here.
    pub fn events(&self) -> &EventGateway {
        &self.gateway
    }

    /// The grid geometry adapter.
    pub fn grid(&self) -> &G {
        &self.grid
    }

    /// Mutable access to the grid adapter, for hosts that push layout state.
    pub fn grid_mut(&mut self) -> &mut G {
        &mut self.grid
    }

    /// The active configuration.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: DashboardConfig) {
        self.config = config;
    }

    /// Whether editing interactions are enabled.
    pub fn editable(&self) -> bool {
        self.editable
    }

    /// Snapshot of the focus/selection/mode state.
    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    /// The control holding focus within the focused item, if any.
    pub fn focused_control(&self) -> Option<ItemControl> {
        self.selection.focused_control()
    }

    /// Enables or disables editing.
    ///
    /// Disabling force-clears focus, selection, and any active mode
    /// synchronously, and discards in-flight pointer sessions.
    pub fn set_editable(&mut self, editable: bool) {
        if self.editable == editable {
            return;
        }
        self.editable = editable;
        if !editable {
            tracing::debug!(target: targets::ENGINE, "editing disabled, clearing interaction state");
            self.reorder.cancel();
            self.resize.cancel();
            self.drag_origin = None;
            let transitions = self.selection.blur();
            self.emit_transitions(&transitions, &self.tree);
        }
    }

    /// Replaces the item tree (host-driven).
    ///
    /// Selection on a vanished item is cleared with the usual notifications;
    /// focus is re-derived by key match first, positional fallback second.
    /// In-flight pointer sessions on vanished items are discarded.
    pub fn set_items(&mut self, items: Vec<Item>) {
        let old_tree = std::mem::replace(&mut self.tree, ItemTree::new(items));
        self.invalidate_vanished_sessions();

        if let Some(selected) = self.selection.selected() {
            if self.tree.locate(selected).is_none() {
                let transitions = self.selection.clear_selection();
                self.emit_transitions(&transitions, &old_tree);
            }
        }
        if let Some(focused) = self.selection.focused() {
            let target = derive_focus_after_change(focused, old_tree.locate(focused), &self.tree);
            self.selection.set_focus_target(target);
        }
    }

    // Pointer reorder path

    /// Begins a drag from an item's drag handle.
    pub fn drag_start(&mut self, key: ItemKey, at: Point) {
        self.drag_start_at(key, at, Instant::now());
    }

    /// Begins a drag with an explicit clock, for deterministic hosts.
    pub fn drag_start_at(&mut self, key: ItemKey, at: Point, now: Instant) {
        if !self.editable || self.tree.locate(key).is_none() {
            return;
        }
        if !self.reorder.start(key, at) {
            return;
        }
        self.drag_origin = Some(self.tree.clone());
        // Baseline dragover so the first real event has a comparison point.
        self.drag_over_at(at, now);
    }

    /// Feeds a dragover pointer position.
    pub fn drag_over(&mut self, pos: Point) {
        self.drag_over_at(pos, Instant::now());
    }

    /// Feeds a dragover with an explicit clock.
    pub fn drag_over_at(&mut self, pos: Point, now: Instant) {
        let Some(session) = self.reorder.session() else {
            return;
        };
        let dragged = session.dragged();
        if self.tree.locate(dragged).is_none() {
            // The host removed the item or replaced the list under the drag.
            tracing::warn!(
                target: targets::ENGINE,
                item = dragged.raw(),
                "dragged item vanished from the tree, cancelling drag"
            );
            self.reorder.cancel();
            self.drag_origin = None;
            return;
        }

        let proposal = self.reorder.drag_over(
            pos,
            &self.grid,
            &self.tree,
            self.config.text_direction,
            self.config.spacing,
            now,
        );
        let Some(target) = proposal else {
            return;
        };
        let Some((dest, index)) = self.move_destination(dragged, target) else {
            return;
        };
        match self.tree.with_moved(dragged, dest, index) {
            Ok(new_tree) => {
                if new_tree != self.tree {
                    self.tree = new_tree;
                    self.reorder.note_moved(self.config.reorder_debounce, now);
                }
            }
            Err(error) => {
                tracing::warn!(target: targets::ENGINE, %error, "dragover move rejected");
            }
        }
    }

    /// Ends the drag. Emits `item-moved` exactly once if any reorder was
    /// committed during the session.
    pub fn drag_end(&mut self) {
        self.drag_origin = None;
        let Some((dragged, moved)) = self.reorder.end() else {
            return;
        };
        if !moved {
            return;
        }
        if let Some(item) = self.tree.get(dragged).cloned() {
            let section = self.tree.section_of(dragged);
            self.gateway.notify_moved(item, self.tree.clone(), section);
        }
    }

    /// Native drag cancel: discards the session and restores the tree as it
    /// was at drag start, committing nothing.
    pub fn drag_cancel(&mut self) {
        if self.reorder.end().is_some() {
            if let Some(origin) = self.drag_origin.take() {
                self.tree = origin;
            }
        }
        self.drag_origin = None;
    }

    // Pointer resize path

    /// Begins a resize from an item's resize handle.
    pub fn resize_start(&mut self, key: ItemKey, at: Point) {
        if !self.editable || self.tree.locate(key).is_none() {
            return;
        }
        self.resize.start(key, at);
    }

    /// Feeds a resize pointer position, committing span steps as thresholds
    /// are crossed. Emits `item-resized` per actual span change.
    pub fn resize_update(&mut self, pos: Point) {
        let Some(key) = self.resize.active() else {
            return;
        };
        let col_width = self.grid.column_tracks().first().copied().unwrap_or(0.0);
        let row_height = self.config.min_row_height;
        let steps = self
            .resize
            .update(pos, col_width, row_height, self.config.text_direction);
        if !steps.is_zero() {
            self.apply_resize(key, steps.colspan, steps.rowspan);
        }
    }

    /// Ends the resize session. Changes were already committed per step.
    pub fn resize_end(&mut self) {
        self.resize.end();
    }

    /// Discards the resize session.
    pub fn resize_cancel(&mut self) {
        self.resize.cancel();
    }

    // Focus and selection entry points

    /// Moves keyboard focus to an item (host Tab order or click).
    pub fn focus_item(&mut self, key: ItemKey) {
        if self.tree.locate(key).is_none() {
            return;
        }
        let transitions = self.selection.focus(key);
        self.emit_transitions(&transitions, &self.tree);
    }

    /// Focus left the dashboard: force-exits any mode and clears selection.
    pub fn blur(&mut self) {
        let transitions = self.selection.blur();
        self.emit_transitions(&transitions, &self.tree);
    }

    /// Selects an item.
    pub fn select_item(&mut self, key: ItemKey) {
        if !self.editable || self.tree.locate(key).is_none() {
            return;
        }
        let transitions = self.selection.select(key);
        self.emit_transitions(&transitions, &self.tree);
    }

    /// Clears the selection, exiting any active mode first.
    pub fn deselect(&mut self) {
        let transitions = self.selection.clear_selection();
        self.emit_transitions(&transitions, &self.tree);
    }

    /// Enters move mode on an item (selection implied).
    pub fn enter_move_mode(&mut self, key: ItemKey) {
        if !self.editable || self.tree.locate(key).is_none() {
            return;
        }
        let transitions = self.selection.enter_move_mode(key);
        self.emit_transitions(&transitions, &self.tree);
    }

    /// Enters resize mode on an item (selection implied).
    pub fn enter_resize_mode(&mut self, key: ItemKey) {
        if !self.editable || self.tree.locate(key).is_none() {
            return;
        }
        let vertical = self.config.vertical_resize_enabled();
        let transitions = self.selection.enter_resize_mode(key, vertical);
        self.emit_transitions(&transitions, &self.tree);
    }

    /// Removes an item (user-initiated delete), with focus restoration.
    pub fn remove_item(&mut self, key: ItemKey) {
        if !self.editable {
            return;
        }
        let Some(old_path) = self.tree.locate(key) else {
            return;
        };
        let Some(item) = self.tree.get(key).cloned() else {
            return;
        };
        let section = self.tree.section_of(key);
        let new_tree = match self.tree.with_removed(key) {
            Ok(tree) => tree,
            Err(error) => {
                tracing::warn!(target: targets::ENGINE, %error, "remove rejected");
                return;
            }
        };
        let old_tree = std::mem::replace(&mut self.tree, new_tree);
        self.invalidate_vanished_sessions();

        if self.selection.selected() == Some(key) {
            let transitions = self.selection.clear_selection();
            self.emit_transitions(&transitions, &old_tree);
        }
        if self.selection.focused() == Some(key) {
            let target = derive_focus_after_change(key, Some(old_path), &self.tree);
            self.selection.set_focus_target(target);
        }
        self.gateway.notify_removed(item, self.tree.clone(), section);
    }

    // Keyboard path

    /// Handles a key press. Returns `true` when the event was consumed.
    pub fn handle_key(&mut self, key: Key, modifiers: KeyboardModifiers) -> bool {
        if !self.editable {
            return false;
        }
        match self.selection.mode() {
            Mode::Moving => self.handle_key_moving(key, modifiers),
            Mode::Resizing => self.handle_key_resizing(key, modifiers),
            Mode::Idle => self.handle_key_idle(key, modifiers),
        }
    }

    fn handle_key_moving(&mut self, key: Key, modifiers: KeyboardModifiers) -> bool {
        match key {
            Key::Escape => {
                let transitions = self.selection.exit_mode();
                self.emit_transitions(&transitions, &self.tree);
                true
            }
            Key::Tab => {
                self.selection.cycle_trap(!modifiers.shift);
                true
            }
            Key::Enter | Key::Space => match self.selection.focused_control() {
                Some(ItemControl::MoveApply) => {
                    let transitions = self.selection.exit_mode();
                    self.emit_transitions(&transitions, &self.tree);
                    true
                }
                Some(ItemControl::MoveBackward) => {
                    self.keyboard_move(false);
                    true
                }
                Some(ItemControl::MoveForward) => {
                    self.keyboard_move(true);
                    true
                }
                _ => true,
            },
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight => {
                if let Some(forward) = move_direction(key, self.config.text_direction) {
                    self.keyboard_move(forward);
                }
                true
            }
            _ => false,
        }
    }

    fn handle_key_resizing(&mut self, key: Key, modifiers: KeyboardModifiers) -> bool {
        let Some(item) = self.selection.selected() else {
            return false;
        };
        match key {
            Key::Escape => {
                let transitions = self.selection.exit_mode();
                self.emit_transitions(&transitions, &self.tree);
                true
            }
            Key::Tab => {
                self.selection.cycle_trap(!modifiers.shift);
                true
            }
            Key::Enter | Key::Space => {
                match self.selection.focused_control() {
                    Some(ItemControl::ResizeApply) => {
                        let transitions = self.selection.exit_mode();
                        self.emit_transitions(&transitions, &self.tree);
                    }
                    Some(ItemControl::ResizeShrinkWidth) => {
                        self.apply_resize(item, -1, 0);
                    }
                    Some(ItemControl::ResizeGrowWidth) => {
                        self.apply_resize(item, 1, 0);
                    }
                    Some(ItemControl::ResizeShrinkHeight) => {
                        self.apply_resize(item, 0, -1);
                    }
                    Some(ItemControl::ResizeGrowHeight) => {
                        self.apply_resize(item, 0, 1);
                    }
                    _ => {}
                }
                true
            }
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight => {
                let col = resize_col_delta(key, self.config.text_direction);
                let row = resize_row_delta(key);
                self.apply_resize(item, col, row);
                true
            }
            _ => false,
        }
    }

    fn handle_key_idle(&mut self, key: Key, modifiers: KeyboardModifiers) -> bool {
        let Some(focused) = self.selection.focused() else {
            return false;
        };
        match key {
            Key::Enter | Key::Space => {
                match self.selection.focused_control() {
                    Some(ItemControl::DragHandle) => self.enter_move_mode(focused),
                    Some(ItemControl::ResizeHandle) => self.enter_resize_mode(focused),
                    Some(ItemControl::Remove) => self.remove_item(focused),
                    _ => {
                        if self.selection.selected() == Some(focused) {
                            self.deselect();
                        } else {
                            self.select_item(focused);
                        }
                    }
                }
                true
            }
            Key::Escape => {
                if self.selection.selected().is_some() {
                    let transitions = self.selection.escape();
                    self.emit_transitions(&transitions, &self.tree);
                    true
                } else {
                    false
                }
            }
            Key::Delete | Key::Backspace => {
                self.remove_item(focused);
                true
            }
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight => {
                // Shift+arrow resizes the selected item without entering
                // resize mode.
                if modifiers.shift && self.selection.selected() == Some(focused) {
                    let col = resize_col_delta(key, self.config.text_direction);
                    let row = resize_row_delta(key);
                    self.apply_resize(focused, col, row);
                    true
                } else {
                    false
                }
            }
            Key::Tab => false,
        }
    }

    /// Moves the selected item one slot within its own sequence, emitting
    /// `item-moved` once per committed step.
    fn keyboard_move(&mut self, forward: bool) {
        let Some(key) = self.selection.selected() else {
            return;
        };
        let Some(path) = self.tree.locate(key) else {
            return;
        };
        let (target, index, len) = match path.child_index {
            Some(child_index) => {
                let section = self.tree.items()[path.root_index].key();
                let len = self
                    .tree
                    .items()[path.root_index]
                    .children()
                    .map_or(0, <[Item]>::len);
                (MoveTarget::Section(section), child_index, len)
            }
            None => (MoveTarget::Root, path.root_index, self.tree.len()),
        };

        // The neighbor's pre-extraction index lands the item past it.
        let neighbor = if forward {
            if index + 1 >= len {
                return;
            }
            index + 1
        } else {
            let Some(previous) = index.checked_sub(1) else {
                return;
            };
            previous
        };

        match self.tree.with_moved(key, target, neighbor) {
            Ok(new_tree) => {
                if new_tree == self.tree {
                    return;
                }
                self.tree = new_tree;
                if let Some(item) = self.tree.get(key).cloned() {
                    let section = self.tree.section_of(key);
                    self.gateway.notify_moved(item, self.tree.clone(), section);
                }
            }
            Err(error) => {
                tracing::warn!(target: targets::ENGINE, %error, "keyboard move rejected");
            }
        }
    }

    /// Applies clamped span deltas and emits `item-resized` if anything
    /// actually changed.
    fn apply_resize(&mut self, key: ItemKey, colspan_delta: i32, rowspan_delta: i32) {
        let Some(item) = self.tree.get(key) else {
            return;
        };

        let current_colspan = item.colspan();
        let mut max_columns = self.grid.column_count() as u32;
        if let Some(limit) = self.config.max_column_count {
            let limit = limit as u32;
            max_columns = if max_columns == 0 { limit } else { max_columns.min(limit) };
        }
        let mut desired_colspan = current_colspan
            .saturating_add_signed(colspan_delta)
            .max(1);
        if max_columns > 0 {
            desired_colspan = desired_colspan.min(max_columns);
        }
        let colspan_delta = desired_colspan as i32 - current_colspan as i32;

        let rowspan_delta = if self.config.vertical_resize_enabled() {
            let current = item.rowspan();
            let desired = current.saturating_add_signed(rowspan_delta).max(1);
            desired as i32 - current as i32
        } else {
            0
        };

        if colspan_delta == 0 && rowspan_delta == 0 {
            return;
        }
        match self.tree.with_span_changed(key, colspan_delta, rowspan_delta) {
            Ok(new_tree) => {
                self.tree = new_tree;
                if let Some(item) = self.tree.get(key).cloned() {
                    let section = self.tree.section_of(key);
                    self.gateway.notify_resized(item, self.tree.clone(), section);
                }
            }
            Err(error) => {
                tracing::warn!(target: targets::ENGINE, %error, "resize rejected");
            }
        }
    }

    /// Maps a dragover target to the destination sequence and index.
    ///
    /// A leaf dragged onto a nested item joins that section at the target's
    /// index. A leaf dragged onto a section item lands at the root adjacent
    /// to the section, never inside it. A dragged section always stays at the
    /// root; nested targets retarget to their enclosing section's root slot.
    fn move_destination(&self, dragged: ItemKey, target: ItemKey) -> Option<(MoveTarget, usize)> {
        let target_path = self.tree.locate(target)?;
        let dragged_is_section = self.tree.get(dragged)?.is_section();
        let target_is_section = self.tree.at_path(target_path)?.is_section();

        if dragged_is_section || target_is_section {
            return Some((MoveTarget::Root, target_path.root_index));
        }
        match target_path.child_index {
            Some(child_index) => {
                let section = self.tree.items().get(target_path.root_index)?.key();
                Some((MoveTarget::Section(section), child_index))
            }
            None => Some((MoveTarget::Root, target_path.root_index)),
        }
    }

    /// Discards in-flight pointer sessions whose item is no longer in the
    /// tree. Removing a section takes its children with it, so membership is
    /// checked with `locate` rather than key equality.
    fn invalidate_vanished_sessions(&mut self) {
        let dragged = self.reorder.session().map(|session| session.dragged());
        if let Some(dragged) = dragged {
            if self.tree.locate(dragged).is_none() {
                self.reorder.cancel();
                self.drag_origin = None;
            }
        }
        if let Some(active) = self.resize.active() {
            if self.tree.locate(active).is_none() {
                self.resize.cancel();
            }
        }
    }

    /// Resolves transitions against a tree and forwards them to the gateway.
    ///
    /// `tree` is the tree the affected items can still be found in; for
    /// vanished items that is the pre-mutation tree.
    fn emit_transitions(&self, transitions: &[Transition], tree: &ItemTree) {
        for transition in transitions {
            match *transition {
                Transition::SelectedChanged { item, value } => {
                    if let Some(item) = tree.get(item).cloned() {
                        self.gateway.notify_selected_changed(item, value);
                    }
                }
                Transition::MoveModeChanged { item, value } => {
                    if let Some(item) = tree.get(item).cloned() {
                        self.gateway.notify_move_mode_changed(item, value);
                    }
                }
                Transition::ResizeModeChanged { item, value } => {
                    if let Some(item) = tree.get(item).cloned() {
                        self.gateway.notify_resize_mode_changed(item, value);
                    }
                }
            }
        }
    }
}

/// Maps an arrow key to forward/backward within the item's own sequence,
/// mirroring left/right under RTL.
fn move_direction(key: Key, direction: TextDirection) -> Option<bool> {
    match key {
        Key::ArrowDown => Some(true),
        Key::ArrowUp => Some(false),
        Key::ArrowRight => Some(direction == TextDirection::Ltr),
        Key::ArrowLeft => Some(direction == TextDirection::Rtl),
        _ => None,
    }
}

/// Column-span delta for an arrow key: growing is toward the reading end.
fn resize_col_delta(key: Key, direction: TextDirection) -> i32 {
    match (key, direction) {
        (Key::ArrowRight, TextDirection::Ltr) | (Key::ArrowLeft, TextDirection::Rtl) => 1,
        (Key::ArrowLeft, TextDirection::Ltr) | (Key::ArrowRight, TextDirection::Rtl) => -1,
        _ => 0,
    }
}

/// Row-span delta for an arrow key.
fn resize_row_delta(key: Key) -> i32 {
    match key {
        Key::ArrowDown => 1,
        Key::ArrowUp => -1,
        _ => 0,
    }
}
