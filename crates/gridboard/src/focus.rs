//! Focus management: mode focus traps and post-mutation focus restoration.
//!
//! While an item is in move or resize mode, keyboard focus is trapped inside
//! that item's mode-specific controls; Tab cycles only among them and never
//! escapes to sibling items. The trap is an explicit finite list of controls
//! with programmatic advance, not a tab-order side effect.
//!
//! When the focused item disappears (user delete, or the host replacing the
//! whole list), a replacement focus target is re-derived: the sibling now at
//! the same index, else the previous sibling, else the enclosing section,
//! else nothing.

use crate::model::{Item, ItemKey, ItemPath, ItemTree};

/// A focusable control in an item's chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemControl {
    /// The item's primary (select/title) control.
    Primary,
    /// The drag/move handle.
    DragHandle,
    /// The resize handle.
    ResizeHandle,
    /// The remove button.
    Remove,
    /// Move mode: move the item backward in reading order.
    MoveBackward,
    /// Move mode: move the item forward in reading order.
    MoveForward,
    /// Move mode: apply and exit.
    MoveApply,
    /// Resize mode: shrink the column span.
    ResizeShrinkWidth,
    /// Resize mode: grow the column span.
    ResizeGrowWidth,
    /// Resize mode: shrink the row span.
    ResizeShrinkHeight,
    /// Resize mode: grow the row span.
    ResizeGrowHeight,
    /// Resize mode: apply and exit.
    ResizeApply,
}

/// The finite set of controls focusable while a mode is active.
///
/// Entering a mode focuses the apply control; Tab and Shift+Tab cycle with
/// wrap-around and never leave the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTrap {
    controls: Vec<ItemControl>,
    current: usize,
}

impl FocusTrap {
    /// The trap for move mode.
    pub fn move_mode() -> Self {
        let controls = vec![
            ItemControl::MoveApply,
            ItemControl::MoveBackward,
            ItemControl::MoveForward,
        ];
        Self {
            controls,
            current: 0,
        }
    }

    /// The trap for resize mode.
    ///
    /// Height controls are only present while vertical resize is enabled.
    pub fn resize_mode(vertical_resize: bool) -> Self {
        let mut controls = vec![
            ItemControl::ResizeApply,
            ItemControl::ResizeShrinkWidth,
            ItemControl::ResizeGrowWidth,
        ];
        if vertical_resize {
            controls.push(ItemControl::ResizeShrinkHeight);
            controls.push(ItemControl::ResizeGrowHeight);
        }
        Self {
            controls,
            current: 0,
        }
    }

    /// The currently focused control.
    pub fn current(&self) -> ItemControl {
        self.controls[self.current]
    }

    /// The controls in the trap, in cycle order.
    pub fn controls(&self) -> &[ItemControl] {
        &self.controls
    }

    /// Advances focus to the next control (Tab), wrapping.
    pub fn focus_next(&mut self) -> ItemControl {
        self.current = (self.current + 1) % self.controls.len();
        self.current()
    }

    /// Moves focus to the previous control (Shift+Tab), wrapping.
    pub fn focus_previous(&mut self) -> ItemControl {
        self.current = if self.current == 0 {
            self.controls.len() - 1
        } else {
            self.current - 1
        };
        self.current()
    }
}

/// Derives the focus target after a structural mutation removed or replaced
/// the focused item.
///
/// Identity wins: if `old_focus` still exists in `new_tree`, it keeps focus.
/// Otherwise the old path drives a positional fallback: the item now at the
/// same index in the same sequence, else the previous sibling, else the
/// enclosing section, else `None` (no focusable target).
pub fn derive_focus_after_change(
    old_focus: ItemKey,
    old_path: Option<ItemPath>,
    new_tree: &ItemTree,
) -> Option<ItemKey> {
    if new_tree.locate(old_focus).is_some() {
        return Some(old_focus);
    }
    let path = old_path?;

    match path.child_index {
        Some(child_index) => {
            // The sequence was a section's children; find the section in the
            // new tree by position (it may itself have moved or vanished).
            let section = new_tree
                .items()
                .get(path.root_index)
                .filter(|item| item.is_section())
                .or_else(|| {
                    new_tree
                        .items()
                        .iter()
                        .rev()
                        .find(|item| item.is_section())
                });
            match section {
                Some(section) => {
                    let children = section.children().unwrap_or(&[]);
                    sibling_at(children, child_index).or(Some(section.key()))
                }
                None => fallback_at_root(new_tree, path.root_index),
            }
        }
        None => fallback_at_root(new_tree, path.root_index),
    }
}

fn fallback_at_root(tree: &ItemTree, index: usize) -> Option<ItemKey> {
    sibling_at(tree.items(), index)
}

/// The item now at `index`, else the last one before it, else `None`.
fn sibling_at(items: &[Item], index: usize) -> Option<ItemKey> {
    items
        .get(index)
        .or_else(|| items.last())
        .map(Item::key)
}
