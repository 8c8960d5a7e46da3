//! Keyboard input types and the selection/mode state machine.
//!
//! The machine tracks which single item is focused, selected, and in which
//! mode, and arbitrates every transition:
//!
//! ```text
//! Idle -(select)-> Selected -(enter move)-> Moving -(apply|escape)-> Selected
//!                          -(enter resize)-> Resizing -(apply|escape)-> Selected
//! Selected -(escape|blur)-> Idle
//! ```
//!
//! Entering a mode directly from Idle is allowed (activating a handle implies
//! selection). Escape always unwinds the innermost layer first and restores
//! focus to the handle that opened the mode; blur and the host turning
//! editing off force-clear everything synchronously.
//!
//! The controller is pure state: each operation returns the list of
//! [`Transition`]s that occurred, and the editor turns those into gateway
//! notifications, exactly one per discrete user action.

use gridboard_core::logging::targets;

use crate::focus::{FocusTrap, ItemControl};
use crate::model::ItemKey;

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// The keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Tab,
    Delete,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

/// The keyboard-interaction mode of the selected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// No mode active.
    #[default]
    Idle,
    /// Move mode: arrows reposition the item.
    Moving,
    /// Resize mode: arrows change the item's spans.
    Resizing,
}

/// Snapshot of the focus/selection/mode state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    /// The item holding keyboard focus, if any.
    pub focused: Option<ItemKey>,
    /// The selected item, if any.
    pub selected: Option<ItemKey>,
    /// The active mode. Non-idle only while `selected` is set.
    pub mode: Mode,
}

/// One observable state change, to be turned into a gateway notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Selection toggled for an item.
    SelectedChanged { item: ItemKey, value: bool },
    /// Move mode toggled for an item.
    MoveModeChanged { item: ItemKey, value: bool },
    /// Resize mode toggled for an item.
    ResizeModeChanged { item: ItemKey, value: bool },
}

/// The selection and mode state machine.
#[derive(Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
    trap: Option<FocusTrap>,
    /// The control within the focused item that holds focus.
    focused_control: Option<ItemControl>,
}

impl SelectionController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state snapshot.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// The active mode.
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// The selected item, if any.
    pub fn selected(&self) -> Option<ItemKey> {
        self.state.selected
    }

    /// The focused item, if any.
    pub fn focused(&self) -> Option<ItemKey> {
        self.state.focused
    }

    /// The control holding focus within the focused item.
    pub fn focused_control(&self) -> Option<ItemControl> {
        self.focused_control
    }

    /// Moves keyboard focus to an item (Tab/click), independent of selection.
    ///
    /// If another item was in a mode, focus leaving it force-exits that mode
    /// and clears its selection first.
    pub fn focus(&mut self, key: ItemKey) -> Vec<Transition> {
        let mut transitions = Vec::new();
        if self.state.focused != Some(key) && self.state.selected.is_some_and(|sel| sel != key) {
            transitions.extend(self.clear_selection());
        }
        self.state.focused = Some(key);
        if self.focused_control.is_none() {
            self.focused_control = Some(ItemControl::Primary);
        }
        transitions
    }

    /// Focus left the dashboard entirely: force-exit any mode, clear
    /// selection and focus.
    pub fn blur(&mut self) -> Vec<Transition> {
        let transitions = self.clear_selection();
        self.state.focused = None;
        self.focused_control = None;
        transitions
    }

    /// Selects an item (activating its primary control), implying focus.
    pub fn select(&mut self, key: ItemKey) -> Vec<Transition> {
        if self.state.selected == Some(key) {
            return Vec::new();
        }
        let mut transitions = self.clear_selection();
        self.state.focused = Some(key);
        self.state.selected = Some(key);
        self.focused_control = Some(ItemControl::Primary);
        transitions.push(Transition::SelectedChanged { item: key, value: true });
        transitions
    }

    /// Enters move mode on an item, implying selection when needed.
    ///
    /// An active resize mode on the item is exited first (with its
    /// notification); modes never stack.
    pub fn enter_move_mode(&mut self, key: ItemKey) -> Vec<Transition> {
        let mut transitions = Vec::new();
        if self.state.selected != Some(key) {
            transitions.extend(self.select(key));
        }
        if self.state.mode == Mode::Moving {
            return transitions;
        }
        transitions.extend(self.exit_mode());
        let trap = FocusTrap::move_mode();
        self.focused_control = Some(trap.current());
        self.trap = Some(trap);
        self.state.mode = Mode::Moving;
        transitions.push(Transition::MoveModeChanged { item: key, value: true });
        transitions
    }

    /// Enters resize mode on an item, implying selection when needed.
    ///
    /// `vertical_resize` gates the height controls in the focus trap. An
    /// active move mode on the item is exited first (with its notification);
    /// modes never stack.
    pub fn enter_resize_mode(&mut self, key: ItemKey, vertical_resize: bool) -> Vec<Transition> {
        let mut transitions = Vec::new();
        if self.state.selected != Some(key) {
            transitions.extend(self.select(key));
        }
        if self.state.mode == Mode::Resizing {
            return transitions;
        }
        transitions.extend(self.exit_mode());
        let trap = FocusTrap::resize_mode(vertical_resize);
        self.focused_control = Some(trap.current());
        self.trap = Some(trap);
        self.state.mode = Mode::Resizing;
        transitions.push(Transition::ResizeModeChanged { item: key, value: true });
        transitions
    }

    /// Exits the active mode (apply or Escape), returning to Selected and
    /// restoring focus to the handle that opened the mode.
    pub fn exit_mode(&mut self) -> Vec<Transition> {
        let Some(item) = self.state.selected else {
            // Mode without selection is an invariant violation; self-heal.
            if self.state.mode != Mode::Idle {
                debug_assert!(false, "mode active with no selected item");
                tracing::warn!(
                    target: targets::KEYBOARD,
                    "mode active with no selected item; resetting to idle"
                );
                self.state.mode = Mode::Idle;
                self.trap = None;
            }
            return Vec::new();
        };
        let transition = match self.state.mode {
            Mode::Idle => return Vec::new(),
            Mode::Moving => {
                self.focused_control = Some(ItemControl::DragHandle);
                Transition::MoveModeChanged { item, value: false }
            }
            Mode::Resizing => {
                self.focused_control = Some(ItemControl::ResizeHandle);
                Transition::ResizeModeChanged { item, value: false }
            }
        };
        self.state.mode = Mode::Idle;
        self.trap = None;
        vec![transition]
    }

    /// Escape: unwinds the innermost layer only.
    pub fn escape(&mut self) -> Vec<Transition> {
        if self.state.mode != Mode::Idle {
            return self.exit_mode();
        }
        if let Some(item) = self.state.selected.take() {
            self.focused_control = Some(ItemControl::Primary);
            return vec![Transition::SelectedChanged { item, value: false }];
        }
        Vec::new()
    }

    /// Force-clears mode and selection (blur, host edits disabled, selected
    /// item vanished). Focus is left to the caller to re-derive.
    pub fn clear_selection(&mut self) -> Vec<Transition> {
        let mut transitions = self.exit_mode();
        if let Some(item) = self.state.selected.take() {
            self.focused_control = Some(ItemControl::Primary);
            transitions.push(Transition::SelectedChanged { item, value: false });
        }
        transitions
    }

    /// Tab within an active mode's focus trap. Returns the newly focused
    /// control, or `None` when no trap is active (Tab falls through to the
    /// host's normal order).
    pub fn cycle_trap(&mut self, forward: bool) -> Option<ItemControl> {
        let trap = self.trap.as_mut()?;
        let control = if forward {
            trap.focus_next()
        } else {
            trap.focus_previous()
        };
        self.focused_control = Some(control);
        Some(control)
    }

    /// Replaces the focused item (focus restoration after a mutation).
    pub fn set_focus_target(&mut self, target: Option<ItemKey>) {
        self.state.focused = target;
        self.focused_control = target.map(|_| ItemControl::Primary);
    }
}
