//! The event/mutation gateway.
//!
//! Every structural change flows through [`EventGateway`]: the engine
//! computes the new tree, then notifies the host through exactly one typed
//! signal per discrete user action. Payloads carry the affected item, the
//! full resulting tree, and the enclosing section where applicable; the
//! host's committed item array is never mutated in place.
//!
//! # Example
//!
//! ```
//! use gridboard::events::EventGateway;
//!
//! let gateway = EventGateway::new();
//! gateway.item_moved.connect(|event| {
//!     println!("item {:?} moved", event.item.key());
//! });
//! ```

use gridboard_core::logging::targets;
use gridboard_core::Signal;

use crate::model::{Item, ItemKey, ItemTree};

/// Payload for `item-moved`: a drag or keyboard move completed with an actual
/// position change.
#[derive(Debug, Clone)]
pub struct ItemMovedEvent {
    /// The moved item.
    pub item: Item,
    /// The resulting tree.
    pub tree: ItemTree,
    /// The enclosing section after the move, if nested.
    pub section: Option<ItemKey>,
}

/// Payload for `item-resized`: a span actually changed.
#[derive(Debug, Clone)]
pub struct ItemResizedEvent {
    /// The resized item, with its new spans.
    pub item: Item,
    /// The resulting tree.
    pub tree: ItemTree,
    /// The enclosing section, if nested.
    pub section: Option<ItemKey>,
}

/// Payload for `item-removed`: a user-initiated delete.
#[derive(Debug, Clone)]
pub struct ItemRemovedEvent {
    /// The removed item.
    pub item: Item,
    /// The resulting tree, without the item.
    pub tree: ItemTree,
    /// The section the item was removed from, if nested.
    pub section: Option<ItemKey>,
}

/// Payload for `item-selected-changed`.
#[derive(Debug, Clone)]
pub struct ItemSelectedChangedEvent {
    /// The affected item.
    pub item: Item,
    /// Whether the item is now selected.
    pub value: bool,
}

/// Payload for `item-move-mode-changed`.
#[derive(Debug, Clone)]
pub struct ItemMoveModeChangedEvent {
    /// The affected item.
    pub item: Item,
    /// Whether move mode is now active.
    pub value: bool,
}

/// Payload for `item-resize-mode-changed`.
#[derive(Debug, Clone)]
pub struct ItemResizeModeChangedEvent {
    /// The affected item.
    pub item: Item,
    /// Whether resize mode is now active.
    pub value: bool,
}

/// One signal per notification kind, emitted by the engine.
///
/// Hosts connect slots to the signals they care about. Signals fire
/// synchronously inside the input handler that caused the change.
#[derive(Default)]
pub struct EventGateway {
    /// Drag-end or keyboard move completed with an actual position change.
    pub item_moved: Signal<ItemMovedEvent>,
    /// Span actually changed (pointer or keyboard).
    pub item_resized: Signal<ItemResizedEvent>,
    /// User-initiated delete.
    pub item_removed: Signal<ItemRemovedEvent>,
    /// Selection toggled on or off.
    pub item_selected_changed: Signal<ItemSelectedChangedEvent>,
    /// Move mode toggled.
    pub item_move_mode_changed: Signal<ItemMoveModeChangedEvent>,
    /// Resize mode toggled.
    pub item_resize_mode_changed: Signal<ItemResizeModeChangedEvent>,
}

impl EventGateway {
    /// Creates a gateway with no connections.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn notify_moved(&self, item: Item, tree: ItemTree, section: Option<ItemKey>) {
        tracing::debug!(
            target: targets::EVENTS,
            item = item.key().raw(),
            ?section,
            "item moved"
        );
        self.item_moved.emit(ItemMovedEvent { item, tree, section });
    }

    pub(crate) fn notify_resized(&self, item: Item, tree: ItemTree, section: Option<ItemKey>) {
        tracing::debug!(
            target: targets::EVENTS,
            item = item.key().raw(),
            colspan = item.colspan(),
            rowspan = item.rowspan(),
            "item resized"
        );
        self.item_resized.emit(ItemResizedEvent { item, tree, section });
    }

    pub(crate) fn notify_removed(&self, item: Item, tree: ItemTree, section: Option<ItemKey>) {
        tracing::debug!(
            target: targets::EVENTS,
            item = item.key().raw(),
            "item removed"
        );
        self.item_removed.emit(ItemRemovedEvent { item, tree, section });
    }

    pub(crate) fn notify_selected_changed(&self, item: Item, value: bool) {
        tracing::debug!(
            target: targets::EVENTS,
            item = item.key().raw(),
            value,
            "selection changed"
        );
        self.item_selected_changed
            .emit(ItemSelectedChangedEvent { item, value });
    }

    pub(crate) fn notify_move_mode_changed(&self, item: Item, value: bool) {
        tracing::debug!(
            target: targets::EVENTS,
            item = item.key().raw(),
            value,
            "move mode changed"
        );
        self.item_move_mode_changed
            .emit(ItemMoveModeChangedEvent { item, value });
    }

    pub(crate) fn notify_resize_mode_changed(&self, item: Item, value: bool) {
        tracing::debug!(
            target: targets::EVENTS,
            item = item.key().raw(),
            value,
            "resize mode changed"
        );
        self.item_resize_mode_changed
            .emit(ItemResizeModeChangedEvent { item, value });
    }
}
