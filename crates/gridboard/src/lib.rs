//! Headless interactive dashboard layout editing.
//!
//! Gridboard turns pointer and keyboard input into structural mutations of an
//! ordered item tree laid out on a grid. The host application owns the
//! canonical item list and all rendering; the engine reads the rendered
//! geometry through an adapter trait and hands every mutation back as a
//! brand-new tree through typed signals. The main pieces:
//!
//! - **Model**: the ordered, at-most-two-level item tree and its pure
//!   mutation operations
//! - **Geometry Adapter**: read-only view of the rendered grid, injected by
//!   the host (a scripted fake in tests)
//! - **Reorder Engine**: dragover geometry to tree moves, with midpoint
//!   hysteresis and a post-move cool-down
//! - **Resize Engine**: pointer deltas to discrete span steps with
//!   per-track re-baselining
//! - **Selection & Modes**: the Idle/Selected/Moving/Resizing state machine
//!   with focus traps and focus restoration
//! - **Event Gateway**: one signal per notification kind, payloads carrying
//!   the full resulting tree
//!
//! # Example
//!
//! ```
//! use gridboard::{DashboardEditor, GridGeometry, Item, ItemKey, Point, Rect};
//!
//! struct EmptyGrid;
//!
//! impl GridGeometry for EmptyGrid {
//!     fn column_tracks(&self) -> Vec<f32> { vec![200.0, 200.0] }
//!     fn row_tracks(&self) -> Vec<f32> { vec![150.0] }
//!     fn item_at(&self, _row: usize, _col: usize) -> Option<ItemKey> { None }
//!     fn bounds_of(&self, _key: ItemKey) -> Option<Rect> { None }
//! }
//!
//! let mut editor = DashboardEditor::new(EmptyGrid);
//! editor.events().item_moved.connect(|event| {
//!     // Commit event.tree back to the application model.
//! });
//! editor.set_items(vec![Item::new(ItemKey::new(0)), Item::new(ItemKey::new(1))]);
//! editor.drag_start(ItemKey::new(0), Point::new(100.0, 75.0));
//! editor.drag_end();
//! ```

pub mod config;
pub mod engine;
pub mod events;
pub mod focus;
pub mod geometry;
pub mod keyboard;
pub mod model;
pub mod reorder;
pub mod resize;

pub use config::DashboardConfig;
pub use engine::DashboardEditor;
pub use events::{
    EventGateway, ItemMoveModeChangedEvent, ItemMovedEvent, ItemRemovedEvent,
    ItemResizeModeChangedEvent, ItemResizedEvent, ItemSelectedChangedEvent,
};
pub use focus::{derive_focus_after_change, FocusTrap, ItemControl};
pub use geometry::{CellPosition, GridGeometry, Point, Rect, Size, TextDirection};
pub use keyboard::{Key, KeyboardModifiers, Mode, SelectionState};
pub use model::{Item, ItemContent, ItemKey, ItemPath, ItemTree, MoveTarget, TreeError};

pub use gridboard_core::{ConnectionGuard, ConnectionId, Signal};
