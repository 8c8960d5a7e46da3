//! The item tree model: pure data describing the dashboard's contents.
//!
//! The host application owns the canonical item list. The engine reads it
//! through [`ItemTree`] and hands back brand-new trees through the event
//! gateway; nothing here mutates host data in place.

mod item;
mod tree;

pub use item::{Item, ItemContent, ItemKey};
pub use tree::{ItemPath, ItemTree, MoveTarget, TreeError};
