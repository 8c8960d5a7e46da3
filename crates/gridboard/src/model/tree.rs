//! The ordered item tree and its pure mutation operations.
//!
//! [`ItemTree`] wraps the host-owned root sequence of items. Every mutation
//! is a pure function returning a brand-new tree; the engine never mutates a
//! tree the host has seen. A no-op move returns a tree structurally equal to
//! the original.
//!
//! Lookup failures ([`TreeError::ItemNotFound`]) are defensive: the item list
//! can be replaced by the host concurrently with pointer interaction, so
//! callers absorb these errors as no-ops rather than surfacing them.

use super::item::{Item, ItemKey};

/// Location of an item within a tree: root index, plus the index inside the
/// section when the item is nested.
///
/// Valid only against the tree that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPath {
    /// Index in the root sequence (of the item itself, or of its section).
    pub root_index: usize,
    /// Index within the section's children, if nested.
    pub child_index: Option<usize>,
}

impl ItemPath {
    /// Path of a root-level item.
    pub fn root(root_index: usize) -> Self {
        Self {
            root_index,
            child_index: None,
        }
    }

    /// Path of an item nested in the section at `root_index`.
    pub fn nested(root_index: usize, child_index: usize) -> Self {
        Self {
            root_index,
            child_index: Some(child_index),
        }
    }

    /// Returns true if the item sits inside a section.
    pub fn is_nested(&self) -> bool {
        self.child_index.is_some()
    }
}

/// Destination sequence for a move or insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    /// The root sequence.
    Root,
    /// The child sequence of the section with the given key.
    Section(ItemKey),
}

/// Errors from tree operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The item is absent from the tree.
    #[error("item {0:?} is not in the tree")]
    ItemNotFound(ItemKey),

    /// The destination section is absent from the root sequence.
    #[error("section {0:?} is not at the root of the tree")]
    SectionNotFound(ItemKey),

    /// A section cannot be nested inside another section.
    #[error("a section cannot be placed inside another section")]
    NestedSection,
}

/// The ordered, at-most-two-level sequence of dashboard items.
///
/// All operations return a new tree and leave `self` untouched. The host
/// remains the sole owner of the committed item list; the engine hands every
/// resulting tree back through the event gateway.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemTree {
    items: Vec<Item>,
}

impl ItemTree {
    /// Creates a tree from a root sequence of items.
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// The root sequence.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Consumes the tree, returning the root sequence.
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// Number of root-level items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the root sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finds the path of an item by key.
    pub fn locate(&self, key: ItemKey) -> Option<ItemPath> {
        for (root_index, item) in self.items.iter().enumerate() {
            if item.key() == key {
                return Some(ItemPath::root(root_index));
            }
            if let Some(children) = item.children() {
                for (child_index, child) in children.iter().enumerate() {
                    if child.key() == key {
                        return Some(ItemPath::nested(root_index, child_index));
                    }
                }
            }
        }
        None
    }

    /// Gets an item by key, at either level.
    pub fn get(&self, key: ItemKey) -> Option<&Item> {
        let path = self.locate(key)?;
        self.at_path(path)
    }

    /// Gets the item at a path.
    pub fn at_path(&self, path: ItemPath) -> Option<&Item> {
        let root = self.items.get(path.root_index)?;
        match path.child_index {
            None => Some(root),
            Some(child_index) => root.children()?.get(child_index),
        }
    }

    /// The key of the section enclosing `key`, if the item is nested.
    pub fn section_of(&self, key: ItemKey) -> Option<ItemKey> {
        let path = self.locate(key)?;
        if path.is_nested() {
            self.items.get(path.root_index).map(Item::key)
        } else {
            None
        }
    }

    /// All keys in visual order: each root item, with a section's key
    /// followed by its children's keys.
    pub fn flatten(&self) -> Vec<ItemKey> {
        let mut keys = Vec::new();
        for item in &self.items {
            keys.push(item.key());
            if let Some(children) = item.children() {
                keys.extend(children.iter().map(Item::key));
            }
        }
        keys
    }

    /// Returns a new tree with the item moved into `target` at `index`.
    ///
    /// The item is extracted first, then inserted at `index` in the
    /// destination sequence as it stands after the extraction, clamped to the
    /// sequence length. Passing a dragged-over item's pre-extraction index
    /// therefore lands the moved item after that item when moving forward and
    /// before it when moving backward, shifting everything in between by one.
    pub fn with_moved(
        &self,
        key: ItemKey,
        target: MoveTarget,
        index: usize,
    ) -> Result<ItemTree, TreeError> {
        let mut items = self.items.clone();
        let item = extract(&mut items, key).ok_or(TreeError::ItemNotFound(key))?;

        if item.is_section() && matches!(target, MoveTarget::Section(_)) {
            return Err(TreeError::NestedSection);
        }

        let dest = match target {
            MoveTarget::Root => &mut items,
            MoveTarget::Section(section_key) => items
                .iter_mut()
                .find(|candidate| candidate.key() == section_key)
                .and_then(Item::children_mut)
                .ok_or(TreeError::SectionNotFound(section_key))?,
        };
        let index = index.min(dest.len());
        dest.insert(index, item);

        Ok(ItemTree::new(items))
    }

    /// Returns a new tree with the item's spans adjusted by the given deltas.
    ///
    /// Spans are clamped to at least 1; upper clamps (visible column count)
    /// are the resize engine's concern.
    pub fn with_span_changed(
        &self,
        key: ItemKey,
        colspan_delta: i32,
        rowspan_delta: i32,
    ) -> Result<ItemTree, TreeError> {
        let mut items = self.items.clone();
        let item = find_mut(&mut items, key).ok_or(TreeError::ItemNotFound(key))?;
        item.set_colspan(apply_delta(item.colspan(), colspan_delta));
        item.set_rowspan(apply_delta(item.rowspan(), rowspan_delta));
        Ok(ItemTree::new(items))
    }

    /// Returns a new tree with the item removed.
    pub fn with_removed(&self, key: ItemKey) -> Result<ItemTree, TreeError> {
        let mut items = self.items.clone();
        extract(&mut items, key).ok_or(TreeError::ItemNotFound(key))?;
        Ok(ItemTree::new(items))
    }

    /// Returns a new tree with `item` inserted into `target` at `index`
    /// (clamped to the sequence length).
    pub fn with_inserted(
        &self,
        item: Item,
        target: MoveTarget,
        index: usize,
    ) -> Result<ItemTree, TreeError> {
        if item.is_section() && matches!(target, MoveTarget::Section(_)) {
            return Err(TreeError::NestedSection);
        }
        let mut items = self.items.clone();
        let dest = match target {
            MoveTarget::Root => &mut items,
            MoveTarget::Section(section_key) => items
                .iter_mut()
                .find(|candidate| candidate.key() == section_key)
                .and_then(Item::children_mut)
                .ok_or(TreeError::SectionNotFound(section_key))?,
        };
        let index = index.min(dest.len());
        dest.insert(index, item);
        Ok(ItemTree::new(items))
    }
}

impl FromIterator<Item> for ItemTree {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Removes and returns the item with `key` from either level.
fn extract(items: &mut Vec<Item>, key: ItemKey) -> Option<Item> {
    if let Some(index) = items.iter().position(|item| item.key() == key) {
        return Some(items.remove(index));
    }
    for item in items.iter_mut() {
        if let Some(children) = item.children_mut() {
            if let Some(index) = children.iter().position(|child| child.key() == key) {
                return Some(children.remove(index));
            }
        }
    }
    None
}

/// Finds the item with `key` at either level.
fn find_mut(items: &mut [Item], key: ItemKey) -> Option<&mut Item> {
    for item in items.iter_mut() {
        if item.key() == key {
            return Some(item);
        }
        if let Some(children) = item.children_mut() {
            for child in children.iter_mut() {
                if child.key() == key {
                    return Some(child);
                }
            }
        }
    }
    None
}

fn apply_delta(span: u32, delta: i32) -> u32 {
    span.saturating_add_signed(delta).max(1)
}
