//! Items placed on the dashboard grid.
//!
//! An [`Item`] is a plain-data description of one dashboard entry: an opaque
//! host-assigned [`ItemKey`], column/row spans, and either leaf content or a
//! section holding an ordered run of child items. Items carry no behavior;
//! the engine only ever reads them and produces new trees.

/// Opaque identity of an [`Item`], assigned by the host.
///
/// Items are compared by key everywhere in the engine; the host is
/// responsible for keeping keys unique within one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(u64);

impl ItemKey {
    /// Creates a key from a raw host-assigned value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw key value.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ItemKey {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// The content of an [`Item`]: an ordinary widget or a section of children.
///
/// Nesting is structurally limited to two levels; a section's children are
/// themselves items, but the tree operations refuse to place a section
/// inside another section.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemContent {
    /// An ordinary widget with host-rendered content.
    Leaf,
    /// A full-width section holding an ordered sequence of child items.
    Section(Vec<Item>),
}

/// One entry in the dashboard grid.
///
/// # Example
///
/// ```
/// use gridboard::model::{Item, ItemKey};
///
/// let widget = Item::new(ItemKey::new(1)).with_colspan(2);
/// let section = Item::section(ItemKey::new(2), vec![Item::new(ItemKey::new(3))]);
///
/// assert_eq!(widget.colspan(), 2);
/// assert!(section.is_section());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    key: ItemKey,
    colspan: u32,
    rowspan: u32,
    content: ItemContent,
}

impl Item {
    /// Creates a new leaf item with default 1x1 span.
    pub fn new(key: impl Into<ItemKey>) -> Self {
        Self {
            key: key.into(),
            colspan: 1,
            rowspan: 1,
            content: ItemContent::Leaf,
        }
    }

    /// Creates a new section item with the given children.
    pub fn section(key: impl Into<ItemKey>, children: Vec<Item>) -> Self {
        Self {
            key: key.into(),
            colspan: 1,
            rowspan: 1,
            content: ItemContent::Section(children),
        }
    }

    /// Sets the column span (clamped to at least 1).
    pub fn with_colspan(mut self, colspan: u32) -> Self {
        self.colspan = colspan.max(1);
        self
    }

    /// Sets the row span (clamped to at least 1).
    pub fn with_rowspan(mut self, rowspan: u32) -> Self {
        self.rowspan = rowspan.max(1);
        self
    }

    /// Gets the item's key.
    pub fn key(&self) -> ItemKey {
        self.key
    }

    /// Gets the column span.
    pub fn colspan(&self) -> u32 {
        self.colspan
    }

    /// Gets the row span.
    pub fn rowspan(&self) -> u32 {
        self.rowspan
    }

    /// Sets the column span (clamped to at least 1).
    pub fn set_colspan(&mut self, colspan: u32) {
        self.colspan = colspan.max(1);
    }

    /// Sets the row span (clamped to at least 1).
    pub fn set_rowspan(&mut self, rowspan: u32) {
        self.rowspan = rowspan.max(1);
    }

    /// Returns true if this item is a section.
    pub fn is_section(&self) -> bool {
        matches!(self.content, ItemContent::Section(_))
    }

    /// Gets the item's content.
    pub fn content(&self) -> &ItemContent {
        &self.content
    }

    /// Gets the children, if this item is a section.
    pub fn children(&self) -> Option<&[Item]> {
        match &self.content {
            ItemContent::Section(children) => Some(children),
            ItemContent::Leaf => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Item>> {
        match &mut self.content {
            ItemContent::Section(children) => Some(children),
            ItemContent::Leaf => None,
        }
    }
}
