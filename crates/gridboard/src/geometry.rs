//! Geometry types and the rendered-grid adapter.
//!
//! The engine never computes layout itself; it reads the rendered grid's
//! current state through the [`GridGeometry`] trait. A host backs the trait
//! with its real layout engine; tests inject a scripted fake. All queries are
//! read-only and degenerate inputs (out-of-range cells, not-yet-rendered
//! items) answer `None`, never an error.

use crate::model::ItemKey;

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Empty rectangle at origin.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    /// Left edge x coordinate.
    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    /// Top edge y coordinate.
    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    /// Right edge x coordinate.
    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Bottom edge y coordinate.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Check whether a point lies inside the rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

/// A derived (row, column) pair for a rendered item.
///
/// Valid only transiently during one layout pass; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    /// Create a new cell position.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Reading direction of the surrounding document.
///
/// The reorder engine selects leading/trailing edges through this instead of
/// hardcoding left/right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDirection {
    /// Left-to-right (default).
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

/// Read-only view of the rendered grid.
///
/// Implementors report the grid's current column/row tracks and map cells to
/// the innermost rendered non-section item. Row tracks must be reported with
/// a section's header row already merged into the row preceding its first
/// content row, so index math never sees the header band.
pub trait GridGeometry {
    /// Current column track widths, in order.
    fn column_tracks(&self) -> Vec<f32>;

    /// Current row track heights, in order, with nested section rows
    /// flattened into the parent sequence.
    fn row_tracks(&self) -> Vec<f32>;

    /// The innermost rendered non-section item covering the cell, or `None`
    /// when the cell is out of range or the renderer has not populated it yet.
    fn item_at(&self, row: usize, col: usize) -> Option<ItemKey>;

    /// Bounding box of a rendered item, or `None` when not rendered.
    fn bounds_of(&self, key: ItemKey) -> Option<Rect>;

    /// Number of visible columns.
    fn column_count(&self) -> usize {
        self.column_tracks().len()
    }

    /// Number of visible rows.
    fn row_count(&self) -> usize {
        self.row_tracks().len()
    }

    /// Maps a point to the cell under it, treating each inter-track gap as
    /// split between its neighbors. `None` outside the grid.
    fn cell_at_point(&self, point: Point, spacing: f32) -> Option<CellPosition> {
        let col = index_in_tracks(&self.column_tracks(), point.x, spacing)?;
        let row = index_in_tracks(&self.row_tracks(), point.y, spacing)?;
        Some(CellPosition::new(row, col))
    }
}

/// Finds the track index containing `coord`, assigning each gap half-and-half
/// to its neighboring tracks.
fn index_in_tracks(tracks: &[f32], coord: f32, spacing: f32) -> Option<usize> {
    if coord < 0.0 {
        return None;
    }
    let mut start = 0.0f32;
    for (index, track) in tracks.iter().enumerate() {
        let end = start + track;
        let slack = if index + 1 < tracks.len() {
            spacing / 2.0
        } else {
            0.0
        };
        if coord < end + slack {
            return Some(index);
        }
        start = end + spacing;
    }
    None
}

#[cfg(test)]
pub(crate) mod fake {
    //! A scripted grid for tests: uniform tracks plus an explicit cell map.

    use std::collections::HashMap;

    use super::*;

    /// Test double for [`GridGeometry`] with uniform track sizes.
    ///
    /// Cells are populated explicitly with [`FakeGrid::place`]; unpopulated
    /// cells answer `None`, which doubles as the renderer-lazy case.
    pub(crate) struct FakeGrid {
        pub col_width: f32,
        pub row_height: f32,
        pub spacing: f32,
        pub cols: usize,
        pub rows: usize,
        cells: HashMap<(usize, usize), ItemKey>,
        bounds: HashMap<ItemKey, Rect>,
    }

    impl FakeGrid {
        pub fn new(cols: usize, rows: usize) -> Self {
            Self {
                col_width: 100.0,
                row_height: 100.0,
                spacing: 0.0,
                cols,
                rows,
                cells: HashMap::new(),
                bounds: HashMap::new(),
            }
        }

        /// Places an item covering `colspan x rowspan` cells at (row, col)
        /// and records its bounding box from the uniform tracks.
        pub fn place(&mut self, key: ItemKey, row: usize, col: usize, colspan: usize, rowspan: usize) {
            for r in row..row + rowspan {
                for c in col..col + colspan {
                    self.cells.insert((r, c), key);
                }
            }
            let rect = Rect::new(
                col as f32 * (self.col_width + self.spacing),
                row as f32 * (self.row_height + self.spacing),
                colspan as f32 * self.col_width + (colspan - 1) as f32 * self.spacing,
                rowspan as f32 * self.row_height + (rowspan - 1) as f32 * self.spacing,
            );
            self.bounds.insert(key, rect);
        }

        pub fn clear(&mut self) {
            self.cells.clear();
            self.bounds.clear();
        }

        /// Center of a cell, for driving pointer events in tests.
        pub fn cell_center(&self, row: usize, col: usize) -> Point {
            Point::new(
                col as f32 * (self.col_width + self.spacing) + self.col_width / 2.0,
                row as f32 * (self.row_height + self.spacing) + self.row_height / 2.0,
            )
        }
    }

    impl GridGeometry for FakeGrid {
        fn column_tracks(&self) -> Vec<f32> {
            vec![self.col_width; self.cols]
        }

        fn row_tracks(&self) -> Vec<f32> {
            vec![self.row_height; self.rows]
        }

        fn item_at(&self, row: usize, col: usize) -> Option<ItemKey> {
            self.cells.get(&(row, col)).copied()
        }

        fn bounds_of(&self, key: ItemKey) -> Option<Rect> {
            self.bounds.get(&key).copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeGrid;
    use super::*;

    #[test]
    fn test_rect_edges_and_center() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.bottom(), 70.0);
        assert_eq!(rect.center(), Point::new(60.0, 45.0));
        assert!(rect.contains(Point::new(10.0, 20.0)));
        assert!(!rect.contains(Point::new(110.0, 20.0)));
    }

    #[test]
    fn test_cell_at_point_uniform() {
        let grid = FakeGrid::new(3, 2);
        assert_eq!(
            grid.cell_at_point(Point::new(50.0, 50.0), grid.spacing),
            Some(CellPosition::new(0, 0))
        );
        assert_eq!(
            grid.cell_at_point(Point::new(250.0, 150.0), grid.spacing),
            Some(CellPosition::new(1, 2))
        );
    }

    #[test]
    fn test_cell_at_point_out_of_range() {
        let grid = FakeGrid::new(2, 1);
        assert_eq!(grid.cell_at_point(Point::new(-5.0, 10.0), 0.0), None);
        assert_eq!(grid.cell_at_point(Point::new(450.0, 10.0), 0.0), None);
        assert_eq!(grid.cell_at_point(Point::new(10.0, 150.0), 0.0), None);
    }

    #[test]
    fn test_gap_split_between_tracks() {
        let mut grid = FakeGrid::new(2, 1);
        grid.spacing = 20.0;
        // Gap spans 100..120; first half belongs to column 0, second to 1.
        assert_eq!(
            grid.cell_at_point(Point::new(105.0, 50.0), grid.spacing),
            Some(CellPosition::new(0, 0))
        );
        assert_eq!(
            grid.cell_at_point(Point::new(115.0, 50.0), grid.spacing),
            Some(CellPosition::new(0, 1))
        );
    }

    #[test]
    fn test_item_at_unrendered_cell_is_none() {
        let mut grid = FakeGrid::new(2, 2);
        grid.place(ItemKey::new(1), 0, 0, 1, 1);
        assert_eq!(grid.item_at(0, 0), Some(ItemKey::new(1)));
        assert_eq!(grid.item_at(1, 1), None);
        assert_eq!(grid.item_at(9, 9), None);
    }
}
