//! The reorder engine: pointer drags become tree moves.
//!
//! A [`DragSession`] lives from drag-start to drag-end. Each dragover is
//! mapped to a candidate target through the grid geometry, then passed
//! through two stabilizers before a move is proposed:
//!
//! - **Midpoint hysteresis**: the pointer must cross the midpoint of the edge
//!   separating the dragged item from the target, so two adjacent,
//!   similarly-sized items do not oscillate. Horizontal edges are selected by
//!   reading direction (an item earlier in the tree sits at the start edge,
//!   which is the right edge in RTL).
//! - **Cool-down debounce**: after a committed move, further moves are
//!   suppressed until the deadline passes, so one continuous drag does not
//!   thrash repeated swaps near a boundary. The deadline is owned by the
//!   session and evaluated against a caller-supplied clock.
//!
//! The engine only *proposes* the item whose index the dragged item should
//! take; the editor applies the move and fires `item-moved` exactly once, at
//! drag end, when a move actually happened during the session.

use std::time::{Duration, Instant};

use gridboard_core::logging::targets;

use crate::geometry::{GridGeometry, Point, TextDirection};
use crate::model::{ItemKey, ItemTree};

/// Ephemeral state of one pointer-driven reorder interaction.
///
/// At most one session exists system-wide; drag-start cannot occur without a
/// prior drag-end, and a redundant start is refused.
#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    /// The item being dragged.
    dragged: ItemKey,
    /// Last observed pointer position.
    last_pos: Point,
    /// Whether any move was committed during this session.
    moved: bool,
    /// Moves are suppressed until this instant.
    debounce_deadline: Option<Instant>,
}

impl DragSession {
    /// The item being dragged.
    pub fn dragged(&self) -> ItemKey {
        self.dragged
    }

    /// Whether any move was committed during this session.
    pub fn has_moved(&self) -> bool {
        self.moved
    }
}

/// Maps dragover geometry to proposed tree moves.
#[derive(Debug, Default)]
pub struct ReorderEngine {
    session: Option<DragSession>,
}

impl ReorderEngine {
    /// Creates an idle reorder engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active session, if a drag is in progress.
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// True while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Begins a drag from the item's drag handle.
    ///
    /// Returns `false` if a session is already active. The caller is expected
    /// to follow up with one synthetic dragover at the start position so the
    /// first real dragover has a baseline to compare against.
    pub fn start(&mut self, dragged: ItemKey, at: Point) -> bool {
        if self.session.is_some() {
            return false;
        }
        tracing::debug!(target: targets::REORDER, item = dragged.raw(), "drag started");
        self.session = Some(DragSession {
            dragged,
            last_pos: at,
            moved: false,
            debounce_deadline: None,
        });
        true
    }

    /// Evaluates a dragover at `pos`.
    ///
    /// Returns the item whose current index the dragged item should take, or
    /// `None` when nothing should happen this tick: no session, debounce
    /// still cooling down, pointer outside the grid, target not rendered
    /// yet, hovering the dragged item itself, or the midpoint threshold not
    /// crossed. This never fails; transiently empty cells are "no target".
    pub fn drag_over<G: GridGeometry>(
        &mut self,
        pos: Point,
        grid: &G,
        tree: &ItemTree,
        direction: TextDirection,
        spacing: f32,
        now: Instant,
    ) -> Option<ItemKey> {
        let session = self.session.as_mut()?;
        session.last_pos = pos;

        if let Some(deadline) = session.debounce_deadline {
            if now < deadline {
                return None;
            }
            session.debounce_deadline = None;
        }

        let dragged = session.dragged;
        let target = resolve_target(pos, grid, spacing)?;
        if target == dragged {
            return None;
        }

        let dragged_bounds = grid.bounds_of(dragged)?;
        let target_bounds = grid.bounds_of(target)?;

        // Tree order decides which side of the target the dragged item is
        // approaching from; geometry decides whether the pointer has crossed
        // the midpoint of the separating edge.
        let order = tree.flatten();
        let dragged_pos = order.iter().position(|&key| key == dragged)?;
        let target_pos = order.iter().position(|&key| key == target)?;
        let dragged_before = dragged_pos < target_pos;

        let vertically_separated = dragged_bounds.bottom() <= target_bounds.top()
            || dragged_bounds.top() >= target_bounds.bottom();

        let crossed = if vertically_separated {
            if dragged_before {
                pos.y >= target_bounds.center().y
            } else {
                pos.y <= target_bounds.center().y
            }
        } else {
            // Horizontally separated: the edge to cross is the target's
            // trailing (for a forward move) or leading (backward) edge in
            // reading order, mirrored under RTL.
            let center_x = target_bounds.center().x;
            match (direction, dragged_before) {
                (TextDirection::Ltr, true) | (TextDirection::Rtl, false) => pos.x >= center_x,
                (TextDirection::Ltr, false) | (TextDirection::Rtl, true) => pos.x <= center_x,
            }
        };

        if crossed {
            tracing::trace!(
                target: targets::REORDER,
                dragged = dragged.raw(),
                over = target.raw(),
                "midpoint crossed"
            );
            Some(target)
        } else {
            None
        }
    }

    /// Records that a move was committed, arming the cool-down window.
    pub fn note_moved(&mut self, debounce: Duration, now: Instant) {
        if let Some(session) = self.session.as_mut() {
            session.moved = true;
            session.debounce_deadline = Some(now + debounce);
        }
    }

    /// Ends the drag, returning the dragged item and whether any move was
    /// committed during the session.
    pub fn end(&mut self) -> Option<(ItemKey, bool)> {
        let session = self.session.take()?;
        tracing::debug!(
            target: targets::REORDER,
            item = session.dragged.raw(),
            moved = session.moved,
            "drag ended"
        );
        Some((session.dragged, session.moved))
    }

    /// Discards the session without committing anything (native drag cancel).
    pub fn cancel(&mut self) {
        self.session = None;
    }
}

/// Resolves the item under the pointer, falling back to the nearest rendered
/// item in the pointer's row, then its column, for empty-area drops.
fn resolve_target<G: GridGeometry>(pos: Point, grid: &G, spacing: f32) -> Option<ItemKey> {
    let cell = grid.cell_at_point(pos, spacing)?;
    if let Some(key) = grid.item_at(cell.row, cell.col) {
        return Some(key);
    }

    let nearest_in_row = (0..grid.column_count())
        .filter_map(|col| grid.item_at(cell.row, col).map(|key| (col, key)))
        .min_by_key(|(col, _)| cell.col.abs_diff(*col))
        .map(|(_, key)| key);
    if nearest_in_row.is_some() {
        return nearest_in_row;
    }

    (0..grid.row_count())
        .filter_map(|row| grid.item_at(row, cell.col).map(|key| (row, key)))
        .min_by_key(|(row, _)| cell.row.abs_diff(*row))
        .map(|(_, key)| key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::fake::FakeGrid;
    use crate::model::Item;

    fn key(raw: u64) -> ItemKey {
        ItemKey::new(raw)
    }

    /// Two 1x1 items side by side in one row.
    fn two_item_setup() -> (FakeGrid, ItemTree) {
        let mut grid = FakeGrid::new(2, 1);
        grid.place(key(0), 0, 0, 1, 1);
        grid.place(key(1), 0, 1, 1, 1);
        let tree = ItemTree::new(vec![Item::new(key(0)), Item::new(key(1))]);
        (grid, tree)
    }

    #[test]
    fn test_no_target_before_midpoint() {
        let (grid, tree) = two_item_setup();
        let mut engine = ReorderEngine::new();
        engine.start(key(0), grid.cell_center(0, 0));

        // Inside item 1's cell but before its center: no move yet.
        let proposal = engine.drag_over(
            Point::new(120.0, 50.0),
            &grid,
            &tree,
            TextDirection::Ltr,
            0.0,
            Instant::now(),
        );
        assert_eq!(proposal, None);
    }

    #[test]
    fn test_target_after_midpoint() {
        let (grid, tree) = two_item_setup();
        let mut engine = ReorderEngine::new();
        engine.start(key(0), grid.cell_center(0, 0));

        let proposal = engine.drag_over(
            Point::new(160.0, 50.0),
            &grid,
            &tree,
            TextDirection::Ltr,
            0.0,
            Instant::now(),
        );
        assert_eq!(proposal, Some(key(1)));
    }

    #[test]
    fn test_backward_drag_crosses_leading_edge() {
        let (grid, tree) = two_item_setup();
        let mut engine = ReorderEngine::new();
        engine.start(key(1), grid.cell_center(0, 1));

        // Right half of item 0's cell: midpoint not crossed for a backward move.
        assert_eq!(
            engine.drag_over(
                Point::new(80.0, 50.0),
                &grid,
                &tree,
                TextDirection::Ltr,
                0.0,
                Instant::now(),
            ),
            None
        );
        assert_eq!(
            engine.drag_over(
                Point::new(30.0, 50.0),
                &grid,
                &tree,
                TextDirection::Ltr,
                0.0,
                Instant::now(),
            ),
            Some(key(0))
        );
    }

    #[test]
    fn test_rtl_mirrors_edges() {
        // In RTL the first tree item renders at the right: item 0 in column 1.
        let mut grid = FakeGrid::new(2, 1);
        grid.place(key(0), 0, 1, 1, 1);
        grid.place(key(1), 0, 0, 1, 1);
        let tree = ItemTree::new(vec![Item::new(key(0)), Item::new(key(1))]);

        let mut engine = ReorderEngine::new();
        engine.start(key(0), grid.cell_center(0, 1));

        // A forward move in RTL crosses the target's center going left.
        assert_eq!(
            engine.drag_over(
                Point::new(70.0, 50.0),
                &grid,
                &tree,
                TextDirection::Rtl,
                0.0,
                Instant::now(),
            ),
            None
        );
        assert_eq!(
            engine.drag_over(
                Point::new(30.0, 50.0),
                &grid,
                &tree,
                TextDirection::Rtl,
                0.0,
                Instant::now(),
            ),
            Some(key(1))
        );
    }

    #[test]
    fn test_vertical_separation_uses_row_midpoint() {
        let mut grid = FakeGrid::new(1, 2);
        grid.place(key(0), 0, 0, 1, 1);
        grid.place(key(1), 1, 0, 1, 1);
        let tree = ItemTree::new(vec![Item::new(key(0)), Item::new(key(1))]);

        let mut engine = ReorderEngine::new();
        engine.start(key(0), grid.cell_center(0, 0));

        assert_eq!(
            engine.drag_over(
                Point::new(50.0, 120.0),
                &grid,
                &tree,
                TextDirection::Ltr,
                0.0,
                Instant::now(),
            ),
            None
        );
        assert_eq!(
            engine.drag_over(
                Point::new(50.0, 170.0),
                &grid,
                &tree,
                TextDirection::Ltr,
                0.0,
                Instant::now(),
            ),
            Some(key(1))
        );
    }

    #[test]
    fn test_self_target_ignored() {
        let (grid, tree) = two_item_setup();
        let mut engine = ReorderEngine::new();
        engine.start(key(0), grid.cell_center(0, 0));

        assert_eq!(
            engine.drag_over(
                grid.cell_center(0, 0),
                &grid,
                &tree,
                TextDirection::Ltr,
                0.0,
                Instant::now(),
            ),
            None
        );
    }

    #[test]
    fn test_debounce_suppresses_until_deadline() {
        let (grid, tree) = two_item_setup();
        let mut engine = ReorderEngine::new();
        engine.start(key(0), grid.cell_center(0, 0));

        let t0 = Instant::now();
        engine.note_moved(Duration::from_millis(200), t0);

        let suppressed = engine.drag_over(
            Point::new(160.0, 50.0),
            &grid,
            &tree,
            TextDirection::Ltr,
            0.0,
            t0 + Duration::from_millis(100),
        );
        assert_eq!(suppressed, None);

        let allowed = engine.drag_over(
            Point::new(160.0, 50.0),
            &grid,
            &tree,
            TextDirection::Ltr,
            0.0,
            t0 + Duration::from_millis(250),
        );
        assert_eq!(allowed, Some(key(1)));
    }

    #[test]
    fn test_unrendered_target_is_no_target() {
        let (mut grid, tree) = two_item_setup();
        let mut engine = ReorderEngine::new();
        engine.start(key(0), grid.cell_center(0, 0));

        // Host renderer has not populated anything yet.
        grid.clear();
        assert_eq!(
            engine.drag_over(
                Point::new(160.0, 50.0),
                &grid,
                &tree,
                TextDirection::Ltr,
                0.0,
                Instant::now(),
            ),
            None
        );
    }

    #[test]
    fn test_empty_area_snaps_to_nearest_in_row() {
        let mut grid = FakeGrid::new(3, 1);
        grid.place(key(0), 0, 0, 1, 1);
        grid.place(key(1), 0, 1, 1, 1);
        // Column 2 is empty.
        let tree = ItemTree::new(vec![Item::new(key(0)), Item::new(key(1))]);

        let mut engine = ReorderEngine::new();
        engine.start(key(0), grid.cell_center(0, 0));

        // Hovering the empty cell targets the nearest item in the row (1),
        // and the pointer is past 1's trailing midpoint.
        assert_eq!(
            engine.drag_over(
                grid.cell_center(0, 2),
                &grid,
                &tree,
                TextDirection::Ltr,
                0.0,
                Instant::now(),
            ),
            Some(key(1))
        );
    }

    #[test]
    fn test_end_reports_whether_moved() {
        let (grid, _tree) = two_item_setup();
        let mut engine = ReorderEngine::new();

        engine.start(key(0), grid.cell_center(0, 0));
        assert_eq!(engine.end(), Some((key(0), false)));

        engine.start(key(0), grid.cell_center(0, 0));
        engine.note_moved(Duration::ZERO, Instant::now());
        assert_eq!(engine.end(), Some((key(0), true)));
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_second_start_refused() {
        let mut engine = ReorderEngine::new();
        assert!(engine.start(key(0), Point::ZERO));
        assert!(!engine.start(key(1), Point::ZERO));
        assert_eq!(engine.session().unwrap().dragged(), key(0));
    }
}
