//! The resize engine.
//!
//! Pointer-driven resizing happens in discrete track steps: each time the
//! pointer travels more than half a column width (or row height) past the
//! last committed threshold, one span step is produced and the threshold
//! origin is re-baselined by a full track, so the next step requires another
//! full track's travel. The keyboard path bypasses geometry entirely and
//! applies discrete steps directly.
//!
//! Clamping (span >= 1, colspan <= visible columns, vertical resize only with
//! a configured minimum row height) is applied by the editor when the steps
//! are committed to the tree.

use gridboard_core::logging::targets;

use crate::geometry::{Point, TextDirection};
use crate::model::ItemKey;

/// Ephemeral state of one pointer resize interaction.
#[derive(Debug, Clone, Copy)]
struct ResizeSession {
    /// The item being resized.
    key: ItemKey,
    /// Threshold origin; re-baselined after each committed step.
    origin: Point,
}

/// Signed span steps produced by one pointer update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanSteps {
    pub colspan: i32,
    pub rowspan: i32,
}

impl SpanSteps {
    /// True when no step was produced.
    pub fn is_zero(&self) -> bool {
        self.colspan == 0 && self.rowspan == 0
    }
}

/// Turns pointer drag deltas into discrete span steps.
///
/// At most one session is active at a time; a new `start` while active is
/// refused, matching the one-interaction-at-a-time model.
#[derive(Debug, Default)]
pub struct ResizeEngine {
    session: Option<ResizeSession>,
}

impl ResizeEngine {
    /// Creates an idle resize engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// The item currently being resized, if any.
    pub fn active(&self) -> Option<ItemKey> {
        self.session.map(|session| session.key)
    }

    /// Begins a pointer resize from the handle-press position.
    ///
    /// Returns `false` if a session is already active.
    pub fn start(&mut self, key: ItemKey, at: Point) -> bool {
        if self.session.is_some() {
            return false;
        }
        tracing::debug!(target: targets::RESIZE, item = key.raw(), "resize started");
        self.session = Some(ResizeSession { key, origin: at });
        true
    }

    /// Feeds a pointer position, returning the span steps that crossed their
    /// threshold since the last re-baseline.
    ///
    /// `row_height` is `None` while no minimum row height is configured;
    /// vertical movement then never produces steps. In RTL the horizontal
    /// axis is mirrored: moving toward the reading-direction end grows.
    pub fn update(
        &mut self,
        pos: Point,
        col_width: f32,
        row_height: Option<f32>,
        direction: TextDirection,
    ) -> SpanSteps {
        let Some(session) = self.session.as_mut() else {
            return SpanSteps::default();
        };

        let mut steps = SpanSteps::default();

        if col_width > 0.0 {
            let mirror = match direction {
                TextDirection::Ltr => 1.0,
                TextDirection::Rtl => -1.0,
            };
            let mut dx = (pos.x - session.origin.x) * mirror;
            while dx > col_width / 2.0 {
                steps.colspan += 1;
                dx -= col_width;
                session.origin.x += col_width * mirror;
            }
            while dx < -col_width / 2.0 {
                steps.colspan -= 1;
                dx += col_width;
                session.origin.x -= col_width * mirror;
            }
        }

        if let Some(row_height) = row_height.filter(|height| *height > 0.0) {
            let mut dy = pos.y - session.origin.y;
            while dy > row_height / 2.0 {
                steps.rowspan += 1;
                dy -= row_height;
                session.origin.y += row_height;
            }
            while dy < -row_height / 2.0 {
                steps.rowspan -= 1;
                dy += row_height;
                session.origin.y -= row_height;
            }
        }

        if !steps.is_zero() {
            tracing::trace!(
                target: targets::RESIZE,
                item = session.key.raw(),
                colspan_steps = steps.colspan,
                rowspan_steps = steps.rowspan,
                "resize threshold crossed"
            );
        }
        steps
    }

    /// Ends the session, returning the item that was being resized.
    pub fn end(&mut self) -> Option<ItemKey> {
        let key = self.session.take().map(|session| session.key);
        if let Some(key) = key {
            tracing::debug!(target: targets::RESIZE, item = key.raw(), "resize ended");
        }
        key
    }

    /// Discards the session without committing anything further.
    pub fn cancel(&mut self) {
        self.session = None;
    }
}
