//! Geometry configuration supplied by the host.
//!
//! These values are inputs to the engine, not computed by it: they constrain
//! the resize engine's clamps and parameterize the reorder engine's edge
//! selection and debounce. The surrounding layout engine consumes the same
//! values to produce actual pixel geometry.

use std::time::Duration;

use crate::geometry::TextDirection;

/// Host-supplied layout constraints and interaction tuning.
///
/// # Example
///
/// ```
/// use gridboard::config::DashboardConfig;
///
/// let config = DashboardConfig::default()
///     .with_max_column_count(4)
///     .with_min_row_height(100.0);
/// assert!(config.vertical_resize_enabled());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Minimum rendered column width, in pixels.
    pub min_column_width: f32,
    /// Maximum rendered column width, if constrained.
    pub max_column_width: Option<f32>,
    /// Maximum number of columns, if constrained.
    pub max_column_count: Option<usize>,
    /// Minimum row height. Row boundaries are ill-defined without it, so
    /// vertical resize is a no-op while this is `None`.
    pub min_row_height: Option<f32>,
    /// Gap between cells, in pixels.
    pub spacing: f32,
    /// Reading direction; mirrors the reorder engine's start/end edges.
    pub text_direction: TextDirection,
    /// Cool-down after a committed reorder before another can trigger.
    pub reorder_debounce: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            min_column_width: 200.0,
            max_column_width: None,
            max_column_count: None,
            min_row_height: None,
            spacing: 16.0,
            text_direction: TextDirection::Ltr,
            reorder_debounce: Duration::from_millis(200),
        }
    }
}

impl DashboardConfig {
    /// Sets the minimum column width.
    pub fn with_min_column_width(mut self, width: f32) -> Self {
        self.min_column_width = width;
        self
    }

    /// Sets the maximum column width.
    pub fn with_max_column_width(mut self, width: f32) -> Self {
        self.max_column_width = Some(width);
        self
    }

    /// Sets the maximum column count.
    pub fn with_max_column_count(mut self, count: usize) -> Self {
        self.max_column_count = Some(count);
        self
    }

    /// Sets the minimum row height, enabling vertical resize.
    pub fn with_min_row_height(mut self, height: f32) -> Self {
        self.min_row_height = Some(height);
        self
    }

    /// Sets the cell spacing.
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the reading direction.
    pub fn with_text_direction(mut self, direction: TextDirection) -> Self {
        self.text_direction = direction;
        self
    }

    /// Sets the reorder cool-down window.
    pub fn with_reorder_debounce(mut self, debounce: Duration) -> Self {
        self.reorder_debounce = debounce;
        self
    }

    /// Whether vertical resize is currently meaningful.
    pub fn vertical_resize_enabled(&self) -> bool {
        self.min_row_height.is_some()
    }
}
