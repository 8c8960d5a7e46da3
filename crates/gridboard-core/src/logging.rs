//! Logging facilities for Gridboard.
//!
//! Gridboard uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in the host application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! All engine subsystems log under the targets listed in [`targets`], so a
//! host can filter to a single subsystem with an `EnvFilter` directive such
//! as `gridboard::reorder=debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "gridboard_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "gridboard_core::signal";
    /// Item tree model target.
    pub const MODEL: &str = "gridboard::model";
    /// Reorder engine target.
    pub const REORDER: &str = "gridboard::reorder";
    /// Resize engine target.
    pub const RESIZE: &str = "gridboard::resize";
    /// Selection and mode state machine target.
    pub const KEYBOARD: &str = "gridboard::keyboard";
    /// Focus management target.
    pub const FOCUS: &str = "gridboard::focus";
    /// Event gateway target.
    pub const EVENTS: &str = "gridboard::events";
    /// Editor facade target.
    pub const ENGINE: &str = "gridboard::engine";
}
