//! Logging facilities for Datespan.
//!
//! Datespan uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! Signal emission and tick draining log at `trace`; commits and placement
//! decisions in the widget crate log at `debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "datespan_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "datespan_core::signal";
    /// Tick scheduler target.
    pub const SCHEDULER: &str = "datespan_core::scheduler";
    /// Picker state owner target.
    pub const STATE: &str = "datespan::state";
    /// Popup placement and reveal target.
    pub const POPUP: &str = "datespan::popup";
}
