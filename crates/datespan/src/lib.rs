//! Datespan - a headless date-range input engine.
//!
//! Datespan is the text-entry half of a date-range picker: it keeps a
//! free-form text buffer and a structured start/end date pair in sync, and
//! decides where (and in what order of animation phases) the popup calendar
//! panel appears relative to its anchor. Rendering is the host's job; this
//! crate only owns state, parsing, validation, and placement.
//!
//! # Architecture
//!
//! - [`DatepickerState`] owns all shared mutable state (period, hover day,
//!   text buffer, option surface) and is shared by `Arc`.
//! - [`RangeCodec`] + [`DisplayFormat`] translate between display text and
//!   candidate date tokens using fixed char offsets.
//! - [`DateTokenValidator`] decides whether a candidate is a real calendar
//!   date.
//! - [`PopupPositioner`] + [`PanelView`] drive placement (below/above the
//!   anchor) and the two-tick staged reveal.
//! - [`InputController`] wires focus and trailing-button clicks to the
//!   above.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use datespan::{AnchorEvents, DatepickerState, InputController, PanelView, PopupPositioner};
//! use datespan_core::TickScheduler;
//!
//! let state = Arc::new(DatepickerState::new().with_separator("to"));
//! let panel = Arc::new(PanelView::new());
//! let scheduler = Arc::new(TickScheduler::new());
//! let positioner = Arc::new(PopupPositioner::new(&panel, scheduler.clone()));
//! let events = Arc::new(AnchorEvents::new());
//!
//! let controller = InputController::new(state.clone(), positioner, events.clone());
//!
//! // Focus opens the panel; a complete valid range commits and closes it.
//! events.focus_in.emit(());
//! scheduler.run_pending();
//! let outcome = controller.handle_text_change("2024-01-05 to 2024-01-10");
//! assert!(outcome.is_committed());
//! ```

mod codec;
mod config;
mod error;
mod format;
mod input;
mod period;
mod popup;
mod state;
mod validator;

pub use codec::{RangeCodec, RawTokens};
pub use config::{Configs, FooterLabels, ShortcutLabels};
pub use error::{Error, Result};
pub use format::{DisplayFormat, ISO_TOKEN_LEN};
pub use input::{AnchorEvents, InputController, TrailingAction};
pub use period::Period;
pub use popup::{
    ArrowEdge, PanelPhase, PanelPlacement, PanelView, PopupPositioner, RevealMetrics,
    BOTTOM_INSET, MOBILE_BREAKPOINT,
};
pub use state::{CommitOutcome, DatepickerState, EditPhase, DEFAULT_SEPARATOR};
pub use validator::{DateTokenValidator, ValidationState, Validator};
