//! Focus and click choreography for the anchor input.
//!
//! The anchor is the text field plus a trailing button that sits over its
//! icon — clicking that button is the only reliable way to refocus the
//! field. [`InputController`] wires three interactions together:
//!
//! - trailing button pressed → request focus, then clear committed text for
//!   re-entry
//! - input focused → reveal the popup panel
//! - state requests close (after a commit) → conceal the panel
//!
//! Subscriptions are scoped: [`bind`](InputController::bind) releases any
//! existing connection before acquiring a new one, so each interaction has
//! at most one live listener at any time, and dropping the controller
//! disconnects everything. Handlers read current state through shared
//! handles rather than captured copies, so re-binding is listener hygiene,
//! not a correctness crutch.

use std::sync::Arc;

use datespan_core::{ConnectionId, Signal};

use crate::popup::PopupPositioner;
use crate::state::{CommitOutcome, DatepickerState};

/// What the trailing button does (and which icon it shows).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingAction {
    /// Buffer holds text: the button clears it (clear icon).
    Clear,
    /// Buffer is empty: the button opens the calendar (calendar icon).
    OpenCalendar,
}

/// Signals the view layer emits for the anchor input.
///
/// Owned by the view layer and shared with the controller by `Arc`.
#[derive(Default)]
pub struct AnchorEvents {
    /// The text input gained focus.
    pub focus_in: Signal<()>,
    /// The trailing button was pressed.
    pub trailing_pressed: Signal<()>,
}

impl AnchorEvents {
    /// Create a new event set.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Owns the open/close/clear behavior of the anchor input.
///
/// # Signals
///
/// - `focus_requested(())`: the view layer should focus the text input
pub struct InputController {
    state: Arc<DatepickerState>,
    positioner: Arc<PopupPositioner>,
    events: Arc<AnchorEvents>,
    focus_requested: Arc<Signal<()>>,

    focus_conn: Option<ConnectionId>,
    click_conn: Option<ConnectionId>,
    close_conn: Option<ConnectionId>,
}

impl InputController {
    /// Create a controller and bind its listeners.
    pub fn new(
        state: Arc<DatepickerState>,
        positioner: Arc<PopupPositioner>,
        events: Arc<AnchorEvents>,
    ) -> Self {
        let mut controller = Self {
            state,
            positioner,
            events,
            focus_requested: Arc::new(Signal::new()),
            focus_conn: None,
            click_conn: None,
            close_conn: None,
        };
        controller.bind();
        controller
    }

    /// Signal asking the view layer to focus the text input.
    pub fn focus_requested(&self) -> &Signal<()> {
        &self.focus_requested
    }

    /// The shared state owner.
    pub fn state(&self) -> &Arc<DatepickerState> {
        &self.state
    }

    /// (Re)register all listeners.
    ///
    /// Any existing connections are released first, guaranteeing at most
    /// one live listener per interaction. Call again after swapping out a
    /// captured dependency (panel, events source).
    pub fn bind(&mut self) {
        self.unbind();

        let state = self.state.clone();
        let focus_requested = self.focus_requested.clone();
        self.click_conn = Some(self.events.trailing_pressed.connect(move |()| {
            if state.is_disabled() {
                return;
            }
            focus_requested.emit(());
            state.clear_on_reentry();
        }));

        let state = self.state.clone();
        let positioner = self.positioner.clone();
        self.focus_conn = Some(self.events.focus_in.connect(move |()| {
            if state.is_disabled() {
                return;
            }
            positioner.reveal();
        }));

        let positioner = self.positioner.clone();
        self.close_conn = Some(self.state.close_requested.connect(move |()| {
            positioner.conceal();
        }));
    }

    /// Release all listeners.
    pub fn unbind(&mut self) {
        if let Some(id) = self.click_conn.take() {
            self.events.trailing_pressed.disconnect(id);
        }
        if let Some(id) = self.focus_conn.take() {
            self.events.focus_in.disconnect(id);
        }
        if let Some(id) = self.close_conn.take() {
            self.state.close_requested.disconnect(id);
        }
    }

    /// Handle a keystroke in the text input.
    ///
    /// Attempts a commit first, then stores the raw buffer either way, as
    /// the buffer must track every keystroke. Disabled or read-only inputs
    /// accept no edits.
    pub fn handle_text_change(&self, raw: &str) -> CommitOutcome {
        if self.state.is_disabled() || self.state.is_read_only() {
            return CommitOutcome::Pending;
        }
        let outcome = self.state.try_commit(raw);
        self.state.set_input_text(raw);
        outcome
    }

    /// The trailing button's current action/icon.
    pub fn trailing_action(&self) -> TrailingAction {
        if self.state.input_text().is_empty() {
            TrailingAction::OpenCalendar
        } else {
            TrailingAction::Clear
        }
    }
}

impl Drop for InputController {
    fn drop(&mut self) {
        self.unbind();
    }
}
