//! The shared picker state owner.
//!
//! [`DatepickerState`] owns every piece of mutable state the input half of
//! the picker touches: the committed [`Period`], the hover-preview day, the
//! raw text buffer, and the read-only option surface the parser needs
//! (format template, separator, single-date flag, ...). Components receive
//! it by `Arc` and mutate it only through its methods, which emit change
//! signals; there is no other write path, so the period's two endpoints
//! always change together.
//!
//! # Commit flow
//!
//! Every keystroke is an independent commit attempt: decode the buffer at
//! fixed offsets, validate both candidate tokens, check strict chronology,
//! and either promote the pair into the period ([`CommitOutcome::Committed`])
//! or change nothing at all ([`CommitOutcome::Pending`]). `Pending` is not
//! an error — it is "not yet a complete valid range" and the UI keeps
//! showing the raw text.

use chrono::NaiveDate;
use datespan_core::{Property, Signal};

use crate::codec::RangeCodec;
use crate::config::Configs;
use crate::format::DisplayFormat;
use crate::period::Period;
use crate::validator::{DateTokenValidator, ValidationState, Validator};

/// Default range separator shown between the two tokens.
pub const DEFAULT_SEPARATOR: &str = "~";

/// Result of a text commit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The buffer held a complete, valid, strictly ordered range; the
    /// period now holds it.
    Committed(Period),
    /// The buffer is incomplete or invalid; nothing changed.
    Pending,
}

impl CommitOutcome {
    /// Whether this outcome committed a period.
    pub fn is_committed(&self) -> bool {
        matches!(self, CommitOutcome::Committed(_))
    }
}

/// Derived position in the input lifecycle.
///
/// Never stored: computed from the period and the text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    /// No committed period, empty buffer.
    Empty,
    /// No committed period, buffer holds in-progress text.
    Editing,
    /// A complete period is committed.
    Committed,
}

/// The explicit owner of all shared picker state.
///
/// # Signals
///
/// - `value_changed(Period)`: the committed period was replaced
/// - `text_changed(String)`: the display buffer changed
/// - `hover_changed(Option<NaiveDate>)`: the hover-preview day changed
/// - `close_requested(())`: the popup should close
/// - `blur_requested(())`: the text input should drop focus
///
/// A commit always updates the period and hover day *before* emitting
/// `close_requested`, so a close observer never reads a stale period.
pub struct DatepickerState {
    /// Committed start/end pair.
    period: Property<Period>,
    /// Hover-preview day (derived, not authoritative).
    day_hover: Property<Option<NaiveDate>>,
    /// Raw display buffer; tracks every keystroke regardless of validity.
    input_text: Property<String>,

    // Option surface, consumed read-only by the commit path.
    display_format: Property<DisplayFormat>,
    separator: Property<String>,
    as_single: Property<bool>,
    placeholder: Property<Option<String>>,
    disabled: Property<bool>,
    read_only: Property<bool>,
    primary_color: Property<String>,
    configs: Configs,

    /// Signal emitted when the committed period changes.
    pub value_changed: Signal<Period>,
    /// Signal emitted when the display buffer changes.
    pub text_changed: Signal<String>,
    /// Signal emitted when the hover-preview day changes.
    pub hover_changed: Signal<Option<NaiveDate>>,
    /// Signal emitted when the popup should close.
    pub close_requested: Signal<()>,
    /// Signal emitted when the input should lose focus.
    pub blur_requested: Signal<()>,
}

impl DatepickerState {
    /// Create a state owner with the ISO format and default separator.
    pub fn new() -> Self {
        Self {
            period: Property::new(Period::empty()),
            day_hover: Property::new(None),
            input_text: Property::new(String::new()),
            display_format: Property::new(DisplayFormat::iso()),
            separator: Property::new(DEFAULT_SEPARATOR.to_string()),
            as_single: Property::new(false),
            placeholder: Property::new(None),
            disabled: Property::new(false),
            read_only: Property::new(false),
            primary_color: Property::new("blue".to_string()),
            configs: Configs::default(),
            value_changed: Signal::new(),
            text_changed: Signal::new(),
            hover_changed: Signal::new(),
            close_requested: Signal::new(),
            blur_requested: Signal::new(),
        }
    }

    // =========================================================================
    // Builder Pattern Methods
    // =========================================================================

    /// Set the display format using builder pattern.
    pub fn with_display_format(self, format: DisplayFormat) -> Self {
        self.display_format.set_silent(format);
        self
    }

    /// Set the range separator using builder pattern.
    pub fn with_separator(self, separator: impl Into<String>) -> Self {
        self.separator.set_silent(separator.into());
        self
    }

    /// Set single-date mode using builder pattern.
    pub fn with_single(self, single: bool) -> Self {
        self.as_single.set_silent(single);
        self
    }

    /// Set an explicit placeholder using builder pattern.
    pub fn with_placeholder(self, placeholder: impl Into<String>) -> Self {
        self.placeholder.set_silent(Some(placeholder.into()));
        self
    }

    /// Set read-only mode using builder pattern.
    pub fn with_read_only(self, read_only: bool) -> Self {
        self.read_only.set_silent(read_only);
        self
    }

    /// Set disabled mode using builder pattern.
    pub fn with_disabled(self, disabled: bool) -> Self {
        self.disabled.set_silent(disabled);
        self
    }

    /// Set the primary accent color name using builder pattern.
    pub fn with_primary_color(self, color: impl Into<String>) -> Self {
        self.primary_color.set_silent(color.into());
        self
    }

    /// Set label overrides using builder pattern.
    pub fn with_configs(mut self, configs: Configs) -> Self {
        self.configs = configs;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The committed period.
    pub fn period(&self) -> Period {
        self.period.get()
    }

    /// The hover-preview day.
    pub fn day_hover(&self) -> Option<NaiveDate> {
        self.day_hover.get()
    }

    /// The current display buffer.
    pub fn input_text(&self) -> String {
        self.input_text.get()
    }

    /// The display format template.
    pub fn display_format(&self) -> DisplayFormat {
        self.display_format.get()
    }

    /// The range separator.
    pub fn separator(&self) -> String {
        self.separator.get()
    }

    /// Whether single-date mode is active.
    pub fn is_single(&self) -> bool {
        self.as_single.get()
    }

    /// Whether the picker is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    /// Whether the picker is read-only.
    pub fn is_read_only(&self) -> bool {
        self.read_only.get()
    }

    /// The primary accent color name, passed through to the view layer.
    pub fn primary_color(&self) -> String {
        self.primary_color.get()
    }

    /// Label overrides, consumed read-only.
    pub fn configs(&self) -> &Configs {
        &self.configs
    }

    /// Set read-only mode.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    /// Set disabled mode.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    /// The placeholder to render: the explicit one if set, otherwise the
    /// format template (twice, joined by the separator, in range mode).
    pub fn placeholder_text(&self) -> String {
        if let Some(placeholder) = self.placeholder.get() {
            return placeholder;
        }
        let template = self.display_format.with(|f| f.template().to_string());
        if self.as_single.get() {
            template
        } else {
            format!("{template} {} {template}", self.separator.get())
        }
    }

    /// The codec for the current format and separator.
    pub fn codec(&self) -> RangeCodec {
        RangeCodec::new(self.display_format.get(), self.separator.get())
    }

    /// Derived lifecycle phase.
    pub fn phase(&self) -> EditPhase {
        if self.period.get().is_complete() {
            EditPhase::Committed
        } else if self.input_text.with(|t| !t.is_empty()) {
            EditPhase::Editing
        } else {
            EditPhase::Empty
        }
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Store the raw buffer, emitting `text_changed` on a real change.
    ///
    /// Always stores, regardless of validity — every keystroke stays
    /// visible.
    pub fn set_input_text(&self, raw: impl Into<String>) {
        let raw = raw.into();
        if self.input_text.set(raw.clone()) {
            self.text_changed.emit(raw);
        }
    }

    /// Replace the committed period wholesale.
    ///
    /// This is the mutator the (out-of-scope) calendar grid uses when a day
    /// is clicked; both endpoints change together or not at all.
    pub fn set_value(&self, period: Period) {
        if self.period.set(period) {
            self.value_changed.emit(period);
        }
    }

    /// Replace the hover-preview day.
    pub fn set_day_hover(&self, day: Option<NaiveDate>) {
        if self.day_hover.set(day) {
            self.hover_changed.emit(day);
        }
    }

    /// Ask the popup to close.
    pub fn request_close(&self) {
        self.close_requested.emit(());
    }

    /// Attempt to promote the raw buffer into the committed period.
    ///
    /// Decode at fixed offsets, validate both tokens, then require the start
    /// to *strictly* precede the end — equal dates stay pending, so a
    /// single-day range cannot be entered through this path. On success the
    /// period and hover day (`end − 1 day`) are updated first, then
    /// `close_requested` and `blur_requested` are emitted, in that order.
    ///
    /// On any failure the period is untouched and `Pending` is returned;
    /// this is the expected state for most keystrokes, not an error.
    pub fn try_commit(&self, raw: &str) -> CommitOutcome {
        let tokens = self.codec().decode(raw);
        if !tokens.is_complete() {
            return CommitOutcome::Pending;
        }

        let validator = DateTokenValidator::new();
        if validator.validate(&tokens.start) != ValidationState::Acceptable
            || validator.validate(&tokens.end) != ValidationState::Acceptable
        {
            return CommitOutcome::Pending;
        }

        let (Some(start), Some(end)) = (
            DateTokenValidator::parse(&tokens.start),
            DateTokenValidator::parse(&tokens.end),
        ) else {
            return CommitOutcome::Pending;
        };

        if start >= end {
            return CommitOutcome::Pending;
        }
        let Some(period) = Period::from_range(start, end) else {
            return CommitOutcome::Pending;
        };

        tracing::debug!(target: "datespan::state", %start, %end, "committing period from text");

        // State first, signals after: a close observer must see the new
        // period and hover day, never the previous ones.
        let value_changed = self.period.set(period);
        let hover = end.pred_opt();
        let hover_changed = self.day_hover.set(hover);

        if value_changed {
            self.value_changed.emit(period);
        }
        if hover_changed {
            self.hover_changed.emit(hover);
        }
        self.close_requested.emit(());
        self.blur_requested.emit(());

        CommitOutcome::Committed(period)
    }

    /// Clear for re-entry after a refocus.
    ///
    /// No-op when read-only or when the buffer is already empty. Otherwise
    /// clears the buffer, the hover day (if set), and the period (only if
    /// both endpoints were set — a half-selected period from the calendar
    /// survives). Returns whether anything was cleared.
    pub fn clear_on_reentry(&self) -> bool {
        if self.read_only.get() {
            return false;
        }
        if self.input_text.with(|t| t.is_empty()) {
            return false;
        }

        if self.input_text.set(String::new()) {
            self.text_changed.emit(String::new());
        }
        if self.day_hover.get().is_some() && self.day_hover.set(None) {
            self.hover_changed.emit(None);
        }
        if self.period.get().is_complete() && self.period.set(Period::empty()) {
            self.value_changed.emit(Period::empty());
        }

        true
    }
}

impl Default for DatepickerState {
    fn default() -> Self {
        Self::new()
    }
}
