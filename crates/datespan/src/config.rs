//! Optional label overrides consumed from the host.
//!
//! [`Configs`] is read-only input: the picker core never mutates it, and
//! only the (out-of-scope) shortcut panel and footer render its contents.
//! It is serde-enabled so hosts can load it from their settings files.

use serde::{Deserialize, Serialize};

/// Label overrides for the shortcut panel and footer.
///
/// All fields are optional; `None` means "use the built-in label".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configs {
    /// Shortcut panel labels, or `None` to hide the panel overrides.
    pub shortcuts: Option<ShortcutLabels>,
    /// Footer button labels.
    pub footer: Option<FooterLabels>,
}

/// Labels for the shortcut panel entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutLabels {
    /// Label for the "today" shortcut.
    pub today: Option<String>,
    /// Label for the "yesterday" shortcut.
    pub yesterday: Option<String>,
    /// Template for the "last N days" shortcuts. `{n}` is replaced with the
    /// day count, e.g. `"Last {n} days"`.
    pub past: Option<String>,
    /// Label for the "current month" shortcut.
    pub current_month: Option<String>,
    /// Label for the "past month" shortcut.
    pub past_month: Option<String>,
}

impl ShortcutLabels {
    /// Render the "last N days" label for `days`, if a template is set.
    pub fn past_label(&self, days: u32) -> Option<String> {
        self.past
            .as_ref()
            .map(|template| template.replace("{n}", &days.to_string()))
    }
}

/// Labels for the footer buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterLabels {
    /// Label for the cancel button.
    pub cancel: Option<String>,
    /// Label for the apply button.
    pub apply: Option<String>,
}
