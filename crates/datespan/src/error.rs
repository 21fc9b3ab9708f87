//! Error types for the datespan crate.

/// Result type alias for datespan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring the picker.
///
/// Runtime text entry never errors: an incomplete or invalid buffer simply
/// leaves the committed period unchanged (see
/// [`DatepickerState::try_commit`](crate::DatepickerState::try_commit)).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The display-format template cannot be used for fixed-offset slicing.
    #[error("Unsupported display format '{template}': {reason}")]
    UnsupportedTemplate { template: String, reason: String },
}

impl Error {
    /// Create an unsupported-template error.
    pub fn unsupported_template(
        template: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnsupportedTemplate {
            template: template.into(),
            reason: reason.into(),
        }
    }
}
