//! Fixed-width display-format templates.
//!
//! A [`DisplayFormat`] describes how a date is rendered in the text field,
//! e.g. `YYYY-MM-DD` or `DD/MM/YYYY`. The template is fixed-width by
//! contract: it contains exactly one `YYYY`, one `MM`, and one `DD` run,
//! and every other character is a literal separator. The codec slices the
//! raw text buffer at the precomputed token offsets, so variable-width
//! tokens (`M`, `D`, month names) are rejected at construction — partial,
//! in-progress text can only be windowed reliably when every token has a
//! fixed position.

use std::fmt;
use std::ops::Range;

use chrono::{Datelike, NaiveDate};

use crate::error::{Error, Result};

/// Length of a normalized `YYYY-MM-DD` candidate token.
pub const ISO_TOKEN_LEN: usize = 10;

/// A fixed-width date format template.
///
/// Token positions are precomputed char ranges into the rendered text, so
/// extraction and formatting are pure offset work.
///
/// # Example
///
/// ```
/// use datespan::DisplayFormat;
///
/// let format = DisplayFormat::parse("DD/MM/YYYY").unwrap();
/// assert_eq!(format.char_len(), 10);
/// assert_eq!(format.extract_candidate("05/01/2024"), "2024-01-05");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFormat {
    template: String,
    year: Range<usize>,
    month: Range<usize>,
    day: Range<usize>,
}

impl DisplayFormat {
    /// The ISO template, `YYYY-MM-DD`.
    pub fn iso() -> Self {
        Self {
            template: "YYYY-MM-DD".to_string(),
            year: 0..4,
            month: 5..7,
            day: 8..10,
        }
    }

    /// Parse a template string into a format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedTemplate`] when the template is not
    /// fixed-width: a token run of the wrong length (`YY`, `MMM`, ...), a
    /// duplicate or missing token, or an alphanumeric literal.
    pub fn parse(template: &str) -> Result<Self> {
        let chars: Vec<char> = template.chars().collect();
        let mut year: Option<Range<usize>> = None;
        let mut month: Option<Range<usize>> = None;
        let mut day: Option<Range<usize>> = None;

        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            let start = i;
            while i < chars.len() && chars[i] == c {
                i += 1;
            }
            let run = start..i;

            let (slot, expected) = match c {
                'Y' => (&mut year, 4),
                'M' => (&mut month, 2),
                'D' => (&mut day, 2),
                c if c.is_alphanumeric() => {
                    return Err(Error::unsupported_template(
                        template,
                        format!("'{c}' is not a supported token or separator"),
                    ));
                }
                // Literal separator run.
                _ => {
                    continue;
                }
            };

            if run.len() != expected {
                return Err(Error::unsupported_template(
                    template,
                    format!(
                        "token '{}' has width {}, expected {} (variable-width tokens are not supported)",
                        c,
                        run.len(),
                        expected
                    ),
                ));
            }
            if slot.is_some() {
                return Err(Error::unsupported_template(
                    template,
                    format!("token '{c}' appears more than once"),
                ));
            }
            *slot = Some(run);
        }

        let missing = |name: &str| Error::unsupported_template(template, format!("missing {name} token"));
        Ok(Self {
            template: template.to_string(),
            year: year.ok_or_else(|| missing("YYYY"))?,
            month: month.ok_or_else(|| missing("MM"))?,
            day: day.ok_or_else(|| missing("DD"))?,
        })
    }

    /// The template string.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Rendered token length in chars.
    pub fn char_len(&self) -> usize {
        self.template.chars().count()
    }

    /// Extract a normalized `YYYY-MM-DD` candidate from a text window.
    ///
    /// Characters are taken positionally at the template's token offsets and
    /// rejoined with dashes; separator positions in the window are never
    /// inspected, so a window typed with the "wrong" separators still yields
    /// its digits. The token that ends the template is open-tailed: it takes
    /// everything remaining in the window, so trailing garbage produces an
    /// over-length candidate instead of being silently dropped. A window
    /// shorter than the template yields a short candidate. Either way a
    /// candidate whose length is not exactly [`ISO_TOKEN_LEN`] is treated by
    /// callers as incomplete, never committed.
    pub fn extract_candidate(&self, window: &str) -> String {
        let chars: Vec<char> = window.chars().collect();
        let template_end = self.char_len();
        let piece = |range: &Range<usize>| -> String {
            let end = if range.end == template_end {
                chars.len().max(range.start)
            } else {
                range.end.min(chars.len())
            };
            if range.start >= end {
                String::new()
            } else {
                chars[range.start..end].iter().collect()
            }
        };
        format!("{}-{}-{}", piece(&self.year), piece(&self.month), piece(&self.day))
    }

    /// Render `date` through the template.
    pub fn format_date(&self, date: NaiveDate) -> String {
        let mut out = String::with_capacity(self.template.len());
        let chars: Vec<char> = self.template.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            let start = i;
            while i < chars.len() && chars[i] == c {
                i += 1;
            }
            match c {
                'Y' => out.push_str(&format!("{:04}", date.year())),
                'M' => out.push_str(&format!("{:02}", date.month())),
                'D' => out.push_str(&format!("{:02}", date.day())),
                _ => out.extend(std::iter::repeat(c).take(i - start)),
            }
        }
        out
    }
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self::iso()
    }
}

impl fmt::Display for DisplayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}
