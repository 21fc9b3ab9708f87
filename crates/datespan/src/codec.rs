//! Text ⇄ range codec.
//!
//! [`RangeCodec`] turns the raw text buffer into a pair of candidate tokens
//! and a committed [`Period`] back into display text. Decoding is strictly
//! offset-based: the rendered text is, by contract,
//! `start + " " + separator + " " + end`, so the start token lives in chars
//! `[0, L)` and the end token starts at `L + separator_len + 2`, where `L`
//! is the template length. No tokenizing happens beyond slicing at those
//! offsets — the buffer holds partial, in-progress text most of the time,
//! and fixed windows are the only way to attribute characters to tokens
//! while the user is still typing.

use crate::format::{DisplayFormat, ISO_TOKEN_LEN};
use crate::period::Period;

/// The two candidate tokens extracted from the text buffer.
///
/// Both are normalized `YYYY-MM-DD` candidates (possibly short or
/// over-length while mid-edit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTokens {
    /// Candidate for the range start.
    pub start: String,
    /// Candidate for the range end.
    pub end: String,
}

impl RawTokens {
    /// A decode is complete only when both candidates have exactly the
    /// normalized token length. Incomplete tokens are never validated and
    /// never commit.
    pub fn is_complete(&self) -> bool {
        self.start.chars().count() == ISO_TOKEN_LEN && self.end.chars().count() == ISO_TOKEN_LEN
    }
}

/// Offset-based codec between display text and date pairs.
///
/// # Example
///
/// ```
/// use datespan::{DisplayFormat, RangeCodec};
///
/// let codec = RangeCodec::new(DisplayFormat::iso(), "~");
/// let tokens = codec.decode("2024-01-05 ~ 2024-01-10");
/// assert_eq!(tokens.start, "2024-01-05");
/// assert_eq!(tokens.end, "2024-01-10");
/// assert!(tokens.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeCodec {
    format: DisplayFormat,
    separator: String,
}

impl RangeCodec {
    /// Create a codec over a format template and range separator.
    pub fn new(format: DisplayFormat, separator: impl Into<String>) -> Self {
        Self {
            format,
            separator: separator.into(),
        }
    }

    /// The format template.
    pub fn format(&self) -> &DisplayFormat {
        &self.format
    }

    /// The range separator.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Char offset where the end token starts in the rendered text.
    fn end_offset(&self) -> usize {
        // start + " " + separator + " "
        self.format.char_len() + 1 + self.separator.chars().count() + 1
    }

    /// Slice the buffer into two fixed windows and normalize each.
    pub fn decode(&self, text: &str) -> RawTokens {
        let chars: Vec<char> = text.chars().collect();
        let template_len = self.format.char_len();

        let start_window: String = chars[..template_len.min(chars.len())].iter().collect();
        let end_window: String = if chars.len() > self.end_offset() {
            chars[self.end_offset()..].iter().collect()
        } else {
            String::new()
        };

        RawTokens {
            start: self.format.extract_candidate(&start_window),
            end: self.format.extract_candidate(&end_window),
        }
    }

    /// Render a period back into display text.
    ///
    /// A complete period renders as `start + " " + separator + " " + end`;
    /// in single-date mode only the start token is rendered. A period with
    /// only a start endpoint renders as the start token; an empty period
    /// renders as the empty string.
    pub fn encode(&self, period: &Period, single: bool) -> String {
        match (period.start(), period.end()) {
            (Some(start), Some(end)) if !single => format!(
                "{} {} {}",
                self.format.format_date(start),
                self.separator,
                self.format.format_date(end)
            ),
            (Some(start), _) => self.format.format_date(start),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn iso_codec(separator: &str) -> RangeCodec {
        RangeCodec::new(DisplayFormat::iso(), separator)
    }

    #[test]
    fn test_decode_complete_range() {
        let codec = iso_codec("to");
        let tokens = codec.decode("2024-01-05 to 2024-01-10");
        assert_eq!(tokens.start, "2024-01-05");
        assert_eq!(tokens.end, "2024-01-10");
        assert!(tokens.is_complete());
    }

    #[test]
    fn test_decode_truncated_end_token() {
        let codec = iso_codec("to");
        let tokens = codec.decode("2024-01-05 to 2024-01-0");
        assert_eq!(tokens.start, "2024-01-05");
        assert_eq!(tokens.end, "2024-01-0");
        assert!(!tokens.is_complete());
    }

    #[test]
    fn test_decode_start_only() {
        let codec = iso_codec("~");
        let tokens = codec.decode("2024-01-05");
        assert_eq!(tokens.start, "2024-01-05");
        assert_eq!(tokens.end, "--");
        assert!(!tokens.is_complete());
    }

    #[test]
    fn test_decode_empty_buffer() {
        let codec = iso_codec("~");
        let tokens = codec.decode("");
        assert_eq!(tokens.start, "--");
        assert!(!tokens.is_complete());
    }

    #[test]
    fn test_decode_trailing_garbage_stays_incomplete() {
        let codec = iso_codec("~");
        let tokens = codec.decode("2024-01-05 ~ 2024-01-100");
        assert_eq!(tokens.end, "2024-01-100");
        assert!(!tokens.is_complete());
    }

    #[test]
    fn test_decode_multichar_separator_offsets() {
        let codec = iso_codec("until");
        let tokens = codec.decode("2024-01-05 until 2024-01-10");
        assert_eq!(tokens.end, "2024-01-10");
        assert!(tokens.is_complete());
    }

    #[test]
    fn test_encode_range() {
        let codec = iso_codec("~");
        let period = Period::from_range(date(2024, 1, 5), date(2024, 1, 10)).unwrap();
        assert_eq!(codec.encode(&period, false), "2024-01-05 ~ 2024-01-10");
    }

    #[test]
    fn test_encode_single_mode_renders_start_only() {
        let codec = iso_codec("~");
        let period = Period::from_range(date(2024, 1, 5), date(2024, 1, 10)).unwrap();
        assert_eq!(codec.encode(&period, true), "2024-01-05");
    }

    #[test]
    fn test_encode_empty_period() {
        let codec = iso_codec("~");
        assert_eq!(codec.encode(&Period::empty(), false), "");
    }

    #[test]
    fn test_round_trip() {
        let codec = iso_codec("to");
        let period = Period::from_range(date(2023, 11, 30), date(2024, 2, 29)).unwrap();
        let tokens = codec.decode(&codec.encode(&period, false));
        assert_eq!(tokens.start, "2023-11-30");
        assert_eq!(tokens.end, "2024-02-29");
        assert!(tokens.is_complete());
    }

    #[test]
    fn test_round_trip_non_iso_template() {
        let format = DisplayFormat::parse("DD/MM/YYYY").unwrap();
        let codec = RangeCodec::new(format, "-");
        let period = Period::from_range(date(2024, 1, 5), date(2024, 1, 10)).unwrap();
        let text = codec.encode(&period, false);
        assert_eq!(text, "05/01/2024 - 10/01/2024");

        let tokens = codec.decode(&text);
        assert_eq!(tokens.start, "2024-01-05");
        assert_eq!(tokens.end, "2024-01-10");
    }
}
