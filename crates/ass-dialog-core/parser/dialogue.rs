//! Dialogue line parser
//!
//! Extracts one [`DialogueRecord`] from a raw `Dialogue:` line of the
//! `[Events]` section. Field positions follow the default ASS event format:
//!
//! ```text
//! Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
//! ```
//!
//! The parser runs as a fixed sequence of [`ParseStep`]s and stops at the first
//! step that cannot find what it needs. Text fields are truncated to their
//! [`FieldLimits`] instead of failing the line.
//!
//! # Example
//!
//! ```rust
//! use ass_dialog_core::parser::DialogueParser;
//!
//! let parser = DialogueParser::default();
//! let record = parser.parse(b"Dialogue: 0,0:00:01.00,0:00:02.50,Default,Bob,0,0,0,,Hi, there\n")?;
//! assert_eq!(record.actor, b"Bob");
//! assert_eq!(record.text, b"Hi, there");
//! assert_eq!(record.end.to_centis(), 250);
//! # Ok::<(), ass_dialog_core::parser::ParseError>(())
//! ```

use alloc::borrow::Cow;

use super::{
    cursor::ByteCursor,
    errors::{ParseError, ParseStep},
    limits::{bounded_copy, FieldLimits},
};
use crate::time::{FrameRateRatio, Timestamp};

/// Literal that opens every dialogue event line
pub const DIALOGUE_PREFIX: &[u8] = b"Dialogue:";

/// Integers in the `layer,h:m:s.cs,h:m:s.cs` header
pub const HEADER_VALUES: usize = 9;

/// Commas between the start of the line and the style field
const HEADER_COMMAS: usize = 3;

/// Commas spanning the MarginL, MarginR and MarginV fields
const MARGIN_COMMAS: usize = 3;

/// One accepted dialogue event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogueRecord {
    /// Drawing layer, not range checked
    pub layer: i32,
    /// Start time as scanned
    pub start: Timestamp,
    /// End time as scanned
    pub end: Timestamp,
    /// Style name
    pub style: Vec<u8>,
    /// Actor (speaker) name
    pub actor: Vec<u8>,
    /// Effect field
    pub effect: Vec<u8>,
    /// Dialogue text, commas included
    pub text: Vec<u8>,
}

impl DialogueRecord {
    /// Style name for display
    #[must_use]
    pub fn style_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.style)
    }

    /// Actor name for display
    #[must_use]
    pub fn actor_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.actor)
    }

    /// Effect for display
    #[must_use]
    pub fn effect_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.effect)
    }

    /// Text for display
    #[must_use]
    pub fn text_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }

    /// Copy with both times rescaled and normalized
    #[must_use]
    pub fn rescaled(mut self, ratio: FrameRateRatio) -> Self {
        self.start = self.start.rescaled(ratio);
        self.end = self.end.rescaled(ratio);
        self
    }
}

/// Parser for single dialogue lines
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogueParser {
    /// Truncation limits for extracted fields
    limits: FieldLimits,
}

impl DialogueParser {
    /// Create a parser with the given field limits
    #[must_use]
    pub const fn new(limits: FieldLimits) -> Self {
        Self { limits }
    }

    /// Field limits in effect
    #[must_use]
    pub const fn limits(&self) -> FieldLimits {
        self.limits
    }

    /// Parse one line into a record
    ///
    /// The line may include its trailing `\n` or `\r\n`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] naming the step that failed. Callers processing
    /// a stream should skip the line and continue.
    pub fn parse(&self, line: &[u8]) -> Result<DialogueRecord, ParseError> {
        let (layer, start, end) = recognize(line)?;

        let mut cursor = ByteCursor::new(line);
        cursor
            .skip_past(b',', HEADER_COMMAS)
            .map_err(|found| ParseError::MissingFields {
                step: ParseStep::HeaderSkip,
                expected: HEADER_COMMAS,
                found,
            })?;

        let style = comma_field(&mut cursor, ParseStep::Style, self.limits.style)?;
        let actor = comma_field(&mut cursor, ParseStep::Actor, self.limits.actor)?;

        cursor
            .skip_past(b',', MARGIN_COMMAS)
            .map_err(|found| ParseError::MissingFields {
                step: ParseStep::MarginSkip,
                expected: MARGIN_COMMAS,
                found,
            })?;

        let effect = comma_field(&mut cursor, ParseStep::Effect, self.limits.effect)?;
        let text = bounded_copy(cursor.take_line_rest(), self.limits.text);

        Ok(DialogueRecord {
            layer,
            start,
            end,
            style,
            actor,
            effect,
            text,
        })
    }
}

/// Parse a line with default field limits
///
/// # Errors
///
/// See [`DialogueParser::parse`].
pub fn parse_dialogue_line(line: &[u8]) -> Result<DialogueRecord, ParseError> {
    DialogueParser::default().parse(line)
}

/// Read a comma-terminated field and truncate it to `limit`
fn comma_field(
    cursor: &mut ByteCursor<'_>,
    step: ParseStep,
    limit: usize,
) -> Result<Vec<u8>, ParseError> {
    cursor
        .take_until(b',')
        .map(|field| bounded_copy(field, limit))
        .ok_or(ParseError::MissingDelimiter { step })
}

/// Match `Dialogue: %d,%d:%d:%d.%d,%d:%d:%d.%d`
fn recognize(line: &[u8]) -> Result<(i32, Timestamp, Timestamp), ParseError> {
    let mut scan = HeaderScan {
        cursor: ByteCursor::new(line),
        matched: 0,
    };

    scan.literal(DIALOGUE_PREFIX)?;
    scan.cursor.skip_whitespace();
    let layer = scan.layer()?;
    scan.literal(b",")?;
    let start = scan.timestamp()?;
    scan.literal(b",")?;
    let end = scan.timestamp()?;

    debug_assert_eq!(scan.matched, HEADER_VALUES);
    Ok((layer, start, end))
}

/// Header scanner that counts converted integers
struct HeaderScan<'a> {
    /// Cursor over the whole line
    cursor: ByteCursor<'a>,
    /// Integers converted so far
    matched: usize,
}

impl HeaderScan<'_> {
    /// Error carrying the number of integers matched so far
    const fn mismatch(&self) -> ParseError {
        ParseError::NotDialogue {
            matched: self.matched,
        }
    }

    fn literal(&mut self, literal: &[u8]) -> Result<(), ParseError> {
        if self.cursor.eat_literal(literal) {
            Ok(())
        } else {
            Err(self.mismatch())
        }
    }

    fn layer(&mut self) -> Result<i32, ParseError> {
        let layer = self
            .cursor
            .scan_signed()
            .and_then(|value| i32::try_from(value).ok())
            .ok_or_else(|| self.mismatch())?;
        self.matched += 1;
        Ok(layer)
    }

    fn component(&mut self) -> Result<u32, ParseError> {
        let value = self
            .cursor
            .scan_unsigned()
            .and_then(|value| u32::try_from(value).ok())
            .ok_or_else(|| self.mismatch())?;
        self.matched += 1;
        Ok(value)
    }

    fn hours(&mut self) -> Result<u64, ParseError> {
        let hours = self.cursor.scan_unsigned().ok_or_else(|| self.mismatch())?;
        self.matched += 1;
        Ok(hours)
    }

    fn timestamp(&mut self) -> Result<Timestamp, ParseError> {
        let hours = self.hours()?;
        self.literal(b":")?;
        let minutes = self.component()?;
        self.literal(b":")?;
        let seconds = self.component()?;
        self.literal(b".")?;
        let centiseconds = self.component()?;
        Ok(Timestamp::new(hours, minutes, seconds, centiseconds))
    }
}
