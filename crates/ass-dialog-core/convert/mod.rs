//! Line-by-line conversion of dialogue events to templated output
//!
//! A [`Converter`] owns the compiled template and the rescale ratio, both fixed
//! at construction. [`Converter::run`] reads bounded lines, renders every
//! accepted dialogue line and silently skips the rest.
//!
//! # Example
//!
//! ```rust
//! use ass_dialog_core::convert::{ConvertOptions, Converter};
//!
//! let input = b"[Events]\nDialogue: 0,0:01:02.50,0:01:05.75,Default,Bob,0,0,0,,Hello, world!\n";
//! let mut output = Vec::new();
//! let report = Converter::new(ConvertOptions::default()).run(&input[..], &mut output)?;
//!
//! assert_eq!(output, b"0:01:02.50-0:01:05.75\tBob\tHello, world!\n");
//! assert_eq!(report.accepted, 1);
//! # Ok::<(), ass_dialog_core::CoreError>(())
//! ```

use std::io::{BufRead, Write};

use crate::{
    parser::{DialogueParser, DialogueRecord, FieldLimits, ParseError},
    template::{FieldMapping, SubstitutionMode, Template, Token},
    time::FrameRateRatio,
    utils::{CoreError, Result},
};

pub mod reader;
pub mod report;

pub use reader::BoundedLineReader;
pub use report::ConversionReport;

/// Settings for a conversion run
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Compiled output template
    pub template: Template,
    /// Multiplier applied to start and end times
    pub ratio: FrameRateRatio,
    /// How tokens are substituted
    pub mode: SubstitutionMode,
    /// Line and field length limits
    pub limits: FieldLimits,
    /// Fail on the first malformed `Dialogue:` line instead of skipping it
    pub strict: bool,
}

impl ConvertOptions {
    /// Use `template`
    #[must_use]
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    /// Use `ratio`
    #[must_use]
    pub const fn with_ratio(mut self, ratio: FrameRateRatio) -> Self {
        self.ratio = ratio;
        self
    }

    /// Use `mode`
    #[must_use]
    pub const fn with_mode(mut self, mode: SubstitutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Use `limits`
    #[must_use]
    pub const fn with_limits(mut self, limits: FieldLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Enable or disable strict mode
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Renders dialogue lines through a fixed template and ratio
#[derive(Debug, Clone)]
pub struct Converter {
    /// Compiled template shared by every line
    template: Template,
    /// Precomputed rescale ratio
    ratio: FrameRateRatio,
    /// Substitution mode
    mode: SubstitutionMode,
    /// Field parser
    parser: DialogueParser,
    /// Per-line byte limit for reads
    line_limit: usize,
    /// Whether malformed dialogue aborts the run
    strict: bool,
}

impl Converter {
    /// Create a converter from options
    #[must_use]
    pub fn new(options: ConvertOptions) -> Self {
        log::debug!(
            "converter: ratio {} ({}), mode {:?}, strict {}",
            options.ratio,
            options.ratio.value(),
            options.mode,
            options.strict
        );

        Self {
            template: options.template,
            ratio: options.ratio,
            mode: options.mode,
            parser: DialogueParser::new(options.limits),
            line_limit: options.limits.line,
            strict: options.strict,
        }
    }

    /// Compiled template
    #[must_use]
    pub const fn template(&self) -> &Template {
        &self.template
    }

    /// Rescale ratio
    #[must_use]
    pub const fn ratio(&self) -> FrameRateRatio {
        self.ratio
    }

    /// Rescale a parsed record and render it
    #[must_use]
    pub fn render_record(&self, record: DialogueRecord) -> Vec<u8> {
        let record = record.rescaled(self.ratio);
        self.template.render(&field_mapping(&record), self.mode)
    }

    /// Parse and render one input line
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] of the step that rejected the line.
    pub fn convert_line(&self, line: &[u8]) -> core::result::Result<Vec<u8>, ParseError> {
        self.parser
            .parse(line)
            .map(|record| self.render_record(record))
    }

    /// Convert a whole stream
    ///
    /// Every accepted line is written as soon as it is rendered; the writer is
    /// flushed before returning.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`] if reading or writing fails, and
    /// [`CoreError::RejectedLine`] for a malformed `Dialogue:` line in strict
    /// mode.
    pub fn run<R, W>(&self, reader: R, mut writer: W) -> Result<ConversionReport>
    where
        R: BufRead,
        W: Write,
    {
        let mut lines = BoundedLineReader::new(reader, self.line_limit);
        let mut line = Vec::new();
        let mut report = ConversionReport::new();

        while lines.read_line(&mut line)? {
            report.lines_read += 1;

            match self.convert_line(&line) {
                Ok(output) => {
                    writer.write_all(&output)?;
                    report.accepted += 1;
                }
                Err(err) if self.strict && err.is_malformed_dialogue() => {
                    return Err(CoreError::RejectedLine {
                        line: report.lines_read,
                        source: err,
                    });
                }
                Err(err) => {
                    log::trace!("line {}: skipped ({err})", report.lines_read);
                    report.record_skip(err.step());
                }
            }
        }

        writer.flush()?;
        log::debug!("{report}");
        Ok(report)
    }

    /// Convert an in-memory input and collect the output
    ///
    /// # Errors
    ///
    /// See [`Converter::run`].
    pub fn convert_bytes(&self, input: &[u8]) -> Result<(Vec<u8>, ConversionReport)> {
        let mut output = Vec::new();
        let report = self.run(input, &mut output)?;
        Ok((output, report))
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}

/// Token values for one record
///
/// Layer is rendered as plain decimal and times as `H:MM:SS.CC`.
#[must_use]
pub fn field_mapping(record: &DialogueRecord) -> FieldMapping {
    FieldMapping::new()
        .with(Token::Layer, record.layer.to_string())
        .with(Token::Start, record.start.to_string())
        .with(Token::End, record.end.to_string())
        .with(Token::Style, record.style.as_slice())
        .with(Token::Actor, record.actor.as_slice())
        .with(Token::Effect, record.effect.as_slice())
        .with(Token::Text, record.text.as_slice())
}
