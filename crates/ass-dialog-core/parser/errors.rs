//! Parse errors for dialogue line extraction
//!
//! Every step of the dialogue parser either advances or fails with a
//! [`ParseError`] naming the step. The driver treats all of these as
//! recoverable: the line is skipped and the stream continues.

use core::fmt;

use thiserror::Error;

/// Named steps of the dialogue line parser, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParseStep {
    /// `Dialogue:` prefix and the nine header integers
    Recognition,
    /// Skipping past layer, start and end to the style field
    HeaderSkip,
    /// Comma-terminated style field
    Style,
    /// Comma-terminated actor (name) field
    Actor,
    /// Skipping the three margin fields
    MarginSkip,
    /// Comma-terminated effect field
    Effect,
    /// Unterminated text remainder
    Text,
}

impl ParseStep {
    /// Every step in execution order
    pub const ALL: [Self; 7] = [
        Self::Recognition,
        Self::HeaderSkip,
        Self::Style,
        Self::Actor,
        Self::MarginSkip,
        Self::Effect,
        Self::Text,
    ];

    /// Lowercase step name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recognition => "recognition",
            Self::HeaderSkip => "header",
            Self::Style => "style",
            Self::Actor => "actor",
            Self::MarginSkip => "margins",
            Self::Effect => "effect",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ParseStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason a line was not accepted as a dialogue record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Line lacks the `Dialogue:` prefix or a full `layer,start,end` header
    #[error("not a dialogue line: matched {matched} of 9 header values")]
    NotDialogue {
        /// Number of header integers converted before the scan stopped
        matched: usize,
    },

    /// Fewer commas than a skip step needs
    #[error("{step} skip needs {expected} commas, found {found}")]
    MissingFields {
        /// Step that ran out of commas
        step: ParseStep,
        /// Commas the step needs
        expected: usize,
        /// Commas actually present
        found: usize,
    },

    /// A comma-terminated field has no terminating comma
    #[error("{step} field is not terminated by a comma")]
    MissingDelimiter {
        /// Field step that failed
        step: ParseStep,
    },
}

impl ParseError {
    /// Step that produced this error
    #[must_use]
    pub const fn step(&self) -> ParseStep {
        match self {
            Self::NotDialogue { .. } => ParseStep::Recognition,
            Self::MissingFields { step, .. } | Self::MissingDelimiter { step } => *step,
        }
    }

    /// Whether the line looked like dialogue before failing
    ///
    /// Strict mode only reports these; lines failing recognition are ordinary
    /// script content such as headers and styles.
    #[must_use]
    pub const fn is_malformed_dialogue(&self) -> bool {
        !matches!(self, Self::NotDialogue { .. })
    }
}
