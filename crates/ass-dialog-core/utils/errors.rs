//! Core error type for dialogue conversion
//!
//! Provides the crate-wide `CoreError` enum. Line-level parse failures live in
//! [`crate::parser::ParseError`] and only surface here when strict mode turns
//! them into a hard error.
//!
//! # Error Philosophy
//!
//! - Use `thiserror` for structured error handling
//! - Malformed dialogue lines are recoverable and skipped by default
//! - Stream failures are fatal and carry the underlying message

use alloc::string::String;
use core::fmt;

use thiserror::Error;

use crate::parser::ParseError;

/// Main error type for conversion operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Reading the input or writing the output failed
    #[error("I/O error: {0}")]
    Io(String),

    /// A `Dialogue:` line was rejected while strict mode is enabled
    #[error("line {line}: {source}")]
    RejectedLine {
        /// 1-based number of the rejected input line
        line: usize,
        /// Parser step that rejected the line
        #[source]
        source: ParseError,
    },

    /// Invalid time format in a timestamp string
    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    /// Invalid frame rate or other configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Create time error from invalid input and a reason
    pub fn invalid_time<T: fmt::Display>(time: T, reason: &str) -> Self {
        Self::InvalidTime(format!("'{time}': {reason}"))
    }

    /// Create configuration error from message
    pub fn config<T: fmt::Display>(message: T) -> Self {
        Self::Config(format!("{message}"))
    }

    /// Check if error is recoverable
    ///
    /// Recoverable errors concern a single value or line; processing of the
    /// rest of the stream could continue.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::RejectedLine { .. } | Self::InvalidTime(_) => true,
            Self::Io(_) | Self::Config(_) => false,
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = core::result::Result<T, CoreError>;
