//! # ASS Dialogue Core
//!
//! Extracts `Dialogue:` events from ASS (Advanced `SubStation` Alpha) subtitle
//! scripts and renders each one through a user-defined text template,
//! optionally retiming every timestamp for a different frame rate.
//!
//! ## Features
//!
//! - **Tolerant parsing**: malformed lines are skipped, never fatal
//! - **Byte-oriented**: non-UTF-8 scripts pass through unchanged
//! - **Frame-rate retiming**: `old_fps / new_fps` applied with centisecond truncation
//! - **Templates**: `!layer`, `!start`, `!end`, `!style`, `!actor`, `!effect`, `!text`
//!
//! ## Quick Start
//!
//! ```rust
//! use ass_dialog_core::{ConvertOptions, Converter, FrameRateRatio, Template};
//!
//! let script = b"[Events]
//! Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
//! Dialogue: 0,0:00:36.00,0:00:40.00,Default,Alice,0,0,0,,Hello!
//! ";
//!
//! let options = ConvertOptions::default()
//!     .with_template(Template::compile(r"[!start] !actor: !text\n"))
//!     .with_ratio(FrameRateRatio::from_fps(Some(24.0), Some(25.0)));
//! let (output, report) = Converter::new(options).convert_bytes(script)?;
//!
//! assert_eq!(output, b"[0:00:34.56] Alice: Hello!\n");
//! assert_eq!(report.accepted, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(clippy::all)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod convert;
pub mod parser;
pub mod template;
pub mod time;
pub mod utils;

pub use convert::{ConversionReport, ConvertOptions, Converter};
pub use parser::{DialogueParser, DialogueRecord, FieldLimits, ParseError, ParseStep};
pub use template::{FieldMapping, SubstitutionMode, Template, Token, TokenSet};
pub use time::{FrameRateRatio, Timestamp};
pub use utils::{CoreError, Result};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
