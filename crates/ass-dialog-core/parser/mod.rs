//! Dialogue line parsing
//!
//! Only `Dialogue:` event lines are recognized. Anything else in a script
//! (section headers, `Style:` lines, `Comment:` events) fails the
//! recognition step and is meant to be skipped by the caller.

pub mod cursor;
pub mod dialogue;
pub mod errors;
pub mod limits;

pub use cursor::ByteCursor;
pub use dialogue::{
    parse_dialogue_line, DialogueParser, DialogueRecord, DIALOGUE_PREFIX, HEADER_VALUES,
};
pub use errors::{ParseError, ParseStep};
pub use limits::{bounded_copy, FieldLimits};
