//! Output templates: compilation and token rendering
//!
//! A raw template is written by the user, typically on a command line where
//! tabs and newlines are awkward to type. [`Template::compile`] expands the
//! two-character escapes `\t` and `\n` once; the compiled bytes are then
//! rendered for every accepted dialogue line.
//!
//! # Example
//!
//! ```rust
//! use ass_dialog_core::template::{FieldMapping, SubstitutionMode, Template, Token};
//!
//! let template = Template::compile(r"!actor:\t!text\n");
//! let mapping = FieldMapping::new()
//!     .with(Token::Actor, "Bob")
//!     .with(Token::Text, "Hi");
//! assert_eq!(template.render(&mapping, SubstitutionMode::Sequential), b"Bob:\tHi\n");
//! ```

pub mod substitution;
pub mod tokens;

pub use substitution::{find_subslice, render, substitute, FieldMapping, SubstitutionMode};
pub use tokens::{Token, TokenSet};

/// Template used when the caller does not provide one
pub const DEFAULT_TEMPLATE: &str = r"!start-!end\t!actor\t!text\n";

/// Escape-expanded template, read-only after compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Compiled template bytes
    bytes: Vec<u8>,
    /// Tokens referenced by the compiled bytes
    tokens: TokenSet,
}

impl Template {
    /// Expand `\t` to tab, then `\n` to newline
    ///
    /// Each escape is expanded in a single pass; bytes produced by the first
    /// pass are never fed back into it.
    #[must_use]
    pub fn compile(raw: &str) -> Self {
        Self::compile_bytes(raw.as_bytes())
    }

    /// Byte form of [`Template::compile`]
    #[must_use]
    pub fn compile_bytes(raw: &[u8]) -> Self {
        let tabs = substitute(raw, br"\t", b"\t");
        let bytes = substitute(&tabs, br"\n", b"\n");
        let tokens = TokenSet::scan(&bytes);
        Self { bytes, tokens }
    }

    /// Compiled bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Tokens the template references
    #[must_use]
    pub const fn tokens(&self) -> TokenSet {
        self.tokens
    }

    /// Render one output record
    #[must_use]
    pub fn render(&self, mapping: &FieldMapping, mode: SubstitutionMode) -> Vec<u8> {
        render(&self.bytes, mapping, mode)
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::compile(DEFAULT_TEMPLATE)
    }
}

impl AsRef<[u8]> for Template {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
