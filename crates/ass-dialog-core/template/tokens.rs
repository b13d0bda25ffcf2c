//! Template tokens and token sets
//!
//! A token is a literal `!name` marker. Matching is byte-exact and
//! case-sensitive; there is no escape for writing a token literally.

use bitflags::bitflags;
use core::fmt;

use super::substitution::find_subslice;

/// Substitution point recognized in output templates
///
/// Variants are declared in the order substitution passes run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
    /// `!layer`
    Layer,
    /// `!start`
    Start,
    /// `!end`
    End,
    /// `!style`
    Style,
    /// `!actor`
    Actor,
    /// `!effect`
    Effect,
    /// `!text`
    Text,
}

impl Token {
    /// All tokens in substitution order
    pub const ALL: [Self; 7] = [
        Self::Layer,
        Self::Start,
        Self::End,
        Self::Style,
        Self::Actor,
        Self::Effect,
        Self::Text,
    ];

    /// Marker text as written in a template
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Layer => "!layer",
            Self::Start => "!start",
            Self::End => "!end",
            Self::Style => "!style",
            Self::Actor => "!actor",
            Self::Effect => "!effect",
            Self::Text => "!text",
        }
    }

    /// Marker text as bytes
    #[must_use]
    pub const fn marker_bytes(self) -> &'static [u8] {
        self.marker().as_bytes()
    }

    /// Position in substitution order
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a token by its marker text
    #[must_use]
    pub fn from_marker(marker: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|token| token.marker() == marker)
    }

    /// Single-token set
    #[must_use]
    pub const fn flag(self) -> TokenSet {
        match self {
            Self::Layer => TokenSet::LAYER,
            Self::Start => TokenSet::START,
            Self::End => TokenSet::END,
            Self::Style => TokenSet::STYLE,
            Self::Actor => TokenSet::ACTOR,
            Self::Effect => TokenSet::EFFECT,
            Self::Text => TokenSet::TEXT,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

bitflags! {
    /// Set of tokens, e.g. the tokens a template references
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenSet: u8 {
        const LAYER = 1 << 0;
        const START = 1 << 1;
        const END = 1 << 2;
        const STYLE = 1 << 3;
        const ACTOR = 1 << 4;
        const EFFECT = 1 << 5;
        const TEXT = 1 << 6;
    }
}

impl TokenSet {
    /// Tokens whose marker occurs anywhere in `haystack`
    #[must_use]
    pub fn scan(haystack: &[u8]) -> Self {
        Token::ALL
            .into_iter()
            .filter(|token| find_subslice(haystack, token.marker_bytes()).is_some())
            .fold(Self::empty(), |set, token| set | token.flag())
    }

    /// Whether `token` is in the set
    #[must_use]
    pub fn has(self, token: Token) -> bool {
        self.contains(token.flag())
    }

    /// Iterate tokens in substitution order
    pub fn tokens(self) -> impl Iterator<Item = Token> {
        Token::ALL.into_iter().filter(move |token| self.has(*token))
    }
}
