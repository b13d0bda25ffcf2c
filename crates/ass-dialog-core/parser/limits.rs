//! Length limits for extracted fields
//!
//! Over-long fields are truncated to their limit and the line is still
//! accepted. Limits count bytes, so truncation may split a multi-byte UTF-8
//! sequence.

/// Maximum byte length per text field and per input line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldLimits {
    /// Bytes read per input line before the remainder spills into the next read
    pub line: usize,
    /// Style name
    pub style: usize,
    /// Actor name
    pub actor: usize,
    /// Effect field
    pub effect: usize,
    /// Dialogue text
    pub text: usize,
}

impl FieldLimits {
    /// Limits that never truncate
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            line: usize::MAX,
            style: usize::MAX,
            actor: usize::MAX,
            effect: usize::MAX,
            text: usize::MAX,
        }
    }

    /// Override the line limit
    #[must_use]
    pub const fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Override the text limit
    #[must_use]
    pub const fn with_text(mut self, text: usize) -> Self {
        self.text = text;
        self
    }
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            line: 4095,
            style: 127,
            actor: 127,
            effect: 1023,
            text: 2047,
        }
    }
}

/// Copy at most `limit` bytes of `field`
#[must_use]
pub fn bounded_copy(field: &[u8], limit: usize) -> Vec<u8> {
    field[..field.len().min(limit)].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits() {
        let limits = FieldLimits::default();
        assert_eq!(limits.line, 4095);
        assert_eq!(limits.style, 127);
        assert_eq!(limits.actor, 127);
        assert_eq!(limits.effect, 1023);
        assert_eq!(limits.text, 2047);
    }

    #[test]
    fn bounded_copy_truncates() {
        assert_eq!(bounded_copy(b"Default", 3), b"Def".to_vec());
        assert_eq!(bounded_copy(b"Default", 7), b"Default".to_vec());
        assert_eq!(bounded_copy(b"", 0), Vec::<u8>::new());
        assert_eq!(bounded_copy(b"abc", 0), Vec::<u8>::new());
    }

    #[test]
    fn builders_override() {
        let limits = FieldLimits::unbounded().with_text(10).with_line(20);
        assert_eq!(limits.text, 10);
        assert_eq!(limits.line, 20);
        assert_eq!(limits.style, usize::MAX);
    }
}
