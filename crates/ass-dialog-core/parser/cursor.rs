//! Byte cursor used by the dialogue parser
//!
//! Scanning is byte-oriented: delimiters are ASCII and every other byte is
//! copied through untouched, so lines in legacy 8-bit encodings parse the
//! same as UTF-8 ones. Number scanning follows `scanf` `%d` conventions
//! (leading whitespace skipped, optional sign, decimal digits).

/// Forward-only position over one input line
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    /// Line being scanned
    source: &'a [u8],
    /// Current byte offset into `source`
    position: usize,
}

/// C `isspace` in the "C" locale
const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor at the start of `source`
    #[must_use]
    pub const fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Current byte offset
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Unconsumed bytes
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.source[self.position..]
    }

    /// Whether every byte has been consumed
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Next byte without consuming it
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.source.get(self.position).copied()
    }

    /// Consume `byte` if it is next
    pub fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Consume `literal` if the remaining input starts with it
    pub fn eat_literal(&mut self, literal: &[u8]) -> bool {
        if self.remaining().starts_with(literal) {
            self.position += literal.len();
            true
        } else {
            false
        }
    }

    /// Skip any run of whitespace, including none
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_space) {
            self.position += 1;
        }
    }

    /// Scan a signed decimal integer
    ///
    /// Returns `None` and leaves the cursor where it was if no digits follow
    /// or the value overflows `i64`.
    pub fn scan_signed(&mut self) -> Option<i64> {
        let start = self.position;
        self.skip_whitespace();
        let negative = if self.eat(b'-') {
            true
        } else {
            self.eat(b'+');
            false
        };

        let magnitude = self.scan_digits();
        let value = magnitude.and_then(|m| {
            if negative {
                0i64.checked_sub_unsigned(m)
            } else {
                i64::try_from(m).ok()
            }
        });

        if value.is_none() {
            self.position = start;
        }
        value
    }

    /// Scan an unsigned decimal integer
    ///
    /// Accepts an optional `+`; a `-` sign fails the scan. Returns `None` and
    /// leaves the cursor where it was on failure or overflow.
    pub fn scan_unsigned(&mut self) -> Option<u64> {
        let start = self.position;
        self.skip_whitespace();
        self.eat(b'+');
        let value = self.scan_digits();
        if value.is_none() {
            self.position = start;
        }
        value
    }

    /// Consume a run of ASCII digits
    fn scan_digits(&mut self) -> Option<u64> {
        let digits = self
            .remaining()
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count();
        if digits == 0 {
            return None;
        }

        let value = self.source[self.position..self.position + digits]
            .iter()
            .try_fold(0u64, |acc, &digit| {
                acc.checked_mul(10)?.checked_add(u64::from(digit - b'0'))
            });
        self.position += digits;
        value
    }

    /// Bytes up to the next `delimiter`, consuming the delimiter too
    ///
    /// Returns `None` without moving if no delimiter remains.
    pub fn take_until(&mut self, delimiter: u8) -> Option<&'a [u8]> {
        let rest = self.remaining();
        let end = rest.iter().position(|&byte| byte == delimiter)?;
        self.position += end + 1;
        Some(&rest[..end])
    }

    /// Advance past the next `count` occurrences of `delimiter`
    ///
    /// # Errors
    ///
    /// Returns the number of delimiters found when fewer than `count` remain.
    /// The cursor is left at the end of the input in that case.
    pub fn skip_past(&mut self, delimiter: u8, count: usize) -> Result<(), usize> {
        for found in 0..count {
            if self.take_until(delimiter).is_none() {
                self.position = self.source.len();
                return Err(found);
            }
        }
        Ok(())
    }

    /// Everything up to the line terminator, consuming the rest of the input
    ///
    /// The terminator is `\n` or `\r\n`. Without one, the whole remainder is
    /// returned.
    pub fn take_line_rest(&mut self) -> &'a [u8] {
        let rest = self.remaining();
        self.position = self.source.len();
        match rest.iter().position(|&byte| byte == b'\n') {
            Some(end) => rest[..end].strip_suffix(b"\r").unwrap_or(&rest[..end]),
            None => rest,
        }
    }
}
