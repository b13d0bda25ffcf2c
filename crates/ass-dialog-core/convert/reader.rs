//! Bounded line reading
//!
//! [`BoundedLineReader`] hands out at most `max_len` bytes per read, stopping
//! early after a `\n`. A physical line longer than the limit is returned in
//! several pieces; the continuation pieces do not start with `Dialogue:` and
//! are skipped by the parser.

use std::io::{self, BufRead};

/// Line reader with an upper bound on bytes per line
#[derive(Debug)]
pub struct BoundedLineReader<R> {
    /// Buffered source
    inner: R,
    /// Maximum bytes returned per read, terminator included
    max_len: usize,
}

impl<R: BufRead> BoundedLineReader<R> {
    /// Wrap `inner`, returning at most `max_len` bytes per line
    ///
    /// A limit of zero is raised to one so every read makes progress.
    pub fn new(inner: R, max_len: usize) -> Self {
        Self {
            inner,
            max_len: max_len.max(1),
        }
    }

    /// Byte limit per read
    pub const fn max_len(&self) -> usize {
        self.max_len
    }

    /// Read the next line into `buf`, replacing its contents
    ///
    /// The `\n` terminator is kept when it fits within the limit. Returns
    /// `Ok(false)` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying reader other than
    /// [`io::ErrorKind::Interrupted`], which is retried.
    pub fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<bool> {
        buf.clear();

        while buf.len() < self.max_len {
            let available = match self.inner.fill_buf() {
                Ok(available) => available,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if available.is_empty() {
                break;
            }

            let room = self.max_len - buf.len();
            let window = &available[..available.len().min(room)];
            let (taken, complete) = match window.iter().position(|&byte| byte == b'\n') {
                Some(newline) => (newline + 1, true),
                None => (window.len(), false),
            };

            buf.extend_from_slice(&window[..taken]);
            self.inner.consume(taken);

            if complete {
                break;
            }
        }

        Ok(!buf.is_empty())
    }

    /// Unwrap the underlying reader
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> Iterator for BoundedLineReader<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        match self.read_line(&mut buf) {
            Ok(true) => Some(Ok(buf)),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    fn collect(input: &[u8], max_len: usize) -> Vec<Vec<u8>> {
        BoundedLineReader::new(Cursor::new(input.to_vec()), max_len)
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn splits_on_newlines_and_keeps_them() {
        let lines = collect(b"one\ntwo\n\nthree", 100);
        assert_eq!(
            lines,
            vec![
                b"one\n".to_vec(),
                b"two\n".to_vec(),
                b"\n".to_vec(),
                b"three".to_vec()
            ]
        );
    }

    #[test]
    fn long_lines_are_chunked() {
        let lines = collect(b"abcdefgh\nxy\n", 3);
        assert_eq!(
            lines,
            vec![
                b"abc".to_vec(),
                b"def".to_vec(),
                b"gh\n".to_vec(),
                b"xy\n".to_vec()
            ]
        );
    }

    #[test]
    fn newline_past_the_limit_becomes_its_own_read() {
        let lines = collect(b"abc\n", 3);
        assert_eq!(lines, vec![b"abc".to_vec(), b"\n".to_vec()]);
    }

    #[test]
    fn empty_input_has_no_lines() {
        assert!(collect(b"", 10).is_empty());
    }

    #[test]
    fn works_across_small_internal_buffers() {
        // A 2-byte BufReader forces several fill_buf calls per line
        let reader = BufReader::with_capacity(2, Cursor::new(b"hello\nworld\n".to_vec()));
        let lines: Vec<_> = BoundedLineReader::new(reader, 64)
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(lines, vec![b"hello\n".to_vec(), b"world\n".to_vec()]);
    }

    #[test]
    fn buffer_is_reused_and_cleared() {
        let mut reader = BoundedLineReader::new(Cursor::new(b"long line\nx\n".to_vec()), 64);
        let mut buf = Vec::new();
        assert!(reader.read_line(&mut buf).unwrap());
        assert_eq!(buf, b"long line\n");
        assert!(reader.read_line(&mut buf).unwrap());
        assert_eq!(buf, b"x\n");
        assert!(!reader.read_line(&mut buf).unwrap());
        assert!(buf.is_empty());
    }

    #[test]
    fn zero_limit_still_progresses() {
        let reader = BoundedLineReader::new(Cursor::new(b"ab".to_vec()), 0);
        assert_eq!(reader.max_len(), 1);
        let lines: Vec<_> = reader.collect::<io::Result<_>>().unwrap();
        assert_eq!(lines, vec![b"a".to_vec(), b"b".to_vec()]);
    }
}
