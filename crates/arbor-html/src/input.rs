//! Character input for the tokenizer.
//!
//! [§ 13.2.3 The input byte stream](https://html.spec.whatwg.org/multipage/parsing.html#the-input-byte-stream)
//!
//! The input is always decoded as UTF-8; there is no encoding sniffing.
//! Malformed sequences decode to U+FFFD REPLACEMENT CHARACTER, one per
//! offending byte run, and never abort the parse.

use std::io::{self, BufRead, ErrorKind};

const REPLACEMENT: char = '\u{FFFD}';

/// A buffered character source with a single character of pushback.
///
/// "Reconsume" in the tokenizer is implemented by pushing the current
/// character back; no state ever needs more than one character of
/// lookahead, so the slot holds exactly one.
pub struct CharReader<R> {
    inner: R,
    pushed_back: Option<char>,
    position: usize,
}

impl<R: BufRead> CharReader<R> {
    /// Wrap a buffered reader.
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            pushed_back: None,
            position: 0,
        }
    }

    /// Number of characters consumed so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Consume the next input character.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates any read failure of the underlying reader.
    pub fn next_char(&mut self) -> io::Result<Option<char>> {
        let next = match self.pushed_back.take() {
            Some(c) => Some(c),
            None => self.read_char()?,
        };
        if next.is_some() {
            self.position += 1;
        }
        Ok(next)
    }

    /// Store `c` so the next [`next_char`](Self::next_char) returns it again.
    ///
    /// At most one character may be pending; pushing back twice without
    /// consuming in between is a caller bug.
    pub fn push_back(&mut self, c: char) {
        debug_assert!(
            self.pushed_back.is_none(),
            "push_back called with {c:?} while {:?} is still pending",
            self.pushed_back
        );
        self.pushed_back = Some(c);
        self.position = self.position.saturating_sub(1);
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.inner.consume(1);
        }
        Ok(byte)
    }

    fn read_char(&mut self) -> io::Result<Option<char>> {
        let Some(first) = self.read_byte()? else {
            return Ok(None);
        };
        let width = utf8_width(first);
        match width {
            0 => return Ok(Some(REPLACEMENT)),
            1 => return Ok(Some(char::from(first))),
            _ => {}
        }

        let mut bytes = [first, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            match self.peek_byte()? {
                Some(b) if b & 0xC0 == 0x80 => {
                    *slot = b;
                    self.inner.consume(1);
                }
                // Leave the offending byte for the next read.
                _ => return Ok(Some(REPLACEMENT)),
            }
        }

        Ok(Some(
            std::str::from_utf8(&bytes[..width])
                .ok()
                .and_then(|s| s.chars().next())
                .unwrap_or(REPLACEMENT),
        ))
    }
}

/// Length of the UTF-8 sequence introduced by `first`, or 0 if `first`
/// cannot start a sequence.
const fn utf8_width(first: u8) -> usize {
    match first {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}
