//! Cursor-based tokenizer over a single text frame.
//!
//! A Socket.IO text frame has no field tags: every field is positional and
//! contiguous, so the decoder walks the frame left to right with a single
//! read position.  [`FrameCursor`] holds that position as a byte offset into
//! the borrowed frame and hands out sub-slices of it, so extracting a field
//! never copies the frame.
//!
//! # Characters, not bytes
//!
//! All counts (`read_fixed(n)`, `advance(k)`, `rewind(k)`) are in Unicode
//! scalar values.  The structural part of a frame is ASCII, but JSON payloads
//! and namespaces may contain multi-byte UTF-8, and the cursor must never land
//! in the middle of one.

use thiserror::Error;

/// Returned when a fixed-length read asks for more characters than remain.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("frame underrun: requested {requested} characters, {available} available")]
pub struct UnderrunError {
    /// Number of characters the caller asked for.
    pub requested: usize,
    /// Number of characters left in the frame.
    pub available: usize,
}

/// The result of [`FrameCursor::read_until`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimited<'a> {
    /// The consumed characters, not including the delimiter.
    pub span: &'a str,
    /// `true` if the delimiter was found; the cursor then sits on it.
    /// `false` if the span ran to the end of the frame.
    pub terminated: bool,
}

/// A read cursor over one text frame.
///
/// # Examples
///
/// ```rust
/// use sio_core::protocol::FrameCursor;
///
/// let mut cursor = FrameCursor::new("2/chat,[1]");
/// assert_eq!(cursor.read_fixed(1).unwrap(), "2");
/// let ns = cursor.read_until(',');
/// assert_eq!(ns.span, "/chat");
/// assert!(ns.terminated);
/// cursor.advance(1);
/// assert_eq!(cursor.remainder(), "[1]");
/// ```
#[derive(Debug, Clone)]
pub struct FrameCursor<'a> {
    frame: &'a str,
    /// Byte offset of the next unread character.  Always on a char boundary.
    pos: usize,
}

impl<'a> FrameCursor<'a> {
    /// Creates a cursor positioned at the start of `frame`.
    pub fn new(frame: &'a str) -> Self {
        Self { frame, pos: 0 }
    }

    /// Consumes and returns exactly `n` characters.
    ///
    /// # Errors
    ///
    /// Returns [`UnderrunError`] if fewer than `n` characters remain.  The
    /// cursor does not move in that case.
    pub fn read_fixed(&mut self, n: usize) -> Result<&'a str, UnderrunError> {
        let rest = self.remainder();
        let mut end = 0;
        let mut taken = 0;
        for ch in rest.chars().take(n) {
            end += ch.len_utf8();
            taken += 1;
        }
        if taken < n {
            return Err(UnderrunError {
                requested: n,
                available: taken,
            });
        }
        self.pos += end;
        Ok(&rest[..end])
    }

    /// Consumes characters up to, not including, the first `delimiter`.
    ///
    /// When the delimiter is absent the span runs to the end of the frame.
    /// The delimiter itself is never consumed; callers skip it with
    /// [`advance(1)`](Self::advance) when [`Delimited::terminated`] is set.
    pub fn read_until(&mut self, delimiter: char) -> Delimited<'a> {
        let rest = self.remainder();
        match rest.find(delimiter) {
            Some(idx) => {
                self.pos += idx;
                Delimited {
                    span: &rest[..idx],
                    terminated: true,
                }
            }
            None => {
                self.pos = self.frame.len();
                Delimited {
                    span: rest,
                    terminated: false,
                }
            }
        }
    }

    /// Returns the next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    /// Moves the cursor forward by up to `k` characters, stopping at the end.
    pub fn advance(&mut self, k: usize) {
        let rest = self.remainder();
        let step: usize = rest.chars().take(k).map(char::len_utf8).sum();
        self.pos += step;
    }

    /// Moves the cursor back by up to `k` characters, stopping at the start.
    pub fn rewind(&mut self, k: usize) {
        let consumed = &self.frame[..self.pos];
        let step: usize = consumed.chars().rev().take(k).map(char::len_utf8).sum();
        self.pos -= step;
    }

    /// `true` once every character of the frame has been consumed.
    pub fn at_end(&self) -> bool {
        self.pos >= self.frame.len()
    }

    /// The unconsumed tail of the frame.  Does not move the cursor.
    pub fn remainder(&self) -> &'a str {
        &self.frame[self.pos..]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_fixed_consumes_exact_count() {
        // Arrange
        let mut cursor = FrameCursor::new("512-");

        // Act
        let first = cursor.read_fixed(1).unwrap();
        let next = cursor.read_fixed(2).unwrap();

        // Assert
        assert_eq!(first, "5");
        assert_eq!(next, "12");
        assert_eq!(cursor.remainder(), "-");
    }

    #[test]
    fn test_read_fixed_underrun_leaves_cursor_in_place() {
        // Arrange
        let mut cursor = FrameCursor::new("ab");
        cursor.advance(1);

        // Act
        let result = cursor.read_fixed(3);

        // Assert
        assert_eq!(
            result,
            Err(UnderrunError {
                requested: 3,
                available: 1
            })
        );
        assert_eq!(cursor.remainder(), "b");
    }

    #[test]
    fn test_read_fixed_on_empty_frame_fails() {
        let mut cursor = FrameCursor::new("");
        assert!(cursor.read_fixed(1).is_err());
    }

    #[test]
    fn test_read_until_found_stops_on_delimiter() {
        // Arrange
        let mut cursor = FrameCursor::new("/chat,3[]");

        // Act
        let field = cursor.read_until(',');

        // Assert
        assert_eq!(field.span, "/chat");
        assert!(field.terminated);
        assert_eq!(cursor.peek(), Some(','));
    }

    #[test]
    fn test_read_until_missing_runs_to_end() {
        // Arrange
        let mut cursor = FrameCursor::new("/chat");

        // Act
        let field = cursor.read_until(',');

        // Assert
        assert_eq!(field.span, "/chat");
        assert!(!field.terminated);
        assert!(cursor.at_end());
    }

    #[test]
    fn test_read_until_immediate_delimiter_yields_empty_span() {
        let mut cursor = FrameCursor::new(",rest");
        let field = cursor.read_until(',');
        assert_eq!(field.span, "");
        assert!(field.terminated);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let cursor = FrameCursor::new("42");
        assert_eq!(cursor.peek(), Some('4'));
        assert_eq!(cursor.peek(), Some('4'));
        assert_eq!(cursor.remainder(), "42");
    }

    #[test]
    fn test_peek_at_end_is_none() {
        let mut cursor = FrameCursor::new("0");
        cursor.advance(1);
        assert_eq!(cursor.peek(), None);
        assert!(cursor.at_end());
    }

    #[test]
    fn test_rewind_undoes_lookahead() {
        // Arrange
        let mut cursor = FrameCursor::new("12[");
        cursor.read_fixed(3).unwrap();

        // Act
        cursor.rewind(1);

        // Assert
        assert_eq!(cursor.remainder(), "[");
    }

    #[test]
    fn test_rewind_and_advance_clamp_to_bounds() {
        let mut cursor = FrameCursor::new("abc");
        cursor.rewind(5);
        assert_eq!(cursor.remainder(), "abc");
        cursor.advance(10);
        assert!(cursor.at_end());
    }

    #[test]
    fn test_multibyte_characters_are_counted_as_one() {
        // Arrange – "é" is two bytes, "→" is three
        let mut cursor = FrameCursor::new("é→x");

        // Act
        let first = cursor.read_fixed(2).unwrap();
        cursor.rewind(1);

        // Assert
        assert_eq!(first, "é→");
        assert_eq!(cursor.remainder(), "→x");
    }
}
