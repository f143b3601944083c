//! Character cursor over a UTF-8 source string.
//!
//! The cursor is plain data (`Copy`): saving one is a checkpoint, and
//! assigning it back rewinds the scan. Speculative lookahead that needs more
//! than a few characters works on a copy and commits by assignment.

use crate::token::{Position, Span};

/// Returns `true` for ES2025 *LineTerminator* code points.
pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Returns `true` for ES2025 *WhiteSpace* characters (line terminators
/// excluded).
pub fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t'                      // CHARACTER TABULATION
        | '\x0B'                  // LINE TABULATION
        | '\x0C'                  // FORM FEED
        | ' '                     // SPACE
        | '\u{00A0}'              // NO-BREAK SPACE
        | '\u{FEFF}'              // ZERO WIDTH NO-BREAK SPACE (BOM)
        | '\u{1680}'              // OGHAM SPACE MARK
        | '\u{2000}'
            ..='\u{200A}' // EN QUAD … HAIR SPACE
        | '\u{202F}'              // NARROW NO-BREAK SPACE
        | '\u{205F}'              // MEDIUM MATHEMATICAL SPACE
        | '\u{3000}' // IDEOGRAPHIC SPACE
    )
}

/// A read position inside a source string, with line/column tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'src> {
    /// The complete source string.
    source: &'src str,
    /// Current byte position within `source`.
    pos: usize,
    /// Current 1-based line number.
    line: u32,
    /// Current 1-based column number.
    column: u32,
}

impl<'src> Cursor<'src> {
    /// Create a cursor at the start of `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// The complete source string.
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Current offset, line, and column.
    pub fn position(&self) -> Position {
        Position {
            offset: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    /// Span from `start` to the current position.
    pub fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.position())
    }

    /// Returns `true` when all input has been consumed.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// The unconsumed remainder of the source.
    pub fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    /// Source text between byte offset `start` and the current position.
    pub fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.pos]
    }

    /// `true` if the unconsumed input begins with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// The next character, without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character after [`Cursor::peek`].
    pub fn peek2(&self) -> Option<char> {
        let mut it = self.rest().chars();
        it.next();
        it.next()
    }

    /// The character after [`Cursor::peek2`].
    pub fn peek3(&self) -> Option<char> {
        let mut it = self.rest().chars();
        it.next();
        it.next();
        it.next()
    }

    /// Advance past the current character and update line/column tracking.
    ///
    /// `\r\n` is treated as a single line terminator: the `\n` is consumed
    /// along with the `\r`, and `'\r'` is returned for the pair.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        match ch {
            '\r' => {
                if self.rest().starts_with('\n') {
                    self.pos += 1;
                }
                self.line += 1;
                self.column = 1;
            }
            '\n' | '\u{2028}' | '\u{2029}' => {
                self.line += 1;
                self.column = 1;
            }
            _ => {
                self.column += 1;
            }
        }
        Some(ch)
    }

    /// Consume `expected` if it is the next character.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `prefix` if the input begins with it. `prefix` must not
    /// contain line terminators.
    pub fn eat_str(&mut self, prefix: &str) -> bool {
        if !self.starts_with(prefix) {
            return false;
        }
        self.pos += prefix.len();
        self.column += prefix.chars().count() as u32;
        true
    }

    /// Consume characters while `pred` holds.
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while matches!(self.peek(), Some(c) if pred(c)) {
            self.advance();
        }
    }

    /// Consume everything up to, but not including, the next line terminator.
    pub fn eat_until_line_terminator(&mut self) {
        self.eat_while(|c| !is_line_terminator(c));
    }
}
