//! Regular-expression literal bodies.

use crate::cursor::{Cursor, is_line_terminator};
use crate::error::{LexError, LexResult};
use crate::keywords::is_id_continue;

/// Scan `/pattern/flags` starting at the opening `/` and return the pattern
/// and flags. A `/` inside a `[…]` class does not close the literal.
pub(crate) fn scan_regexp(cursor: &mut Cursor<'_>) -> LexResult<(String, String)> {
    let start = cursor.position();
    cursor.advance(); // opening /
    let body_start = cursor.offset();
    let mut in_class = false;

    loop {
        match cursor.peek() {
            None => {
                return Err(LexError::UnterminatedRegex {
                    span: cursor.span_from(start),
                });
            }
            Some(c) if is_line_terminator(c) => {
                return Err(LexError::UnterminatedRegex {
                    span: cursor.span_from(start),
                });
            }
            Some('\\') => {
                cursor.advance();
                match cursor.peek() {
                    Some(c) if !is_line_terminator(c) => {
                        cursor.advance();
                    }
                    _ => {
                        return Err(LexError::UnterminatedRegex {
                            span: cursor.span_from(start),
                        });
                    }
                }
            }
            Some('[') => {
                in_class = true;
                cursor.advance();
            }
            Some(']') => {
                in_class = false;
                cursor.advance();
            }
            Some('/') if !in_class => break,
            Some(_) => {
                cursor.advance();
            }
        }
    }

    let pattern = cursor.slice_from(body_start).to_owned();
    cursor.advance(); // closing /
    let flags_start = cursor.offset();
    cursor.eat_while(is_id_continue);
    let flags = cursor.slice_from(flags_start).to_owned();
    Ok((pattern, flags))
}
