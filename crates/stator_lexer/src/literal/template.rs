//! Template literal segments.

use crate::cursor::Cursor;
use crate::error::{LexError, LexResult};
use crate::literal::string::{EscapeContext, cook_escape};
use crate::token::Position;

/// One raw run of template text and how it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TemplateSegment {
    /// Cooked text, or `None` if an escape has no cooked value.
    pub cooked: Option<String>,
    /// `true` when the segment ended with `${` rather than a backtick.
    pub opens_interpolation: bool,
}

/// Scan template characters after the opening `` ` `` or after a `}` that
/// closes a substitution, through the terminating `` ` `` or `${`.
///
/// Line terminators are kept; `\r\n` and `\r` cook to `\n`. `template_start`
/// locates the opening backtick for the unterminated-template error.
pub(crate) fn scan_template_segment(
    cursor: &mut Cursor<'_>,
    template_start: Position,
) -> LexResult<TemplateSegment> {
    let mut cooked = Some(String::new());
    loop {
        match cursor.peek() {
            None => {
                return Err(LexError::UnterminatedTemplate {
                    span: cursor.span_from(template_start),
                });
            }
            Some('`') => {
                cursor.advance();
                return Ok(TemplateSegment {
                    cooked,
                    opens_interpolation: false,
                });
            }
            Some('$') if cursor.peek2() == Some('{') => {
                cursor.advance();
                cursor.advance();
                return Ok(TemplateSegment {
                    cooked,
                    opens_interpolation: true,
                });
            }
            Some('\\') => {
                cursor.advance();
                let mut decoded = String::new();
                match cook_escape(cursor, EscapeContext::Template, &mut decoded) {
                    Ok(()) => {
                        if let Some(text) = cooked.as_mut() {
                            text.push_str(&decoded);
                        }
                    }
                    Err(_) => cooked = None,
                }
            }
            Some(_) => {
                let c = cursor.advance();
                if let (Some(text), Some(c)) = (cooked.as_mut(), c) {
                    text.push(if c == '\r' { '\n' } else { c });
                }
            }
        }
    }
}
