//! String literals and the escape decoder shared with templates and
//! identifiers.

use crate::cursor::Cursor;
use crate::error::{LexError, LexResult};

/// Where an escape sequence appears; governs which legacy forms are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EscapeContext {
    /// A quoted string literal.
    String { strict_mode: bool },
    /// A template segment, where legacy octal escapes never have a cooked
    /// value.
    Template,
}

impl EscapeContext {
    fn allows_legacy_octal(self) -> bool {
        matches!(self, EscapeContext::String { strict_mode: false })
    }
}

/// Consume exactly `count` hex digits, or return `None` having consumed
/// only the digits that were present.
fn hex_digits(cursor: &mut Cursor<'_>, count: usize) -> Option<u32> {
    let mut value = 0;
    for _ in 0..count {
        let digit = cursor.peek()?.to_digit(16)?;
        cursor.advance();
        value = value * 16 + digit;
    }
    Some(value)
}

/// Decode the body of a `\u` escape; the `\u` itself is already consumed.
pub(crate) fn scan_unicode_escape(cursor: &mut Cursor<'_>) -> Result<u32, &'static str> {
    if !cursor.eat('{') {
        return hex_digits(cursor, 4).ok_or("expected four hex digits after \\u");
    }
    let mut value: u32 = 0;
    let mut count = 0;
    while let Some(digit) = cursor.peek().and_then(|c| c.to_digit(16)) {
        cursor.advance();
        value = (value * 16 + digit).min(0x11_0000);
        count += 1;
    }
    if count == 0 {
        return Err("expected hex digits in \\u{…}");
    }
    if !cursor.eat('}') {
        return Err("expected '}' to close \\u{…}");
    }
    if value > 0x10_FFFF {
        return Err("code point in \\u{…} is above U+10FFFF");
    }
    Ok(value)
}

/// Push `code_point`, pairing a high surrogate with an immediately following
/// `\uDC00`–`\uDFFF` escape. Unpaired surrogates cook to U+FFFD.
fn push_code_point(cursor: &mut Cursor<'_>, code_point: u32, out: &mut String) {
    if (0xD800..=0xDBFF).contains(&code_point) {
        let mut look = *cursor;
        if look.eat_str("\\u")
            && let Some(low) = hex_digits(&mut look, 4)
            && (0xDC00..=0xDFFF).contains(&low)
        {
            *cursor = look;
            let combined = 0x1_0000 + ((code_point - 0xD800) << 10) + (low - 0xDC00);
            out.push(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
            return;
        }
    }
    out.push(char::from_u32(code_point).unwrap_or(char::REPLACEMENT_CHARACTER));
}

/// Decode one escape sequence into `out`. The leading `\` is already
/// consumed. On error the cursor is left after the malformed part, never
/// past a closing delimiter.
pub(crate) fn cook_escape(
    cursor: &mut Cursor<'_>,
    context: EscapeContext,
    out: &mut String,
) -> Result<(), &'static str> {
    let Some(c) = cursor.advance() else {
        return Err("unterminated escape sequence");
    };
    match c {
        // Line continuation: the backslash and terminator are elided.
        '\r' | '\n' | '\u{2028}' | '\u{2029}' => {}
        'n' => out.push('\n'),
        't' => out.push('\t'),
        'r' => out.push('\r'),
        'b' => out.push('\u{8}'),
        'f' => out.push('\u{C}'),
        'v' => out.push('\u{B}'),
        '0' if !matches!(cursor.peek(), Some('0'..='9')) => out.push('\0'),
        '0'..='7' => {
            if !context.allows_legacy_octal() {
                return Err("octal escape sequences are not allowed here");
            }
            let max_len = if c <= '3' { 3 } else { 2 };
            let mut value = c.to_digit(8).unwrap_or(0);
            for _ in 1..max_len {
                match cursor.peek().and_then(|d| d.to_digit(8)) {
                    Some(digit) => {
                        cursor.advance();
                        value = value * 8 + digit;
                    }
                    None => break,
                }
            }
            out.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
        }
        '8' | '9' => {
            if !context.allows_legacy_octal() {
                return Err("\\8 and \\9 are not allowed here");
            }
            out.push(c);
        }
        'x' => {
            let value = hex_digits(cursor, 2).ok_or("expected two hex digits after \\x")?;
            out.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
        }
        'u' => {
            let code_point = scan_unicode_escape(cursor)?;
            push_code_point(cursor, code_point, out);
        }
        other => out.push(other),
    }
    Ok(())
}

/// Scan a `"` or `'` string literal starting at the cursor and return its
/// cooked value.
pub(crate) fn scan_string(
    cursor: &mut Cursor<'_>,
    quote: char,
    strict_mode: bool,
) -> LexResult<String> {
    let start = cursor.position();
    cursor.advance(); // opening quote
    let mut cooked = String::new();
    loop {
        match cursor.peek() {
            None | Some('\n' | '\r') => {
                return Err(LexError::UnterminatedString {
                    span: cursor.span_from(start),
                });
            }
            Some(c) if c == quote => {
                cursor.advance();
                return Ok(cooked);
            }
            Some('\\') => {
                let escape_start = cursor.position();
                cursor.advance();
                if cursor.is_eof() {
                    return Err(LexError::UnterminatedString {
                        span: cursor.span_from(start),
                    });
                }
                cook_escape(cursor, EscapeContext::String { strict_mode }, &mut cooked).map_err(
                    |reason| LexError::InvalidEscapeSequence {
                        span: cursor.span_from(escape_start),
                        reason,
                    },
                )?;
            }
            Some(c) => {
                cursor.advance();
                cooked.push(c);
            }
        }
    }
}
