//! Numeric literal scanning.
//!
//! Separators (`_`) may appear only between two digits. A literal must not
//! be followed directly by an identifier character or a digit, so `3in` and
//! `0b12` are rejected rather than split.

use crate::cursor::Cursor;
use crate::error::{LexError, LexResult};
use crate::keywords::is_id_start;
use crate::token::{Position, TokenKind, TokenValue};

#[derive(Clone, Copy)]
enum Radix {
    Hex,
    Octal,
    Binary,
}

impl Radix {
    fn value(self) -> u32 {
        match self {
            Radix::Hex => 16,
            Radix::Octal => 8,
            Radix::Binary => 2,
        }
    }

    fn kind(self, bigint: bool) -> TokenKind {
        match (self, bigint) {
            (Radix::Hex, false) => TokenKind::HexIntegerLiteral,
            (Radix::Hex, true) => TokenKind::BigHexIntegerLiteral,
            (Radix::Octal, false) => TokenKind::OctalIntegerLiteral,
            (Radix::Octal, true) => TokenKind::BigOctalIntegerLiteral,
            (Radix::Binary, false) => TokenKind::BinaryIntegerLiteral,
            (Radix::Binary, true) => TokenKind::BigBinaryIntegerLiteral,
        }
    }
}

fn invalid(cursor: &Cursor<'_>, start: Position, reason: &'static str) -> LexError {
    LexError::InvalidNumericLiteral {
        span: cursor.span_from(start),
        reason,
    }
}

/// Scan a numeric literal. The cursor must be on its first character: a
/// decimal digit, or a `.` followed by one.
pub(crate) fn scan_numeric(
    cursor: &mut Cursor<'_>,
    strict_mode: bool,
) -> LexResult<(TokenKind, TokenValue)> {
    let start = cursor.position();
    let scanned = match (cursor.peek(), cursor.peek2()) {
        (Some('0'), Some('x' | 'X')) => scan_radix(cursor, start, Radix::Hex)?,
        (Some('0'), Some('o' | 'O')) => scan_radix(cursor, start, Radix::Octal)?,
        (Some('0'), Some('b' | 'B')) => scan_radix(cursor, start, Radix::Binary)?,
        (Some('0'), Some('0'..='9' | '_')) => scan_leading_zero(cursor, start, strict_mode)?,
        _ => scan_decimal(cursor, start, String::new(), true)?,
    };
    if let Some(c) = cursor.peek()
        && (is_id_start(c) || c.is_ascii_digit() || c == '\\')
    {
        cursor.advance();
        return Err(invalid(
            cursor,
            start,
            "numeric literal must not be followed by an identifier or digit",
        ));
    }
    Ok(scanned)
}

/// Consume a run of `radix` digits with separators, returning the digits.
fn scan_digits(cursor: &mut Cursor<'_>, start: Position, radix: u32) -> LexResult<String> {
    let mut digits = String::new();
    loop {
        match cursor.peek() {
            Some(c) if c.is_digit(radix) => {
                digits.push(c);
                cursor.advance();
            }
            Some('_') => {
                let next_is_digit = matches!(cursor.peek2(), Some(d) if d.is_digit(radix));
                cursor.advance();
                if digits.is_empty() || !next_is_digit {
                    return Err(invalid(
                        cursor,
                        start,
                        "numeric separator must appear between two digits",
                    ));
                }
            }
            _ => return Ok(digits),
        }
    }
}

fn fold_digits(digits: &str, radix: u32) -> f64 {
    digits.chars().fold(0.0, |acc, c| {
        acc * f64::from(radix) + f64::from(c.to_digit(radix).unwrap_or(0))
    })
}

fn scan_radix(
    cursor: &mut Cursor<'_>,
    start: Position,
    radix: Radix,
) -> LexResult<(TokenKind, TokenValue)> {
    cursor.advance(); // 0
    let prefix = cursor.advance().unwrap_or('x'); // x / o / b
    let digits = scan_digits(cursor, start, radix.value())?;
    if digits.is_empty() {
        return Err(invalid(cursor, start, "missing digits after radix prefix"));
    }
    if cursor.eat('n') {
        let value = format!("0{prefix}{digits}");
        return Ok((radix.kind(true), TokenValue::BigInt(value)));
    }
    let value = fold_digits(&digits, radix.value());
    Ok((radix.kind(false), TokenValue::Number(value)))
}

/// `0` followed by more digits: legacy octal (`017`) or non-octal decimal
/// (`089`). Both exist only in non-strict code.
fn scan_leading_zero(
    cursor: &mut Cursor<'_>,
    start: Position,
    strict_mode: bool,
) -> LexResult<(TokenKind, TokenValue)> {
    cursor.advance(); // 0
    let digits_start = cursor.offset();
    cursor.eat_while(|c| c.is_ascii_digit());
    let digits = cursor.slice_from(digits_start);
    if cursor.peek() == Some('_') {
        cursor.advance();
        return Err(invalid(
            cursor,
            start,
            "numeric separators are not allowed after a leading zero",
        ));
    }
    if strict_mode {
        return Err(invalid(
            cursor,
            start,
            "legacy octal and leading-zero literals are not allowed in strict mode",
        ));
    }
    if digits.chars().all(|c| c.is_digit(8)) {
        if cursor.eat('n') {
            return Err(invalid(cursor, start, "BigInt literals cannot have a leading zero"));
        }
        let value = fold_digits(digits, 8);
        return Ok((TokenKind::LegacyOctalIntegerLiteral, TokenValue::Number(value)));
    }
    scan_decimal(cursor, start, format!("0{digits}"), false)
}

/// Scan the remainder of a decimal literal whose integer digits (if any)
/// are already in `text`.
fn scan_decimal(
    cursor: &mut Cursor<'_>,
    start: Position,
    mut text: String,
    allow_bigint: bool,
) -> LexResult<(TokenKind, TokenValue)> {
    let mut is_integer = true;
    if text.is_empty() && cursor.peek() != Some('.') {
        text = scan_digits(cursor, start, 10)?;
    }
    if cursor.eat('.') {
        is_integer = false;
        if text.is_empty() {
            text.push('0');
        }
        text.push('.');
        let fraction = scan_digits(cursor, start, 10)?;
        if fraction.is_empty() {
            text.push('0');
        }
        text.push_str(&fraction);
    }
    if matches!(cursor.peek(), Some('e' | 'E')) {
        is_integer = false;
        cursor.advance();
        text.push('e');
        if let Some(sign @ ('+' | '-')) = cursor.peek() {
            cursor.advance();
            text.push(sign);
        }
        let exponent = scan_digits(cursor, start, 10)?;
        if exponent.is_empty() {
            return Err(invalid(cursor, start, "missing digits in exponent"));
        }
        text.push_str(&exponent);
    }
    if cursor.eat('n') {
        if !is_integer {
            return Err(invalid(
                cursor,
                start,
                "BigInt literals cannot have a fraction or exponent",
            ));
        }
        if !allow_bigint {
            return Err(invalid(cursor, start, "BigInt literals cannot have a leading zero"));
        }
        return Ok((TokenKind::BigDecimalIntegerLiteral, TokenValue::BigInt(text)));
    }
    let value = text
        .parse::<f64>()
        .map_err(|_| invalid(cursor, start, "malformed decimal literal"))?;
    Ok((TokenKind::DecimalLiteral, TokenValue::Number(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexErrorKind;

    fn scan(src: &str, strict: bool) -> LexResult<(TokenKind, TokenValue, usize)> {
        let mut cursor = Cursor::new(src);
        let (kind, value) = scan_numeric(&mut cursor, strict)?;
        Ok((kind, value, cursor.offset()))
    }

    fn number(src: &str) -> (TokenKind, f64) {
        match scan(src, false).unwrap() {
            (kind, TokenValue::Number(n), _) => (kind, n),
            other => panic!("expected a number for {src:?}, got {other:?}"),
        }
    }

    fn error_kind(src: &str, strict: bool) -> LexErrorKind {
        scan(src, strict).unwrap_err().kind()
    }

    #[test]
    fn test_decimal_forms() {
        assert_eq!(number("0"), (TokenKind::DecimalLiteral, 0.0));
        assert_eq!(number("42"), (TokenKind::DecimalLiteral, 42.0));
        assert_eq!(number("1.5"), (TokenKind::DecimalLiteral, 1.5));
        assert_eq!(number(".5"), (TokenKind::DecimalLiteral, 0.5));
        assert_eq!(number("1."), (TokenKind::DecimalLiteral, 1.0));
        assert_eq!(number("1e3"), (TokenKind::DecimalLiteral, 1000.0));
        assert_eq!(number("1.5e-2"), (TokenKind::DecimalLiteral, 0.015));
        assert_eq!(number("2E+2"), (TokenKind::DecimalLiteral, 200.0));
        assert_eq!(number("1_000_000"), (TokenKind::DecimalLiteral, 1_000_000.0));
    }

    #[test]
    fn test_radix_forms() {
        assert_eq!(number("0xFF"), (TokenKind::HexIntegerLiteral, 255.0));
        assert_eq!(number("0XFF_FF"), (TokenKind::HexIntegerLiteral, 65535.0));
        assert_eq!(number("0o17"), (TokenKind::OctalIntegerLiteral, 15.0));
        assert_eq!(number("0b1010"), (TokenKind::BinaryIntegerLiteral, 10.0));
    }

    #[test]
    fn test_legacy_octal_equals_modern_octal() {
        assert_eq!(number("017"), (TokenKind::LegacyOctalIntegerLiteral, 15.0));
        assert_eq!(number("017").1, number("0o17").1);
        assert_eq!(number("089"), (TokenKind::DecimalLiteral, 89.0));
        assert_eq!(number("09.5"), (TokenKind::DecimalLiteral, 9.5));
    }

    #[test]
    fn test_legacy_forms_rejected_in_strict_mode() {
        assert_eq!(error_kind("017", true), LexErrorKind::InvalidNumericLiteral);
        assert_eq!(error_kind("08", true), LexErrorKind::InvalidNumericLiteral);
        assert!(scan("0o17", true).is_ok());
        assert!(scan("0", true).is_ok());
        assert!(scan("0.5", true).is_ok());
    }

    #[test]
    fn test_bigint_variants() {
        assert_eq!(
            scan("123n", false).unwrap(),
            (TokenKind::BigDecimalIntegerLiteral, TokenValue::BigInt("123".into()), 4)
        );
        assert_eq!(
            scan("0x1_Fn", false).unwrap(),
            (TokenKind::BigHexIntegerLiteral, TokenValue::BigInt("0x1F".into()), 6)
        );
        assert_eq!(scan("0o7n", false).unwrap().0, TokenKind::BigOctalIntegerLiteral);
        assert_eq!(scan("0b1n", false).unwrap().0, TokenKind::BigBinaryIntegerLiteral);
        assert_eq!(scan("0n", true).unwrap().0, TokenKind::BigDecimalIntegerLiteral);
    }

    #[test]
    fn test_malformed_literals() {
        for src in [
            "1.5n", "1e3n", "017n", "08n", "0x", "0b", "0o8", "1e", "1e+", "1_", "1__0", "0x_1",
            "0_1", "1._5", "3in", "0b12", "1.toString",
        ] {
            assert_eq!(error_kind(src, false), LexErrorKind::InvalidNumericLiteral, "{src}");
        }
    }

    #[test]
    fn test_error_span_starts_at_literal() {
        let err = scan("1.5n", false).unwrap_err();
        let span = err.span().unwrap();
        assert_eq!(span.start.offset, 0);
        assert_eq!(span.end.offset, 4);
    }

    #[test]
    fn test_literal_stops_before_member_access_and_operators() {
        assert_eq!(scan("1..x", false).unwrap().2, 2);
        assert_eq!(scan("017.5", false).unwrap().2, 3);
        assert_eq!(scan("5+1", false).unwrap().2, 1);
    }
}
