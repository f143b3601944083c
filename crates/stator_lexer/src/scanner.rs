//! The token emitter: one call, one token.
//!
//! [`next_token`] reads from a [`Cursor`] under the rules of a
//! [`ScannerContext`] and produces exactly one [`Token`]. A scan first runs
//! against a read-only view of the context and returns the token together
//! with the state change it implies; the change is committed only when the
//! token was produced. A failed scan therefore leaves both the cursor and
//! the context exactly as they were.

use tracing::{debug, trace};

use crate::context::ScannerContext;
use crate::cursor::{Cursor, is_line_terminator, is_whitespace};
use crate::error::{LexError, LexResult};
use crate::keywords::{classify, is_id_continue, is_id_start};
use crate::literal::numeric::scan_numeric;
use crate::literal::regexp::scan_regexp;
use crate::literal::string::{scan_string, scan_unicode_escape};
use crate::literal::template::scan_template_segment;
use crate::mode::CloseBrace;
use crate::oracle::regex_allowed_here;
use crate::token::{Position, Token, TokenKind, TokenValue};

// ─────────────────────────────────────────────────────────────────────────────
// Public entry point
// ─────────────────────────────────────────────────────────────────────────────

/// Scan the next token at `cursor` and advance both the cursor and `ctx`.
///
/// At end of input an [`TokenKind::Eof`] token with an empty lexeme is
/// returned, and keeps being returned on further calls.
///
/// # Errors
///
/// Any [`LexError`] other than `UnexpectedCharacter` (which is reported as
/// an [`TokenKind::Unrecognized`] token instead). On error the cursor is
/// rewound to the start of the failed token and `ctx` is untouched.
pub fn next_token<'src>(
    cursor: &mut Cursor<'src>,
    ctx: &mut ScannerContext,
) -> LexResult<Token<'src>> {
    let saved = *cursor;
    let result = scan(cursor, ctx).and_then(|(token, action)| {
        commit(ctx, &token, action)?;
        Ok(token)
    });
    match result {
        Ok(token) => {
            trace!(kind = ?token.kind, offset = token.span.start.offset, "token");
            Ok(token)
        }
        Err(err) => {
            *cursor = saved;
            debug!(kind = ?err.kind(), offset = saved.offset(), "lexical error");
            Err(err)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Context transitions
// ─────────────────────────────────────────────────────────────────────────────

/// The mode-stack change a scanned token asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    None,
    OpenBrace,
    CloseBrace,
    /// A `TemplateHead` opened the first substitution of a template.
    EnterInterpolation(Position),
    /// A `TemplateMiddle` closed one substitution and opened the next.
    ContinueInterpolation(Position),
    /// A `TemplateTail` closed the last substitution.
    ExitInterpolation,
}

fn commit(ctx: &mut ScannerContext, token: &Token<'_>, action: Action) -> LexResult<()> {
    match action {
        Action::None => {}
        Action::OpenBrace => {
            ctx.modes.on_open_brace();
            ctx.push_strict_scope();
        }
        Action::CloseBrace => {
            ctx.modes.on_close_brace()?;
            ctx.pop_strict_scope();
        }
        Action::EnterInterpolation(template_start) => {
            ctx.modes.enter_template_interpolation(template_start);
        }
        Action::ContinueInterpolation(template_start) => {
            close_interpolation(ctx)?;
            ctx.modes.enter_template_interpolation(template_start);
        }
        Action::ExitInterpolation => close_interpolation(ctx)?,
    }

    ctx.is_start_of_input = false;
    if token.is_significant() {
        if token.kind == TokenKind::StringLiteral {
            ctx.observe_directive(token.lexeme);
        }
        ctx.last_significant_kind = Some(token.kind);
        ctx.pending_line_terminator = false;
        ctx.at_line_start = false;
    } else if token.kind == TokenKind::LineTerminator
        || (matches!(
            token.kind,
            TokenKind::MultiLineComment | TokenKind::CDataComment
        ) && token.lexeme.contains(is_line_terminator))
    {
        ctx.mark_line_start();
    }
    Ok(())
}

fn close_interpolation(ctx: &mut ScannerContext) -> LexResult<()> {
    match ctx.modes.on_close_brace()? {
        CloseBrace::EndsInterpolation => Ok(()),
        CloseBrace::Ordinary => Err(LexError::Internal(
            "template continuation outside an interpolation",
        )),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

fn make_token<'src>(
    cursor: &Cursor<'src>,
    start: Position,
    kind: TokenKind,
    value: TokenValue,
    ctx: &ScannerContext,
) -> Token<'src> {
    Token {
        kind,
        lexeme: cursor.slice_from(start.offset),
        value,
        span: cursor.span_from(start),
        channel: kind.channel(),
        had_line_terminator_before: ctx.pending_line_terminator,
    }
}

fn scan<'src>(
    cursor: &mut Cursor<'src>,
    ctx: &ScannerContext,
) -> LexResult<(Token<'src>, Action)> {
    let start = cursor.position();
    let Some(c) = cursor.peek() else {
        return end_of_input(cursor, ctx);
    };

    let mut action = Action::None;
    let (kind, value) = match c {
        // ── Hashbang (first token only) ──────────────────────────────────
        '#' if ctx.is_start_of_input && cursor.peek2() == Some('!') => {
            cursor.eat_until_line_terminator();
            (TokenKind::HashbangLine, TokenValue::None)
        }

        // ── Line terminators and whitespace ──────────────────────────────
        c if is_line_terminator(c) => {
            cursor.advance();
            (TokenKind::LineTerminator, TokenValue::None)
        }
        c if is_whitespace(c) => {
            cursor.eat_while(is_whitespace);
            (TokenKind::WhiteSpace, TokenValue::None)
        }

        // ── Comments / division / regexp ─────────────────────────────────
        '/' => scan_slash(cursor, ctx)?,

        // ── HTML-like comments ───────────────────────────────────────────
        '<' if ctx.html_comments && cursor.starts_with("<!--") => {
            cursor.eat_until_line_terminator();
            (TokenKind::HtmlComment, TokenValue::None)
        }
        '<' if ctx.html_comments && cursor.starts_with("<![CDATA[") => {
            scan_delimited_comment(cursor, "<![CDATA[", "]]>", TokenKind::CDataComment)?
        }
        '-' if ctx.html_comments && ctx.at_line_start && cursor.starts_with("-->") => {
            cursor.eat_until_line_terminator();
            (TokenKind::HtmlComment, TokenValue::None)
        }

        // ── String literals ──────────────────────────────────────────────
        '"' | '\'' => {
            let cooked = scan_string(cursor, c, ctx.strict_mode)?;
            (TokenKind::StringLiteral, TokenValue::Str(cooked))
        }

        // ── Template literals ────────────────────────────────────────────
        '`' => {
            cursor.advance();
            let segment = scan_template_segment(cursor, start)?;
            if segment.opens_interpolation {
                action = Action::EnterInterpolation(start);
                (TokenKind::TemplateHead, TokenValue::Template(segment.cooked))
            } else {
                (
                    TokenKind::NoSubstitutionTemplate,
                    TokenValue::Template(segment.cooked),
                )
            }
        }

        // ── Numeric literals ─────────────────────────────────────────────
        '0'..='9' => scan_numeric(cursor, ctx.strict_mode)?,
        '.' if matches!(cursor.peek2(), Some('0'..='9')) => {
            scan_numeric(cursor, ctx.strict_mode)?
        }

        // ── Braces: `}` may continue a template ──────────────────────────
        '{' => {
            cursor.advance();
            action = Action::OpenBrace;
            (TokenKind::LeftBrace, TokenValue::None)
        }
        '}' => match ctx.modes.classify_close_brace() {
            CloseBrace::EndsInterpolation => {
                let template_start = ctx
                    .modes
                    .innermost_interpolation()
                    .map(|frame| frame.template_start)
                    .ok_or(LexError::Internal("interpolation frame missing"))?;
                cursor.advance();
                let segment = scan_template_segment(cursor, template_start)?;
                if segment.opens_interpolation {
                    action = Action::ContinueInterpolation(template_start);
                    (TokenKind::TemplateMiddle, TokenValue::Template(segment.cooked))
                } else {
                    action = Action::ExitInterpolation;
                    (TokenKind::TemplateTail, TokenValue::Template(segment.cooked))
                }
            }
            CloseBrace::Ordinary => {
                cursor.advance();
                action = Action::CloseBrace;
                (TokenKind::RightBrace, TokenValue::None)
            }
        },

        // ── Private names / identifiers / keywords ───────────────────────
        '#' if starts_private_name(cursor) => {
            cursor.advance();
            let (name, _) = scan_identifier_name(cursor)?;
            (TokenKind::PrivateIdentifier, TokenValue::Str(name))
        }
        '\\' if cursor.peek2() == Some('u') => scan_identifier(cursor, ctx.strict_mode)?,
        c if is_id_start(c) => scan_identifier(cursor, ctx.strict_mode)?,

        // ── Punctuators, then anything else ──────────────────────────────
        _ => match scan_punctuator(cursor) {
            Some(kind) => (kind, TokenValue::None),
            None => {
                cursor.advance();
                (TokenKind::Unrecognized, TokenValue::None)
            }
        },
    };

    Ok((make_token(cursor, start, kind, value, ctx), action))
}

fn end_of_input<'src>(
    cursor: &Cursor<'src>,
    ctx: &ScannerContext,
) -> LexResult<(Token<'src>, Action)> {
    if let Some(frame) = ctx.modes.innermost_interpolation() {
        let span = cursor.span_from(frame.template_start);
        return Err(if frame.open_braces == 0 {
            LexError::UnterminatedTemplate { span }
        } else {
            LexError::UnbalancedTemplateBrace {
                span,
                open_braces: frame.open_braces,
            }
        });
    }
    let here = cursor.position();
    Ok((
        make_token(cursor, here, TokenKind::Eof, TokenValue::None, ctx),
        Action::None,
    ))
}

// ─────────────────────────────────────────────────────────────────────────────
// Comments, division, regexp
// ─────────────────────────────────────────────────────────────────────────────

fn scan_slash(cursor: &mut Cursor<'_>, ctx: &ScannerContext) -> LexResult<(TokenKind, TokenValue)> {
    match cursor.peek2() {
        Some('/') => {
            cursor.eat_until_line_terminator();
            Ok((TokenKind::SingleLineComment, TokenValue::None))
        }
        Some('*') => scan_delimited_comment(cursor, "/*", "*/", TokenKind::MultiLineComment),
        _ if regex_allowed_here(ctx.last_significant_kind) => {
            let (pattern, flags) = scan_regexp(cursor)?;
            Ok((TokenKind::RegExpLiteral, TokenValue::RegExp { pattern, flags }))
        }
        Some('=') => {
            cursor.eat_str("/=");
            Ok((TokenKind::SlashEqual, TokenValue::None))
        }
        _ => {
            cursor.advance();
            Ok((TokenKind::Slash, TokenValue::None))
        }
    }
}

/// `/* … */` and `<![CDATA[ … ]]>`: both may span lines.
fn scan_delimited_comment(
    cursor: &mut Cursor<'_>,
    open: &str,
    close: &str,
    kind: TokenKind,
) -> LexResult<(TokenKind, TokenValue)> {
    let start = cursor.position();
    cursor.eat_str(open);
    loop {
        if cursor.eat_str(close) {
            return Ok((kind, TokenValue::None));
        }
        if cursor.advance().is_none() {
            return Err(LexError::UnterminatedComment {
                span: cursor.span_from(start),
            });
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Identifiers
// ─────────────────────────────────────────────────────────────────────────────

fn starts_private_name(cursor: &Cursor<'_>) -> bool {
    match cursor.peek2() {
        Some('\\') => cursor.peek3() == Some('u'),
        Some(c) => is_id_start(c),
        None => false,
    }
}

fn scan_identifier(cursor: &mut Cursor<'_>, strict_mode: bool) -> LexResult<(TokenKind, TokenValue)> {
    let (name, escaped) = scan_identifier_name(cursor)?;
    let kind = if escaped {
        TokenKind::Identifier
    } else {
        classify(&name, strict_mode)
    };
    let value = if kind == TokenKind::Identifier {
        TokenValue::Str(name)
    } else {
        TokenValue::None
    };
    Ok((kind, value))
}

/// Scan an *IdentifierName*, decoding `\u` escapes. Returns the decoded
/// name and whether any escape was used.
fn scan_identifier_name(cursor: &mut Cursor<'_>) -> LexResult<(String, bool)> {
    let mut name = String::new();
    let mut escaped = false;
    loop {
        let valid: fn(char) -> bool = if name.is_empty() {
            is_id_start
        } else {
            is_id_continue
        };
        match cursor.peek() {
            Some('\\') => {
                let escape_start = cursor.position();
                cursor.advance();
                let decoded = if cursor.eat('u') {
                    scan_unicode_escape(cursor)
                } else {
                    Err("only \\u escapes are allowed in identifiers")
                };
                let c = decoded
                    .and_then(|cp| {
                        char::from_u32(cp)
                            .filter(|&c| valid(c))
                            .ok_or("escaped character is not valid in an identifier")
                    })
                    .map_err(|reason| LexError::InvalidEscapeSequence {
                        span: cursor.span_from(escape_start),
                        reason,
                    })?;
                name.push(c);
                escaped = true;
            }
            Some(c) if valid(c) => {
                cursor.advance();
                name.push(c);
            }
            _ => return Ok((name, escaped)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Punctuators
// ─────────────────────────────────────────────────────────────────────────────

/// Punctuators starting with `first`, longest first.
fn punctuators(first: char) -> &'static [(&'static str, TokenKind)] {
    use TokenKind as K;
    match first {
        '(' => &[("(", K::LeftParen)],
        ')' => &[(")", K::RightParen)],
        '[' => &[("[", K::LeftBracket)],
        ']' => &[("]", K::RightBracket)],
        ';' => &[(";", K::Semicolon)],
        ',' => &[(",", K::Comma)],
        ':' => &[(":", K::Colon)],
        '~' => &[("~", K::Tilde)],
        '#' => &[("#", K::Hash)],
        '.' => &[("...", K::DotDotDot), (".", K::Dot)],
        '<' => &[
            ("<<=", K::LessLessEqual),
            ("<<", K::LessLess),
            ("<=", K::LessEqual),
            ("<", K::Less),
        ],
        '>' => &[
            (">>>=", K::GreaterGreaterGreaterEqual),
            (">>>", K::GreaterGreaterGreater),
            (">>=", K::GreaterGreaterEqual),
            (">>", K::GreaterGreater),
            (">=", K::GreaterEqual),
            (">", K::Greater),
        ],
        '=' => &[
            ("===", K::EqualEqualEqual),
            ("==", K::EqualEqual),
            ("=>", K::Arrow),
            ("=", K::Equal),
        ],
        '!' => &[("!==", K::BangEqualEqual), ("!=", K::BangEqual), ("!", K::Bang)],
        '+' => &[("++", K::PlusPlus), ("+=", K::PlusEqual), ("+", K::Plus)],
        '-' => &[("--", K::MinusMinus), ("-=", K::MinusEqual), ("-", K::Minus)],
        '*' => &[
            ("**=", K::StarStarEqual),
            ("**", K::StarStar),
            ("*=", K::StarEqual),
            ("*", K::Star),
        ],
        '%' => &[("%=", K::PercentEqual), ("%", K::Percent)],
        '&' => &[
            ("&&=", K::AmpersandAmpersandEqual),
            ("&&", K::AmpersandAmpersand),
            ("&=", K::AmpersandEqual),
            ("&", K::Ampersand),
        ],
        '|' => &[
            ("||=", K::PipePipeEqual),
            ("||", K::PipePipe),
            ("|=", K::PipeEqual),
            ("|", K::Pipe),
        ],
        '^' => &[("^=", K::CaretEqual), ("^", K::Caret)],
        '?' => &[
            ("??=", K::QuestionQuestionEqual),
            ("??", K::QuestionQuestion),
            ("?.", K::QuestionDot),
            ("?", K::Question),
        ],
        _ => &[],
    }
}

fn scan_punctuator(cursor: &mut Cursor<'_>) -> Option<TokenKind> {
    let first = cursor.peek()?;
    for &(text, kind) in punctuators(first) {
        if !cursor.starts_with(text) {
            continue;
        }
        // `a?.5:b` is a conditional, not optional chaining.
        if kind == TokenKind::QuestionDot && matches!(cursor.peek3(), Some('0'..='9')) {
            continue;
        }
        cursor.eat_str(text);
        return Some(kind);
    }
    None
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
