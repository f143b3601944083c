//! The pull-based lexer: owns one cursor and one context.

use tracing::trace;

use crate::context::ScannerContext;
use crate::cursor::Cursor;
use crate::error::LexResult;
use crate::options::LexerOptions;
use crate::scanner;
use crate::token::{Position, Span, Token, TokenKind};

/// A saved lexer state. Restoring it replays the same tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint<'src> {
    cursor: Cursor<'src>,
    ctx: ScannerContext,
    fused: bool,
}

/// ECMAScript lexer over a borrowed source string.
///
/// Iterating yields every token, trivia included, up to end of input.
/// After a lexical error the iterator yields that error once and then stops;
/// [`Lexer::skip_to_next_line`] resumes it.
///
/// ```
/// use stator_lexer::{Lexer, TokenKind};
///
/// let kinds: Vec<TokenKind> = Lexer::new("(a+b)/2")
///     .filter_map(Result::ok)
///     .filter(|t| t.is_significant())
///     .map(|t| t.kind)
///     .collect();
/// assert_eq!(kinds[5], TokenKind::Slash);
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    ctx: ScannerContext,
    fused: bool,
}

impl<'src> Lexer<'src> {
    /// Create a lexer with default options (non-strict, start of input).
    pub fn new(source: &'src str) -> Self {
        Self::with_options(source, LexerOptions::default())
    }

    /// Create a lexer configured by `options`.
    pub fn with_options(source: &'src str, options: LexerOptions) -> Self {
        Self {
            cursor: Cursor::new(source),
            ctx: ScannerContext::new(options),
            fused: false,
        }
    }

    /// Scan the next token, returning [`TokenKind::Eof`] at end of input.
    ///
    /// # Errors
    ///
    /// Any lexical error; the lexer is left at the start of the failed token.
    pub fn next_token(&mut self) -> LexResult<Token<'src>> {
        scanner::next_token(&mut self.cursor, &mut self.ctx)
    }

    /// The scanner state as of the last produced token.
    pub fn context(&self) -> &ScannerContext {
        &self.ctx
    }

    /// Switch strict mode for the remaining input.
    pub fn set_strict_mode(&mut self, strict: bool) {
        self.ctx.set_strict_mode(strict);
    }

    /// Position of the next unread character.
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Save the cursor and context so that [`Lexer::restore`] can rewind here.
    pub fn checkpoint(&self) -> Checkpoint<'src> {
        Checkpoint {
            cursor: self.cursor,
            ctx: self.ctx.clone(),
            fused: self.fused,
        }
    }

    /// Rewind to `checkpoint`; the tokens that follow are the same as before.
    pub fn restore(&mut self, checkpoint: Checkpoint<'src>) {
        self.cursor = checkpoint.cursor;
        self.ctx = checkpoint.ctx;
        self.fused = checkpoint.fused;
    }

    /// Discard input through the next line terminator and resume iteration.
    /// The mode stack is kept as is. Returns the span that was skipped.
    pub fn skip_to_next_line(&mut self) -> Span {
        let start = self.cursor.position();
        self.cursor.eat_until_line_terminator();
        self.cursor.advance();
        self.ctx.mark_line_start();
        self.ctx.is_start_of_input = false;
        self.fused = false;
        let skipped = self.cursor.span_from(start);
        trace!(from = %skipped.start, bytes = skipped.len(), "skipped to next line");
        skipped
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = LexResult<Token<'src>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.kind == TokenKind::Eof => {
                self.fused = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.fused = true;
                Some(Err(err))
            }
        }
    }
}

/// Lex all of `source`, trivia included and `Eof` excluded.
///
/// # Errors
///
/// The first lexical error encountered.
pub fn tokenize(source: &str, options: LexerOptions) -> LexResult<Vec<Token<'_>>> {
    Lexer::with_options(source, options).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LexError, LexErrorKind};
    use crate::mode::ScannerMode;
    use crate::token::TokenValue;
    use pretty_assertions::assert_eq;

    /// Significant token kinds of `src`.
    fn kinds_with(src: &str, options: LexerOptions) -> Vec<TokenKind> {
        tokenize(src, options)
            .unwrap()
            .into_iter()
            .filter(Token::is_significant)
            .map(|t| t.kind)
            .collect()
    }

    fn kinds(src: &str) -> Vec<TokenKind> {
        kinds_with(src, LexerOptions::default())
    }

    fn strict() -> LexerOptions {
        LexerOptions::default().with_strict_mode(true)
    }

    fn error(src: &str, options: LexerOptions) -> LexError {
        tokenize(src, options).unwrap_err()
    }

    // ── Regexp vs. division ──────────────────────────────────────────────────

    #[test]
    fn test_division_after_parenthesized_expression() {
        use TokenKind as K;
        assert_eq!(
            kinds("(a+b)/2"),
            vec![
                K::LeftParen,
                K::Identifier,
                K::Plus,
                K::Identifier,
                K::RightParen,
                K::Slash,
                K::DecimalLiteral,
            ]
        );
    }

    #[test]
    fn test_regexp_after_open_paren() {
        use TokenKind as K;
        assert_eq!(
            kinds("(/x/).test(s)"),
            vec![
                K::LeftParen,
                K::RegExpLiteral,
                K::RightParen,
                K::Dot,
                K::Identifier,
                K::LeftParen,
                K::Identifier,
                K::RightParen,
            ]
        );
    }

    #[test]
    fn test_slash_lookback_skips_trivia() {
        use TokenKind as K;
        assert_eq!(
            kinds("a /* c */ / b"),
            vec![K::Identifier, K::Slash, K::Identifier]
        );
        assert_eq!(kinds("return\n/x/g"), vec![K::Return, K::RegExpLiteral]);
    }

    // ── Strict mode ──────────────────────────────────────────────────────────

    #[test]
    fn test_let_follows_strictness() {
        assert_eq!(kinds("let"), vec![TokenKind::NonStrictLet]);
        assert_eq!(kinds_with("let", strict()), vec![TokenKind::StrictLet]);
    }

    #[test]
    fn test_strict_reserved_words() {
        assert_eq!(kinds("static public"), vec![
            TokenKind::Identifier,
            TokenKind::Identifier,
        ]);
        assert_eq!(kinds_with("static public", strict()), vec![
            TokenKind::Static,
            TokenKind::Public,
        ]);
    }

    #[test]
    fn test_octal_literals_and_strictness() {
        let number = |src: &str, options| match tokenize(src, options).unwrap().remove(0).value {
            TokenValue::Number(n) => n,
            other => panic!("expected a number, got {other:?}"),
        };
        assert_eq!(number("0o17", LexerOptions::default()), 15.0);
        assert_eq!(number("017", LexerOptions::default()), 15.0);
        assert_eq!(number("0o17", strict()), 15.0);
        assert_eq!(
            error("017", strict()).kind(),
            LexErrorKind::InvalidNumericLiteral
        );
    }

    #[test]
    fn test_set_strict_mode_mid_stream() {
        let mut lexer = Lexer::new("let; let");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::NonStrictLet);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Semicolon);
        lexer.set_strict_mode(true);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::WhiteSpace);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::StrictLet);
    }

    #[test]
    fn test_use_strict_directive_detection() {
        let options = LexerOptions::default().with_detect_use_strict(true);
        assert_eq!(
            kinds_with("'use strict'; let", options),
            vec![TokenKind::StringLiteral, TokenKind::Semicolon, TokenKind::StrictLet]
        );
        assert_eq!(
            kinds_with("f(); 'use strict'; let", options).last(),
            Some(&TokenKind::NonStrictLet)
        );
        assert_eq!(
            kinds_with("function f() { \"use strict\"; let } let", options),
            vec![
                TokenKind::Function,
                TokenKind::Identifier,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::StringLiteral,
                TokenKind::Semicolon,
                TokenKind::StrictLet,
                TokenKind::RightBrace,
                TokenKind::NonStrictLet,
            ]
        );
        assert_eq!(kinds("'use strict'; let").last(), Some(&TokenKind::NonStrictLet));
    }

    // ── Templates ────────────────────────────────────────────────────────────

    #[test]
    fn test_object_literal_inside_interpolation() {
        use TokenKind as K;
        let tokens = tokenize("`a${ {x:1} }b`", LexerOptions::default()).unwrap();
        let significant: Vec<_> = tokens
            .into_iter()
            .filter(Token::is_significant)
            .map(|t| (t.kind, t.lexeme))
            .collect();
        assert_eq!(
            significant,
            vec![
                (K::TemplateHead, "`a${"),
                (K::LeftBrace, "{"),
                (K::Identifier, "x"),
                (K::Colon, ":"),
                (K::DecimalLiteral, "1"),
                (K::RightBrace, "}"),
                (K::TemplateTail, "}b`"),
            ]
        );
    }

    #[test]
    fn test_nested_templates() {
        use TokenKind as K;
        assert_eq!(
            kinds("`a${`b${c}d`}e`"),
            vec![
                K::TemplateHead,
                K::TemplateHead,
                K::Identifier,
                K::TemplateTail,
                K::TemplateTail,
            ]
        );
    }

    #[test]
    fn test_template_cooked_values() {
        let values: Vec<_> = tokenize("`x${1}y\\n${2}`", LexerOptions::default())
            .unwrap()
            .into_iter()
            .filter_map(|t| match t.value {
                TokenValue::Template(cooked) => Some(cooked),
                _ => None,
            })
            .collect();
        assert_eq!(
            values,
            vec![Some("x".into()), Some("y\n".into()), Some(String::new())]
        );
    }

    #[test]
    fn test_right_brace_after_template_is_division_context() {
        use TokenKind as K;
        assert_eq!(
            kinds("`${a}` / 2"),
            vec![K::TemplateHead, K::Identifier, K::TemplateTail, K::Slash, K::DecimalLiteral]
        );
    }

    #[test]
    fn test_unterminated_interpolation_errors() {
        let err = error("`a${b", LexerOptions::default());
        assert_eq!(err.kind(), LexErrorKind::UnterminatedTemplate);
        assert_eq!(err.span().unwrap().start.offset, 0);

        let err = error("x = `a${ {b", LexerOptions::default());
        assert_eq!(
            err,
            LexError::UnbalancedTemplateBrace {
                span: err.span().unwrap(),
                open_braces: 1,
            }
        );
        assert_eq!(err.span().unwrap().start.offset, 4);

        assert_eq!(
            error("`a${b}c", LexerOptions::default()).kind(),
            LexErrorKind::UnterminatedTemplate
        );
    }

    // ── Hashbang ─────────────────────────────────────────────────────────────

    #[test]
    fn test_hashbang_only_as_first_token() {
        let tokens = tokenize("#!/usr/bin/env node\nx", LexerOptions::default()).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::HashbangLine);
        assert_eq!(tokens[0].lexeme, "#!/usr/bin/env node");

        assert_eq!(
            kinds("x\n#!y"),
            vec![TokenKind::Identifier, TokenKind::Hash, TokenKind::Bang, TokenKind::Identifier]
        );
        assert_eq!(kinds(" #!x")[0], TokenKind::Hash);

        let mid_stream = LexerOptions::default().with_start_of_input(false);
        assert_eq!(kinds_with("#!x", mid_stream)[0], TokenKind::Hash);
    }

    // ── Errors ───────────────────────────────────────────────────────────────

    #[test]
    fn test_unterminated_string_spans_from_quote() {
        let err = error("\"abc", LexerOptions::default());
        assert_eq!(err.kind(), LexErrorKind::UnterminatedString);
        assert_eq!(err.span().unwrap().start, Position::START);

        let err = error("x = 'abc\n'", LexerOptions::default());
        assert_eq!(err.span().unwrap().start.offset, 4);
    }

    #[test]
    fn test_iterator_fuses_after_error() {
        let mut lexer = Lexer::new("a 'b\nc");
        let items: Vec<_> = lexer.by_ref().collect();
        assert_eq!(items.len(), 3);
        assert!(items[2].is_err());
        assert!(lexer.next().is_none());
        assert_eq!(lexer.position().offset, 2);
    }

    #[test]
    fn test_skip_to_next_line_resumes() {
        let mut lexer = Lexer::new("a 'b\nc");
        assert!(lexer.by_ref().last().unwrap().is_err());
        let skipped = lexer.skip_to_next_line();
        assert_eq!(skipped.start.offset, 2);
        assert_eq!(skipped.end.offset, 5);
        let next = lexer.next().unwrap().unwrap();
        assert_eq!(next.kind, TokenKind::Identifier);
        assert_eq!(next.lexeme, "c");
        assert!(next.had_line_terminator_before);
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_skip_to_next_line_keeps_interpolation_open() {
        let mut lexer = Lexer::new("`a${ 'x\n}b`");
        assert_eq!(lexer.next().unwrap().unwrap().kind, TokenKind::TemplateHead);
        assert_eq!(lexer.next().unwrap().unwrap().kind, TokenKind::WhiteSpace);
        let err = lexer.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), LexErrorKind::UnterminatedString);
        assert!(lexer.next().is_none());

        lexer.skip_to_next_line();
        assert_eq!(lexer.context().mode(), ScannerMode::TemplateInterpolation);
        let tail = lexer.next().unwrap().unwrap();
        assert_eq!(tail.kind, TokenKind::TemplateTail);
        assert_eq!(tail.lexeme, "}b`");
        assert_eq!(lexer.context().mode(), ScannerMode::Default);
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_unrecognized_characters_do_not_stop_lexing() {
        let tokens = tokenize("a \u{0} b ¬", LexerOptions::default()).unwrap();
        let errors: Vec<_> = tokens.iter().filter_map(Token::as_error).collect();
        assert_eq!(errors.len(), 2);
        assert!(
            errors
                .iter()
                .all(|e| e.kind() == LexErrorKind::UnexpectedCharacter)
        );
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Unrecognized));
    }

    // ── Misc ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_line_terminator_flag_and_positions() {
        let tokens = tokenize("a\r\n  b", LexerOptions::default()).unwrap();
        let b = tokens.last().unwrap();
        assert!(b.had_line_terminator_before);
        assert_eq!(b.span.start.line, 2);
        assert_eq!(b.span.start.column, 3);
        assert_eq!(tokens[1].kind, TokenKind::LineTerminator);
        assert_eq!(tokens[1].lexeme, "\r\n");
    }

    #[test]
    fn test_cdata_comment_spans_lines() {
        let tokens = tokenize("a <![CDATA[x\ny]]> b", LexerOptions::default()).unwrap();
        let cdata = tokens
            .iter()
            .find(|t| t.kind == TokenKind::CDataComment)
            .unwrap();
        assert_eq!(cdata.lexeme, "<![CDATA[x\ny]]>");
        assert!(tokens.last().unwrap().had_line_terminator_before);
        assert_eq!(
            error("<![CDATA[x", LexerOptions::default()).kind(),
            LexErrorKind::UnterminatedComment
        );
    }

    #[test]
    fn test_checkpoint_restore_replays_tokens() {
        let mut lexer = Lexer::new("x = `a${b}c` / 2");
        for _ in 0..5 {
            lexer.next_token().unwrap();
        }
        let checkpoint = lexer.checkpoint();
        let first: Vec<_> = lexer.by_ref().collect::<LexResult<_>>().unwrap();
        lexer.restore(checkpoint.clone());
        assert_eq!(lexer.checkpoint(), checkpoint);
        let second: Vec<_> = lexer.collect::<LexResult<_>>().unwrap();
        assert_eq!(first, second);
    }
}
