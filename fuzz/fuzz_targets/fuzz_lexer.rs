#![no_main]

use libfuzzer_sys::fuzz_target;
use stator_lexer::{Lexer, LexerOptions, Token, TokenKind};

fuzz_target!(|data: &[u8]| {
    // Lex arbitrary UTF-8 in both modes. A successful run must partition the
    // input exactly; a failed run must leave the lexer at the failed token.
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    for strict in [false, true] {
        let options = LexerOptions::default().with_strict_mode(strict);
        let mut lexer = Lexer::with_options(source, options);
        let mut rebuilt = String::with_capacity(source.len());
        let mut skips = 0usize;

        loop {
            match lexer.next_token() {
                Ok(Token {
                    kind: TokenKind::Eof,
                    span,
                    ..
                }) => {
                    assert_eq!(span.start.offset, source.len(), "eof must be at end of input");
                    break;
                }
                Ok(token) => {
                    assert_eq!(
                        token.span.start.offset,
                        rebuilt.len(),
                        "token must start where the previous one ended"
                    );
                    assert!(token.span.len() > 0, "only eof may be empty");
                    rebuilt.push_str(token.lexeme);
                }
                Err(err) => {
                    let span = err.span().expect("user-facing errors carry a span");
                    assert!(span.start.offset <= source.len());
                    assert_eq!(lexer.position().offset, rebuilt.len(), "error must not consume input");
                    let skipped = lexer.skip_to_next_line();
                    if skipped.is_empty() {
                        // An interpolation left open at end of input.
                        break;
                    }
                    rebuilt.push_str(&source[skipped.start.offset..skipped.end.offset]);
                    skips += 1;
                    assert!(skips <= source.len() + 1, "resynchronization must make progress");
                }
            }
        }

        assert_eq!(rebuilt, source, "lexemes and skipped spans must rebuild the input");
    }
});
