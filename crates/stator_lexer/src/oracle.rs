//! Regular-expression vs. division disambiguation.

use crate::token::TokenKind;

/// Returns `true` when a `/` should open a regular-expression literal rather
/// than act as a division operator, given the most recent significant token.
///
/// `/` is *division* only after tokens that end an expression: identifiers
/// (contextual keywords included), literals, `)`, `]`, `}`, postfix `++` /
/// `--`, and `this` / `super`. Every other context, start of input included,
/// is a regexp.
///
/// `}` is always treated as expression-ending, so `{}/foo/` lexes as
/// division. A parser that knows the brace closed a block statement can
/// re-lex from a checkpoint.
///
/// `let` is a declaration keyword here, so non-strict `let / 2`, where `let`
/// names a binding, scans `/ 2` as the start of a regexp.
pub fn regex_allowed_here(last: Option<TokenKind>) -> bool {
    let Some(kind) = last else {
        return true;
    };
    if kind.is_literal() || kind.is_contextual_keyword() {
        return false;
    }
    !matches!(
        kind,
        TokenKind::Identifier
            | TokenKind::PrivateIdentifier
            | TokenKind::RightParen
            | TokenKind::RightBracket
            | TokenKind::RightBrace
            | TokenKind::PlusPlus
            | TokenKind::MinusMinus
            | TokenKind::This
            | TokenKind::Super
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_at_start_of_input() {
        assert!(regex_allowed_here(None));
    }

    #[test]
    fn test_division_after_expression_enders() {
        for kind in [
            TokenKind::Identifier,
            TokenKind::DecimalLiteral,
            TokenKind::BigHexIntegerLiteral,
            TokenKind::StringLiteral,
            TokenKind::TemplateTail,
            TokenKind::NoSubstitutionTemplate,
            TokenKind::RegExpLiteral,
            TokenKind::True,
            TokenKind::Null,
            TokenKind::RightParen,
            TokenKind::RightBracket,
            TokenKind::RightBrace,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::This,
            TokenKind::Super,
            TokenKind::Of,
        ] {
            assert!(!regex_allowed_here(Some(kind)), "{kind:?}");
        }
    }

    #[test]
    fn test_regex_after_operators_openers_and_keywords() {
        for kind in [
            TokenKind::LeftParen,
            TokenKind::LeftBracket,
            TokenKind::LeftBrace,
            TokenKind::Equal,
            TokenKind::Plus,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::Return,
            TokenKind::Typeof,
            TokenKind::Yield,
            TokenKind::Await,
            TokenKind::TemplateHead,
            TokenKind::TemplateMiddle,
            TokenKind::Arrow,
            TokenKind::NonStrictLet,
        ] {
            assert!(regex_allowed_here(Some(kind)), "{kind:?}");
        }
    }
}
