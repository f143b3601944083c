//! Error types for the Stator lexer.

use thiserror::Error;

use crate::token::Span;

/// All errors that can be produced while lexing.
///
/// Every user-facing variant carries the span of the offending construct,
/// starting at its opening delimiter or first character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A `"` or `'` string reached a line terminator or end of input.
    #[error("unterminated string literal at {span}")]
    UnterminatedString {
        /// From the opening quote to where scanning stopped.
        span: Span,
    },

    /// A template literal or interpolation was still open at end of input.
    #[error("unterminated template literal at {span}")]
    UnterminatedTemplate {
        /// From the opening backtick to end of input.
        span: Span,
    },

    /// A `/*` or `<![CDATA[` comment was never closed.
    #[error("unterminated comment at {span}")]
    UnterminatedComment {
        /// From the comment opener to end of input.
        span: Span,
    },

    /// A regular-expression body or character class was never closed.
    #[error("unterminated regular expression literal at {span}")]
    UnterminatedRegex {
        /// From the opening `/` to where scanning stopped.
        span: Span,
    },

    /// A malformed `\` escape in a string literal or identifier.
    #[error("invalid escape sequence at {span}: {reason}")]
    InvalidEscapeSequence {
        /// The escape sequence, backslash included.
        span: Span,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// A malformed numeric literal.
    #[error("invalid numeric literal at {span}: {reason}")]
    InvalidNumericLiteral {
        /// The literal scanned so far.
        span: Span,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// End of input inside an interpolation that still had open braces.
    #[error("unbalanced braces in template interpolation at {span} ({open_braces} unclosed)")]
    UnbalancedTemplateBrace {
        /// From the opening backtick to end of input.
        span: Span,
        /// Number of `{` not yet closed inside the innermost interpolation.
        open_braces: u32,
    },

    /// A character that starts no token. The scanner never returns this
    /// variant; it is the error an [`Unrecognized`] token stands for.
    ///
    /// [`Unrecognized`]: crate::token::TokenKind::Unrecognized
    #[error("unexpected character {ch:?} at {span}")]
    UnexpectedCharacter {
        /// The offending character.
        ch: char,
        /// Its location.
        span: Span,
    },

    /// A lexer invariant was violated. Never caused by input text.
    #[error("internal error: {0}")]
    Internal(&'static str),
}

/// Field-less discriminant of [`LexError`], convenient for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    /// See [`LexError::UnterminatedString`].
    UnterminatedString,
    /// See [`LexError::UnterminatedTemplate`].
    UnterminatedTemplate,
    /// See [`LexError::UnterminatedComment`].
    UnterminatedComment,
    /// See [`LexError::UnterminatedRegex`].
    UnterminatedRegex,
    /// See [`LexError::InvalidEscapeSequence`].
    InvalidEscapeSequence,
    /// See [`LexError::InvalidNumericLiteral`].
    InvalidNumericLiteral,
    /// See [`LexError::UnbalancedTemplateBrace`].
    UnbalancedTemplateBrace,
    /// See [`LexError::UnexpectedCharacter`].
    UnexpectedCharacter,
    /// See [`LexError::Internal`].
    Internal,
}

impl LexError {
    /// The discriminant of this error.
    pub const fn kind(&self) -> LexErrorKind {
        match self {
            Self::UnterminatedString { .. } => LexErrorKind::UnterminatedString,
            Self::UnterminatedTemplate { .. } => LexErrorKind::UnterminatedTemplate,
            Self::UnterminatedComment { .. } => LexErrorKind::UnterminatedComment,
            Self::UnterminatedRegex { .. } => LexErrorKind::UnterminatedRegex,
            Self::InvalidEscapeSequence { .. } => LexErrorKind::InvalidEscapeSequence,
            Self::InvalidNumericLiteral { .. } => LexErrorKind::InvalidNumericLiteral,
            Self::UnbalancedTemplateBrace { .. } => LexErrorKind::UnbalancedTemplateBrace,
            Self::UnexpectedCharacter { .. } => LexErrorKind::UnexpectedCharacter,
            Self::Internal(_) => LexErrorKind::Internal,
        }
    }

    /// The source span of the offending construct, if the error has one.
    pub const fn span(&self) -> Option<Span> {
        match self {
            Self::UnterminatedString { span }
            | Self::UnterminatedTemplate { span }
            | Self::UnterminatedComment { span }
            | Self::UnterminatedRegex { span }
            | Self::InvalidEscapeSequence { span, .. }
            | Self::InvalidNumericLiteral { span, .. }
            | Self::UnbalancedTemplateBrace { span, .. }
            | Self::UnexpectedCharacter { span, .. } => Some(*span),
            Self::Internal(_) => None,
        }
    }
}

/// Convenient `Result` alias for fallible lexer operations.
pub type LexResult<T> = Result<T, LexError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Position;

    fn span_at(line: u32, column: u32) -> Span {
        let p = Position {
            offset: 0,
            line,
            column,
        };
        Span::new(p, p)
    }

    #[test]
    fn test_messages_include_location() {
        let err = LexError::UnterminatedString {
            span: span_at(3, 7),
        };
        assert_eq!(err.to_string(), "unterminated string literal at 3:7");

        let err = LexError::InvalidNumericLiteral {
            span: span_at(1, 1),
            reason: "missing digits after radix prefix",
        };
        assert_eq!(
            err.to_string(),
            "invalid numeric literal at 1:1: missing digits after radix prefix"
        );
    }

    #[test]
    fn test_kind_and_span() {
        let err = LexError::UnbalancedTemplateBrace {
            span: span_at(2, 1),
            open_braces: 2,
        };
        assert_eq!(err.kind(), LexErrorKind::UnbalancedTemplateBrace);
        assert_eq!(err.span(), Some(span_at(2, 1)));
        assert_eq!(LexError::Internal("x").span(), None);
    }
}
