//! `stator_lexer`: a context-sensitive ECMAScript lexical scanner.
//!
//! The scanner splits source text into tokens while tracking the small
//! amount of state that JavaScript's lexical grammar depends on: whether `/`
//! starts a regular expression, whether `}` closes a template substitution,
//! strict mode, and whether a `#!` line can still appear.
//!
//! # Crate layout
//!
//! - [`token`]: positions, spans, token kinds, channels, decoded values.
//! - [`error`]: the lexical error taxonomy.
//! - [`cursor`]: character cursor with line/column tracking.
//! - [`mode`]: the template/brace mode stack.
//! - [`context`]: per-run scanner state.
//! - [`oracle`]: regular-expression vs. division lookback.
//! - [`keywords`]: reserved-word tables and identifier character classes.
//! - [`scanner`]: the single-token emitter, [`scanner::next_token`].
//! - [`lexer`]: [`Lexer`], an owning iterator, and [`tokenize`].
//!
//! ```
//! use stator_lexer::{LexerOptions, TokenKind, tokenize};
//!
//! let tokens = tokenize("let x = `n=${n}`;", LexerOptions::default()).unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::NonStrictLet);
//! let rebuilt: String = tokens.iter().map(|t| t.lexeme).collect();
//! assert_eq!(rebuilt, "let x = `n=${n}`;");
//! ```

/// Per-run scanner state.
pub mod context;
/// Character cursor.
pub mod cursor;
/// Lexical errors.
pub mod error;
/// Reserved words and identifier characters.
pub mod keywords;
/// Owning lexer and iterator.
pub mod lexer;
mod literal;
/// Template/brace mode stack.
pub mod mode;
/// Lexer configuration.
pub mod options;
/// Regexp/division lookback.
pub mod oracle;
/// Single-token emitter.
pub mod scanner;
/// Token model.
pub mod token;

pub use context::ScannerContext;
pub use cursor::Cursor;
pub use error::{LexError, LexErrorKind, LexResult};
pub use lexer::{Checkpoint, Lexer, tokenize};
pub use mode::{BraceFrame, ModeStack, ScannerMode};
pub use options::LexerOptions;
pub use token::{Channel, Position, Span, Token, TokenKind, TokenValue};
