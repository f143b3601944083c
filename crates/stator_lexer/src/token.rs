//! Token model: positions, spans, channels, kinds, and decoded payloads.

use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Position / Span
// ─────────────────────────────────────────────────────────────────────────────

/// A byte offset + line/column location in source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Byte offset from the beginning of the source string.
    pub offset: usize,
    /// 1-based line number (incremented on every *LineTerminator*).
    pub line: u32,
    /// 1-based column number, measured in Unicode scalar values.
    pub column: u32,
}

impl Position {
    /// The position of the first character of a source unit.
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open `[start, end)` source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Inclusive start of the span.
    pub start: Position,
    /// Exclusive end of the span.
    pub end: Position,
}

impl Span {
    /// Build a span from its two endpoints.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes.
    pub const fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    /// `true` for zero-width spans (the end-of-input marker).
    pub const fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Channel
// ─────────────────────────────────────────────────────────────────────────────

/// The channel a token is emitted on.
///
/// A parser normally reads only [`Channel::Default`] tokens; trivia stays in
/// the stream on [`Channel::Hidden`] so source positions are never lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Tokens the grammar consumes.
    Default,
    /// Whitespace, line terminators, comments, and the hashbang line.
    Hidden,
    /// Unrecognized characters, kept in the stream for localized reporting.
    Error,
}

// ─────────────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────────────

/// The syntactic category of a JavaScript lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ── Numeric literals ──────────────────────────────────────────────────
    /// Decimal literal, optionally with fraction and exponent (`1.5e3`).
    /// Also covers non-strict legacy forms such as `08` and `09.5`.
    DecimalLiteral,
    /// `0x…` / `0X…`
    HexIntegerLiteral,
    /// `0o…` / `0O…`
    OctalIntegerLiteral,
    /// Legacy `0`-prefixed octal such as `017` (non-strict mode only).
    LegacyOctalIntegerLiteral,
    /// `0b…` / `0B…`
    BinaryIntegerLiteral,
    /// `123n`
    BigDecimalIntegerLiteral,
    /// `0x1Fn`
    BigHexIntegerLiteral,
    /// `0o17n`
    BigOctalIntegerLiteral,
    /// `0b101n`
    BigBinaryIntegerLiteral,

    // ── String literals ───────────────────────────────────────────────────
    /// String literal enclosed in `"` or `'`.
    StringLiteral,

    // ── Template literals ─────────────────────────────────────────────────
    /// A complete template literal with no substitutions: `` `…` ``.
    NoSubstitutionTemplate,
    /// Opening span of a substituted template: `` `…${ ``.
    TemplateHead,
    /// Middle span between two substitutions: `}…${`.
    TemplateMiddle,
    /// Closing span of a substituted template: `}…`` ` ``.
    TemplateTail,

    // ── Regular-expression literals ───────────────────────────────────────
    /// Regular expression literal `/pattern/flags`.
    RegExpLiteral,

    // ── Identifiers ───────────────────────────────────────────────────────
    /// An identifier that is not a reserved word.
    Identifier,
    /// A private identifier beginning with `#`.
    PrivateIdentifier,

    // ── Reserved words ────────────────────────────────────────────────────
    /// `await`
    Await,
    /// `break`
    Break,
    /// `case`
    Case,
    /// `catch`
    Catch,
    /// `class`
    Class,
    /// `const`
    Const,
    /// `continue`
    Continue,
    /// `debugger`
    Debugger,
    /// `default`
    Default,
    /// `delete`
    Delete,
    /// `do`
    Do,
    /// `else`
    Else,
    /// `enum`
    Enum,
    /// `export`
    Export,
    /// `extends`
    Extends,
    /// `false`
    False,
    /// `finally`
    Finally,
    /// `for`
    For,
    /// `function`
    Function,
    /// `if`
    If,
    /// `import`
    Import,
    /// `in`
    In,
    /// `instanceof`
    Instanceof,
    /// `new`
    New,
    /// `null`
    Null,
    /// `return`
    Return,
    /// `super`
    Super,
    /// `switch`
    Switch,
    /// `this`
    This,
    /// `throw`
    Throw,
    /// `true`
    True,
    /// `try`
    Try,
    /// `typeof`
    Typeof,
    /// `var`
    Var,
    /// `void`
    Void,
    /// `while`
    While,
    /// `with`
    With,
    /// `yield`
    Yield,

    // ── Strict-mode reserved words ────────────────────────────────────────
    /// `let` lexed in strict mode.
    StrictLet,
    /// `let` lexed in non-strict mode, where it may still name a binding.
    NonStrictLet,
    /// `implements` (strict mode only)
    Implements,
    /// `interface` (strict mode only)
    Interface,
    /// `package` (strict mode only)
    Package,
    /// `private` (strict mode only)
    Private,
    /// `protected` (strict mode only)
    Protected,
    /// `public` (strict mode only)
    Public,
    /// `static` (strict mode only)
    Static,

    // ── Contextual keywords ───────────────────────────────────────────────
    /// `async`
    Async,
    /// `from`
    From,
    /// `as`
    As,
    /// `get`
    Get,
    /// `set`
    Set,
    /// `of`
    Of,
    /// `target`
    Target,
    /// `meta`
    Meta,

    // ── Punctuators ───────────────────────────────────────────────────────
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `.`
    Dot,
    /// `...`
    DotDotDot,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `===`
    EqualEqualEqual,
    /// `!==`
    BangEqualEqual,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `**`
    StarStar,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,
    /// `<<`
    LessLess,
    /// `>>`
    GreaterGreater,
    /// `>>>`
    GreaterGreaterGreater,
    /// `&`
    Ampersand,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `!`
    Bang,
    /// `~`
    Tilde,
    /// `&&`
    AmpersandAmpersand,
    /// `||`
    PipePipe,
    /// `??`
    QuestionQuestion,
    /// `?`
    Question,
    /// `:`
    Colon,
    /// `=`
    Equal,
    /// `+=`
    PlusEqual,
    /// `-=`
    MinusEqual,
    /// `*=`
    StarEqual,
    /// `**=`
    StarStarEqual,
    /// `/=`
    SlashEqual,
    /// `%=`
    PercentEqual,
    /// `<<=`
    LessLessEqual,
    /// `>>=`
    GreaterGreaterEqual,
    /// `>>>=`
    GreaterGreaterGreaterEqual,
    /// `&=`
    AmpersandEqual,
    /// `|=`
    PipeEqual,
    /// `^=`
    CaretEqual,
    /// `&&=`
    AmpersandAmpersandEqual,
    /// `||=`
    PipePipeEqual,
    /// `??=`
    QuestionQuestionEqual,
    /// `=>`
    Arrow,
    /// `?.`
    QuestionDot,
    /// A `#` that does not start a private name or the hashbang line.
    Hash,

    // ── Trivia (hidden channel) ───────────────────────────────────────────
    /// A run of non-line-terminator whitespace.
    WhiteSpace,
    /// A single line terminator; `\r\n` is one token.
    LineTerminator,
    /// Single-line comment `// …`.
    SingleLineComment,
    /// Block comment `/* … */`.
    MultiLineComment,
    /// HTML-like comment `<!-- …` or a line-leading `--> …`.
    HtmlComment,
    /// `<![CDATA[ … ]]>`
    CDataComment,
    /// `#!…` on the very first line.
    HashbangLine,

    // ── Error channel ─────────────────────────────────────────────────────
    /// A character that starts no token. Emitted, never fatal.
    Unrecognized,

    // ── End of file ───────────────────────────────────────────────────────
    /// End of input.
    Eof,
}

impl TokenKind {
    /// The channel every token of this kind is emitted on.
    pub const fn channel(self) -> Channel {
        match self {
            Self::WhiteSpace
            | Self::LineTerminator
            | Self::SingleLineComment
            | Self::MultiLineComment
            | Self::HtmlComment
            | Self::CDataComment
            | Self::HashbangLine => Channel::Hidden,
            Self::Unrecognized => Channel::Error,
            _ => Channel::Default,
        }
    }

    /// `true` for whitespace, line terminators, and comments.
    pub const fn is_trivia(self) -> bool {
        matches!(self.channel(), Channel::Hidden)
    }

    /// `true` for comment kinds (the hashbang line included).
    pub const fn is_comment(self) -> bool {
        matches!(
            self,
            Self::SingleLineComment
                | Self::MultiLineComment
                | Self::HtmlComment
                | Self::CDataComment
                | Self::HashbangLine
        )
    }

    /// `true` for every numeric literal kind, BigInt variants included.
    pub const fn is_numeric_literal(self) -> bool {
        matches!(
            self,
            Self::DecimalLiteral
                | Self::HexIntegerLiteral
                | Self::OctalIntegerLiteral
                | Self::LegacyOctalIntegerLiteral
                | Self::BinaryIntegerLiteral
                | Self::BigDecimalIntegerLiteral
                | Self::BigHexIntegerLiteral
                | Self::BigOctalIntegerLiteral
                | Self::BigBinaryIntegerLiteral
        )
    }

    /// `true` for the `…n` BigInt kinds.
    pub const fn is_bigint_literal(self) -> bool {
        matches!(
            self,
            Self::BigDecimalIntegerLiteral
                | Self::BigHexIntegerLiteral
                | Self::BigOctalIntegerLiteral
                | Self::BigBinaryIntegerLiteral
        )
    }

    /// `true` for tokens that complete a literal value: numbers, strings,
    /// the final piece of a template, regular expressions, `true`, `false`,
    /// and `null`.
    pub const fn is_literal(self) -> bool {
        self.is_numeric_literal()
            || matches!(
                self,
                Self::StringLiteral
                    | Self::NoSubstitutionTemplate
                    | Self::TemplateTail
                    | Self::RegExpLiteral
                    | Self::True
                    | Self::False
                    | Self::Null
            )
    }

    /// `true` for words that are keywords only in particular grammatical
    /// positions and otherwise name ordinary bindings or properties.
    pub const fn is_contextual_keyword(self) -> bool {
        matches!(
            self,
            Self::Async
                | Self::From
                | Self::As
                | Self::Get
                | Self::Set
                | Self::Of
                | Self::Target
                | Self::Meta
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TokenValue
// ─────────────────────────────────────────────────────────────────────────────

/// The decoded payload associated with a [`Token`].
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// No semantic value (punctuators, reserved words, trivia, EOF, …).
    None,
    /// Identifier name with escapes decoded, or the cooked value of a string
    /// literal.
    Str(String),
    /// Cooked value of a template segment. `None` when the segment contains
    /// an escape that has no cooked value (legal only in tagged templates).
    Template(Option<String>),
    /// Numeric value of a non-BigInt numeric literal.
    Number(f64),
    /// Source digits of a BigInt literal, radix prefix included, separators
    /// and the `n` suffix removed.
    BigInt(String),
    /// Body and flags of a regular-expression literal.
    RegExp {
        /// Text between the delimiting slashes.
        pattern: String,
        /// Flag characters after the closing slash.
        flags: String,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────────────

/// A single lexical token. The `lexeme` borrows the exact source slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'src> {
    /// The syntactic category.
    pub kind: TokenKind,
    /// The exact source text covered by [`Token::span`].
    pub lexeme: &'src str,
    /// The decoded value, if any.
    pub value: TokenValue,
    /// Source location of this token.
    pub span: Span,
    /// The channel this token is emitted on.
    pub channel: Channel,
    /// `true` when at least one *LineTerminator* appeared between the previous
    /// significant token and this one.
    ///
    /// The parser uses this flag for Automatic Semicolon Insertion (ASI).
    pub had_line_terminator_before: bool,
}

impl Token<'_> {
    /// `true` for tokens that take part in regex/division lookback, i.e.
    /// everything except trivia and the end-of-input marker.
    pub const fn is_significant(&self) -> bool {
        !self.kind.is_trivia() && !matches!(self.kind, TokenKind::Eof)
    }

    /// The non-fatal error an [`TokenKind::Unrecognized`] token stands for.
    pub fn as_error(&self) -> Option<crate::error::LexError> {
        if self.kind != TokenKind::Unrecognized {
            return None;
        }
        let ch = self.lexeme.chars().next()?;
        Some(crate::error::LexError::UnexpectedCharacter {
            ch,
            span: self.span,
        })
    }
}
