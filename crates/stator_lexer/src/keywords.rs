//! Reserved-word classification and identifier character classes.

use crate::token::TokenKind;

/// Words reserved only in strict-mode code.
pub const STRICT_MODE_RESERVED_WORDS: [&str; 8] = [
    "implements",
    "interface",
    "let",
    "package",
    "private",
    "protected",
    "public",
    "static",
];

/// `ID_Start` code points that NFKC closure removes from `XID_Start`.
/// Each is also `ID_Continue`, which covers the `XID_Continue` gap too.
fn is_non_nfkc_id_start(c: char) -> bool {
    matches!(
        c,
        '\u{037A}'
            | '\u{0E33}'
            | '\u{0EB3}'
            | '\u{309B}'
            | '\u{309C}'
            | '\u{FC5E}'..='\u{FC63}'
            | '\u{FDFA}'
            | '\u{FDFB}'
            | '\u{FE70}'
            | '\u{FE72}'
            | '\u{FE74}'
            | '\u{FE76}'
            | '\u{FE78}'
            | '\u{FE7A}'
            | '\u{FE7C}'
            | '\u{FE7E}'
            | '\u{FF9E}'
            | '\u{FF9F}'
    )
}

/// Returns `true` for characters that may *start* a JS identifier
/// (`ID_Start`, `$`, `_`).
pub fn is_id_start(c: char) -> bool {
    if c.is_ascii() {
        c == '$' || c == '_' || c.is_ascii_alphabetic()
    } else {
        unicode_ident::is_xid_start(c) || is_non_nfkc_id_start(c)
    }
}

/// Returns `true` for characters that may *continue* a JS identifier
/// (`ID_Continue`, `$`, ZWNJ, ZWJ).
pub fn is_id_continue(c: char) -> bool {
    if c.is_ascii() {
        c == '$' || c == '_' || c.is_ascii_alphanumeric()
    } else {
        c == '\u{200C}'
            || c == '\u{200D}'
            || unicode_ident::is_xid_continue(c)
            || is_non_nfkc_id_start(c)
    }
}

/// Map an identifier-shaped word to its [`TokenKind`].
///
/// Unescaped words only: an identifier spelled with `\u` escapes is always
/// [`TokenKind::Identifier`], even when it decodes to a reserved word.
pub fn classify(word: &str, strict_mode: bool) -> TokenKind {
    reserved_word(word)
        .or_else(|| strict_mode_word(word, strict_mode))
        .unwrap_or(TokenKind::Identifier)
}

fn reserved_word(word: &str) -> Option<TokenKind> {
    let kind = match word {
        "await" => TokenKind::Await,
        "break" => TokenKind::Break,
        "case" => TokenKind::Case,
        "catch" => TokenKind::Catch,
        "class" => TokenKind::Class,
        "const" => TokenKind::Const,
        "continue" => TokenKind::Continue,
        "debugger" => TokenKind::Debugger,
        "default" => TokenKind::Default,
        "delete" => TokenKind::Delete,
        "do" => TokenKind::Do,
        "else" => TokenKind::Else,
        "enum" => TokenKind::Enum,
        "export" => TokenKind::Export,
        "extends" => TokenKind::Extends,
        "false" => TokenKind::False,
        "finally" => TokenKind::Finally,
        "for" => TokenKind::For,
        "function" => TokenKind::Function,
        "if" => TokenKind::If,
        "import" => TokenKind::Import,
        "in" => TokenKind::In,
        "instanceof" => TokenKind::Instanceof,
        "new" => TokenKind::New,
        "null" => TokenKind::Null,
        "return" => TokenKind::Return,
        "super" => TokenKind::Super,
        "switch" => TokenKind::Switch,
        "this" => TokenKind::This,
        "throw" => TokenKind::Throw,
        "true" => TokenKind::True,
        "try" => TokenKind::Try,
        "typeof" => TokenKind::Typeof,
        "var" => TokenKind::Var,
        "void" => TokenKind::Void,
        "while" => TokenKind::While,
        "with" => TokenKind::With,
        "yield" => TokenKind::Yield,
        "async" => TokenKind::Async,
        "from" => TokenKind::From,
        "as" => TokenKind::As,
        "get" => TokenKind::Get,
        "set" => TokenKind::Set,
        "of" => TokenKind::Of,
        "target" => TokenKind::Target,
        "meta" => TokenKind::Meta,
        _ => return None,
    };
    Some(kind)
}

fn strict_mode_word(word: &str, strict_mode: bool) -> Option<TokenKind> {
    if word == "let" {
        // `let` has a kind in both modes; a parser decides whether a
        // non-strict `let` declares or names.
        return Some(if strict_mode {
            TokenKind::StrictLet
        } else {
            TokenKind::NonStrictLet
        });
    }
    if !strict_mode {
        return None;
    }
    let kind = match word {
        "implements" => TokenKind::Implements,
        "interface" => TokenKind::Interface,
        "package" => TokenKind::Package,
        "private" => TokenKind::Private,
        "protected" => TokenKind::Protected,
        "public" => TokenKind::Public,
        "static" => TokenKind::Static,
        _ => return None,
    };
    Some(kind)
}
