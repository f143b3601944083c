//! Lexer configuration.

/// Flags that shape a lexing run.
///
/// ```
/// use stator_lexer::LexerOptions;
///
/// let module = LexerOptions::default()
///     .with_strict_mode(true)
///     .with_html_comments(false);
/// assert!(module.strict_mode);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerOptions {
    /// Lex as strict-mode code from the first token.
    pub strict_mode: bool,
    /// The input begins a source unit, so a leading `#!` line is a hashbang.
    pub start_of_input: bool,
    /// Recognize the HTML-like `<!--`, `-->` and `<![CDATA[` comment forms.
    /// Module code turns this off.
    pub html_comments: bool,
    /// Switch strict mode on when a `"use strict"` directive opens the input
    /// or a brace scope.
    pub detect_use_strict: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            strict_mode: false,
            start_of_input: true,
            html_comments: true,
            detect_use_strict: false,
        }
    }
}

impl LexerOptions {
    /// Set [`LexerOptions::strict_mode`].
    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    /// Set [`LexerOptions::start_of_input`].
    pub fn with_start_of_input(mut self, start: bool) -> Self {
        self.start_of_input = start;
        self
    }

    /// Set [`LexerOptions::html_comments`].
    pub fn with_html_comments(mut self, enabled: bool) -> Self {
        self.html_comments = enabled;
        self
    }

    /// Set [`LexerOptions::detect_use_strict`].
    pub fn with_detect_use_strict(mut self, enabled: bool) -> Self {
        self.detect_use_strict = enabled;
        self
    }
}
