//! Per-run scanner state.

use smallvec::SmallVec;
use tracing::trace;

use crate::mode::{ModeStack, ScannerMode};
use crate::options::LexerOptions;
use crate::token::TokenKind;

/// Everything the scanner remembers between two tokens.
///
/// One context belongs to one lexing run. It is plain data: cloning it next
/// to a copy of the [`Cursor`](crate::cursor::Cursor) is a complete
/// checkpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerContext {
    pub(crate) modes: ModeStack,
    pub(crate) is_start_of_input: bool,
    pub(crate) strict_mode: bool,
    pub(crate) last_significant_kind: Option<TokenKind>,
    /// A line terminator was seen since the last significant token.
    pub(crate) pending_line_terminator: bool,
    /// No significant token yet on the current line (gates `-->`).
    pub(crate) at_line_start: bool,
    pub(crate) html_comments: bool,
    pub(crate) detect_use_strict: bool,
    /// Strictness saved at each open `{`, when directive detection is on.
    pub(crate) strict_scopes: SmallVec<[bool; 8]>,
}

impl Default for ScannerContext {
    fn default() -> Self {
        Self::new(LexerOptions::default())
    }
}

impl ScannerContext {
    /// A fresh context for a run configured by `options`.
    pub fn new(options: LexerOptions) -> Self {
        Self {
            modes: ModeStack::new(),
            is_start_of_input: options.start_of_input,
            strict_mode: options.strict_mode,
            last_significant_kind: None,
            pending_line_terminator: false,
            at_line_start: true,
            html_comments: options.html_comments,
            detect_use_strict: options.detect_use_strict,
            strict_scopes: SmallVec::new(),
        }
    }

    /// Whether the next token is lexed as strict-mode code.
    pub fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Switch strict mode for the tokens that follow, e.g. after a parser
    /// recognizes a `"use strict"` directive.
    pub fn set_strict_mode(&mut self, strict: bool) {
        if self.strict_mode != strict {
            trace!(strict, "strict mode changed by caller");
        }
        self.strict_mode = strict;
    }

    /// `true` until the first token of the run has been produced.
    pub fn is_start_of_input(&self) -> bool {
        self.is_start_of_input
    }

    /// Kind of the most recent token that was not trivia.
    pub fn last_significant_kind(&self) -> Option<TokenKind> {
        self.last_significant_kind
    }

    /// The active scanner mode.
    pub fn mode(&self) -> ScannerMode {
        self.modes.current()
    }

    /// The mode stack, for inspection.
    pub fn modes(&self) -> &ModeStack {
        &self.modes
    }

    /// Note that a line terminator was consumed outside any token that
    /// records it, e.g. while resynchronizing after an error.
    pub(crate) fn mark_line_start(&mut self) {
        self.pending_line_terminator = true;
        self.at_line_start = true;
    }

    /// Save strictness when a `{` opens a scope.
    pub(crate) fn push_strict_scope(&mut self) {
        if self.detect_use_strict {
            self.strict_scopes.push(self.strict_mode);
        }
    }

    /// Restore the strictness saved by the matching `{`.
    pub(crate) fn pop_strict_scope(&mut self) {
        if !self.detect_use_strict {
            return;
        }
        if let Some(saved) = self.strict_scopes.pop()
            && saved != self.strict_mode
        {
            trace!(strict = saved, "strict mode restored at end of scope");
            self.strict_mode = saved;
        }
    }

    /// Apply a `"use strict"` directive if `lexeme` is one in directive
    /// position.
    pub(crate) fn observe_directive(&mut self, lexeme: &str) {
        if !self.detect_use_strict || self.strict_mode {
            return;
        }
        let in_directive_position = matches!(
            self.last_significant_kind,
            None | Some(TokenKind::LeftBrace)
        );
        if in_directive_position && matches!(lexeme, "\"use strict\"" | "'use strict'") {
            trace!("\"use strict\" directive switches strict mode on");
            self.strict_mode = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_follows_options() {
        let ctx = ScannerContext::new(
            LexerOptions::default()
                .with_strict_mode(true)
                .with_start_of_input(false),
        );
        assert!(ctx.strict_mode());
        assert!(!ctx.is_start_of_input());
        assert_eq!(ctx.mode(), ScannerMode::Default);
        assert_eq!(ctx.last_significant_kind(), None);
    }

    #[test]
    fn test_directive_only_in_directive_position() {
        let mut ctx = ScannerContext::new(LexerOptions::default().with_detect_use_strict(true));
        ctx.last_significant_kind = Some(TokenKind::Semicolon);
        ctx.observe_directive("'use strict'");
        assert!(!ctx.strict_mode());

        ctx.last_significant_kind = Some(TokenKind::LeftBrace);
        ctx.observe_directive("\"use  strict\"");
        assert!(!ctx.strict_mode());
        ctx.observe_directive("'use strict'");
        assert!(ctx.strict_mode());
    }

    #[test]
    fn test_directive_ignored_when_detection_is_off() {
        let mut ctx = ScannerContext::default();
        ctx.observe_directive("'use strict'");
        assert!(!ctx.strict_mode());
    }

    #[test]
    fn test_strict_scopes_restore_on_close() {
        let mut ctx = ScannerContext::new(LexerOptions::default().with_detect_use_strict(true));
        ctx.push_strict_scope();
        ctx.strict_mode = true;
        ctx.push_strict_scope();
        ctx.pop_strict_scope();
        assert!(ctx.strict_mode());
        ctx.pop_strict_scope();
        assert!(!ctx.strict_mode());
        // Unbalanced closers leave the mode alone.
        ctx.pop_strict_scope();
        assert!(!ctx.strict_mode());
    }
}
