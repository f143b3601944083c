//! Scanner modes and per-interpolation brace tracking.
//!
//! The stack always holds a [`ScannerMode::Default`] floor frame. Every `${`
//! pushes a [`ScannerMode::TemplateInterpolation`] frame whose counter
//! records `{` opened since that `${`; a `}` seen while the counter is zero
//! closes the interpolation instead of a block or object literal.

use smallvec::{SmallVec, smallvec};
use tracing::trace;

use crate::error::{LexError, LexResult};
use crate::token::Position;

/// Which token-recognition ruleset is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScannerMode {
    /// Ordinary source text.
    Default,
    /// The expression inside a template literal's `${ … }`.
    TemplateInterpolation,
}

/// One entry of the [`ModeStack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BraceFrame {
    /// The mode this frame selects.
    pub mode: ScannerMode,
    /// Un-closed `{` seen since the frame was pushed. Always zero for the
    /// floor frame.
    pub open_braces: u32,
    /// Position of the backtick that opened the enclosing template; used for
    /// end-of-input diagnostics.
    pub template_start: Position,
}

/// What a `}` means in the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseBrace {
    /// An ordinary `}` closing a block, object literal, or class body.
    Ordinary,
    /// The `}` ending the innermost template interpolation.
    EndsInterpolation,
}

/// A never-empty stack of scanner modes with parallel brace counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeStack {
    frames: SmallVec<[BraceFrame; 4]>,
}

impl Default for ModeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeStack {
    /// A stack holding only the `Default` floor.
    pub fn new() -> Self {
        Self {
            frames: smallvec![BraceFrame {
                mode: ScannerMode::Default,
                open_braces: 0,
                template_start: Position::START,
            }],
        }
    }

    fn top(&self) -> &BraceFrame {
        // The floor frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    /// The active mode.
    pub fn current(&self) -> ScannerMode {
        self.top().mode
    }

    /// Number of open template interpolations.
    pub fn interpolation_depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// `true` when only the floor frame remains.
    pub fn is_at_floor(&self) -> bool {
        self.frames.len() == 1
    }

    /// The innermost open interpolation frame, if any.
    pub fn innermost_interpolation(&self) -> Option<&BraceFrame> {
        if self.is_at_floor() {
            None
        } else {
            Some(self.top())
        }
    }

    /// Push a fresh interpolation frame for a template starting at
    /// `template_start`.
    pub fn enter_template_interpolation(&mut self, template_start: Position) {
        self.frames.push(BraceFrame {
            mode: ScannerMode::TemplateInterpolation,
            open_braces: 0,
            template_start,
        });
        trace!(
            depth = self.interpolation_depth(),
            offset = template_start.offset,
            "enter template interpolation"
        );
    }

    /// Pop the innermost interpolation frame.
    ///
    /// # Errors
    ///
    /// [`LexError::Internal`] if only the floor frame remains.
    pub fn exit_template_interpolation(&mut self) -> LexResult<BraceFrame> {
        if self.is_at_floor() {
            return Err(LexError::Internal("mode stack popped below its floor"));
        }
        let frame = self
            .frames
            .pop()
            .ok_or(LexError::Internal("mode stack is empty"))?;
        trace!(depth = self.interpolation_depth(), "exit template interpolation");
        Ok(frame)
    }

    /// Record a `{`.
    pub fn on_open_brace(&mut self) {
        if let Some(frame) = self.frames.last_mut()
            && frame.mode == ScannerMode::TemplateInterpolation
        {
            frame.open_braces += 1;
        }
    }

    /// Classify a `}` without changing the stack.
    pub fn classify_close_brace(&self) -> CloseBrace {
        let top = self.top();
        if top.mode == ScannerMode::TemplateInterpolation && top.open_braces == 0 {
            CloseBrace::EndsInterpolation
        } else {
            CloseBrace::Ordinary
        }
    }

    /// Record a `}`: either decrement the innermost counter or, when it is
    /// zero inside an interpolation, pop that interpolation.
    ///
    /// # Errors
    ///
    /// [`LexError::Internal`] if the stack invariant is broken.
    pub fn on_close_brace(&mut self) -> LexResult<CloseBrace> {
        match self.classify_close_brace() {
            CloseBrace::EndsInterpolation => {
                self.exit_template_interpolation()?;
                Ok(CloseBrace::EndsInterpolation)
            }
            CloseBrace::Ordinary => {
                if let Some(frame) = self.frames.last_mut()
                    && frame.mode == ScannerMode::TemplateInterpolation
                {
                    frame.open_braces -= 1;
                }
                Ok(CloseBrace::Ordinary)
            }
        }
    }
}
