//! Token cursor and tree-building primitives shared by the grammar.
//!
//! The grammar never sees whitespace. The cursor steps over it when peeking,
//! and the skipped run stays pending until the next node or token is emitted,
//! so trivia always lands in front of whatever follows it.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::cst::{SyntaxKind, TokenSet};
use super::lexer::{Token, token_text};
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Peeks allowed between two consumed tokens before the grammar is
/// considered stuck in a loop.
const PEEK_LIMIT: u32 = 256;

/// An opening `(`, `[` or `{` still waiting for its closer.
#[derive(Debug, Clone, Copy)]
struct OpenGroup {
    kind: SyntaxKind,
    span: TextRange,
}

impl OpenGroup {
    fn unclosed(&self) -> (DiagnosticKind, &'static str) {
        match self.kind {
            SyntaxKind::ParenOpen => (DiagnosticKind::UnclosedParen, "`(` opened here"),
            SyntaxKind::BraceOpen => (DiagnosticKind::UnclosedBrace, "`{` opened here"),
            _ => (DiagnosticKind::UnclosedBracket, "`[` opened here"),
        }
    }
}

/// Work and nesting limits. Running out is fatal for the whole parse.
#[derive(Debug, Default)]
struct Budget {
    /// Tokens left to consume. `None` is unlimited.
    tokens: Option<u32>,
    max_depth: Option<u32>,
    depth: u32,
    exhausted: Option<Error>,
}

impl Budget {
    fn exhaust(&mut self, err: Error) {
        if self.exhausted.is_none() {
            self.exhausted = Some(err);
        }
    }

    fn spend_token(&mut self) {
        match self.tokens {
            Some(0) => self.exhaust(Error::ExecFuelExhausted),
            Some(left) => self.tokens = Some(left - 1),
            None => {}
        }
    }

    fn descend(&mut self) -> bool {
        if self.max_depth.is_some_and(|max| self.depth >= max) {
            self.exhaust(Error::RecursionLimitExceeded);
            return false;
        }
        self.depth += 1;
        true
    }

    fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    /// First token not yet written to the tree. Everything in
    /// `emitted..pos` is trivia waiting to be attached.
    emitted: usize,
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Diagnostics,
    groups: Vec<OpenGroup>,
    last_report: Option<TextSize>,
    budget: Budget,
    peeks_left: u32,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            emitted: 0,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            groups: Vec::new(),
            last_report: None,
            budget: Budget::default(),
            peeks_left: PEEK_LIMIT,
        }
    }

    /// Caps the number of consumed tokens. `None` disables the cap.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.budget.tokens = limit;
        self
    }

    /// Caps grammar nesting. `None` disables the cap.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.budget.max_depth = limit;
        self
    }

    pub(super) fn finish(self) -> Result<(GreenNode, Diagnostics), Error> {
        match self.budget.exhausted {
            Some(err) => Err(err),
            None => Ok((self.builder.finish(), self.diagnostics)),
        }
    }

    pub(super) fn is_aborted(&self) -> bool {
        self.budget.exhausted.is_some()
    }

    // Cursor

    fn skip_trivia(&mut self) {
        while self
            .tokens
            .get(self.pos)
            .is_some_and(|t| t.kind.is_trivia())
        {
            self.pos += 1;
        }
    }

    fn guard_progress(&mut self) {
        assert!(self.peeks_left > 0, "parser made no progress in {PEEK_LIMIT} peeks");
        self.peeks_left -= 1;
    }

    pub(super) fn peek(&mut self) -> SyntaxKind {
        self.nth(0)
    }

    /// The `n`th significant token ahead, `Error` past the end.
    pub(super) fn nth(&mut self, n: usize) -> SyntaxKind {
        self.skip_trivia();
        self.guard_progress();
        self.tokens[self.pos..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .map_or(SyntaxKind::Error, |t| t.kind)
    }

    pub(super) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.peek() == kind
    }

    pub(super) fn at_any(&mut self, set: TokenSet) -> bool {
        set.contains(self.peek())
    }

    pub(super) fn next_is(&mut self, kind: SyntaxKind) -> bool {
        self.nth(1) == kind
    }

    /// The token after the current one is `kind` and touches it.
    pub(super) fn next_is_glued(&mut self, kind: SyntaxKind) -> bool {
        self.skip_trivia();
        self.guard_progress();
        self.tokens.get(self.pos + 1).is_some_and(|t| t.kind == kind)
    }

    pub(super) fn at_end(&mut self) -> bool {
        self.skip_trivia();
        self.pos >= self.tokens.len()
    }

    /// End of input, or a budget ran out.
    pub(super) fn halted(&mut self) -> bool {
        self.is_aborted() || self.at_end()
    }

    pub(super) fn peek_span(&mut self) -> TextRange {
        self.skip_trivia();
        match self.tokens.get(self.pos) {
            Some(t) => t.span,
            None => TextRange::empty(self.end_offset()),
        }
    }

    pub(super) fn peek_text(&mut self) -> &'src str {
        self.skip_trivia();
        let source = self.source;
        self.tokens.get(self.pos).map_or("", |t| token_text(source, t))
    }

    fn end_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }

    // Tree

    fn emit_pending(&mut self) {
        for token in &self.tokens[self.emitted..self.pos] {
            self.builder
                .token(token.kind.into(), token_text(self.source, token));
        }
        self.emitted = self.pos;
    }

    /// Writes trailing whitespace into the open node.
    pub(super) fn flush_trivia(&mut self) {
        self.skip_trivia();
        self.emit_pending();
    }

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.emit_pending();
        self.builder.start_node(kind.into());
    }

    pub(super) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia();
        self.builder.checkpoint()
    }

    /// Consumes the next significant token.
    pub(super) fn bump(&mut self) {
        self.skip_trivia();
        assert!(!self.at_end(), "bump past end of input");
        self.peeks_left = PEEK_LIMIT;
        self.budget.spend_token();

        self.emit_pending();
        let token = self.tokens[self.pos];
        self.builder
            .token(token.kind.into(), token_text(self.source, &token));
        self.pos += 1;
        self.emitted = self.pos;
    }

    /// Consumes a token the caller already matched.
    pub(super) fn bump_expected(&mut self, kind: SyntaxKind) {
        debug_assert_eq!(self.peek(), kind, "caller did not check the current token");
        self.bump();
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        let matched = self.at(kind);
        if matched {
            self.bump();
        }
        matched
    }

    /// Consumes `kind` or reports what was expected, leaving input in place.
    pub(super) fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.report_detail(DiagnosticKind::UnexpectedToken, format!("expected {what}"));
        false
    }

    pub(super) fn descend(&mut self) -> bool {
        self.peeks_left = PEEK_LIMIT;
        self.budget.descend()
    }

    pub(super) fn ascend(&mut self) {
        self.peeks_left = PEEK_LIMIT;
        self.budget.ascend();
    }

    // Groups

    pub(super) fn open_group(&mut self, kind: SyntaxKind) {
        let span = self.peek_span();
        self.groups.push(OpenGroup { kind, span });
    }

    /// Consumes `close`, or reports the group's opener as unclosed.
    pub(super) fn close_group(&mut self, close: SyntaxKind) {
        let group = self.groups.pop();
        if self.eat(close) {
            return;
        }
        let Some(group) = group else {
            self.report(DiagnosticKind::UnexpectedToken);
            return;
        };

        let found = if self.at_end() {
            "found end of input".to_owned()
        } else {
            format!("found `{}`", self.peek_text())
        };
        let here = self.peek_span();
        if !self.claim_report(here.start()) {
            return;
        }
        // The range spans the whole group, masking errors reported inside it.
        let (kind, note) = group.unclosed();
        self.diagnostics
            .error(kind, TextRange::new(group.span.start(), here.end()))
            .message(found)
            .note(note, group.span)
            .emit();
    }

    // Diagnostics

    /// One report per position: the first problem found at a token wins.
    fn claim_report(&mut self, at: TextSize) -> bool {
        self.last_report.replace(at) != Some(at)
    }

    fn report_here(&mut self, kind: DiagnosticKind, detail: Option<String>) {
        let span = self.peek_span();
        if !self.claim_report(span.start()) {
            return;
        }
        let cover = match self.groups.last() {
            Some(group) => TextRange::new(group.span.start(), self.end_offset()),
            None => span,
        };
        let report = self.diagnostics.error(kind, span).covering(cover);
        match detail {
            Some(detail) => report.message(detail).emit(),
            None => report.emit(),
        }
    }

    pub(super) fn report(&mut self, kind: DiagnosticKind) {
        self.report_here(kind, None);
    }

    pub(super) fn report_detail(&mut self, kind: DiagnosticKind, detail: impl Into<String>) {
        self.report_here(kind, Some(detail.into()));
    }

    fn bump_into_error(&mut self) {
        if self.at_end() {
            return;
        }
        self.start_node(SyntaxKind::Error);
        self.bump();
        self.finish_node();
    }

    /// Reports the current token and wraps it in an `Error` node.
    pub(super) fn skip_invalid(&mut self, kind: DiagnosticKind) {
        self.report(kind);
        self.bump_into_error();
    }

    pub(super) fn skip_invalid_detail(&mut self, kind: DiagnosticKind, detail: impl Into<String>) {
        self.report_detail(kind, detail);
        self.bump_into_error();
    }

    /// Reports, then wraps tokens into one `Error` node up to a token in
    /// `until`.
    pub(super) fn recover(&mut self, kind: DiagnosticKind, detail: impl Into<String>, until: TokenSet) {
        if self.at_any(until) || self.halted() {
            self.report_detail(kind, detail);
            return;
        }

        self.start_node(SyntaxKind::Error);
        self.report_detail(kind, detail);
        while !self.at_any(until) && !self.halted() {
            self.bump();
        }
        self.finish_node();
    }
}
