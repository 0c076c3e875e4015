use super::expressions::SubscriptMode;
use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{
    ACCESS_OPS, ARG_RECOVERY, ASSIGN_OPS, PROPERTY_NAME, RANGE_SEPARATORS, SUBSCRIPT_OPEN,
};

impl Parser<'_> {
    /// `field_arg_chain | assignment`, after a `:` in a key/value.
    pub(super) fn parse_chain_part(&mut self) {
        if self.at_any(ASSIGN_OPS) {
            self.parse_assignment();
            return;
        }

        self.start_node(SyntaxKind::FieldChain);
        match self.peek() {
            SyntaxKind::BracketOpen => self.parse_chain_link(),
            kind if kind.is_function_name() && self.next_is(SyntaxKind::ParenOpen) => {
                self.parse_chain_link();
            }
            _ => {
                let text = self.peek_text().to_string();
                self.report_detail(DiagnosticKind::UnknownChainLink, text);
            }
        }
        while self.at_chain_link() {
            self.parse_chain_link();
        }
        self.finish_node();
    }

    /// `continuing_link { continuing_link }`
    pub(super) fn parse_continuing_chain(&mut self) {
        self.start_node(SyntaxKind::FieldChain);
        while self.at_chain_link() {
            self.parse_chain_link();
        }
        self.finish_node();
    }

    fn at_chain_link(&mut self) -> bool {
        matches!(
            self.peek(),
            SyntaxKind::Dot | SyntaxKind::SafeDot | SyntaxKind::BracketOpen
        )
    }

    /// `access_op function | standalone_arg`, or a bare function starting a chain part.
    fn parse_chain_link(&mut self) {
        self.start_node(SyntaxKind::ChainLink);
        match self.peek() {
            SyntaxKind::BracketOpen => self.parse_subscript(SubscriptMode::Index),
            SyntaxKind::Dot | SyntaxKind::SafeDot => {
                self.bump();
                self.parse_call_or_error();
            }
            _ => self.parse_call(),
        }
        self.finish_node();
    }

    fn parse_call_or_error(&mut self) {
        if self.peek().is_function_name() && self.next_is(SyntaxKind::ParenOpen) {
            self.parse_call();
        } else {
            let text = self.peek_text().to_string();
            self.skip_invalid_detail(DiagnosticKind::UnknownChainLink, text);
        }
    }

    /// `IDENT "(" [ arg { "," arg } ] ")"`
    pub(super) fn parse_call(&mut self) {
        self.start_node(SyntaxKind::Call);
        self.bump(); // function name
        self.open_group(SyntaxKind::ParenOpen);
        self.bump(); // consume '('

        if !self.at(SyntaxKind::ParenClose) && !self.at_end() {
            loop {
                self.parse_arg();
                if !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
        }

        self.close_group(SyntaxKind::ParenClose);
        self.finish_node();
    }

    /// `"[" ... "]"` or `"?[" ... "]"`; `mode` decides what may sit inside.
    pub(super) fn parse_subscript(&mut self, mode: SubscriptMode) {
        self.start_node(SyntaxKind::Subscript);
        self.open_group(SyntaxKind::BracketOpen);
        self.bump(); // consume '[' or '?['

        if self.at_range_contents(0) {
            self.parse_range();
        } else if mode != SubscriptMode::RangeOnly && self.at_integer() {
            self.parse_number();
        } else if mode == SubscriptMode::Property && self.at_any(PROPERTY_NAME) {
            self.bump();
        } else {
            let kind = match mode {
                SubscriptMode::RangeOnly | SubscriptMode::Index => {
                    DiagnosticKind::ExpectedRangeBound
                }
                SubscriptMode::Property => DiagnosticKind::ExpectedPropertyName,
            };
            self.recover_in_subscript(kind);
        }

        self.close_group(SyntaxKind::BracketClose);
        self.finish_node();
    }

    fn recover_in_subscript(&mut self, kind: DiagnosticKind) {
        if self.at(SyntaxKind::BracketClose) || self.at_end() {
            self.report(kind);
            return;
        }
        let text = self.peek_text().to_string();
        self.recover(kind, text, ARG_RECOVERY);
    }

    fn at_integer(&mut self) -> bool {
        match self.peek() {
            SyntaxKind::Integer => true,
            SyntaxKind::Minus => self.next_is(SyntaxKind::Integer),
            _ => false,
        }
    }

    /// Whether the tokens from `offset` on read `bound? (":" | "..")`.
    pub(super) fn at_range_contents(&mut self, offset: usize) -> bool {
        match self.nth(offset) {
            kind if RANGE_SEPARATORS.contains(kind) => true,
            SyntaxKind::Integer | SyntaxKind::Variable => {
                RANGE_SEPARATORS.contains(self.nth(offset + 1))
            }
            SyntaxKind::Minus => {
                self.nth(offset + 1) == SyntaxKind::Integer
                    && RANGE_SEPARATORS.contains(self.nth(offset + 2))
            }
            _ => false,
        }
    }

    /// `[ range_bound ] ( ":" | ".." ) [ range_bound ]`
    fn parse_range(&mut self) {
        self.start_node(SyntaxKind::Range);
        if !self.at_any(RANGE_SEPARATORS) {
            self.parse_range_bound();
        }
        if self.at_any(RANGE_SEPARATORS) {
            self.bump();
        } else {
            self.report_detail(DiagnosticKind::UnexpectedToken, "expected `:` or `..`");
        }
        if !self.at(SyntaxKind::BracketClose) && !self.at_end() {
            self.parse_range_bound();
        }
        self.finish_node();
    }

    fn parse_range_bound(&mut self) {
        match self.peek() {
            SyntaxKind::Variable => self.bump(),
            SyntaxKind::Integer | SyntaxKind::Minus => self.parse_number(),
            _ => self.report(DiagnosticKind::ExpectedRangeBound),
        }
    }

    /// `[ "-" ] ( INTEGER | FLOAT )`
    pub(super) fn parse_number(&mut self) {
        self.start_node(SyntaxKind::Number);
        self.eat(SyntaxKind::Minus);
        if matches!(self.peek(), SyntaxKind::Integer | SyntaxKind::Float) {
            self.bump();
        } else {
            self.report(DiagnosticKind::InvalidNumber);
        }
        self.finish_node();
    }

    /// `( "=" | ".=" | "+=" | "-=" | "*=" | "/=" | "%=" ) arg`
    pub(crate) fn parse_assignment(&mut self) {
        self.start_node(SyntaxKind::Assignment);
        self.bump(); // assignment operator
        self.parse_arg();
        self.finish_node();
    }

    /// `arg_chain_link { arg_chain_link }`
    pub(crate) fn parse_arg_links(&mut self) {
        while self.at_any(ACCESS_OPS.union(SUBSCRIPT_OPEN)) {
            self.parse_arg_link();
        }
    }

    /// `access_op function | access_op property_name | ("[" | "?[") ... "]"`
    fn parse_arg_link(&mut self) {
        self.start_node(SyntaxKind::ArgLink);
        match self.peek() {
            SyntaxKind::BracketOpen | SyntaxKind::SafeBracketOpen => {
                self.parse_subscript(SubscriptMode::Property);
            }
            _ => {
                self.bump(); // consume '.' or '?.'
                if self.peek().is_function_name() && self.next_is(SyntaxKind::ParenOpen) {
                    self.parse_call();
                } else if self.at_any(PROPERTY_NAME) {
                    self.bump();
                } else {
                    self.report(DiagnosticKind::ExpectedPropertyName);
                }
            }
        }
        self.finish_node();
    }
}
