//! Argument chain heads: literals, declarations, properties and calls.

use super::expressions::SubscriptMode;
use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{ARG_RECOVERY, LITERALS, PROPERTY_NAME};

impl Parser<'_> {
    /// `[ sort ] head { arg_chain_link }`
    pub(super) fn parse_chain_arg(&mut self) {
        self.start_node(SyntaxKind::ChainArg);

        if matches!(self.peek(), SyntaxKind::Minus | SyntaxKind::Plus)
            && !self.at_negative_literal()
        {
            self.bump(); // sort marker
        }

        match self.peek() {
            SyntaxKind::BracketOpen if self.at_range_contents(1) => {
                self.parse_subscript(SubscriptMode::RangeOnly);
            }
            SyntaxKind::BracketOpen => self.parse_array_decl(),
            SyntaxKind::BraceOpen => self.parse_object_decl(),
            SyntaxKind::Variable => self.bump(),
            kind if kind.is_function_name() && self.next_is(SyntaxKind::ParenOpen) => {
                self.parse_call();
            }
            SyntaxKind::Id | SyntaxKind::Dollar => self.parse_property_head(),
            kind if LITERALS.contains(kind) || kind == SyntaxKind::Minus => self.parse_literal(),
            _ => {
                let text = self.peek_text().to_string();
                self.recover(DiagnosticKind::ExpectedArgument, text, ARG_RECOVERY);
            }
        }

        self.parse_arg_links();
        self.finish_node();
    }

    /// `IDENT | "$" [ ( "." | "?." | "[" | "?[" ) property_name [ "]" ] ]`
    fn parse_property_head(&mut self) {
        self.start_node(SyntaxKind::PropertyHead);
        if self.at(SyntaxKind::Id) {
            self.bump();
            self.finish_node();
            return;
        }

        self.bump(); // consume '$'
        match self.peek() {
            SyntaxKind::Dot | SyntaxKind::SafeDot
                if PROPERTY_NAME.contains(self.nth(1)) && !self.at_call_after_access() =>
            {
                self.bump();
                self.bump();
            }
            SyntaxKind::BracketOpen | SyntaxKind::SafeBracketOpen
                if PROPERTY_NAME.contains(self.nth(1))
                    && self.nth(2) == SyntaxKind::BracketClose =>
            {
                self.bump();
                self.bump();
                self.bump();
            }
            _ => {}
        }
        self.finish_node();
    }

    /// `"true" | "false" | FLOAT | INTEGER | REGEX | STRING`, numbers optionally negated.
    fn parse_literal(&mut self) {
        self.start_node(SyntaxKind::Literal);
        if matches!(
            self.peek(),
            SyntaxKind::Minus | SyntaxKind::Integer | SyntaxKind::Float
        ) {
            self.parse_number();
        } else {
            self.bump();
        }
        self.finish_node();
    }

    /// `"[" [ arg { "," arg } ] "]"`
    fn parse_array_decl(&mut self) {
        self.start_node(SyntaxKind::ArrayDecl);
        self.open_group(SyntaxKind::BracketOpen);
        self.bump();
        if !self.at(SyntaxKind::BracketClose) && !self.at_end() {
            loop {
                self.parse_arg();
                if !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
        }
        self.close_group(SyntaxKind::BracketClose);
        self.finish_node();
    }

    /// `"{" [ object_entry { "," object_entry } ] "}"`
    fn parse_object_decl(&mut self) {
        self.start_node(SyntaxKind::ObjectDecl);
        self.open_group(SyntaxKind::BraceOpen);
        self.bump();
        if !self.at(SyntaxKind::BraceClose) && !self.at_end() {
            loop {
                self.parse_object_entry();
                if !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
        }
        self.close_group(SyntaxKind::BraceClose);
        self.finish_node();
    }

    /// `( IDENT | KEYWORD | literal | VARIABLE ) ":" arg`
    fn parse_object_entry(&mut self) {
        self.start_node(SyntaxKind::ObjectEntry);
        match self.peek() {
            kind if LITERALS.contains(kind) || kind == SyntaxKind::Minus => self.parse_literal(),
            kind if kind == SyntaxKind::Id || kind == SyntaxKind::Variable || kind.is_keyword() => {
                self.bump();
            }
            _ => self.report(DiagnosticKind::ExpectedPropertyName),
        }
        self.expect(SyntaxKind::Colon, "`:`");
        self.parse_arg();
        self.finish_node();
    }
}
