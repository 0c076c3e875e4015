use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{
    ASSIGN_OPS, EXPR_LIST_END, EXPR_RECOVERY, FIELD_FIRST,
};

impl Parser<'_> {
    /// `expression { "," expression }`
    pub(crate) fn parse_expr_list(&mut self) {
        if !self.descend() {
            self.error_rest_of_input();
            return;
        }

        self.start_node(SyntaxKind::ExprList);
        loop {
            self.parse_expression();
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.finish_node();

        self.ascend();
    }

    /// On recursion limit the remaining input goes into a single Error node.
    pub(super) fn error_rest_of_input(&mut self) {
        self.start_node(SyntaxKind::Error);
        while !self.at_end() {
            self.bump();
        }
        self.finish_node();
    }

    fn parse_expression(&mut self) {
        match self.peek() {
            SyntaxKind::Minus => self.parse_negated_expr(true),
            SyntaxKind::MultiplyAssign => self.parse_sugar_expr(),
            SyntaxKind::StarStar if self.next_is(SyntaxKind::Equals) => self.parse_sugar_expr(),
            SyntaxKind::StarStar => self.parse_recursive_expr(),
            SyntaxKind::BraceOpen => self.parse_field_group_expr(),
            kind if FIELD_FIRST.contains(kind) => self.parse_dotted_field_expr(true),
            kind if EXPR_LIST_END.contains(kind) || self.at_end() => {
                self.report(DiagnosticKind::ExpectedExpression);
            }
            _ => {
                let text = self.peek_text().to_string();
                self.recover(
                    DiagnosticKind::UnrecognizedExpression,
                    text,
                    EXPR_RECOVERY,
                );
            }
        }
    }

    /// `"-" field { "." field }`; recursive args allow a single field only.
    fn parse_negated_expr(&mut self, allow_path: bool) {
        self.start_node(SyntaxKind::NegatedExpr);
        self.bump_expected(SyntaxKind::Minus);
        self.parse_field();
        while allow_path && self.eat(SyntaxKind::Dot) {
            self.parse_field();
        }
        self.finish_node();
    }

    /// `"*=" arg` | `"**" "=" arg`
    fn parse_sugar_expr(&mut self) {
        self.start_node(SyntaxKind::SugarExpr);
        if self.at(SyntaxKind::StarStar) {
            self.bump();
            self.expect(SyntaxKind::Equals, "`=`");
        } else {
            self.bump(); // consume '*='
        }
        self.parse_arg();
        self.finish_node();
    }

    /// `"**" [ int_range ] [ "{" [ recursive_arg { "," recursive_arg } ] "}" ]`
    fn parse_recursive_expr(&mut self) {
        self.start_node(SyntaxKind::RecursiveExpr);
        self.bump_expected(SyntaxKind::StarStar);

        if self.at(SyntaxKind::BracketOpen) {
            self.parse_subscript(SubscriptMode::RangeOnly);
        }

        if self.at(SyntaxKind::BraceOpen) {
            self.open_group(SyntaxKind::BraceOpen);
            self.bump();
            if !self.at(SyntaxKind::BraceClose) && !self.at_end() {
                loop {
                    self.parse_recursive_arg();
                    if !self.eat(SyntaxKind::Comma) {
                        break;
                    }
                }
            }
            self.close_group(SyntaxKind::BraceClose);
        }

        self.finish_node();
    }

    /// `"-" field` | `"*=" arg` | `"**" "=" arg` | `field [ key_value ]`
    fn parse_recursive_arg(&mut self) {
        match self.peek() {
            SyntaxKind::Minus => self.parse_negated_expr(false),
            SyntaxKind::MultiplyAssign => self.parse_sugar_expr(),
            SyntaxKind::StarStar if self.next_is(SyntaxKind::Equals) => self.parse_sugar_expr(),
            kind if FIELD_FIRST.contains(kind) => self.parse_dotted_field_expr(false),
            _ => {
                let text = self.peek_text().to_string();
                self.recover(
                    DiagnosticKind::UnrecognizedExpression,
                    text,
                    EXPR_RECOVERY,
                );
            }
        }
    }

    /// `"{" field { "," field } "}" [ key_value ] [ nested ]`
    fn parse_field_group_expr(&mut self) {
        self.start_node(SyntaxKind::FieldGroupExpr);
        self.open_group(SyntaxKind::BraceOpen);
        self.bump(); // consume '{'
        loop {
            self.parse_field();
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.close_group(SyntaxKind::BraceClose);
        self.parse_key_value_opt();
        self.parse_nested_opt();
        self.finish_node();
    }

    /// `field { "." field } [ key_value ] [ nested ]`
    ///
    /// Recursive args take a single field and no nested block.
    fn parse_dotted_field_expr(&mut self, full: bool) {
        self.start_node(SyntaxKind::DottedFieldExpr);
        self.parse_field();
        while full && self.at(SyntaxKind::Dot) && !self.at_call_after_access() {
            self.bump(); // consume '.'
            self.parse_field();
        }
        self.parse_key_value_opt();
        if full {
            self.parse_nested_opt();
        }
        self.finish_node();
    }

    /// `.` followed by `name (` is a function link, not another path segment.
    pub(super) fn at_call_after_access(&mut self) -> bool {
        self.nth(1).is_function_name() && self.nth(2) == SyntaxKind::ParenOpen
    }

    /// `STRING | KEYWORD | IDENT | WILDCARD_FIELD | REGEX | "*" | VARIABLE`
    fn parse_field(&mut self) {
        self.start_node(SyntaxKind::Field);
        if self.at_any(FIELD_FIRST) {
            self.bump();
        } else {
            self.report(DiagnosticKind::ExpectedField);
        }
        self.finish_node();
    }

    /// `"{" [ expr_list ] "}"`
    fn parse_nested_opt(&mut self) {
        if !self.at(SyntaxKind::BraceOpen) {
            return;
        }
        self.start_node(SyntaxKind::Nested);
        self.open_group(SyntaxKind::BraceOpen);
        self.bump();
        if !self.at(SyntaxKind::BraceClose) && !self.at_end() {
            self.parse_expr_list();
        }
        self.close_group(SyntaxKind::BraceClose);
        self.finish_node();
    }

    /// `continuing_chain | assignment | ":" chain_part [ ":" chain_part ]`
    fn parse_key_value_opt(&mut self) {
        let kind = self.peek();
        let starts_chain = matches!(
            kind,
            SyntaxKind::Dot | SyntaxKind::SafeDot | SyntaxKind::BracketOpen
        );
        if !starts_chain && !ASSIGN_OPS.contains(kind) && kind != SyntaxKind::Colon {
            return;
        }

        self.start_node(SyntaxKind::KeyValue);
        if kind == SyntaxKind::Colon {
            let mut parts = 0;
            while parts < 2 && self.eat(SyntaxKind::Colon) {
                self.parse_chain_part();
                parts += 1;
            }
        } else if ASSIGN_OPS.contains(kind) {
            self.parse_assignment();
        } else {
            self.parse_continuing_chain();
        }
        self.finish_node();
    }
}

/// What a `[...]` subscript may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SubscriptMode {
    /// `[n]` or `[a:b]` in a field chain.
    Index,
    /// `[a:b]` only: recursion depths and int-range heads.
    RangeOnly,
    /// `[name]`, `[n]` or `[a:b]` in an argument chain link.
    Property,
}
