use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{ACCESS_OPS, COMPOUND_ASSIGN_OPS, EXPR_FIRST};

impl Parser<'_> {
    /// `node_expr_list { "|" node_expr_list }`
    pub fn parse_node_filter(&mut self) {
        self.start_node(SyntaxKind::Root);

        while !self.halted() {
            self.parse_node_expr_list();

            if self.eat(SyntaxKind::Pipe) {
                if self.at_end() {
                    self.report_detail(DiagnosticKind::ExpectedExpression, "after `|`");
                }
                continue;
            }
            self.skip_stray_tokens(true);
        }

        self.flush_trivia();
        self.finish_node();
    }

    /// A single `expr_list`. `|` is rejected.
    pub fn parse_property_filter(&mut self) {
        self.start_node(SyntaxKind::Root);

        if !self.halted() {
            self.parse_expr_list();
        }
        while !self.halted() {
            self.skip_stray_tokens(false);
            // Keep parsing after an error so every problem gets reported
            if !self.halted() && self.at_any(EXPR_FIRST) {
                self.parse_expr_list();
            }
        }

        self.flush_trivia();
        self.finish_node();
    }

    fn parse_node_expr_list(&mut self) {
        if self.at(SyntaxKind::StarStar) && self.at_top_level_expr() {
            self.parse_top_level_expr();
        } else {
            self.parse_expr_list();
        }
    }

    /// `**` followed by an access operator or compound assignment.
    fn at_top_level_expr(&mut self) -> bool {
        let next = self.nth(1);
        ACCESS_OPS.contains(next) || COMPOUND_ASSIGN_OPS.contains(next)
    }

    /// `"**" ( compound_assignment | arg_chain_link { arg_chain_link } )`
    fn parse_top_level_expr(&mut self) {
        self.start_node(SyntaxKind::TopLevelExpr);
        self.bump_expected(SyntaxKind::StarStar);

        if self.at_any(COMPOUND_ASSIGN_OPS) {
            self.parse_assignment();
        } else {
            self.parse_arg_links();
        }

        self.finish_node();
    }

    /// Consumes tokens that cannot continue the current production.
    fn skip_stray_tokens(&mut self, pipe_allowed: bool) {
        while !self.halted() {
            match self.peek() {
                SyntaxKind::Pipe if pipe_allowed => return,
                SyntaxKind::Pipe => {
                    self.skip_invalid_detail(
                        DiagnosticKind::InvalidSeparator,
                        "`|` is only allowed between node filters",
                    );
                }
                SyntaxKind::Garbage => {
                    self.skip_invalid(DiagnosticKind::UnexpectedCharacters);
                }
                _ => {
                    let text = self.peek_text().to_string();
                    self.skip_invalid_detail(DiagnosticKind::UnexpectedToken, format!("`{text}`"));
                }
            }
            if self.at_any(EXPR_FIRST) {
                return;
            }
        }
    }
}
