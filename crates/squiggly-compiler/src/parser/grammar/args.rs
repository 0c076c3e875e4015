use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{ARG_RECOVERY, LITERALS};
use crate::parser::operators::{self, PREFIX_LEVEL};

impl Parser<'_> {
    /// Argument expression: prefix and infix operators over primaries.
    pub(crate) fn parse_arg(&mut self) {
        self.parse_arg_bp(0);
    }

    /// Precedence climbing. Operators at `min_level` or below end the operand,
    /// which makes every binary level left associative.
    fn parse_arg_bp(&mut self, min_level: u8) {
        if !self.descend() {
            self.error_rest_of_input();
            return;
        }

        let checkpoint = self.checkpoint();
        self.parse_arg_operand();

        while !self.is_aborted() {
            let Some(op) = operators::infix(self.peek()) else {
                break;
            };
            if op.level <= min_level {
                break;
            }
            self.start_node_at(checkpoint, SyntaxKind::BinaryArg);
            self.bump(); // operator
            self.parse_arg_bp(op.level);
            self.finish_node();
        }

        self.ascend();
    }

    fn parse_arg_operand(&mut self) {
        let kind = self.peek();
        match kind {
            SyntaxKind::KwNull => {
                self.start_node(SyntaxKind::NullArg);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::KwIf => self.parse_if_arg(),
            SyntaxKind::ParenOpen | SyntaxKind::Variable | SyntaxKind::Underscore
                if self.at_lambda() =>
            {
                self.parse_lambda_arg();
            }
            SyntaxKind::ParenOpen => self.parse_group_arg(),
            _ if kind.is_function_name() && self.next_is(SyntaxKind::ParenOpen) => {
                self.parse_chain_arg();
            }
            SyntaxKind::Minus | SyntaxKind::Plus if self.at_sort_marker() => {
                self.parse_chain_arg();
            }
            SyntaxKind::Minus if self.at_negative_literal() => self.parse_chain_arg(),
            _ if operators::prefix(kind).is_some() => {
                self.start_node(SyntaxKind::PrefixArg);
                self.bump(); // operator
                self.parse_arg_bp(PREFIX_LEVEL);
                self.finish_node();
            }
            _ if self.at_chain_head() => self.parse_chain_arg(),
            _ if self.at_end() || ARG_RECOVERY.contains(kind) => {
                self.report(DiagnosticKind::ExpectedArgument);
            }
            _ => {
                let text = self.peek_text().to_string();
                self.recover(DiagnosticKind::ExpectedArgument, text, ARG_RECOVERY);
            }
        }
    }

    /// `-`/`+` before an identifier, `$`, or a function call.
    fn at_sort_marker(&mut self) -> bool {
        match self.nth(1) {
            SyntaxKind::Id | SyntaxKind::Dollar => true,
            kind => kind.is_function_name() && self.nth(2) == SyntaxKind::ParenOpen,
        }
    }

    /// `-` immediately followed by a number, with no trivia between.
    pub(super) fn at_negative_literal(&mut self) -> bool {
        self.at(SyntaxKind::Minus)
            && (self.next_is_glued(SyntaxKind::Integer)
                || self.next_is_glued(SyntaxKind::Float))
    }

    fn at_chain_head(&mut self) -> bool {
        let kind = self.peek();
        LITERALS.contains(kind)
            || matches!(
                kind,
                SyntaxKind::BracketOpen
                    | SyntaxKind::BraceOpen
                    | SyntaxKind::Variable
                    | SyntaxKind::Id
                    | SyntaxKind::Dollar
            )
    }

    /// `lambda_params "->"`, checked without consuming.
    fn at_lambda(&mut self) -> bool {
        match self.peek() {
            SyntaxKind::Variable | SyntaxKind::Underscore => self.next_is(SyntaxKind::Arrow),
            SyntaxKind::ParenOpen => {
                let mut i = 1;
                if self.nth(i) == SyntaxKind::ParenClose {
                    return self.nth(i + 1) == SyntaxKind::Arrow;
                }
                loop {
                    if !matches!(
                        self.nth(i),
                        SyntaxKind::Variable | SyntaxKind::Underscore
                    ) {
                        return false;
                    }
                    i += 1;
                    match self.nth(i) {
                        SyntaxKind::Comma => i += 1,
                        SyntaxKind::ParenClose => return self.nth(i + 1) == SyntaxKind::Arrow,
                        _ => return false,
                    }
                }
            }
            _ => false,
        }
    }

    /// `lambda_params "->" arg`
    fn parse_lambda_arg(&mut self) {
        self.start_node(SyntaxKind::LambdaArg);

        self.start_node(SyntaxKind::LambdaParams);
        if self.at(SyntaxKind::ParenOpen) {
            self.open_group(SyntaxKind::ParenOpen);
            self.bump();
            if !self.at(SyntaxKind::ParenClose) {
                while self.lambda_param() && self.eat(SyntaxKind::Comma) {}
            }
            self.close_group(SyntaxKind::ParenClose);
        } else {
            self.lambda_param();
        }
        self.finish_node();

        self.expect(SyntaxKind::Arrow, "`->`");
        self.parse_arg();
        self.finish_node();
    }

    /// `$name` or `_`.
    fn lambda_param(&mut self) -> bool {
        self.eat(SyntaxKind::Variable)
            || self.expect(SyntaxKind::Underscore, "lambda parameter `$name` or `_`")
    }

    /// `"(" arg ")" { arg_chain_link }`
    fn parse_group_arg(&mut self) {
        self.start_node(SyntaxKind::GroupArg);
        self.open_group(SyntaxKind::ParenOpen);
        self.bump();
        self.parse_arg();
        self.close_group(SyntaxKind::ParenClose);
        self.parse_arg_links();
        self.finish_node();
    }

    /// `"if" arg "then" arg { "elif" arg "then" arg } [ "else" arg ] "end"`
    fn parse_if_arg(&mut self) {
        self.start_node(SyntaxKind::IfArg);
        self.parse_if_clause();
        while self.at(SyntaxKind::KwElif) {
            self.parse_if_clause();
        }
        if self.at(SyntaxKind::KwElse) {
            self.start_node(SyntaxKind::ElseClause);
            self.bump();
            self.parse_arg();
            self.finish_node();
        }
        self.expect(SyntaxKind::KwEnd, "`end`");
        self.finish_node();
    }

    fn parse_if_clause(&mut self) {
        self.start_node(SyntaxKind::IfClause);
        self.bump(); // 'if' or 'elif'
        self.parse_arg();
        self.expect(SyntaxKind::KwThen, "`then`");
        self.parse_arg();
        self.finish_node();
    }
}
