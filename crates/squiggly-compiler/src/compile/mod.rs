//! AST → selection tree compilation.
//!
//! Runs after a clean parse: the builder walks the typed AST into an arena,
//! the negation analyzer rewrites it, and the arena is frozen.

mod builder;
mod chain;
mod literal;
mod names;
mod negation;
mod tree;

#[cfg(test)]
mod chain_tests;
#[cfg(test)]
mod merge_tests;

use rowan::TextRange;
use squiggly_core::SelectionNode;

use crate::ParseError;
use crate::diagnostics::DiagnosticKind;
use crate::parser::ast::{self, NodeExprList};
use builder::TreeBuilder;
use literal::LiteralError;

/// Source text that build failures are located in.
pub(crate) struct Context<'src> {
    source: &'src str,
}

impl<'src> Context<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { source }
    }

    pub fn error(
        &self,
        range: TextRange,
        kind: DiagnosticKind,
        detail: impl Into<String>,
    ) -> ParseError {
        let detail = detail.into();
        ParseError::new(self.source, range, kind, kind.describe(Some(&detail)))
    }

    pub fn error_default(&self, range: TextRange, kind: DiagnosticKind) -> ParseError {
        ParseError::new(self.source, range, kind, kind.describe(None))
    }

    pub fn literal_error(&self, range: TextRange, err: LiteralError) -> ParseError {
        ParseError::new(self.source, range, err.kind, err.message())
    }
}

/// One root per `|`-separated section.
pub(crate) fn compile_node_filter(
    source: &str,
    root: &ast::Root,
) -> Result<Vec<SelectionNode>, ParseError> {
    let cx = Context::new(source);
    root.node_expr_lists()
        .map(|list| match list {
            NodeExprList::Exprs(exprs) => TreeBuilder::new(&cx).build_expr_list(&exprs),
            NodeExprList::TopLevel(top_level) => TreeBuilder::new(&cx).build_top_level(&top_level),
        })
        .collect()
}

/// A single expression list; `None` when the tree holds no list.
pub(crate) fn compile_property_filter(
    source: &str,
    root: &ast::Root,
) -> Result<Option<SelectionNode>, ParseError> {
    let cx = Context::new(source);
    root.expr_lists()
        .next()
        .map(|exprs| TreeBuilder::new(&cx).build_expr_list(&exprs))
        .transpose()
}
