//! Filter source to lossless syntax tree.
//!
//! Every input yields a `Root`, whatever its errors. Tokens the grammar
//! cannot place end up inside `Error` nodes, a missing token is reported
//! where it was expected, and each production stops at its own set of
//! follow tokens so that one bad field does not swallow its siblings.
//! Binary argument operators wrap their left operand after the fact through
//! builder checkpoints.
//!
//! Exhausting the token or nesting budget is not recoverable: `finish`
//! returns the error instead of a tree.

pub mod ast;
pub mod cst;
pub mod lexer;
pub mod operators;

mod core;
mod dump;
mod grammar;

#[cfg(test)]
mod cst_tests;

pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

pub use ast::{Arg, Expr, Root};

pub use core::Parser;
pub use dump::CstPrinter;

use crate::PassResult;
use lexer::lex;

/// Which top-level production a parse starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// `|`-separated node expression lists.
    Node,
    /// A single expression list.
    Property,
}

/// Parse result containing the green tree.
///
/// The tree is always complete; diagnostics are returned separately.
/// Error nodes in the tree represent recovery points.
#[derive(Debug, Clone)]
pub struct Parse {
    cst: rowan::GreenNode,
    mode: FilterMode,
}

impl Parse {
    pub fn as_cst(&self) -> &rowan::GreenNode {
        &self.cst
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Creates a syntax view over the immutable green tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.cst.clone())
    }

    pub fn root(&self) -> Root {
        Root::cast(self.syntax()).expect("parser always produces a Root node")
    }
}

/// Parses `|`-separated node expression lists. Returns Err on fuel exhaustion.
pub fn parse_node_filter(source: &str) -> PassResult<Parse> {
    parse_with_parser(Parser::new(source, lex(source)), FilterMode::Node)
}

/// Parses a single expression list. Returns Err on fuel exhaustion.
pub fn parse_property_filter(source: &str) -> PassResult<Parse> {
    parse_with_parser(Parser::new(source, lex(source)), FilterMode::Property)
}

/// Parse with a pre-configured parser (for custom fuel limits).
pub(crate) fn parse_with_parser(mut parser: Parser, mode: FilterMode) -> PassResult<Parse> {
    match mode {
        FilterMode::Node => parser.parse_node_filter(),
        FilterMode::Property => parser.parse_property_filter(),
    }
    let (cst, diagnostics) = parser.finish()?;
    Ok((Parse { cst, mode }, diagnostics))
}
