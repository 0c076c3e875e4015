//! Contract between compiled trees and the evaluator that walks objects.
//!
//! Evaluation lives outside this workspace. The evaluator decides, for a
//! path into an object, which part of the compiled tree still applies.

use crate::node::SelectionNode;

/// Result of matching a path against a compiled tree.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// Everything below the path is selected.
    Always,
    /// Nothing below the path is selected.
    Never,
    /// Selection continues with this subtree.
    Narrowed(SelectionNode),
}

impl MatchOutcome {
    /// Sentinel node form, for callers that only deal in nodes.
    pub fn into_node(self) -> SelectionNode {
        match self {
            MatchOutcome::Always => SelectionNode::always_match(),
            MatchOutcome::Never => SelectionNode::never_match(),
            MatchOutcome::Narrowed(node) => node,
        }
    }

    /// Inverse of [`MatchOutcome::into_node`].
    pub fn from_node(node: SelectionNode) -> Self {
        if node.is_always_match() {
            MatchOutcome::Always
        } else if node.is_never_match() {
            MatchOutcome::Never
        } else {
            MatchOutcome::Narrowed(node)
        }
    }
}

pub trait ExpressionMatcher {
    /// `path` is the sequence of field names from the object root.
    /// `filter` is the source text `expression` was compiled from.
    fn match_path(&self, path: &[&str], filter: &str, expression: &SelectionNode) -> MatchOutcome;
}
