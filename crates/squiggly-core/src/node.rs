//! Immutable selection tree.

use indexmap::IndexMap;
use serde::Serialize;

use crate::function::FunctionNode;
use crate::name::Name;

/// Name of the tree root.
pub const ROOT: &str = "ROOT";
/// Name of the synthetic child injected next to all-negated siblings.
pub const BASE_VIEW: &str = "base";

/// One field selection in a compiled filter.
///
/// Children are keyed by [`Name::text`] and keep insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionNode {
    name: Name,
    depth: u32,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    children: IndexMap<String, SelectionNode>,
    negated: bool,
    squiggly: bool,
    dot_pathed: bool,
    empty_nested: bool,
    recursive: bool,
    start_depth: Option<u32>,
    end_depth: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    key_functions: Vec<FunctionNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    value_functions: Vec<FunctionNode>,
}

impl SelectionNode {
    pub fn builder(name: Name) -> SelectionNodeBuilder {
        SelectionNodeBuilder {
            node: SelectionNode {
                name,
                depth: 0,
                children: IndexMap::new(),
                negated: false,
                squiggly: false,
                dot_pathed: false,
                empty_nested: false,
                recursive: false,
                start_depth: None,
                end_depth: None,
                key_functions: Vec::new(),
                value_functions: Vec::new(),
            },
        }
    }

    /// Sentinel returned when a filter selects everything.
    pub fn always_match() -> Self {
        Self::builder(Name::AnyDeep).build()
    }

    /// Sentinel returned when a filter selects nothing.
    pub fn never_match() -> Self {
        Self::builder(Name::Never).build()
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn children(&self) -> impl ExactSizeIterator<Item = &SelectionNode> {
        self.children.values()
    }

    pub fn child(&self, name: &str) -> Option<&SelectionNode> {
        self.children.get(name)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        matches!(&self.name, Name::Exact(text) if text == ROOT) && self.depth == 0
    }

    /// A bare depth-0 `**`. Functions attached to it mean the node still has
    /// work to do, so it is not the match-everything sentinel.
    pub fn is_always_match(&self) -> bool {
        self.name.is_any_deep()
            && self.depth == 0
            && self.key_functions.is_empty()
            && self.value_functions.is_empty()
    }

    pub fn is_never_match(&self) -> bool {
        self.name.is_never()
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn is_squiggly(&self) -> bool {
        self.squiggly
    }

    pub fn is_dot_pathed(&self) -> bool {
        self.dot_pathed
    }

    pub fn is_empty_nested(&self) -> bool {
        self.empty_nested
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Absolute, inclusive.
    pub fn start_depth(&self) -> Option<u32> {
        self.start_depth
    }

    /// Absolute, exclusive.
    pub fn end_depth(&self) -> Option<u32> {
        self.end_depth
    }

    /// Whether a recursive node applies at `depth`.
    pub fn covers_depth(&self, depth: u32) -> bool {
        self.recursive
            && self.start_depth.is_none_or(|start| depth >= start)
            && self.end_depth.is_none_or(|end| depth < end)
    }

    pub fn key_functions(&self) -> &[FunctionNode] {
        &self.key_functions
    }

    pub fn value_functions(&self) -> &[FunctionNode] {
        &self.value_functions
    }
}

/// Assembles a frozen node. Used by the compiler when it freezes its arena.
#[derive(Debug, Clone)]
pub struct SelectionNodeBuilder {
    node: SelectionNode,
}

impl SelectionNodeBuilder {
    pub fn depth(mut self, depth: u32) -> Self {
        self.node.depth = depth;
        self
    }

    pub fn negated(mut self, negated: bool) -> Self {
        self.node.negated = negated;
        self
    }

    pub fn squiggly(mut self, squiggly: bool) -> Self {
        self.node.squiggly = squiggly;
        self
    }

    pub fn dot_pathed(mut self, dot_pathed: bool) -> Self {
        self.node.dot_pathed = dot_pathed;
        self
    }

    pub fn empty_nested(mut self, empty_nested: bool) -> Self {
        self.node.empty_nested = empty_nested;
        self
    }

    pub fn recursive(mut self, start_depth: Option<u32>, end_depth: Option<u32>) -> Self {
        self.node.recursive = true;
        self.node.start_depth = start_depth;
        self.node.end_depth = end_depth;
        self
    }

    pub fn key_functions(mut self, functions: Vec<FunctionNode>) -> Self {
        self.node.key_functions = functions;
        self
    }

    pub fn value_functions(mut self, functions: Vec<FunctionNode>) -> Self {
        self.node.value_functions = functions;
        self
    }

    /// Later children with the same name text replace earlier ones.
    pub fn child(mut self, child: SelectionNode) -> Self {
        self.node
            .children
            .insert(child.name.text().to_owned(), child);
        self
    }

    pub fn build(self) -> SelectionNode {
        self.node
    }
}
