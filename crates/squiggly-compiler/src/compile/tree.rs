//! Mutable selection tree: an arena of nodes with index parents.
//!
//! Children are inserted through [`SelectionTree::add_child`], which merges
//! same-named siblings. [`SelectionTree::freeze`] turns the arena into an
//! owned [`SelectionNode`] tree.

use indexmap::IndexMap;
use squiggly_core::{FunctionNode, Name, ROOT, SelectionNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

/// Absolute recursion window, end exclusive. `None` is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DepthRange {
    pub start: Option<u32>,
    pub end: Option<u32>,
}

/// A node built with its final flags, not yet attached to the tree.
#[derive(Debug, Clone)]
pub(crate) struct Detached {
    name: Name,
    negated: bool,
    squiggly: bool,
    dot_pathed: bool,
    empty_nested: bool,
    recursive: Option<DepthRange>,
    key_functions: Vec<FunctionNode>,
    value_functions: Vec<FunctionNode>,
}

impl Detached {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            negated: false,
            squiggly: false,
            dot_pathed: false,
            empty_nested: false,
            recursive: None,
            key_functions: Vec::new(),
            value_functions: Vec::new(),
        }
    }

    pub fn negated(mut self, value: bool) -> Self {
        self.negated = value;
        self
    }

    pub fn squiggly(mut self, value: bool) -> Self {
        self.squiggly = value;
        self
    }

    pub fn dot_pathed(mut self, value: bool) -> Self {
        self.dot_pathed = value;
        self
    }

    pub fn empty_nested(mut self, value: bool) -> Self {
        self.empty_nested = value;
        self
    }

    pub fn recursive(mut self, range: DepthRange) -> Self {
        self.recursive = Some(range);
        self
    }

    pub fn key_functions(mut self, functions: Vec<FunctionNode>) -> Self {
        self.key_functions = functions;
        self
    }

    pub fn value_functions(mut self, functions: Vec<FunctionNode>) -> Self {
        self.value_functions = functions;
        self
    }
}

#[derive(Debug, Clone)]
struct MutableNode {
    data: Detached,
    depth: u32,
    parent: Option<NodeId>,
    children: IndexMap<String, NodeId>,
}

#[derive(Debug, Clone)]
pub(crate) struct SelectionTree {
    nodes: Vec<MutableNode>,
}

impl SelectionTree {
    /// A tree holding only the `ROOT` node at depth 0, dot-pathed.
    pub fn new() -> Self {
        let root = MutableNode {
            data: Detached::new(Name::exact(ROOT)).dot_pathed(true),
            depth: 0,
            parent: None,
            children: IndexMap::new(),
        };
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn node(&self, id: NodeId) -> &MutableNode {
        &self.nodes[id.0 as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut MutableNode {
        &mut self.nodes[id.0 as usize]
    }

    pub fn depth(&self, id: NodeId) -> u32 {
        self.node(id).depth
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).children.values().copied().collect()
    }

    pub fn is_negated(&self, id: NodeId) -> bool {
        self.node(id).data.negated
    }

    pub fn is_dot_pathed(&self, id: NodeId) -> bool {
        self.node(id).data.dot_pathed
    }

    /// Only ever sets the flag.
    pub fn mark_squiggly(&mut self, id: NodeId) {
        self.node_mut(id).data.squiggly = true;
    }

    pub fn rename(&mut self, id: NodeId, name: Name) {
        self.node_mut(id).data.name = name;
    }

    pub fn set_value_functions(&mut self, id: NodeId, functions: Vec<FunctionNode>) {
        self.node_mut(id).data.value_functions = functions;
    }

    /// Inserts `child` under `parent`, merging into an existing same-named child.
    ///
    /// Returns the id of the inserted or merged node.
    pub fn add_child(&mut self, parent: NodeId, child: Detached) -> NodeId {
        let key = child.name.text().to_owned();
        let child_dot_pathed = child.dot_pathed;

        let id = match self.node(parent).children.get(&key).copied() {
            Some(existing) => {
                merge(&mut self.node_mut(existing).data, child);
                existing
            }
            None => {
                let id = NodeId(self.nodes.len() as u32);
                let depth = self.node(parent).depth + 1;
                self.nodes.push(MutableNode {
                    data: child,
                    depth,
                    parent: Some(parent),
                    children: IndexMap::new(),
                });
                self.node_mut(parent).children.insert(key, id);
                id
            }
        };

        if !child_dot_pathed {
            self.node_mut(parent).data.dot_pathed = false;
        }
        id
    }

    pub fn freeze(&self, id: NodeId) -> SelectionNode {
        let node = self.node(id);
        let data = &node.data;
        let mut builder = SelectionNode::builder(data.name.clone())
            .depth(node.depth)
            .negated(data.negated)
            .squiggly(data.squiggly)
            .dot_pathed(data.dot_pathed)
            .empty_nested(data.empty_nested)
            .key_functions(data.key_functions.clone())
            .value_functions(data.value_functions.clone());
        if let Some(range) = data.recursive {
            builder = builder.recursive(range.start, range.end);
        }
        for child in node.children.values() {
            builder = builder.child(self.freeze(*child));
        }
        builder.build()
    }
}

/// Flag merge rules for a child inserted under an existing name.
fn merge(existing: &mut Detached, incoming: Detached) {
    existing.squiggly |= incoming.squiggly;
    existing.empty_nested &= incoming.empty_nested;
    existing.dot_pathed &= incoming.dot_pathed;
    existing.negated |= incoming.negated;
    if !incoming.key_functions.is_empty() {
        existing.key_functions = incoming.key_functions;
    }
    if !incoming.value_functions.is_empty() {
        existing.value_functions = incoming.value_functions;
    }
    if incoming.recursive.is_some() {
        existing.recursive = incoming.recursive;
    }
}
