//! Indented text rendering of a selection tree.

use std::fmt::Write;

use crate::function::FunctionNode;
use crate::node::SelectionNode;

/// Renders a [`SelectionNode`] tree, one node per line.
///
/// ```text
/// ROOT [squiggly]
///   a [dot-pathed, squiggly]
///     b
///       value: get(INPUT, 2)
/// ```
pub struct TreePrinter<'a> {
    root: &'a SelectionNode,
    depths: bool,
}

impl<'a> TreePrinter<'a> {
    pub fn new(root: &'a SelectionNode) -> Self {
        Self { root, depths: false }
    }

    /// Appends `@depth` to every node.
    pub fn with_depths(mut self, depths: bool) -> Self {
        self.depths = depths;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        self.format_node(w, self.root, 0)
    }

    fn format_node(&self, w: &mut impl Write, node: &SelectionNode, indent: usize) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        write!(w, "{prefix}{}", node.name())?;
        if self.depths {
            write!(w, " @{}", node.depth())?;
        }

        let tags = node_tags(node);
        if !tags.is_empty() {
            write!(w, " [{}]", tags.join(", "))?;
        }
        writeln!(w)?;

        self.format_chain(w, "key", node.key_functions(), indent + 1)?;
        self.format_chain(w, "value", node.value_functions(), indent + 1)?;

        for child in node.children() {
            self.format_node(w, child, indent + 1)?;
        }
        Ok(())
    }

    fn format_chain(
        &self,
        w: &mut impl Write,
        label: &str,
        chain: &[FunctionNode],
        indent: usize,
    ) -> std::fmt::Result {
        if chain.is_empty() {
            return Ok(());
        }
        let prefix = "  ".repeat(indent);
        write!(w, "{prefix}{label}: ")?;
        for (i, function) in chain.iter().enumerate() {
            if i > 0 {
                w.write_str(" | ")?;
            }
            write!(w, "{function}")?;
        }
        writeln!(w)
    }
}

fn node_tags(node: &SelectionNode) -> Vec<String> {
    let mut tags = Vec::new();
    if node.is_negated() {
        tags.push("negated".to_owned());
    }
    if node.is_dot_pathed() {
        tags.push("dot-pathed".to_owned());
    }
    if node.is_squiggly() {
        tags.push("squiggly".to_owned());
    }
    if node.is_empty_nested() {
        tags.push("empty-nested".to_owned());
    }
    if node.is_recursive() {
        let bound = |b: Option<u32>| b.map(|b| b.to_string()).unwrap_or_default();
        tags.push(format!(
            "recursive({}:{})",
            bound(node.start_depth()),
            bound(node.end_depth())
        ));
    }
    tags
}
