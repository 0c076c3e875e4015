//! Shared helpers for compile and facade tests.

use squiggly_core::{SelectionNode, TreePrinter};

use crate::{Compiler, Error, ParseError};

fn compiler() -> Compiler {
    Compiler::builder().no_cache().build()
}

pub(crate) fn compile(source: &str) -> Vec<SelectionNode> {
    compiler()
        .compile_node_filter(source)
        .unwrap_or_else(|err| panic!("`{source}` should compile: {err}"))
        .to_vec()
}

/// Roots rendered with [`TreePrinter`], separated by `---`.
pub(crate) fn dump(source: &str) -> String {
    render(&compile(source), false)
}

pub(crate) fn dump_with_depths(source: &str) -> String {
    render(&compile(source), true)
}

pub(crate) fn dump_property(source: &str) -> String {
    let node = compiler()
        .compile_property_filter(source)
        .unwrap_or_else(|err| panic!("`{source}` should compile: {err}"))
        .unwrap_or_else(|| panic!("`{source}` should produce a node"));
    TreePrinter::new(&node).dump()
}

pub(crate) fn compile_error(source: &str) -> ParseError {
    match compiler().compile_node_filter(source) {
        Err(Error::Parse(err)) => err,
        Err(other) => panic!("`{source}` failed with a non-parse error: {other}"),
        Ok(_) => panic!("`{source}` should fail to compile"),
    }
}

fn render(roots: &[SelectionNode], depths: bool) -> String {
    roots
        .iter()
        .map(|root| TreePrinter::new(root).with_depths(depths).dump())
        .collect::<Vec<_>>()
        .join("---\n")
}
