#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for compiled Squiggly filters.
//!
//! Two layers:
//! - **Name model**: how a selection matches a field name ([`Name`])
//! - **Node model**: the immutable tree produced by the compiler
//!   ([`SelectionNode`]) and the function chains attached to it
//!   ([`FunctionNode`], [`ArgumentNode`])
//!
//! Nodes are plain values. Evaluation against real objects happens elsewhere;
//! this crate only fixes the shape of the compiled output and the sentinels a
//! matcher hands back ([`matcher`]).

mod dump;
mod function;
mod name;
mod node;

pub mod matcher;

#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod function_tests;
#[cfg(test)]
mod matcher_tests;

pub use dump::TreePrinter;
pub use function::{
    ArgumentKind, ArgumentNode, ArgumentValue, FunctionKind, FunctionNode, FunctionNodeBuilder,
    IfClause, IfNode, IntRangeNode, LambdaNode,
};
pub use name::{ANY_DEEP, ANY_SHALLOW, Name, NEVER, PatternFlags, RegexName};
pub use node::{BASE_VIEW, ROOT, SelectionNode, SelectionNodeBuilder};
