//! Squiggly: compiler for field-filter expressions.
//!
//! Turns filter text such as `a.b,c[0:3],-d` into an immutable tree of
//! [`SelectionNode`]s carrying function chains.
//!
//! # Example
//!
//! ```
//! use squiggly_compiler::Compiler;
//!
//! let compiler = Compiler::new();
//! let roots = compiler.compile_node_filter("a.b,c[0:3],-d").expect("valid filter");
//! assert_eq!(roots.len(), 1);
//! assert!(roots[0].child("a").is_some());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod cache;
pub mod diagnostics;
pub mod parser;

mod compile;
mod compiler;

#[cfg(test)]
mod compiler_tests;
#[cfg(test)]
mod test_utils;

use rowan::{TextRange, TextSize};

pub use cache::{CacheStats, CachedNodes, MemoryCache, NoCache, NodeCache};
pub use compiler::{Compiler, CompilerBuilder, DEFAULT_EXEC_FUEL, DEFAULT_RECURSION_FUEL};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Report};
pub use parser::{Parse, parse_node_filter, parse_property_filter};
pub use squiggly_core::SelectionNode;

/// Result type for passes that produce both output and diagnostics.
///
/// Fatal errors (fuel exhaustion) use the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

/// Errors that can occur while compiling a filter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
}

pub type Result<T> = std::result::Result<T, Error>;

/// A compile failure located in the trimmed filter text.
///
/// `line` is 1-based, `column` is a 0-based character offset in that line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (line {line}, column {column})")]
pub struct ParseError {
    line: u32,
    column: u32,
    message: String,
    kind: DiagnosticKind,
    range: TextRange,
}

impl ParseError {
    pub(crate) fn new(
        source: &str,
        range: TextRange,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        let (line, column) = line_column(source, range.start());
        Self {
            line,
            column,
            message: message.into(),
            kind,
            range,
        }
    }

    pub(crate) fn from_diagnostic(source: &str, diagnostic: &Diagnostic) -> Self {
        Self::new(
            source,
            diagnostic.range(),
            diagnostic.kind(),
            diagnostic.message(),
        )
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Wraps the failure so it renders through [`Report`].
    pub fn to_diagnostics(&self) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        diagnostics
            .error(self.kind, self.range)
            .verbatim(self.message.clone())
            .emit();
        diagnostics
    }
}

fn line_column(source: &str, offset: TextSize) -> (u32, u32) {
    let offset = usize::from(offset).min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count();
    (line as u32, column as u32)
}
