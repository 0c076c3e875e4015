//! Compiler facade: trims input, consults the cache, parses with fuel limits
//! and runs the compile pass.

use std::sync::Arc;

use squiggly_core::SelectionNode;

use crate::cache::{CachedNodes, MemoryCache, NodeCache};
use crate::compile;
use crate::parser::lexer::lex;
use crate::parser::{FilterMode, Parse, Parser, parse_with_parser};
use crate::{Error, ParseError, Result};

/// Parser operations allowed per compile.
pub const DEFAULT_EXEC_FUEL: u32 = 1_000_000;
/// Nesting levels allowed per compile.
pub const DEFAULT_RECURSION_FUEL: u32 = 512;

/// Compiles filter text into selection trees.
///
/// Cheap to clone; clones share the cache.
#[derive(Clone)]
pub struct Compiler {
    cache: Arc<dyn NodeCache>,
    exec_fuel: Option<u32>,
    recursion_fuel: Option<u32>,
}

impl Compiler {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::default()
    }

    pub fn cache(&self) -> &dyn NodeCache {
        self.cache.as_ref()
    }

    /// Compiles `|`-separated expression lists, one root each.
    pub fn compile_node_filter(&self, text: &str) -> Result<CachedNodes> {
        let source = text.trim();
        if source.is_empty() {
            return Ok(Arc::from(Vec::new()));
        }

        if let Some(nodes) = self.cache.get(source) {
            tracing::debug!(filter = source, "cache hit");
            return Ok(nodes);
        }
        tracing::debug!(filter = source, "cache miss");

        let parse = self.parse(source, FilterMode::Node)?;
        let nodes = compile::compile_node_filter(source, &parse.root())
            .inspect_err(|err| tracing::debug!(filter = source, %err, "compile failed"))?;
        let nodes: CachedNodes = Arc::from(nodes);

        self.store(source, Arc::clone(&nodes));
        Ok(nodes)
    }

    /// Compiles a single expression list.
    ///
    /// Shares cache entries with [`Compiler::compile_node_filter`]: a hit
    /// yields the first root of whatever list is stored under the text.
    pub fn compile_property_filter(&self, text: &str) -> Result<Option<SelectionNode>> {
        let source = text.trim();
        if source.is_empty() {
            return Ok(None);
        }

        if let Some(nodes) = self.cache.get(source) {
            tracing::debug!(filter = source, "cache hit");
            return Ok(nodes.first().cloned());
        }
        tracing::debug!(filter = source, "cache miss");

        let parse = self.parse(source, FilterMode::Property)?;
        let node = compile::compile_property_filter(source, &parse.root())
            .inspect_err(|err| tracing::debug!(filter = source, %err, "compile failed"))?;

        if let Some(node) = &node {
            self.store(source, Arc::from(vec![node.clone()]));
        }
        Ok(node)
    }

    fn parse(&self, source: &str, mode: FilterMode) -> Result<Parse> {
        tracing::trace!(filter = source, ?mode, "compile start");

        let parser = Parser::new(source, lex(source))
            .with_exec_fuel(self.exec_fuel)
            .with_recursion_fuel(self.recursion_fuel);
        let (parse, diagnostics) = parse_with_parser(parser, mode)
            .inspect_err(|err| tracing::debug!(filter = source, %err, "compile failed"))?;

        if let Some(first) = diagnostics.first_error() {
            let err = ParseError::from_diagnostic(source, &first);
            tracing::debug!(filter = source, %err, errors = diagnostics.len(), "compile failed");
            return Err(Error::Parse(err));
        }
        Ok(parse)
    }

    fn store(&self, source: &str, nodes: CachedNodes) {
        tracing::trace!(filter = source, roots = nodes.len(), "compile finish");
        self.cache.put(source.to_owned(), nodes);
        tracing::debug!(filter = source, "cache store");
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Compiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compiler")
            .field("exec_fuel", &self.exec_fuel)
            .field("recursion_fuel", &self.recursion_fuel)
            .field("cache", &self.cache.stats())
            .finish()
    }
}

/// Configures a [`Compiler`].
pub struct CompilerBuilder {
    cache: Option<Arc<dyn NodeCache>>,
    cache_capacity: Option<usize>,
    exec_fuel: Option<u32>,
    recursion_fuel: Option<u32>,
}

impl Default for CompilerBuilder {
    fn default() -> Self {
        Self {
            cache: None,
            cache_capacity: None,
            exec_fuel: Some(DEFAULT_EXEC_FUEL),
            recursion_fuel: Some(DEFAULT_RECURSION_FUEL),
        }
    }
}

impl CompilerBuilder {
    /// `None` disables the limit.
    pub fn exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    /// `None` disables the limit.
    pub fn recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }

    pub fn cache(mut self, cache: impl NodeCache + 'static) -> Self {
        self.cache = Some(Arc::new(cache));
        self
    }

    /// Bounds the default [`MemoryCache`]. Ignored when a cache is set.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    pub fn no_cache(self) -> Self {
        self.cache(crate::cache::NoCache)
    }

    pub fn build(self) -> Compiler {
        let cache = self.cache.unwrap_or_else(|| match self.cache_capacity {
            Some(capacity) => Arc::new(MemoryCache::with_capacity(capacity)),
            None => Arc::new(MemoryCache::new()),
        });
        Compiler {
            cache,
            exec_fuel: self.exec_fuel,
            recursion_fuel: self.recursion_fuel,
        }
    }
}
