use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use squiggly_core::SelectionNode;

use crate::cache::{CachedNodes, MemoryCache, NodeCache};
use crate::{Compiler, DiagnosticKind, Error};

/// Counts traffic so tests can see whether the facade touched the cache.
#[derive(Default)]
struct CountingCache {
    inner: MemoryCache,
    gets: AtomicUsize,
    puts: AtomicUsize,
}

impl NodeCache for Arc<CountingCache> {
    fn get(&self, key: &str) -> Option<CachedNodes> {
        self.gets.fetch_add(1, Ordering::Relaxed);
        self.inner.get(key)
    }

    fn put(&self, key: String, value: CachedNodes) {
        self.puts.fetch_add(1, Ordering::Relaxed);
        self.inner.put(key, value);
    }
}

fn counting_compiler() -> (Compiler, Arc<CountingCache>) {
    let cache = Arc::new(CountingCache::default());
    let compiler = Compiler::builder().cache(Arc::clone(&cache)).build();
    (compiler, cache)
}

#[test]
fn empty_input_skips_cache() {
    let (compiler, cache) = counting_compiler();

    assert!(compiler.compile_node_filter("").unwrap().is_empty());
    assert!(compiler.compile_node_filter("  \n\t ").unwrap().is_empty());
    assert!(compiler.compile_property_filter("   ").unwrap().is_none());

    assert_eq!(cache.gets.load(Ordering::Relaxed), 0);
    assert_eq!(cache.puts.load(Ordering::Relaxed), 0);
}

#[test]
fn second_compile_hits_cache() {
    let (compiler, cache) = counting_compiler();

    let first = compiler.compile_node_filter("a.b,c").unwrap();
    let second = compiler.compile_node_filter("  a.b,c  ").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.puts.load(Ordering::Relaxed), 1);
    assert_eq!(cache.inner.stats().hits, 1);
}

#[test]
fn cached_tree_equals_cold_compile() {
    let warm = Compiler::new();
    let cold = Compiler::builder().no_cache().build();

    let source = "a{b,-c},d[0:2]|**.upper()";
    let first = warm.compile_node_filter(source).unwrap();
    let cached = warm.compile_node_filter(source).unwrap();
    let fresh = cold.compile_node_filter(source).unwrap();

    assert_eq!(first, cached);
    assert_eq!(&*cached, &*fresh);
}

#[test]
fn property_filter_caches_single_root() {
    let (compiler, cache) = counting_compiler();

    let node = compiler.compile_property_filter("a,b").unwrap().unwrap();
    assert_eq!(node.children().len(), 2);

    let stored = cache.inner.get("a,b").unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0], node);

    let again = compiler.compile_property_filter("a,b").unwrap();
    assert_eq!(again, Some(node));
}

#[test]
fn property_filter_stores_only_compiled_roots() {
    let (compiler, cache) = counting_compiler();

    assert!(compiler.compile_property_filter(" ").unwrap().is_none());
    assert!(compiler.compile_property_filter("a|b").is_err());
    assert!(compiler.compile_property_filter("a{").is_err());
    assert_eq!(cache.puts.load(Ordering::Relaxed), 0);
    assert!(cache.inner.get("a|b").is_none());

    let node = compiler.compile_property_filter("a").unwrap();
    assert!(node.is_some());
    assert_eq!(cache.puts.load(Ordering::Relaxed), 1);
    assert_eq!(cache.inner.get("a").unwrap().len(), 1);
}

#[test]
fn property_filter_reads_node_filter_entry() {
    let compiler = Compiler::new();
    let roots = compiler.compile_node_filter("a|b").unwrap();

    let node = compiler.compile_property_filter("a|b").unwrap();
    assert_eq!(node.as_ref(), roots.first());
}

#[test]
fn property_filter_rejects_pipe() {
    let compiler = Compiler::new();
    let Err(Error::Parse(err)) = compiler.compile_property_filter("a|b") else {
        panic!("`|` should not be accepted in a property filter");
    };
    assert_eq!(err.kind(), DiagnosticKind::InvalidSeparator);
}

#[test]
fn failures_are_not_cached() {
    let (compiler, cache) = counting_compiler();

    assert!(compiler.compile_node_filter("a[").is_err());
    assert!(compiler.compile_node_filter("a[").is_err());
    assert_eq!(cache.puts.load(Ordering::Relaxed), 0);
}

#[test]
fn parse_error_position() {
    let compiler = Compiler::new();
    let Err(Error::Parse(err)) = compiler.compile_node_filter("  a,\n  b,)") else {
        panic!("expected a parse failure");
    };
    assert_eq!(err.line(), 2);
    assert_eq!(err.column(), 4);
    assert_eq!(err.to_string(), format!("{} (line 2, column 4)", err.message()));
}

#[test]
fn parse_error_renders_as_diagnostic() {
    let compiler = Compiler::new();
    let Err(Error::Parse(err)) = compiler.compile_node_filter("~a~q") else {
        panic!("expected a parse failure");
    };
    let rendered = err.to_diagnostics().render("~a~q");
    insta::assert_snapshot!(rendered, @r"
    error: unrecognized flag q for pattern a
      |
    1 | ~a~q
      | ^^^^
    ");
}

#[test]
fn recursion_limit() {
    let compiler = Compiler::builder().recursion_fuel(Some(8)).build();
    let source = format!("{}a{}", "a{".repeat(20), "}".repeat(20));
    assert_eq!(
        compiler.compile_node_filter(&source),
        Err(Error::RecursionLimitExceeded)
    );

    let unlimited = Compiler::builder().recursion_fuel(None).build();
    assert!(unlimited.compile_node_filter(&source).is_ok());
}

#[test]
fn exec_fuel_limit() {
    let compiler = Compiler::builder().exec_fuel(Some(10)).build();
    let source = (0..50).map(|i| format!("f{i}")).collect::<Vec<_>>().join(",");
    assert_eq!(
        compiler.compile_node_filter(&source),
        Err(Error::ExecFuelExhausted)
    );
}

#[test]
fn bounded_default_cache() {
    let compiler = Compiler::builder().cache_capacity(1).build();
    compiler.compile_node_filter("a").unwrap();
    compiler.compile_node_filter("b").unwrap();
    assert_eq!(compiler.cache().stats().entries, 1);
}

#[test]
fn compiler_is_shareable_across_threads() {
    let compiler = Compiler::new();
    let roots: Vec<Vec<SelectionNode>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| compiler.compile_node_filter("a.b,c").unwrap().to_vec()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(roots.windows(2).all(|pair| pair[0] == pair[1]));
}
