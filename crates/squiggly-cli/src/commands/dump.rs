use squiggly_compiler::{Compiler, Error};
use squiggly_core::{SelectionNode, TreePrinter};

use crate::error::CliError;

pub struct DumpArgs {
    pub property: bool,
    pub depths: bool,
    pub json: bool,
    pub color: bool,
}

/// Compiles `source` and renders the resulting roots.
///
/// Text output separates roots with `---`. JSON output is an array of roots
/// for node filters and a single node (or `null`) for property filters.
pub fn run(source: &str, args: &DumpArgs) -> Result<String, CliError> {
    let compiler = Compiler::builder().no_cache().build();

    if args.property {
        let node = compiler
            .compile_property_filter(source)
            .map_err(|err| render_error(source, err, args.color))?;
        return if args.json {
            Ok(format!("{}\n", serde_json::to_string_pretty(&node)?))
        } else {
            Ok(node.map(|n| render_tree(&n, args.depths)).unwrap_or_default())
        };
    }

    let roots = compiler
        .compile_node_filter(source)
        .map_err(|err| render_error(source, err, args.color))?;
    if args.json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&*roots)?));
    }
    Ok(roots
        .iter()
        .map(|root| render_tree(root, args.depths))
        .collect::<Vec<_>>()
        .join("---\n"))
}

fn render_tree(root: &SelectionNode, depths: bool) -> String {
    TreePrinter::new(root).with_depths(depths).dump()
}

/// Parse failures are located in the trimmed text the compiler saw.
pub(crate) fn render_error(source: &str, err: Error, color: bool) -> CliError {
    match err {
        Error::Parse(parse_error) => CliError::Diagnostics(
            parse_error
                .to_diagnostics()
                .report_filtered(source.trim())
                .colored(color)
                .render(),
        ),
        other => CliError::Compile(other),
    }
}
