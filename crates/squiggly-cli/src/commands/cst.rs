use squiggly_compiler::parser::CstPrinter;
use squiggly_compiler::{parse_node_filter, parse_property_filter};

use crate::error::CliError;

pub struct CstArgs {
    pub property: bool,
    pub trivia: bool,
    pub spans: bool,
    pub color: bool,
}

pub struct CstOutput {
    pub tree: String,
    /// Rendered diagnostics, if the parser recovered from errors.
    pub diagnostics: Option<String>,
}

/// Parses `source` without compiling. The tree is produced even for
/// erroneous input.
pub fn run(source: &str, args: &CstArgs) -> Result<CstOutput, CliError> {
    let (parse, diagnostics) = if args.property {
        parse_property_filter(source)?
    } else {
        parse_node_filter(source)?
    };

    let tree = CstPrinter::new(&parse)
        .with_trivia(args.trivia)
        .with_spans(args.spans)
        .dump();
    let diagnostics = (!diagnostics.is_empty())
        .then(|| diagnostics.report_filtered(source).colored(args.color).render());

    Ok(CstOutput { tree, diagnostics })
}
