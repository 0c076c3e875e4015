use squiggly_compiler::{Compiler, parse_node_filter, parse_property_filter};

use super::dump::render_error;
use crate::error::CliError;

pub struct CheckArgs {
    pub property: bool,
    pub color: bool,
    /// Shown in syntax error locations.
    pub origin: Option<String>,
}

/// Validates `source`. Silent on success.
///
/// Syntax errors are all reported at once; semantic errors (bad regex flags,
/// out-of-range numbers) surface one at a time from the compiler.
pub fn run(source: &str, args: &CheckArgs) -> Result<(), CliError> {
    let (_, diagnostics) = if args.property {
        parse_property_filter(source)?
    } else {
        parse_node_filter(source)?
    };
    if !diagnostics.is_empty() {
        let mut report = diagnostics.report_filtered(source).colored(args.color);
        if let Some(origin) = args.origin.as_deref() {
            report = report.origin(origin);
        }
        return Err(CliError::Diagnostics(report.render()));
    }

    let compiler = Compiler::builder().no_cache().build();
    let compiled = if args.property {
        compiler.compile_property_filter(source).map(|_| ())
    } else {
        compiler.compile_node_filter(source).map(|_| ())
    };
    compiled.map_err(|err| render_error(source, err, args.color))
}
