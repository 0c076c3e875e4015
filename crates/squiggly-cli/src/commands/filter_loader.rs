use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::cli::FilterArgs;
use crate::error::CliError;

/// Reads the filter from inline text, a file, or stdin (`-f -`).
pub fn load_filter(args: &FilterArgs) -> Result<String, CliError> {
    let source = match (&args.filter_text, &args.filter_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) if path.as_os_str() == "-" => load_stdin()?,
        (None, Some(path)) => load_file(path)?,
        (None, None) => String::new(),
    };
    tracing::debug!(bytes = source.len(), "filter loaded");
    Ok(source)
}

fn load_stdin() -> Result<String, CliError> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(CliError::Stdin)?;
    Ok(buf)
}

fn load_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })
}
