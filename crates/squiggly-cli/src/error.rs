use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),

    /// Rendered diagnostics, printed as they are.
    #[error("{0}")]
    Diagnostics(String),

    #[error(transparent)]
    Compile(#[from] squiggly_compiler::Error),

    #[error("failed to serialize tree: {0}")]
    Json(#[from] serde_json::Error),
}
