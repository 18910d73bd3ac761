//! Error types for rota-renderer.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The announcement template failed to parse or render.
    #[error("announcement template error: {0}")]
    Template(#[from] tera::Error),

    #[error("could not build announcement context: {0}")]
    Context(#[from] serde_json::Error),

    /// A template override could not be read.
    #[error("cannot read template override at {path}: {source}")]
    Override {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
