//! CLI error types.

use std::path::PathBuf;

use layercake_config::ConfigError;
use layercake_graph::GraphError;
use layercake_render::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Graph(#[from] GraphError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("Failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Validation(String),
}
