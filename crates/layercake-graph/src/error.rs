//! Error types for graph loading and label resolution.

use std::path::PathBuf;

/// Error returned when the dependency graph cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Graph file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Graph file path.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Graph file is not valid YAML or lacks a required key.
    #[error("Invalid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// A key has the wrong shape.
    #[error("Invalid dependency graph at `{key}`: {message}")]
    Schema {
        /// Dotted location of the offending value (e.g., "paths.Basics").
        key: String,
        /// What was expected.
        message: String,
    },
}

impl GraphError {
    pub(crate) fn schema(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Error returned when a page path has no label.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Path (or its exercise page, for answers pages) is not declared in `urls`.
    #[error("{0} not mapped to a label")]
    Unmapped(String),
    /// Path is not a markdown page.
    #[error("{0} is not a markdown page")]
    NotMarkdown(String),
}
