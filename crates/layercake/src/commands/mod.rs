//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod generate;

use std::path::PathBuf;

use clap::Args;
use layercake_config::{CliSettings, Config};
use layercake_graph::{CourseGraph, GraphOptions};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use generate::GenerateArgs;

/// Arguments shared by commands that load the course.
#[derive(Args)]
pub(crate) struct CourseArgs {
    /// Path to configuration file (default: auto-discover layercake.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Template source directory (overrides config).
    #[arg(short, long)]
    templates_dir: Option<PathBuf>,

    /// Dependency graph file (overrides config).
    #[arg(short, long)]
    deps_file: Option<PathBuf>,

    /// Enable verbose output (log every file processed).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CourseArgs {
    /// Load configuration and the course graph.
    fn load(&self, output_dir: Option<PathBuf>) -> Result<(Config, CourseGraph), CliError> {
        let cli_settings = CliSettings {
            templates_dir: self.templates_dir.clone(),
            output_dir,
            deps_file: self.deps_file.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let course = &config.course_resolved;
        let options = GraphOptions {
            root_label: course.root_label.clone(),
            root_page: page_path(&course.root_page),
        };
        let graph = CourseGraph::load(&course.deps_file, &options)?;

        Ok((config, graph))
    }
}

/// Convert a relative filesystem path to a `/`-separated page path.
fn page_path(path: &std::path::Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
