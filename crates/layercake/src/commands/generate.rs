//! `layercake generate` command implementation.

use std::path::PathBuf;

use clap::Args;
use layercake_render::{RenderOptions, TemplateRenderer};

use super::CourseArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    #[command(flatten)]
    pub course: CourseArgs,

    /// Output directory for rendered pages (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Render everything without writing any file.
    #[arg(long)]
    dry_run: bool,
}

impl GenerateArgs {
    /// Execute the generate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or graph loading fails, or if a
    /// template cannot be read or an output file cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, graph) = self.course.load(self.output_dir)?;
        let course = &config.course_resolved;

        let solicitation = std::fs::read_to_string(&course.solicitation_file).map_err(|source| {
            CliError::ReadFile {
                path: course.solicitation_file.clone(),
                source,
            }
        })?;

        output.course(&config, !self.dry_run);

        let options = RenderOptions {
            templates_dir: course.templates_dir.clone(),
            output_dir: course.output_dir.clone(),
            solicitation,
            answers_suffix: config.navigation.answers_suffix.clone(),
            heading: config.navigation.heading.clone(),
            dry_run: self.dry_run,
        };
        let report = TemplateRenderer::new(&graph, options).render_all()?;

        output.unmapped(&report.unmapped);
        output.rendered(&report, self.dry_run);
        Ok(())
    }
}
