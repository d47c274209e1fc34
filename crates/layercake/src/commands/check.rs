//! `layercake check` command implementation.

use clap::Args;
use layercake_render::{RenderOptions, TemplateRenderer};

use super::CourseArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub course: CourseArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Reports labels referenced in the graph without a page and template
    /// pages without a label. Writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Validation`] if any problem is found.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, graph) = self.course.load(None)?;
        let course = &config.course_resolved;

        output.course(&config, false);

        let dangling = graph.dangling_labels();
        output.dangling(&dangling);

        let options = RenderOptions {
            answers_suffix: config.navigation.answers_suffix.clone(),
            dry_run: true,
            ..RenderOptions::new(course.templates_dir.clone(), course.output_dir.clone())
        };
        let report = TemplateRenderer::new(&graph, options).render_all()?;
        output.unmapped(&report.unmapped);

        let problems = dangling.len() + report.unmapped.len();
        if problems > 0 {
            return Err(CliError::Validation(format!(
                "{problems} problem(s) found in {}",
                course.deps_file.display()
            )));
        }

        output.checked(report.rendered.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::write_course;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: CheckArgs,
    }

    fn check(root: &std::path::Path) -> Result<(), CliError> {
        let config = root.join("layercake.toml").to_string_lossy().into_owned();
        TestCli::try_parse_from(["check", "--config", config.as_str()])
            .unwrap()
            .args
            .execute()
    }

    #[test]
    fn test_check_clean_course() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_course(
            temp_dir.path(),
            "urls:\n  Intro: labs/Intro\n  Basics: labs/Basics\npaths:\n  Cryptol Course: [Intro, Basics]\n",
        );

        check(temp_dir.path()).unwrap();
        assert!(!temp_dir.path().join("out").exists());
    }

    #[test]
    fn test_check_reports_problems() {
        let temp_dir = tempfile::tempdir().unwrap();
        // Basics is unmapped and Ghost has no page
        write_course(
            temp_dir.path(),
            "urls:\n  Intro: labs/Intro\npaths:\n  Cryptol Course: [Intro, Ghost]\n",
        );

        let err = check(temp_dir.path()).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
        assert!(err.to_string().starts_with("2 problem(s)"));
    }
}
