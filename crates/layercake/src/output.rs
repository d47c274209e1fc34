//! Progress and problem reporting on stderr.

use std::fmt::Display;

use console::{Style, Term};
use layercake_config::Config;
use layercake_render::RenderReport;

/// Writes command progress and course problems to stderr.
pub(crate) struct Output {
    term: Term,
    key: Style,
    done: Style,
    problem: Style,
    fatal: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            key: Style::new().dim(),
            done: Style::new().green(),
            problem: Style::new().yellow(),
            fatal: Style::new().red().bold(),
        }
    }

    /// Show where the course is read from, and where it goes when `writes`.
    pub(crate) fn course(&self, config: &Config, writes: bool) {
        let course = &config.course_resolved;
        match &config.config_path {
            Some(path) => self.field("Config", &path.display()),
            None => self.field("Config", &"built-in defaults"),
        }
        self.field("Graph", &course.deps_file.display());
        self.field("Templates", &course.templates_dir.display());
        if writes {
            self.field("Output", &course.output_dir.display());
        }
    }

    /// Template pages whose path has no label.
    pub(crate) fn unmapped(&self, paths: &[String]) {
        for path in paths {
            self.line(&self.problem.apply_to(format!("{path} not mapped to a label")));
        }
    }

    /// Labels referenced in the graph without a page.
    pub(crate) fn dangling(&self, labels: &[&str]) {
        for label in labels {
            self.line(&self.problem.apply_to(format!("Label \"{label}\" has no entry in urls")));
        }
    }

    pub(crate) fn rendered(&self, report: &RenderReport, dry_run: bool) {
        self.line(&self.done.apply_to(render_summary(report, dry_run)));
    }

    pub(crate) fn checked(&self, pages: usize) {
        self.line(&self.done.apply_to(format!("{pages} pages checked, no problems found")));
    }

    pub(crate) fn error(&self, err: &dyn Display) {
        self.line(&self.fatal.apply_to(format!("Error: {err}")));
    }

    fn field(&self, name: &str, value: &dyn Display) {
        self.line(&format!("{} {value}", self.key.apply_to(format!("{name}:"))));
    }

    fn line(&self, text: &dyn Display) {
        let _ = self.term.write_line(&text.to_string());
    }
}

fn render_summary(report: &RenderReport, dry_run: bool) -> String {
    let summary = format!(
        "{} pages rendered, {} files copied",
        report.rendered.len(),
        report.copied.len()
    );
    match (dry_run, report.unmapped.len()) {
        (true, 0) => format!("Dry run: {summary}"),
        (true, unmapped) => format!("Dry run: {summary} ({unmapped} without navigation)"),
        (false, 0) => summary,
        (false, unmapped) => format!("{summary} ({unmapped} without navigation)"),
    }
}
