//! Template tree rendering.
//!
//! Mirrors a template directory into an output directory. Markdown pages get
//! their placeholders substituted; every other file is copied unchanged.

use std::fs;
use std::path::{Path, PathBuf};

use layercake_graph::{CourseGraph, NavLinks, PageRole, ResolveError, resolve_page, synthesize};

use crate::navigation::{DEFAULT_HEADING, render_navigation};

/// Placeholder replaced by the navigation table.
pub const NAVIGATION_PLACEHOLDER: &str = "{ navigation }";

/// Placeholder replaced by the solicitation block.
pub const SOLICITATION_PLACEHOLDER: &str = "{ solicitation }";

/// Error returned when rendering fails.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Reading a template or writing an output file failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Configuration for [`TemplateRenderer`].
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Root of the template tree.
    pub templates_dir: PathBuf,
    /// Root of the output tree.
    pub output_dir: PathBuf,
    /// Text substituted for [`SOLICITATION_PLACEHOLDER`].
    pub solicitation: String,
    /// File name suffix marking answers pages.
    pub answers_suffix: String,
    /// Heading above the navigation table.
    pub heading: String,
    /// Read and render everything but write nothing.
    pub dry_run: bool,
}

impl RenderOptions {
    /// Options with default heading and answers suffix.
    #[must_use]
    pub fn new(templates_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            templates_dir,
            output_dir,
            solicitation: String::new(),
            answers_suffix: "Answers".to_owned(),
            heading: DEFAULT_HEADING.to_owned(),
            dry_run: false,
        }
    }
}

/// Summary of a rendering run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Template-relative paths of rendered markdown pages.
    pub rendered: Vec<String>,
    /// Template-relative paths of files copied unchanged.
    pub copied: Vec<String>,
    /// Paths that could not be resolved to a label.
    pub unmapped: Vec<String>,
}

/// Result of rendering one markdown page.
#[derive(Debug, PartialEq, Eq)]
pub struct RenderedPage {
    /// Page content with placeholders substituted.
    pub content: String,
    /// Resolution miss, if the page has no label.
    pub unmapped: Option<String>,
}

/// Renders a template tree against a course graph.
pub struct TemplateRenderer<'a> {
    graph: &'a CourseGraph,
    options: RenderOptions,
}

impl<'a> TemplateRenderer<'a> {
    /// Create a renderer.
    #[must_use]
    pub fn new(graph: &'a CourseGraph, options: RenderOptions) -> Self {
        Self { graph, options }
    }

    /// Render every file under the template directory.
    ///
    /// Files are processed in sorted path order. Resolution misses are
    /// reported and do not stop the run.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Io`] on the first read, write or copy failure.
    pub fn render_all(&self) -> Result<RenderReport, RenderError> {
        let templates_dir = &self.options.templates_dir;
        let mut files = Vec::new();
        collect_files(templates_dir, templates_dir, &mut files)?;

        let mut report = RenderReport::default();
        for rel_path in files {
            self.render_file(&rel_path, &mut report)?;
        }

        tracing::info!(
            rendered = report.rendered.len(),
            copied = report.copied.len(),
            unmapped = report.unmapped.len(),
            dry_run = self.options.dry_run,
            "Templates rendered"
        );
        Ok(report)
    }

    /// Render or copy one template-relative file.
    fn render_file(&self, rel_path: &Path, report: &mut RenderReport) -> Result<(), RenderError> {
        let source = self.options.templates_dir.join(rel_path);
        let target = self.options.output_dir.join(rel_path);
        let page_path = to_page_path(rel_path);

        tracing::info!(
            source = %rel_path.display(),
            target = %target.display(),
            "Rendering"
        );

        if let Some(parent) = target.parent()
            && !self.options.dry_run
        {
            fs::create_dir_all(parent).map_err(RenderError::io(parent))?;
        }

        if rel_path.extension().is_some_and(|e| e == "md") {
            let template = fs::read_to_string(&source).map_err(RenderError::io(&source))?;
            let page = self.render_page(&page_path, &template);
            if let Some(unmapped) = page.unmapped {
                report.unmapped.push(unmapped);
            }
            if !self.options.dry_run {
                fs::write(&target, page.content).map_err(RenderError::io(&target))?;
            }
            report.rendered.push(page_path);
        } else {
            if !self.options.dry_run {
                fs::copy(&source, &target).map_err(RenderError::io(&source))?;
            }
            report.copied.push(page_path);
        }

        Ok(())
    }

    /// Render one markdown page.
    ///
    /// `page_path` is template-relative with `/` separators. Links are only
    /// synthesized when the template contains [`NAVIGATION_PLACEHOLDER`].
    /// A page without a label renders without navigation.
    pub fn render_page(&self, page_path: &str, template: &str) -> RenderedPage {
        let resolved = resolve_page(self.graph, page_path, &self.options.answers_suffix);

        let unmapped = match &resolved {
            Err(ResolveError::Unmapped(path) | ResolveError::NotMarkdown(path)) => {
                tracing::debug!(path = %path, "Page not mapped to a label");
                Some(path.clone())
            }
            Ok(_) => None,
        };

        let navigation = if template.contains(NAVIGATION_PLACEHOLDER) {
            let links = match &resolved {
                Ok(page) => {
                    let answers_on_disk = match &page.role {
                        PageRole::Exercise { answers } => {
                            self.options.templates_dir.join(answers).is_file()
                        }
                        PageRole::Answers { .. } => false,
                    };
                    synthesize(self.graph, page, answers_on_disk)
                }
                Err(_) => NavLinks::empty(),
            };
            render_navigation(&self.options.heading, &links)
        } else {
            String::new()
        };

        RenderedPage {
            content: fill_placeholders(template, &navigation, &self.options.solicitation),
            unmapped,
        }
    }
}

/// Substitute the navigation and solicitation placeholders once each.
pub fn fill_placeholders(template: &str, navigation: &str, solicitation: &str) -> String {
    template
        .replacen(NAVIGATION_PLACEHOLDER, navigation, 1)
        .replacen(SOLICITATION_PLACEHOLDER, solicitation, 1)
}

/// Collect template-relative paths of all files under `dir`, sorted.
fn collect_files(root: &Path, dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let mut entries = fs::read_dir(dir)
        .map_err(RenderError::io(dir))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(RenderError::io(dir))?;
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(RenderError::io(&path))?;
        if file_type.is_dir() {
            collect_files(root, &path, files)?;
        } else if path.is_file() {
            // Walked paths always live under `root`
            if let Ok(rel_path) = path.strip_prefix(root) {
                files.push(rel_path.to_path_buf());
            }
        }
    }

    Ok(())
}

/// Convert a relative filesystem path to a `/`-separated page path.
fn to_page_path(rel_path: &Path) -> String {
    rel_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
