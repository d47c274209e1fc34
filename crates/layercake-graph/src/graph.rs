//! Immutable course dependency graph.
//!
//! Built once per run from `deps.yml` and shared by reference with the
//! label resolver and link synthesizer. Page paths are template-root-relative
//! with `/` separators (e.g., `"labs/Basics/Basics.md"`).

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::deps::{Deps, parse_deps};
use crate::error::GraphError;

/// Options controlling how `deps.yml` is interpreted.
#[derive(Clone, Debug)]
pub struct GraphOptions {
    /// Label of the implicit root page.
    pub root_label: String,
    /// Template-relative path of the root page.
    pub root_page: String,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            root_label: "Cryptol Course".to_owned(),
            root_page: "README.md".to_owned(),
        }
    }
}

/// One linear progression through a subset of pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoursePath {
    /// Key under `paths`.
    pub name: String,
    /// Label the path hangs off, if it resolves to a page.
    pub parent: Option<String>,
    /// Ordered labels.
    pub labels: Vec<String>,
}

impl CoursePath {
    /// Zero-based position of `label` in this path.
    #[must_use]
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// First label of the path.
    #[must_use]
    pub fn head(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }
}

/// Alternative sub-paths diverging from one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchGroup {
    /// Outer key under `branches`.
    pub section: String,
    /// Label the alternatives diverge from.
    pub attachment: String,
    /// Ordered alternative labels.
    pub alternatives: Vec<String>,
}

/// Course dependency graph with label and page lookups.
#[derive(Debug)]
pub struct CourseGraph {
    /// Label -> page path.
    pages: HashMap<String, String>,
    /// Page path -> label.
    labels: HashMap<String, String>,
    paths: Vec<CoursePath>,
    branches: Vec<BranchGroup>,
}

impl CourseGraph {
    /// Load the graph from a `deps.yml` file.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Io`] if the file cannot be read, or a parse/schema
    /// error if its content is malformed.
    pub fn load(path: &Path, options: &GraphOptions) -> Result<Self, GraphError> {
        let content = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content, options)
    }

    /// Build the graph from `deps.yml` content.
    ///
    /// Labels referenced from `paths` or `branches` without a page are logged
    /// and kept; links to them are omitted during synthesis.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or a key has the wrong shape.
    pub fn from_yaml(content: &str, options: &GraphOptions) -> Result<Self, GraphError> {
        let graph = Self::from_deps(parse_deps(content)?, options);

        for label in graph.dangling_labels() {
            tracing::warn!(label = %label, "Label referenced in deps has no page");
        }
        tracing::debug!(
            pages = graph.pages.len(),
            paths = graph.paths.len(),
            branches = graph.branches.len(),
            "Course graph loaded"
        );

        Ok(graph)
    }

    fn from_deps(deps: Deps, options: &GraphOptions) -> Self {
        let mut pages = HashMap::new();
        let mut labels = HashMap::new();

        for (label, url) in deps.urls {
            let page = url.map_or_else(|| options.root_page.clone(), |url| page_path(&url));
            labels.insert(page.clone(), label.clone());
            pages.insert(label, page);
        }
        pages.insert(options.root_label.clone(), options.root_page.clone());
        labels.insert(options.root_page.clone(), options.root_label.clone());

        let paths = deps
            .paths
            .into_iter()
            .map(|(name, labels)| CoursePath {
                parent: pages.contains_key(&name).then(|| name.clone()),
                name,
                labels,
            })
            .collect();

        let branches = deps
            .branches
            .into_iter()
            .map(|(section, attachment, alternatives)| BranchGroup {
                section,
                attachment,
                alternatives,
            })
            .collect();

        Self {
            pages,
            labels,
            paths,
            branches,
        }
    }

    /// Page path of a label.
    #[must_use]
    pub fn page(&self, label: &str) -> Option<&str> {
        self.pages.get(label).map(String::as_str)
    }

    /// Label of a page path.
    #[must_use]
    pub fn label(&self, page: &str) -> Option<&str> {
        self.labels.get(page).map(String::as_str)
    }

    /// All course paths in declaration order.
    #[must_use]
    pub fn paths(&self) -> &[CoursePath] {
        &self.paths
    }

    /// All branch groups in declaration order.
    #[must_use]
    pub fn branches(&self) -> &[BranchGroup] {
        &self.branches
    }

    /// First course path containing `label`, with the label's position.
    #[must_use]
    pub fn containing_path(&self, label: &str) -> Option<(&CoursePath, usize)> {
        self.paths
            .iter()
            .find_map(|path| path.position(label).map(|idx| (path, idx)))
    }

    /// Course path hanging off `label`.
    #[must_use]
    pub fn child_path(&self, label: &str) -> Option<&CoursePath> {
        self.paths.iter().find(|path| path.name == label)
    }

    /// First branch group attached at `label`.
    #[must_use]
    pub fn branch_group_at(&self, label: &str) -> Option<&BranchGroup> {
        self.branches.iter().find(|group| group.attachment == label)
    }

    /// First branch group listing `label` as an alternative.
    #[must_use]
    pub fn branch_group_containing(&self, label: &str) -> Option<&BranchGroup> {
        self.branches
            .iter()
            .find(|group| group.alternatives.iter().any(|l| l == label))
    }

    /// Labels referenced from `paths` or `branches` that have no page.
    ///
    /// Each label is listed once, in order of first reference.
    #[must_use]
    pub fn dangling_labels(&self) -> Vec<&str> {
        let referenced = self
            .paths
            .iter()
            .flat_map(|path| path.labels.iter())
            .chain(self.branches.iter().flat_map(|group| {
                std::iter::once(&group.attachment).chain(group.alternatives.iter())
            }));

        let mut seen = HashSet::new();
        referenced
            .map(String::as_str)
            .filter(|label| !self.pages.contains_key(*label))
            .filter(|label| seen.insert(*label))
            .collect()
    }
}

/// Convert a declared url to a markdown page path.
///
/// `labs/Basics/Basics` -> `labs/Basics/Basics.md`
fn page_path(url: &str) -> String {
    let url = url.trim_start_matches("./");
    let stem = url.strip_suffix(".md").unwrap_or(url);
    format!("{stem}.md")
}
