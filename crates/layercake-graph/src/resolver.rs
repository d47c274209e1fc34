//! Page path to label resolution.
//!
//! Answers pages (`FooAnswers.md`) share the label of their exercise page
//! (`Foo.md`) for navigation purposes.

use crate::error::ResolveError;
use crate::graph::CourseGraph;

/// How a page relates to the exercise/answers pairing convention.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageRole {
    /// Regular page; `answers` is where its answers variant would live.
    Exercise {
        /// Template-relative path of the potential answers page.
        answers: String,
    },
    /// Answers page for the exercise at `exercise`.
    Answers {
        /// Template-relative path of the exercise page.
        exercise: String,
    },
}

/// A page path with its resolved label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPage {
    /// Template-relative path of the page itself.
    pub path: String,
    /// Label used for navigation.
    pub label: String,
    /// Exercise/answers pairing.
    pub role: PageRole,
}

/// Determine a page's role from its path.
///
/// # Errors
///
/// Returns [`ResolveError::NotMarkdown`] if `path` does not end in `.md`.
pub fn page_role(path: &str, answers_suffix: &str) -> Result<PageRole, ResolveError> {
    let stem = path
        .strip_suffix(".md")
        .ok_or_else(|| ResolveError::NotMarkdown(path.to_owned()))?;

    let file_stem = stem.rsplit_once('/').map_or(stem, |(_, name)| name);
    let is_answers = !answers_suffix.is_empty()
        && file_stem.len() > answers_suffix.len()
        && file_stem.ends_with(answers_suffix);

    if is_answers {
        let exercise_stem = &stem[..stem.len() - answers_suffix.len()];
        Ok(PageRole::Answers {
            exercise: format!("{exercise_stem}.md"),
        })
    } else {
        Ok(PageRole::Exercise {
            answers: format!("{stem}{answers_suffix}.md"),
        })
    }
}

/// Resolve the label of the page at `path`.
///
/// # Errors
///
/// Returns [`ResolveError::Unmapped`] with the looked-up path (the exercise
/// path, for answers pages) if it has no label.
pub fn resolve_page(
    graph: &CourseGraph,
    path: &str,
    answers_suffix: &str,
) -> Result<ResolvedPage, ResolveError> {
    let role = page_role(path, answers_suffix)?;
    let lookup = match &role {
        PageRole::Answers { exercise } => exercise.as_str(),
        PageRole::Exercise { .. } => path,
    };

    let label = graph
        .label(lookup)
        .ok_or_else(|| ResolveError::Unmapped(lookup.to_owned()))?;

    Ok(ResolvedPage {
        path: path.to_owned(),
        label: label.to_owned(),
        role,
    })
}
