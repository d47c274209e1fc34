//! Navigation link synthesis.
//!
//! Given a resolved page and the course graph, produces the ordered set of
//! links shown in the page's navigation table:
//!
//! 1. `Up` to the parent of the page's course path, or `Back` to the
//!    attachment page when the page is a branch alternative
//! 2. `Previous`, `Current`, `Next` within the course path
//! 3. `Start` of the course path hanging off this page
//! 4. `Answers` or `Exercise` cross-link
//! 5. `Branch` alternatives diverging from this page
//!
//! Targets that do not resolve to a page are omitted.

use crate::graph::CourseGraph;
use crate::relpath::relative_link;
use crate::resolver::{PageRole, ResolvedPage};

/// Direction of a navigation link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// Parent of the page's course path.
    Up,
    /// Attachment page of the branch group this page belongs to.
    Back,
    /// Preceding page in the course path.
    Previous,
    /// The page itself (never linked).
    Current,
    /// Following page in the course path.
    Next,
    /// First page of the course path hanging off this page.
    Start,
    /// Answers variant of this exercise page.
    Answers,
    /// Exercise page of this answers page.
    Exercise,
    /// First page of a branch alternative.
    Branch,
}

/// One navigation link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    /// Link direction.
    pub kind: LinkKind,
    /// Label shown for the link.
    pub label: String,
    /// Relative link target. `None` for [`LinkKind::Current`].
    pub target: Option<String>,
}

/// Ordered navigation links of one page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavLinks(Vec<NavLink>);

impl NavLinks {
    /// Link set of a page without navigation.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether there are no links at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over links in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, NavLink> {
        self.0.iter()
    }

    /// First link of the given kind.
    #[must_use]
    pub fn first(&self, kind: LinkKind) -> Option<&NavLink> {
        self.0.iter().find(|link| link.kind == kind)
    }

    /// All links of the given kind.
    pub fn of_kind(&self, kind: LinkKind) -> impl Iterator<Item = &NavLink> {
        self.0.iter().filter(move |link| link.kind == kind)
    }
}

impl<'a> IntoIterator for &'a NavLinks {
    type Item = &'a NavLink;
    type IntoIter = std::slice::Iter<'a, NavLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collects links from one page, dropping targets without a page.
struct LinkBuilder<'a> {
    graph: &'a CourseGraph,
    from: &'a str,
    links: Vec<NavLink>,
}

impl<'a> LinkBuilder<'a> {
    fn new(graph: &'a CourseGraph, from: &'a str) -> Self {
        Self {
            graph,
            from,
            links: Vec::new(),
        }
    }

    /// Link to the page of `target`, shown as `label`.
    fn push_label(&mut self, kind: LinkKind, label: &str, target: &str) {
        let Some(page) = self.graph.page(target) else {
            tracing::debug!(
                from = %self.from,
                label = %target,
                kind = ?kind,
                "Link target has no page, omitting"
            );
            return;
        };
        let target = relative_link(self.from, page);
        self.push(kind, label, Some(target));
    }

    fn push(&mut self, kind: LinkKind, label: &str, target: Option<String>) {
        self.links.push(NavLink {
            kind,
            label: label.to_owned(),
            target,
        });
    }
}

/// Synthesize the navigation links of `page`.
///
/// `answers_on_disk` tells whether the answers variant of an exercise page
/// exists; it is ignored for answers pages.
#[must_use]
pub fn synthesize(graph: &CourseGraph, page: &ResolvedPage, answers_on_disk: bool) -> NavLinks {
    let label = page.label.as_str();
    let mut links = LinkBuilder::new(graph, &page.path);
    let position = graph.containing_path(label);

    // Up or back
    match position {
        Some((path, idx)) if idx > 0 => {
            if let Some(parent) = &path.parent {
                links.push_label(LinkKind::Up, parent, parent);
            }
        }
        Some(_) => {}
        None => {
            if let Some(group) = graph.branch_group_containing(label) {
                links.push_label(LinkKind::Back, &group.attachment, &group.attachment);
            }
        }
    }

    // Previous, current, next
    if let Some((path, idx)) = position
        && let Some(previous) = idx.checked_sub(1).and_then(|i| path.labels.get(i))
    {
        links.push_label(LinkKind::Previous, previous, previous);
    }
    links.push(LinkKind::Current, label, None);
    if let Some((path, idx)) = position
        && let Some(next) = path.labels.get(idx + 1)
    {
        links.push_label(LinkKind::Next, next, next);
    }

    // Start of the course path hanging off this page
    if let Some(start) = graph.child_path(label).and_then(|path| path.head()) {
        links.push_label(LinkKind::Start, start, start);
    }

    // Answers/exercise cross-link
    match &page.role {
        PageRole::Exercise { answers } if answers_on_disk => {
            links.push(LinkKind::Answers, label, Some(sibling_link(answers)));
        }
        PageRole::Exercise { .. } => {}
        PageRole::Answers { exercise } => {
            links.push(LinkKind::Exercise, label, Some(sibling_link(exercise)));
        }
    }

    // Branch alternatives
    if let Some(group) = graph.branch_group_at(label) {
        for alternative in &group.alternatives {
            let target = graph
                .containing_path(alternative)
                .and_then(|(path, _)| path.head())
                .unwrap_or(alternative.as_str());
            links.push_label(LinkKind::Branch, alternative, target);
        }
    }

    NavLinks(links.links)
}

/// Link to a page in the same directory.
fn sibling_link(path: &str) -> String {
    let name = path.rsplit_once('/').map_or(path, |(_, name)| name);
    format!("./{name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphOptions;
    use crate::resolver::resolve_page;
    use pretty_assertions::assert_eq;

    const DEPS: &str = r"
urls:
  Intro: labs/Intro/Intro
  Basics: labs/Basics/Basics
  Advanced: labs/Advanced/Advanced
  Records: labs/Basics/Records
  Tuples: labs/Basics/Tuples
  SideQuestA: labs/Side/A
  SideQuestB: labs/Side/B
  SideA1: labs/Side/A1
paths:
  Cryptol Course: [Intro, Basics, Advanced]
  Basics: [Records, Tuples, Ghost]
  SideQuestA: [SideA1]
branches:
  Extras:
    Basics: [SideQuestA, SideQuestB, Phantom]
";

    fn graph() -> CourseGraph {
        CourseGraph::from_yaml(DEPS, &GraphOptions::default()).unwrap()
    }

    fn links_for(graph: &CourseGraph, path: &str, answers_on_disk: bool) -> NavLinks {
        let page = resolve_page(graph, path, "Answers").unwrap();
        synthesize(graph, &page, answers_on_disk)
    }

    fn link(kind: LinkKind, label: &str, target: Option<&str>) -> NavLink {
        NavLink {
            kind,
            label: label.to_owned(),
            target: target.map(str::to_owned),
        }
    }

    fn target(links: &NavLinks, kind: LinkKind) -> Option<&str> {
        links.first(kind).and_then(|l| l.target.as_deref())
    }

    #[test]
    fn test_mid_path_page() {
        let graph = graph();
        let links = links_for(&graph, "labs/Basics/Basics.md", false);

        let up_row: Vec<_> = links.iter().take(4).cloned().collect();
        assert_eq!(
            up_row,
            vec![
                link(LinkKind::Up, "Cryptol Course", Some("../../README.md")),
                link(LinkKind::Previous, "Intro", Some("../Intro/Intro.md")),
                link(LinkKind::Current, "Basics", None),
                link(LinkKind::Next, "Advanced", Some("../Advanced/Advanced.md")),
            ]
        );
    }

    #[test]
    fn test_head_of_path_has_no_previous_or_up() {
        let graph = graph();
        let links = links_for(&graph, "labs/Intro/Intro.md", false);

        assert!(links.first(LinkKind::Previous).is_none());
        assert!(links.first(LinkKind::Up).is_none());
        assert_eq!(links.first(LinkKind::Next).unwrap().label, "Basics");
    }

    #[test]
    fn test_last_of_path_has_no_next() {
        let graph = graph();
        let links = links_for(&graph, "labs/Advanced/Advanced.md", false);

        assert!(links.first(LinkKind::Next).is_none());
        assert_eq!(links.first(LinkKind::Previous).unwrap().label, "Basics");
    }

    #[test]
    fn test_previous_is_preceding_element_for_every_position() {
        let graph = graph();
        for path in graph.paths() {
            for (idx, label) in path.labels.iter().enumerate().skip(1) {
                let Some(page) = graph.page(label) else { continue };
                if graph.containing_path(label).map(|(p, _)| p.name.as_str())
                    != Some(path.name.as_str())
                {
                    continue;
                }
                let links = links_for(&graph, page, false);
                let previous = &path.labels[idx - 1];
                if graph.page(previous).is_some() {
                    assert_eq!(&links.first(LinkKind::Previous).unwrap().label, previous);
                }
            }
        }
    }

    #[test]
    fn test_current_always_present() {
        let graph = graph();
        let links = links_for(&graph, "labs/Side/B.md", false);
        assert_eq!(
            links.first(LinkKind::Current),
            Some(&link(LinkKind::Current, "SideQuestB", None))
        );
    }

    #[test]
    fn test_start_of_child_path() {
        let graph = graph();
        let links = links_for(&graph, "labs/Basics/Basics.md", false);
        assert_eq!(
            links.first(LinkKind::Start),
            Some(&link(LinkKind::Start, "Records", Some("./Records.md")))
        );
    }

    #[test]
    fn test_branch_alternatives_target_their_own_page() {
        let graph = graph();
        let links = links_for(&graph, "labs/Basics/Basics.md", false);

        // SideQuestA has a course path hanging off it, but the branch row
        // still opens SideQuestA itself
        let branches: Vec<_> = links.of_kind(LinkKind::Branch).cloned().collect();
        assert_eq!(
            branches,
            vec![
                link(LinkKind::Branch, "SideQuestA", Some("../Side/A.md")),
                link(LinkKind::Branch, "SideQuestB", Some("../Side/B.md")),
            ]
        );
    }

    #[test]
    fn test_branch_alternative_in_path_targets_path_head() {
        let yaml = "\
urls:
  Basics: labs/Basics
  SideQuestA: labs/SideA
  A1: labs/A1
  A2: labs/A2
paths:
  SideQuestA: [A1]
  Detour: [A2, SideQuestA]
branches:
  Cryptol Course:
    Basics: [SideQuestA]
";
        let graph = CourseGraph::from_yaml(yaml, &GraphOptions::default()).unwrap();
        let links = links_for(&graph, "labs/Basics.md", false);

        assert_eq!(target(&links, LinkKind::Branch), Some("./A2.md"));
    }

    #[test]
    fn test_branch_alternative_heading_its_path() {
        let yaml = "\
urls:
  Basics: labs/Basics
  SideQuestA: labs/SideA
  A1: labs/A1
paths:
  SideQuestA: [A1]
branches:
  Cryptol Course:
    Basics: [SideQuestA]
";
        let graph = CourseGraph::from_yaml(yaml, &GraphOptions::default()).unwrap();
        let links = links_for(&graph, "labs/Basics.md", false);

        assert_eq!(
            links.first(LinkKind::Branch),
            Some(&link(LinkKind::Branch, "SideQuestA", Some("./SideA.md")))
        );
    }

    #[test]
    fn test_targets_are_relative() {
        let graph = graph();
        for page in ["README.md", "labs/Basics/Basics.md", "labs/Side/A.md"] {
            let links = links_for(&graph, page, true);
            for link in &links {
                match (&link.kind, link.target.as_deref()) {
                    (LinkKind::Current, target) => assert_eq!(target, None),
                    (_, Some(target)) => assert!(
                        target.starts_with("./") || target.starts_with("../"),
                        "{page}: {target}"
                    ),
                    (kind, None) => panic!("{page}: {kind:?} link without target"),
                }
            }
        }
    }

    #[test]
    fn test_branch_alternative_links_back() {
        let graph = graph();
        let links = links_for(&graph, "labs/Side/A.md", false);

        assert_eq!(
            links.first(LinkKind::Back),
            Some(&link(LinkKind::Back, "Basics", Some("../Basics/Basics.md")))
        );
        assert!(links.first(LinkKind::Up).is_none());
    }

    #[test]
    fn test_missing_targets_are_omitted() {
        let graph = graph();
        let links = links_for(&graph, "labs/Basics/Tuples.md", false);

        assert_eq!(target(&links, LinkKind::Up), Some("./Basics.md"));
        assert_eq!(target(&links, LinkKind::Previous), Some("./Records.md"));
        assert!(links.first(LinkKind::Next).is_none());
    }

    #[test]
    fn test_answers_link_when_answers_exist() {
        let graph = graph();
        let links = links_for(&graph, "labs/Intro/Intro.md", true);

        let cross: Vec<_> = links
            .iter()
            .filter(|l| matches!(l.kind, LinkKind::Answers | LinkKind::Exercise))
            .cloned()
            .collect();
        assert_eq!(
            cross,
            vec![link(LinkKind::Answers, "Intro", Some("./IntroAnswers.md"))]
        );
    }

    #[test]
    fn test_no_answers_link_without_answers_page() {
        let graph = graph();
        let links = links_for(&graph, "labs/Intro/Intro.md", false);
        assert!(links.first(LinkKind::Answers).is_none());
    }

    #[test]
    fn test_answers_page_links_back_to_exercise_only() {
        let graph = graph();
        let links = links_for(&graph, "labs/Intro/IntroAnswers.md", true);

        assert_eq!(links.of_kind(LinkKind::Exercise).count(), 1);
        assert_eq!(target(&links, LinkKind::Exercise), Some("./Intro.md"));
        assert!(links.first(LinkKind::Answers).is_none());
        // Answers pages share their exercise's navigation
        assert_eq!(target(&links, LinkKind::Next), Some("../Basics/Basics.md"));
    }

    #[test]
    fn test_link_order() {
        let graph = graph();
        let links = links_for(&graph, "labs/Basics/Basics.md", true);
        let kinds: Vec<_> = links.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LinkKind::Up,
                LinkKind::Previous,
                LinkKind::Current,
                LinkKind::Next,
                LinkKind::Start,
                LinkKind::Answers,
                LinkKind::Branch,
                LinkKind::Branch,
            ]
        );
    }

    #[test]
    fn test_root_page_links() {
        let graph = graph();
        let links = links_for(&graph, "README.md", false);
        assert_eq!(
            links.first(LinkKind::Start),
            Some(&link(LinkKind::Start, "Intro", Some("./labs/Intro/Intro.md")))
        );
        assert_eq!(links.iter().count(), 2);
    }

    #[test]
    fn test_empty_links() {
        assert!(NavLinks::empty().is_empty());
    }
}
