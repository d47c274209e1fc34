//! Course dependency graph for layercake.
//!
//! This crate turns a `deps.yml` file into an immutable [`CourseGraph`] and
//! answers the two questions the footer generator asks of it:
//!
//! - which label does a page path represent ([`resolve_page`])
//! - which navigation links does that page get ([`synthesize`])
//!
//! # Example
//!
//! ```
//! use layercake_graph::{CourseGraph, GraphOptions, LinkKind, resolve_page, synthesize};
//!
//! let yaml = "
//! urls:
//!   Intro: labs/Intro
//!   Basics: labs/Basics
//! paths:
//!   Cryptol Course: [Intro, Basics]
//! ";
//! let graph = CourseGraph::from_yaml(yaml, &GraphOptions::default()).unwrap();
//! let page = resolve_page(&graph, "labs/Basics.md", "Answers").unwrap();
//! let links = synthesize(&graph, &page, false);
//!
//! let previous = links.first(LinkKind::Previous).unwrap();
//! assert_eq!(previous.label, "Intro");
//! assert_eq!(previous.target.as_deref(), Some("./Intro.md"));
//! ```

mod deps;
mod error;
mod graph;
mod links;
mod relpath;
mod resolver;

pub use error::{GraphError, ResolveError};
pub use graph::{BranchGroup, CourseGraph, CoursePath, GraphOptions};
pub use links::{LinkKind, NavLink, NavLinks, synthesize};
pub use relpath::relative_link;
pub use resolver::{PageRole, ResolvedPage, page_role, resolve_page};
