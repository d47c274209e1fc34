//! Markdown navigation table.
//!
//! Renders a [`NavLinks`] set as the footer table substituted for the
//! navigation placeholder:
//!
//! ```text
//! # From here, you can go somewhere!
//!
//! ||||
//! |-:|:-:|-|
//! || [ ^ Cryptol Course ](../../README.md) ||
//! | [ < Intro ](../Intro/Intro.md) | **Basics** | [ Advanced > ](../Advanced/Advanced.md) |
//! ```

use std::fmt::Write;

use layercake_graph::{LinkKind, NavLink, NavLinks};

/// Default heading above the navigation table.
pub const DEFAULT_HEADING: &str = "# From here, you can go somewhere!";

/// Render the navigation block for a page.
///
/// An empty link set renders to an empty string.
pub fn render_navigation(heading: &str, links: &NavLinks) -> String {
    if links.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(512);
    let _ = write!(out, "{heading}\n\n||||\n|-:|:-:|-|\n");
    out.push_str(render_rows(links).trim());
    out
}

/// Render the table rows, one per line.
fn render_rows(links: &NavLinks) -> String {
    let mut rows = String::new();

    if let Some(link) = links.first(LinkKind::Up) {
        let _ = writeln!(rows, "|| [ ^ {} ]({}) ||", link.label, target(link));
    } else if let Some(link) = links.first(LinkKind::Back) {
        let _ = writeln!(rows, "|| [ - {} ]({}) ||", link.label, target(link));
    }

    if let Some(current) = links.first(LinkKind::Current) {
        let previous = links
            .first(LinkKind::Previous)
            .map(|link| format!(" [ < {} ]({}) ", link.label, target(link)))
            .unwrap_or_default();
        let next = links
            .first(LinkKind::Next)
            .map(|link| format!(" [ {} > ]({}) ", link.label, target(link)))
            .unwrap_or_default();
        let _ = writeln!(rows, "|{previous}| **{}** |{next}|", current.label);
    }

    if let Some(link) = links.first(LinkKind::Start) {
        let _ = writeln!(rows, "|| [ v {} ]({}) ||", link.label, target(link));
    }

    if let Some(link) = links.first(LinkKind::Answers) {
        let _ = writeln!(rows, "|| [ ! {} (Answers) ]({}) ||", link.label, target(link));
    } else if let Some(link) = links.first(LinkKind::Exercise) {
        let _ = writeln!(rows, "|| [ ? {} ]({}) ||", link.label, target(link));
    }

    let mut branches = links.of_kind(LinkKind::Branch).peekable();
    if branches.peek().is_some() {
        rows.push_str("||||\n");
        for link in branches {
            let _ = writeln!(rows, "|| [+ {}]({}) ||", link.label, target(link));
        }
    }

    rows
}

fn target(link: &NavLink) -> &str {
    link.target.as_deref().unwrap_or_default()
}
