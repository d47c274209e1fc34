//! Relative links between course pages.

/// Compute a relative path from one page to another.
///
/// Both `from` and `to` are template-relative page paths with `/` separators.
/// The last segment of `from` is the current page; the base directory is
/// everything before it.
fn relative_path(from: &str, to: &str) -> String {
    let from_segs: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to_segs: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    let from_dir = from_segs
        .split_last()
        .map_or(&from_segs[..], |(_, dir)| dir);

    let common = from_dir
        .iter()
        .zip(&to_segs)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from_dir.len() - common;
    let remaining = &to_segs[common..];

    format!("{}{}", "../".repeat(ups), remaining.join("/"))
}

/// Link from the page at `from` to the page at `to`.
///
/// Links that do not climb out of the current directory carry a leading `./`.
///
/// # Examples
///
/// ```
/// use layercake_graph::relative_link;
///
/// assert_eq!(relative_link("labs/A/A.md", "labs/A/B.md"), "./B.md");
/// assert_eq!(relative_link("labs/A/A.md", "README.md"), "../../README.md");
/// assert_eq!(relative_link("README.md", "labs/A/A.md"), "./labs/A/A.md");
/// ```
#[must_use]
pub fn relative_link(from: &str, to: &str) -> String {
    let path = relative_path(from, to);
    if path.starts_with("../") {
        path
    } else {
        format!("./{path}")
    }
}
