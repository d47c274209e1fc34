//! `deps.yml` wire format.
//!
//! The file has three top-level keys:
//!
//! ```yaml
//! urls:                       # label -> page path without extension (null = root page)
//!   Cryptol Course: null
//!   Basics: labs/Basics/Basics
//! paths:                      # parent label -> ordered labels
//!   Cryptol Course: [Intro, Basics, Advanced]
//! branches:                   # section -> attachment label -> alternatives
//!   Basics:
//!     Basics: [SideQuestA, SideQuestB]
//! ```
//!
//! Parsing keeps declaration order, which decides first-match lookups.

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::error::GraphError;

/// Raw top-level document before shape validation.
#[derive(Deserialize)]
struct DepsFile {
    urls: Option<Mapping>,
    #[serde(default)]
    paths: Option<Mapping>,
    #[serde(default)]
    branches: Option<Mapping>,
}

/// Shape-validated contents of a `deps.yml` file.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Deps {
    /// Label and declared url (`None` for the root page).
    pub urls: Vec<(String, Option<String>)>,
    /// Path name and its ordered labels.
    pub paths: Vec<(String, Vec<String>)>,
    /// Section, attachment label and ordered alternatives.
    pub branches: Vec<(String, String, Vec<String>)>,
}

/// Parse and validate `deps.yml` content.
pub(crate) fn parse_deps(content: &str) -> Result<Deps, GraphError> {
    let file: DepsFile = serde_yaml::from_str(content)?;

    let urls: Vec<(String, Option<String>)> = file
        .urls
        .ok_or_else(|| GraphError::schema("urls", "missing top-level mapping"))?
        .into_iter()
        .map(|(key, value)| {
            let label = expect_label(key, "urls")?;
            let url = match value {
                Value::Null => None,
                Value::String(url) => Some(url),
                _ => {
                    return Err(GraphError::schema(
                        format!("urls.{label}"),
                        "expected a page path or null",
                    ));
                }
            };
            Ok::<_, GraphError>((label, url))
        })
        .collect::<Result<_, _>>()?;

    let paths: Vec<(String, Vec<String>)> = file
        .paths
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| {
            let name = expect_label(key, "paths")?;
            let labels = expect_labels(value, &format!("paths.{name}"))?;
            Ok::<_, GraphError>((name, labels))
        })
        .collect::<Result<_, _>>()?;

    let mut branches = Vec::new();
    for (key, value) in file.branches.unwrap_or_default() {
        let section = expect_label(key, "branches")?;
        let groups = match value {
            Value::Null => Mapping::new(),
            Value::Mapping(groups) => groups,
            _ => {
                return Err(GraphError::schema(
                    format!("branches.{section}"),
                    "expected a mapping of attachment label to branch labels",
                ));
            }
        };
        for (key, value) in groups {
            let location = format!("branches.{section}");
            let attachment = expect_label(key, &location)?;
            let alternatives = expect_labels(value, &format!("{location}.{attachment}"))?;
            branches.push((section.clone(), attachment, alternatives));
        }
    }

    Ok(Deps {
        urls,
        paths,
        branches,
    })
}

/// Require a mapping key to be a string label.
fn expect_label(key: Value, location: &str) -> Result<String, GraphError> {
    match key {
        Value::String(label) => Ok(label),
        other => Err(GraphError::schema(
            location,
            format!("expected string label as key, found {}", describe(&other)),
        )),
    }
}

/// Require a value to be a list of string labels. Null is an empty list.
fn expect_labels(value: Value, location: &str) -> Result<Vec<String>, GraphError> {
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Sequence(items) => items,
        other => {
            return Err(GraphError::schema(
                location,
                format!("expected a list of labels, found {}", describe(&other)),
            ));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(label) => Ok(label),
            other => Err(GraphError::schema(
                format!("{location}[{i}]"),
                format!("expected string label, found {}", describe(&other)),
            )),
        })
        .collect()
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_document_keeps_order() {
        let yaml = r"
urls:
  Cryptol Course: null
  Intro: labs/Intro/Intro
  Basics: labs/Basics/Basics
paths:
  Cryptol Course: [Intro, Basics]
  Basics:
    - Side
branches:
  Extras:
    Basics: [SideQuestA, SideQuestB]
";
        let deps = parse_deps(yaml).unwrap();

        assert_eq!(
            deps.urls,
            vec![
                ("Cryptol Course".to_owned(), None),
                ("Intro".to_owned(), Some("labs/Intro/Intro".to_owned())),
                ("Basics".to_owned(), Some("labs/Basics/Basics".to_owned())),
            ]
        );
        assert_eq!(
            deps.paths,
            vec![
                (
                    "Cryptol Course".to_owned(),
                    vec!["Intro".to_owned(), "Basics".to_owned()]
                ),
                ("Basics".to_owned(), vec!["Side".to_owned()]),
            ]
        );
        assert_eq!(
            deps.branches,
            vec![(
                "Extras".to_owned(),
                "Basics".to_owned(),
                vec!["SideQuestA".to_owned(), "SideQuestB".to_owned()]
            )]
        );
    }

    #[test]
    fn test_parse_optional_tables() {
        let deps = parse_deps("urls:\n  Intro: intro\npaths:\n").unwrap();
        assert_eq!(deps.urls.len(), 1);
        assert!(deps.paths.is_empty());
        assert!(deps.branches.is_empty());
    }

    #[test]
    fn test_parse_missing_urls() {
        let err = parse_deps("paths:\n  A: [B]\n").unwrap_err();
        assert!(
            matches!(&err, GraphError::Schema { key, .. } if key == "urls"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_parse_url_wrong_type() {
        let err = parse_deps("urls:\n  Intro: [a, b]\n").unwrap_err();
        assert!(
            matches!(&err, GraphError::Schema { key, .. } if key == "urls.Intro"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_parse_path_not_a_list() {
        let err = parse_deps("urls: {}\npaths:\n  Intro: Basics\n").unwrap_err();
        assert!(err.to_string().contains("paths.Intro"));
        assert!(err.to_string().contains("list of labels"));
    }

    #[test]
    fn test_parse_path_item_not_a_string() {
        let err = parse_deps("urls: {}\npaths:\n  Intro: [Basics, {x: 1}]\n").unwrap_err();
        assert!(
            matches!(&err, GraphError::Schema { key, .. } if key == "paths.Intro[1]"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_parse_branch_section_not_a_mapping() {
        let err = parse_deps("urls: {}\nbranches:\n  Extras: [A]\n").unwrap_err();
        assert!(
            matches!(&err, GraphError::Schema { key, .. } if key == "branches.Extras"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_parse_numeric_label_key() {
        let err = parse_deps("urls:\n  42: labs/x\n").unwrap_err();
        assert!(err.to_string().contains("number"));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = parse_deps("urls: [unclosed").unwrap_err();
        assert!(matches!(err, GraphError::Parse(_)));
    }
}
