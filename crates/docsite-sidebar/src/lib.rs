//! Sidebar navigation trees for docsite.
//!
//! A sidebar declaration maps sidebar names (e.g., `docs`) to ordered lists
//! of nodes. Each node is either a page reference or a named group of
//! further nodes, nested without bound. Declaration order is semantically
//! significant: it determines the rendered navigation order and is preserved
//! exactly.
//!
//! Declarations are written in YAML:
//!
//! ```yaml
//! docs:
//!   - input-api/project
//!   - Inputs:
//!       - input-api/general
//!       - input-api/calibration
//! ```
//!
//! A sidebar body may also be a mapping of group labels to node lists, which
//! is shorthand for a list of groups.

use std::path::{Path, PathBuf};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_yaml::Value;

/// A single node in a sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SidebarNode {
    /// Reference to a single documentation page by its stable identifier.
    Leaf(String),
    /// Named collapsible section containing further nodes.
    Group {
        /// Section label.
        label: String,
        /// Child nodes in declaration order.
        children: Vec<SidebarNode>,
    },
}

/// A named sidebar with its ordered nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    /// Sidebar name (top-level key in the declaration).
    pub name: String,
    /// Nodes in declaration order.
    pub nodes: Vec<SidebarNode>,
}

/// Ordered collection of named sidebars.
///
/// Serializes as a mapping from sidebar name to node list, the same shape
/// the declaration uses, for hand-off to the rendering collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarTree {
    sidebars: Vec<Sidebar>,
}

/// Sidebar declaration error.
#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    /// File not found.
    #[error("Sidebar file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// The top-level declaration is not a mapping of sidebar names.
    #[error("sidebar declaration must be a mapping of sidebar names, found {found}")]
    InvalidRoot {
        /// Kind of value found at the root.
        found: &'static str,
    },
    /// A node matches neither the page-reference nor the group shape.
    #[error("malformed sidebar node at `{path}`: expected a page id or a single-key group, found {found}")]
    MalformedNode {
        /// Path of the offending node within the tree (e.g., `docs[1].Inputs[3]`).
        path: String,
        /// Kind of value found at that path.
        found: &'static str,
    },
}

/// Describe a YAML value kind for error messages.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

impl SidebarTree {
    /// Load a sidebar declaration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::NotFound`] if the file does not exist, and
    /// parse or shape errors otherwise.
    pub fn load(path: &Path) -> Result<Self, SidebarError> {
        if !path.exists() {
            return Err(SidebarError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a sidebar declaration from YAML content.
    ///
    /// # Errors
    ///
    /// Returns a parse error for invalid YAML, and a shape error for
    /// declarations that do not match the sidebar structure.
    pub fn parse(content: &str) -> Result<Self, SidebarError> {
        let doc: Value = serde_yaml::from_str(content)?;
        Self::build(&doc)
    }

    /// Build a sidebar tree from a parsed declaration.
    ///
    /// Strings become [`SidebarNode::Leaf`], single-key mappings onto
    /// sequences become [`SidebarNode::Group`]. Sibling order is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::MalformedNode`] identifying the offending
    /// path for any node that matches neither shape.
    pub fn build(doc: &Value) -> Result<Self, SidebarError> {
        let Value::Mapping(map) = doc else {
            return Err(SidebarError::InvalidRoot {
                found: value_kind(doc),
            });
        };

        let mut sidebars = Vec::with_capacity(map.len());
        for (key, value) in map {
            let Value::String(name) = key else {
                return Err(SidebarError::MalformedNode {
                    path: "<sidebar name>".to_owned(),
                    found: value_kind(key),
                });
            };
            let nodes = match value {
                Value::Sequence(items) => build_sequence(items, name)?,
                // Shorthand: mapping of group label onto node list
                Value::Mapping(groups) => {
                    let mut nodes = Vec::with_capacity(groups.len());
                    for (label, children) in groups {
                        nodes.push(build_group(label, children, name)?);
                    }
                    nodes
                }
                other => {
                    return Err(SidebarError::MalformedNode {
                        path: name.clone(),
                        found: value_kind(other),
                    });
                }
            };
            sidebars.push(Sidebar {
                name: name.clone(),
                nodes,
            });
        }

        Ok(Self { sidebars })
    }

    /// Get a sidebar by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Sidebar> {
        self.sidebars.iter().find(|s| s.name == name)
    }

    /// Iterate over sidebars in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sidebar> {
        self.sidebars.iter()
    }

    /// Number of sidebars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sidebars.len()
    }

    /// Whether the tree contains no sidebars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sidebars.is_empty()
    }

    /// Iterate over every page identifier in declaration order.
    ///
    /// The same identifier may appear more than once when a page is
    /// referenced from multiple groups.
    pub fn page_ids(&self) -> impl Iterator<Item = &str> {
        let mut ids = Vec::new();
        for sidebar in &self.sidebars {
            collect_page_ids(&sidebar.nodes, &mut ids);
        }
        ids.into_iter()
    }
}

impl<'a> IntoIterator for &'a SidebarTree {
    type Item = &'a Sidebar;
    type IntoIter = std::slice::Iter<'a, Sidebar>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for SidebarTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sidebars.len()))?;
        for sidebar in &self.sidebars {
            map.serialize_entry(&sidebar.name, &sidebar.nodes)?;
        }
        map.end()
    }
}

/// Build an ordered node list from a YAML sequence.
fn build_sequence(items: &[Value], path: &str) -> Result<Vec<SidebarNode>, SidebarError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| build_node(item, &format!("{path}[{i}]")))
        .collect()
}

/// Build a single node from a YAML value.
fn build_node(value: &Value, path: &str) -> Result<SidebarNode, SidebarError> {
    match value {
        Value::String(page_id) => Ok(SidebarNode::Leaf(page_id.clone())),
        Value::Mapping(map) => match map.iter().next() {
            Some((label, children)) if map.len() == 1 => build_group(label, children, path),
            _ => Err(SidebarError::MalformedNode {
                path: path.to_owned(),
                found: value_kind(value),
            }),
        },
        other => Err(SidebarError::MalformedNode {
            path: path.to_owned(),
            found: value_kind(other),
        }),
    }
}

/// Build a group node from a label and its children value.
fn build_group(label: &Value, children: &Value, path: &str) -> Result<SidebarNode, SidebarError> {
    let Value::String(label) = label else {
        return Err(SidebarError::MalformedNode {
            path: path.to_owned(),
            found: value_kind(label),
        });
    };
    let group_path = format!("{path}.{label}");
    let Value::Sequence(items) = children else {
        return Err(SidebarError::MalformedNode {
            path: group_path,
            found: value_kind(children),
        });
    };
    Ok(SidebarNode::Group {
        label: label.clone(),
        children: build_sequence(items, &group_path)?,
    })
}

/// Collect leaf page identifiers in declaration order.
fn collect_page_ids<'a>(nodes: &'a [SidebarNode], ids: &mut Vec<&'a str>) {
    for node in nodes {
        match node {
            SidebarNode::Leaf(page_id) => ids.push(page_id),
            SidebarNode::Group { children, .. } => collect_page_ids(children, ids),
        }
    }
}
