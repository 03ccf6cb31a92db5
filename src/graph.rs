// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Graph view of the project map with petgraph backing
//!
//! Edges point from the referenced project to the one that references it,
//! so `vue -> vite` reads "vite grew out of vue". References to names that
//! are not in the map are kept out of the graph and reported by
//! [`YakGraph::dangling_references`].

use crate::error::{Result, YakMapError};
use crate::types::{PositionMap, ProjectNode};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Kind of relationship between two projects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Listed in `from`: grew out of / was inspired by
    Inspiration,
    /// Listed in `deps`: actually depends on
    Dependency,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inspiration => write!(f, "from"),
            Self::Dependency => write!(f, "deps"),
        }
    }
}

/// An edge whose source project is not in the map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    /// Project holding the reference
    pub node: String,
    /// Which list the reference is in
    pub kind: EdgeKind,
    /// The unresolved name
    pub missing: String,
}

/// The project map as a directed graph
pub struct YakGraph {
    /// The underlying directed graph, weighted by project name
    graph: DiGraph<String, EdgeKind>,
    /// Map from project name to node index
    node_indices: HashMap<String, NodeIndex>,
    /// Projects in dataset order
    nodes: Vec<ProjectNode>,
}

impl YakGraph {
    /// Build the graph, rejecting duplicate names
    pub fn new(nodes: Vec<ProjectNode>) -> Result<Self> {
        let mut yak = Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
            nodes,
        };
        yak.rebuild_graph()?;
        Ok(yak)
    }

    fn rebuild_graph(&mut self) -> Result<()> {
        self.graph.clear();
        self.node_indices.clear();

        for node in &self.nodes {
            if self.node_indices.contains_key(&node.name) {
                return Err(YakMapError::DuplicateName(node.name.clone()));
            }
            let idx = self.graph.add_node(node.name.clone());
            self.node_indices.insert(node.name.clone(), idx);
        }

        for node in &self.nodes {
            let to_idx = self.node_indices[&node.name];
            for (kind, source) in references(node) {
                if let Some(&from_idx) = self.node_indices.get(source) {
                    self.graph.add_edge(from_idx, to_idx, kind);
                }
            }
        }

        Ok(())
    }

    /// Get a project by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ProjectNode> {
        self.node_indices
            .get(name)
            .map(|idx| &self.nodes[idx.index()])
    }

    /// Get all projects
    #[must_use]
    pub fn nodes(&self) -> &[ProjectNode] {
        &self.nodes
    }

    /// Get node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get count of resolved edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Count resolved edges of one kind
    #[must_use]
    pub fn edge_count_of(&self, kind: EdgeKind) -> usize {
        self.graph.edge_weights().filter(|k| **k == kind).count()
    }

    /// Check if the graph is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Projects with no resolved upstream edge
    #[must_use]
    pub fn roots(&self) -> Vec<&ProjectNode> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|idx| &self.nodes[idx.index()])
            .collect()
    }

    /// Every `from`/`deps` entry that names no project
    #[must_use]
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        self.nodes
            .iter()
            .flat_map(|node| {
                references(node)
                    .filter(|(_, source)| !self.node_indices.contains_key(*source))
                    .map(|(kind, source)| DanglingReference {
                        node: node.name.clone(),
                        kind,
                        missing: source.to_string(),
                    })
            })
            .collect()
    }

    /// Position keys that match no project
    #[must_use]
    pub fn unknown_positions<'a>(&self, positions: &'a PositionMap) -> Vec<&'a str> {
        positions
            .keys()
            .filter(|name| !self.node_indices.contains_key(*name))
            .map(String::as_str)
            .collect()
    }

    /// Projects without layout coordinates
    #[must_use]
    pub fn unpositioned(&self) -> Vec<&ProjectNode> {
        self.nodes.iter().filter(|n| n.position().is_none()).collect()
    }

    /// Export to DOT format for Graphviz
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph yakmap {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box, style=rounded];\n\n");

        for node in &self.nodes {
            let mut attrs = vec![format!("label=\"{}\"", escape(node.label()))];
            attrs.push(format!("URL=\"{}\"", escape(&node.link)));
            if let Some(color) = &node.color {
                attrs.push(format!("color=\"{}\"", escape(color)));
            }
            let mut styles = vec!["rounded"];
            if node.dashed {
                styles.push("dashed");
            }
            if node.faded {
                attrs.push("fontcolor=\"grey50\"".into());
            }
            if node.shape.as_deref() == Some("circle") {
                attrs.push("shape=ellipse".into());
            }
            attrs.push(format!("style=\"{}\"", styles.join(",")));
            if let Some(pos) = node.position() {
                attrs.push(format!("pos=\"{},{}\"", pos.x, -pos.y));
            }
            dot.push_str(&format!("  \"{}\" [{}];\n", escape(&node.name), attrs.join(", ")));
        }

        dot.push('\n');

        for edge in self.graph.edge_indices() {
            let Some((from, to)) = self.graph.edge_endpoints(edge) else {
                continue;
            };
            let style = match self.graph[edge] {
                EdgeKind::Inspiration => "",
                EdgeKind::Dependency => " [style=dashed]",
            };
            dot.push_str(&format!(
                "  \"{}\" -> \"{}\"{};\n",
                escape(&self.graph[from]),
                escape(&self.graph[to]),
                style
            ));
        }

        dot.push_str("}\n");
        dot
    }

    /// Export the project list to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.nodes).map_err(YakMapError::Serialize)
    }
}

/// `(kind, referenced name)` for each entry of `from` then `deps`
fn references(node: &ProjectNode) -> impl Iterator<Item = (EdgeKind, &str)> {
    node.from
        .iter()
        .map(|s| (EdgeKind::Inspiration, s.as_str()))
        .chain(node.deps.iter().map(|s| (EdgeKind::Dependency, s.as_str())))
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
