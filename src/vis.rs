// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Adapter to the vis-network data schema
//!
//! [`ProjectNode`] knows nothing about the renderer. This module maps the
//! merged project list onto the `{ nodes, edges }` shape that vis-network's
//! `DataSet`s accept.

use crate::graph::EdgeKind;
use crate::types::ProjectNode;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Opacity applied to faded projects
pub const FADED_OPACITY: f64 = 0.4;

/// Extra shape options
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProperties {
    /// Dashed border
    pub border_dashes: bool,
}

/// A node as vis-network expects it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisNode {
    /// Node id (the project name)
    pub id: String,
    /// Text drawn on the node
    pub label: String,
    /// Hover text, the project link
    pub title: String,
    /// Project link, opened on double click by the page
    pub url: String,
    /// Renderer shape, `box` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    /// Node color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Label margin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<u32>,
    /// Saved X coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Saved Y coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Set for faded projects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Set for dashed projects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_properties: Option<ShapeProperties>,
    /// Passed through for the page's edge animation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animate_stop: Option<bool>,
}

/// An edge as vis-network expects it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisEdge {
    /// Source node id
    pub from: String,
    /// Target node id
    pub to: String,
    /// Dashed line (dependency edges)
    pub dashes: bool,
    /// Arrow placement
    pub arrows: &'static str,
    /// Whether the page may keep animating this edge; false when the
    /// target project sets `animateStop = false`
    pub animate: bool,
    /// Relationship kind
    pub kind: EdgeKind,
}

/// Complete payload for the page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisData {
    /// Nodes in dataset order
    pub nodes: Vec<VisNode>,
    /// Edges, `from` entries before `deps` entries per node
    pub edges: Vec<VisEdge>,
}

impl From<&ProjectNode> for VisNode {
    fn from(node: &ProjectNode) -> Self {
        Self {
            id: node.name.clone(),
            label: node.label().to_string(),
            title: node.link.clone(),
            url: node.link.clone(),
            shape: node.shape.clone(),
            color: node.color.clone(),
            margin: node.margin,
            x: node.x,
            y: node.y,
            opacity: node.faded.then_some(FADED_OPACITY),
            shape_properties: node.dashed.then_some(ShapeProperties { border_dashes: true }),
            animate_stop: node.animate_stop,
        }
    }
}

/// Map merged projects to the renderer schema.
///
/// Edges whose source is not in `nodes` are dropped.
#[must_use]
pub fn to_vis(nodes: &[ProjectNode]) -> VisData {
    let names: HashSet<&str> = nodes.iter().map(|n| n.name.as_str()).collect();
    let mut data = VisData {
        nodes: nodes.iter().map(VisNode::from).collect(),
        edges: Vec::new(),
    };

    for node in nodes {
        let animate = node.animate_stop != Some(false);
        let refs = node
            .from
            .iter()
            .map(|s| (EdgeKind::Inspiration, s))
            .chain(node.deps.iter().map(|s| (EdgeKind::Dependency, s)));
        for (kind, source) in refs {
            if !names.contains(source.as_str()) {
                debug!("Skipping edge {} -> {}: no such project", source, node.name);
                continue;
            }
            data.edges.push(VisEdge {
                from: source.clone(),
                to: node.name.clone(),
                dashes: kind == EdgeKind::Dependency,
                arrows: "to",
                animate,
                kind,
            });
        }
    }

    data
}
